//! Helpers shared by the path, whitelist and shared-library lists

use linkerconfig_core::ConfigWriter;

/// Whether `path` equals any `:`-separated segment of any entry in `list`
pub(crate) fn find_in_path_list(list: &[String], path: &str) -> bool {
    list.iter()
        .any(|entry| entry.split(':').any(|segment| segment == path))
}

/// Write `key = first` followed by `key += next` for each remaining value
///
/// `=` resets the list on the linker side and `+=` appends to it, so the
/// operator of the first line must never be `+=`.
pub(crate) fn write_list(writer: &mut ConfigWriter, key: &str, values: &[String]) {
    for (i, value) in values.iter().enumerate() {
        let op = if i == 0 { "=" } else { "+=" };
        writer.write_fmt_line(format_args!("{key} {op} {value}"));
    }
}
