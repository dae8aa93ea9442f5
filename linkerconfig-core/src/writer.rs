//! Line-oriented configuration writer with scoped key prefixes
//!
//! Every line written is prefixed with the prefix active at the time of the
//! call. Prefixes are normally managed through [`PrefixScope`], which restores
//! the previous prefix when dropped, so nested writers (a namespace and then
//! each of its links) never leak their scope into sibling output.

use std::fmt::{self, Write as _};
use std::ops::{Deref, DerefMut};

/// Accumulates configuration lines in call order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigWriter {
    prefix: String,
    lines: Vec<String>,
}

impl ConfigWriter {
    /// Create an empty writer with no prefix
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current prefix
    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        self.prefix = prefix.into();
    }

    /// Clear the current prefix
    pub fn reset_prefix(&mut self) {
        self.prefix.clear();
    }

    /// Current prefix
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Set `prefix` until the returned scope is dropped
    ///
    /// The prefix in effect before this call is restored on drop, including
    /// when the scope is left early through `?` or a panic unwind.
    pub fn scoped_prefix(&mut self, prefix: impl Into<String>) -> PrefixScope<'_> {
        let previous = std::mem::replace(&mut self.prefix, prefix.into());
        PrefixScope {
            writer: self,
            previous,
        }
    }

    /// Append one prefixed line
    pub fn write_line(&mut self, line: impl AsRef<str>) {
        let line = line.as_ref();
        let mut out = String::with_capacity(self.prefix.len() + line.len());
        out.push_str(&self.prefix);
        out.push_str(line);
        self.lines.push(out);
    }

    /// Append one prefixed line built from format arguments
    ///
    /// ```
    /// use linkerconfig_core::ConfigWriter;
    ///
    /// let mut writer = ConfigWriter::new();
    /// writer.set_prefix("namespace.default.");
    /// writer.write_fmt_line(format_args!("isolated = {}", true));
    /// assert_eq!(writer.lines(), ["namespace.default.isolated = true"]);
    /// ```
    pub fn write_fmt_line(&mut self, args: fmt::Arguments<'_>) {
        let mut out = self.prefix.clone();
        // Writing into a String cannot fail.
        let _ = out.write_fmt(args);
        self.lines.push(out);
    }

    /// Lines written so far
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Whether nothing has been written yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Render all lines, each terminated by a newline
    #[must_use]
    pub fn to_config_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ConfigWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Prefix held on a [`ConfigWriter`] for the lifetime of this guard
#[derive(Debug)]
pub struct PrefixScope<'a> {
    writer: &'a mut ConfigWriter,
    previous: String,
}

impl Deref for PrefixScope<'_> {
    type Target = ConfigWriter;

    fn deref(&self) -> &ConfigWriter {
        self.writer
    }
}

impl DerefMut for PrefixScope<'_> {
    fn deref_mut(&mut self) -> &mut ConfigWriter {
        self.writer
    }
}

impl Drop for PrefixScope<'_> {
    fn drop(&mut self) {
        self.writer.prefix = std::mem::take(&mut self.previous);
    }
}
