//! Links delegating library lookups from one namespace to another

use linkerconfig_core::ConfigWriter;

use crate::paths::write_list;

/// Directed link from namespace `from` to namespace `to`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    from: String,
    to: String,
    shared_libs: Vec<String>,
    allow_all_shared_libs: bool,
}

impl Link {
    /// Create a link that shares no libraries yet
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            shared_libs: Vec::new(),
            allow_all_shared_libs: false,
        }
    }

    /// Name of the namespace that owns the link
    #[must_use]
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Name of the namespace lookups are delegated to
    #[must_use]
    pub fn to(&self) -> &str {
        &self.to
    }

    /// Libraries that may be resolved through the link
    #[must_use]
    pub fn shared_libs(&self) -> &[String] {
        &self.shared_libs
    }

    /// Whether every library may be resolved through the link
    #[must_use]
    pub const fn allows_all_shared_libs(&self) -> bool {
        self.allow_all_shared_libs
    }

    /// Share one library through the link
    pub fn add_shared_lib(&mut self, lib: impl Into<String>) -> &mut Self {
        let lib = lib.into();
        tracing::trace!(from = %self.from, to = %self.to, lib = %lib, "Adding shared lib");
        self.shared_libs.push(lib);
        self
    }

    /// Share several libraries through the link, in order
    pub fn add_shared_libs<I, S>(&mut self, libs: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for lib in libs {
            self.add_shared_lib(lib);
        }
        self
    }

    /// Share every library through the link
    pub fn allow_all_shared_libs(&mut self) -> &mut Self {
        tracing::trace!(from = %self.from, to = %self.to, "Allowing all shared libs");
        self.allow_all_shared_libs = true;
        self
    }

    /// Write the link's lines under `namespace.<from>.link.<to>.`
    ///
    /// When all libraries are allowed the explicit list is not written.
    pub fn write_config(&self, writer: &mut ConfigWriter) {
        let mut writer = writer.scoped_prefix(format!("namespace.{}.link.{}.", self.from, self.to));

        if self.allow_all_shared_libs {
            writer.write_line("allow_all_shared_libs = true");
        } else {
            write_list(&mut writer, "shared_libs", &self.shared_libs);
        }
    }
}
