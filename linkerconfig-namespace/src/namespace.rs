//! Linker namespace state, sanitizer path derivation and serialization
//!
//! A [`Namespace`] is assembled by appending paths, whitelisted libraries and
//! links in the order the build policy dictates. Once assembly is complete it
//! is sealed into a [`SealedNamespace`], which can no longer be mutated and is
//! the only form that writes configuration lines.

use std::ops::Deref;

use linkerconfig_core::{AsanPath, ConfigWriter, DATA_ASAN_PATH};

use crate::link::Link;
use crate::paths::{find_in_path_list, write_list};

/// Library-resolution namespace under construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    name: String,
    is_isolated: bool,
    is_visible: bool,
    search_paths: Vec<String>,
    permitted_paths: Vec<String>,
    asan_search_paths: Vec<String>,
    asan_permitted_paths: Vec<String>,
    whitelisted: Vec<String>,
    links: Vec<Link>,
}

impl Namespace {
    /// Create a non-isolated, invisible namespace with no paths
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_isolated: false,
            is_visible: false,
            search_paths: Vec::new(),
            permitted_paths: Vec::new(),
            asan_search_paths: Vec::new(),
            asan_permitted_paths: Vec::new(),
            whitelisted: Vec::new(),
            links: Vec::new(),
        }
    }

    /// Set the isolation flag
    #[must_use]
    pub fn with_isolated(mut self, isolated: bool) -> Self {
        self.is_isolated = isolated;
        self
    }

    /// Set the visibility flag
    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.is_visible = visible;
        self
    }

    /// Set the isolation flag
    pub const fn set_isolated(&mut self, isolated: bool) {
        self.is_isolated = isolated;
    }

    /// Set the visibility flag
    pub const fn set_visible(&mut self, visible: bool) {
        self.is_visible = visible;
    }

    /// Namespace name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the namespace is isolated
    #[must_use]
    pub const fn is_isolated(&self) -> bool {
        self.is_isolated
    }

    /// Whether the namespace is visible
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.is_visible
    }

    /// Search paths in insertion order
    #[must_use]
    pub fn search_paths(&self) -> &[String] {
        &self.search_paths
    }

    /// Permitted paths in insertion order
    #[must_use]
    pub fn permitted_paths(&self) -> &[String] {
        &self.permitted_paths
    }

    /// Sanitizer search paths in insertion order
    #[must_use]
    pub fn asan_search_paths(&self) -> &[String] {
        &self.asan_search_paths
    }

    /// Sanitizer permitted paths in insertion order
    #[must_use]
    pub fn asan_permitted_paths(&self) -> &[String] {
        &self.asan_permitted_paths
    }

    /// Whitelisted library names in insertion order
    #[must_use]
    pub fn whitelisted(&self) -> &[String] {
        &self.whitelisted
    }

    /// Outgoing links in creation order
    #[must_use]
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Append a search path and its sanitizer variants
    pub fn add_search_path(&mut self, path: impl Into<String>, asan: AsanPath) {
        let path = path.into();
        tracing::trace!(namespace = %self.name, path = %path, %asan, "Adding search path");

        self.asan_search_paths.extend(asan.derive(&path));
        self.search_paths.push(path);
    }

    /// Append a permitted path and its sanitizer variants
    pub fn add_permitted_path(&mut self, path: impl Into<String>, asan: AsanPath) {
        let path = path.into();
        tracing::trace!(namespace = %self.name, path = %path, %asan, "Adding permitted path");

        self.asan_permitted_paths.extend(asan.derive(&path));
        self.permitted_paths.push(path);
    }

    /// Whitelist a library name
    ///
    /// Names are not de-duplicated.
    pub fn add_whitelisted(&mut self, name: impl Into<String>) {
        let name = name.into();
        tracing::trace!(namespace = %self.name, lib = %name, "Adding whitelisted lib");
        self.whitelisted.push(name);
    }

    /// Get the link to `target`, creating it on first use
    ///
    /// ```
    /// use linkerconfig_namespace::Namespace;
    ///
    /// let mut ns = Namespace::new("default");
    /// ns.get_link("system").add_shared_lib("libc.so");
    /// ns.get_link("system").add_shared_lib("libm.so");
    ///
    /// assert_eq!(ns.links().len(), 1);
    /// assert_eq!(ns.links()[0].shared_libs(), ["libc.so", "libm.so"]);
    /// ```
    pub fn get_link(&mut self, target: &str) -> &mut Link {
        if let Some(index) = self.links.iter().position(|link| link.to() == target) {
            return &mut self.links[index];
        }

        tracing::debug!(namespace = %self.name, target = %target, "Creating link");
        let index = self.links.len();
        self.links.push(Link::new(self.name.clone(), target));
        &mut self.links[index]
    }

    /// Whether `path` was added as a search path under `asan`
    #[must_use]
    pub fn contains_search_path(&self, path: &str, asan: AsanPath) -> bool {
        contains_path(&self.search_paths, &self.asan_search_paths, path, asan)
    }

    /// Whether `path` was added as a permitted path under `asan`
    #[must_use]
    pub fn contains_permitted_path(&self, path: &str, asan: AsanPath) -> bool {
        contains_path(&self.permitted_paths, &self.asan_permitted_paths, path, asan)
    }

    /// Finish assembly
    #[must_use]
    pub fn seal(self) -> SealedNamespace {
        tracing::debug!(
            namespace = %self.name,
            search_paths = self.search_paths.len(),
            permitted_paths = self.permitted_paths.len(),
            links = self.links.len(),
            "Sealing namespace"
        );
        SealedNamespace(self)
    }
}

/// Conjunctive membership: base list, then the sanitizer list as `asan` demands
fn contains_path(base: &[String], asan_list: &[String], path: &str, asan: AsanPath) -> bool {
    if !find_in_path_list(base, path) {
        return false;
    }

    match asan {
        AsanPath::None => true,
        AsanPath::SamePath => find_in_path_list(asan_list, path),
        AsanPath::WithDataAsan => {
            find_in_path_list(asan_list, path)
                && find_in_path_list(asan_list, &format!("{DATA_ASAN_PATH}{path}"))
        }
    }
}

/// Namespace whose assembly is complete
///
/// Dereferences to [`Namespace`] for read-only queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedNamespace(Namespace);

impl SealedNamespace {
    /// Write the namespace's lines, then each link's, under `namespace.<name>.`
    ///
    /// Line order is fixed: `isolated`, `visible` (only when set), the
    /// `search`, `permitted`, `asan.search` and `asan.permitted` path groups,
    /// `whitelisted`, then `links` followed by every link's own lines. The
    /// writer's prefix is restored before returning.
    pub fn write_config(&self, writer: &mut ConfigWriter) {
        let ns = &self.0;
        tracing::debug!(namespace = %ns.name, "Writing namespace configuration");

        let mut writer = writer.scoped_prefix(format!("namespace.{}.", ns.name));

        writer.write_fmt_line(format_args!("isolated = {}", ns.is_isolated));
        if ns.is_visible {
            writer.write_line("visible = true");
        }

        write_list(&mut writer, "search.paths", &ns.search_paths);
        write_list(&mut writer, "permitted.paths", &ns.permitted_paths);
        write_list(&mut writer, "asan.search.paths", &ns.asan_search_paths);
        write_list(&mut writer, "asan.permitted.paths", &ns.asan_permitted_paths);
        write_list(&mut writer, "whitelisted", &ns.whitelisted);

        if !ns.links.is_empty() {
            let targets: Vec<&str> = ns.links.iter().map(Link::to).collect();
            writer.write_fmt_line(format_args!("links = {}", targets.join(",")));

            for link in &ns.links {
                link.write_config(&mut writer);
            }
        }
    }

    /// Render this namespace alone
    #[must_use]
    pub fn to_config_string(&self) -> String {
        let mut writer = ConfigWriter::new();
        self.write_config(&mut writer);
        writer.to_config_string()
    }
}

impl Deref for SealedNamespace {
    type Target = Namespace;

    fn deref(&self) -> &Namespace {
        &self.0
    }
}

impl From<Namespace> for SealedNamespace {
    fn from(ns: Namespace) -> Self {
        ns.seal()
    }
}
