//! Namespace descriptions loaded from JSON

use std::collections::HashSet;

use linkerconfig_core::{AsanPath, Error, Result};
use serde::{Deserialize, Serialize};

use crate::namespace::Namespace;

/// One search or permitted path and its sanitizer mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathConfig {
    /// Path, possibly several joined with `:`
    pub path: String,

    /// Sanitizer mode
    #[serde(default)]
    pub asan: AsanPath,
}

impl PathConfig {
    /// Create a path description
    #[must_use]
    pub fn new(path: impl Into<String>, asan: AsanPath) -> Self {
        Self {
            path: path.into(),
            asan,
        }
    }
}

/// Outgoing link description
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinkConfig {
    /// Target namespace name
    pub target: String,

    /// Libraries shared through the link
    #[serde(default)]
    pub shared_libs: Vec<String>,

    /// Share every library
    #[serde(default)]
    pub allow_all_shared_libs: bool,
}

impl LinkConfig {
    /// Create a link description sharing nothing
    #[must_use]
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Self::default()
        }
    }

    /// Share a library
    #[must_use]
    pub fn with_shared_lib(mut self, lib: impl Into<String>) -> Self {
        self.shared_libs.push(lib.into());
        self
    }

    /// Share every library
    #[must_use]
    pub fn with_allow_all_shared_libs(mut self, allow: bool) -> Self {
        self.allow_all_shared_libs = allow;
        self
    }
}

/// Namespace description
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NamespaceConfig {
    /// Namespace name
    pub name: String,

    /// Isolated namespace
    #[serde(default)]
    pub isolated: bool,

    /// Visible namespace
    #[serde(default)]
    pub visible: bool,

    /// Search paths, in order
    #[serde(default)]
    pub search_paths: Vec<PathConfig>,

    /// Permitted paths, in order
    #[serde(default)]
    pub permitted_paths: Vec<PathConfig>,

    /// Whitelisted library names
    #[serde(default)]
    pub whitelisted: Vec<String>,

    /// Outgoing links, in order
    #[serde(default)]
    pub links: Vec<LinkConfig>,
}

impl NamespaceConfig {
    /// Create an empty namespace description
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the isolation flag
    #[must_use]
    pub fn with_isolated(mut self, isolated: bool) -> Self {
        self.isolated = isolated;
        self
    }

    /// Set the visibility flag
    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Append a search path
    #[must_use]
    pub fn with_search_path(mut self, path: impl Into<String>, asan: AsanPath) -> Self {
        self.search_paths.push(PathConfig::new(path, asan));
        self
    }

    /// Append a permitted path
    #[must_use]
    pub fn with_permitted_path(mut self, path: impl Into<String>, asan: AsanPath) -> Self {
        self.permitted_paths.push(PathConfig::new(path, asan));
        self
    }

    /// Append a whitelisted library
    #[must_use]
    pub fn with_whitelisted(mut self, lib: impl Into<String>) -> Self {
        self.whitelisted.push(lib.into());
        self
    }

    /// Append a link
    #[must_use]
    pub fn with_link(mut self, link: LinkConfig) -> Self {
        self.links.push(link);
        self
    }

    /// Check the description can produce a well-formed namespace
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::invalid_config("Namespace name cannot be empty"));
        }

        if self.links.iter().any(|link| link.target.is_empty()) {
            return Err(Error::invalid_config(format!(
                "Namespace '{}' has a link with an empty target",
                self.name
            )));
        }

        Ok(())
    }

    /// Build the namespace, applying every addition in description order
    ///
    /// Links listed twice for the same target are merged into one link.
    pub fn into_namespace(self) -> Result<Namespace> {
        self.validate()?;

        let mut ns = Namespace::new(self.name)
            .with_isolated(self.isolated)
            .with_visible(self.visible);

        for entry in self.search_paths {
            ns.add_search_path(entry.path, entry.asan);
        }
        for entry in self.permitted_paths {
            ns.add_permitted_path(entry.path, entry.asan);
        }
        for lib in self.whitelisted {
            ns.add_whitelisted(lib);
        }
        for link_config in self.links {
            let link = ns.get_link(&link_config.target);
            link.add_shared_libs(link_config.shared_libs);
            if link_config.allow_all_shared_libs {
                link.allow_all_shared_libs();
            }
        }

        Ok(ns)
    }
}

/// Parse a JSON array of namespace descriptions into namespaces
///
/// Namespace names must be unique within the array.
pub fn load_namespaces(json: &str) -> Result<Vec<Namespace>> {
    let configs: Vec<NamespaceConfig> = serde_json::from_str(json)?;
    tracing::debug!(count = configs.len(), "Loaded namespace descriptions");

    let mut seen = HashSet::new();
    for config in &configs {
        if !seen.insert(config.name.as_str()) {
            return Err(Error::invalid_config(format!(
                "Duplicate namespace '{}'",
                config.name
            )));
        }
    }

    configs
        .into_iter()
        .map(NamespaceConfig::into_namespace)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_pattern() {
        let config = NamespaceConfig::new("sphal")
            .with_isolated(true)
            .with_search_path("/vendor/lib64", AsanPath::WithDataAsan)
            .with_whitelisted("libz.so")
            .with_link(LinkConfig::new("rs").with_shared_lib("libRS_internal.so"));

        assert!(config.isolated);
        assert!(!config.visible);
        assert_eq!(config.search_paths[0].asan, AsanPath::WithDataAsan);
        assert_eq!(config.links[0].shared_libs, ["libRS_internal.so"]);
    }

    #[test]
    fn test_into_namespace_applies_derivation() {
        let ns = NamespaceConfig::new("default")
            .with_search_path("/system/lib64", AsanPath::WithDataAsan)
            .with_permitted_path("/system/lib64/drm", AsanPath::SamePath)
            .into_namespace()
            .unwrap();

        assert_eq!(
            ns.asan_search_paths(),
            ["/data/asan/system/lib64", "/system/lib64"]
        );
        assert_eq!(ns.asan_permitted_paths(), ["/system/lib64/drm"]);
    }

    #[test]
    fn test_duplicate_link_targets_are_merged() {
        let ns = NamespaceConfig::new("default")
            .with_link(LinkConfig::new("system").with_shared_lib("libc.so"))
            .with_link(LinkConfig::new("system").with_shared_lib("libm.so"))
            .into_namespace()
            .unwrap();

        assert_eq!(ns.links().len(), 1);
        assert_eq!(ns.links()[0].shared_libs(), ["libc.so", "libm.so"]);
    }

    #[test]
    fn test_validate_rejects_empty_names() {
        assert!(NamespaceConfig::new("").validate().is_err());
        assert!(
            NamespaceConfig::new("default")
                .with_link(LinkConfig::new(""))
                .validate()
                .is_err()
        );
        assert!(NamespaceConfig::new("default").validate().is_ok());
    }

    #[test]
    fn test_deserialize_defaults() {
        let config: NamespaceConfig = serde_json::from_str(
            r#"{"name": "vndk", "search_paths": [{"path": "/vendor/lib64/vndk"}]}"#,
        )
        .unwrap();

        assert!(!config.isolated);
        assert_eq!(config.search_paths[0].asan, AsanPath::None);
        assert!(config.links.is_empty());
    }

    #[test]
    fn test_deserialize_rejects_unknown_fields() {
        let result: std::result::Result<NamespaceConfig, _> =
            serde_json::from_str(r#"{"name": "vndk", "isolate": true}"#);

        assert!(result.is_err());
    }

    #[test]
    fn test_load_namespaces_rejects_duplicates() {
        let err = load_namespaces(r#"[{"name": "default"}, {"name": "default"}]"#).unwrap_err();

        assert!(err.to_string().contains("Duplicate namespace 'default'"));
    }

    #[test]
    fn test_load_namespaces_preserves_order() {
        let namespaces = load_namespaces(r#"[{"name": "default"}, {"name": "sphal"}]"#).unwrap();
        let names: Vec<&str> = namespaces.iter().map(Namespace::name).collect();

        assert_eq!(names, ["default", "sphal"]);
    }

    #[test]
    fn test_load_namespaces_invalid_json() {
        let err = load_namespaces("{not json").unwrap_err();

        assert!(matches!(err, Error::Json(_)));
    }
}
