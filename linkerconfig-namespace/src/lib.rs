//! Linker namespace model and its configuration output
//!
//! This crate models the library-resolution namespaces a dynamic linker
//! enforces at process start:
//! - [`Namespace`] - search/permitted paths, sanitizer variants, whitelist
//! - [`Link`] - delegation of lookups to another namespace
//! - [`NamespaceConfig`] - serde description used to build namespaces from files

#![warn(missing_docs, clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

pub mod config;
pub mod link;
pub mod namespace;
mod paths;

pub use config::{LinkConfig, NamespaceConfig, PathConfig, load_namespaces};
pub use link::Link;
pub use namespace::{Namespace, SealedNamespace};

// Re-export commonly used types
pub use linkerconfig_core::{AsanPath, ConfigWriter};
