//! Linkerconfig Core - Foundation types and the configuration line writer
//!
//! This crate provides the abstractions shared by the namespace model and the CLI.

#![warn(missing_docs, clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod types;
pub mod writer;

pub use error::{Error, Result};
pub use types::{AsanPath, DATA_ASAN_PATH};
pub use writer::{ConfigWriter, PrefixScope};
