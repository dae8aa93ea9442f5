//! Core type definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Root of the writable overlay that holds sanitizer-instrumented libraries
pub const DATA_ASAN_PATH: &str = "/data/asan";

/// How a path is mirrored into the sanitizer (ASan) path lists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AsanPath {
    /// Not recorded for the sanitizer variant
    #[default]
    None,
    /// Recorded unchanged
    SamePath,
    /// Recorded under [`DATA_ASAN_PATH`] first, then unchanged
    WithDataAsan,
}

impl AsanPath {
    /// Sanitizer list entries to append for `path`, in order
    ///
    /// The overlay prefix is concatenated directly, so `/system/lib64`
    /// becomes `/data/asan/system/lib64`.
    #[must_use]
    pub fn derive(self, path: &str) -> Vec<String> {
        match self {
            Self::None => Vec::new(),
            Self::SamePath => vec![path.to_string()],
            Self::WithDataAsan => vec![format!("{DATA_ASAN_PATH}{path}"), path.to_string()],
        }
    }

    /// Get the selector as its configuration name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::SamePath => "same_path",
            Self::WithDataAsan => "with_data_asan",
        }
    }
}

impl fmt::Display for AsanPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AsanPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(Self::None),
            "same_path" => Ok(Self::SamePath),
            "with_data_asan" => Ok(Self::WithDataAsan),
            other => Err(Error::invalid_config(format!(
                "Unknown ASan path mode '{other}' (expected none, same_path or with_data_asan)"
            ))),
        }
    }
}
