//! Uploadable asset references.
//!
//! Assets are created when selected from the source store, consumed once per
//! run, and never retained across runs.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One rendered clip file ready for upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ClipAsset {
    /// Run-local identifier
    pub id: String,
    /// Display name (caption fallback and error reporting)
    pub name: String,
    /// Location of the rendered file
    pub path: PathBuf,
}

impl ClipAsset {
    pub fn new(id: impl Into<String>, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            path: path.into(),
        }
    }
}

/// A folder of ordered images posted together as one multi-image post,
/// with an optional `caption.txt` sidecar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CarouselFolder {
    /// Folder identifier in the source store
    pub id: String,
    /// Folder display name
    pub name: String,
    /// Folder location
    pub path: PathBuf,
}

impl CarouselFolder {
    pub fn new(id: impl Into<String>, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            path: path.into(),
        }
    }
}
