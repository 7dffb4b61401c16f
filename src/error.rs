//! Error types for a generation run.

use crate::parser::InvalidRecord;
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Conditions that stop a run.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Unable to read config file {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error("Unable to list chain directory {}: {source}", .path.display())]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unable to save chains to {}: {source}", .path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Why a single document was left out of the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum SkipReason {
    #[error("unable to read document: {0}")]
    DocumentUnreadable(String),

    #[error("there is a mistake in the document: {0}")]
    InvalidRecord(#[serde(serialize_with = "serialize_display")] InvalidRecord),
}

fn serialize_display<S, T>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
    T: std::fmt::Display,
{
    serializer.collect_str(value)
}

impl From<InvalidRecord> for SkipReason {
    fn from(invalid: InvalidRecord) -> Self {
        SkipReason::InvalidRecord(invalid)
    }
}
