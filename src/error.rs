//! Error types for manifest loading and run orchestration

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using `anyhow::Error`
pub type Result<T> = anyhow::Result<T>;

/// Errors raised while loading a single mod-state file.
///
/// Fatal for the offending file only: the surrounding run logs the failure
/// and keeps processing the remaining guest files.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read from disk.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The document is not a well-formed mod-state file, or a mod entry is
    /// missing a required field.
    #[error("{path} is not a well-formed mod state file: {source}")]
    Malformed {
        /// File the parser rejected.
        path: PathBuf,
        /// Parse failure with line/column and field context.
        #[source]
        source: serde_json::Error,
    },

    /// The same mod identifier appears twice within one file.
    #[error("{path}: duplicate mod identifier `{id}`")]
    DuplicateIdentifier {
        /// File containing the duplicate.
        path: PathBuf,
        /// Raw identifier as written in the file.
        id: String,
    },
}

impl LoadError {
    /// Human-readable hint shown alongside the error so users can
    /// self-diagnose without reading source code.
    #[must_use]
    pub fn hint(&self) -> &'static str {
        match self {
            Self::Io { .. } => "check that the file exists and is readable",
            Self::Malformed { .. } => {
                "is this an exported mod state file? Expected a JSON document \
                 with a `mods` array where each entry has `id`, `name`, \
                 `version` and `enabled` fields"
            }
            Self::DuplicateIdentifier { .. } => {
                "the same mod is listed twice; re-export the state file from \
                 the mod manager"
            }
        }
    }
}

/// Errors that abort the whole run before any comparison happens.
#[derive(Debug, Error)]
pub enum RunError {
    /// The data directory contains no state files at all.
    #[error("no mod state files found in {dir}")]
    NoInputs {
        /// Directory that was searched.
        dir: PathBuf,
    },

    /// A single state file leaves nothing to compare against.
    #[error("found only one state file ({found}); at least two are needed to compare")]
    NotEnoughFiles {
        /// Label of the lone file that was found.
        found: String,
    },

    /// No file matches the nominated host name, so there is no reference
    /// manifest to compare against.
    #[error("host file `{name}` not found among: {available}")]
    MissingHost {
        /// Host name the user asked for.
        name: String,
        /// Comma-separated labels of the files that were found.
        available: String,
    },

    /// Two or more input files carry identical mod state, which usually
    /// means one player's export was copied instead of collected.
    #[error("duplicate state files found: {groups}")]
    DuplicateInputs {
        /// Grouped listing of the files sharing content.
        groups: String,
    },

    /// The host file itself failed to load.
    #[error("host manifest could not be loaded")]
    HostUnreadable(#[source] LoadError),
}
