//! # modcheck
//!
//! Core library for the multiplayer mod conflict checker.
//!
//! Loads each player's exported mod-manager state, normalizes it into an
//! ordered manifest, and diffs every guest manifest against the host's to
//! flag missing mods, version drift, enablement differences, and load-order
//! divergence before a shared session starts.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Core error types for the modcheck library
pub mod error;

/// Manifest loading and normalization
pub mod manifest;

/// Conflict detection between host and guest manifests
pub mod analysis;

/// State-file discovery and pre-flight checks
pub mod discovery;

/// Conflict report rendering (CSV and JSON)
pub mod report;

/// Console and file logging setup
pub mod logging;

/// CLI argument definitions
pub mod cli;

/// Command implementations behind the CLI surface
pub mod commands;
