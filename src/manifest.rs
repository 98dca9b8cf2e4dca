//! Mod-state manifest loading and normalization
//!
//! A manifest is one player's exported mod state: an ordered list of mods
//! where document position encodes the in-game load order. Loading is a
//! purely functional transform of one input file; manifests are immutable
//! for the rest of the run.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::LoadError;

/// How raw identifiers are folded into comparison keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseMode {
    /// Case-insensitive keys (default; different mod tools disagree on casing).
    #[default]
    Insensitive,
    /// Keys compare exactly as written.
    Sensitive,
}

impl CaseMode {
    /// Derive the comparison key for a raw identifier.
    #[must_use]
    pub fn fold(self, id: &str) -> String {
        match self {
            Self::Insensitive => id.to_lowercase(),
            Self::Sensitive => id.to_string(),
        }
    }
}

/// Explicit loader configuration.
///
/// Passed into the loader (and indirectly the analyzer, via the keys it
/// produces) rather than read from ambient state, so analysis output never
/// depends on invocation context.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Identifier comparison mode.
    pub case: CaseMode,
}

/// Mod entry as it appears in the state file. Every field is required;
/// a missing field is a malformed manifest, not a default.
#[derive(Debug, Deserialize)]
struct RawMod {
    id: String,
    name: String,
    version: String,
    enabled: bool,
}

/// Top-level shape of an exported state file.
#[derive(Debug, Deserialize)]
struct RawState {
    /// Optional player label; defaults to the file stem.
    #[serde(default)]
    player: Option<String>,
    /// Mods in load order.
    mods: Vec<RawMod>,
}

/// One mod as tracked by a player's mod manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModRecord {
    /// Normalized comparison key, derived once from `id` at load time.
    pub key: String,
    /// Raw identifier as written in the state file, kept for display.
    pub id: String,
    /// Human-readable mod name.
    pub name: String,
    /// Opaque version string; compared for exact equality only.
    pub version: String,
    /// Whether the mod is active in the player's load order.
    pub enabled: bool,
    /// 0-based position in the load order.
    pub position: usize,
}

impl ModRecord {
    /// Display form used on the present side of a presence conflict.
    #[must_use]
    pub fn describe(&self) -> String {
        format!("{} ({})", self.name, self.version)
    }
}

/// An ordered, immutable snapshot of one player's mod state.
#[derive(Debug, Clone)]
pub struct Manifest {
    label: String,
    records: Vec<ModRecord>,
}

impl Manifest {
    /// Load and normalize a state file from disk.
    ///
    /// The player label is taken from the document's `player` field when
    /// present, otherwise from the file stem.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] when the file cannot be read,
    /// [`LoadError::Malformed`] when the document does not parse or a mod
    /// entry is missing a required field, and
    /// [`LoadError::DuplicateIdentifier`] when one normalized identifier
    /// appears twice.
    pub fn load(path: &Path, options: LoadOptions) -> Result<Self, LoadError> {
        let bytes = fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_slice(&bytes, path, options)
    }

    /// Normalize a state document already held in memory.
    ///
    /// `origin` is used for the fallback label and for error context.
    ///
    /// # Errors
    ///
    /// Same contract as [`Manifest::load`], minus the I/O case.
    pub fn from_slice(
        bytes: &[u8],
        origin: &Path,
        options: LoadOptions,
    ) -> Result<Self, LoadError> {
        let raw: RawState =
            serde_json::from_slice(bytes).map_err(|source| LoadError::Malformed {
                path: origin.to_path_buf(),
                source,
            })?;

        let label = raw
            .player
            .unwrap_or_else(|| Self::stem_label(origin));

        let mut seen: HashSet<String> = HashSet::with_capacity(raw.mods.len());
        let mut records = Vec::with_capacity(raw.mods.len());

        // Position is the 0-based index of first appearance; source ordering
        // encodes the load order and is never re-sorted.
        for (position, raw_mod) in raw.mods.into_iter().enumerate() {
            let key = options.case.fold(&raw_mod.id);
            if !seen.insert(key.clone()) {
                return Err(LoadError::DuplicateIdentifier {
                    path: origin.to_path_buf(),
                    id: raw_mod.id,
                });
            }
            records.push(ModRecord {
                key,
                id: raw_mod.id,
                name: raw_mod.name,
                version: raw_mod.version,
                enabled: raw_mod.enabled,
                position,
            });
        }

        Ok(Self { label, records })
    }

    /// Player (or host) label this manifest belongs to.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Mod records in load order.
    #[must_use]
    pub fn records(&self) -> &[ModRecord] {
        &self.records
    }

    /// Number of mods in the manifest.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the manifest contains no mods. An empty manifest is valid.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn stem_label(path: &Path) -> String {
        path.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string()
    }
}
