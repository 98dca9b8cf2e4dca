//! State-file discovery and pre-flight checks
//!
//! Walks the data directory for exported `.json` state files, singles out
//! the host's file, and refuses runs that cannot produce a meaningful
//! comparison: nothing to read, a single file, a missing host, or two
//! players handing in the same export twice.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::debug;
use walkdir::WalkDir;

use crate::error::RunError;

/// One discovered state file, not yet loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateFile {
    /// Path to the `.json` export.
    pub path: PathBuf,
    /// Player label, taken from the file stem.
    pub label: String,
}

/// Discovered inputs with the host file singled out.
#[derive(Debug, Clone)]
pub struct Inputs {
    /// The designated host state file.
    pub host: StateFile,
    /// Every other state file, sorted by label.
    pub guests: Vec<StateFile>,
}

/// Discover all state files under `dir` and designate the host.
///
/// `host_name` matches the file stem and may carry a trailing `.json`.
///
/// # Errors
///
/// Returns [`RunError::NoInputs`] when the directory yields no state files,
/// [`RunError::NotEnoughFiles`] when only one is found,
/// [`RunError::DuplicateInputs`] when two files carry identical content, and
/// [`RunError::MissingHost`] when no file matches `host_name`.
pub fn discover(dir: &Path, host_name: &str) -> Result<Inputs, RunError> {
    let mut files = find_state_files(dir);
    debug!("found {} state file(s) in {}", files.len(), dir.display());

    if files.is_empty() {
        return Err(RunError::NoInputs {
            dir: dir.to_path_buf(),
        });
    }
    if files.len() == 1 {
        return Err(RunError::NotEnoughFiles {
            found: files[0].label.clone(),
        });
    }

    check_duplicates(&files)?;

    let wanted = host_name.trim_end_matches(".json");
    let host_index = files
        .iter()
        .position(|f| f.label == wanted)
        .ok_or_else(|| RunError::MissingHost {
            name: wanted.to_string(),
            available: files
                .iter()
                .map(|f| f.label.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        })?;

    let host = files.remove(host_index);
    Ok(Inputs {
        host,
        guests: files,
    })
}

/// All `.json` files under `dir`, recursively, sorted by label so the run
/// is deterministic regardless of directory iteration order.
fn find_state_files(dir: &Path) -> Vec<StateFile> {
    let mut files: Vec<StateFile> = WalkDir::new(dir)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        })
        .filter_map(|entry| {
            let label = entry.path().file_stem()?.to_str()?.to_string();
            Some(StateFile {
                path: entry.into_path(),
                label,
            })
        })
        .collect();

    files.sort_by(|a, b| a.label.cmp(&b.label));
    files
}

/// Flag inputs whose mod state is identical, which usually means one
/// player's export was copied around instead of collected per machine.
///
/// Files are hashed over a canonical re-serialization of their JSON (maps
/// serialize key-sorted), so formatting differences do not hide copies.
/// Unreadable or unparsable files are skipped here; the loader reports
/// those with proper context later.
fn check_duplicates(files: &[StateFile]) -> Result<(), RunError> {
    let mut by_digest: BTreeMap<[u8; 32], Vec<&str>> = BTreeMap::new();

    for file in files {
        let Ok(bytes) = fs::read(&file.path) else {
            continue;
        };
        let Ok(value) = serde_json::from_slice::<serde_json::Value>(&bytes) else {
            continue;
        };
        let digest: [u8; 32] = Sha256::digest(value.to_string().as_bytes()).into();
        by_digest.entry(digest).or_default().push(&file.label);
    }

    let groups: Vec<String> = by_digest
        .values()
        .filter(|labels| labels.len() > 1)
        .map(|labels| format!("[{}]", labels.join(", ")))
        .collect();

    if groups.is_empty() {
        Ok(())
    } else {
        Err(RunError::DuplicateInputs {
            groups: groups.join(" "),
        })
    }
}
