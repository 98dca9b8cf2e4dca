//! Command implementations behind the CLI surface
//!
//! The orchestration layer: discovery, per-file loading with error triage,
//! analysis, and report writing. Loader failures on guest files are logged
//! and skipped; a failing host file aborts the run since there is nothing
//! to compare against.

use std::path::Path;

use tracing::{error, info, warn};

use crate::analysis;
use crate::cli::ReportFormat;
use crate::discovery;
use crate::error::{Result, RunError};
use crate::manifest::{LoadOptions, Manifest};
use crate::report;

/// The `check` command: full discover → load → analyze → report run.
pub struct Check;

impl Check {
    /// Execute the check run.
    ///
    /// # Errors
    ///
    /// Returns an error when discovery pre-flight fails, the host file
    /// cannot be loaded, or a report cannot be written. Guest files that
    /// fail to load are reported and skipped, not fatal.
    pub fn execute(
        host_name: &str,
        data_dir: &Path,
        out_dir: &Path,
        format: ReportFormat,
        options: LoadOptions,
    ) -> Result<()> {
        let inputs = discovery::discover(data_dir, host_name)?;

        let host = Manifest::load(&inputs.host.path, options).map_err(RunError::HostUnreadable)?;
        info!(
            "host `{}`: {} mod(s) in load order",
            host.label(),
            host.len()
        );

        let mut guests = Vec::with_capacity(inputs.guests.len());
        for guest_file in &inputs.guests {
            match Manifest::load(&guest_file.path, options) {
                Ok(manifest) => guests.push(manifest),
                Err(e) => {
                    error!("skipping {}: {e}", guest_file.path.display());
                    error!("hint: {}", e.hint());
                }
            }
        }

        let result = analysis::analyze(&host, &guests);

        for (guest, conflicts) in &result.guests {
            if !conflicts.is_empty() {
                warn!(
                    "found {} conflicting mod(s) between host `{}` and player `{}`",
                    conflicts.len(),
                    result.host,
                    guest
                );
            }
        }

        if matches!(format, ReportFormat::Csv | ReportFormat::All) {
            for path in report::write_csv(&result, out_dir)? {
                info!("conflicts saved to {}", path.display());
            }
        }
        if matches!(format, ReportFormat::Json | ReportFormat::All) {
            let path = report::write_json(&result, out_dir)?;
            info!("report saved to {}", path.display());
        }

        println!("{}", report::render_summary(&result));
        Ok(())
    }
}

/// The `validate` command: load one state file and report what is wrong.
pub struct Validate;

impl Validate {
    /// Execute validation of a single file.
    ///
    /// # Errors
    ///
    /// Returns the loader error when the file is malformed or contains a
    /// duplicate identifier.
    pub fn execute(file: &Path, options: LoadOptions) -> Result<()> {
        match Manifest::load(file, options) {
            Ok(manifest) => {
                println!(
                    "{}: ok ({} mod(s) for player `{}`)",
                    file.display(),
                    manifest.len(),
                    manifest.label()
                );
                Ok(())
            }
            Err(e) => {
                error!("{e}");
                error!("hint: {}", e.hint());
                Err(e.into())
            }
        }
    }
}
