//! Plan computation and publishing
//!
//! Publishing runs in two steps: [`compute_plan`] resolves which known
//! artifacts exist (including the `boot_app0.bin` package fallback), then
//! [`publish`] copies them into the destination tree and writes the
//! manifest. A missing or uncopyable file is logged and skipped; the
//! manifest lists exactly the files that landed on disk.

use crate::board::BoardProfile;
use crate::context::BuildContext;
use crate::manifest::{MANIFEST_FILE_NAME, Manifest};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Known build artifacts, in copy order
const KNOWN_ARTIFACTS: [&str; 4] = [
    "bootloader.bin",
    "partitions.bin",
    "boot_app0.bin",
    "firmware.bin",
];

/// A planned copy of one firmware part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartCopy {
    /// Filename in the destination directory (and in the manifest)
    pub file_name: String,
    /// Resolved source path
    pub source: PathBuf,
    /// Flash offset recorded in the manifest
    pub offset: u32,
}

/// The set of copies to perform for one build
#[derive(Debug, Clone, Default)]
pub struct Plan {
    /// Parts found and scheduled for copying, in copy order
    pub copies: Vec<PartCopy>,
    /// Known artifacts that could not be located
    pub missing: Vec<String>,
}

/// Options for a publish run
#[derive(Debug, Clone, Default)]
pub struct PublishOptions {
    /// Display name for the manifest; defaults to the project directory's
    /// file name
    pub display_name: Option<String>,
}

/// Outcome of a publish run
#[derive(Debug, Clone)]
pub struct PublishReport {
    /// Destination directory the files were published into
    pub dest_dir: PathBuf,
    /// Filenames actually copied, in copy order
    pub copied: Vec<String>,
    /// Known artifacts that were skipped
    pub skipped: Vec<String>,
    /// Path of the written manifest
    pub manifest_path: PathBuf,
}

/// Resolve the source path and offset of every artifact present for this
/// build
pub fn compute_plan(ctx: &BuildContext) -> Plan {
    let profile = BoardProfile::new(&ctx.board);
    let mut plan = Plan::default();

    for file_name in KNOWN_ARTIFACTS {
        let Some(offset) = profile.offset_for(file_name) else {
            // boot_app0.bin on newer chips: not part of the flash image
            debug!("{} not used by board {}", file_name, ctx.board);
            continue;
        };

        let source = ctx.artifact_path(file_name);
        let source = if source.exists() {
            source
        } else if file_name == "boot_app0.bin" {
            let fallback = ctx.boot_app0_fallback();
            if fallback.exists() {
                debug!("Using packaged {}: {}", file_name, fallback.display());
                fallback
            } else {
                warn!(
                    "Could not locate {} in build dir or packages, skipping",
                    file_name
                );
                plan.missing.push(file_name.to_string());
                continue;
            }
        } else {
            warn!("Source file {} not found, skipping", source.display());
            plan.missing.push(file_name.to_string());
            continue;
        };

        plan.copies.push(PartCopy {
            file_name: file_name.to_string(),
            source,
            offset,
        });
    }

    plan
}

/// Publish one build: copy the planned files into
/// `<project_dir>/docs/firmware/<env>/` and write `manifest.json`
///
/// Per-file copy failures are logged and skipped. Only destination-tree
/// creation and manifest writing can fail the run as a whole.
pub fn publish(ctx: &BuildContext, options: &PublishOptions) -> crate::Result<PublishReport> {
    ctx.validate()?;

    let plan = compute_plan(ctx);
    let dest_dir = ctx.dest_dir();
    fs::create_dir_all(&dest_dir)?;

    let profile = BoardProfile::new(&ctx.board);
    let display_name = options
        .display_name
        .clone()
        .unwrap_or_else(|| ctx.default_display_name());
    let mut manifest = Manifest::new(&display_name, &ctx.env_name, profile.chip_family());

    let mut copied = Vec::new();
    let mut skipped = plan.missing.clone();

    for copy in &plan.copies {
        let dest = dest_dir.join(&copy.file_name);
        match fs::copy(&copy.source, &dest) {
            Ok(_) => {
                info!("Copied {} -> {}", copy.source.display(), dest.display());
                manifest.add_part(&copy.file_name, copy.offset);
                copied.push(copy.file_name.clone());
            }
            Err(e) => {
                warn!(
                    "Failed to copy {} -> {}: {}",
                    copy.source.display(),
                    dest.display(),
                    e
                );
                skipped.push(copy.file_name.clone());
            }
        }
    }

    let manifest_path = dest_dir.join(MANIFEST_FILE_NAME);
    manifest.write_to(&manifest_path)?;
    info!("Wrote manifest {}", manifest_path.display());

    Ok(PublishReport {
        dest_dir,
        copied,
        skipped,
        manifest_path,
    })
}
