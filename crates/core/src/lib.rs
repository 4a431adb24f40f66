//! fwpub-core: Core logic for fwpub
//!
//! This crate locates the binary artifacts of a finished ESP32-family build,
//! copies them into a web-accessible destination tree, and writes the
//! `manifest.json` a browser-based flasher consumes.

mod board;
mod context;
mod error;
mod manifest;
mod paths;
mod publish;

pub use board::{
    APP_OFFSET, BOOT_APP0_OFFSET, BOOTLOADER_OFFSET_CLASSIC, BOOTLOADER_OFFSET_NEWER,
    BoardProfile, PARTITION_TABLE_OFFSET,
};
pub use context::BuildContext;
pub use error::PublishError;
pub use manifest::{FirmwarePart, MANIFEST_FILE_NAME, MANIFEST_VERSION, Manifest, ManifestBuild};
pub use paths::expand_path;
pub use publish::{PartCopy, Plan, PublishOptions, PublishReport, compute_plan, publish};

/// Result type for publishing operations
pub type Result<T> = std::result::Result<T, PublishError>;
