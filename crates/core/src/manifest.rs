//! Web-flasher manifest types
//!
//! The emitted `manifest.json` follows the shape browser-based ESP flashers
//! consume: a display name, a version string, and one build entry listing
//! each flashable part with its flash offset.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Fixed manifest format version
pub const MANIFEST_VERSION: &str = "1.0.2";

/// Filename of the emitted manifest
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// One flashable file and its flash offset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirmwarePart {
    /// Filename relative to the manifest
    pub path: String,
    /// Byte address in the target's flash memory map
    pub offset: u32,
}

/// One build entry: chip family plus its parts in copy order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestBuild {
    pub chip_family: String,
    pub parts: Vec<FirmwarePart>,
}

/// The manifest written next to the published binaries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub name: String,
    pub version: String,
    pub builds: Vec<ManifestBuild>,
}

impl Manifest {
    /// Create a manifest with one empty build entry
    ///
    /// `name` becomes `"<display_name> - <env_name>"`.
    pub fn new(display_name: &str, env_name: &str, chip_family: impl Into<String>) -> Self {
        Self {
            name: format!("{} - {}", display_name, env_name),
            version: MANIFEST_VERSION.to_string(),
            builds: vec![ManifestBuild {
                chip_family: chip_family.into(),
                parts: Vec::new(),
            }],
        }
    }

    /// Append a part to the single build entry, preserving copy order
    pub fn add_part(&mut self, file_name: impl Into<String>, offset: u32) {
        self.builds[0].parts.push(FirmwarePart {
            path: file_name.into(),
            offset,
        });
    }

    /// Parts of the single build entry
    pub fn parts(&self) -> &[FirmwarePart] {
        &self.builds[0].parts
    }

    /// Serialize to pretty-printed JSON and write to `path`
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_manifest_name_and_version() {
        let manifest = Manifest::new("weather-station", "esp32dev", "ESP32");
        assert_eq!(manifest.name, "weather-station - esp32dev");
        assert_eq!(manifest.version, "1.0.2");
        assert_eq!(manifest.builds.len(), 1);
        assert!(manifest.parts().is_empty());
    }

    #[test]
    fn test_parts_preserve_order() {
        let mut manifest = Manifest::new("p", "env", "ESP32");
        manifest.add_part("bootloader.bin", 0x1000);
        manifest.add_part("partitions.bin", 0x8000);
        manifest.add_part("firmware.bin", 0x10000);

        let names: Vec<_> = manifest.parts().iter().map(|p| p.path.as_str()).collect();
        assert_eq!(names, ["bootloader.bin", "partitions.bin", "firmware.bin"]);
    }

    #[test]
    fn test_wire_format_field_names() {
        let mut manifest = Manifest::new("p", "env", "ESP32-C3");
        manifest.add_part("firmware.bin", 0x10000);

        let json = serde_json::to_string(&manifest).unwrap();
        assert!(json.contains("\"chipFamily\":\"ESP32-C3\""));
        assert!(json.contains("\"path\":\"firmware.bin\""));
        assert!(json.contains("\"offset\":65536"));
    }

    #[test]
    fn test_write_and_read_back() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(MANIFEST_FILE_NAME);

        let mut manifest = Manifest::new("p", "env", "ESP32");
        manifest.add_part("bootloader.bin", 0x1000);
        manifest.write_to(&path).unwrap();

        let parsed: Manifest =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.name, "p - env");
        assert_eq!(parsed.parts().len(), 1);
        assert_eq!(parsed.parts()[0].offset, 0x1000);
    }
}
