//! Flash offset policy for ESP32-family boards
//!
//! The classic ESP32 boots from 0x1000 and needs the `boot_app0.bin` stub
//! for OTA partition selection. The newer RISC-V and S3 parts (C3, S3, C6,
//! H2) boot from 0x0 and manage the OTA selector themselves.

use std::fmt;

/// Bootloader offset on classic ESP32 parts
pub const BOOTLOADER_OFFSET_CLASSIC: u32 = 0x1000;
/// Bootloader offset on C3/S3/C6/H2 parts
pub const BOOTLOADER_OFFSET_NEWER: u32 = 0x0;
/// Partition table offset, identical across the family
pub const PARTITION_TABLE_OFFSET: u32 = 0x8000;
/// OTA boot selector stub offset (classic parts only)
pub const BOOT_APP0_OFFSET: u32 = 0xe000;
/// Application image offset, identical across the family
pub const APP_OFFSET: u32 = 0x10000;

/// Board identifier substrings that mark a newer chip variant
const NEWER_CHIP_MARKERS: [&str; 4] = ["c3", "s3", "c6", "h2"];

/// Offset policy derived from a board identifier string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardProfile {
    board: String,
}

impl BoardProfile {
    /// Create a profile for a board identifier (e.g. `esp32dev`,
    /// `esp32-c3-devkitm-1`)
    pub fn new(board: impl Into<String>) -> Self {
        Self {
            board: board.into(),
        }
    }

    /// The raw board identifier
    pub fn board(&self) -> &str {
        &self.board
    }

    /// Whether the board carries one of the newer chip variants
    /// (bootloader at 0x0, no boot_app0 stub)
    pub fn is_newer_chip(&self) -> bool {
        let board = self.board.to_lowercase();
        NEWER_CHIP_MARKERS.iter().any(|m| board.contains(m))
    }

    /// Flash offset of the second-stage bootloader
    pub fn bootloader_offset(&self) -> u32 {
        if self.is_newer_chip() {
            BOOTLOADER_OFFSET_NEWER
        } else {
            BOOTLOADER_OFFSET_CLASSIC
        }
    }

    /// Whether the OTA boot selector stub belongs in the flash image
    pub fn uses_boot_app0(&self) -> bool {
        !self.is_newer_chip()
    }

    /// Chip-family label for the manifest
    ///
    /// Classic parts report plain `ESP32`; for newer variants the board
    /// string itself is cleaned up (uppercased, separator runs collapsed
    /// to `-`, everything else dropped) as a best effort.
    pub fn chip_family(&self) -> String {
        if !self.is_newer_chip() {
            return "ESP32".to_string();
        }

        let mut label = String::with_capacity(self.board.len());
        for c in self.board.chars() {
            if c.is_ascii_alphanumeric() {
                label.push(c.to_ascii_uppercase());
            } else if !label.is_empty() && !label.ends_with('-') {
                label.push('-');
            }
        }
        while label.ends_with('-') {
            label.pop();
        }
        label
    }

    /// Flash offset for a known artifact filename, or `None` when the
    /// artifact does not belong on this board
    pub fn offset_for(&self, file_name: &str) -> Option<u32> {
        match file_name {
            "bootloader.bin" => Some(self.bootloader_offset()),
            "partitions.bin" => Some(PARTITION_TABLE_OFFSET),
            "boot_app0.bin" => self.uses_boot_app0().then_some(BOOT_APP0_OFFSET),
            "firmware.bin" => Some(APP_OFFSET),
            _ => None,
        }
    }
}

impl fmt::Display for BoardProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.board, self.chip_family())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_board_offsets() {
        let profile = BoardProfile::new("esp32dev");
        assert!(!profile.is_newer_chip());
        assert_eq!(profile.bootloader_offset(), 0x1000);
        assert_eq!(profile.offset_for("partitions.bin"), Some(0x8000));
        assert_eq!(profile.offset_for("boot_app0.bin"), Some(0xe000));
        assert_eq!(profile.offset_for("firmware.bin"), Some(0x10000));
        assert_eq!(profile.chip_family(), "ESP32");
    }

    #[test]
    fn test_newer_chip_detection() {
        for board in ["esp32-c3-devkitm-1", "esp32s3box", "esp32-c6-devkitc-1", "esp32-h2-devkitm-1"] {
            let profile = BoardProfile::new(board);
            assert!(profile.is_newer_chip(), "{board} should be a newer chip");
            assert_eq!(profile.bootloader_offset(), 0x0);
            assert_eq!(profile.offset_for("boot_app0.bin"), None);
        }
    }

    #[test]
    fn test_newer_chip_detection_case_insensitive() {
        let profile = BoardProfile::new("ESP32-S3-DevKitC");
        assert!(profile.is_newer_chip());
    }

    #[test]
    fn test_chip_family_cleaning() {
        let profile = BoardProfile::new("esp32-c3-devkitm-1");
        assert_eq!(profile.chip_family(), "ESP32-C3-DEVKITM-1");

        let profile = BoardProfile::new("esp32_s3_box");
        assert_eq!(profile.chip_family(), "ESP32-S3-BOX");
    }

    #[test]
    fn test_unknown_artifact_has_no_offset() {
        let profile = BoardProfile::new("esp32dev");
        assert_eq!(profile.offset_for("spiffs.bin"), None);
    }
}
