//! Build context handed over by the external build tool

use crate::error::PublishError;
use crate::paths::expand_path;
use std::path::PathBuf;

/// Framework package that ships the OTA boot selector stub
const ARDUINO_FRAMEWORK_PACKAGE: &str = "framework-arduinoespressif32";

/// Inputs describing one completed build, as supplied by the build tool
///
/// Constructed once per invocation and read-only afterwards.
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// Build environment name (e.g. `esp32dev`); selects the destination
    /// subdirectory
    pub env_name: String,
    /// Board identifier the firmware was built for
    pub board: String,
    /// Directory the build tool wrote its artifacts into
    pub build_dir: PathBuf,
    /// Project root; the destination tree is created under it
    pub project_dir: PathBuf,
    /// Root of the installed framework packages, used for the
    /// `boot_app0.bin` fallback lookup. `None` means the default
    /// PlatformIO location.
    pub packages_dir: Option<PathBuf>,
}

impl BuildContext {
    /// Create a context for one build invocation
    pub fn new(
        env_name: impl Into<String>,
        board: impl Into<String>,
        build_dir: impl Into<PathBuf>,
        project_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            env_name: env_name.into(),
            board: board.into(),
            build_dir: build_dir.into(),
            project_dir: project_dir.into(),
            packages_dir: None,
        }
    }

    /// Override the framework package root
    pub fn with_packages_dir(mut self, packages_dir: impl Into<PathBuf>) -> Self {
        self.packages_dir = Some(packages_dir.into());
        self
    }

    /// Check that the build output directory exists
    pub fn validate(&self) -> Result<(), PublishError> {
        if !self.build_dir.is_dir() {
            return Err(PublishError::BuildDirMissing(
                self.build_dir.display().to_string(),
            ));
        }
        Ok(())
    }

    /// Expected source path of an artifact inside the build directory
    pub fn artifact_path(&self, file_name: &str) -> PathBuf {
        self.build_dir.join(file_name)
    }

    /// Destination directory for published files:
    /// `<project_dir>/docs/firmware/<env_name>/`
    pub fn dest_dir(&self) -> PathBuf {
        self.project_dir
            .join("docs")
            .join("firmware")
            .join(&self.env_name)
    }

    /// Root of the installed framework packages
    ///
    /// Falls back to the standard PlatformIO location under the user's
    /// home directory when no override was given.
    pub fn packages_root(&self) -> PathBuf {
        match &self.packages_dir {
            Some(dir) => expand_path(dir),
            None => expand_path("~/.platformio/packages"),
        }
    }

    /// Fallback location of `boot_app0.bin` inside the Arduino framework
    /// package, for builds that do not copy it into the build directory
    pub fn boot_app0_fallback(&self) -> PathBuf {
        self.packages_root()
            .join(ARDUINO_FRAMEWORK_PACKAGE)
            .join("tools")
            .join("partitions")
            .join("boot_app0.bin")
    }

    /// Display name used in the manifest when the caller supplies none:
    /// the project directory's file name
    pub fn default_display_name(&self) -> String {
        self.project_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "firmware".to_string())
    }
}
