//! Host platform detection and flatc executable resolution.
//!
//! flatc binaries are vendored per OS:
//!
//! ```text
//! <flatc_dir>/Windows/flatc.exe
//! <flatc_dir>/Linux/flatc
//! <flatc_dir>/MacOs/flatc
//! ```

use crate::error::GenerateError;
use std::fmt;
use std::path::{Path, PathBuf};

/// Operating systems we ship a flatc binary for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Linux,
    MacOs,
}

impl Platform {
    /// Parses an OS identifier.
    ///
    /// Accepts both Rust target names (`windows`, `linux`, `macos`) and
    /// `uname`-style names (`Windows`, `Linux`, `Darwin`), case-insensitively.
    pub fn from_os_name(name: &str) -> Result<Self, GenerateError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "windows" => Ok(Platform::Windows),
            "linux" => Ok(Platform::Linux),
            "macos" | "darwin" => Ok(Platform::MacOs),
            _ => Err(GenerateError::UnsupportedPlatform(name.to_string())),
        }
    }

    /// Subdirectory of the flatc directory holding this platform's binary.
    pub fn subdir(self) -> &'static str {
        match self {
            Platform::Windows => "Windows",
            Platform::Linux => "Linux",
            Platform::MacOs => "MacOs",
        }
    }

    pub fn exe_suffix(self) -> &'static str {
        match self {
            Platform::Windows => ".exe",
            Platform::Linux | Platform::MacOs => "",
        }
    }

    /// Path the flatc binary is expected at. Does not touch the filesystem.
    pub fn executable_path(self, flatc_dir: &Path, flatc_name: &str) -> PathBuf {
        flatc_dir
            .join(self.subdir())
            .join(format!("{}{}", flatc_name, self.exe_suffix()))
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.subdir())
    }
}

/// Source of the host OS identifier.
pub trait PlatformProbe {
    fn os_name(&self) -> String;

    fn detect(&self) -> Result<Platform, GenerateError> {
        Platform::from_os_name(&self.os_name())
    }
}

/// Reports the OS this binary was compiled for.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostPlatform;

impl PlatformProbe for HostPlatform {
    fn os_name(&self) -> String {
        std::env::consts::OS.to_string()
    }
}

/// Reports a fixed identifier, e.g. from `--platform`.
#[derive(Debug, Clone)]
pub struct FixedPlatform(pub String);

impl PlatformProbe for FixedPlatform {
    fn os_name(&self) -> String {
        self.0.clone()
    }
}

/// Resolves the flatc binary for the probed platform and checks it exists.
pub fn resolve_executable(
    flatc_dir: &Path,
    flatc_name: &str,
    probe: &dyn PlatformProbe,
) -> Result<PathBuf, GenerateError> {
    let platform = probe.detect()?;
    let exe = platform.executable_path(flatc_dir, flatc_name);
    log::debug!("Resolved flatc for {} at {}", platform, exe.display());

    if !exe.is_file() {
        return Err(GenerateError::ExecutableNotFound(exe));
    }
    Ok(exe)
}
