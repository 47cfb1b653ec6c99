//! Platform resolution and release artifact naming
//!
//! Every OS/architecture decision in the crate goes through [`Platform`].
//! The names produced here are the on-disk and on-release layout, so they
//! must stay stable: the dumper locates the cached binary by them.

use crate::error::{PgDumpError, PgDumpResult};
use std::fmt;

/// Base name of the wrapped executable
pub const BINARY_STEM: &str = "pg_dump";

/// Operating system family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
    Linux,
    Darwin,
    Windows,
}

impl Os {
    /// Parse an OS identifier (Rust `std::env::consts::OS` or canonical name)
    fn parse(s: &str) -> Option<Self> {
        match s {
            "linux" => Some(Self::Linux),
            "macos" | "darwin" => Some(Self::Darwin),
            "windows" | "win32" => Some(Self::Windows),
            _ => None,
        }
    }

    /// Label used in release artifact names
    pub fn release_label(&self) -> &'static str {
        match self {
            Self::Linux => "ubuntu",
            Self::Darwin => "macos",
            Self::Windows => "windows",
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Linux => "linux",
            Self::Darwin => "darwin",
            Self::Windows => "windows",
        };
        write!(f, "{}", name)
    }
}

/// CPU architecture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    X64,
    Arm64,
}

impl Arch {
    /// Parse an architecture identifier (Rust `std::env::consts::ARCH` or canonical name)
    fn parse(s: &str) -> Option<Self> {
        match s {
            "x86_64" | "x64" | "amd64" => Some(Self::X64),
            "aarch64" | "arm64" => Some(Self::Arm64),
            _ => None,
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::X64 => "x64",
            Self::Arm64 => "arm64",
        };
        write!(f, "{}", name)
    }
}

/// Archive format of a release artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    Zip,
    TarGz,
}

impl ArchiveKind {
    /// File extension, without the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::TarGz => "tar.gz",
        }
    }
}

/// A supported OS/architecture pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform {
    os: Os,
    arch: Arch,
}

impl Platform {
    /// Every platform a release is published for
    pub const SUPPORTED: [Platform; 5] = [
        Platform { os: Os::Linux, arch: Arch::X64 },
        Platform { os: Os::Linux, arch: Arch::Arm64 },
        Platform { os: Os::Darwin, arch: Arch::X64 },
        Platform { os: Os::Darwin, arch: Arch::Arm64 },
        Platform { os: Os::Windows, arch: Arch::X64 },
    ];

    /// Resolve the platform of the running host
    pub fn resolve() -> PgDumpResult<Self> {
        Self::from_parts(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Map raw OS/arch identifiers onto a supported platform
    pub fn from_parts(os: &str, arch: &str) -> PgDumpResult<Self> {
        let unsupported = || PgDumpError::UnsupportedPlatform {
            os: os.to_string(),
            arch: arch.to_string(),
            supported: Self::supported_list(),
        };

        let platform = Platform {
            os: Os::parse(os).ok_or_else(unsupported)?,
            arch: Arch::parse(arch).ok_or_else(unsupported)?,
        };

        if Self::SUPPORTED.contains(&platform) {
            Ok(platform)
        } else {
            Err(unsupported())
        }
    }

    /// Comma-separated list of supported platforms, for error messages
    pub fn supported_list() -> String {
        Self::SUPPORTED
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn os(&self) -> Os {
        self.os
    }

    pub fn arch(&self) -> Arch {
        self.arch
    }

    pub fn is_windows(&self) -> bool {
        self.os == Os::Windows
    }

    /// Executable file name inside the cache entry (`pg_dump` / `pg_dump.exe`)
    pub fn binary_name(&self) -> String {
        if self.is_windows() {
            format!("{}.exe", BINARY_STEM)
        } else {
            BINARY_STEM.to_string()
        }
    }

    /// Cache entry folder name, e.g. `pg_dump-ubuntu-x64`
    pub fn binary_folder_name(&self) -> String {
        format!("{}-{}-{}", BINARY_STEM, self.os.release_label(), self.arch)
    }

    pub fn archive_kind(&self) -> ArchiveKind {
        if self.is_windows() {
            ArchiveKind::Zip
        } else {
            ArchiveKind::TarGz
        }
    }

    /// Release artifact file name, e.g. `pg_dump-ubuntu-x64.tar.gz`
    pub fn archive_name(&self) -> String {
        format!(
            "{}.{}",
            self.binary_folder_name(),
            self.archive_kind().extension()
        )
    }

    /// Download URL of this platform's artifact for a release version
    pub fn download_url(&self, release_base: &str, version: &str) -> String {
        format!(
            "{}/v{}/{}",
            release_base.trim_end_matches('/'),
            version,
            self.archive_name()
        )
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os, self.arch)
    }
}
