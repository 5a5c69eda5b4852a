//! Platform probing.
//!
//! The descriptor is computed once at process start from ambient facts;
//! every later stage branches on it instead of re-detecting. Unrecognized
//! platforms are an explicit value, not a panic: capability selection in
//! `stages` turns them into a fatal `UnsupportedPlatform` error.

use std::fmt;

/// Operating system family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OsFamily {
    Windows,
    MacOs,
    Linux,
    /// Anything else `std::env::consts::OS` reports (freebsd, ios, ...).
    Other(String),
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OsFamily::Windows => write!(f, "windows"),
            OsFamily::MacOs => write!(f, "macos"),
            OsFamily::Linux => write!(f, "linux"),
            OsFamily::Other(name) => write!(f, "{}", name),
        }
    }
}

/// Immutable platform facts for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformDescriptor {
    pub os: OsFamily,
    pub is_64bit: bool,
}

impl PlatformDescriptor {
    /// Probe the current process environment. Pure and infallible: unknown
    /// platforms come back as `OsFamily::Other`.
    pub fn probe() -> Self {
        Self::from_parts(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Build a descriptor from explicit os/arch names (as reported by
    /// `std::env::consts`).
    pub fn from_parts(os: &str, arch: &str) -> Self {
        let os = match os {
            "windows" => OsFamily::Windows,
            "macos" => OsFamily::MacOs,
            "linux" => OsFamily::Linux,
            other => OsFamily::Other(other.to_string()),
        };
        let is_64bit = matches!(arch, "x86_64" | "aarch64");
        PlatformDescriptor { os, is_64bit }
    }

    pub fn is_windows(&self) -> bool {
        self.os == OsFamily::Windows
    }

    pub fn is_macos(&self) -> bool {
        self.os == OsFamily::MacOs
    }

    pub fn is_linux(&self) -> bool {
        self.os == OsFamily::Linux
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognized_families() {
        assert_eq!(
            PlatformDescriptor::from_parts("windows", "x86_64").os,
            OsFamily::Windows
        );
        assert_eq!(
            PlatformDescriptor::from_parts("macos", "aarch64").os,
            OsFamily::MacOs
        );
        assert_eq!(
            PlatformDescriptor::from_parts("linux", "x86_64").os,
            OsFamily::Linux
        );
    }

    #[test]
    fn test_unrecognized_family_is_explicit() {
        let desc = PlatformDescriptor::from_parts("freebsd", "x86_64");
        assert_eq!(desc.os, OsFamily::Other("freebsd".to_string()));
        assert_eq!(desc.os.to_string(), "freebsd");
    }

    #[test]
    fn test_word_width() {
        assert!(PlatformDescriptor::from_parts("linux", "x86_64").is_64bit);
        assert!(PlatformDescriptor::from_parts("macos", "aarch64").is_64bit);
        assert!(!PlatformDescriptor::from_parts("linux", "x86").is_64bit);
        assert!(!PlatformDescriptor::from_parts("linux", "arm").is_64bit);
    }

    #[test]
    fn test_probe_matches_consts() {
        let desc = PlatformDescriptor::probe();
        let expected = PlatformDescriptor::from_parts(std::env::consts::OS, std::env::consts::ARCH);
        assert_eq!(desc, expected);
    }
}
