//! Firmware version format checks.
//!
//! Devices report their firmware as a Semantic Versioning 2.0.0 string
//! (`MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]`). Anything else is rejected at
//! intake before the reading reaches alert evaluation.
//! [`FirmwareVersion::parse`] is the single entry point for both checks.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Field name reported in firmware validation errors.
pub const FIRMWARE_VERSION_FIELD: &str = "FirmwareVersion";

/// Message reported when the firmware string is not a semantic version.
pub const FIRMWARE_FORMAT_MESSAGE: &str =
    "The firmware value does not match semantic versioning format.";

/// SemVer 2.0.0 grammar, anchored at both ends.
///
/// Uses `[0-9]` rather than `\d` because the regex crate's `\d` matches all
/// Unicode decimal digits.
pub const SEMVER_PATTERN: &str = concat!(
    r"^(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)",
    r"(?:-((?:0|[1-9][0-9]*|[0-9]*[a-zA-Z-][0-9a-zA-Z-]*)",
    r"(?:\.(?:0|[1-9][0-9]*|[0-9]*[a-zA-Z-][0-9a-zA-Z-]*))*))?",
    r"(?:\+([0-9a-zA-Z-]+(?:\.[0-9a-zA-Z-]+)*))?$",
);

static SEMVER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SEMVER_PATTERN).expect("valid regex"));

// ---------------------------------------------------------------------------
// Parsed form
// ---------------------------------------------------------------------------

/// Structured components of a semantic version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirmwareVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    /// Pre-release identifiers, without the leading `-`.
    pub pre_release: Option<String>,
    /// Build metadata, without the leading `+`.
    pub build: Option<String>,
}

impl FirmwareVersion {
    /// Parse a semantic version string into its components.
    ///
    /// A grammar mismatch is [`CoreError::InvalidField`] keyed by
    /// [`FIRMWARE_VERSION_FIELD`]. A string that matches the grammar but has a
    /// numeric component too large for `u64` is [`CoreError::Validation`].
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        let caps = SEMVER_RE.captures(value).ok_or_else(|| CoreError::InvalidField {
            field: FIRMWARE_VERSION_FIELD,
            message: FIRMWARE_FORMAT_MESSAGE.to_string(),
        })?;

        let number = |idx: usize, name: &str| -> Result<u64, CoreError> {
            caps[idx].parse().map_err(|_| {
                CoreError::Validation(format!(
                    "Firmware {name} component is too large: {}",
                    &caps[idx]
                ))
            })
        };

        Ok(Self {
            major: number(1, "major")?,
            minor: number(2, "minor")?,
            patch: number(3, "patch")?,
            pre_release: caps.get(4).map(|m| m.as_str().to_string()),
            build: caps.get(5).map(|m| m.as_str().to_string()),
        })
    }

    /// Whether this is a pre-release version.
    pub fn is_pre_release(&self) -> bool {
        self.pre_release.is_some()
    }
}

impl fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.pre_release {
            write!(f, "-{pre}")?;
        }
        if let Some(build) = &self.build {
            write!(f, "+{build}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
