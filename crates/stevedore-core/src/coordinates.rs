//! Publish coordinates: the group/artifact/version tuple plus everything the
//! remote layout needs to name files for one publish.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use stevedore_util::errors::StevedoreError;

/// Literal suffix stripped from the version when forming remote file names.
pub const SNAPSHOT_SUFFIX: &str = "-SNAPSHOT";

/// A version string with its snapshot classification.
///
/// Classification is case-insensitive (`1.0-snapshot` is a snapshot), while
/// [`Version::base`] strips only the exact, upper-case `-SNAPSHOT` suffix.
/// A version such as `1.0-snapshot` therefore keeps its suffix in remote
/// file names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    raw: String,
    snapshot: bool,
}

impl Version {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let snapshot = raw.to_ascii_uppercase().ends_with("SNAPSHOT");
        Self { raw, snapshot }
    }

    /// The version exactly as supplied, e.g. `1.0.0-SNAPSHOT`.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_snapshot(&self) -> bool {
        self.snapshot
    }

    /// The version with a literal trailing `-SNAPSHOT` removed.
    pub fn base(&self) -> &str {
        self.raw.strip_suffix(SNAPSHOT_SUFFIX).unwrap_or(&self.raw)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// The instant a build is published under.
///
/// Both the metadata `lastUpdated` field and the snapshot file timestamp are
/// rendered from this one instant, in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildTime(DateTime<Utc>);

impl BuildTime {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Parse a build time given as RFC 3339, `YYYY-MM-DD HH:MM:SS`,
    /// `YYYY-MM-DDTHH:MM:SS` (both UTC), or a bare `YYYY-MM-DD`.
    pub fn parse(input: &str) -> Result<Self, StevedoreError> {
        let input = input.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
            return Ok(Self(dt.with_timezone(&Utc)));
        }
        for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(input, fmt) {
                return Ok(Self(naive.and_utc()));
            }
        }
        if let Some(naive) = NaiveDate::parse_from_str(input, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
        {
            return Ok(Self(naive.and_utc()));
        }
        Err(StevedoreError::InvalidOptions {
            message: format!("buildTime '{input}' is not a recognised timestamp"),
        })
    }

    /// Resolve an optional caller-supplied build time, defaulting to now.
    pub fn resolve(input: Option<&str>) -> Result<Self, StevedoreError> {
        match input {
            Some(s) => Self::parse(s),
            None => Ok(Self::now()),
        }
    }

    /// `yyyyMMddHHmmss`, used for `<lastUpdated>`.
    pub fn last_updated(&self) -> String {
        self.0.format("%Y%m%d%H%M%S").to_string()
    }

    /// `yyyyMMdd.HHmmss`, used in timestamped snapshot file names.
    pub fn snapshot_timestamp(&self) -> String {
        self.0.format("%Y%m%d.%H%M%S").to_string()
    }
}

/// Everything the remote layout and the descriptors need for one publish.
#[derive(Debug, Clone)]
pub struct PublishCoordinates {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Version,
    pub classifier: Option<String>,
    pub packaging: String,
    pub build_time: BuildTime,
    /// Only used to name snapshot files.
    pub build_number: Option<String>,
    pub upload_metadata: bool,
}

impl PublishCoordinates {
    /// `group:artifact:version[:classifier]`, for log lines.
    pub fn display_coordinate(&self) -> String {
        match &self.classifier {
            Some(c) => format!(
                "{}:{}:{}:{c}",
                self.group_id, self.artifact_id, self.version
            ),
            None => format!("{}:{}:{}", self.group_id, self.artifact_id, self.version),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_classification_is_case_insensitive() {
        assert!(Version::new("1.0.0-SNAPSHOT").is_snapshot());
        assert!(Version::new("1.0.0-snapshot").is_snapshot());
        assert!(Version::new("1.0SNAPSHOT").is_snapshot());
        assert!(!Version::new("1.0.0").is_snapshot());
        assert!(!Version::new("SNAPSHOT-1").is_snapshot());
    }

    #[test]
    fn base_strips_only_literal_suffix() {
        assert_eq!(Version::new("1.0.0-SNAPSHOT").base(), "1.0.0");
        assert_eq!(Version::new("1.0.0-snapshot").base(), "1.0.0-snapshot");
        assert_eq!(Version::new("1.0.0").base(), "1.0.0");
    }

    #[test]
    fn build_time_renderings_share_one_instant() {
        let t = BuildTime::parse("2024-01-01T12:00:00Z").unwrap();
        assert_eq!(t.last_updated(), "20240101120000");
        assert_eq!(t.snapshot_timestamp(), "20240101.120000");
    }

    #[test]
    fn build_time_accepts_offsets_and_plain_formats() {
        let offset = BuildTime::parse("2024-01-01T14:00:00+02:00").unwrap();
        assert_eq!(offset.snapshot_timestamp(), "20240101.120000");

        let spaced = BuildTime::parse("2024-06-15 14:30:22").unwrap();
        assert_eq!(spaced.last_updated(), "20240615143022");

        let date = BuildTime::parse("2024-06-15").unwrap();
        assert_eq!(date.snapshot_timestamp(), "20240615.000000");
    }

    #[test]
    fn build_time_rejects_garbage() {
        let err = BuildTime::parse("last tuesday").unwrap_err();
        assert!(matches!(err, StevedoreError::InvalidOptions { .. }));
    }

    #[test]
    fn display_coordinate_includes_classifier() {
        let coords = PublishCoordinates {
            group_id: "com.example".into(),
            artifact_id: "widget".into(),
            version: Version::new("1.0.0"),
            classifier: Some("sources".into()),
            packaging: "jar".into(),
            build_time: BuildTime::now(),
            build_number: None,
            upload_metadata: true,
        };
        assert_eq!(coords.display_coordinate(), "com.example:widget:1.0.0:sources");
    }
}
