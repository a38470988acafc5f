//! maven-metadata.xml and POM reading, used to check rendered descriptors
//! before they are staged.

use quick_xml::events::Event;
use quick_xml::Reader;

use stevedore_core::coordinates::Version;
use stevedore_util::errors::StevedoreError;

/// Artifact-level Maven metadata listing available versions.
#[derive(Debug, Clone, Default)]
pub struct MavenMetadata {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub latest: Option<String>,
    pub release: Option<String>,
    pub versions: Vec<String>,
    pub last_updated: Option<String>,
}

/// Version-level metadata; the snapshot block is present only for snapshots.
#[derive(Debug, Clone, Default)]
pub struct VersionMetadata {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub timestamp: Option<String>,
    pub build_number: Option<String>,
    pub last_updated: Option<String>,
}

impl VersionMetadata {
    /// Timestamped snapshot base name, e.g. `my-lib-1.0-20240101.120000-5`.
    ///
    /// `None` for release metadata or a snapshot block missing its fields.
    pub fn snapshot_base(&self, artifact_id: &str) -> Option<String> {
        let version = Version::new(self.version.as_deref()?);
        if !version.is_snapshot() {
            return None;
        }
        let ts = self.timestamp.as_deref()?;
        let bn = self.build_number.as_deref()?;
        Some(format!("{artifact_id}-{}-{ts}-{bn}", version.base()))
    }
}

/// Coordinates read back from a POM.
#[derive(Debug, Clone, Default)]
pub struct PomHeader {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub packaging: Option<String>,
}

/// Walk every element of `xml`, handing `visit` the `a>b>c` path and text of
/// each closed element.
///
/// Fails on malformed XML, including elements left open at end of input.
fn walk(xml: &str, what: &str, mut visit: impl FnMut(&str, &str)) -> Result<(), StevedoreError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut path: Vec<String> = Vec::new();
    let mut text_buf = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                path.push(String::from_utf8_lossy(e.name().as_ref()).to_string());
                text_buf.clear();
            }
            Ok(Event::Text(ref e)) => {
                text_buf = e.unescape().unwrap_or_default().to_string();
            }
            Ok(Event::End(_)) => {
                visit(&path.join(">"), &text_buf);
                path.pop();
                text_buf.clear();
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(StevedoreError::Template {
                    message: format!("Failed to parse {what}: {e}"),
                });
            }
            _ => {}
        }
    }

    if let Some(open) = path.last() {
        return Err(StevedoreError::Template {
            message: format!("Failed to parse {what}: element <{open}> is never closed"),
        });
    }
    Ok(())
}

/// Parse an artifact-level `maven-metadata.xml` that lists available versions.
pub fn parse_metadata(xml: &str) -> Result<MavenMetadata, StevedoreError> {
    let mut meta = MavenMetadata::default();
    walk(xml, "maven-metadata.xml", |ctx, text| match ctx {
        "metadata>groupId" => meta.group_id = Some(text.to_string()),
        "metadata>artifactId" => meta.artifact_id = Some(text.to_string()),
        "metadata>versioning>latest" => meta.latest = Some(text.to_string()),
        "metadata>versioning>release" => meta.release = Some(text.to_string()),
        "metadata>versioning>versions>version" => meta.versions.push(text.to_string()),
        "metadata>versioning>lastUpdated" => meta.last_updated = Some(text.to_string()),
        _ => {}
    })?;
    Ok(meta)
}

/// Parse a version-level `maven-metadata.xml`.
pub fn parse_version_metadata(xml: &str) -> Result<VersionMetadata, StevedoreError> {
    let mut meta = VersionMetadata::default();
    walk(xml, "version metadata", |ctx, text| match ctx {
        "metadata>groupId" => meta.group_id = Some(text.to_string()),
        "metadata>artifactId" => meta.artifact_id = Some(text.to_string()),
        "metadata>version" => meta.version = Some(text.to_string()),
        "metadata>versioning>snapshot>timestamp" => meta.timestamp = Some(text.to_string()),
        "metadata>versioning>snapshot>buildNumber" => {
            meta.build_number = Some(text.to_string());
        }
        "metadata>versioning>lastUpdated" => meta.last_updated = Some(text.to_string()),
        _ => {}
    })?;
    Ok(meta)
}

/// Parse the coordinate elements of a POM.
pub fn parse_pom_header(xml: &str) -> Result<PomHeader, StevedoreError> {
    let mut pom = PomHeader::default();
    walk(xml, "pom.xml", |ctx, text| match ctx {
        "project>groupId" => pom.group_id = Some(text.to_string()),
        "project>artifactId" => pom.artifact_id = Some(text.to_string()),
        "project>version" => pom.version = Some(text.to_string()),
        "project>packaging" => pom.packaging = Some(text.to_string()),
        _ => {}
    })?;
    Ok(pom)
}
