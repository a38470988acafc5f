//! Remote path resolution: which keys one publish writes.
//!
//! For `com.example:widget:1.0.0-SNAPSHOT` built at `20240101.120000` as
//! build `7`, the binary lands at
//! `com/example/widget/1.0.0-SNAPSHOT/widget-1.0.0-20240101.120000-7.jar`.

use stevedore_core::coordinates::PublishCoordinates;

/// File name of both artifact-level and version-level metadata.
pub const METADATA_FILE: &str = "maven-metadata.xml";

/// Checksum side-file flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Checksum {
    Md5,
    Sha1,
}

impl Checksum {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
        }
    }
}

/// Which staged file a remote key is filled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileRole {
    OuterMetadata,
    InnerMetadata,
    Pom,
    Artifact,
}

/// A content file or one of its checksum side-files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    pub role: FileRole,
    pub checksum: Option<Checksum>,
}

impl Slot {
    pub fn content(role: FileRole) -> Self {
        Self {
            role,
            checksum: None,
        }
    }

    pub fn checksum(role: FileRole, checksum: Checksum) -> Self {
        Self {
            role,
            checksum: Some(checksum),
        }
    }
}

/// One slot and the remote key it is uploaded to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntry {
    pub slot: Slot,
    pub key: String,
}

/// Directory and file names derived from one set of coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteLayout {
    /// `group/path/artifactId`
    pub artifact_path: String,
    /// `group/path/artifactId/version`, raw version including any `-SNAPSHOT`.
    pub version_path: String,
    /// Base file name shared by the POM, e.g. `widget-1.0.0-20240101.120000-7`.
    pub pom_name: String,
    /// Base file name of the binary: [`Self::pom_name`] plus `-classifier`.
    pub artifact_name: String,
    pub packaging: String,
}

impl RemoteLayout {
    pub fn for_coordinates(coords: &PublishCoordinates) -> Self {
        let artifact_path = format!("{}/{}", group_path(&coords.group_id), coords.artifact_id);
        let version_path = format!("{artifact_path}/{}", coords.version);

        let mut pom_name = format!("{}-{}", coords.artifact_id, coords.version.base());
        if coords.version.is_snapshot() {
            pom_name.push_str(&format!(
                "-{}-{}",
                coords.build_time.snapshot_timestamp(),
                coords.build_number.as_deref().unwrap_or_default()
            ));
        }

        // Classified artifacts share the unclassified POM.
        let artifact_name = match coords.classifier.as_deref() {
            Some(c) => format!("{pom_name}-{c}"),
            None => pom_name.clone(),
        };

        Self {
            artifact_path,
            version_path,
            pom_name,
            artifact_name,
            packaging: coords.packaging.clone(),
        }
    }

    /// Remote key of the artifact-level `maven-metadata.xml`.
    pub fn outer_metadata_key(&self) -> String {
        format!("{}/{METADATA_FILE}", self.artifact_path)
    }

    /// Remote key of the version-level `maven-metadata.xml`.
    pub fn inner_metadata_key(&self) -> String {
        format!("{}/{METADATA_FILE}", self.version_path)
    }

    pub fn pom_key(&self) -> String {
        format!("{}/{}.pom", self.version_path, self.pom_name)
    }

    pub fn artifact_key(&self) -> String {
        format!(
            "{}/{}.{}",
            self.version_path, self.artifact_name, self.packaging
        )
    }
}

/// `com.example.tools` becomes `com/example/tools`.
pub fn group_path(group_id: &str) -> String {
    group_id.replace('.', "/")
}

/// Compute every remote key one publish writes, in upload order.
///
/// Metadata entries are present only when `upload_metadata` is set, and the
/// version-level metadata only for snapshots. The binary and its two
/// checksums are always present. When the binary is itself the POM
/// (`packaging = "pom"`, no classifier) it takes the POM's keys and no
/// generated POM is uploaded.
pub fn resolve(coords: &PublishCoordinates) -> Vec<RemoteEntry> {
    let layout = RemoteLayout::for_coordinates(coords);
    let artifact_key = layout.artifact_key();
    let pom_key = layout.pom_key();
    let mut entries = Vec::with_capacity(12);

    if coords.upload_metadata {
        push_with_checksums(&mut entries, FileRole::OuterMetadata, layout.outer_metadata_key());
        if coords.version.is_snapshot() {
            push_with_checksums(&mut entries, FileRole::InnerMetadata, layout.inner_metadata_key());
        }
        if pom_key != artifact_key {
            push_with_checksums(&mut entries, FileRole::Pom, pom_key);
        }
    }

    push_with_checksums(&mut entries, FileRole::Artifact, artifact_key);
    entries
}

fn push_with_checksums(entries: &mut Vec<RemoteEntry>, role: FileRole, key: String) {
    let sidecars = [Checksum::Sha1, Checksum::Md5].map(|checksum| RemoteEntry {
        slot: Slot::checksum(role, checksum),
        key: format!("{key}.{}", checksum.extension()),
    });
    entries.push(RemoteEntry {
        slot: Slot::content(role),
        key,
    });
    entries.extend(sidecars);
}

#[cfg(test)]
mod tests {
    use super::*;
    use stevedore_core::coordinates::{BuildTime, Version};

    fn coords(version: &str) -> PublishCoordinates {
        PublishCoordinates {
            group_id: "com.example".into(),
            artifact_id: "widget".into(),
            version: Version::new(version),
            classifier: None,
            packaging: "jar".into(),
            build_time: BuildTime::parse("2024-01-01T12:00:00Z").unwrap(),
            build_number: Some("7".into()),
            upload_metadata: true,
        }
    }

    fn key_of(entries: &[RemoteEntry], slot: Slot) -> Option<&str> {
        entries
            .iter()
            .find(|e| e.slot == slot)
            .map(|e| e.key.as_str())
    }

    #[test]
    fn group_path_replaces_dots() {
        assert_eq!(group_path("org.jetbrains.kotlinx"), "org/jetbrains/kotlinx");
    }

    #[test]
    fn release_binary_key() {
        let entries = resolve(&coords("1.0.0"));
        assert_eq!(
            key_of(&entries, Slot::content(FileRole::Artifact)),
            Some("com/example/widget/1.0.0/widget-1.0.0.jar")
        );
        assert!(key_of(&entries, Slot::content(FileRole::InnerMetadata)).is_none());
        assert_eq!(entries.len(), 9);
    }

    #[test]
    fn release_without_metadata_is_binary_only() {
        let mut c = coords("1.0.0");
        c.upload_metadata = false;
        let entries = resolve(&c);
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| e.slot.role == FileRole::Artifact));
    }

    #[test]
    fn pom_packaging_uploads_binary_in_place_of_generated_pom() {
        for version in ["1.0.0", "1.0.0-SNAPSHOT"] {
            let mut c = coords(version);
            c.artifact_id = "parent".into();
            c.packaging = "pom".into();
            let entries = resolve(&c);

            let mut keys: Vec<&str> = entries.iter().map(|e| e.key.as_str()).collect();
            let total = keys.len();
            keys.sort_unstable();
            keys.dedup();
            assert_eq!(keys.len(), total, "{version}: duplicate remote keys");
            assert!(key_of(&entries, Slot::content(FileRole::Pom)).is_none());
            assert!(key_of(&entries, Slot::content(FileRole::Artifact))
                .is_some_and(|k| k.ends_with(".pom")));
        }
    }

    #[test]
    fn classified_pom_packaging_keeps_generated_pom() {
        let mut c = coords("1.0.0");
        c.packaging = "pom".into();
        c.classifier = Some("flattened".into());
        let entries = resolve(&c);
        assert_eq!(
            key_of(&entries, Slot::content(FileRole::Pom)),
            Some("com/example/widget/1.0.0/widget-1.0.0.pom")
        );
        assert_eq!(
            key_of(&entries, Slot::content(FileRole::Artifact)),
            Some("com/example/widget/1.0.0/widget-1.0.0-flattened.pom")
        );
        assert_eq!(entries.len(), 9);
    }

    #[test]
    fn snapshot_binary_key() {
        let entries = resolve(&coords("1.0.0-SNAPSHOT"));
        assert_eq!(
            key_of(&entries, Slot::content(FileRole::Artifact)),
            Some("com/example/widget/1.0.0-SNAPSHOT/widget-1.0.0-20240101.120000-7.jar")
        );
        assert_eq!(
            key_of(&entries, Slot::content(FileRole::InnerMetadata)),
            Some("com/example/widget/1.0.0-SNAPSHOT/maven-metadata.xml")
        );
        assert_eq!(entries.len(), 12);
    }

    #[test]
    fn content_precedes_its_checksums() {
        let entries = resolve(&coords("1.0.0"));
        let keys: Vec<&str> = entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(
            keys,
            [
                "com/example/widget/maven-metadata.xml",
                "com/example/widget/maven-metadata.xml.sha1",
                "com/example/widget/maven-metadata.xml.md5",
                "com/example/widget/1.0.0/widget-1.0.0.pom",
                "com/example/widget/1.0.0/widget-1.0.0.pom.sha1",
                "com/example/widget/1.0.0/widget-1.0.0.pom.md5",
                "com/example/widget/1.0.0/widget-1.0.0.jar",
                "com/example/widget/1.0.0/widget-1.0.0.jar.sha1",
                "com/example/widget/1.0.0/widget-1.0.0.jar.md5",
            ]
        );
    }

    #[test]
    fn classifier_applies_to_binary_only() {
        let mut c = coords("1.0.0-SNAPSHOT");
        c.classifier = Some("sources".into());
        let layout = RemoteLayout::for_coordinates(&c);
        assert_eq!(layout.pom_name, "widget-1.0.0-20240101.120000-7");
        assert_eq!(layout.artifact_name, "widget-1.0.0-20240101.120000-7-sources");
    }

    #[test]
    fn lowercase_snapshot_keeps_suffix_in_names() {
        let layout = RemoteLayout::for_coordinates(&coords("1.0.0-snapshot"));
        assert_eq!(layout.pom_name, "widget-1.0.0-snapshot-20240101.120000-7");
    }
}
