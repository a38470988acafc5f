//! Descriptor materialization: outer metadata, inner metadata, and the POM.
//!
//! The text itself comes from a [`Renderer`]; this module picks the template
//! variant, supplies XML-escaped fields, and reads each result back to make
//! sure it is well-formed and names the right coordinates.

use quick_xml::escape::escape;

use stevedore_core::coordinates::PublishCoordinates;
use stevedore_core::template::{DescriptorKind, Renderer, TemplateContext};
use stevedore_util::errors::StevedoreError;

use crate::layout::RemoteLayout;
use crate::metadata;

/// The three rendered descriptors for one publish.
#[derive(Debug, Clone)]
pub struct Descriptors {
    pub outer: String,
    pub inner: String,
    pub pom: String,
    /// Release or snapshot variant used for `inner`.
    pub inner_kind: DescriptorKind,
}

/// Template fields for one set of coordinates, XML-escaped.
pub fn template_context(coords: &PublishCoordinates) -> TemplateContext {
    let mut ctx = TemplateContext::new();
    let mut set = |key: &str, value: &str| ctx.set(key, escape(value).into_owned());

    set("groupId", &coords.group_id);
    set("artifactId", &coords.artifact_id);
    set("version", coords.version.as_str());
    set("baseVersion", coords.version.base());
    set("packaging", &coords.packaging);
    set("classifier", coords.classifier.as_deref().unwrap_or_default());
    set("lastUpdated", &coords.build_time.last_updated());
    set("timestamp", &coords.build_time.snapshot_timestamp());
    set("buildNumber", coords.build_number.as_deref().unwrap_or_default());

    let classifier_element = match coords.classifier.as_deref() {
        Some(c) => format!("<classifier>{}</classifier>\n        ", escape(c)),
        None => String::new(),
    };
    ctx.set("classifierElement", classifier_element);
    ctx
}

/// Renders descriptors through a caller-supplied [`Renderer`].
pub struct Materializer<'r, R: Renderer> {
    renderer: &'r R,
}

impl<'r, R: Renderer> Materializer<'r, R> {
    pub fn new(renderer: &'r R) -> Self {
        Self { renderer }
    }

    pub fn render(&self, kind: DescriptorKind, ctx: &TemplateContext) -> String {
        self.renderer.render(kind.template(), ctx)
    }

    /// Render and check all three descriptors.
    pub fn materialize(&self, coords: &PublishCoordinates) -> Result<Descriptors, StevedoreError> {
        let ctx = template_context(coords);
        let inner_kind = DescriptorKind::inner_for(&coords.version);

        let descriptors = Descriptors {
            outer: self.render(DescriptorKind::OuterMetadata, &ctx),
            inner: self.render(inner_kind, &ctx),
            pom: self.render(DescriptorKind::Pom, &ctx),
            inner_kind,
        };
        verify(&descriptors, coords)?;
        tracing::debug!(
            "Rendered descriptors for {} ({:?})",
            coords.display_coordinate(),
            inner_kind
        );
        Ok(descriptors)
    }
}

fn verify(d: &Descriptors, coords: &PublishCoordinates) -> Result<(), StevedoreError> {
    let version = coords.version.as_str();

    let outer = metadata::parse_metadata(&d.outer)?;
    expect("outer metadata groupId", outer.group_id.as_deref(), &coords.group_id)?;
    expect("outer metadata artifactId", outer.artifact_id.as_deref(), &coords.artifact_id)?;
    expect("outer metadata latest", outer.latest.as_deref(), version)?;
    expect("outer metadata release", outer.release.as_deref(), version)?;
    if !outer.versions.iter().any(|v| v == version) {
        return Err(StevedoreError::Template {
            message: format!("outer metadata does not list version '{version}'"),
        });
    }

    let inner = metadata::parse_version_metadata(&d.inner)?;
    expect("inner metadata groupId", inner.group_id.as_deref(), &coords.group_id)?;
    expect("inner metadata version", inner.version.as_deref(), version)?;
    if d.inner_kind == DescriptorKind::InnerMetadataSnapshot {
        // The snapshot block must name the same file the layout uploads to.
        let pom_name = RemoteLayout::for_coordinates(coords).pom_name;
        let base = inner.snapshot_base(&coords.artifact_id);
        expect("snapshot file name", base.as_deref(), &pom_name)?;
    }

    let pom = metadata::parse_pom_header(&d.pom)?;
    expect("POM artifactId", pom.artifact_id.as_deref(), &coords.artifact_id)?;
    expect("POM version", pom.version.as_deref(), coords.version.as_str())?;
    Ok(())
}

fn expect(what: &str, actual: Option<&str>, wanted: &str) -> Result<(), StevedoreError> {
    match actual {
        Some(a) if a == wanted => Ok(()),
        other => Err(StevedoreError::Template {
            message: format!(
                "{what} renders as '{}', expected '{wanted}'",
                other.unwrap_or("<missing>")
            ),
        }),
    }
}
