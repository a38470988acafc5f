//! Embedded descriptor templates and delimiter-based rendering.
//!
//! The four descriptor templates are compiled into the binary via
//! `include_str!`. Placeholders look like `{{field}}` by default; the
//! delimiters are configurable per renderer so that templates for formats
//! that use `{{` themselves can pick something else.

use std::collections::BTreeMap;

use crate::coordinates::Version;

/// Which descriptor a template produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptorKind {
    /// Artifact-level `maven-metadata.xml` listing versions.
    OuterMetadata,
    /// Version-level metadata for a release.
    InnerMetadataRelease,
    /// Version-level metadata resolving the latest snapshot build.
    InnerMetadataSnapshot,
    /// The POM.
    Pom,
}

impl DescriptorKind {
    /// Inner metadata uses the snapshot variant iff the version is a snapshot.
    pub fn inner_for(version: &Version) -> Self {
        if version.is_snapshot() {
            Self::InnerMetadataSnapshot
        } else {
            Self::InnerMetadataRelease
        }
    }

    /// The embedded template text.
    pub fn template(self) -> &'static str {
        match self {
            Self::OuterMetadata => include_str!("../templates/project-metadata.xml"),
            Self::InnerMetadataRelease => include_str!("../templates/latest-metadata.xml"),
            Self::InnerMetadataSnapshot => {
                include_str!("../templates/latest-snapshot-metadata.xml")
            }
            Self::Pom => include_str!("../templates/pom.xml"),
        }
    }
}

/// Variables available for interpolation in template content.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    vars: BTreeMap<String, String>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a variable.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }
}

/// Opening and closing placeholder markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    pub open: String,
    pub close: String,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            open: "{{".to_string(),
            close: "}}".to_string(),
        }
    }
}

/// Turns a template and a set of fields into text.
pub trait Renderer {
    fn render(&self, template: &str, ctx: &TemplateContext) -> String;
}

/// Renderer that substitutes `<open> key <close>` placeholders.
#[derive(Debug, Clone, Default)]
pub struct BraceRenderer {
    delimiters: Delimiters,
}

impl BraceRenderer {
    pub fn new(delimiters: Delimiters) -> Self {
        Self { delimiters }
    }
}

impl Renderer for BraceRenderer {
    fn render(&self, template: &str, ctx: &TemplateContext) -> String {
        interpolate(template, ctx, &self.delimiters)
    }
}

/// Replace every placeholder in `input` whose key is known to `ctx`.
///
/// Whitespace around the key is ignored. Unknown keys and unterminated
/// placeholders are left intact.
pub fn interpolate(input: &str, ctx: &TemplateContext, delims: &Delimiters) -> String {
    if delims.open.is_empty() || delims.close.is_empty() {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find(&delims.open) {
        let after_open = &rest[start + delims.open.len()..];
        let Some(end) = after_open.find(&delims.close) else {
            break;
        };
        out.push_str(&rest[..start]);
        let key = after_open[..end].trim();
        match ctx.get(key) {
            Some(value) => out.push_str(value),
            None => {
                let placeholder_len = delims.open.len() + end + delims.close.len();
                out.push_str(&rest[start..start + placeholder_len]);
            }
        }
        rest = &after_open[end + delims.close.len()..];
    }

    out.push_str(rest);
    out
}
