use stevedore_core::coordinates::Version;
use stevedore_core::template::{
    interpolate, BraceRenderer, Delimiters, DescriptorKind, Renderer, TemplateContext,
};

fn ctx() -> TemplateContext {
    let mut ctx = TemplateContext::new();
    ctx.set("groupId", "com.example");
    ctx.set("version", "1.0.0");
    ctx
}

#[test]
fn test_interpolate_replaces_known_vars() {
    let result = interpolate("g={{groupId}} v={{ version }}", &ctx(), &Delimiters::default());
    assert_eq!(result, "g=com.example v=1.0.0");
}

#[test]
fn test_interpolate_unknown_var_left_intact() {
    let result = interpolate("{{unknown_var}}-{{version}}", &ctx(), &Delimiters::default());
    assert_eq!(result, "{{unknown_var}}-1.0.0");
}

#[test]
fn test_interpolate_unterminated_placeholder_left_intact() {
    let result = interpolate("{{version}} {{groupId", &ctx(), &Delimiters::default());
    assert_eq!(result, "1.0.0 {{groupId");
}

#[test]
fn test_interpolate_no_placeholders() {
    let result = interpolate("no placeholders here", &ctx(), &Delimiters::default());
    assert_eq!(result, "no placeholders here");
}

#[test]
fn test_custom_delimiters_leave_braces_alone() {
    let renderer = BraceRenderer::new(Delimiters {
        open: "<%".to_string(),
        close: "%>".to_string(),
    });
    let out = renderer.render("{{groupId}} <% groupId %>", &ctx());
    assert_eq!(out, "{{groupId}} com.example");
}

#[test]
fn test_empty_delimiters_render_verbatim() {
    let delims = Delimiters {
        open: String::new(),
        close: String::new(),
    };
    assert_eq!(interpolate("{{version}}", &ctx(), &delims), "{{version}}");
}

#[test]
fn test_inner_metadata_variant_follows_snapshot() {
    assert_eq!(
        DescriptorKind::inner_for(&Version::new("2.0-SNAPSHOT")),
        DescriptorKind::InnerMetadataSnapshot
    );
    assert_eq!(
        DescriptorKind::inner_for(&Version::new("2.0")),
        DescriptorKind::InnerMetadataRelease
    );
}

#[test]
fn test_embedded_templates_use_default_delimiters() {
    for kind in [
        DescriptorKind::OuterMetadata,
        DescriptorKind::InnerMetadataRelease,
        DescriptorKind::InnerMetadataSnapshot,
        DescriptorKind::Pom,
    ] {
        let text = kind.template();
        assert!(text.starts_with("<?xml"), "{kind:?}");
        assert!(text.contains("{{groupId}}"), "{kind:?}");
        assert!(text.contains("{{artifactId}}"), "{kind:?}");
    }
    assert!(DescriptorKind::InnerMetadataSnapshot
        .template()
        .contains("{{buildNumber}}"));
}
