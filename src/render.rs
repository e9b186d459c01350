//! HTML page rendering.
//!
//! Turns a [`LayoutDocument`] into a full HTML page with
//! [maud](https://maud.lambda.xyz/) — compile-time templates, type-safe
//! interpolation, XSS-safe escaping by default. `PreEscaped` appears in
//! exactly two places: rich text payloads (pre-sanitized HTML by source
//! contract) and the embedded stylesheet.
//!
//! ## Component families
//!
//! | Family | Content | Variants | Unbound slot |
//! |--------|---------|----------|--------------|
//! | `Navigation` | record tree of links | Default (nested), Flat | hint |
//! | `LinkList` | titled link group | Default (stacked), Inline | hint |
//! | `Promo` | headline, body, image, CTA | Default, Dark, Minimal | static copy |
//! | `FeatureGrid` | heading + feature records | Default (grid), List | hint |
//! | `RichTextBlock` | one HTML body | Default | hint |
//!
//! An unknown family renders as a hint and is reported as a warning — a
//! page with one bad component still publishes.
//!
//! Every family renderer is a composition of the same four operations:
//! field resolution ([`crate::field`]), tree expansion ([`crate::tree`]),
//! variant selection ([`crate::variant`]), and the empty-state decision
//! ([`crate::fallback`]). Rendering never fails on content; all content
//! problems degrade to hints or truncated branches.

use crate::config::SiteConfig;
use crate::document::{ComponentInstance, LayoutDocument, LinkValue, Record};
use crate::fallback::{self, EmptyStatePolicy, RenderMode};
use crate::field;
use crate::tree::{self, Visit};
use crate::variant::VariantRegistry;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Conventional field key for child-record lists on tree-shaped content.
const CHILD_FIELD: &str = "Items";

/// Site-level inputs shared by every page render.
#[derive(Debug)]
pub struct SiteContext<'a> {
    pub config: &'a SiteConfig,
    /// Site navigation entries, already ordered.
    pub nav: &'a [NavLink],
    /// Slug of the page being rendered (marks the current nav item).
    pub current: &'a str,
    /// Full stylesheet to embed (config-generated + base).
    pub css: &'a str,
}

/// One site-navigation entry, derived from documents carrying a nav order.
/// Part of the manifest handed from the scan stage to the generate stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub title: String,
    pub slug: String,
}

impl NavLink {
    /// Href for a page slug: the site root page lives at `/`.
    pub fn href(&self) -> String {
        if self.slug == "index" {
            "/".to_string()
        } else {
            format!("/{}/", self.slug)
        }
    }
}

/// Result of rendering one page.
#[derive(Debug)]
pub struct PageRender {
    pub html: String,
    /// Content problems degraded during rendering (unknown families,
    /// truncated cyclic trees). Never fatal.
    pub warnings: Vec<String>,
}

// ============================================================================
// Variant registries — one per family, built once, immutable
// ============================================================================

/// Rendering strategy for a component family variant: a CSS class hook
/// plus a layout switch where variants differ structurally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantStyle {
    pub class: &'static str,
    pub layout: Layout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Nested lists following tree structure.
    Nested,
    /// Single flat list with depth classes.
    Flat,
    /// Stacked block layout.
    Stacked,
    /// Horizontal inline layout.
    Inline,
    /// Multi-column grid.
    Grid,
    /// Single-column list.
    List,
}

static NAVIGATION_VARIANTS: LazyLock<VariantRegistry<VariantStyle>> = LazyLock::new(|| {
    VariantRegistry::new(VariantStyle {
        class: "menu-nested",
        layout: Layout::Nested,
    })
    .with(
        "Flat",
        VariantStyle {
            class: "menu-flat",
            layout: Layout::Flat,
        },
    )
});

static LINK_LIST_VARIANTS: LazyLock<VariantRegistry<VariantStyle>> = LazyLock::new(|| {
    VariantRegistry::new(VariantStyle {
        class: "links-stacked",
        layout: Layout::Stacked,
    })
    .with(
        "Inline",
        VariantStyle {
            class: "links-inline",
            layout: Layout::Inline,
        },
    )
});

static PROMO_VARIANTS: LazyLock<VariantRegistry<VariantStyle>> = LazyLock::new(|| {
    VariantRegistry::new(VariantStyle {
        class: "promo-default",
        layout: Layout::Stacked,
    })
    .with(
        "Dark",
        VariantStyle {
            class: "promo-dark",
            layout: Layout::Stacked,
        },
    )
    .with(
        "Minimal",
        VariantStyle {
            class: "promo-minimal",
            layout: Layout::Stacked,
        },
    )
});

static FEATURE_GRID_VARIANTS: LazyLock<VariantRegistry<VariantStyle>> = LazyLock::new(|| {
    VariantRegistry::new(VariantStyle {
        class: "features-grid",
        layout: Layout::Grid,
    })
    .with(
        "List",
        VariantStyle {
            class: "features-list",
            layout: Layout::List,
        },
    )
});

/// Known component family names.
pub const FAMILIES: &[&str] = &[
    "Navigation",
    "LinkList",
    "Promo",
    "FeatureGrid",
    "RichTextBlock",
];

/// Whether `family` is a component family this renderer knows.
pub fn is_known_family(family: &str) -> bool {
    FAMILIES.contains(&family)
}

/// Empty-state policy per family. `Promo` keeps an unbound hero looking
/// composed with stock copy; everything else shows the editor hint.
pub fn family_policy(family: &str) -> EmptyStatePolicy {
    match family {
        "Promo" => EmptyStatePolicy::Static,
        _ => EmptyStatePolicy::Hint,
    }
}

// ============================================================================
// Page assembly
// ============================================================================

/// Text direction for a page language. Right-to-left scripts get
/// `dir="rtl"` on the root element; everything else (and no language at
/// all) is left-to-right.
pub fn text_direction(language: Option<&str>) -> &'static str {
    let primary = language
        .unwrap_or("")
        .split(['-', '_'])
        .next()
        .unwrap_or("");
    match primary {
        "ar" | "he" | "fa" | "ur" => "rtl",
        _ => "ltr",
    }
}

/// Render a full page document.
pub fn render_page(doc: &LayoutDocument, ctx: &SiteContext<'_>) -> PageRender {
    let mut warnings = Vec::new();

    let body = html! {
        (site_header(ctx))
        main.page-content {
            @for (placeholder, instances) in &doc.placeholders {
                section.placeholder data-placeholder=(placeholder) {
                    @for instance in instances {
                        (render_component(instance, ctx, &mut warnings))
                    }
                }
            }
        }
    };

    let page_title = format!("{} — {}", doc.title, ctx.config.site.title);
    let dir = text_direction(doc.language.as_deref());
    let markup = base_document(&page_title, doc.language.as_deref(), dir, ctx.css, body);

    PageRender {
        html: markup.into_string(),
        warnings,
    }
}

/// The base HTML document structure.
fn base_document(
    title: &str,
    lang: Option<&str>,
    dir: &str,
    css: &str,
    content: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(lang.unwrap_or("en")) dir=(dir) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body {
                (content)
            }
        }
    }
}

/// Site header with title and top-level navigation.
fn site_header(ctx: &SiteContext<'_>) -> Markup {
    html! {
        header.site-header {
            a.site-title href="/" { (ctx.config.site.title) }
            nav.site-nav {
                ul {
                    @for entry in ctx.nav {
                        @let is_current = entry.slug == ctx.current;
                        li class=[is_current.then_some("current")] {
                            a href=(entry.href()) { (entry.title) }
                        }
                    }
                }
            }
        }
    }
}

/// Render one component instance, degrading unbound or unknown slots.
fn render_component(
    instance: &ComponentInstance,
    ctx: &SiteContext<'_>,
    warnings: &mut Vec<String>,
) -> Markup {
    if !is_known_family(&instance.component) {
        warnings.push(format!("unknown component family: {}", instance.component));
        return empty_hint(&instance.component, ctx);
    }

    let mode = fallback::decide(
        instance.fields.as_ref(),
        instance.params.as_ref(),
        family_policy(&instance.component),
    );

    match mode {
        RenderMode::EmptyHint => empty_hint(&instance.component, ctx),
        RenderMode::StaticFallback => render_promo_static(instance),
        RenderMode::Populated => {
            let markup = match instance.component.as_str() {
                "Navigation" => render_navigation(instance, warnings),
                "LinkList" => render_link_list(instance),
                "Promo" => render_promo(instance),
                "FeatureGrid" => render_feature_grid(instance),
                "RichTextBlock" => render_rich_text_block(instance),
                _ => unreachable!("family checked above"),
            };
            wrap_with_params(instance, markup)
        }
    }
}

/// The editor-facing placeholder for an unbound slot.
fn empty_hint(family: &str, ctx: &SiteContext<'_>) -> Markup {
    html! {
        div.component-empty-hint data-component=(family) {
            span.hint-label { (ctx.config.site.empty_hint) }
            span.hint-component { (family) }
        }
    }
}

/// Apply instance params: `styles` adds CSS classes, `id` an anchor id.
fn wrap_with_params(instance: &ComponentInstance, inner: Markup) -> Markup {
    let styles = instance
        .params
        .as_ref()
        .and_then(|p| p.get("styles"))
        .map(String::as_str)
        .unwrap_or("");
    let anchor = instance.params.as_ref().and_then(|p| p.get("id"));

    if styles.is_empty() && anchor.is_none() {
        return inner;
    }
    html! {
        div class={ "component-wrap " (styles) } id=[anchor] {
            (inner)
        }
    }
}

// ============================================================================
// Component family renderers
// ============================================================================

/// Navigation: a tree of links expanded through the cycle-guarded walk.
fn render_navigation(instance: &ComponentInstance, warnings: &mut Vec<String>) -> Markup {
    let style = NAVIGATION_VARIANTS.select(instance.variant.as_deref());
    let roots = field::items(instance.fields.as_ref(), CHILD_FIELD).unwrap_or(&[]);

    let mut all_visits: Vec<Vec<Visit<'_>>> = Vec::new();
    for root in roots {
        let walk = tree::walk(root, CHILD_FIELD);
        for id in &walk.truncated {
            warnings.push(format!("navigation tree truncated at cyclic record {id}"));
        }
        all_visits.push(walk.visits);
    }

    html! {
        nav class={ "menu " (style.class) } {
            @match style.layout {
                Layout::Flat => {
                    ul {
                        @for visits in &all_visits {
                            @for visit in visits {
                                li class={ "menu-depth-" (visit.depth) } {
                                    (record_link(visit.record))
                                }
                            }
                        }
                    }
                }
                _ => {
                    ul {
                        @for visits in &all_visits {
                            (nested_items(visits, 0))
                        }
                    }
                }
            }
        }
    }
}

/// Rebuild nested `<ul>` structure from a flat pre-order visit list.
///
/// Renders the entries at `depth`; each entry's subtree is the run of
/// deeper visits that follows it.
fn nested_items(visits: &[Visit<'_>], depth: usize) -> Markup {
    html! {
        @for (idx, visit) in visits.iter().enumerate() {
            @if visit.depth == depth {
                @let end = visits[idx + 1..]
                    .iter()
                    .position(|v| v.depth <= depth)
                    .map(|p| idx + 1 + p)
                    .unwrap_or(visits.len());
                @let subtree = &visits[idx + 1..end];
                li {
                    (record_link(visit.record))
                    @if !subtree.is_empty() {
                        ul { (nested_items(subtree, depth + 1)) }
                    }
                }
            }
        }
    }
}

/// A link for a tree record: resolved URL when present, plain label
/// otherwise (group headings without a target page).
fn record_link(record: &Record) -> Markup {
    html! {
        @if let Some(url) = &record.url {
            a href=(url) { (record.display_name) }
        } @else {
            span.menu-label { (record.display_name) }
        }
    }
}

/// LinkList: a titled group of links (footer columns, related pages).
fn render_link_list(instance: &ComponentInstance) -> Markup {
    let style = LINK_LIST_VARIANTS.select(instance.variant.as_deref());
    let fields = instance.fields.as_ref();
    let title = field::text(fields, "Title");
    let records = field::items(fields, CHILD_FIELD).unwrap_or(&[]);

    html! {
        div class={ "link-list " (style.class) } {
            @if let Some(title) = title {
                h2.link-list-title { (title) }
            }
            ul {
                @for record in records {
                    @if let Some(link) = item_link(record) {
                        li { (link_anchor(&link)) }
                    }
                }
            }
        }
    }
}

/// Resolve a list item's link: an explicit `Link` field wins, otherwise
/// the record's own resolved URL and display name. Items with neither are
/// skipped — no presence, no output.
fn item_link(record: &Record) -> Option<LinkValue> {
    if let Some(link) = field::link(Some(&record.fields), "Link") {
        return Some(link.clone());
    }
    let url = record.url.as_deref()?;
    if url.is_empty() && record.display_name.is_empty() {
        return None;
    }
    Some(LinkValue {
        href: url.to_string(),
        text: record.display_name.clone(),
        target: None,
    })
}

/// An anchor for a resolved link payload. Text falls back to the href for
/// text-less links; href-less links render as plain text.
fn link_anchor(link: &LinkValue) -> Markup {
    let label = if link.text.trim().is_empty() {
        link.href.as_str()
    } else {
        link.text.as_str()
    };
    html! {
        @if link.href.is_empty() {
            span.link-unresolved { (label) }
        } @else {
            a href=(link.href) target=[link.target.as_deref()] { (label) }
        }
    }
}

/// Promo: hero block with headline, rich body, image, and CTA.
fn render_promo(instance: &ComponentInstance) -> Markup {
    let style = PROMO_VARIANTS.select(instance.variant.as_deref());
    let fields = instance.fields.as_ref();

    let headline = field::text(fields, "Headline");
    let body = field::rich_text(fields, "Body");
    let image = field::image(fields, "Image");
    let cta = field::link(fields, "Cta");

    html! {
        section class={ "promo " (style.class) } {
            @if let Some(img) = image {
                img.promo-image src=(img.src) alt=(img.alt)
                    width=[img.width] height=[img.height];
            }
            div.promo-copy {
                @if let Some(headline) = headline {
                    h1.promo-headline { (headline) }
                }
                @if let Some(body) = body {
                    div.promo-body { (PreEscaped(body)) }
                }
                @if let Some(cta) = cta {
                    p.promo-cta { (link_anchor(cta)) }
                }
            }
        }
    }
}

/// Stock promo copy for unbound hero slots.
fn render_promo_static(instance: &ComponentInstance) -> Markup {
    let style = PROMO_VARIANTS.select(instance.variant.as_deref());
    html! {
        section class={ "promo promo-static " (style.class) } {
            div.promo-copy {
                h1.promo-headline { "Build something people notice" }
                div.promo-body {
                    p { "Pages assembled from reusable components, published as plain HTML." }
                }
            }
        }
    }
}

/// FeatureGrid: heading plus one card per child record.
fn render_feature_grid(instance: &ComponentInstance) -> Markup {
    let style = FEATURE_GRID_VARIANTS.select(instance.variant.as_deref());
    let fields = instance.fields.as_ref();
    let heading = field::text(fields, "Heading");
    let records = field::items(fields, CHILD_FIELD).unwrap_or(&[]);

    html! {
        section class={ "features " (style.class) } {
            @if let Some(heading) = heading {
                h2.features-heading { (heading) }
            }
            div.features-items {
                @for record in records {
                    (feature_card(record))
                }
            }
        }
    }
}

fn feature_card(record: &Record) -> Markup {
    let fields = Some(&record.fields);
    // Title falls back to the record's display name — feature items are
    // often bare content items with no authored title field.
    let title = field::text(fields, "Title").unwrap_or(&record.display_name);
    let body = field::rich_text(fields, "Body");
    let icon = field::image(fields, "Icon");

    html! {
        article.feature-card {
            @if let Some(icon) = icon {
                img.feature-icon src=(icon.src) alt=(icon.alt);
            }
            h3.feature-title { (title) }
            @if let Some(body) = body {
                div.feature-body { (PreEscaped(body)) }
            }
        }
    }
}

/// RichTextBlock: one pre-sanitized HTML body.
fn render_rich_text_block(instance: &ComponentInstance) -> Markup {
    let body = field::rich_text(instance.fields.as_ref(), "Body");
    html! {
        div.rich-text {
            @if let Some(body) = body {
                (PreEscaped(body))
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
