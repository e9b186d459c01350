//! CLI output formatting for both pipeline stages.
//!
//! Output is **information-centric, not file-centric**: the primary line
//! for every entity (page, component) is its semantic identity — title,
//! positional index, render mode — with filesystem paths shown as
//! secondary context via indented `Source:` lines.
//!
//! ## Scan
//!
//! ```text
//! Pages
//! 001 Home (3 components)
//!     Source: content/index.json
//!     header
//!         Navigation — populated
//!             Home
//!             Products
//!                 Widgets
//!     main
//!         Promo [Dark] — populated
//!         RichTextBlock — empty hint
//!
//! Navigation
//! 001 Home → /
//! 002 About → /about/
//!
//! Warnings
//!     about: unknown component family 'Bogus' in placeholder 'main'
//! ```
//!
//! ## Generate
//!
//! ```text
//! Home → index.html
//! About → about/index.html
//!
//! Generated 2 pages
//! ```
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::document::LayoutDocument;
use crate::fallback;
use crate::generate::GenerateReport;
use crate::render;
use crate::scan::Manifest;
use crate::tree;
use std::collections::BTreeMap;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Entity header: positional index + title, with optional component count.
fn entity_header(index: usize, title: &str, components: Option<usize>) -> String {
    match components {
        Some(n) => format!("{} {} ({} components)", format_index(index), title, n),
        None => format!("{} {}", format_index(index), title),
    }
}

/// One component instance line: family, variant when requested, render mode.
fn instance_line(instance: &crate::document::ComponentInstance) -> String {
    let mode = fallback::decide(
        instance.fields.as_ref(),
        instance.params.as_ref(),
        render::family_policy(&instance.component),
    );
    match &instance.variant {
        Some(v) => format!("{} [{}] — {}", instance.component, v, mode.label()),
        None => format!("{} — {}", instance.component, mode.label()),
    }
}

/// Indented display of an instance's child-record trees, one line per
/// visited record. Same walk the renderers use, so what the CLI shows is
/// what the HTML will contain.
fn record_tree_lines(instance: &crate::document::ComponentInstance) -> Vec<String> {
    let Some(fields) = &instance.fields else {
        return Vec::new();
    };
    let mut lines = Vec::new();
    for (key, entry) in fields {
        let crate::document::FieldEntry::Children(roots) = entry else {
            continue;
        };
        for root in roots {
            for visit in tree::walk(root, key).visits {
                lines.push(format!(
                    "{}{}",
                    indent(3 + visit.depth),
                    visit.record.display_name
                ));
            }
        }
    }
    lines
}

/// Href a slug publishes at, for display.
fn page_target(slug: &str) -> String {
    if slug == "index" {
        "index.html".to_string()
    } else {
        format!("{slug}/index.html")
    }
}

// ============================================================================
// Scan output
// ============================================================================

/// Format the scan stage summary. `docs` maps slug → loaded document for
/// the component breakdown; pages without a loaded document show only
/// their header line.
pub fn format_scan_output(
    manifest: &Manifest,
    docs: &BTreeMap<String, LayoutDocument>,
) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Pages".to_string());
    for (pos, page) in manifest.pages.iter().enumerate() {
        lines.push(entity_header(pos + 1, &page.title, Some(page.components)));
        lines.push(format!("{}Source: {}", indent(1), page.source_path));
        if let Some(doc) = docs.get(&page.slug) {
            for (placeholder, instances) in &doc.placeholders {
                lines.push(format!("{}{}", indent(1), placeholder));
                for instance in instances {
                    lines.push(format!("{}{}", indent(2), instance_line(instance)));
                    lines.extend(record_tree_lines(instance));
                }
            }
        }
    }

    if !manifest.navigation.is_empty() {
        lines.push(String::new());
        lines.push("Navigation".to_string());
        for (pos, link) in manifest.navigation.iter().enumerate() {
            lines.push(format!(
                "{} {} → {}",
                format_index(pos + 1),
                link.title,
                link.href()
            ));
        }
    }

    lines.extend(format_warnings(&manifest.warnings));
    lines
}

// ============================================================================
// Generate output
// ============================================================================

/// Format the generate stage summary: one line per page, then totals.
pub fn format_generate_output(manifest: &Manifest, report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();
    for page in &manifest.pages {
        lines.push(format!("{} → {}", page.title, page_target(&page.slug)));
    }
    lines.push(String::new());
    let noun = if report.pages_written == 1 {
        "page"
    } else {
        "pages"
    };
    lines.push(format!("Generated {} {}", report.pages_written, noun));
    lines.extend(format_warnings(&report.warnings));
    lines
}

/// Warnings block, empty when there are none.
fn format_warnings(warnings: &[String]) -> Vec<String> {
    if warnings.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![String::new(), "Warnings".to_string()];
    lines.extend(warnings.iter().map(|w| format!("{}{}", indent(1), w)));
    lines
}

// ============================================================================
// Print wrappers
// ============================================================================

pub fn print_scan_output(manifest: &Manifest, docs: &BTreeMap<String, LayoutDocument>) {
    for line in format_scan_output(manifest, docs) {
        println!("{line}");
    }
}

pub fn print_generate_output(manifest: &Manifest, report: &GenerateReport) {
    for line in format_generate_output(manifest, report) {
        println!("{line}");
    }
}
