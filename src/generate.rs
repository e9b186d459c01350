//! Static site generation.
//!
//! Stage 2 of the build pipeline. Takes the manifest produced by the scan
//! stage, reloads each page's layout document, renders it to HTML, and
//! writes the output tree:
//!
//! ```text
//! dist/
//! ├── index.html            # the "index" document
//! ├── about/
//! │   └── index.html        # every other slug gets a directory
//! └── products/
//!     └── index.html
//! ```
//!
//! The stylesheet is embedded into every page: config-derived custom
//! properties (colors, theme dimensions) prepended to the static base
//! sheet compiled into the binary. No external asset requests, pages are
//! self-contained.
//!
//! Page rendering is CPU-bound and independent per page, so pages render
//! on the rayon pool and are written as they complete.

use crate::config;
use crate::render::{self, PageRender, SiteContext};
use crate::scan::{self, Manifest, ScanError};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Base stylesheet, compiled in.
const CSS_STATIC: &str = include_str!("../static/style.css");

/// Outcome of a generate run.
#[derive(Debug)]
pub struct GenerateReport {
    pub pages_written: usize,
    /// Render-time degradations, prefixed with the page slug.
    pub warnings: Vec<String>,
}

/// Render every page in the manifest into `output_dir`.
pub fn generate(manifest: &Manifest, output_dir: &Path) -> Result<GenerateReport, GenerateError> {
    fs::create_dir_all(output_dir)?;
    let css = assemble_css(manifest);

    let rendered: Vec<(String, PageRender)> = manifest
        .pages
        .par_iter()
        .map(|page| {
            let doc = scan::load_document(Path::new(&page.source_path))?;
            let ctx = SiteContext {
                config: &manifest.config,
                nav: &manifest.navigation,
                current: &page.slug,
                css: &css,
            };
            Ok::<_, GenerateError>((page.slug.clone(), render::render_page(&doc, &ctx)))
        })
        .collect::<Result<_, _>>()?;

    let mut warnings = Vec::new();
    for (slug, page) in &rendered {
        let path = page_output_path(output_dir, slug);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &page.html)?;
        warnings.extend(page.warnings.iter().map(|w| format!("{slug}: {w}")));
    }

    Ok(GenerateReport {
        pages_written: rendered.len(),
        warnings,
    })
}

/// The full stylesheet for this site: config custom properties first so
/// the static sheet can consume them.
fn assemble_css(manifest: &Manifest) -> String {
    let colors = config::generate_color_css(&manifest.config.colors);
    let theme = config::generate_theme_css(&manifest.config.theme);
    format!("{colors}\n{theme}\n{CSS_STATIC}")
}

/// Where a slug's HTML lands. The `index` document is the site root.
fn page_output_path(output_dir: &Path, slug: &str) -> PathBuf {
    if slug == "index" {
        output_dir.join("index.html")
    } else {
        output_dir.join(slug).join("index.html")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn scan_and_generate(root: &TempDir) -> (Manifest, GenerateReport, PathBuf) {
        let manifest = scan::scan(root.path()).unwrap();
        let out = root.path().join("dist");
        let report = generate(&manifest, &out).unwrap();
        (manifest, report, out)
    }

    #[test]
    fn index_document_lands_at_site_root() {
        let root = TempDir::new().unwrap();
        write_document(root.path(), "index", &minimal_document_json("index", "Home", Some(1)));
        write_document(root.path(), "about", &minimal_document_json("about", "About", Some(2)));

        let (_, report, out) = scan_and_generate(&root);
        assert_eq!(report.pages_written, 2);
        assert!(out.join("index.html").is_file());
        assert!(out.join("about/index.html").is_file());
        assert!(!out.join("index/index.html").exists());
    }

    #[test]
    fn pages_embed_content_and_styles() {
        let root = TempDir::new().unwrap();
        write_document(root.path(), "index", &minimal_document_json("index", "Home", Some(1)));

        let (_, _, out) = scan_and_generate(&root);
        let html = std::fs::read_to_string(out.join("index.html")).unwrap();
        assert!(html.contains("<p>Home body</p>"));
        assert!(html.contains("--color-bg"));
        assert!(html.contains("--content-width"));
        // Site nav links back to the root page
        assert!(html.contains(r#"href="/""#));
    }

    #[test]
    fn config_colors_flow_into_pages() {
        let root = TempDir::new().unwrap();
        std::fs::write(
            root.path().join("config.toml"),
            "[colors.light]\nbackground = \"#123456\"\n",
        )
        .unwrap();
        write_document(root.path(), "index", &minimal_document_json("index", "Home", None));

        let (_, _, out) = scan_and_generate(&root);
        let html = std::fs::read_to_string(out.join("index.html")).unwrap();
        assert!(html.contains("#123456"));
    }

    #[test]
    fn render_warnings_carry_page_slug() {
        let root = TempDir::new().unwrap();
        write_document(
            root.path(),
            "index",
            r#"{"name":"index","title":"Home","placeholders":{"main":[{"component":"Bogus"}]}}"#,
        );

        let (_, report, out) = scan_and_generate(&root);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].starts_with("index: "));
        // The page still published, with the hint in place.
        let html = std::fs::read_to_string(out.join("index.html")).unwrap();
        assert!(html.contains("component-empty-hint"));
    }

    #[test]
    fn missing_source_document_fails_generation() {
        let root = TempDir::new().unwrap();
        write_document(root.path(), "index", &minimal_document_json("index", "Home", None));
        let mut manifest = scan::scan(root.path()).unwrap();
        manifest.pages[0].source_path = root
            .path()
            .join("vanished.json")
            .to_string_lossy()
            .into_owned();

        let err = generate(&manifest, &root.path().join("dist")).unwrap_err();
        assert!(matches!(err, GenerateError::Scan(_)));
    }
}
