//! Content scanning and manifest generation.
//!
//! Stage 1 of the build pipeline. Walks a content directory for layout
//! documents, validates them, derives the site navigation, and produces a
//! [`Manifest`] the generate stage consumes.
//!
//! ## Content layout
//!
//! ```text
//! content/                  # Content root
//! ├── config.toml           # Site configuration (optional)
//! ├── index.json            # Site root page (slug "index" → /)
//! ├── about.json             # → /about/
//! └── products/
//!     └── widgets.json       # → /widgets/ (slug comes from the document)
//! ```
//!
//! Subdirectories are organizational only: the page slug is the document's
//! own `name`, not its path. Two documents claiming the same slug is a hard
//! error — last-write-wins output is never acceptable.
//!
//! ## Validation posture
//!
//! Structural problems (unreadable file, malformed JSON, duplicate or
//! invalid slug) fail the scan. Content problems (unknown component
//! families, cyclic record trees) become manifest warnings — an editor
//! typo in one component must not take down the site build.

use crate::config::{self, SiteConfig};
use crate::document::{FieldEntry, LayoutDocument};
use crate::render::{self, NavLink};
use crate::tree;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid page slug {slug:?} in {path}")]
    InvalidSlug { slug: String, path: PathBuf },
    #[error("Duplicate page slug {slug:?}: {first} and {second}")]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
}

/// Manifest output from the scan stage.
#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    /// Site navigation, ordered. Only documents with a nav order appear.
    pub navigation: Vec<NavLink>,
    /// Every discovered page, sorted by slug.
    pub pages: Vec<PageEntry>,
    /// Content problems that degrade rather than fail.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    pub config: SiteConfig,
}

/// One discovered page. Carries the source path so the generate stage can
/// reload the full document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageEntry {
    pub slug: String,
    pub title: String,
    pub source_path: String,
    pub components: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nav_order: Option<u32>,
}

/// Scan a content root into a manifest.
pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    let config = config::load_config(root)?;

    let mut pages: Vec<PageEntry> = Vec::new();
    let mut seen: BTreeMap<String, PathBuf> = BTreeMap::new();
    let mut warnings = Vec::new();

    for path in find_documents(root)? {
        let doc = load_document(&path)?;
        validate_slug(&doc.name, &path)?;

        if let Some(first) = seen.get(&doc.name) {
            return Err(ScanError::DuplicateSlug {
                slug: doc.name.clone(),
                first: first.clone(),
                second: path,
            });
        }
        seen.insert(doc.name.clone(), path.clone());

        warnings.extend(document_warnings(&doc));
        pages.push(PageEntry {
            slug: doc.name.clone(),
            title: doc.title.clone(),
            source_path: path.to_string_lossy().into_owned(),
            components: doc.component_count(),
            language: doc.language.clone(),
            nav_order: doc.nav_order,
        });
    }

    pages.sort_by(|a, b| a.slug.cmp(&b.slug));
    let navigation = build_navigation(&pages);

    Ok(Manifest {
        navigation,
        pages,
        warnings,
        config,
    })
}

/// All `.json` documents under the root, sorted for deterministic output.
/// Hidden files and directories are skipped.
fn find_documents(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut paths = Vec::new();
    // depth 0 is the root itself; its name (possibly a dotted temp dir)
    // must not trip the hidden filter.
    for entry in WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name().to_string_lossy().as_ref()))
    {
        let entry = entry.map_err(|e| ScanError::Io(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|e| e.to_str()) == Some("json") {
            paths.push(entry.path().to_path_buf());
        }
    }
    paths.sort();
    Ok(paths)
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.') && name != "." && name != ".."
}

/// Load and parse one layout document.
pub fn load_document(path: &Path) -> Result<LayoutDocument, ScanError> {
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|source| ScanError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Slugs become URL path segments and output directory names; reject
/// anything that would escape or mangle either.
fn validate_slug(slug: &str, path: &Path) -> Result<(), ScanError> {
    let ok = !slug.is_empty()
        && slug != "."
        && slug != ".."
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if ok {
        Ok(())
    } else {
        Err(ScanError::InvalidSlug {
            slug: slug.to_string(),
            path: path.to_path_buf(),
        })
    }
}

/// Content-level problems in one document: unknown component families and
/// cyclic record trees. Reported, never fatal.
fn document_warnings(doc: &LayoutDocument) -> Vec<String> {
    let mut warnings = Vec::new();
    for (placeholder, instances) in &doc.placeholders {
        for instance in instances {
            if !render::is_known_family(&instance.component) {
                warnings.push(format!(
                    "{}: unknown component family '{}' in placeholder '{}'",
                    doc.name, instance.component, placeholder
                ));
            }
            let Some(fields) = &instance.fields else {
                continue;
            };
            for (key, entry) in fields {
                let FieldEntry::Children(roots) = entry else {
                    continue;
                };
                for root in roots {
                    let walk = tree::walk(root, key);
                    for id in &walk.truncated {
                        warnings.push(format!(
                            "{}: cyclic record '{}' in {} field '{}'",
                            doc.name, id, instance.component, key
                        ));
                    }
                }
            }
        }
    }
    warnings
}

/// Navigation: pages carrying a nav order, sorted by (order, slug).
fn build_navigation(pages: &[PageEntry]) -> Vec<NavLink> {
    let mut in_nav: Vec<&PageEntry> = pages.iter().filter(|p| p.nav_order.is_some()).collect();
    in_nav.sort_by(|a, b| (a.nav_order, &a.slug).cmp(&(b.nav_order, &b.slug)));
    in_nav
        .iter()
        .map(|p| NavLink {
            title: p.title.clone(),
            slug: p.slug.clone(),
        })
        .collect()
}

/// Persist a manifest for the generate stage.
pub fn write_manifest(path: &Path, manifest: &Manifest) -> Result<(), ScanError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(manifest).map_err(|source| ScanError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json)?;
    Ok(())
}

/// Reload a manifest written by [`write_manifest`].
pub fn read_manifest(path: &Path) -> Result<Manifest, ScanError> {
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|source| ScanError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
