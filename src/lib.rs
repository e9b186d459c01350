//! # Placard
//!
//! A static page renderer for headless-CMS layout documents. Each page is
//! a JSON document — metadata plus named placeholders holding ordered
//! component instances — and Placard renders the lot into a plain HTML
//! site.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! Content flows through two independent stages joined by a JSON manifest:
//!
//! ```text
//! 1. Scan      content/  →  manifest.json    (documents → validated site model)
//! 2. Generate  manifest  →  dist/            (final HTML site)
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Debuggability**: the manifest is human-readable JSON you can inspect.
//! - **Fail-fast validation**: structural content errors surface before any
//!   HTML is written.
//! - **Testability**: rendering is a pure function from document to markup,
//!   so unit tests exercise it without touching the filesystem.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1 — discovers layout documents, validates slugs, derives navigation, produces the manifest |
//! | [`generate`] | Stage 2 — renders every page to HTML with embedded styles |
//! | [`document`] | The wire data model: layout documents, component instances, typed fields, records |
//! | [`field`] | Typed field resolution — absence is an `Option`, never an error |
//! | [`tree`] | Cycle-guarded pre-order traversal of child-record trees |
//! | [`variant`] | Per-family variant registries with a guaranteed `Default` |
//! | [`fallback`] | The empty-state decision: populated, hint, or static fallback |
//! | [`render`] | Maud component-family renderers and page assembly |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`output`] | CLI output formatting — tree-based display of pipeline results |
//!
//! # Design Decisions
//!
//! ## Degradation Over Failure
//!
//! CMS content is authored by editors, not engineers. A missing field, an
//! unknown component family, or a cyclic record tree must never take down
//! a site build: the affected slot renders a visible placeholder (or stock
//! copy), the problem is reported as a warning, and every other component
//! publishes normally. Only structural problems — unreadable files,
//! malformed JSON, duplicate slugs — fail the scan.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system, rather than Handlebars or Tera. Advantages:
//!
//! - **Compile-time checking**: malformed HTML is a build error, not a runtime surprise.
//! - **Type-safe**: template variables are Rust expressions — no stringly-typed lookups.
//! - **XSS-safe by default**: all interpolation is auto-escaped. `PreEscaped`
//!   appears only for rich text payloads and the embedded stylesheet.
//! - **Zero runtime files**: no template directory to ship or get out of sync.
//!
//! ## Self-Contained Pages
//!
//! The stylesheet — config-derived custom properties plus a static base
//! sheet — is embedded into every page. Output pages make no asset
//! requests and can be served from any static host, or opened from disk.

pub mod config;
pub mod document;
pub mod fallback;
pub mod field;
pub mod generate;
pub mod output;
pub mod render;
pub mod scan;
pub mod tree;
pub mod variant;

#[cfg(test)]
pub(crate) mod test_helpers;
