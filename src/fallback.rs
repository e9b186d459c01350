//! Empty-state policy.
//!
//! A component slot may be unbound: no fields and no params. Production
//! pages must still render something sensible — never a crash, never a raw
//! error. What that something is differs by component family:
//!
//! - most families show an **empty hint**, a labeled placeholder telling a
//!   content editor the slot exists but has no data bound;
//! - hero-style families show a **static fallback**, stock copy that keeps
//!   an unbound page looking composed for end users.
//!
//! The source material drifted per author between the two. Here the policy
//! is an explicit per-family declaration passed to [`decide`] — nothing is
//! inferred, and no family silently inherits a global choice.

use crate::document::{FieldMap, ParamMap};

/// What an unbound slot renders for a given family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyStatePolicy {
    /// Labeled editor-facing placeholder.
    Hint,
    /// Stock content standing in for real data.
    Static,
}

/// Outcome of the per-instance render decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Real data (or at least params) is bound; render it.
    Populated,
    /// Nothing bound; render the editor hint.
    EmptyHint,
    /// Nothing bound; render the family's stock content.
    StaticFallback,
}

impl RenderMode {
    /// Short label for CLI display.
    pub fn label(self) -> &'static str {
        match self {
            RenderMode::Populated => "populated",
            RenderMode::EmptyHint => "empty hint",
            RenderMode::StaticFallback => "static fallback",
        }
    }
}

/// Decide how a component instance renders.
///
/// `Populated` whenever fields OR params are present — params alone can
/// carry enough (style hooks, identifiers) for a meaningful render, which
/// matches the pervasive source guard. Pure decision, no side effects.
pub fn decide(
    fields: Option<&FieldMap>,
    params: Option<&ParamMap>,
    policy: EmptyStatePolicy,
) -> RenderMode {
    if fields.is_some() || params.is_some() {
        return RenderMode::Populated;
    }
    match policy {
        EmptyStatePolicy::Hint => RenderMode::EmptyHint,
        EmptyStatePolicy::Static => RenderMode::StaticFallback,
    }
}
