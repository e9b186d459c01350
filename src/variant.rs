//! Variant selection.
//!
//! Each component family offers named rendering variants (`Default`,
//! `Dark`, `Flat`, …). The layout configuration requests one by name; an
//! absent or unknown name is not a failure, it is the default path. The
//! registry is built once per family and immutable afterwards, so lookups
//! cannot fail: construction requires the default strategy up front.

use std::collections::BTreeMap;

/// Name of the strategy every registry is guaranteed to hold.
pub const DEFAULT_VARIANT: &str = "Default";

/// Immutable name → strategy table with a guaranteed `Default` entry.
#[derive(Debug)]
pub struct VariantRegistry<S> {
    strategies: BTreeMap<String, S>,
}

impl<S> VariantRegistry<S> {
    /// Create a registry holding only the `Default` strategy.
    pub fn new(default: S) -> Self {
        let mut strategies = BTreeMap::new();
        strategies.insert(DEFAULT_VARIANT.to_string(), default);
        Self { strategies }
    }

    /// Add a named variant. Builder-style; consumed during construction so
    /// the registry is immutable once in use.
    pub fn with(mut self, name: &str, strategy: S) -> Self {
        self.strategies.insert(name.to_string(), strategy);
        self
    }

    /// Pick the strategy for a requested variant name.
    ///
    /// Exact, case-sensitive match; `None` or an unknown name falls back
    /// to `Default`. Never errors.
    pub fn select(&self, name: Option<&str>) -> &S {
        name.and_then(|n| self.strategies.get(n))
            .unwrap_or_else(|| &self.strategies[DEFAULT_VARIANT])
    }

    /// Registered variant names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.strategies.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> VariantRegistry<&'static str> {
        VariantRegistry::new("default-strategy")
            .with("Dark", "dark-strategy")
            .with("Flat", "flat-strategy")
    }

    #[test]
    fn exact_match_selects_variant() {
        assert_eq!(*registry().select(Some("Dark")), "dark-strategy");
    }

    #[test]
    fn absent_name_selects_default() {
        assert_eq!(*registry().select(None), "default-strategy");
    }

    #[test]
    fn unknown_name_selects_default() {
        assert_eq!(*registry().select(Some("Robinhood")), "default-strategy");
    }

    #[test]
    fn unknown_equals_explicit_default() {
        let reg = registry();
        assert_eq!(
            reg.select(Some("Nonexistent")),
            reg.select(Some(DEFAULT_VARIANT))
        );
        assert_eq!(reg.select(None), reg.select(Some(DEFAULT_VARIANT)));
    }

    #[test]
    fn match_is_case_sensitive() {
        assert_eq!(*registry().select(Some("dark")), "default-strategy");
    }

    #[test]
    fn with_overrides_default_entry() {
        let reg = VariantRegistry::new("old").with(DEFAULT_VARIANT, "new");
        assert_eq!(*reg.select(None), "new");
    }

    #[test]
    fn names_are_sorted() {
        let reg = registry();
        let names: Vec<_> = reg.names().collect();
        assert_eq!(names, vec!["Dark", "Default", "Flat"]);
    }
}
