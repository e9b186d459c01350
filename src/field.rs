//! Typed field resolution with explicit absence.
//!
//! The CMS omits data freely: whole field maps, individual keys, payloads.
//! Rather than optional-chaining through that at every call site, renderers
//! go through [`resolve`]: ask for a key with an expected shape, get back
//! either a typed borrowed value or `None`. Absence is an ordinary outcome
//! here, never an error, and it never surfaces past this module — callers
//! branch on the `Option` and fall through to their empty-state behavior.
//!
//! ## Presence rules
//!
//! - Container absent, key missing, payload null → absent.
//! - Text/rich text: absent when the string is empty after trimming.
//! - Image: requires a non-empty `src`; `alt` may be empty.
//! - Link: a non-empty `href` OR a non-empty display `text` satisfies
//!   presence (the CMS emits text-only links for unresolved targets).
//! - Items: absent when the child list is empty.
//! - A shape mismatch (text field requested as image) is absent, not an
//!   error — no coercion between shapes.

use crate::document::{FieldEntry, FieldMap, ImageValue, LinkValue, Record};

/// Expected shape tag for a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Text,
    RichText,
    Image,
    Link,
    Number,
    Boolean,
    /// A one-to-many relation: list of child records.
    Items,
}

/// A present, typed field value borrowed from the field map.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved<'a> {
    /// Trimmed plain text.
    Text(&'a str),
    /// Pre-sanitized HTML, by source contract.
    RichText(&'a str),
    Image(&'a ImageValue),
    Link(&'a LinkValue),
    Number(f64),
    Boolean(bool),
    Items(&'a [Record]),
}

impl<'a> Resolved<'a> {
    /// The text payload, for `Text`/`RichText` values.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Resolved::Text(s) | Resolved::RichText(s) => Some(s),
            _ => None,
        }
    }
}

/// Resolve `key` from a possibly-absent field map against an expected shape.
///
/// Pure read; returns `None` for every absence case listed in the module
/// docs. Convenience wrappers below give shaped access without a match.
pub fn resolve<'a>(fields: Option<&'a FieldMap>, key: &str, shape: Shape) -> Option<Resolved<'a>> {
    use crate::document::Field;

    let entry = fields?.get(key)?;

    match (entry, shape) {
        (FieldEntry::Field(Field::Text(value)), Shape::Text) => {
            non_empty(value.as_deref()).map(Resolved::Text)
        }
        (FieldEntry::Field(Field::RichText(value)), Shape::RichText) => {
            non_empty(value.as_deref()).map(Resolved::RichText)
        }
        (FieldEntry::Field(Field::Image(value)), Shape::Image) => value
            .as_ref()
            .filter(|img| !img.src.trim().is_empty())
            .map(Resolved::Image),
        (FieldEntry::Field(Field::Link(value)), Shape::Link) => value
            .as_ref()
            .filter(|link| !link.href.trim().is_empty() || !link.text.trim().is_empty())
            .map(Resolved::Link),
        (FieldEntry::Field(Field::Number(value)), Shape::Number) => value.map(Resolved::Number),
        (FieldEntry::Field(Field::Boolean(value)), Shape::Boolean) => {
            value.map(Resolved::Boolean)
        }
        (FieldEntry::Children(items), Shape::Items) => {
            if items.is_empty() {
                None
            } else {
                Some(Resolved::Items(items))
            }
        }
        // Shape mismatch: absent, by design of the source contract.
        _ => None,
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Resolve a text field to its trimmed string.
pub fn text<'a>(fields: Option<&'a FieldMap>, key: &str) -> Option<&'a str> {
    match resolve(fields, key, Shape::Text)? {
        Resolved::Text(s) => Some(s),
        _ => None,
    }
}

/// Resolve a rich text field to its HTML payload.
pub fn rich_text<'a>(fields: Option<&'a FieldMap>, key: &str) -> Option<&'a str> {
    match resolve(fields, key, Shape::RichText)? {
        Resolved::RichText(s) => Some(s),
        _ => None,
    }
}

/// Resolve an image field.
pub fn image<'a>(fields: Option<&'a FieldMap>, key: &str) -> Option<&'a ImageValue> {
    match resolve(fields, key, Shape::Image)? {
        Resolved::Image(img) => Some(img),
        _ => None,
    }
}

/// Resolve a link field.
pub fn link<'a>(fields: Option<&'a FieldMap>, key: &str) -> Option<&'a LinkValue> {
    match resolve(fields, key, Shape::Link)? {
        Resolved::Link(l) => Some(l),
        _ => None,
    }
}

/// Resolve a child-record list.
pub fn items<'a>(fields: Option<&'a FieldMap>, key: &str) -> Option<&'a [Record]> {
    match resolve(fields, key, Shape::Items)? {
        Resolved::Items(records) => Some(records),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    // =========================================================================
    // Absence cases
    // =========================================================================

    #[test]
    fn absent_container_resolves_absent() {
        assert_eq!(resolve(None, "Headline", Shape::Text), None);
    }

    #[test]
    fn missing_key_resolves_absent() {
        let fields = field_map(&[("Headline", text_field("Hi"))]);
        assert_eq!(resolve(Some(&fields), "Body", Shape::Text), None);
    }

    #[test]
    fn null_payload_resolves_absent_for_every_shape() {
        let fields = field_map(&[
            ("T", crate::document::Field::Text(None).into()),
            ("R", crate::document::Field::RichText(None).into()),
            ("I", crate::document::Field::Image(None).into()),
            ("L", crate::document::Field::Link(None).into()),
            ("N", crate::document::Field::Number(None).into()),
            ("B", crate::document::Field::Boolean(None).into()),
        ]);
        assert_eq!(resolve(Some(&fields), "T", Shape::Text), None);
        assert_eq!(resolve(Some(&fields), "R", Shape::RichText), None);
        assert_eq!(resolve(Some(&fields), "I", Shape::Image), None);
        assert_eq!(resolve(Some(&fields), "L", Shape::Link), None);
        assert_eq!(resolve(Some(&fields), "N", Shape::Number), None);
        assert_eq!(resolve(Some(&fields), "B", Shape::Boolean), None);
    }

    #[test]
    fn empty_string_resolves_absent() {
        let fields = field_map(&[("Headline", text_field(""))]);
        assert_eq!(resolve(Some(&fields), "Headline", Shape::Text), None);
    }

    #[test]
    fn whitespace_only_resolves_absent() {
        let fields = field_map(&[("Headline", text_field("  \n\t "))]);
        assert_eq!(resolve(Some(&fields), "Headline", Shape::Text), None);
    }

    #[test]
    fn empty_child_list_resolves_absent() {
        let fields = field_map(&[("Items", children_entry(vec![]))]);
        assert_eq!(resolve(Some(&fields), "Items", Shape::Items), None);
    }

    // =========================================================================
    // Shape mismatches — absent, never an error
    // =========================================================================

    #[test]
    fn text_requested_as_image_is_absent() {
        let fields = field_map(&[("Headline", text_field("Hi"))]);
        assert_eq!(resolve(Some(&fields), "Headline", Shape::Image), None);
    }

    #[test]
    fn children_requested_as_text_is_absent() {
        let fields = field_map(&[("Items", children_entry(vec![record("1", "a")]))]);
        assert_eq!(resolve(Some(&fields), "Items", Shape::Text), None);
    }

    #[test]
    fn field_requested_as_items_is_absent() {
        let fields = field_map(&[("Headline", text_field("Hi"))]);
        assert_eq!(resolve(Some(&fields), "Headline", Shape::Items), None);
    }

    // =========================================================================
    // Presence rules
    // =========================================================================

    #[test]
    fn text_resolves_trimmed() {
        let fields = field_map(&[("Headline", text_field("  Padded  "))]);
        assert_eq!(text(Some(&fields), "Headline"), Some("Padded"));
    }

    #[test]
    fn rich_text_resolves() {
        let fields = field_map(&[("Body", rich_text_field("<p>Hi</p>"))]);
        assert_eq!(rich_text(Some(&fields), "Body"), Some("<p>Hi</p>"));
    }

    #[test]
    fn image_requires_src() {
        let fields = field_map(&[("Logo", image_field("", "Logo"))]);
        assert_eq!(image(Some(&fields), "Logo"), None);
    }

    #[test]
    fn image_permits_empty_alt() {
        let fields = field_map(&[("Logo", image_field("/logo.avif", ""))]);
        let img = image(Some(&fields), "Logo").unwrap();
        assert_eq!(img.src, "/logo.avif");
        assert_eq!(img.alt, "");
    }

    #[test]
    fn link_with_text_only_is_present() {
        // href empty, text set — the OR satisfies presence.
        let fields = field_map(&[("Cta", link_field("", "Click"))]);
        let l = link(Some(&fields), "Cta").unwrap();
        assert_eq!(l.text, "Click");
        assert_eq!(l.href, "");
    }

    #[test]
    fn link_with_href_only_is_present() {
        let fields = field_map(&[("Cta", link_field("/go", ""))]);
        assert!(link(Some(&fields), "Cta").is_some());
    }

    #[test]
    fn link_with_neither_is_absent() {
        let fields = field_map(&[("Cta", link_field("", ""))]);
        assert_eq!(link(Some(&fields), "Cta"), None);
    }

    #[test]
    fn number_and_boolean_resolve() {
        let fields = field_map(&[
            ("Count", number_field(3.0)),
            ("Visible", boolean_field(false)),
        ]);
        assert_eq!(
            resolve(Some(&fields), "Count", Shape::Number),
            Some(Resolved::Number(3.0))
        );
        // `false` is a present value, not absence.
        assert_eq!(
            resolve(Some(&fields), "Visible", Shape::Boolean),
            Some(Resolved::Boolean(false))
        );
    }

    #[test]
    fn items_resolve_in_source_order() {
        let fields = field_map(&[(
            "Items",
            children_entry(vec![record("1", "first"), record("2", "second")]),
        )]);
        let records = items(Some(&fields), "Items").unwrap();
        assert_eq!(records[0].name, "first");
        assert_eq!(records[1].name, "second");
    }
}
