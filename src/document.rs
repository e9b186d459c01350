//! The layout document data model.
//!
//! A layout document is the per-page unit a headless CMS delivery API hands
//! back: page metadata plus a map of named placeholders, each holding an
//! ordered list of component instances. Components carry a field map whose
//! values are either typed leaf fields or lists of child records.
//!
//! ## Wire shape
//!
//! ```json
//! {
//!   "name": "home",
//!   "title": "Home",
//!   "navOrder": 10,
//!   "language": "en",
//!   "placeholders": {
//!     "main": [
//!       {
//!         "component": "Promo",
//!         "variant": "Dark",
//!         "params": { "styles": "full-width" },
//!         "fields": {
//!           "Headline": { "type": "text", "value": "Welcome" },
//!           "Body": { "type": "richtext", "value": "<p>Hello.</p>" },
//!           "Cta": { "type": "link", "value": { "href": "/start", "text": "Start" } },
//!           "Items": [ { "id": "…", "name": "…", "displayName": "…", "fields": {} } ]
//!         }
//!       }
//!     ]
//!   }
//! }
//! ```
//!
//! ## Nullability contract
//!
//! The CMS may omit anything: a component's entire `fields` map, a field's
//! payload (`"value": null`), or an image's `src`. Every payload slot here
//! is therefore optional and deserialization never fails on missing data —
//! absence is decided later by [`crate::field::resolve`], not here.
//!
//! A field's tag is fixed at deserialization. Consumers never reinterpret a
//! text field as an image; shape mismatches resolve as absent.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ordered map of field name → field entry.
///
/// `BTreeMap` keeps serialization deterministic; within a record the CMS
/// addresses fields by name, so map ordering is not semantically relevant.
pub type FieldMap = BTreeMap<String, FieldEntry>;

/// Per-instance rendering parameters (style hooks, identifiers).
pub type ParamMap = BTreeMap<String, String>;

/// A value in a record's field map: either a single typed leaf field or a
/// one-to-many relation holding child records. Never a list of fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldEntry {
    /// A typed leaf value.
    Field(Field),
    /// Child records (tree lists, menu items, feature collections).
    Children(Vec<Record>),
}

/// A typed leaf value from the CMS. The tag is fixed at creation; the
/// payload is nullable by source contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Field {
    Text(Option<String>),
    RichText(Option<String>),
    Image(Option<ImageValue>),
    Link(Option<LinkValue>),
    Number(Option<f64>),
    Boolean(Option<bool>),
}

impl From<Field> for FieldEntry {
    fn from(field: Field) -> Self {
        FieldEntry::Field(field)
    }
}

/// Payload of an image field. `src` is required for presence; `alt` may be
/// empty (decorative images).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageValue {
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Payload of a link field. Either a non-empty `href` or a non-empty `text`
/// satisfies presence — the CMS emits text-only links for unresolved
/// internal targets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkValue {
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// A CMS content item: identity plus a field map, some entries of which may
/// hold child records (see [`FieldEntry::Children`]).
///
/// Parent/child structure is expressed only through child-record lists —
/// there is no back-reference, and traversal is strictly top-down (see
/// [`crate::tree::walk`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Opaque stable identifier. Used by the tree walker's cycle guard.
    pub id: String,
    /// Machine key.
    pub name: String,
    /// Human label.
    pub display_name: String,
    /// Resolved link for the item, when the CMS produced one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub fields: FieldMap,
}

impl Record {
    /// Child records under `field`, if that entry exists and holds children.
    pub fn children(&self, field: &str) -> Option<&[Record]> {
        match self.fields.get(field) {
            Some(FieldEntry::Children(items)) => Some(items.as_slice()),
            _ => None,
        }
    }
}

/// The runtime unit of rendering: one component placement in a placeholder.
///
/// Created fresh per page render from the CMS response, immutable for the
/// duration of the pass, discarded after.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentInstance {
    /// Component family name (e.g. `Navigation`, `Promo`).
    pub component: String,
    /// Requested rendering variant; absent means the family default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    /// Style hooks and other string parameters from layout configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<ParamMap>,
    /// Bound content. `None` means the slot is unbound — the fallback
    /// policy decides what renders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldMap>,
}

/// One page-description document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDocument {
    /// URL slug for the page. The document named `index` becomes the site
    /// root page.
    pub name: String,
    /// Page title (`<title>` and nav label).
    pub title: String,
    /// Present = page appears in site navigation, sorted by this value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nav_order: Option<u32>,
    /// BCP 47-ish language code; selects text direction at render time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Named slots → ordered component lists. Source order is significant.
    #[serde(default)]
    pub placeholders: BTreeMap<String, Vec<ComponentInstance>>,
}

impl LayoutDocument {
    /// Total number of component instances across all placeholders.
    pub fn component_count(&self) -> usize {
        self.placeholders.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_deserializes_text() {
        let f: Field = serde_json::from_str(r#"{"type":"text","value":"Hello"}"#).unwrap();
        assert!(matches!(f, Field::Text(Some(ref s)) if s == "Hello"));
    }

    #[test]
    fn field_deserializes_null_payload() {
        let f: Field = serde_json::from_str(r#"{"type":"text","value":null}"#).unwrap();
        assert!(matches!(f, Field::Text(None)));
    }

    #[test]
    fn field_deserializes_richtext() {
        let f: Field =
            serde_json::from_str(r#"{"type":"richtext","value":"<p>Hi</p>"}"#).unwrap();
        assert!(matches!(f, Field::RichText(Some(_))));
    }

    #[test]
    fn field_deserializes_image_with_defaults() {
        let f: Field =
            serde_json::from_str(r#"{"type":"image","value":{"src":"/a.avif"}}"#).unwrap();
        match f {
            Field::Image(Some(img)) => {
                assert_eq!(img.src, "/a.avif");
                assert_eq!(img.alt, "");
                assert_eq!(img.width, None);
            }
            other => panic!("expected image, got {other:?}"),
        }
    }

    #[test]
    fn field_deserializes_link() {
        let f: Field = serde_json::from_str(
            r#"{"type":"link","value":{"href":"/x","text":"Go","target":"_blank"}}"#,
        )
        .unwrap();
        match f {
            Field::Link(Some(link)) => {
                assert_eq!(link.href, "/x");
                assert_eq!(link.target.as_deref(), Some("_blank"));
            }
            other => panic!("expected link, got {other:?}"),
        }
    }

    #[test]
    fn field_entry_distinguishes_children_from_field() {
        let json = r#"{
            "Headline": {"type":"text","value":"T"},
            "Items": [{"id":"1","name":"a","displayName":"A","fields":{}}]
        }"#;
        let map: FieldMap = serde_json::from_str(json).unwrap();
        assert!(matches!(map.get("Headline"), Some(FieldEntry::Field(_))));
        assert!(matches!(
            map.get("Items"),
            Some(FieldEntry::Children(items)) if items.len() == 1
        ));
    }

    #[test]
    fn record_children_accessor() {
        let json = r#"{
            "id":"root","name":"menu","displayName":"Menu",
            "fields":{"Items":[
                {"id":"1","name":"a","displayName":"A","fields":{}},
                {"id":"2","name":"b","displayName":"B","fields":{}}
            ]}
        }"#;
        let rec: Record = serde_json::from_str(json).unwrap();
        let children = rec.children("Items").unwrap();
        assert_eq!(children.len(), 2);
        // Source order preserved
        assert_eq!(children[0].name, "a");
        assert_eq!(children[1].name, "b");
    }

    #[test]
    fn record_children_returns_none_for_leaf_field() {
        let json = r#"{
            "id":"r","name":"r","displayName":"R",
            "fields":{"Headline":{"type":"text","value":"T"}}
        }"#;
        let rec: Record = serde_json::from_str(json).unwrap();
        assert!(rec.children("Headline").is_none());
        assert!(rec.children("Missing").is_none());
    }

    #[test]
    fn instance_with_everything_absent() {
        let inst: ComponentInstance =
            serde_json::from_str(r#"{"component":"Promo"}"#).unwrap();
        assert!(inst.fields.is_none());
        assert!(inst.params.is_none());
        assert!(inst.variant.is_none());
    }

    #[test]
    fn document_component_count() {
        let json = r#"{
            "name":"home","title":"Home",
            "placeholders":{
                "header":[{"component":"Navigation"}],
                "main":[{"component":"Promo"},{"component":"RichTextBlock"}]
            }
        }"#;
        let doc: LayoutDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.component_count(), 3);
    }

    #[test]
    fn document_roundtrips() {
        let json = r#"{
            "name":"home","title":"Home","navOrder":10,"language":"en",
            "placeholders":{"main":[{"component":"Promo","variant":"Dark"}]}
        }"#;
        let doc: LayoutDocument = serde_json::from_str(json).unwrap();
        let out = serde_json::to_string(&doc).unwrap();
        let back: LayoutDocument = serde_json::from_str(&out).unwrap();
        assert_eq!(back.nav_order, Some(10));
        assert_eq!(back.placeholders["main"][0].variant.as_deref(), Some("Dark"));
    }
}
