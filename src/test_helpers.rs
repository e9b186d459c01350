//! Shared builders for unit and integration tests.
//!
//! Hand-writing the wire structures in every test buries the interesting
//! part under construction noise; these builders keep test bodies about
//! the behavior under test. Only compiled for tests.

use crate::document::{
    ComponentInstance, Field, FieldEntry, FieldMap, ImageValue, LayoutDocument, LinkValue,
    ParamMap, Record,
};
use std::fs;
use std::path::Path;

// ============================================================================
// Field builders
// ============================================================================

pub fn field_map(pairs: &[(&str, FieldEntry)]) -> FieldMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

pub fn text_field(value: &str) -> FieldEntry {
    Field::Text(Some(value.to_string())).into()
}

pub fn rich_text_field(value: &str) -> FieldEntry {
    Field::RichText(Some(value.to_string())).into()
}

pub fn image_field(src: &str, alt: &str) -> FieldEntry {
    Field::Image(Some(ImageValue {
        src: src.to_string(),
        alt: alt.to_string(),
        width: None,
        height: None,
    }))
    .into()
}

pub fn link_field(href: &str, text: &str) -> FieldEntry {
    Field::Link(Some(LinkValue {
        href: href.to_string(),
        text: text.to_string(),
        target: None,
    }))
    .into()
}

pub fn number_field(value: f64) -> FieldEntry {
    Field::Number(Some(value)).into()
}

pub fn boolean_field(value: bool) -> FieldEntry {
    Field::Boolean(Some(value)).into()
}

pub fn children_entry(records: Vec<Record>) -> FieldEntry {
    FieldEntry::Children(records)
}

pub fn param_map(pairs: &[(&str, &str)]) -> ParamMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// ============================================================================
// Record builders
// ============================================================================

/// A bare record with no fields; `name` doubles as the display name.
pub fn record(id: &str, name: &str) -> Record {
    Record {
        id: id.to_string(),
        name: name.to_string(),
        display_name: name.to_string(),
        url: None,
        fields: FieldMap::new(),
    }
}

pub fn record_with_fields(id: &str, name: &str, fields: FieldMap) -> Record {
    Record {
        fields,
        ..record(id, name)
    }
}

pub fn record_with_children(id: &str, name: &str, field: &str, children: Vec<Record>) -> Record {
    let mut rec = record(id, name);
    rec.fields
        .insert(field.to_string(), children_entry(children));
    rec
}

/// A record carrying a resolved URL, as menu items do.
pub fn linked_record(id: &str, name: &str, url: &str) -> Record {
    Record {
        url: Some(url.to_string()),
        ..record(id, name)
    }
}

// ============================================================================
// Instance and document builders
// ============================================================================

/// A component instance with nothing bound.
pub fn instance(component: &str) -> ComponentInstance {
    ComponentInstance {
        component: component.to_string(),
        variant: None,
        params: None,
        fields: None,
    }
}

pub fn instance_with(
    component: &str,
    variant: Option<&str>,
    params: Option<ParamMap>,
    fields: Option<FieldMap>,
) -> ComponentInstance {
    ComponentInstance {
        component: component.to_string(),
        variant: variant.map(str::to_string),
        params,
        fields,
    }
}

pub fn document_with(
    name: &str,
    title: &str,
    nav_order: Option<u32>,
    language: Option<&str>,
    placeholders: &[(&str, Vec<ComponentInstance>)],
) -> LayoutDocument {
    LayoutDocument {
        name: name.to_string(),
        title: title.to_string(),
        nav_order,
        language: language.map(str::to_string),
        placeholders: placeholders
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect(),
    }
}

// ============================================================================
// On-disk fixtures
// ============================================================================

/// Write a layout document JSON file into a content directory.
pub fn write_document(dir: &Path, slug: &str, json: &str) {
    fs::create_dir_all(dir).expect("create content dir");
    fs::write(dir.join(format!("{slug}.json")), json).expect("write document");
}

/// Minimal valid document JSON for pipeline tests.
pub fn minimal_document_json(slug: &str, title: &str, nav_order: Option<u32>) -> String {
    let nav = match nav_order {
        Some(n) => format!(r#""navOrder":{n},"#),
        None => String::new(),
    };
    format!(
        r#"{{
  "name": "{slug}",
  "title": "{title}",
  {nav}
  "placeholders": {{
    "main": [
      {{
        "component": "RichTextBlock",
        "fields": {{ "Body": {{ "type": "richtext", "value": "<p>{title} body</p>" }} }}
      }}
    ]
  }}
}}"#
    )
}
