//! Note and Collection Wire Types
//!
//! The Fastidious API stores plain notes and collections in one item table,
//! distinguished by a `type` tag. A single `Note` struct covers both shapes:
//! collection-only members (`childCount`, `displayFields`, the sort spec) are
//! optional and omitted from serialized notes.
//!
//! # Examples
//!
//! ```rust
//! use fastidious_mcp_core::models::{Note, NoteType};
//! use serde_json::json;
//!
//! let note: Note = serde_json::from_value(json!({
//!     "id": "n1",
//!     "type": "text",
//!     "title": "Shopping",
//!     "content": "- milk\n- eggs"
//! }))
//! .unwrap();
//! assert_eq!(note.kind, NoteType::Text);
//! assert!(!note.is_collection());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Item type tag distinguishing plain notes from collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteType {
    /// Plain Markdown note
    Text,
    /// Hierarchical container for notes and other collections
    Collection,
}

/// View mode for a collection's item listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Grid,
    List,
}

/// Sort direction for a collection's sort specification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Allowed type of a custom field defined on a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Checkbox,
    Select,
}

/// One choice of a `select`-typed custom field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectOption {
    pub id: String,
    pub value: String,
    /// Optional display color (e.g. a hex string)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Schema entry describing one custom field usable on items in a collection
///
/// Defined when a collection is created or updated; referenced when notes
/// under that collection set custom field values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Options for `select`-typed fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SelectOption>>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A Fastidious item: a plain note or a collection
///
/// Owned by the remote service. Timestamps and the collection-only members
/// are optional so that partial server responses still deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: NoteType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Markdown body (plain notes only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Custom field name -> value, per the parent collection's schema
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<HashMap<String, String>>,

    /// Custom field schema (collections only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_definitions: Option<Vec<FieldDefinition>>,

    /// Parent collection reference; `None` means the item lives at the root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Number of direct children (collections only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_count: Option<u64>,

    /// Field names shown in list views (collections only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_fields: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_mode: Option<ViewMode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<SortDirection>,
}

impl Note {
    /// Whether this item is a collection
    pub fn is_collection(&self) -> bool {
        self.kind == NoteType::Collection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_note_deserializes_minimal_shape() {
        let note: Note = serde_json::from_value(json!({
            "id": "n1",
            "type": "text"
        }))
        .unwrap();

        assert_eq!(note.id, "n1");
        assert_eq!(note.kind, NoteType::Text);
        assert!(note.title.is_none());
        assert!(!note.is_collection());
    }

    #[test]
    fn test_collection_round_trips_view_settings() {
        let collection: Note = serde_json::from_value(json!({
            "id": "c1",
            "type": "collection",
            "title": "Groceries",
            "childCount": 3,
            "displayFields": ["title", "type", "createdAt"],
            "viewMode": "grid",
            "sortField": "createdAt",
            "sortDirection": "desc"
        }))
        .unwrap();

        assert!(collection.is_collection());
        assert_eq!(collection.child_count, Some(3));
        assert_eq!(collection.view_mode, Some(ViewMode::Grid));
        assert_eq!(collection.sort_direction, Some(SortDirection::Desc));

        let value = serde_json::to_value(&collection).unwrap();
        assert_eq!(value["viewMode"], "grid");
        assert_eq!(value["displayFields"], json!(["title", "type", "createdAt"]));
        // Note-only members stay absent on collections
        assert!(value.get("content").is_none());
    }

    #[test]
    fn test_field_definition_select_options() {
        let definition: FieldDefinition = serde_json::from_value(json!({
            "name": "priority",
            "type": "select",
            "required": true,
            "options": [
                {"id": "p1", "value": "High", "color": "#ff0000"},
                {"id": "p2", "value": "Low"}
            ]
        }))
        .unwrap();

        assert_eq!(definition.field_type, FieldType::Select);
        let options = definition.options.unwrap();
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].color.as_deref(), Some("#ff0000"));
        assert!(options[1].color.is_none());
    }

    #[test]
    fn test_unknown_type_tag_is_rejected() {
        let result: Result<Note, _> = serde_json::from_value(json!({
            "id": "n1",
            "type": "reminder"
        }));
        assert!(result.is_err());
    }
}
