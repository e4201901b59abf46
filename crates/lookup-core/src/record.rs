use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::LookupConfig;

/// Identity field every record carries.
pub const ID_FIELD: &str = "Id";
/// Fallback label field.
pub const NAME_FIELD: &str = "Name";
/// Field the record-type filter matches against.
pub const RECORD_TYPE_FIELD: &str = "RecordType";

/// A raw record as returned by a search source: field name → value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(pub Map<String, Value>);

impl RawRecord {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Field value, treating explicit `null` the same as absent.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field).filter(|v| !v.is_null())
    }

    /// The record identity, or "" when the source omitted `Id`.
    pub fn id(&self) -> String {
        self.text(ID_FIELD).unwrap_or_default()
    }

    /// A field rendered as display text; non-string scalars are stringified.
    pub fn text(&self, field: &str) -> Option<String> {
        self.get(field).map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

/// One secondary display datum on a result or selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldValue {
    pub field: String,
    pub value: Value,
}

impl FieldValue {
    /// The value rendered as display text.
    pub fn display(&self) -> String {
        match &self.value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// A search result shaped for the dropdown. Lives for one render; discarded
/// on the next query or on selection.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultEntry {
    pub record: RawRecord,
    pub display_value: String,
    pub additional_info: Option<Vec<FieldValue>>,
}

impl ResultEntry {
    /// Derive the display shape for one raw record: the configured display
    /// field labels it (falling back to `Name`), and each configured
    /// additional field contributes only when present and non-null.
    pub fn map(record: RawRecord, config: &LookupConfig) -> Self {
        let display_value = record
            .text(&config.display_field)
            .or_else(|| record.text(NAME_FIELD))
            .unwrap_or_default();

        let info: Vec<FieldValue> = config
            .additional_field_list()
            .into_iter()
            .filter_map(|field| {
                record
                    .get(&field)
                    .cloned()
                    .map(|value| FieldValue { field, value })
            })
            .collect();
        // None and empty mean the same thing to callers; keep one form.
        let additional_info = if info.is_empty() { None } else { Some(info) };

        Self {
            record,
            display_value,
            additional_info,
        }
    }
}

/// A chosen record as tracked by the selection store. Immutable once
/// created; replacement is a swap, never a mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedRecord {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<Vec<FieldValue>>,
}

impl SelectedRecord {
    pub fn from_entry(entry: ResultEntry) -> Self {
        Self {
            id: entry.record.id(),
            name: entry.display_value,
            additional_info: entry.additional_info,
        }
    }
}
