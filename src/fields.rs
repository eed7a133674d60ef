//! Translation between human readable custom field values and the stable
//! option identifiers stored on a board.

use std::collections::HashMap;

use board_core::models::{FieldDefinition, FieldOption, FieldType};
use board_core::StoreError;
use chrono::{DateTime, NaiveDate};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::models::CustomFieldValues;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("unknown custom field: {0}")]
    UnknownField(String),

    #[error("field {field} has no option {value}")]
    UnknownOption { field: String, value: String },

    #[error("field {field} expects {expected}")]
    InvalidValue {
        field: String,
        expected: &'static str,
    },

    #[error("failed to load field definitions: {0}")]
    Store(#[from] StoreError),
}

struct CatalogField {
    field_type: FieldType,
    ids_by_value: HashMap<String, Uuid>,
    values_by_id: HashMap<Uuid, String>,
}

/// Field definitions and options of a single project.
pub struct FieldCatalog {
    fields: HashMap<Uuid, CatalogField>,
}

impl FieldCatalog {
    pub fn new(definitions: Vec<FieldDefinition>, options: Vec<FieldOption>) -> Self {
        let mut fields: HashMap<Uuid, CatalogField> = definitions
            .into_iter()
            .map(|def| {
                (
                    def.id,
                    CatalogField {
                        field_type: def.field_type,
                        ids_by_value: HashMap::new(),
                        values_by_id: HashMap::new(),
                    },
                )
            })
            .collect();

        for option in options {
            if let Some(field) = fields.get_mut(&option.field_id) {
                field.ids_by_value.insert(option.value.clone(), option.id);
                field.values_by_id.insert(option.id, option.value);
            }
        }

        Self { fields }
    }

    fn field(&self, key: &str) -> Result<&CatalogField, ConvertError> {
        Uuid::parse_str(key)
            .ok()
            .and_then(|id| self.fields.get(&id))
            .ok_or_else(|| ConvertError::UnknownField(key.to_string()))
    }

    /// Human values -> stored values. Any unresolvable entry fails the whole map.
    pub fn values_to_ids(&self, values: &CustomFieldValues) -> Result<CustomFieldValues, ConvertError> {
        values
            .iter()
            .map(|(key, value)| {
                let field = self.field(key)?;
                let stored = match (field.field_type, value) {
                    (_, Value::Null) => Value::Null,
                    (FieldType::SingleSelect, value) => field.option_id(key, value)?,
                    (FieldType::MultiSelect, Value::Array(items)) => Value::Array(
                        items
                            .iter()
                            .map(|item| field.option_id(key, item))
                            .collect::<Result<_, _>>()?,
                    ),
                    (FieldType::MultiSelect, _) => return Err(invalid(key, "a list of options")),
                    (FieldType::Text, Value::String(_)) => value.clone(),
                    (FieldType::Text, _) => return Err(invalid(key, "text")),
                    (FieldType::Number, Value::Number(_)) => value.clone(),
                    (FieldType::Number, _) => return Err(invalid(key, "a number")),
                    (FieldType::Date, Value::String(s)) if is_date(s) => value.clone(),
                    (FieldType::Date, _) => return Err(invalid(key, "a date")),
                };
                Ok((key.clone(), stored))
            })
            .collect()
    }

    /// Stored values -> human values.
    pub fn ids_to_values(&self, stored: &CustomFieldValues) -> Result<CustomFieldValues, ConvertError> {
        stored
            .iter()
            .map(|(key, value)| {
                let field = self.field(key)?;
                let readable = match (field.field_type, value) {
                    (_, Value::Null) => Value::Null,
                    (FieldType::SingleSelect, value) => field.option_value(key, value)?,
                    (FieldType::MultiSelect, Value::Array(items)) => Value::Array(
                        items
                            .iter()
                            .map(|item| field.option_value(key, item))
                            .collect::<Result<_, _>>()?,
                    ),
                    (FieldType::MultiSelect, _) => return Err(invalid(key, "a list of options")),
                    _ => value.clone(),
                };
                Ok((key.clone(), readable))
            })
            .collect()
    }
}

impl CatalogField {
    fn option_id(&self, key: &str, value: &Value) -> Result<Value, ConvertError> {
        let Value::String(text) = value else {
            return Err(invalid(key, "an option name"));
        };
        self.ids_by_value
            .get(text)
            .map(|id| Value::String(id.to_string()))
            .ok_or_else(|| ConvertError::UnknownOption {
                field: key.to_string(),
                value: text.clone(),
            })
    }

    fn option_value(&self, key: &str, value: &Value) -> Result<Value, ConvertError> {
        let unknown = || ConvertError::UnknownOption {
            field: key.to_string(),
            value: value.to_string(),
        };
        let id = value
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .ok_or_else(unknown)?;
        self.values_by_id
            .get(&id)
            .map(|text| Value::String(text.clone()))
            .ok_or_else(unknown)
    }
}

fn invalid(key: &str, expected: &'static str) -> ConvertError {
    ConvertError::InvalidValue {
        field: key.to_string(),
        expected,
    }
}

fn is_date(s: &str) -> bool {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok() || DateTime::parse_from_rfc3339(s).is_ok()
}
