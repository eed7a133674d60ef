use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::{timestamp_column, uuid_column};
use crate::error::{StoreError, StoreResult};

/// A project-scoped custom field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldDefinition {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub field_type: FieldType,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Number,
    Date,
    SingleSelect,
    MultiSelect,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Date => "date",
            Self::SingleSelect => "single_select",
            Self::MultiSelect => "multi_select",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "text" => Some(Self::Text),
            "number" => Some(Self::Number),
            "date" => Some(Self::Date),
            "single_select" => Some(Self::SingleSelect),
            "multi_select" => Some(Self::MultiSelect),
            _ => None,
        }
    }
}

/// One selectable value of a select-type field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldOption {
    pub id: Uuid,
    pub field_id: Uuid,
    pub value: String,
    pub position: i64,
    pub created_at: DateTime<Utc>,
}

impl FieldDefinition {
    pub fn new(project_id: Uuid, name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_id,
            name: name.into(),
            field_type,
            created_at: Utc::now(),
        }
    }

    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        let raw: String = row.get(3)?;
        let field_type = FieldType::from_str(&raw).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                3,
                rusqlite::types::Type::Text,
                Box::new(StoreError::InvalidData(format!("field type {raw}"))),
            )
        })?;
        Ok(Self {
            id: uuid_column(row, 0)?,
            project_id: uuid_column(row, 1)?,
            name: row.get(2)?,
            field_type,
            created_at: timestamp_column(row, 4)?,
        })
    }

    pub fn insert(&self, conn: &Connection) -> StoreResult<()> {
        conn.execute(
            "INSERT INTO field_definitions (id, project_id, name, field_type, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                self.id.to_string(),
                self.project_id.to_string(),
                self.name,
                self.field_type.as_str(),
                self.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn list_by_project(conn: &Connection, project_id: Uuid) -> StoreResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, project_id, name, field_type, created_at FROM field_definitions \
             WHERE project_id = ?1 ORDER BY created_at",
        )?;
        let fields = stmt
            .query_map(params![project_id.to_string()], Self::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(fields)
    }
}

impl FieldOption {
    pub fn new(field_id: Uuid, value: impl Into<String>, position: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            field_id,
            value: value.into(),
            position,
            created_at: Utc::now(),
        }
    }

    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: uuid_column(row, 0)?,
            field_id: uuid_column(row, 1)?,
            value: row.get(2)?,
            position: row.get(3)?,
            created_at: timestamp_column(row, 4)?,
        })
    }

    pub fn insert(&self, conn: &Connection) -> StoreResult<()> {
        conn.execute(
            "INSERT INTO field_options (id, field_id, value, position, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                self.id.to_string(),
                self.field_id.to_string(),
                self.value,
                self.position,
                self.created_at.to_rfc3339(),
            ],
        )
        .map_err(|e| {
            StoreError::from_insert(e, format!("option {} already exists", self.value))
        })?;
        Ok(())
    }

    /// All options of every field defined in `project_id`.
    pub fn list_by_project(conn: &Connection, project_id: Uuid) -> StoreResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT o.id, o.field_id, o.value, o.position, o.created_at FROM field_options o \
             JOIN field_definitions f ON f.id = o.field_id \
             WHERE f.project_id = ?1 ORDER BY o.field_id, o.position",
        )?;
        let options = stmt
            .query_map(params![project_id.to_string()], Self::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(options)
    }
}
