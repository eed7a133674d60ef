use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::{opt_uuid_column, timestamp_column, uuid_column};
use crate::error::{StoreError, StoreResult};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attachment {
    pub id: Uuid,
    /// Owning entity; `None` while the upload is still unbound.
    pub entity_type: Option<EntityType>,
    pub entity_id: Option<Uuid>,
    pub status: AttachmentStatus,
    pub file_name: String,
    /// Object key in the attachment storage backend.
    pub storage_key: String,
    pub size_bytes: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Board,
    Project,
    Comment,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Board => "board",
            Self::Project => "project",
            Self::Comment => "comment",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "board" => Some(Self::Board),
            "project" => Some(Self::Project),
            "comment" => Some(Self::Comment),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentStatus {
    Temporary,
    Confirmed,
}

impl AttachmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Temporary => "temporary",
            Self::Confirmed => "confirmed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "temporary" => Some(Self::Temporary),
            "confirmed" => Some(Self::Confirmed),
            _ => None,
        }
    }
}

const SELECT_ATTACHMENT: &str = "SELECT id, entity_type, entity_id, status, file_name, \
     storage_key, size_bytes, created_at FROM attachments";

fn invalid(idx: usize, what: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        idx,
        rusqlite::types::Type::Text,
        Box::new(StoreError::InvalidData(what)),
    )
}

impl Attachment {
    /// A freshly uploaded attachment that no entity references yet.
    pub fn new_temporary(
        file_name: impl Into<String>,
        storage_key: impl Into<String>,
        size_bytes: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            entity_type: None,
            entity_id: None,
            status: AttachmentStatus::Temporary,
            file_name: file_name.into(),
            storage_key: storage_key.into(),
            size_bytes,
            created_at: Utc::now(),
        }
    }

    /// Whether this attachment is bound to exactly `entity_type`/`entity_id`.
    pub fn is_bound_to(&self, entity_type: EntityType, entity_id: Uuid) -> bool {
        self.entity_type == Some(entity_type) && self.entity_id == Some(entity_id)
    }

    pub fn is_unbound(&self) -> bool {
        self.entity_type.is_none() && self.entity_id.is_none()
    }

    /// A fresh upload nobody owns yet, or one already bound to this entity.
    ///
    /// Detached attachments stay `Confirmed` and can never be bound again.
    pub fn is_bindable_to(&self, entity_type: EntityType, entity_id: Uuid) -> bool {
        (self.is_unbound() && self.status == AttachmentStatus::Temporary)
            || self.is_bound_to(entity_type, entity_id)
    }

    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        let entity_type = row
            .get::<_, Option<String>>(1)?
            .map(|s| EntityType::from_str(&s).ok_or_else(|| invalid(1, format!("entity type {s}"))))
            .transpose()?;
        let status: String = row.get(3)?;
        let status = AttachmentStatus::from_str(&status)
            .ok_or_else(|| invalid(3, format!("attachment status {status}")))?;

        Ok(Self {
            id: uuid_column(row, 0)?,
            entity_type,
            entity_id: opt_uuid_column(row, 2)?,
            status,
            file_name: row.get(4)?,
            storage_key: row.get(5)?,
            size_bytes: row.get(6)?,
            created_at: timestamp_column(row, 7)?,
        })
    }

    pub fn insert(&self, conn: &Connection) -> StoreResult<()> {
        conn.execute(
            "INSERT INTO attachments (id, entity_type, entity_id, status, file_name, \
             storage_key, size_bytes, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                self.id.to_string(),
                self.entity_type.map(|t| t.as_str()),
                self.entity_id.map(|id| id.to_string()),
                self.status.as_str(),
                self.file_name,
                self.storage_key,
                self.size_bytes,
                self.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn find_by_id(conn: &Connection, id: Uuid) -> StoreResult<Option<Self>> {
        let attachment = conn
            .query_row(
                &format!("{SELECT_ATTACHMENT} WHERE id = ?1"),
                params![id.to_string()],
                Self::from_row,
            )
            .optional()?;
        Ok(attachment)
    }

    pub fn list_by_entity(
        conn: &Connection,
        entity_type: EntityType,
        entity_id: Uuid,
    ) -> StoreResult<Vec<Self>> {
        let mut stmt = conn.prepare(&format!(
            "{SELECT_ATTACHMENT} WHERE entity_type = ?1 AND entity_id = ?2 ORDER BY created_at"
        ))?;
        let attachments = stmt
            .query_map(
                params![entity_type.as_str(), entity_id.to_string()],
                Self::from_row,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(attachments)
    }

    /// Binds the attachment to an entity and marks it confirmed.
    ///
    /// Returns `false` when the row is missing or not bindable to the entity
    /// (see [`Attachment::is_bindable_to`]).
    pub fn bind(
        conn: &Connection,
        id: Uuid,
        entity_type: EntityType,
        entity_id: Uuid,
    ) -> StoreResult<bool> {
        let changed = conn.execute(
            "UPDATE attachments SET entity_type = ?2, entity_id = ?3, status = ?4 \
             WHERE id = ?1 AND ((entity_id IS NULL AND status = ?5) \
             OR (entity_type = ?2 AND entity_id = ?3))",
            params![
                id.to_string(),
                entity_type.as_str(),
                entity_id.to_string(),
                AttachmentStatus::Confirmed.as_str(),
                AttachmentStatus::Temporary.as_str(),
            ],
        )?;
        Ok(changed > 0)
    }

    /// Clears the owner of an attachment still bound to `entity_type`/`entity_id`.
    /// The status is left `Confirmed`. Returns `false` if it was not bound there.
    pub fn detach(
        conn: &Connection,
        id: Uuid,
        entity_type: EntityType,
        entity_id: Uuid,
    ) -> StoreResult<bool> {
        let changed = conn.execute(
            "UPDATE attachments SET entity_type = NULL, entity_id = NULL \
             WHERE id = ?1 AND entity_type = ?2 AND entity_id = ?3",
            params![id.to_string(), entity_type.as_str(), entity_id.to_string()],
        )?;
        Ok(changed > 0)
    }

    pub fn delete(conn: &Connection, id: Uuid) -> StoreResult<bool> {
        let changed = conn.execute(
            "DELETE FROM attachments WHERE id = ?1",
            params![id.to_string()],
        )?;
        Ok(changed > 0)
    }
}
