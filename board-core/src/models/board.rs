use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Attachment, EntityType, Participant};
use crate::db::{json_column, opt_timestamp_column, timestamp_column, uuid_column};
use crate::error::StoreResult;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Board {
    pub id: Uuid,
    pub project_id: Uuid,
    pub title: String,
    pub description: String,
    pub start_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    /// Serialized JSON object of field id -> stored option id or raw value.
    pub custom_fields: String,
    pub assignee_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A board together with the rows other tables bind to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardWithAssociations {
    #[serde(flatten)]
    pub board: Board,
    pub attachments: Vec<Attachment>,
    pub participants: Vec<Participant>,
}

const SELECT_BOARD: &str = "SELECT id, project_id, title, description, start_date, due_date, \
     custom_fields, assignee_ids, created_at, updated_at FROM boards";

impl Board {
    pub fn new(project_id: Uuid, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            project_id,
            title: title.into(),
            description: String::new(),
            start_date: None,
            due_date: None,
            custom_fields: "{}".to_string(),
            assignee_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: uuid_column(row, 0)?,
            project_id: uuid_column(row, 1)?,
            title: row.get(2)?,
            description: row.get(3)?,
            start_date: opt_timestamp_column(row, 4)?,
            due_date: opt_timestamp_column(row, 5)?,
            custom_fields: row.get(6)?,
            assignee_ids: json_column(row, 7)?,
            created_at: timestamp_column(row, 8)?,
            updated_at: timestamp_column(row, 9)?,
        })
    }

    pub fn insert(&self, conn: &Connection) -> StoreResult<()> {
        conn.execute(
            "INSERT INTO boards (id, project_id, title, description, start_date, due_date, \
             custom_fields, assignee_ids, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                self.id.to_string(),
                self.project_id.to_string(),
                self.title,
                self.description,
                self.start_date.map(|d| d.to_rfc3339()),
                self.due_date.map(|d| d.to_rfc3339()),
                self.custom_fields,
                serde_json::to_string(&self.assignee_ids)?,
                self.created_at.to_rfc3339(),
                self.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn find_by_id(conn: &Connection, id: Uuid) -> StoreResult<Option<Self>> {
        let board = conn
            .query_row(
                &format!("{SELECT_BOARD} WHERE id = ?1"),
                params![id.to_string()],
                Self::from_row,
            )
            .optional()?;
        Ok(board)
    }

    /// Writes the mutable columns back. Returns `false` when the row is gone.
    ///
    /// `id`, `project_id` and `created_at` are never rewritten.
    pub fn update(&self, conn: &Connection) -> StoreResult<bool> {
        let changed = conn.execute(
            "UPDATE boards SET title = ?2, description = ?3, start_date = ?4, due_date = ?5, \
             custom_fields = ?6, assignee_ids = ?7, updated_at = ?8 WHERE id = ?1",
            params![
                self.id.to_string(),
                self.title,
                self.description,
                self.start_date.map(|d| d.to_rfc3339()),
                self.due_date.map(|d| d.to_rfc3339()),
                self.custom_fields,
                serde_json::to_string(&self.assignee_ids)?,
                self.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(changed > 0)
    }

    pub fn find_with_associations(
        conn: &Connection,
        id: Uuid,
    ) -> StoreResult<Option<BoardWithAssociations>> {
        let Some(board) = Self::find_by_id(conn, id)? else {
            return Ok(None);
        };
        let attachments = Attachment::list_by_entity(conn, EntityType::Board, id)?;
        let participants = Participant::list_by_board(conn, id)?;
        Ok(Some(BoardWithAssociations {
            board,
            attachments,
            participants,
        }))
    }
}
