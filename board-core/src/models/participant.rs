use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::{timestamp_column, uuid_column};
use crate::error::{StoreError, StoreResult};

/// Membership of a user on a board. Unique per `(board_id, user_id)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Participant {
    pub id: Uuid,
    pub board_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Participant {
    pub fn new(board_id: Uuid, user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            board_id,
            user_id,
            created_at: Utc::now(),
        }
    }

    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: uuid_column(row, 0)?,
            board_id: uuid_column(row, 1)?,
            user_id: uuid_column(row, 2)?,
            created_at: timestamp_column(row, 3)?,
        })
    }

    /// Inserts the row; a second row for the same member yields [`StoreError::Conflict`].
    pub fn insert(&self, conn: &Connection) -> StoreResult<()> {
        conn.execute(
            "INSERT INTO participants (id, board_id, user_id, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                self.id.to_string(),
                self.board_id.to_string(),
                self.user_id.to_string(),
                self.created_at.to_rfc3339(),
            ],
        )
        .map_err(|e| {
            StoreError::from_insert(
                e,
                format!("user {} already participates in board {}", self.user_id, self.board_id),
            )
        })?;
        Ok(())
    }

    pub fn list_by_board(conn: &Connection, board_id: Uuid) -> StoreResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, board_id, user_id, created_at FROM participants \
             WHERE board_id = ?1 ORDER BY created_at",
        )?;
        let participants = stmt
            .query_map(params![board_id.to_string()], Self::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(participants)
    }

    pub fn delete(conn: &Connection, id: Uuid) -> StoreResult<bool> {
        let changed = conn.execute(
            "DELETE FROM participants WHERE id = ?1",
            params![id.to_string()],
        )?;
        Ok(changed > 0)
    }
}
