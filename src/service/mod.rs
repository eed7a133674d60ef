//! Board update orchestration.
//!
//! An update runs load → validate → merge scalars → custom fields →
//! attachments → participants → persist → reload → present. Only the
//! attachment deletions leave this flow; they go to the [`AttachmentCleaner`].

mod attachments;
mod custom_fields;
mod dates;
mod merge;
mod participants;
mod present;
mod reconcile;
mod update;

pub use dates::{effective_dates, validate_date_range};
pub use merge::apply_scalars;
pub use participants::ParticipantChanges;
pub use reconcile::{diff_ids, SetDiff};

use std::sync::Arc;

use board_core::Database;
use uuid::Uuid;

use crate::cleanup::AttachmentCleaner;
use crate::error::AppError;
use crate::models::BoardResponse;
use crate::store::{AttachmentStore, BoardStore, FieldOptionConverter, ParticipantStore};

pub struct BoardService {
    boards: Arc<dyn BoardStore>,
    attachments: Arc<dyn AttachmentStore>,
    participants: Arc<dyn ParticipantStore>,
    fields: Arc<dyn FieldOptionConverter>,
    cleaner: AttachmentCleaner,
}

impl BoardService {
    pub fn new(
        boards: Arc<dyn BoardStore>,
        attachments: Arc<dyn AttachmentStore>,
        participants: Arc<dyn ParticipantStore>,
        fields: Arc<dyn FieldOptionConverter>,
        cleaner: AttachmentCleaner,
    ) -> Self {
        Self {
            boards,
            attachments,
            participants,
            fields,
            cleaner,
        }
    }

    /// Every port backed by the same database.
    pub fn from_database(db: Database, cleaner: AttachmentCleaner) -> Self {
        let db = Arc::new(db);
        Self::new(db.clone(), db.clone(), db.clone(), db, cleaner)
    }

    pub async fn get_board(&self, board_id: Uuid) -> Result<BoardResponse, AppError> {
        let loaded = self
            .boards
            .find_with_associations(board_id)
            .await
            .map_err(|e| AppError::internal("Failed to fetch board", e))?
            .ok_or_else(|| AppError::not_found("Board not found"))?;
        Ok(self.present(loaded).await)
    }
}
