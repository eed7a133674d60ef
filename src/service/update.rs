use chrono::Utc;
use uuid::Uuid;

use super::{apply_scalars, validate_date_range, BoardService};
use crate::error::AppError;
use crate::models::{BoardResponse, UpdateBoardRequest};

impl BoardService {
    /// Applies a partial update to a board and reconciles its dependent
    /// collections.
    ///
    /// Attachment confirmation, custom field translation and the board
    /// fetch/save are load-bearing: their errors abort the update before the
    /// board row is written. Participant changes are best effort. Steps that
    /// already ran are not rolled back when a later one fails.
    pub async fn update_board(
        &self,
        board_id: Uuid,
        req: UpdateBoardRequest,
    ) -> Result<BoardResponse, AppError> {
        let mut board = self
            .boards
            .find_by_id(board_id)
            .await
            .map_err(|e| AppError::internal("Failed to fetch board", e))?
            .ok_or_else(|| AppError::not_found("Board not found"))?;

        validate_date_range(&board, &req)?;
        apply_scalars(&mut board, &req);

        if let Some(values) = req.custom_fields.as_value() {
            board.custom_fields = self.translate_custom_fields(&board, values).await?;
        }

        if let Some(desired) = req.attachment_ids.as_value() {
            self.reconcile_attachments(board_id, desired).await?;
        }

        if let Some(desired) = req.participant_ids.as_value() {
            let changes = self.reconcile_participants(board_id, desired).await?;
            tracing::debug!(
                board_id = %board_id,
                removed = changes.removed,
                added = changes.added,
                failed = changes.failed,
                "participants reconciled"
            );
        }

        board.updated_at = Utc::now();
        let saved = self
            .boards
            .update(&board)
            .await
            .map_err(|e| AppError::internal("Failed to update board", e))?;
        if !saved {
            return Err(AppError::not_found("Board not found"));
        }

        let updated = self
            .boards
            .find_with_associations(board_id)
            .await
            .map_err(|e| AppError::internal("Failed to fetch updated board", e))?
            .ok_or_else(|| {
                AppError::internal("Failed to fetch updated board", "board missing after update")
            })?;

        tracing::info!(board_id = %board_id, "board updated");
        Ok(self.present(updated).await)
    }
}
