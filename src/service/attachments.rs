use std::collections::HashSet;

use board_core::models::{Attachment, EntityType};
use board_core::StoreError;
use uuid::Uuid;

use super::{diff_ids, BoardService};
use crate::error::AppError;

impl BoardService {
    /// Makes `desired` the set of attachments bound to the board.
    ///
    /// Dropped attachments are detached from the board here and deleted by
    /// the background cleaner; new ones are validated and bound before this
    /// returns.
    pub(super) async fn reconcile_attachments(
        &self,
        board_id: Uuid,
        desired: &[Uuid],
    ) -> Result<(), AppError> {
        let current = self
            .attachments
            .find_by_entity(EntityType::Board, board_id)
            .await
            .map_err(|e| {
                tracing::error!(
                    board_id = %board_id,
                    error = %e,
                    "failed to fetch current attachments"
                );
                AppError::internal("Failed to fetch current attachments", e)
            })?;

        let diff = diff_ids(current.iter().map(|a| a.id), desired.iter().copied());

        if !diff.to_remove.is_empty() {
            self.release_attachments(board_id, current, &diff.to_remove).await;
        }

        if !diff.to_add.is_empty() {
            self.confirm_attachments(board_id, &diff.to_add).await?;
        }

        Ok(())
    }

    /// Detaches dropped attachments and hands them to the cleaner.
    ///
    /// Only rows this call actually detached are scheduled, so an attachment
    /// is never deleted while still bound. Failures are logged and tolerated.
    async fn release_attachments(
        &self,
        board_id: Uuid,
        current: Vec<Attachment>,
        to_remove: &[Uuid],
    ) {
        let detached = match self
            .attachments
            .detach(to_remove, EntityType::Board, board_id)
            .await
        {
            Ok(ids) => ids.into_iter().collect::<HashSet<Uuid>>(),
            Err(e) => {
                tracing::error!(
                    board_id = %board_id,
                    count = to_remove.len(),
                    error = %e,
                    "failed to detach dropped attachments"
                );
                return;
            }
        };

        let to_delete: Vec<Attachment> = current
            .into_iter()
            .filter(|a| detached.contains(&a.id))
            .collect();
        self.cleaner.schedule(board_id, to_delete);
    }

    /// Validates every id first, then binds them all.
    async fn confirm_attachments(&self, board_id: Uuid, ids: &[Uuid]) -> Result<(), AppError> {
        for id in ids {
            let attachment = self
                .attachments
                .find_by_id(*id)
                .await
                .map_err(|e| AppError::internal("Failed to fetch attachment", e))?
                .ok_or_else(|| AppError::validation(format!("Attachment {id} not found")))?;

            if !attachment.is_unbound() && !attachment.is_bound_to(EntityType::Board, board_id) {
                return Err(AppError::validation(format!(
                    "Attachment {id} belongs to another entity"
                )));
            }
            if !attachment.is_bindable_to(EntityType::Board, board_id) {
                return Err(AppError::validation(format!(
                    "Attachment {id} is no longer available"
                )));
            }
        }

        self.attachments
            .bind(ids, EntityType::Board, board_id)
            .await
            .map_err(|e| match e {
                StoreError::Conflict(_) => {
                    tracing::warn!(board_id = %board_id, error = %e, "attachment changed before binding");
                    AppError::validation("Attachments changed while confirming, nothing was bound")
                }
                e => {
                    tracing::error!(board_id = %board_id, error = %e, "failed to confirm attachments");
                    AppError::internal("Failed to confirm attachments", e)
                }
            })
    }
}
