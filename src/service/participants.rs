use std::collections::HashSet;

use uuid::Uuid;

use super::{diff_ids, BoardService};
use crate::error::AppError;

/// Counts of what a participant reconciliation actually did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParticipantChanges {
    pub removed: usize,
    pub added: usize,
    pub failed: usize,
}

impl BoardService {
    /// Makes `desired` the set of participating users, best effort.
    ///
    /// Only loading the current participants can fail the update; every
    /// individual removal or addition failure is logged and skipped.
    pub(super) async fn reconcile_participants(
        &self,
        board_id: Uuid,
        desired: &[Uuid],
    ) -> Result<ParticipantChanges, AppError> {
        let current = self.participants.find_by_board(board_id).await.map_err(|e| {
            tracing::error!(
                board_id = %board_id,
                error = %e,
                "failed to fetch current participants"
            );
            AppError::internal("Failed to fetch current participants", e)
        })?;

        let diff = diff_ids(current.iter().map(|p| p.user_id), desired.iter().copied());
        let mut changes = ParticipantChanges::default();

        let leaving: HashSet<Uuid> = diff.to_remove.iter().copied().collect();
        for participant in current.iter().filter(|p| leaving.contains(&p.user_id)) {
            match self.participants.delete(participant.id).await {
                Ok(_) => changes.removed += 1,
                Err(err) => {
                    changes.failed += 1;
                    tracing::warn!(
                        board_id = %board_id,
                        participant_id = %participant.id,
                        error = %err,
                        "failed to delete participant"
                    );
                }
            }
        }

        if diff.to_add.is_empty() {
            return Ok(changes);
        }

        match self.participants.add(board_id, &diff.to_add).await {
            Ok(batch) => {
                changes.added = batch.added.len();
                changes.failed += batch.failures.len();
                for failure in batch.failures {
                    tracing::warn!(
                        board_id = %board_id,
                        user_id = %failure.user_id,
                        error = %failure.error,
                        "failed to add participant"
                    );
                }
            }
            Err(err) => {
                changes.failed += diff.to_add.len();
                tracing::warn!(
                    board_id = %board_id,
                    error = %err,
                    "failed to add some participants"
                );
            }
        }

        Ok(changes)
    }
}
