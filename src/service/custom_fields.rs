use board_core::models::Board;

use super::BoardService;
use crate::error::AppError;
use crate::fields::ConvertError;
use crate::models::CustomFieldValues;

impl BoardService {
    /// Translates caller values to stored ids and serializes the full map.
    /// The result replaces the board's blob wholesale.
    pub(super) async fn translate_custom_fields(
        &self,
        board: &Board,
        values: &CustomFieldValues,
    ) -> Result<String, AppError> {
        let converted = self
            .fields
            .values_to_ids(board.project_id, values)
            .await
            .map_err(|err| {
                tracing::error!(
                    board_id = %board.id,
                    error = %err,
                    "failed to convert custom field values to ids"
                );
                match err {
                    ConvertError::Store(e) => {
                        AppError::internal("Failed to load custom field definitions", e)
                    }
                    other => AppError::processing("Failed to process custom fields", other),
                }
            })?;

        serde_json::to_string(&converted)
            .map_err(|e| AppError::internal("Failed to marshal custom fields", e))
    }

    /// Stored blob -> human values. Falls back to whatever could be decoded.
    pub(super) async fn readable_custom_fields(&self, board: &Board) -> CustomFieldValues {
        if board.custom_fields.trim().is_empty() {
            return CustomFieldValues::new();
        }
        let stored: CustomFieldValues = match serde_json::from_str(&board.custom_fields) {
            Ok(stored) => stored,
            Err(err) => {
                tracing::warn!(
                    board_id = %board.id,
                    error = %err,
                    "stored custom fields are not a JSON object"
                );
                return CustomFieldValues::new();
            }
        };

        match self.fields.ids_to_values(board.project_id, &stored).await {
            Ok(values) => values,
            Err(err) => {
                tracing::warn!(
                    board_id = %board.id,
                    error = %err,
                    "failed to convert custom fields to values"
                );
                stored
            }
        }
    }
}
