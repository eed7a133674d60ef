use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CustomFieldValues, Patch};

/// Partial update of a board. Every field left [`Patch::Absent`] is untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBoardRequest {
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub title: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub description: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub start_date: Patch<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub due_date: Patch<DateTime<Utc>>,
    /// Field id -> human readable value. An empty map clears every field.
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub custom_fields: Patch<CustomFieldValues>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub assignee_ids: Patch<Vec<Uuid>>,
    /// Complete desired set of attachments bound to the board.
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub attachment_ids: Patch<Vec<Uuid>>,
    /// Complete desired set of participating users.
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub participant_ids: Patch<Vec<Uuid>>,
}
