use board_core::models::{Attachment, BoardWithAssociations, Participant};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::CustomFieldValues;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardResponse {
    pub id: Uuid,
    pub project_id: Uuid,
    pub title: String,
    pub description: String,
    pub start_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub custom_fields: CustomFieldValues,
    pub assignee_ids: Vec<Uuid>,
    pub attachments: Vec<Attachment>,
    pub participants: Vec<Participant>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BoardResponse {
    pub fn new(loaded: BoardWithAssociations, custom_fields: CustomFieldValues) -> Self {
        let BoardWithAssociations {
            board,
            attachments,
            participants,
        } = loaded;
        Self {
            id: board.id,
            project_id: board.project_id,
            title: board.title,
            description: board.description,
            start_date: board.start_date,
            due_date: board.due_date,
            custom_fields,
            assignee_ids: board.assignee_ids,
            attachments,
            participants,
            created_at: board.created_at,
            updated_at: board.updated_at,
        }
    }

    pub fn participant_user_ids(&self) -> Vec<Uuid> {
        self.participants.iter().map(|p| p.user_id).collect()
    }

    pub fn attachment_ids(&self) -> Vec<Uuid> {
        self.attachments.iter().map(|a| a.id).collect()
    }
}
