use async_trait::async_trait;
use board_core::models::{
    Attachment, Board, BoardWithAssociations, EntityType, FieldDefinition, FieldOption,
    Participant,
};
use board_core::{Database, StoreError, StoreResult};
use uuid::Uuid;

use super::{
    AttachmentStore, BoardStore, FieldOptionConverter, MemberFailure, ParticipantBatch,
    ParticipantStore,
};
use crate::fields::{ConvertError, FieldCatalog};
use crate::models::CustomFieldValues;

#[async_trait]
impl BoardStore for Database {
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Board>> {
        self.with_connection(|conn| Board::find_by_id(conn, id))
    }

    async fn update(&self, board: &Board) -> StoreResult<bool> {
        self.with_connection(|conn| board.update(conn))
    }

    async fn find_with_associations(&self, id: Uuid) -> StoreResult<Option<BoardWithAssociations>> {
        self.with_connection(|conn| Board::find_with_associations(conn, id))
    }
}

#[async_trait]
impl AttachmentStore for Database {
    async fn find_by_entity(
        &self,
        entity_type: EntityType,
        entity_id: Uuid,
    ) -> StoreResult<Vec<Attachment>> {
        self.with_connection(|conn| Attachment::list_by_entity(conn, entity_type, entity_id))
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Attachment>> {
        self.with_connection(|conn| Attachment::find_by_id(conn, id))
    }

    async fn bind(
        &self,
        ids: &[Uuid],
        entity_type: EntityType,
        entity_id: Uuid,
    ) -> StoreResult<()> {
        self.with_connection(|conn| {
            let tx = conn.unchecked_transaction()?;
            for id in ids {
                if !Attachment::bind(&tx, *id, entity_type, entity_id)? {
                    return Err(StoreError::Conflict(format!(
                        "attachment {id} cannot be bound to {} {entity_id}",
                        entity_type.as_str()
                    )));
                }
            }
            tx.commit()?;
            Ok(())
        })
    }

    async fn detach(
        &self,
        ids: &[Uuid],
        entity_type: EntityType,
        entity_id: Uuid,
    ) -> StoreResult<Vec<Uuid>> {
        self.with_connection(|conn| {
            let tx = conn.unchecked_transaction()?;
            let mut detached = Vec::with_capacity(ids.len());
            for id in ids {
                if Attachment::detach(&tx, *id, entity_type, entity_id)? {
                    detached.push(*id);
                }
            }
            tx.commit()?;
            Ok(detached)
        })
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        self.with_connection(|conn| Attachment::delete(conn, id))
    }
}

#[async_trait]
impl ParticipantStore for Database {
    async fn find_by_board(&self, board_id: Uuid) -> StoreResult<Vec<Participant>> {
        self.with_connection(|conn| Participant::list_by_board(conn, board_id))
    }

    async fn delete(&self, participant_id: Uuid) -> StoreResult<bool> {
        self.with_connection(|conn| Participant::delete(conn, participant_id))
    }

    /// Inserts members one at a time so a conflict on one does not stop the rest.
    async fn add(&self, board_id: Uuid, user_ids: &[Uuid]) -> StoreResult<ParticipantBatch> {
        self.with_connection(|conn| {
            let mut batch = ParticipantBatch::default();
            for user_id in user_ids {
                let participant = Participant::new(board_id, *user_id);
                match participant.insert(conn) {
                    Ok(()) => batch.added.push(participant),
                    Err(error) => batch.failures.push(MemberFailure {
                        user_id: *user_id,
                        error,
                    }),
                }
            }
            Ok(batch)
        })
    }
}

fn field_catalog(db: &Database, project_id: Uuid) -> StoreResult<FieldCatalog> {
    db.with_connection(|conn| {
        let definitions = FieldDefinition::list_by_project(conn, project_id)?;
        let options = FieldOption::list_by_project(conn, project_id)?;
        Ok(FieldCatalog::new(definitions, options))
    })
}

#[async_trait]
impl FieldOptionConverter for Database {
    async fn values_to_ids(
        &self,
        project_id: Uuid,
        values: &CustomFieldValues,
    ) -> Result<CustomFieldValues, ConvertError> {
        if values.is_empty() {
            return Ok(CustomFieldValues::new());
        }
        field_catalog(self, project_id)?.values_to_ids(values)
    }

    async fn ids_to_values(
        &self,
        project_id: Uuid,
        stored: &CustomFieldValues,
    ) -> Result<CustomFieldValues, ConvertError> {
        if stored.is_empty() {
            return Ok(CustomFieldValues::new());
        }
        field_catalog(self, project_id)?.ids_to_values(stored)
    }
}
