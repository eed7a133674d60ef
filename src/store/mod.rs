//! Ports the board service depends on.
//!
//! The service only sees these traits; [`board_core::Database`] implements all
//! of them in [`sqlite`].

mod sqlite;

use async_trait::async_trait;
use board_core::models::{Attachment, Board, BoardWithAssociations, EntityType, Participant};
use board_core::{StoreError, StoreResult};
use uuid::Uuid;

use crate::fields::ConvertError;
use crate::models::CustomFieldValues;

#[async_trait]
pub trait BoardStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Board>>;

    /// Persists scalar and custom-field columns. `false` if the board is gone.
    async fn update(&self, board: &Board) -> StoreResult<bool>;

    async fn find_with_associations(&self, id: Uuid) -> StoreResult<Option<BoardWithAssociations>>;
}

#[async_trait]
pub trait AttachmentStore: Send + Sync {
    async fn find_by_entity(
        &self,
        entity_type: EntityType,
        entity_id: Uuid,
    ) -> StoreResult<Vec<Attachment>>;

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Attachment>>;

    /// Binds every attachment in `ids` to the entity and marks it confirmed.
    ///
    /// All or nothing: an id that is missing or not bindable to the entity
    /// fails the whole call with [`StoreError::Conflict`].
    async fn bind(&self, ids: &[Uuid], entity_type: EntityType, entity_id: Uuid)
        -> StoreResult<()>;

    /// Unbinds the attachments in `ids` that are still bound to the entity.
    /// Returns the ids actually detached.
    async fn detach(
        &self,
        ids: &[Uuid],
        entity_type: EntityType,
        entity_id: Uuid,
    ) -> StoreResult<Vec<Uuid>>;

    /// Removes the metadata row.
    async fn delete(&self, id: Uuid) -> StoreResult<bool>;
}

/// A member that could not be added.
#[derive(Debug)]
pub struct MemberFailure {
    pub user_id: Uuid,
    pub error: StoreError,
}

/// Outcome of a batch add: some members may fail while others succeed.
#[derive(Debug, Default)]
pub struct ParticipantBatch {
    pub added: Vec<Participant>,
    pub failures: Vec<MemberFailure>,
}

#[async_trait]
pub trait ParticipantStore: Send + Sync {
    async fn find_by_board(&self, board_id: Uuid) -> StoreResult<Vec<Participant>>;

    async fn delete(&self, participant_id: Uuid) -> StoreResult<bool>;

    async fn add(&self, board_id: Uuid, user_ids: &[Uuid]) -> StoreResult<ParticipantBatch>;
}

/// Converts custom field values within the field definitions of one project.
#[async_trait]
pub trait FieldOptionConverter: Send + Sync {
    async fn values_to_ids(
        &self,
        project_id: Uuid,
        values: &CustomFieldValues,
    ) -> Result<CustomFieldValues, ConvertError>;

    async fn ids_to_values(
        &self,
        project_id: Uuid,
        stored: &CustomFieldValues,
    ) -> Result<CustomFieldValues, ConvertError>;
}
