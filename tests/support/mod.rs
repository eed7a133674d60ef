#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use board_core::models::*;
use board_core::{Database, StoreError, StoreResult};
use board_service::fields::ConvertError;
use board_service::models::CustomFieldValues;
use board_service::storage::{ObjectStorage, StorageError};
use board_service::store::{
    AttachmentStore, BoardStore, FieldOptionConverter, MemberFailure, ParticipantBatch,
    ParticipantStore,
};
use board_service::{AttachmentCleaner, BoardService};
use chrono::{DateTime, TimeZone, Utc};
use tokio::task::JoinHandle;
use uuid::Uuid;

pub fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()
}

fn injected(what: &str) -> StoreError {
    StoreError::InvalidData(format!("injected failure: {what}"))
}

#[derive(Default)]
pub struct Counters {
    pub board_updates: AtomicUsize,
    pub binds: AtomicUsize,
    pub attachment_deletes: AtomicUsize,
    pub participant_deletes: AtomicUsize,
    pub participant_adds: AtomicUsize,
}

impl Counters {
    pub fn get(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

/// Delegates to the database, counting calls and failing on request.
pub struct SpyStore {
    pub db: Database,
    pub counts: Counters,
    pub failing_members: Mutex<HashSet<Uuid>>,
    pub fail_participant_deletes: AtomicBool,
    pub fail_bind: AtomicBool,
    pub fail_detach: AtomicBool,
    /// Board saves report the row as gone.
    pub lose_board_on_save: AtomicBool,
    /// Reloads after a save find nothing.
    pub lose_board_on_reload: AtomicBool,
}

impl SpyStore {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            counts: Counters::default(),
            failing_members: Mutex::new(HashSet::new()),
            fail_participant_deletes: AtomicBool::new(false),
            fail_bind: AtomicBool::new(false),
            fail_detach: AtomicBool::new(false),
            lose_board_on_save: AtomicBool::new(false),
            lose_board_on_reload: AtomicBool::new(false),
        }
    }

    pub fn fail_member(&self, user_id: Uuid) {
        self.failing_members.lock().unwrap().insert(user_id);
    }
}

#[async_trait]
impl BoardStore for SpyStore {
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Board>> {
        BoardStore::find_by_id(&self.db, id).await
    }

    async fn update(&self, board: &Board) -> StoreResult<bool> {
        self.counts.board_updates.fetch_add(1, Ordering::SeqCst);
        if self.lose_board_on_save.load(Ordering::SeqCst) {
            return Ok(false);
        }
        BoardStore::update(&self.db, board).await
    }

    async fn find_with_associations(&self, id: Uuid) -> StoreResult<Option<BoardWithAssociations>> {
        if self.lose_board_on_reload.load(Ordering::SeqCst) {
            return Ok(None);
        }
        self.db.find_with_associations(id).await
    }
}

#[async_trait]
impl AttachmentStore for SpyStore {
    async fn find_by_entity(
        &self,
        entity_type: EntityType,
        entity_id: Uuid,
    ) -> StoreResult<Vec<Attachment>> {
        self.db.find_by_entity(entity_type, entity_id).await
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Attachment>> {
        AttachmentStore::find_by_id(&self.db, id).await
    }

    async fn bind(
        &self,
        ids: &[Uuid],
        entity_type: EntityType,
        entity_id: Uuid,
    ) -> StoreResult<()> {
        self.counts.binds.fetch_add(ids.len(), Ordering::SeqCst);
        if self.fail_bind.load(Ordering::SeqCst) {
            return Err(injected("bind"));
        }
        self.db.bind(ids, entity_type, entity_id).await
    }

    async fn detach(
        &self,
        ids: &[Uuid],
        entity_type: EntityType,
        entity_id: Uuid,
    ) -> StoreResult<Vec<Uuid>> {
        if self.fail_detach.load(Ordering::SeqCst) {
            return Err(injected("detach"));
        }
        self.db.detach(ids, entity_type, entity_id).await
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        self.counts.attachment_deletes.fetch_add(1, Ordering::SeqCst);
        AttachmentStore::delete(&self.db, id).await
    }
}

#[async_trait]
impl ParticipantStore for SpyStore {
    async fn find_by_board(&self, board_id: Uuid) -> StoreResult<Vec<Participant>> {
        self.db.find_by_board(board_id).await
    }

    async fn delete(&self, participant_id: Uuid) -> StoreResult<bool> {
        self.counts.participant_deletes.fetch_add(1, Ordering::SeqCst);
        if self.fail_participant_deletes.load(Ordering::SeqCst) {
            return Err(injected("participant delete"));
        }
        ParticipantStore::delete(&self.db, participant_id).await
    }

    async fn add(&self, board_id: Uuid, user_ids: &[Uuid]) -> StoreResult<ParticipantBatch> {
        self.counts.participant_adds.fetch_add(user_ids.len(), Ordering::SeqCst);
        let failing = self.failing_members.lock().unwrap().clone();
        let (rejected, accepted): (Vec<Uuid>, Vec<Uuid>) =
            user_ids.iter().copied().partition(|id| failing.contains(id));

        let mut batch = self.db.add(board_id, &accepted).await?;
        batch
            .failures
            .extend(rejected.into_iter().map(|user_id| MemberFailure {
                user_id,
                error: injected("participant add"),
            }));
        Ok(batch)
    }
}

#[async_trait]
impl FieldOptionConverter for SpyStore {
    async fn values_to_ids(
        &self,
        project_id: Uuid,
        values: &CustomFieldValues,
    ) -> Result<CustomFieldValues, ConvertError> {
        self.db.values_to_ids(project_id, values).await
    }

    async fn ids_to_values(
        &self,
        project_id: Uuid,
        stored: &CustomFieldValues,
    ) -> Result<CustomFieldValues, ConvertError> {
        self.db.ids_to_values(project_id, stored).await
    }
}

/// Object storage kept in memory.
#[derive(Default)]
pub struct MemoryStorage {
    pub objects: Mutex<HashSet<String>>,
    pub failing_keys: Mutex<HashSet<String>>,
}

impl MemoryStorage {
    pub fn put(&self, key: &str) {
        self.objects.lock().unwrap().insert(key.to_string());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects.lock().unwrap().contains(key)
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        if self.failing_keys.lock().unwrap().contains(key) {
            return Err(StorageError::Io {
                key: key.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "injected"),
            });
        }
        self.objects.lock().unwrap().remove(key);
        Ok(())
    }
}

/// A service wired to a spy over an in-memory database.
///
/// Must be created inside a Tokio runtime.
pub struct Harness {
    pub db: Database,
    pub spy: Arc<SpyStore>,
    pub storage: Arc<MemoryStorage>,
    service: Option<BoardService>,
    cleaner: Option<JoinHandle<()>>,
}

impl Harness {
    pub fn new() -> Self {
        let db = Database::open_memory().expect("Failed to create test database");
        db.migrate().expect("Failed to migrate test database");
        let spy = Arc::new(SpyStore::new(db.clone()));
        let storage = Arc::new(MemoryStorage::default());
        let (cleaner, handle) = AttachmentCleaner::spawn(storage.clone(), spy.clone());
        let service = BoardService::new(spy.clone(), spy.clone(), spy.clone(), spy.clone(), cleaner);
        Self {
            db,
            spy,
            storage,
            service: Some(service),
            cleaner: Some(handle),
        }
    }

    pub fn service(&self) -> &BoardService {
        self.service.as_ref().expect("service already drained")
    }

    /// Drops the service and waits for every scheduled deletion.
    pub async fn drain(&mut self) {
        self.service.take();
        if let Some(handle) = self.cleaner.take() {
            handle.await.expect("cleanup worker panicked");
        }
    }

    pub fn create_board(&self, start: Option<u32>, due: Option<u32>) -> Board {
        let mut board = Board::new(Uuid::new_v4(), "Roadmap");
        board.description = "Quarterly plan".to_string();
        board.start_date = start.map(day);
        board.due_date = due.map(day);
        self.db
            .with_connection(|conn| board.insert(conn))
            .expect("Failed to insert board");
        board
    }

    pub fn load_board(&self, id: Uuid) -> Board {
        self.db
            .with_connection(|conn| Board::find_by_id(conn, id))
            .unwrap()
            .expect("board exists")
    }

    /// A stored attachment with its object present in storage.
    pub fn create_attachment(&self, bound_to: Option<Uuid>) -> Attachment {
        let mut attachment = Attachment::new_temporary(
            "notes.pdf",
            format!("attachments/{}", Uuid::new_v4()),
            512,
        );
        if let Some(board_id) = bound_to {
            attachment.entity_type = Some(EntityType::Board);
            attachment.entity_id = Some(board_id);
            attachment.status = AttachmentStatus::Confirmed;
        }
        self.db
            .with_connection(|conn| attachment.insert(conn))
            .expect("Failed to insert attachment");
        self.storage.put(&attachment.storage_key);
        attachment
    }

    pub fn find_attachment(&self, id: Uuid) -> Option<Attachment> {
        self.db
            .with_connection(|conn| Attachment::find_by_id(conn, id))
            .unwrap()
    }

    pub fn bound_attachment_ids(&self, board_id: Uuid) -> HashSet<Uuid> {
        self.db
            .with_connection(|conn| Attachment::list_by_entity(conn, EntityType::Board, board_id))
            .unwrap()
            .into_iter()
            .map(|a| a.id)
            .collect()
    }

    pub fn add_participant(&self, board_id: Uuid, user_id: Uuid) -> Participant {
        let participant = Participant::new(board_id, user_id);
        self.db
            .with_connection(|conn| participant.insert(conn))
            .expect("Failed to insert participant");
        participant
    }

    pub fn participant_user_ids(&self, board_id: Uuid) -> Vec<Uuid> {
        self.db
            .with_connection(|conn| Participant::list_by_board(conn, board_id))
            .unwrap()
            .into_iter()
            .map(|p| p.user_id)
            .collect()
    }

    pub fn create_select_field(
        &self,
        project_id: Uuid,
        name: &str,
        options: &[&str],
    ) -> (FieldDefinition, Vec<FieldOption>) {
        let field = FieldDefinition::new(project_id, name, FieldType::SingleSelect);
        let options: Vec<FieldOption> = options
            .iter()
            .enumerate()
            .map(|(i, value)| FieldOption::new(field.id, *value, i as i64))
            .collect();
        self.db
            .with_connection(|conn| {
                field.insert(conn)?;
                for option in &options {
                    option.insert(conn)?;
                }
                Ok(())
            })
            .expect("Failed to insert field");
        (field, options)
    }
}
