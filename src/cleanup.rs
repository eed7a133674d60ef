//! Background removal of attachments that a board no longer references.
//!
//! Deletion runs on its own worker task fed through a channel. Jobs carry
//! everything the worker needs, so a request can return (or be cancelled)
//! without affecting deletions it already handed off.

use std::sync::Arc;

use board_core::models::Attachment;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::storage::ObjectStorage;
use crate::store::AttachmentStore;

#[derive(Debug)]
struct CleanupJob {
    board_id: Uuid,
    attachments: Vec<Attachment>,
}

/// Handle for scheduling attachment deletions.
///
/// The worker exits once every handle is dropped and the queue is drained.
#[derive(Clone)]
pub struct AttachmentCleaner {
    tx: mpsc::UnboundedSender<CleanupJob>,
}

impl AttachmentCleaner {
    /// Starts the worker on the current Tokio runtime.
    pub fn spawn(
        storage: Arc<dyn ObjectStorage>,
        attachments: Arc<dyn AttachmentStore>,
    ) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run_worker(rx, storage, attachments));
        (Self { tx }, handle)
    }

    /// Queues deletion of storage objects and metadata rows. Never blocks.
    pub fn schedule(&self, board_id: Uuid, attachments: Vec<Attachment>) {
        if attachments.is_empty() {
            return;
        }
        let count = attachments.len();
        if let Err(err) = self.tx.send(CleanupJob {
            board_id,
            attachments,
        }) {
            tracing::error!(
                board_id = %board_id,
                count,
                error = %err,
                "attachment cleanup worker is gone, deletions dropped"
            );
        }
    }
}

async fn run_worker(
    mut rx: mpsc::UnboundedReceiver<CleanupJob>,
    storage: Arc<dyn ObjectStorage>,
    store: Arc<dyn AttachmentStore>,
) {
    tracing::debug!("attachment cleanup worker started");
    while let Some(job) = rx.recv().await {
        let mut deleted = 0usize;
        for attachment in &job.attachments {
            if delete_attachment(storage.as_ref(), store.as_ref(), job.board_id, attachment).await {
                deleted += 1;
            }
        }
        tracing::info!(
            board_id = %job.board_id,
            deleted,
            requested = job.attachments.len(),
            "attachment cleanup finished"
        );
    }
    tracing::debug!("attachment cleanup worker stopped");
}

/// Storage object first, then the row. A row whose object could not be
/// removed is kept so the object is never orphaned.
async fn delete_attachment(
    storage: &dyn ObjectStorage,
    store: &dyn AttachmentStore,
    board_id: Uuid,
    attachment: &Attachment,
) -> bool {
    if let Err(err) = storage.delete(&attachment.storage_key).await {
        tracing::error!(
            board_id = %board_id,
            attachment_id = %attachment.id,
            storage_key = %attachment.storage_key,
            error = %err,
            "failed to delete attachment object"
        );
        return false;
    }

    match store.delete(attachment.id).await {
        Ok(_) => true,
        Err(err) => {
            tracing::error!(
                board_id = %board_id,
                attachment_id = %attachment.id,
                error = %err,
                "failed to delete attachment record"
            );
            false
        }
    }
}
