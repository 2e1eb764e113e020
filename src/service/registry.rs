use crate::db::{DbQueue, DeskStorage, QueueSummary};
use crate::error::DeskError;
use crate::service::artifacts::ArtifactStore;
use crate::types::QueueForm;
use tracing::{info, warn};
use url::Url;

/// Queue metadata plus the join artifacts that go with each queue.
#[derive(Clone)]
pub struct Registry {
    storage: DeskStorage,
    artifacts: ArtifactStore,
    public_url: Url,
}

impl Registry {
    pub fn new(storage: DeskStorage, artifacts: ArtifactStore, public_url: Url) -> Self {
        Self {
            storage,
            artifacts,
            public_url,
        }
    }

    pub fn artifacts(&self) -> &ArtifactStore {
        &self.artifacts
    }

    /// Public URL an attendee opens to join `queue_id`.
    pub fn join_link(&self, queue_id: i64) -> Result<Url, DeskError> {
        Ok(self.public_url.join(&format!("join_queue/{queue_id}"))?)
    }

    /// Store a new queue and its QR artifact. The row only becomes visible
    /// once the artifact is on disk.
    pub async fn create_queue(&self, owner_id: i64, form: QueueForm) -> Result<i64, DeskError> {
        let form = form.validate()?;

        let mut tx = self.storage.begin().await?;
        let id = DeskStorage::insert_queue(
            &mut tx,
            owner_id,
            &form.queue_name,
            &form.purpose,
            &form.instructions,
        )
        .await?;

        let link = self.join_link(id)?;
        self.artifacts.write(id, link.as_str()).await?;
        if let Err(e) = tx.commit().await {
            self.discard_artifact(id).await;
            return Err(e.into());
        }

        info!(client_id = owner_id, queue_id = id, queue_name = %form.queue_name, "queue created");
        Ok(id)
    }

    pub async fn list_queues(&self, owner_id: i64) -> Result<Vec<QueueSummary>, DeskError> {
        self.storage.list_queues(owner_id).await
    }

    /// Fetch a queue on behalf of `owner_id`.
    pub async fn get_owned(&self, owner_id: i64, queue_id: i64) -> Result<DbQueue, DeskError> {
        owned_queue(&self.storage, owner_id, queue_id).await
    }

    /// Fetch a queue for anyone; used by the public join pages.
    pub async fn get_public(&self, queue_id: i64) -> Result<DbQueue, DeskError> {
        self.storage
            .get_queue(queue_id)
            .await?
            .ok_or(DeskError::QueueNotFound)
    }

    /// Drop a queue with its ledger in one transaction, then its artifact.
    pub async fn delete_queue(&self, owner_id: i64, queue_id: i64) -> Result<(), DeskError> {
        owned_queue(&self.storage, owner_id, queue_id).await?;

        // First statement in the transaction must be a write: SQLite cannot
        // upgrade a read lock under contention.
        let mut tx = self.storage.begin().await?;
        if !DeskStorage::delete_queue(&mut tx, owner_id, queue_id).await? {
            return Err(DeskError::QueueNotFound);
        }
        tx.commit().await?;

        self.discard_artifact(queue_id).await;
        info!(client_id = owner_id, queue_id, "queue deleted");
        Ok(())
    }

    async fn discard_artifact(&self, queue_id: i64) {
        if let Err(e) = self.artifacts.remove(queue_id).await {
            warn!(
                queue_id,
                path = %self.artifacts.path_for(queue_id).display(),
                error = %e,
                "failed to remove join artifact"
            );
        }
    }
}

/// Load a queue and check it belongs to `owner_id`.
pub async fn owned_queue(
    storage: &DeskStorage,
    owner_id: i64,
    queue_id: i64,
) -> Result<DbQueue, DeskError> {
    let queue = storage
        .get_queue(queue_id)
        .await?
        .ok_or(DeskError::QueueNotFound)?;
    if queue.client_id != owner_id {
        return Err(DeskError::Forbidden);
    }
    Ok(queue)
}
