use crate::db::{DbAttendee, DeskStorage};
use crate::error::DeskError;
use crate::service::registry::owned_queue;
use crate::types::JoinForm;
use serde::Serialize;
use tracing::info;

/// Where an attendee stands, computed fresh on every lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "position", rename_all = "snake_case")]
pub enum Position {
    /// Rank among attendees still waiting; 1 is next.
    Waiting(i64),
    /// Served, or the queue was deleted.
    NotInQueue,
}

/// Handed to an attendee right after joining.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JoinTicket {
    pub queue_id: i64,
    pub attendee_id: i64,
    pub position: Position,
}

#[derive(Clone)]
pub struct Ledger {
    storage: DeskStorage,
}

impl Ledger {
    pub fn new(storage: DeskStorage) -> Self {
        Self { storage }
    }

    pub async fn join(&self, queue_id: i64, form: JoinForm) -> Result<JoinTicket, DeskError> {
        let form = form.validate()?;
        if self.storage.get_queue(queue_id).await?.is_none() {
            return Err(DeskError::QueueNotFound);
        }

        // A concurrent delete_queue between the check and the insert trips
        // the foreign key instead of leaving an orphaned row.
        let attendee_id = self
            .storage
            .insert_attendee(
                queue_id,
                &form.first_name,
                &form.last_name,
                &form.account_number,
                &form.service_requested,
            )
            .await
            .map_err(|e| match e {
                DeskError::DatabaseError(sqlx::Error::Database(db))
                    if db.is_foreign_key_violation() =>
                {
                    DeskError::QueueNotFound
                }
                other => other,
            })?;

        let position = self.position_of(queue_id, attendee_id).await?;
        info!(queue_id, attendee_id, ?position, "attendee joined");
        Ok(JoinTicket {
            queue_id,
            attendee_id,
            position,
        })
    }

    /// Remove an attendee from a queue owned by `owner_id`, in any order.
    pub async fn serve(&self, owner_id: i64, queue_id: i64, attendee_id: i64) -> Result<(), DeskError> {
        owned_queue(&self.storage, owner_id, queue_id).await?;
        if !self.storage.delete_attendee(queue_id, attendee_id).await? {
            return Err(DeskError::AttendeeNotFound);
        }
        info!(queue_id, attendee_id, "attendee served");
        Ok(())
    }

    pub async fn position_of(&self, queue_id: i64, attendee_id: i64) -> Result<Position, DeskError> {
        Ok(match self.storage.position_of(queue_id, attendee_id).await? {
            Some(n) => Position::Waiting(n),
            None => Position::NotInQueue,
        })
    }

    pub async fn list_attendees(&self, queue_id: i64) -> Result<Vec<DbAttendee>, DeskError> {
        self.storage.list_attendees(queue_id).await
    }
}
