use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbClient {
    pub id: i64,
    pub business_name: String,
    pub email: String,
    pub phone_number: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, PartialEq, FromRow)]
pub struct DbQueue {
    pub id: i64,
    pub client_id: i64,
    pub queue_name: String,
    pub purpose: String,
    pub instructions: String,
    pub created_at: DateTime<Utc>,
}

/// A queue as listed on the dashboard, with its live ledger size.
#[derive(Debug, Clone, Serialize, PartialEq, FromRow)]
pub struct QueueSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub queue: DbQueue,
    pub waiting: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq, FromRow)]
pub struct DbAttendee {
    pub id: i64,
    pub queue_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub account_number: String,
    pub service_requested: String,
    pub joined_at: DateTime<Utc>,
}

impl DbAttendee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
