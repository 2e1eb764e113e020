use crate::db::models::DbAttendee;
use crate::db::sqlite::DeskStorage;
use crate::error::DeskError;
use chrono::Utc;

impl DeskStorage {
    /// Append an attendee to a queue's ledger. Returns the row id.
    pub async fn insert_attendee(
        &self,
        queue_id: i64,
        first_name: &str,
        last_name: &str,
        account_number: &str,
        service_requested: &str,
    ) -> Result<i64, DeskError> {
        let res = sqlx::query(
            r#"INSERT INTO attendees (
                queue_id, first_name, last_name, account_number, service_requested, joined_at
            ) VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(queue_id)
        .bind(first_name)
        .bind(last_name)
        .bind(account_number)
        .bind(service_requested)
        .bind(Utc::now())
        .execute(self.pool())
        .await?;
        Ok(res.last_insert_rowid())
    }

    /// Delete one attendee of one queue. Returns false when nothing matched.
    pub async fn delete_attendee(&self, queue_id: i64, attendee_id: i64) -> Result<bool, DeskError> {
        let res = sqlx::query("DELETE FROM attendees WHERE queue_id = ? AND id = ?")
            .bind(queue_id)
            .bind(attendee_id)
            .execute(self.pool())
            .await?;
        Ok(res.rows_affected() > 0)
    }

    pub async fn list_attendees(&self, queue_id: i64) -> Result<Vec<DbAttendee>, DeskError> {
        let rows = sqlx::query_as::<_, DbAttendee>(
            r#"SELECT id, queue_id, first_name, last_name, account_number, service_requested, joined_at
               FROM attendees WHERE queue_id = ? ORDER BY id"#,
        )
        .bind(queue_id)
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }

    /// Rank of an attendee among the rows still in the queue's ledger.
    ///
    /// Served attendees are deleted and ids are never reused, so counting the
    /// remaining rows up to `attendee_id` yields the number of people who
    /// joined no later than this one and are still waiting. `None` when the
    /// attendee is no longer in the ledger.
    pub async fn position_of(&self, queue_id: i64, attendee_id: i64) -> Result<Option<i64>, DeskError> {
        let rec: (i64, i64) = sqlx::query_as(
            r#"SELECT
                   EXISTS(SELECT 1 FROM attendees WHERE queue_id = ? AND id = ?),
                   (SELECT COUNT(*) FROM attendees WHERE queue_id = ? AND id <= ?)"#,
        )
        .bind(queue_id)
        .bind(attendee_id)
        .bind(queue_id)
        .bind(attendee_id)
        .fetch_one(self.pool())
        .await?;
        Ok((rec.0 != 0).then_some(rec.1.max(1)))
    }
}
