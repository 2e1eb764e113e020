use crate::db::models::{DbQueue, QueueSummary};
use crate::db::sqlite::DeskStorage;
use crate::error::DeskError;
use chrono::Utc;
use sqlx::SqliteConnection;

impl DeskStorage {
    /// Insert queue metadata on an open transaction. Returns the row id.
    pub async fn insert_queue(
        conn: &mut SqliteConnection,
        client_id: i64,
        queue_name: &str,
        purpose: &str,
        instructions: &str,
    ) -> Result<i64, DeskError> {
        let res = sqlx::query(
            r#"INSERT INTO queues (client_id, queue_name, purpose, instructions, created_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(client_id)
        .bind(queue_name)
        .bind(purpose)
        .bind(instructions)
        .bind(Utc::now())
        .execute(&mut *conn)
        .await?;
        Ok(res.last_insert_rowid())
    }

    pub async fn get_queue(&self, id: i64) -> Result<Option<DbQueue>, DeskError> {
        let row = sqlx::query_as::<_, DbQueue>(
            r#"SELECT id, client_id, queue_name, purpose, instructions, created_at
               FROM queues WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(row)
    }

    /// All queues of one client in creation order, with their ledger sizes.
    pub async fn list_queues(&self, client_id: i64) -> Result<Vec<QueueSummary>, DeskError> {
        let rows = sqlx::query_as::<_, QueueSummary>(
            r#"SELECT q.id, q.client_id, q.queue_name, q.purpose, q.instructions, q.created_at,
                      (SELECT COUNT(*) FROM attendees a WHERE a.queue_id = q.id) AS waiting
               FROM queues q WHERE q.client_id = ? ORDER BY q.id"#,
        )
        .bind(client_id)
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }

    /// Remove a queue of `client_id` and its whole ledger on an open
    /// transaction. Returns false when no queue row matched.
    pub async fn delete_queue(
        conn: &mut SqliteConnection,
        client_id: i64,
        id: i64,
    ) -> Result<bool, DeskError> {
        sqlx::query(
            "DELETE FROM attendees WHERE queue_id = ? \
             AND EXISTS (SELECT 1 FROM queues WHERE id = ? AND client_id = ?)",
        )
        .bind(id)
        .bind(id)
        .bind(client_id)
        .execute(&mut *conn)
        .await?;
        let res = sqlx::query("DELETE FROM queues WHERE id = ? AND client_id = ?")
            .bind(id)
            .bind(client_id)
            .execute(&mut *conn)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
