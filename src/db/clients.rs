use crate::db::models::DbClient;
use crate::db::sqlite::DeskStorage;
use crate::error::DeskError;
use chrono::Utc;

impl DeskStorage {
    /// Insert a new client row. Returns the row id.
    pub async fn insert_client(
        &self,
        business_name: &str,
        email: &str,
        phone_number: &str,
        password_hash: &str,
    ) -> Result<i64, DeskError> {
        let res = sqlx::query(
            r#"INSERT INTO clients (business_name, email, phone_number, password_hash, created_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(business_name)
        .bind(email)
        .bind(phone_number)
        .bind(password_hash)
        .bind(Utc::now())
        .execute(self.pool())
        .await?;
        Ok(res.last_insert_rowid())
    }

    pub async fn email_taken(&self, email: &str) -> Result<bool, DeskError> {
        let rec: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM clients WHERE email = ?")
            .bind(email)
            .fetch_one(self.pool())
            .await?;
        Ok(rec.0 > 0)
    }

    pub async fn find_client_by_email(&self, email: &str) -> Result<Option<DbClient>, DeskError> {
        let row = sqlx::query_as::<_, DbClient>(
            r#"SELECT id, business_name, email, phone_number, password_hash, created_at
               FROM clients WHERE email = ?"#,
        )
        .bind(email)
        .fetch_optional(self.pool())
        .await?;
        Ok(row)
    }

    pub async fn get_client(&self, id: i64) -> Result<Option<DbClient>, DeskError> {
        let row = sqlx::query_as::<_, DbClient>(
            r#"SELECT id, business_name, email, phone_number, password_hash, created_at
               FROM clients WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(row)
    }
}
