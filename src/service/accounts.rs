use crate::db::DeskStorage;
use crate::error::DeskError;
use crate::types::RegistrationForm;
use crate::types::forms::normalize_email;
use argon2::{
    Argon2, PasswordHash, PasswordVerifier,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use serde::{Deserialize, Serialize};
use tracing::info;

/// What the session cookie remembers about a logged-in client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSession {
    pub client_id: i64,
    pub business_name: String,
    pub email: String,
}

/// Registration and login against the `clients` table.
#[derive(Clone)]
pub struct Accounts {
    storage: DeskStorage,
}

impl Accounts {
    pub fn new(storage: DeskStorage) -> Self {
        Self { storage }
    }

    /// Validate the form, hash the password and store a new client.
    pub async fn register(&self, form: RegistrationForm) -> Result<i64, DeskError> {
        let form = form.validate()?;
        if self.storage.email_taken(&form.email).await? {
            return Err(DeskError::Validation(
                "An account with this email already exists".to_string(),
            ));
        }

        let hash = hash_password(form.password).await?;
        let id = self
            .storage
            .insert_client(&form.business_name, &form.email, &form.phone_number, &hash)
            .await
            .map_err(|e| match e {
                // Lost a race with another signup for the same address.
                DeskError::DatabaseError(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                    DeskError::Validation("An account with this email already exists".to_string())
                }
                other => other,
            })?;
        info!(client_id = id, "client registered");
        Ok(id)
    }

    pub async fn authenticate(&self, email: &str, password: &str) -> Result<ClientSession, DeskError> {
        let email = normalize_email(email);
        let Some(client) = self.storage.find_client_by_email(&email).await? else {
            return Err(DeskError::UnknownEmail);
        };

        if !verify_password(password.to_string(), client.password_hash).await? {
            return Err(DeskError::InvalidCredentials);
        }

        info!(client_id = client.id, "client logged in");
        Ok(ClientSession {
            client_id: client.id,
            business_name: client.business_name,
            email: client.email,
        })
    }

    pub async fn business_name(&self, client_id: i64) -> Result<Option<String>, DeskError> {
        Ok(self
            .storage
            .get_client(client_id)
            .await?
            .map(|c| c.business_name))
    }
}

/// Argon2id with a fresh random salt, encoded as a PHC string.
pub async fn hash_password(password: String) -> Result<String, DeskError> {
    tokio::task::spawn_blocking(move || -> Result<_, DeskError> {
        let salt = SaltString::generate(&mut OsRng);
        Ok(Argon2::default()
            .hash_password(password.as_bytes(), &salt)?
            .to_string())
    })
    .await
    .map_err(|e| DeskError::Hash(format!("hashing task failed: {e}")))?
}

pub async fn verify_password(password: String, phc: String) -> Result<bool, DeskError> {
    tokio::task::spawn_blocking(move || -> Result<_, DeskError> {
        let parsed = PasswordHash::new(&phc)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    })
    .await
    .map_err(|e| DeskError::Hash(format!("verify task failed: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_verifies_and_differs_from_plaintext() {
        let hash = hash_password("pw123".to_string()).await.unwrap();
        assert_ne!(hash, "pw123");
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("pw123".to_string(), hash.clone()).await.unwrap());
        assert!(!verify_password("pw124".to_string(), hash).await.unwrap());
    }

    #[tokio::test]
    async fn same_password_gets_distinct_salts() {
        let a = hash_password("pw123".to_string()).await.unwrap();
        let b = hash_password("pw123".to_string()).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn malformed_stored_hash_is_an_error() {
        let err = verify_password("pw".to_string(), "not-a-phc".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, DeskError::Hash(_)));
    }
}
