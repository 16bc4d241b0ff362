use crate::store::{get_doc, put_doc, DocumentStore};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("identity not found for user {0}")]
    NotFound(String),

    #[error("identity provider error: {0}")]
    Provider(String),
}

/// External identity provider paired with user documents. Provisioning
/// happens on user create; deprovisioning runs first on user delete and
/// only a not-found outcome lets the document delete proceed.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn provision(
        &self,
        user_id: &str,
        email: &str,
        password: &str,
    ) -> Result<(), IdentityError>;

    async fn verify(&self, user_id: &str, password: &str) -> Result<bool, IdentityError>;

    async fn deprovision(&self, user_id: &str) -> Result<(), IdentityError>;
}

const IDENTITIES: &str = "identities";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IdentityDoc {
    user_id: String,
    email: String,
    password_hash: String,
    created_at: String,
}

/// Store-backed identity provider holding argon2id credential hashes.
pub struct LocalIdentityProvider {
    store: Arc<dyn DocumentStore>,
}

impl LocalIdentityProvider {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn provision(
        &self,
        user_id: &str,
        email: &str,
        password: &str,
    ) -> Result<(), IdentityError> {
        let doc = IdentityDoc {
            user_id: user_id.to_string(),
            email: email.to_lowercase(),
            password_hash: hash_password(password)
                .map_err(|e| IdentityError::Provider(e.to_string()))?,
            created_at: crate::models::now_rfc3339(),
        };

        put_doc(self.store.as_ref(), IDENTITIES, user_id, &doc)
            .await
            .map_err(|e| IdentityError::Provider(e.to_string()))
    }

    async fn verify(&self, user_id: &str, password: &str) -> Result<bool, IdentityError> {
        let doc: Option<IdentityDoc> = get_doc(self.store.as_ref(), IDENTITIES, user_id)
            .await
            .map_err(|e| IdentityError::Provider(e.to_string()))?;

        match doc {
            Some(doc) => Ok(verify_password(password, &doc.password_hash)),
            None => Err(IdentityError::NotFound(user_id.to_string())),
        }
    }

    async fn deprovision(&self, user_id: &str) -> Result<(), IdentityError> {
        let existing = self
            .store
            .get(IDENTITIES, user_id)
            .await
            .map_err(|e| IdentityError::Provider(e.to_string()))?;

        if existing.is_none() {
            return Err(IdentityError::NotFound(user_id.to_string()));
        }

        self.store
            .delete(IDENTITIES, user_id)
            .await
            .map_err(|e| IdentityError::Provider(e.to_string()))
    }
}

/// Hash a password with Argon2id and a random salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    Ok(argon2.hash_password(password.as_bytes(), &salt)?.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("Rahasia123!").unwrap();
        assert!(verify_password("Rahasia123!", &hash));
        assert!(!verify_password("salah", &hash));
    }

    #[tokio::test]
    async fn test_provision_verify_deprovision() {
        let store = Arc::new(crate::store::MemoryStore::new());
        let provider = LocalIdentityProvider::new(store);

        provider
            .provision("u1", "budi@example.com", "Rahasia123!")
            .await
            .unwrap();
        assert!(provider.verify("u1", "Rahasia123!").await.unwrap());
        assert!(!provider.verify("u1", "salah").await.unwrap());

        provider.deprovision("u1").await.unwrap();
        let err = provider.deprovision("u1").await;
        assert!(matches!(err, Err(IdentityError::NotFound(_))));
    }
}
