use crate::api::middleware::ApiResult;
use crate::models::Session;
use crate::store::{get_doc, put_doc, DocumentStore};

pub const SESSIONS: &str = "sessions";

/// Generate an opaque session token: 32 random bytes, hex encoded.
pub fn generate_token() -> String {
    use rand::RngCore;
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

pub async fn create_session(store: &dyn DocumentStore, session: &Session) -> ApiResult<()> {
    put_doc(store, SESSIONS, &session.token, session).await?;
    Ok(())
}

pub async fn get_session_by_token(
    store: &dyn DocumentStore,
    token: &str,
) -> ApiResult<Option<Session>> {
    Ok(get_doc(store, SESSIONS, token).await?)
}

pub async fn delete_session(store: &dyn DocumentStore, token: &str) -> ApiResult<()> {
    store.delete(SESSIONS, token).await?;
    Ok(())
}
