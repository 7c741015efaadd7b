use crate::domain::ports::{Storage, TokenStore};
use crate::domain::session::Session;
use crate::utils::error::{ApiError, Result};
use async_trait::async_trait;
use std::sync::Mutex;

/// Session kept in process memory only. Used by tests and one-shot callers.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    session: Mutex<Option<Session>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<Session>>> {
        self.session.lock().map_err(|_| ApiError::ConfigValidationError {
            field: "token_store".to_string(),
            message: "token store lock poisoned".to_string(),
        })
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Result<Option<Session>> {
        Ok(self.lock()?.clone())
    }

    async fn save(&self, session: &Session) -> Result<()> {
        *self.lock()? = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.lock()? = None;
        Ok(())
    }
}

/// Session persisted as a JSON file through a [`Storage`] backend.
#[derive(Debug, Clone)]
pub struct FileTokenStore<S: Storage> {
    storage: S,
    file_name: String,
}

impl<S: Storage> FileTokenStore<S> {
    pub fn new(storage: S, file_name: impl Into<String>) -> Self {
        Self {
            storage,
            file_name: file_name.into(),
        }
    }
}

#[async_trait]
impl<S: Storage> TokenStore for FileTokenStore<S> {
    async fn load(&self) -> Result<Option<Session>> {
        match self.storage.read_file(&self.file_name).await {
            Ok(data) => Ok(Some(serde_json::from_slice(&data)?)),
            Err(ApiError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn save(&self, session: &Session) -> Result<()> {
        let data = serde_json::to_vec_pretty(session)?;
        self.storage.write_file(&self.file_name, &data).await?;
        tracing::debug!("Session saved to {}", self.file_name);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.storage.remove_file(&self.file_name).await
    }
}
