use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

use crate::{error::ApiError, storage::KeyValueStorage};

/// Storage key holding the serialized session.
pub const SESSION_KEY: &str = "currentUser";

/// The locally cached authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Holds the single active [`Session`] on top of durable key-value storage.
///
/// The durable entry is the source of truth: the in-memory copy is loaded when the
/// store is opened and can be re-synchronized with [`SessionStore::refresh`]. Every
/// transition is published to [`SessionStore::subscribe`] receivers. Clones share
/// the same identity cell.
///
/// Writers are serialized: a storage write and the matching cache update happen
/// under one lock, so the last completed write wins in both places.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn KeyValueStorage>,
    current: Arc<watch::Sender<Option<Session>>>,
    write: Arc<Mutex<()>>,
}

impl SessionStore {
    pub async fn open(storage: Arc<dyn KeyValueStorage>) -> Result<Self, ApiError> {
        let initial = load(storage.as_ref()).await?;
        debug!(present = initial.is_some(), "session store opened");
        let (tx, _rx) = watch::channel(initial);
        Ok(Self {
            storage,
            current: Arc::new(tx),
            write: Arc::new(Mutex::new(())),
        })
    }

    /// The cached identity; never touches storage.
    pub fn current(&self) -> Option<Session> {
        self.current.borrow().clone()
    }

    /// Replaces any existing session, durably first.
    pub async fn set(&self, session: Session) -> Result<(), ApiError> {
        let raw = serde_json::to_string(&session)
            .map_err(|e| ApiError::Invalid(format!("session not serializable: {}", e)))?;
        let _guard = self.write.lock().await;
        self.storage.set(SESSION_KEY, &raw).await?;
        info!(user_id = session.id, "session stored");
        self.current.send_replace(Some(session));
        Ok(())
    }

    /// Clears the session. Calling it with no session is a no-op.
    pub async fn remove(&self) -> Result<(), ApiError> {
        let _guard = self.write.lock().await;
        self.storage.remove(SESSION_KEY).await?;
        if self.current.send_replace(None).is_some() {
            info!("session cleared");
        }
        Ok(())
    }

    /// Re-reads durable storage, publishing the value if it changed.
    pub async fn refresh(&self) -> Result<Option<Session>, ApiError> {
        let _guard = self.write.lock().await;
        let stored = load(self.storage.as_ref()).await?;
        let changed = self.current.send_if_modified(|current| {
            if *current == stored {
                false
            } else {
                *current = stored.clone();
                true
            }
        });
        if changed {
            info!(present = stored.is_some(), "session changed in storage");
        }
        Ok(stored)
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.current.subscribe()
    }
}

async fn load(storage: &dyn KeyValueStorage) -> Result<Option<Session>, ApiError> {
    let Some(raw) = storage.get(SESSION_KEY).await? else {
        return Ok(None);
    };
    match serde_json::from_str::<Option<Session>>(&raw) {
        Ok(session) => Ok(session),
        Err(e) => {
            warn!(error = %e, "stored session is not valid; treating as signed out");
            Ok(None)
        }
    }
}
