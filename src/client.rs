use std::sync::Arc;

use anyhow::Context;

use crate::{
    config::ClientConfig,
    error::ApiError,
    http::HttpClient,
    session::{Session, SessionStore},
    storage::{FileStorage, KeyValueStorage},
};

/// Entry point for pages and the CLI: the HTTP funnel plus the session store.
///
/// Domain operations live next to their DTOs in `auth`, `users` and `logins`.
#[derive(Clone)]
pub struct ApiClient {
    pub(crate) http: HttpClient,
    pub(crate) session: SessionStore,
}

impl ApiClient {
    pub async fn init(config: &ClientConfig) -> anyhow::Result<Self> {
        let http = HttpClient::new(&config.api_base_url, config.request_timeout)?;
        let storage = Arc::new(FileStorage::new(&config.session_dir)) as Arc<dyn KeyValueStorage>;
        let session = SessionStore::open(storage)
            .await
            .context("open session store")?;
        Ok(Self { http, session })
    }

    pub fn from_parts(http: HttpClient, session: SessionStore) -> Self {
        Self { http, session }
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn current_user(&self) -> Option<Session> {
        self.session.current()
    }

    pub async fn set_current_user(&self, user: Session) -> Result<(), ApiError> {
        self.session.set(user).await
    }

    pub async fn remove_current_user(&self) -> Result<(), ApiError> {
        self.session.remove().await
    }
}
