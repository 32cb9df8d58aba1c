use reqwest::{
    header::{HeaderValue, AUTHORIZATION},
    Method,
};
use tracing::instrument;

use crate::{
    client::ApiClient,
    error::ApiError,
    http::RequestOptions,
    logins::dto::{LoginRecord, SessionToken},
};

impl ApiClient {
    #[instrument(skip(self))]
    pub async fn logins(&self) -> Result<Vec<LoginRecord>, ApiError> {
        self.http.get("/logins/").await
    }

    #[instrument(skip(self))]
    pub async fn login_record(&self, login_id: i64) -> Result<LoginRecord, ApiError> {
        self.http.get(&format!("/logins/{}", login_id)).await
    }

    #[instrument(skip(self))]
    pub async fn user_logins(&self, user_id: i64) -> Result<Vec<LoginRecord>, ApiError> {
        self.http.get(&format!("/logins/user/{}", user_id)).await
    }

    /// Logins of whoever `token` identifies; the server does the scoping.
    #[instrument(skip(self, token))]
    pub async fn my_logins(&self, token: &SessionToken) -> Result<Vec<LoginRecord>, ApiError> {
        let value = HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
            .map_err(|_| ApiError::Invalid("session token is not a valid header value".into()))?;
        self.http
            .request(
                Method::GET,
                "/logins/me/logins",
                RequestOptions::default().header(AUTHORIZATION, value),
            )
            .await
    }
}
