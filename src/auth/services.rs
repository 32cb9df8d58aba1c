use reqwest::Method;
use tracing::{info, instrument, warn};

use crate::{
    auth::dto::{LoginRequest, LoginResponse, LogoutResponse},
    client::ApiClient,
    error::ApiError,
    http::RequestOptions,
    session::Session,
};

impl ApiClient {
    /// Checks credentials and, on a successful verdict, makes the user current.
    ///
    /// The stored email is the one the caller typed, not one echoed by the server.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let res: LoginResponse = self
            .http
            .request(
                Method::POST,
                "/auth/login",
                RequestOptions::json(&LoginRequest { email, password })?,
            )
            .await?;

        if !res.success {
            warn!(message = %res.message, "login refused");
            return Ok(res);
        }

        let (Some(id), Some(name)) = (res.user_id, res.user_name.clone()) else {
            return Err(ApiError::DecodeFailure(
                "successful login without user_id/user_name".into(),
            ));
        };
        self.session
            .set(Session {
                id,
                name,
                email: email.to_string(),
            })
            .await?;
        info!(user_id = id, "user logged in");
        Ok(res)
    }

    /// Local only: forgets the current user without contacting the server.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<LogoutResponse, ApiError> {
        self.session.remove().await?;
        Ok(LogoutResponse {
            success: true,
            message: "Logged out successfully".into(),
        })
    }

    /// Same check as [`ApiClient::login`] with no effect on the session.
    #[instrument(skip(self, password))]
    pub async fn verify_user(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        self.http
            .request(
                Method::POST,
                "/auth/verify",
                RequestOptions::json(&LoginRequest { email, password })?,
            )
            .await
    }
}
