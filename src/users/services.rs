use reqwest::Method;
use tracing::{info, instrument};

use crate::{
    client::ApiClient,
    error::ApiError,
    http::RequestOptions,
    users::{
        dto::{DeleteResponse, SignupForm, User, UserUpdate},
        validation::{validate_signup, validate_update},
    },
};

impl ApiClient {
    /// Registers a user. Does not log them in.
    #[instrument(skip(self, form), fields(email = %form.email.trim()))]
    pub async fn create_user(&self, form: &SignupForm) -> Result<User, ApiError> {
        let payload = validate_signup(form)?;
        let user: User = self
            .http
            .request(Method::POST, "/usuarios/", RequestOptions::json(&payload)?)
            .await?;
        info!(user_id = user.id, "user created");
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn users(&self) -> Result<Vec<User>, ApiError> {
        self.http.get("/usuarios/").await
    }

    #[instrument(skip(self))]
    pub async fn user(&self, user_id: i64) -> Result<User, ApiError> {
        self.http.get(&format!("/usuarios/{}", user_id)).await
    }

    #[instrument(skip(self, update))]
    pub async fn update_user(&self, user_id: i64, update: &UserUpdate) -> Result<User, ApiError> {
        let update = validate_update(update)?;
        self.http
            .request(
                Method::PUT,
                &format!("/usuarios/{}", user_id),
                RequestOptions::json(&update)?,
            )
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, user_id: i64) -> Result<DeleteResponse, ApiError> {
        self.http
            .request(
                Method::DELETE,
                &format!("/usuarios/{}", user_id),
                RequestOptions::default(),
            )
            .await
    }
}
