use tracing::warn;

use crate::{
    error::ApiError,
    users::dto::{NewUser, SignupForm, UserUpdate},
};

pub const MIN_PASSWORD_CHARS: usize = 6;
/// bcrypt only looks at the first 72 bytes downstream.
pub const MAX_PASSWORD_BYTES: usize = 72;
pub const DEFAULT_PROFILE_ID: i64 = 1;

fn invalid(msg: &str) -> ApiError {
    warn!(reason = msg, "rejected locally");
    ApiError::Invalid(msg.to_string())
}

/// The minimum counts UTF-16 code units, as browser form fields do, so an emoji
/// counts as two characters. The ceiling counts UTF-8 bytes.
pub fn check_password(password: &str) -> Result<(), ApiError> {
    if password.encode_utf16().count() < MIN_PASSWORD_CHARS {
        return Err(invalid("Password must be at least 6 characters"));
    }
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(invalid("Password too long: use at most 72 bytes"));
    }
    Ok(())
}

/// First failing check wins; nothing here touches the network. Email format is
/// left to the server.
pub fn validate_signup(form: &SignupForm) -> Result<NewUser, ApiError> {
    let name = form.name.trim();
    let email = form.email.trim();
    let nickname = form.nickname.trim();

    if name.is_empty() {
        return Err(invalid("Name is required"));
    }
    if email.is_empty() {
        return Err(invalid("Email is required"));
    }
    if nickname.is_empty() {
        return Err(invalid("Nickname is required"));
    }
    check_password(&form.password)?;
    if form.password != form.confirm_password {
        return Err(invalid("Passwords do not match"));
    }

    Ok(NewUser {
        name: name.to_string(),
        email: email.to_string(),
        password: form.password.clone(),
        nickname: nickname.to_string(),
        profile_id: form.profile_id.unwrap_or(DEFAULT_PROFILE_ID),
    })
}

/// Trims present text fields the way signup does and checks a new password.
pub fn validate_update(update: &UserUpdate) -> Result<UserUpdate, ApiError> {
    let trimmed = |v: &Option<String>| v.as_deref().map(|s| s.trim().to_string());
    let normalized = UserUpdate {
        name: trimmed(&update.name),
        email: trimmed(&update.email),
        password: update.password.clone(),
        nickname: trimmed(&update.nickname),
        profile_id: update.profile_id,
    };

    if normalized.name.as_deref() == Some("") {
        return Err(invalid("Name is required"));
    }
    if normalized.email.as_deref() == Some("") {
        return Err(invalid("Email is required"));
    }
    if normalized.nickname.as_deref() == Some("") {
        return Err(invalid("Nickname is required"));
    }
    if let Some(password) = normalized.password.as_deref() {
        check_password(password)?;
    }
    Ok(normalized)
}
