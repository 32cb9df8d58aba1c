use std::fmt;

use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

/// One audited login as the backend returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRecord {
    #[serde(rename = "id_login")]
    pub id: i64,
    #[serde(rename = "ip_login")]
    pub ip: String,
    pub user_agent: String,
    #[serde(rename = "data_login", with = "crate::timestamp")]
    pub logged_in_at: PrimitiveDateTime,
    #[serde(rename = "id_usuario")]
    pub user_id: i64,
}

/// Bearer credential the backend uses to scope "my logins".
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(..)")
    }
}
