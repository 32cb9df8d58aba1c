use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

/// User record as the backend returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "id_usuario")]
    pub id: i64,
    #[serde(rename = "nome_usuario")]
    pub name: String,
    pub email: String,
    #[serde(rename = "apelido_steam")]
    pub nickname: String,
    #[serde(rename = "id_perfil")]
    pub profile_id: i64,
    #[serde(rename = "data_criacao", with = "crate::timestamp")]
    pub created_at: PrimitiveDateTime,
    #[serde(rename = "ultimo_login", default, with = "crate::timestamp::option")]
    pub last_login: Option<PrimitiveDateTime>,
}

/// What a signup page collects. Only [`crate::users::validation::validate_signup`]
/// turns it into a [`NewUser`].
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub nickname: String,
    pub password: String,
    pub confirm_password: String,
    /// Defaults to [`crate::users::validation::DEFAULT_PROFILE_ID`].
    pub profile_id: Option<i64>,
}

/// Body of `POST /usuarios/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewUser {
    #[serde(rename = "nome_usuario")]
    pub name: String,
    pub email: String,
    #[serde(rename = "senha_usuario")]
    pub password: String,
    #[serde(rename = "apelido_steam")]
    pub nickname: String,
    #[serde(rename = "id_perfil")]
    pub profile_id: i64,
}

/// Body of `PUT /usuarios/{id}`; unset fields are left out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserUpdate {
    #[serde(rename = "nome_usuario", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "senha_usuario", skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(rename = "apelido_steam", skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(rename = "id_perfil", skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}
