//! In-process fake of the storefront backend, served by axum on a random port.

#![allow(dead_code)]

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    body::Body,
    extract::{Path, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use storefront::{http::HttpClient, storage::MemoryStorage, ApiClient, SessionStore};

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub body: Vec<u8>,
    pub content_type: Option<String>,
    pub authorization: Option<String>,
}

#[derive(Default)]
struct Inner {
    users: Vec<(Value, String)>,
    logins: Vec<Value>,
    requests: Vec<Recorded>,
}

#[derive(Clone, Default)]
pub struct Backend {
    inner: Arc<Mutex<Inner>>,
}

impl Backend {
    pub fn requests(&self) -> Vec<Recorded> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.inner.lock().unwrap().requests.len()
    }

    pub fn last_request(&self) -> Recorded {
        self.requests().pop().expect("at least one request")
    }

    /// Seeds a user directly, returning its id.
    pub fn seed_user(&self, name: &str, email: &str, password: &str) -> i64 {
        let id = self.inner.lock().unwrap().users.len() as i64 + 1;
        self.seed_user_with_id(id, name, email, password);
        id
    }

    pub fn seed_user_with_id(&self, id: i64, name: &str, email: &str, password: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.users.push((
            json!({
                "id_usuario": id,
                "nome_usuario": name,
                "email": email,
                "apelido_steam": name.to_lowercase(),
                "id_perfil": 1,
                "data_criacao": "2024-05-01T10:30:00",
                "ultimo_login": null
            }),
            password.to_string(),
        ));
    }
}

fn detail(status: StatusCode, msg: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "detail": msg })))
}

type Reply = Result<Json<Value>, (StatusCode, Json<Value>)>;

async fn record(State(backend): State<Backend>, req: Request, next: Next) -> Response {
    let (parts, body) = req.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();
    let header_str = |name: header::HeaderName| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let rec = Recorded {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        body: bytes.to_vec(),
        content_type: header_str(header::CONTENT_TYPE),
        authorization: header_str(header::AUTHORIZATION),
    };
    backend.inner.lock().unwrap().requests.push(rec);
    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

fn check_credentials(backend: &Backend, body: &Value) -> Option<Value> {
    let email = body.get("email")?.as_str()?;
    let password = body.get("password")?.as_str()?;
    let inner = backend.inner.lock().unwrap();
    inner
        .users
        .iter()
        .find(|(u, pw)| u["email"] == email && pw == password)
        .map(|(u, _)| u.clone())
}

async fn login(State(backend): State<Backend>, Json(body): Json<Value>) -> Json<Value> {
    let Some(user) = check_credentials(&backend, &body) else {
        return Json(json!({ "success": false, "message": "Email ou senha incorretos" }));
    };
    let mut inner = backend.inner.lock().unwrap();
    let id = inner.logins.len() as i64 + 1;
    inner.logins.push(json!({
        "id_login": id,
        "ip_login": "127.0.0.1",
        "user_agent": "storefront-tests",
        "data_login": "2024-05-02T08:00:00.250000",
        "id_usuario": user["id_usuario"]
    }));
    Json(json!({
        "success": true,
        "message": "Login realizado com sucesso",
        "user_id": user["id_usuario"],
        "user_name": user["nome_usuario"]
    }))
}

async fn verify(State(backend): State<Backend>, Json(body): Json<Value>) -> Json<Value> {
    match check_credentials(&backend, &body) {
        Some(user) => Json(json!({
            "success": true,
            "message": "Credenciais válidas",
            "user_id": user["id_usuario"],
            "user_name": user["nome_usuario"]
        })),
        None => Json(json!({ "success": false, "message": "Email ou senha incorretos" })),
    }
}

async fn create_user(
    State(backend): State<Backend>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let mut inner = backend.inner.lock().unwrap();
    if inner.users.iter().any(|(u, _)| u["email"] == body["email"]) {
        return Err(detail(StatusCode::BAD_REQUEST, "Email already registered"));
    }
    let id = inner.users.len() as i64 + 1;
    let user = json!({
        "id_usuario": id,
        "nome_usuario": body["nome_usuario"],
        "email": body["email"],
        "apelido_steam": body["apelido_steam"],
        "id_perfil": body["id_perfil"],
        "data_criacao": "2024-05-01T10:30:00",
        "ultimo_login": null
    });
    let password = body["senha_usuario"].as_str().unwrap_or_default().to_string();
    inner.users.push((user.clone(), password));
    Ok((StatusCode::CREATED, Json(user)))
}

async fn list_users(State(backend): State<Backend>) -> Json<Value> {
    let inner = backend.inner.lock().unwrap();
    Json(Value::Array(inner.users.iter().map(|(u, _)| u.clone()).collect()))
}

async fn get_user(State(backend): State<Backend>, Path(id): Path<i64>) -> Reply {
    let inner = backend.inner.lock().unwrap();
    inner
        .users
        .iter()
        .find(|(u, _)| u["id_usuario"] == id)
        .map(|(u, _)| Json(u.clone()))
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "User not found"))
}

async fn update_user(
    State(backend): State<Backend>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Reply {
    let mut inner = backend.inner.lock().unwrap();
    let Some((user, password)) = inner.users.iter_mut().find(|(u, _)| u["id_usuario"] == id)
    else {
        return Err(detail(StatusCode::NOT_FOUND, "User not found"));
    };
    if let Some(fields) = body.as_object() {
        for (k, v) in fields {
            if k == "senha_usuario" {
                *password = v.as_str().unwrap_or_default().to_string();
            } else {
                user[k.as_str()] = v.clone();
            }
        }
    }
    Ok(Json(user.clone()))
}

async fn delete_user(State(backend): State<Backend>, Path(id): Path<i64>) -> Reply {
    let mut inner = backend.inner.lock().unwrap();
    let before = inner.users.len();
    inner.users.retain(|(u, _)| u["id_usuario"] != id);
    if inner.users.len() == before {
        return Err(detail(StatusCode::NOT_FOUND, "User not found"));
    }
    Ok(Json(json!({ "message": "User deleted successfully" })))
}

async fn list_logins(State(backend): State<Backend>) -> Json<Value> {
    Json(Value::Array(backend.inner.lock().unwrap().logins.clone()))
}

async fn get_login(State(backend): State<Backend>, Path(id): Path<i64>) -> Reply {
    let inner = backend.inner.lock().unwrap();
    inner
        .logins
        .iter()
        .find(|l| l["id_login"] == id)
        .map(|l| Json(l.clone()))
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Login record not found"))
}

fn logins_of(backend: &Backend, user_id: i64) -> Value {
    let inner = backend.inner.lock().unwrap();
    Value::Array(
        inner
            .logins
            .iter()
            .filter(|l| l["id_usuario"] == user_id)
            .cloned()
            .collect(),
    )
}

async fn user_logins(State(backend): State<Backend>, Path(user_id): Path<i64>) -> Json<Value> {
    Json(logins_of(&backend, user_id))
}

/// Tokens look like `token-<user id>`.
async fn my_logins(State(backend): State<Backend>, req: Request) -> Reply {
    let user_id = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer token-"))
        .and_then(|id| id.parse::<i64>().ok())
        .ok_or_else(|| detail(StatusCode::UNAUTHORIZED, "Not authenticated"))?;
    Ok(Json(logins_of(&backend, user_id)))
}

async fn not_json() -> impl IntoResponse {
    (StatusCode::OK, "plain text, not json")
}

async fn gateway_down() -> impl IntoResponse {
    (StatusCode::BAD_GATEWAY, "<html>bad gateway</html>")
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(5)).await;
    Json(json!({}))
}

pub fn router(backend: Backend) -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/verify", post(verify))
        .route("/usuarios/", post(create_user).get(list_users))
        .route(
            "/usuarios/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/logins/", get(list_logins))
        .route("/logins/:id", get(get_login))
        .route("/logins/user/:user_id", get(user_logins))
        .route("/logins/me/logins", get(my_logins))
        .route("/test/not-json", get(not_json))
        .route("/test/gateway", get(gateway_down))
        .route("/test/slow", get(slow))
        .layer(middleware::from_fn_with_state(backend.clone(), record))
        .layer(TraceLayer::new_for_http())
        .with_state(backend)
}

/// Starts the fake backend and returns its base URL.
pub async fn spawn_backend() -> (String, Backend) {
    let backend = Backend::default();
    let app = router(backend.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), backend)
}

/// Client against the fake backend with in-memory session storage.
pub async fn client_for(base_url: &str) -> ApiClient {
    let http = HttpClient::new(base_url, None).unwrap();
    let session = SessionStore::open(Arc::new(MemoryStorage::default()))
        .await
        .unwrap();
    ApiClient::from_parts(http, session)
}

pub async fn spawn_with_client() -> (ApiClient, Backend) {
    let (base, backend) = spawn_backend().await;
    (client_for(&base).await, backend)
}
