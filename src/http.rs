use std::time::Duration;

use anyhow::Context;
use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Client, Method, StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error};

use crate::error::ApiError;

/// Headers and optional JSON body for one request.
#[derive(Debug, Default, Clone)]
pub struct RequestOptions {
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl RequestOptions {
    pub fn json<B: Serialize + ?Sized>(body: &B) -> Result<Self, ApiError> {
        let bytes = serde_json::to_vec(body)
            .map_err(|e| ApiError::Invalid(format!("request body not serializable: {}", e)))?;
        Ok(Self {
            headers: HeaderMap::new(),
            body: Some(bytes),
        })
    }

    pub fn header(mut self, name: reqwest::header::HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Single funnel for every network call against one base origin.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder.build().context("build http client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        match self.send(method.clone(), path, options).await {
            Ok(v) => Ok(v),
            Err(e) => {
                error!(error = %e, %method, path, "api request failed");
                Err(e)
            }
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::GET, path, RequestOptions::default()).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        // caller-supplied values replace defaults of the same name
        headers.extend(options.headers);

        debug!(%method, %url, has_body = options.body.is_some(), "api request");
        let mut req = self.client.request(method, &url).headers(headers);
        if let Some(body) = options.body {
            req = req.body(body);
        }

        let res = req.send().await.map_err(ApiError::from_transport)?;
        let status = res.status();
        let body = res.bytes().await.map_err(ApiError::from_transport)?;
        debug!(%status, len = body.len(), "api response");

        if !status.is_success() {
            return Err(ApiError::ServerRejected {
                status: status.as_u16(),
                message: rejection_message(status, &body),
            });
        }

        serde_json::from_slice(&body).map_err(|e| ApiError::DecodeFailure(e.to_string()))
    }
}

/// Message carried by a non-2xx response: the `detail` field when the body has one.
pub(crate) fn rejection_message(status: StatusCode, body: &[u8]) -> String {
    let detail = serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").cloned())
        .filter(is_present);

    match detail {
        Some(serde_json::Value::String(s)) => s,
        Some(other) => other.to_string(),
        None => format!("HTTP error! status: {}", status.as_u16()),
    }
}

/// `null`, `false`, `0` and `""` count as no detail at all.
fn is_present(detail: &serde_json::Value) -> bool {
    use serde_json::Value;
    match detail {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
