pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod logins;
pub mod session;
pub mod storage;
mod timestamp;
pub mod users;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use session::{Session, SessionStore};
