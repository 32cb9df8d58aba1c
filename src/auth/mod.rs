//! Login, logout and credential verification.

pub mod dto;
mod services;

pub use dto::{LoginResponse, LogoutResponse};
