//! Read-only login audit queries.

pub mod dto;
mod services;

pub use dto::{LoginRecord, SessionToken};
