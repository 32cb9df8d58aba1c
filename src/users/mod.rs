//! Signup and user record CRUD.

pub mod dto;
mod services;
pub mod validation;

pub use dto::{DeleteResponse, NewUser, SignupForm, User, UserUpdate};
