//! Typed async client for the homepage blog REST API.
//!
//! Every endpoint answers with a `{success, response, error}` envelope;
//! [`ApiClient`] unwraps it into either the payload or an [`ApiError`].

mod client;
mod dto;
mod errors;

pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use dto::{
    ApiEnvelope, ApiErrorBody, CategoryRecord, CategoryWithPostsCount,
    LoginResult,
};
pub use errors::{ApiError, Result};
