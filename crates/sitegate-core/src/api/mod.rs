//! Request gateway for the website backend.
//!
//! This module provides the `ApiClient`, which every public-page and
//! admin-panel operation goes through. It attaches the bearer credential
//! when asked to, picks the body encoding (JSON or multipart), and folds
//! every failure into a single `ApiError`.

pub mod client;
pub mod error;
pub mod request;

pub use client::ApiClient;
pub use error::ApiError;
pub use request::{FormPart, MultipartForm, RequestBody, RequestOptions};
