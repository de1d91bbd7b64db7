//! sitegate-core - client library for the business website backend.
//!
//! The website's public pages and admin panel talk to one JSON/REST backend.
//! This crate holds everything they share:
//!
//! - `api`: the request gateway (`ApiClient`) and its error type
//! - `auth`: the bearer-token session and where it is persisted
//! - `models`: payloads returned by the backend
//! - `forms`: contact, newsletter and project/client form validation
//! - `landing`: contact form and newsletter signup flow
//! - `admin`: login flow and admin dashboard loading
//! - `config`: base URL and credential backend resolution

pub mod admin;
pub mod api;
pub mod auth;
pub mod config;
pub mod forms;
pub mod landing;
pub mod models;

pub use api::{ApiClient, ApiError, RequestBody, RequestOptions};
pub use auth::Session;
pub use config::Config;
