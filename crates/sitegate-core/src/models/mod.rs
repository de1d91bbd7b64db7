//! Data models for the website backend.
//!
//! This module contains the payloads the backend returns and accepts:
//!
//! - `Project`, `Client`: portfolio entries shown on the landing page
//! - `Contact`, `ContactSubmission`: contact form entries
//! - `Subscriber`: newsletter signups
//! - `LoginResponse`, `VerifyResponse`, `MessageResponse`: admin auth and
//!   acknowledgement payloads

pub mod auth;
pub mod client;
pub mod contact;
pub mod newsletter;
pub mod project;

pub use auth::{LoginRequest, LoginResponse, MessageResponse, VerifiedUser, VerifyResponse};
pub use client::Client;
pub use contact::{Contact, ContactSubmission};
pub use newsletter::{NewsletterSignup, Subscriber};
pub use project::Project;
