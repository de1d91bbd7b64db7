//! Authentication module for the admin bearer credential.
//!
//! This module provides:
//! - `Session`: the single credential held by the process
//! - `TokenStore`: where that credential survives restarts (file, OS keychain,
//!   or memory)
//!
//! The token is stored as a plain string under the fixed key `admin_token`.

pub mod credentials;
pub mod session;

pub use credentials::{FileTokenStore, KeyringTokenStore, MemoryTokenStore, TokenStore, TOKEN_KEY};
pub use session::Session;
