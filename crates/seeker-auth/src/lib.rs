//! Bearer credential lifecycle for the Seeker search client.
//!
//! A [`TokenManager`] owns the single active [`Credential`]. It reads a
//! persisted token before falling back to an interactive [`TokenPrompt`],
//! stamps new tokens with a one hour expiry, and decorates outgoing requests
//! with the `Authorization: Bearer` header.
//!
//! # Components
//!
//! - [`credential`]: credential value, expiry display, clock abstraction
//! - [`store`]: key/value persistence (`credentials.json` or in-memory)
//! - [`prompt`]: pluggable interactive acquisition
//! - [`token_manager`]: acquire / clear / attach state machine

pub mod credential;
pub mod error;
pub mod prompt;
pub mod store;
pub mod token_manager;

pub use credential::{Clock, Credential, ManualClock, SystemClock, TokenInfo};
pub use error::{AuthError, Result};
pub use prompt::{NonInteractivePrompt, StaticTokenPrompt, TokenPrompt};
pub use store::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use token_manager::{AuthState, EXPIRY_KEY, TOKEN_KEY, TOKEN_TTL_MS, TokenManager};
