//! Short provider-type suggestions from a generative model.
//!
//! [`AssistClient::suggest`] always returns displayable text: a suggestion,
//! an advisory when no key is configured, or a fixed apology on failure.

pub mod client;
pub mod error;
mod types;

pub use client::{AssistClient, APOLOGY, MISSING_KEY_ADVISORY};
pub use error::AssistError;
