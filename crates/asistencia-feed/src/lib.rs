//! Provider feed ingestion: CSV transport, parsing, normalization and the
//! catalog loader with seed fallback.

pub mod client;
pub mod csv;
pub mod error;
pub mod loader;
pub mod normalize;
mod retry;

pub use client::FeedClient;
pub use error::FeedError;
pub use loader::CatalogLoader;
pub use normalize::{normalize_row, providers_from_csv};
