//! SFM HTTP client
//!
//! Talks to the records backend: source, version and translation lookups
//! for a field, the state-changing reverts and translation posts, record
//! saves and the listing search.
//!
//! # Example
//!
//! ```no_run
//! use sfm_client::{ClientConfig, HttpBackend};
//! use sfm_domain::{FieldBackend, FieldKey, RecordId, RecordRef};
//!
//! # async fn run() -> Result<(), sfm_client::ClientError> {
//! let backend = HttpBackend::new(ClientConfig::new("http://localhost:8000"))?;
//! let key = FieldKey::new(RecordRef::new("person", RecordId::parse("7")), "PersonName");
//! let listing = backend.fetch_sources(&key).await?;
//! println!("{} source(s)", listing.sources.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod config;
mod error;
mod routes;
mod search;
pub mod wire;

pub use client::HttpBackend;
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_LANG, DEFAULT_TIMEOUT_SECS};
pub use error::ClientError;
pub use routes::Routes;
pub use search::{SearchQuery, SearchResults, ORDER_ASC, ORDER_DESC};
