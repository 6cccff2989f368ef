//! # cache-client - HTTP client for the Cache service
//!
//! This crate provides a small async client for a remote key/value cache. Entries are
//! addressed by a key, a namespace and a scope, and values are opaque bytes.
//!
//! ## Features
//!
//! - Store and retrieve raw values over the `/v1/cache` HTTP API
//! - Structured addressing with [`CacheKey`]
//! - Typed errors with a coarse [`Kind`] for branching (e.g. treat `NotFound` as absent)
//! - Pluggable status-to-kind mapping via [`StatusPolicy`]
//! - Injectable `reqwest` transport for connection pooling and testing
//! - Configuration from code, environment variables or a JSON file
//!
//! ## Example
//!
//! ```rust,no_run
//! use cache_client::{CacheKey, Client};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new("http://localhost:8080");
//!     let key = CacheKey::new("k1", "ns1", "default");
//!
//!     client.set(&key, "hello").await?;
//!
//!     match client.get(&key).await {
//!         Ok(value) => println!("{}", String::from_utf8_lossy(&value)),
//!         Err(e) if e.is_not_found() => println!("absent"),
//!         Err(e) => return Err(e.into()),
//!     }
//!     Ok(())
//! }
//! ```

mod client;
pub mod config;
mod error;
mod key;
pub mod status;

pub use client::{CACHE_PATH, Client, ClientBuilder};
pub use config::ClientConfig;
pub use error::{Error, Kind, Result};
pub use key::{CacheKey, KEY_HEADER, NAMESPACE_HEADER, SCOPE_HEADER};
pub use status::{DefaultStatusPolicy, StatusPolicy};

/// Re-export of the commonly used types
pub mod prelude {
    pub use crate::client::Client;
    pub use crate::error::Error;
    pub use crate::error::Kind;
    pub use crate::error::Result;
    pub use crate::key::CacheKey;
}
