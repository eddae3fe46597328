//! TypedKV - an embeddable, in-process, typed key-value store with
//! per-key TTL expiration, exposed behind a thin HTTP façade
//!
//! The crate is organized around a small set of modules:
//! - `store` owns the value model, the locked map and the sweeper
//! - `web` is the HTTP façade layered on top of the store
//! - `config` holds service configuration

pub mod config;
pub mod store;
pub mod web;

/// Re-export commonly used types
pub use config::Config;
pub use store::{Entry, Store, StoreError, StoreStats, Sweeper, Value};
