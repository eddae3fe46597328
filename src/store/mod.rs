//! In-memory storage module
//!
//! Provides the typed value model, the store itself, and the background
//! expiration sweeper. This module is independent of the HTTP façade
//! (loose coupling).

mod entry;
mod error;
mod memory;
mod sweeper;
mod value;

pub use entry::Entry;
pub use error::StoreError;
pub use memory::{Store, StoreStats};
pub use sweeper::Sweeper;
pub use value::Value;
