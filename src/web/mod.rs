//! Web interface module
//!
//! Provides the HTTP façade over the store: JSON request/response
//! encoding, routing, and the mapping from store errors to status codes.

mod handlers;
mod server;

pub use handlers::{ApiResponse, SetRequest, SystemStats, ValueBody};
pub use server::run_web_server;
