//! HTTP transport for the tracker.

pub mod error;
pub mod server;
pub mod tasks;
pub mod users;

pub use server::{AppState, ServerHandle, build_router, start_server};
