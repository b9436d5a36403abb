//! Time tracker library.
//!
//! Users own timed tasks; the service lists users with typed filters and
//! reports per-task durations over an optional time window.

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod logging;
pub mod query;
pub mod report;
pub mod service;
pub mod timestamp;
pub mod types;
pub mod validation;

pub use db::Database;
pub use error::{ErrorCode, TrackerError, TrackerResult};
pub use service::Tracker;
pub use validation::RequestValidator;
