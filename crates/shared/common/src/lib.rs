//! Common utilities shared across the workspace.
//!
//! This crate provides:
//! - The application error taxonomy and its gRPC status mapping
//! - Configuration structures
//! - A bounded retry combinator for fallible async operations

pub mod config;
pub mod error;
pub mod retry;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
pub use retry::with_retries;
