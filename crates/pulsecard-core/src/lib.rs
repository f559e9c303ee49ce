//! # pulsecard-core
//!
//! Core crate for pulsecard. Contains configuration schemas, the subject
//! identifier type, and the unified error system.
//!
//! This crate has **no** internal dependencies on other pulsecard crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
pub use types::subject::SubjectId;
