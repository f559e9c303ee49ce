//! Reconnecting socket transport.

pub mod backoff;
pub mod client;
pub mod state;

pub use backoff::BackoffPolicy;
pub use client::FeedClient;
pub use state::ConnectionState;
