//! # pulsecard-feed
//!
//! Presence feed client for pulsecard. Provides:
//!
//! - A reconnecting WebSocket transport with server-driven heartbeat and
//!   capped exponential backoff
//! - Typed gateway frames (subscribe, heartbeat, hello, state events)
//! - The presence snapshot model (status, activities, assets)
//! - A reactive snapshot store multiple consumers can watch

pub mod frame;
pub mod presence;
pub mod store;
pub mod transport;

pub use presence::activity::{Activity, ActivityKind};
pub use presence::snapshot::PresenceSnapshot;
pub use presence::status::PresenceStatus;
pub use store::PresenceStore;
pub use transport::client::FeedClient;
pub use transport::state::ConnectionState;
