//! Gateway wire frames.
//!
//! The feed speaks JSON frames with a numeric `op` field; event frames
//! additionally carry a `t` event name and a `d` payload.

pub mod envelope;
pub mod opcode;
pub mod outbound;

pub use envelope::{GatewayFrame, ServerEvent};
pub use outbound::ClientFrame;
