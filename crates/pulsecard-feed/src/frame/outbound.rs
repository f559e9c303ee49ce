//! Client → server frame construction.

use serde_json::json;

use pulsecard_core::SubjectId;

use super::opcode;

/// Frames the client sends to the feed.
#[derive(Debug, Clone)]
pub enum ClientFrame {
    /// Subscribe to a single subject's presence.
    Subscribe {
        /// Subject to watch.
        subject_id: SubjectId,
    },
    /// Keep-alive heartbeat.
    Heartbeat,
}

impl ClientFrame {
    /// Encode the frame as its JSON wire text.
    pub fn to_json(&self) -> String {
        match self {
            Self::Subscribe { subject_id } => json!({
                "op": opcode::SUBSCRIBE,
                "d": { "subscribe_to_id": subject_id.as_str() },
            })
            .to_string(),
            Self::Heartbeat => json!({ "op": opcode::HEARTBEAT }).to_string(),
        }
    }
}
