//! Inbound frame envelope and decoded server events.

use serde::Deserialize;

use pulsecard_core::{AppError, AppResult};

use crate::presence::snapshot::PresenceSnapshot;

use super::opcode;

/// Raw inbound frame as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayFrame {
    /// Opcode.
    pub op: u8,
    /// Event name, present on `op = 0` frames.
    #[serde(default)]
    pub t: Option<String>,
    /// Payload.
    #[serde(default)]
    pub d: Option<serde_json::Value>,
}

/// Payload of the hello frame.
#[derive(Debug, Clone, Deserialize)]
struct HelloPayload {
    heartbeat_interval: u64,
}

/// A decoded server frame the transport acts on.
#[derive(Debug, Clone)]
pub enum ServerEvent {
    /// Server hello; the client must adopt this heartbeat interval.
    Hello {
        /// Interval between heartbeats in milliseconds.
        heartbeat_interval_ms: u64,
    },
    /// Full snapshot delivered once after subscribing.
    InitState(PresenceSnapshot),
    /// Replacement snapshot delivered on every subsequent push.
    PresenceUpdate(PresenceSnapshot),
}

impl ServerEvent {
    /// Decode a raw text frame.
    ///
    /// Returns `Ok(None)` for frames the client does not act on (unknown
    /// opcodes or event names); returns an error for frames that claim a
    /// known shape but fail to parse.
    pub fn decode(text: &str) -> AppResult<Option<Self>> {
        let frame: GatewayFrame = serde_json::from_str(text)?;

        match frame.op {
            opcode::HELLO => {
                let d = frame
                    .d
                    .ok_or_else(|| AppError::decode("hello frame missing payload"))?;
                let hello: HelloPayload = serde_json::from_value(d)?;
                Ok(Some(Self::Hello {
                    heartbeat_interval_ms: hello.heartbeat_interval,
                }))
            }
            opcode::EVENT => {
                let Some(name) = frame.t.as_deref() else {
                    return Ok(None);
                };
                match name {
                    opcode::EVENT_INIT_STATE => {
                        let d = frame
                            .d
                            .ok_or_else(|| AppError::decode("INIT_STATE missing payload"))?;
                        Ok(Some(Self::InitState(serde_json::from_value(d)?)))
                    }
                    opcode::EVENT_PRESENCE_UPDATE => {
                        let d = frame
                            .d
                            .ok_or_else(|| AppError::decode("PRESENCE_UPDATE missing payload"))?;
                        Ok(Some(Self::PresenceUpdate(serde_json::from_value(d)?)))
                    }
                    _ => Ok(None),
                }
            }
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_hello() {
        let event = ServerEvent::decode(r#"{"op":1,"d":{"heartbeat_interval":30000}}"#)
            .unwrap()
            .unwrap();
        match event {
            ServerEvent::Hello {
                heartbeat_interval_ms,
            } => assert_eq!(heartbeat_interval_ms, 30000),
            other => panic!("expected hello, got {other:?}"),
        }
    }

    #[test]
    fn decodes_init_state() {
        let text = r#"{"op":0,"t":"INIT_STATE","d":{"discord_status":"online","activities":[]}}"#;
        let event = ServerEvent::decode(text).unwrap().unwrap();
        assert!(matches!(event, ServerEvent::InitState(_)));
    }

    #[test]
    fn decodes_presence_update() {
        let text =
            r#"{"op":0,"t":"PRESENCE_UPDATE","d":{"discord_status":"idle","activities":[]}}"#;
        let event = ServerEvent::decode(text).unwrap().unwrap();
        assert!(matches!(event, ServerEvent::PresenceUpdate(_)));
    }

    #[test]
    fn ignores_unknown_event_names() {
        let text = r#"{"op":0,"t":"SOMETHING_ELSE","d":{}}"#;
        assert!(ServerEvent::decode(text).unwrap().is_none());
    }

    #[test]
    fn ignores_unknown_opcodes() {
        assert!(ServerEvent::decode(r#"{"op":9}"#).unwrap().is_none());
    }

    #[test]
    fn malformed_frame_is_an_error() {
        assert!(ServerEvent::decode("not json").is_err());
        assert!(ServerEvent::decode(r#"{"op":1}"#).is_err());
    }
}
