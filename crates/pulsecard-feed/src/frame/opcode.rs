//! Gateway opcodes.

/// Server → client event frame (`t` names the event).
pub const EVENT: u8 = 0;
/// Server → client hello, carries `d.heartbeat_interval`.
pub const HELLO: u8 = 1;
/// Client → server subscribe request.
pub const SUBSCRIBE: u8 = 2;
/// Client → server heartbeat.
pub const HEARTBEAT: u8 = 3;

/// Event name for the full snapshot delivered after subscribing.
pub const EVENT_INIT_STATE: &str = "INIT_STATE";
/// Event name for each subsequent replacement snapshot.
pub const EVENT_PRESENCE_UPDATE: &str = "PRESENCE_UPDATE";
