//! Reactive presence snapshot store.
//!
//! Holds the latest decoded [`PresenceSnapshot`] and exposes it through a
//! watch channel so multiple independent consumers can observe replacements
//! without re-triggering network activity. The store never owns a
//! connection; it is a sink driven by the transport.

use tokio::sync::watch;

use crate::presence::activity::Activity;
use crate::presence::snapshot::PresenceSnapshot;

/// Holds the latest presence snapshot for one subject.
#[derive(Debug)]
pub struct PresenceStore {
    tx: watch::Sender<Option<PresenceSnapshot>>,
}

impl PresenceStore {
    /// Create an empty store ("no data yet").
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Replace the held snapshot and notify all subscribers.
    ///
    /// The replacement is atomic: a subscriber observes either the previous
    /// snapshot or the new one in full, never a mix.
    pub fn update(&self, snapshot: PresenceSnapshot) {
        self.tx.send_replace(Some(snapshot));
    }

    /// Drop the held snapshot (subscription torn down).
    pub fn clear(&self) {
        self.tx.send_replace(None);
    }

    /// The latest snapshot, or `None` before the first push.
    pub fn current(&self) -> Option<PresenceSnapshot> {
        self.tx.borrow().clone()
    }

    /// Subscribe to snapshot replacements.
    ///
    /// Dropping the receiver is the unsubscribe; the store itself keeps no
    /// per-consumer state.
    pub fn subscribe(&self) -> watch::Receiver<Option<PresenceSnapshot>> {
        self.tx.subscribe()
    }

    /// Activities suitable for "now playing" rendering, custom status
    /// excluded.
    pub fn now_playing(&self) -> Vec<Activity> {
        self.tx
            .borrow()
            .as_ref()
            .map(|s| s.now_playing().cloned().collect())
            .unwrap_or_default()
    }

    /// The custom status message, if one is set.
    pub fn custom_status(&self) -> Option<String> {
        self.tx
            .borrow()
            .as_ref()
            .and_then(|s| s.custom_status().map(str::to_string))
    }
}

impl Default for PresenceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presence::status::PresenceStatus;

    fn snapshot(status: PresenceStatus, activity_ids: &[&str]) -> PresenceSnapshot {
        PresenceSnapshot {
            status,
            activities: activity_ids
                .iter()
                .map(|id| Activity {
                    id: id.to_string(),
                    name: id.to_string(),
                    ..Default::default()
                })
                .collect(),
            listening_to_spotify: false,
        }
    }

    #[test]
    fn starts_empty() {
        let store = PresenceStore::new();
        assert!(store.current().is_none());
        assert!(store.now_playing().is_empty());
    }

    #[test]
    fn update_replaces_wholesale() {
        let store = PresenceStore::new();
        store.update(snapshot(PresenceStatus::Online, &["a", "b"]));
        store.update(snapshot(PresenceStatus::Idle, &["c"]));

        let current = store.current().unwrap();
        assert_eq!(current.status, PresenceStatus::Idle);
        let ids: Vec<_> = current.activities.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["c"]);
    }

    #[test]
    fn now_playing_filters_custom_status() {
        let store = PresenceStore::new();
        store.update(snapshot(PresenceStatus::Online, &["custom", "spotify:1"]));

        let playing = store.now_playing();
        assert_eq!(playing.len(), 1);
        assert_eq!(playing[0].id, "spotify:1");
    }

    #[test]
    fn custom_status_accessor() {
        let store = PresenceStore::new();
        let mut snap = snapshot(PresenceStatus::Online, &["custom"]);
        snap.activities[0].state = Some("afk".to_string());
        store.update(snap);

        assert_eq!(store.custom_status().as_deref(), Some("afk"));
    }

    #[tokio::test]
    async fn subscribers_see_replacements() {
        let store = PresenceStore::new();
        let mut rx = store.subscribe();

        store.update(snapshot(PresenceStatus::Dnd, &["x"]));
        rx.changed().await.unwrap();

        let seen = rx.borrow_and_update().clone().unwrap();
        assert_eq!(seen.status, PresenceStatus::Dnd);
        assert_eq!(seen.activities.len(), 1);
    }

    #[test]
    fn clear_resets_to_no_data() {
        let store = PresenceStore::new();
        store.update(snapshot(PresenceStatus::Online, &["a"]));
        store.clear();
        assert!(store.current().is_none());
    }
}
