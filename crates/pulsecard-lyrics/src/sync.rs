//! Track-change handling and the active-line sync loop.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use pulsecard_feed::Activity;

use crate::lrc::{current_line, LyricLine};
use crate::provider::{LyricsProvider, TrackQuery};

/// One track's lifetime: its identity key and the teardown token for the
/// fetch and sync loop started for it.
struct TrackEpoch {
    key: String,
    cancel: CancellationToken,
}

/// Keeps lyric state in step with the currently playing track.
///
/// Feed one [`on_activity_changed`](Self::on_activity_changed) call per
/// observed activity change; lyric lines and the active line index come
/// back through watch channels. Exactly one fetch is issued per distinct
/// track, and at most one sync loop runs at a time.
pub struct LyricsSync {
    provider: Arc<dyn LyricsProvider>,
    tick: Duration,
    lines_tx: watch::Sender<Arc<Vec<LyricLine>>>,
    line_tx: watch::Sender<Option<usize>>,
    epoch: Mutex<Option<TrackEpoch>>,
}

impl LyricsSync {
    /// Create a synchronizer that re-evaluates the active line every
    /// `tick` while a track with lyrics is playing.
    pub fn new(provider: Arc<dyn LyricsProvider>, tick: Duration) -> Self {
        let (lines_tx, _) = watch::channel(Arc::new(Vec::new()));
        let (line_tx, _) = watch::channel(None);
        Self {
            provider,
            tick,
            lines_tx,
            line_tx,
            epoch: Mutex::new(None),
        }
    }

    /// React to the current activity changing.
    ///
    /// A non-music activity (or none at all) clears lyric state. A music
    /// activity whose track key matches the previous call is a no-op; a
    /// new key resets state immediately, cancels the previous track's sync
    /// loop, and issues exactly one fetch for the new track.
    pub fn on_activity_changed(&self, activity: Option<&Activity>) {
        let mut epoch = self.epoch.lock().unwrap_or_else(PoisonError::into_inner);

        let Some(activity) = activity.filter(|a| a.is_spotify()) else {
            self.reset(&mut epoch);
            return;
        };
        let Some(key) = activity.track_key() else {
            self.reset(&mut epoch);
            return;
        };

        if epoch.as_ref().is_some_and(|e| e.key == key) {
            return;
        }

        // Track changed: prior lyric state is discarded before the new
        // fetch resolves.
        self.reset(&mut epoch);

        let cancel = CancellationToken::new();
        let query = TrackQuery::from_activity(activity);
        let start_ms = activity.timestamps.and_then(|t| t.start);

        tokio::spawn(run_track(
            Arc::clone(&self.provider),
            query,
            key.to_string(),
            start_ms,
            self.tick,
            self.lines_tx.clone(),
            self.line_tx.clone(),
            cancel.clone(),
        ));

        *epoch = Some(TrackEpoch {
            key: key.to_string(),
            cancel,
        });
    }

    /// The current track's lyric lines (empty while loading or absent).
    pub fn lines(&self) -> Arc<Vec<LyricLine>> {
        self.lines_tx.borrow().clone()
    }

    /// Watch lyric line replacements.
    pub fn watch_lines(&self) -> watch::Receiver<Arc<Vec<LyricLine>>> {
        self.lines_tx.subscribe()
    }

    /// The active line index, `None` before the first line's time.
    pub fn current_line_index(&self) -> Option<usize> {
        *self.line_tx.borrow()
    }

    /// Watch active-line changes. Notified exactly once per index change,
    /// so a consumer can scroll a lyric display without redundant calls.
    pub fn watch_line(&self) -> watch::Receiver<Option<usize>> {
        self.line_tx.subscribe()
    }

    fn reset(&self, epoch: &mut Option<TrackEpoch>) {
        if let Some(previous) = epoch.take() {
            previous.cancel.cancel();
        }
        self.lines_tx.send_if_modified(|lines| {
            if lines.is_empty() {
                false
            } else {
                *lines = Arc::new(Vec::new());
                true
            }
        });
        self.line_tx.send_if_modified(|current| current.take().is_some());
    }
}

impl Drop for LyricsSync {
    fn drop(&mut self) {
        let mut epoch = self.epoch.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = epoch.take() {
            previous.cancel.cancel();
        }
    }
}

/// Fetch one track's lyrics, then keep the active line current until
/// cancelled.
#[allow(clippy::too_many_arguments)]
async fn run_track(
    provider: Arc<dyn LyricsProvider>,
    query: TrackQuery,
    key: String,
    start_ms: Option<i64>,
    tick: Duration,
    lines_tx: watch::Sender<Arc<Vec<LyricLine>>>,
    line_tx: watch::Sender<Option<usize>>,
    cancel: CancellationToken,
) {
    let lines = match provider.fetch(&query).await {
        Ok(lines) => lines,
        Err(e) => {
            warn!(track = %key, error = %e, "Lyrics fetch failed, showing none");
            Vec::new()
        }
    };

    if cancel.is_cancelled() {
        return;
    }

    debug!(track = %key, lines = lines.len(), "Lyrics loaded");
    let lines = Arc::new(lines);
    lines_tx.send_replace(Arc::clone(&lines));

    // Without a start instant there is no elapsed time to sync against;
    // without lines there is nothing to highlight.
    let Some(start_ms) = start_ms else { return };
    if lines.is_empty() {
        return;
    }

    let mut timer = interval(tick);
    timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = timer.tick() => {
                if cancel.is_cancelled() {
                    return;
                }
                let elapsed_ms = Utc::now().timestamp_millis() - start_ms;
                let index = current_line(&lines, elapsed_ms);
                line_tx.send_if_modified(|current| {
                    if *current != index {
                        *current = index;
                        true
                    } else {
                        false
                    }
                });
            }
        }
    }
}
