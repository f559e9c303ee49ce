//! Reconnecting feed client.
//!
//! Owns at most one logical subscription at a time. Each `connect` spawns a
//! connection task for that subject; the task loops through socket sessions
//! and backoff waits until it is cancelled, the backoff budget is exhausted,
//! or a different subject supersedes it.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use pulsecard_core::config::feed::FeedConfig;
use pulsecard_core::SubjectId;

use crate::frame::envelope::ServerEvent;
use crate::frame::outbound::ClientFrame;
use crate::store::PresenceStore;

use super::backoff::BackoffPolicy;
use super::state::ConnectionState;

type FeedSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// How a socket session ended.
enum SessionEnd {
    /// Torn down intentionally; do not reconnect.
    Cancelled,
    /// Lost unexpectedly; reconnection policy applies.
    Lost,
}

/// A live subscription: the connection task plus its teardown token.
struct ActiveSubscription {
    subject_id: SubjectId,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl std::fmt::Debug for ActiveSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveSubscription")
            .field("subject_id", &self.subject_id)
            .finish_non_exhaustive()
    }
}

/// Client for the presence feed.
///
/// Fire-and-forget from the caller's perspective: connection errors are
/// logged and absorbed by the reconnect policy, never returned.
#[derive(Debug)]
pub struct FeedClient {
    config: FeedConfig,
    store: Arc<PresenceStore>,
    state_tx: watch::Sender<ConnectionState>,
    active: Mutex<Option<ActiveSubscription>>,
}

impl FeedClient {
    /// Create a client that feeds decoded snapshots into `store`.
    pub fn new(config: FeedConfig, store: Arc<PresenceStore>) -> Self {
        let (state_tx, _) = watch::channel(ConnectionState::ClosedClean);
        Self {
            config,
            store,
            state_tx,
            active: Mutex::new(None),
        }
    }

    /// Open (or keep) the subscription for `subject_id`.
    ///
    /// Idempotent: connecting to the already-watched subject while the
    /// connection task is alive is a no-op. A different subject tears the
    /// old subscription down first.
    pub fn connect(&self, subject_id: SubjectId) {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(current) = active.as_ref() {
            if current.subject_id == subject_id && !current.task.is_finished() {
                debug!(subject_id = %subject_id, "Already subscribed, ignoring connect");
                return;
            }
        }

        if let Some(previous) = active.take() {
            info!(subject_id = %previous.subject_id, "Superseding previous subscription");
            previous.cancel.cancel();
            previous.task.abort();
        }

        let cancel = CancellationToken::new();
        let task = tokio::spawn(run_subscription(
            self.config.clone(),
            subject_id.clone(),
            Arc::clone(&self.store),
            self.state_tx.clone(),
            cancel.clone(),
        ));

        *active = Some(ActiveSubscription {
            subject_id,
            cancel,
            task,
        });
    }

    /// Close the subscription, suppressing reconnection.
    ///
    /// Safe to call repeatedly and safe to call when never connected.
    pub fn disconnect(&self) {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(subscription) = active.take() {
            info!(subject_id = %subscription.subject_id, "Disconnecting feed");
            subscription.cancel.cancel();
        }
    }

    /// Current connection state.
    pub fn state(&self) -> ConnectionState {
        *self.state_tx.borrow()
    }

    /// Subscribe to connection state transitions.
    pub fn watch_state(&self) -> watch::Receiver<ConnectionState> {
        self.state_tx.subscribe()
    }

    /// The store this client feeds.
    pub fn store(&self) -> &Arc<PresenceStore> {
        &self.store
    }
}

impl Drop for FeedClient {
    fn drop(&mut self) {
        self.disconnect();
    }
}

/// Connection task: one socket session at a time, backoff between losses.
async fn run_subscription(
    config: FeedConfig,
    subject_id: SubjectId,
    store: Arc<PresenceStore>,
    state_tx: watch::Sender<ConnectionState>,
    cancel: CancellationToken,
) {
    let backoff = BackoffPolicy::new(
        Duration::from_millis(config.backoff_base_ms),
        config.max_reconnect_attempts,
    );
    let mut attempt: u32 = 0;

    loop {
        state_tx.send_replace(ConnectionState::Connecting);
        debug!(subject_id = %subject_id, url = %config.socket_url, "Opening feed socket");

        let connect = tokio::select! {
            _ = cancel.cancelled() => {
                state_tx.send_replace(ConnectionState::ClosedClean);
                return;
            }
            result = connect_async(config.socket_url.as_str()) => result,
        };

        match connect {
            Ok((socket, _response)) => {
                // Successful open resets the backoff budget.
                attempt = 0;
                state_tx.send_replace(ConnectionState::Open);
                info!(subject_id = %subject_id, "Feed socket open");

                match drive_socket(socket, &subject_id, &store, &config, &cancel).await {
                    SessionEnd::Cancelled => {
                        state_tx.send_replace(ConnectionState::ClosedClean);
                        info!(subject_id = %subject_id, "Feed socket closed");
                        return;
                    }
                    SessionEnd::Lost => {
                        warn!(subject_id = %subject_id, "Feed socket lost");
                    }
                }
            }
            Err(e) => {
                warn!(subject_id = %subject_id, error = %e, "Feed connect failed");
            }
        }

        if backoff.exhausted(attempt) {
            state_tx.send_replace(ConnectionState::Failed);
            warn!(
                subject_id = %subject_id,
                attempts = backoff.max_attempts(),
                "Reconnect attempts exhausted, feed frozen at last snapshot"
            );
            return;
        }

        let delay = backoff.delay(attempt);
        attempt += 1;
        state_tx.send_replace(ConnectionState::ClosedRetrying);
        debug!(
            subject_id = %subject_id,
            attempt,
            delay_ms = delay.as_millis() as u64,
            "Scheduling reconnect"
        );

        tokio::select! {
            _ = cancel.cancelled() => {
                state_tx.send_replace(ConnectionState::ClosedClean);
                return;
            }
            _ = tokio::time::sleep(delay) => {}
        }
    }
}

/// Drive one socket session: subscribe, heartbeat, decode pushes.
async fn drive_socket(
    socket: FeedSocket,
    subject_id: &SubjectId,
    store: &PresenceStore,
    config: &FeedConfig,
    cancel: &CancellationToken,
) -> SessionEnd {
    let (mut sink, mut stream) = socket.split();

    let subscribe = ClientFrame::Subscribe {
        subject_id: subject_id.clone(),
    };
    if let Err(e) = sink.send(Message::Text(subscribe.to_json())).await {
        warn!(subject_id = %subject_id, error = %e, "Subscribe send failed");
        return SessionEnd::Lost;
    }

    // Heartbeat at the config default until the hello frame supplies the
    // server's interval. The first beat fires one full period after open.
    let period = Duration::from_millis(config.default_heartbeat_interval_ms.max(1));
    let mut heartbeat = interval_at(Instant::now() + period, period);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                let _ = sink.send(Message::Close(None)).await;
                return SessionEnd::Cancelled;
            }
            _ = heartbeat.tick() => {
                if let Err(e) = sink.send(Message::Text(ClientFrame::Heartbeat.to_json())).await {
                    warn!(subject_id = %subject_id, error = %e, "Heartbeat send failed");
                    return SessionEnd::Lost;
                }
            }
            message = stream.next() => match message {
                Some(Ok(Message::Text(text))) => match ServerEvent::decode(&text) {
                    Ok(Some(ServerEvent::Hello { heartbeat_interval_ms })) => {
                        let period = Duration::from_millis(heartbeat_interval_ms.max(1));
                        heartbeat = interval_at(Instant::now() + period, period);
                        debug!(
                            subject_id = %subject_id,
                            interval_ms = heartbeat_interval_ms,
                            "Adopted server heartbeat interval"
                        );
                    }
                    Ok(Some(ServerEvent::InitState(snapshot))) => {
                        debug!(
                            subject_id = %subject_id,
                            activities = snapshot.activities.len(),
                            "Initial presence state"
                        );
                        store.update(snapshot);
                    }
                    Ok(Some(ServerEvent::PresenceUpdate(snapshot))) => {
                        debug!(
                            subject_id = %subject_id,
                            activities = snapshot.activities.len(),
                            "Presence update"
                        );
                        store.update(snapshot);
                    }
                    Ok(None) => {}
                    Err(e) => {
                        warn!(subject_id = %subject_id, error = %e, "Dropping malformed frame");
                    }
                },
                Some(Ok(Message::Ping(payload))) => {
                    if sink.send(Message::Pong(payload)).await.is_err() {
                        return SessionEnd::Lost;
                    }
                }
                Some(Ok(Message::Close(_))) | None => {
                    return SessionEnd::Lost;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!(subject_id = %subject_id, error = %e, "Feed socket error");
                    return SessionEnd::Lost;
                }
            }
        }
    }
}
