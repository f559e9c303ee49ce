//! Pulsecard — live presence card feed watcher
//!
//! Main entry point that wires all crates together: subscribes to the
//! presence feed for one subject and renders status, now-playing progress,
//! and synced lyrics through tracing.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use futures::StreamExt;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, EnvFilter};

use pulsecard_core::config::AppConfig;
use pulsecard_core::{AppError, AppResult, SubjectId};
use pulsecard_feed::{Activity, FeedClient, PresenceSnapshot, PresenceStore};
use pulsecard_lyrics::{LrclibClient, LyricsSync};
use pulsecard_profile::ProfileClient;
use pulsecard_timesync::{elapsed_stream, progress_stream, total_duration};

#[derive(Debug, Parser)]
#[command(name = "pulsecard", about = "Watch a subject's live presence feed")]
struct Args {
    /// Subject id to watch (overrides configuration).
    #[arg(short, long)]
    subject: Option<String>,
    /// Configuration environment overlay to load.
    #[arg(long, default_value = "development")]
    env: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match AppConfig::load(&args.env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config, args).await {
        tracing::error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(false).init();
        }
    }
}

/// Main watcher run function
async fn run(config: AppConfig, args: Args) -> AppResult<()> {
    tracing::info!("Starting pulsecard v{}", env!("CARGO_PKG_VERSION"));

    let subject = args
        .subject
        .or(config.subject.id.clone())
        .map(SubjectId::new)
        .ok_or_else(|| {
            AppError::configuration("No subject id given (use --subject or [subject] id)")
        })?;

    // Static identity document; best effort, the live feed does not need it.
    match ProfileClient::new(&config.profile) {
        Ok(profiles) => match profiles.fetch(&subject).await {
            Ok(profile) => {
                if let Some(user) = profile.user {
                    tracing::info!(
                        username = %user.username,
                        display_name = user.global_name.as_deref().unwrap_or(&user.username),
                        "Profile loaded"
                    );
                }
            }
            Err(e) => tracing::warn!(error = %e, "Profile fetch failed, continuing without it"),
        },
        Err(e) => tracing::warn!(error = %e, "Profile client unavailable"),
    }

    let store = Arc::new(PresenceStore::new());
    let client = FeedClient::new(config.feed.clone(), Arc::clone(&store));

    let provider = Arc::new(LrclibClient::new(&config.lyrics)?);
    let lyrics = LyricsSync::new(provider, Duration::from_millis(config.lyrics.sync_tick_ms));

    client.connect(subject.clone());
    tracing::info!(subject_id = %subject, "Watching presence feed");

    let mut updates = store.subscribe();
    let mut line_rx = lyrics.watch_line();
    let mut ticker: Option<ActivityTicker> = None;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down");
                break;
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                render_snapshot(snapshot.as_ref());

                let activity = snapshot
                    .as_ref()
                    .and_then(|s| s.now_playing().next().cloned());
                lyrics.on_activity_changed(activity.as_ref());
                update_ticker(&mut ticker, activity.as_ref());
            }
            changed = line_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let index = *line_rx.borrow_and_update();
                if let Some(index) = index {
                    if let Some(line) = lyrics.lines().get(index).cloned() {
                        tracing::info!(line = %line.text, "♪");
                    }
                }
            }
        }
    }

    if let Some(ticker) = ticker.take() {
        ticker.cancel.cancel();
    }
    client.disconnect();
    Ok(())
}

fn render_snapshot(snapshot: Option<&PresenceSnapshot>) {
    let Some(snapshot) = snapshot else {
        tracing::info!("Presence cleared");
        return;
    };

    tracing::info!(
        status = snapshot.status.as_str(),
        activities = snapshot.now_playing().count(),
        "Presence updated"
    );

    if let Some(text) = snapshot.custom_status() {
        tracing::info!(text = %text, "Custom status");
    }

    for activity in snapshot.now_playing() {
        tracing::info!(
            name = %activity.name,
            details = activity.details.as_deref().unwrap_or(""),
            state = activity.state.as_deref().unwrap_or(""),
            "Activity"
        );
    }
}

/// Live elapsed/progress logging for the current activity.
struct ActivityTicker {
    key: (String, i64),
    cancel: CancellationToken,
}

/// Swap the per-activity ticker when the displayed activity changes.
///
/// The previous activity's timer is cancelled before the new one starts,
/// so at most one ticker runs at a time.
fn update_ticker(current: &mut Option<ActivityTicker>, activity: Option<&Activity>) {
    let target = activity.and_then(|a| {
        let start = a.timestamps.and_then(|t| t.start)?;
        Some((a, start))
    });

    let key = target.map(|(a, start)| (a.id.clone(), start));
    if current.as_ref().map(|t| &t.key) == key.as_ref() {
        return;
    }

    if let Some(previous) = current.take() {
        previous.cancel.cancel();
    }

    let (Some((activity, start)), Some(key)) = (target, key) else {
        return;
    };

    let cancel = CancellationToken::new();
    let end = activity.timestamps.and_then(|t| t.end);
    tokio::spawn(run_ticker(
        activity.name.clone(),
        start,
        end,
        cancel.clone(),
    ));

    *current = Some(ActivityTicker { key, cancel });
}

async fn run_ticker(name: String, start: i64, end: Option<i64>, cancel: CancellationToken) {
    let total = end.map(|end| total_duration(start, end));
    let mut elapsed = Box::pin(elapsed_stream(start));
    let mut progress = end.map(|end| Box::pin(progress_stream(start, end)));

    loop {
        tokio::select! {
            _ = cancel.cancelled() => return,
            label = elapsed.next() => {
                let Some(label) = label else { return };
                match (progress.as_mut(), total.as_deref()) {
                    (Some(progress), Some(total)) => {
                        let percent = progress.next().await.unwrap_or(0.0);
                        tracing::debug!(
                            activity = %name,
                            elapsed = %label,
                            total = %total,
                            percent = %format!("{percent:.0}"),
                            "Playback position"
                        );
                    }
                    _ => {
                        tracing::debug!(activity = %name, elapsed = %label, "Elapsed");
                    }
                }
            }
        }
    }
}
