//! Once-per-second ticking streams.
//!
//! Each stream owns its interval timer; dropping the stream releases the
//! timer on the spot. Switching activities therefore only requires dropping
//! the old stream before creating the new one.

use std::time::Duration;

use chrono::Utc;
use futures::stream::{self, Stream, StreamExt};
use tokio::time::{interval, MissedTickBehavior};

use crate::format::{elapsed_seconds, format_duration, progress_percent};

/// Current wall clock in millisecond epoch.
fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// An infinite once-per-second tick stream. The first tick completes
/// immediately so subscribers render without a one-second blank.
fn ticks() -> impl Stream<Item = ()> {
    let mut timer = interval(Duration::from_secs(1));
    timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
    stream::unfold(timer, |mut timer| async move {
        timer.tick().await;
        Some(((), timer))
    })
}

/// Formatted elapsed-time labels for an activity started at `start_ms`,
/// re-evaluated once per second from the moment of subscription.
///
/// Infinite; terminates only when the caller drops the stream.
pub fn elapsed_stream(start_ms: i64) -> impl Stream<Item = String> {
    ticks().map(move |()| format_duration(elapsed_seconds(start_ms, now_ms())))
}

/// Clamped 0–100 progress percentages for a bounded activity, re-evaluated
/// once per second.
///
/// Callers only construct this for activities with a real end instant;
/// open-ended activities have no defined progress.
pub fn progress_stream(start_ms: i64, end_ms: i64) -> impl Stream<Item = f64> {
    ticks().map(move |()| progress_percent(start_ms, end_ms, now_ms()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test(start_paused = true)]
    async fn first_emission_is_immediate_then_once_per_second() {
        let started = tokio::time::Instant::now();
        let mut labels = Box::pin(elapsed_stream(0));

        labels.next().await.unwrap();
        assert_eq!(started.elapsed(), Duration::ZERO);

        labels.next().await.unwrap();
        labels.next().await.unwrap();
        assert_eq!(started.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn progress_stream_emits_clamped_values() {
        // Range entirely in the past: every sample clamps to 100.
        let mut progress = Box::pin(progress_stream(0, 1));
        let sample = progress.next().await.unwrap();
        assert_eq!(sample, 100.0);

        // Range entirely in the future: every sample clamps to 0.
        let far = now_ms() + 3_600_000;
        let mut progress = Box::pin(progress_stream(far, far + 1_000));
        let sample = progress.next().await.unwrap();
        assert_eq!(sample, 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn elapsed_labels_are_formatted() {
        // Start far in the past: the label has the h:mm:ss shape.
        let start = now_ms() - 3_661_000;
        let mut labels = Box::pin(elapsed_stream(start));
        let label = labels.next().await.unwrap();
        assert_eq!(label.matches(':').count(), 2);
    }
}
