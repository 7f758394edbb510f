//! Cancellable repeating task with a fixed period.
//!
//! Knows nothing about sensors: the job is an opaque closure, so the
//! simulator can be driven synchronously in tests and on a timer in
//! production.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Handle to a running repeating task.
pub struct Ticker {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

/// Run `job` every `period` until `token` is cancelled.
///
/// The first run happens one full period after spawning.  A run always
/// completes before the next one starts; ticks missed while a run was slow
/// are skipped rather than replayed.
pub fn spawn_repeating<F, Fut>(period: Duration, token: CancellationToken, mut job: F) -> Ticker
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let task_token = token.clone();
    let handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                _ = task_token.cancelled() => break,
                _ = interval.tick() => job().await,
            }
        }

        debug!(period_ms = period.as_millis() as u64, "repeating task stopped");
    });

    Ticker { token, handle }
}

impl Ticker {
    /// Cancel and wait for the task to exit.
    pub async fn shutdown(self) {
        self.token.cancel();
        if let Err(e) = self.handle.await {
            warn!("repeating task ended abnormally: {e}");
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::time::sleep;

    /// Helper: a ticker that counts its runs.
    fn counting(period: Duration, token: CancellationToken) -> (Ticker, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let ticker = spawn_repeating(period, token, move || {
            c.fetch_add(1, Ordering::SeqCst);
            async {}
        });
        (ticker, count)
    }

    #[tokio::test(start_paused = true)]
    async fn first_run_waits_one_period() {
        let (ticker, count) = counting(Duration::from_secs(1), CancellationToken::new());

        sleep(Duration::from_millis(999)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        sleep(Duration::from_millis(2)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        ticker.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn runs_once_per_period() {
        let (ticker, count) = counting(Duration::from_secs(1), CancellationToken::new());

        sleep(Duration::from_millis(3500)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);

        ticker.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_further_runs() {
        let (ticker, count) = counting(Duration::from_millis(100), CancellationToken::new());

        sleep(Duration::from_millis(250)).await;
        ticker.shutdown().await;
        let after_stop = count.load(Ordering::SeqCst);
        assert_eq!(after_stop, 2);

        sleep(Duration::from_secs(5)).await;
        assert_eq!(count.load(Ordering::SeqCst), after_stop);
    }

    #[tokio::test(start_paused = true)]
    async fn external_token_cancels_task() {
        let token = CancellationToken::new();
        let (ticker, count) = counting(Duration::from_millis(100), token.clone());

        token.cancel();
        sleep(Duration::from_secs(1)).await;

        assert!(ticker.handle.is_finished());
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn async_job_completes_before_next_run() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let overlaps = Arc::new(AtomicUsize::new(0));
        let (f, o) = (Arc::clone(&in_flight), Arc::clone(&overlaps));

        let ticker = spawn_repeating(Duration::from_millis(100), CancellationToken::new(), move || {
            let (f, o) = (Arc::clone(&f), Arc::clone(&o));
            async move {
                if f.fetch_add(1, Ordering::SeqCst) > 0 {
                    o.fetch_add(1, Ordering::SeqCst);
                }
                // Longer than the period.
                sleep(Duration::from_millis(250)).await;
                f.fetch_sub(1, Ordering::SeqCst);
            }
        });

        sleep(Duration::from_secs(2)).await;
        ticker.shutdown().await;

        assert_eq!(overlaps.load(Ordering::SeqCst), 0);
    }
}
