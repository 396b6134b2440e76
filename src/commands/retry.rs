// commands/retry.rs
use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::hub::HubError;

/// Best-effort repetition of a fire-and-forget command.
///
/// Invokes `operation` exactly `tries` times, sleeping `sleep` between
/// attempts but never after the last one. Every attempt is assumed
/// independent: the loop does not inspect results beyond failure, and a
/// failed attempt ends the loop immediately with the remaining tries
/// abandoned. This is repetition against RF packet loss, not resilient
/// retry with backoff.
pub async fn repeat<F, Fut>(tries: u32, sleep: Duration, mut operation: F) -> Result<(), HubError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<(), HubError>>,
{
    for attempt in 1..=tries {
        debug!(attempt, tries, "command attempt");
        operation().await?;
        if attempt != tries {
            tokio::time::sleep(sleep).await;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn calls_target_exactly_tries_times() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let started = Instant::now();

        repeat(3, Duration::from_secs(2), move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        })
        .await
        .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // Two sleeps between three attempts, none after the last.
        assert_eq!(started.elapsed(), Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn single_try_never_sleeps() {
        let started = Instant::now();
        repeat(1, Duration::from_secs(30), || async { Ok(()) })
            .await
            .unwrap();
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn failure_stops_remaining_tries() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let started = Instant::now();

        let result = repeat(5, Duration::from_secs(2), move || {
            let counter = Arc::clone(&counter);
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) + 1 == 2 {
                    Err(HubError::Transport("rf stage busy".into()))
                } else {
                    Ok(())
                }
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        // One sleep before the failing attempt, nothing after it.
        assert_eq!(started.elapsed(), Duration::from_secs(2));
    }
}
