//! Bounded retry for fallible async operations.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

/// Run `op` until it succeeds, waiting `delay` between attempts.
///
/// At most `attempts` total attempts are made (a value of zero is treated as
/// one). The error of the final attempt is returned once attempts are
/// exhausted.
pub async fn with_retries<T, E, F, Fut>(mut op: F, attempts: u32, delay: Duration) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut remaining = attempts.max(1);

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                remaining -= 1;
                if remaining == 0 {
                    return Err(err);
                }
                tracing::warn!(error = %err, remaining, "attempt failed, retrying");
                sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    const DELAY: Duration = Duration::from_secs(1);

    #[tokio::test(start_paused = true)]
    async fn first_success_returns_immediately() {
        let calls = AtomicU32::new(0);

        let result: Result<u32, &str> = with_retries(
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok(42) }
            },
            3,
            DELAY,
        )
        .await;

        assert_eq!(result, Ok(42));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn retries_until_success() {
        let calls = AtomicU32::new(0);

        let result: Result<u32, &str> = with_retries(
            || {
                let attempt = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if attempt < 2 {
                        Err("connection refused")
                    } else {
                        Ok(7)
                    }
                }
            },
            5,
            DELAY,
        )
        .await;

        assert_eq!(result, Ok(7));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_attempts_return_the_last_error() {
        let calls = AtomicU32::new(0);

        let result: Result<u32, String> = with_retries(
            || {
                let attempt = calls.fetch_add(1, Ordering::SeqCst);
                async move { Err(format!("attempt {attempt} failed")) }
            },
            3,
            DELAY,
        )
        .await;

        assert_eq!(result, Err("attempt 2 failed".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_attempts_still_runs_once() {
        let calls = AtomicU32::new(0);

        let result: Result<u32, &str> = with_retries(
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err("boom") }
            },
            0,
            DELAY,
        )
        .await;

        assert_eq!(result, Err("boom"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
