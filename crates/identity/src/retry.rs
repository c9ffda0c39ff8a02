//! Bounded retry for the gateway verification tier.
//!
//! Retries absorb transient network failures only: any definitive upstream
//! answer (even a denial) returns immediately. The resolver tier performs a
//! single attempt and does not use this wrapper, keeping API tail latency
//! predictable.

use std::time::Duration;

use crate::{VerifyError, VerifyOutcome};

/// Total attempts (1 initial + 2 retries).
pub const VERIFY_ATTEMPTS: u32 = 3;

/// Delay before retry attempt `n` is `RETRY_BASE_DELAY * n`.
pub const RETRY_BASE_DELAY: Duration = Duration::from_millis(500);

/// Runs `attempt` up to [`VERIFY_ATTEMPTS`] times, sleeping 500ms then
/// 1000ms between attempts. Only transport errors are retried.
///
/// Worst case added latency is deterministic: every await is sequential and
/// each attempt is bounded by the client timeout.
pub async fn verify_with_retry<F, Fut>(mut attempt: F) -> Result<VerifyOutcome, VerifyError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<VerifyOutcome, VerifyError>>,
{
    let mut last = match attempt().await {
        Ok(outcome) => return Ok(outcome),
        Err(e) => e,
    };

    for retry in 1..VERIFY_ATTEMPTS {
        tokio::time::sleep(RETRY_BASE_DELAY * retry).await;
        tracing::warn!(attempt = retry + 1, error = %last, "retrying identity verify");
        match attempt().await {
            Ok(outcome) => return Ok(outcome),
            Err(e) => last = e,
        }
    }

    Err(last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VerifiedIdentity;
    use clout_auth::PermissionLevel;
    use std::cell::Cell;
    use tokio::time::Instant;

    fn allowed() -> VerifyOutcome {
        VerifyOutcome::Allowed(VerifiedIdentity {
            user_id: "u1".into(),
            email: "a@x.com".into(),
            full_name: None,
            permission_level: PermissionLevel::View,
            brands: vec![],
        })
    }

    #[tokio::test(start_paused = true)]
    async fn two_transport_failures_then_success() {
        let calls = Cell::new(0u32);
        let start = Instant::now();

        let result = verify_with_retry(|| {
            calls.set(calls.get() + 1);
            let n = calls.get();
            async move {
                if n <= 2 {
                    Err(VerifyError::Transport("connection refused".into()))
                } else {
                    Ok(allowed())
                }
            }
        })
        .await;

        assert_eq!(result, Ok(allowed()));
        assert_eq!(calls.get(), 3);
        // 500ms before the 2nd attempt, 1000ms before the 3rd.
        assert_eq!(start.elapsed(), Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn definitive_answers_are_never_retried() {
        let calls = Cell::new(0u32);
        let start = Instant::now();

        let result = verify_with_retry(|| {
            calls.set(calls.get() + 1);
            async { Ok(VerifyOutcome::InvalidToken) }
        })
        .await;

        assert_eq!(result, Ok(VerifyOutcome::InvalidToken));
        assert_eq!(calls.get(), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);

        // Denials are definitive too, even though they carry no identity.
        let result = verify_with_retry(|| async { Ok(VerifyOutcome::Denied { reason: None }) }).await;
        assert_eq!(result, Ok(VerifyOutcome::Denied { reason: None }));
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_attempts_return_last_transport_error() {
        let calls = Cell::new(0u32);

        let result = verify_with_retry(|| {
            calls.set(calls.get() + 1);
            let n = calls.get();
            async move { Err::<VerifyOutcome, _>(VerifyError::Transport(format!("fail {n}"))) }
        })
        .await;

        assert_eq!(calls.get(), 3);
        assert_eq!(result, Err(VerifyError::Transport("fail 3".into())));
    }
}
