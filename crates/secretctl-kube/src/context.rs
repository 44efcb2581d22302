//! Per-call deadlines
//!
//! Every client operation takes an [`OpContext`]. A background context never
//! expires; a context built with a timeout or deadline fails the call with
//! [`SecretError::DeadlineExceeded`] once the deadline passes. Dropping the
//! future returned by an operation cancels the in-flight request.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::error::{Result, SecretError};

/// Deadline carried through a single operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpContext {
    deadline: Option<Instant>,
}

impl OpContext {
    /// Context without a deadline
    pub fn background() -> Self {
        Self { deadline: None }
    }

    /// Context that expires `timeout` from now
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// Context that expires at `deadline`
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
        }
    }

    /// Context with an optional timeout, background when `None`
    pub fn from_timeout(timeout: Option<Duration>) -> Self {
        timeout.map(Self::with_timeout).unwrap_or_default()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline, `None` for a background context
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Fail fast when the deadline has already passed
    pub fn check(&self) -> Result<()> {
        if self.is_expired() {
            Err(SecretError::DeadlineExceeded)
        } else {
            Ok(())
        }
    }

    /// Drive `fut` to completion unless the deadline passes first
    pub async fn run<T, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        self.check()?;
        match self.deadline {
            None => fut.await,
            Some(deadline) => tokio::time::timeout_at(deadline, fut)
                .await
                .map_err(|_| SecretError::DeadlineExceeded)?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_background_never_expires() {
        let ctx = OpContext::background();
        assert!(!ctx.is_expired());
        assert_eq!(ctx.remaining(), None);
        assert_eq!(ctx.run(async { Ok(7) }).await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_from_timeout_none_is_background() {
        assert_eq!(OpContext::from_timeout(None), OpContext::background());
        assert!(OpContext::from_timeout(Some(Duration::from_secs(5))).deadline().is_some());
    }

    #[tokio::test]
    async fn test_expired_context_skips_future() {
        let ctx = OpContext::with_deadline(Instant::now() - Duration::from_millis(1));
        let mut polled = false;
        let result = ctx
            .run(async {
                polled = true;
                Ok(())
            })
            .await;
        assert!(matches!(result, Err(SecretError::DeadlineExceeded)));
        assert!(!polled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_future_times_out() {
        let ctx = OpContext::with_timeout(Duration::from_secs(1));
        let result = ctx
            .run(async {
                tokio::time::sleep(Duration::from_secs(10)).await;
                Ok(())
            })
            .await;
        assert!(matches!(result, Err(SecretError::DeadlineExceeded)));
    }

    #[tokio::test]
    async fn test_errors_pass_through() {
        let ctx = OpContext::with_timeout(Duration::from_secs(30));
        let result: Result<()> = ctx
            .run(async { Err(SecretError::InvalidObject("x".to_string())) })
            .await;
        assert!(matches!(result, Err(SecretError::InvalidObject(_))));
    }
}
