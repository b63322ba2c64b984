//! Fixed-delay retry for transient listing failures.
//!
//! The default policy is five attempts in total with a ten second pause
//! between them. Waiting goes through [`Sleeper`] so tests can count pauses
//! without actually sleeping.

use std::time::Duration;

use crate::errors::{YtRssError, YtRssResult};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
pub const DEFAULT_DELAY: Duration = Duration::from_secs(10);

/// Classifies errors as retryable or not.
pub trait IsRetryable {
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for YtRssError {
    fn is_retryable(&self) -> bool {
        // Only server-side failures. An answer we did not like (ambiguous
        // channel, 4xx, malformed body) will not change on a second ask.
        matches!(self, YtRssError::Transient { .. })
    }
}

/// Blocks the current thread between attempts.
#[cfg_attr(test, mockall::automock)]
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Run `operation` until it succeeds, fails for good, or the attempts
    /// run out. Exhaustion wraps the last transient error.
    pub fn run<T, F>(&self, sleeper: &dyn Sleeper, mut operation: F) -> YtRssResult<T>
    where
        F: FnMut() -> YtRssResult<T>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match operation() {
                Ok(value) => {
                    if attempt > 1 {
                        tracing::info!(attempts = attempt, "Request succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(e) if e.is_retryable() && attempt < max_attempts => {
                    tracing::warn!(
                        error = %e,
                        attempt,
                        max_attempts,
                        delay_secs = self.delay.as_secs(),
                        "Request failed, retrying"
                    );
                    sleeper.sleep(self.delay);
                    attempt += 1;
                }
                Err(e) if e.is_retryable() => {
                    tracing::error!(error = %e, attempts = attempt, "Retry attempts exhausted");
                    return Err(YtRssError::RetriesExhausted {
                        attempts: attempt,
                        last: Box::new(e),
                    });
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    fn transient() -> YtRssError {
        YtRssError::Transient {
            status: 503,
            message: "Backend Error".to_string(),
        }
    }

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.delay, Duration::from_secs(10));
    }

    #[test]
    fn test_only_transient_errors_are_retryable() {
        assert!(transient().is_retryable());
        assert!(!YtRssError::Api {
            status: 404,
            message: "playlistNotFound".to_string()
        }
        .is_retryable());
        assert!(!YtRssError::AmbiguousChannel {
            query: "x".to_string(),
            found: 2
        }
        .is_retryable());
    }

    #[test]
    fn test_four_failures_then_success() {
        let mut sleeper = MockSleeper::new();
        sleeper
            .expect_sleep()
            .with(eq(Duration::from_secs(10)))
            .times(4)
            .return_const(());

        let mut calls = 0;
        let result = RetryPolicy::default().run(&sleeper, || {
            calls += 1;
            if calls < 5 {
                Err(transient())
            } else {
                Ok("page")
            }
        });

        assert_eq!(result.unwrap(), "page");
        assert_eq!(calls, 5);
    }

    #[test]
    fn test_five_failures_exhaust_attempts() {
        let mut sleeper = MockSleeper::new();
        sleeper.expect_sleep().times(4).return_const(());

        let mut calls = 0;
        let result: YtRssResult<()> = RetryPolicy::default().run(&sleeper, || {
            calls += 1;
            Err(transient())
        });

        assert_eq!(calls, 5);
        match result {
            Err(YtRssError::RetriesExhausted { attempts, last }) => {
                assert_eq!(attempts, 5);
                assert!(matches!(*last, YtRssError::Transient { status: 503, .. }));
            }
            other => panic!("expected exhaustion, got {:?}", other),
        }
    }

    #[test]
    fn test_permanent_error_is_not_retried() {
        let mut sleeper = MockSleeper::new();
        sleeper.expect_sleep().never();

        let mut calls = 0;
        let result: YtRssResult<()> = RetryPolicy::default().run(&sleeper, || {
            calls += 1;
            Err(YtRssError::Api {
                status: 403,
                message: "quotaExceeded".to_string(),
            })
        });

        assert_eq!(calls, 1);
        assert!(matches!(result, Err(YtRssError::Api { status: 403, .. })));
    }

    #[test]
    fn test_custom_policy() {
        let mut sleeper = MockSleeper::new();
        sleeper
            .expect_sleep()
            .with(eq(Duration::from_millis(5)))
            .times(1)
            .return_const(());

        let policy = RetryPolicy {
            max_attempts: 2,
            delay: Duration::from_millis(5),
        };

        let mut calls = 0;
        let result: YtRssResult<()> = policy.run(&sleeper, || {
            calls += 1;
            Err(transient())
        });

        assert_eq!(calls, 2);
        assert!(matches!(
            result,
            Err(YtRssError::RetriesExhausted { attempts: 2, .. })
        ));
    }
}
