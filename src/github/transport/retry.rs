//! Retry classification and linear backoff.
//!
//! Classification is a pure function of the observed status. The delays
//! between attempts come from [`RetryPolicy`], which doubles as a `backon`
//! backoff builder.

use std::time::Duration;

use backon::BackoffBuilder;

/// What to do after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// The failure may resolve on its own; try again if attempts remain.
    Retry,
    /// The failure will not resolve by repeating the request.
    Fail,
}

/// Classifies a failed attempt.
///
/// `status` is `None` when the request never produced a response (connection
/// failure, timeout, truncated body). Server errors and network failures are
/// retryable; every other non-success status is terminal.
///
/// # Example
///
/// ```
/// use pr_herald::github::transport::{RetryDecision, classify_failure};
///
/// assert_eq!(classify_failure(None), RetryDecision::Retry);
/// assert_eq!(classify_failure(Some(503)), RetryDecision::Retry);
/// assert_eq!(classify_failure(Some(404)), RetryDecision::Fail);
/// ```
#[must_use]
pub const fn classify_failure(status: Option<u16>) -> RetryDecision {
    match status {
        None | Some(500..=599) => RetryDecision::Retry,
        Some(_) => RetryDecision::Fail,
    }
}

/// Attempt budget and backoff for a single API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    /// Attempts made before giving up when not configured.
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

    /// Backoff unit when not configured.
    pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1200);

    /// Creates a policy; a zero attempt budget is raised to one.
    #[must_use]
    pub const fn new(max_attempts: u32, base_delay: Duration) -> Self {
        let bounded = if max_attempts == 0 { 1 } else { max_attempts };
        Self {
            max_attempts: bounded,
            base_delay,
        }
    }

    /// Policy that retries immediately, for tests.
    #[must_use]
    pub const fn without_delay(max_attempts: u32) -> Self {
        Self::new(max_attempts, Duration::ZERO)
    }

    /// Total attempts allowed, including the first.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay to wait after attempt number `attempt` (1-based) failed.
    ///
    /// Grows linearly: `attempt × base_delay`.
    #[must_use]
    pub const fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ATTEMPTS, Self::DEFAULT_BASE_DELAY)
    }
}

impl BackoffBuilder for RetryPolicy {
    type Backoff = LinearBackoff;

    fn build(self) -> Self::Backoff {
        LinearBackoff {
            policy: self,
            next_attempt: 1,
        }
    }
}

/// Delays between attempts: `base_delay × n` for `n` in `1..max_attempts`.
#[derive(Debug, Clone)]
pub struct LinearBackoff {
    policy: RetryPolicy,
    next_attempt: u32,
}

impl Iterator for LinearBackoff {
    type Item = Duration;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_attempt >= self.policy.max_attempts {
            return None;
        }
        let delay = self.policy.delay_after(self.next_attempt);
        self.next_attempt = self.next_attempt.saturating_add(1);
        Some(delay)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use backon::BackoffBuilder;
    use rstest::rstest;

    use super::{RetryDecision, RetryPolicy, classify_failure};

    #[rstest]
    #[case::network(None, RetryDecision::Retry)]
    #[case::internal_error(Some(500), RetryDecision::Retry)]
    #[case::bad_gateway(Some(502), RetryDecision::Retry)]
    #[case::upper_server_bound(Some(599), RetryDecision::Retry)]
    #[case::not_found(Some(404), RetryDecision::Fail)]
    #[case::unauthorised(Some(401), RetryDecision::Fail)]
    #[case::unprocessable(Some(422), RetryDecision::Fail)]
    #[case::redirect(Some(304), RetryDecision::Fail)]
    fn classifies_by_status_range(#[case] status: Option<u16>, #[case] expected: RetryDecision) {
        assert_eq!(classify_failure(status), expected);
    }

    #[test]
    fn backoff_grows_linearly() {
        let policy = RetryPolicy::new(3, Duration::from_millis(1200));

        assert_eq!(policy.delay_after(1), Duration::from_millis(1200));
        assert_eq!(policy.delay_after(2), Duration::from_millis(2400));
    }

    #[test]
    fn backoff_yields_one_delay_between_each_pair_of_attempts() {
        let policy = RetryPolicy::default();

        let delays: Vec<Duration> = policy.build().collect();

        assert_eq!(policy.max_attempts(), 3);
        assert_eq!(
            delays,
            vec![Duration::from_millis(1200), Duration::from_millis(2400)]
        );
    }

    #[test]
    fn zero_attempts_is_raised_to_one() {
        let policy = RetryPolicy::without_delay(0);

        assert_eq!(policy.max_attempts(), 1);
        assert_eq!(policy.build().count(), 0);
    }
}
