//! Transport configuration and retry policy

use std::time::Duration;

/// Retry policy for connection-establishment failures
///
/// Only failures to reach the device are retried. Timeouts and device
/// responses are surfaced on the first occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts after the first try
    pub max_retries: u32,
    /// Base delay between retries
    pub base_delay: Duration,
    /// Upper bound for a single delay
    pub max_delay: Duration,
    /// Whether to use exponential backoff
    pub exponential_backoff: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            base_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(5),
            exponential_backoff: true,
        }
    }
}

impl RetryPolicy {
    /// Create a retry policy with no retries
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            exponential_backoff: false,
        }
    }

    /// Create a retry policy with fixed delays
    pub fn fixed(max_retries: u32, delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay: delay,
            max_delay: delay,
            exponential_backoff: false,
        }
    }

    /// Create a retry policy with exponential backoff
    pub fn exponential(max_retries: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            max_delay,
            exponential_backoff: true,
        }
    }

    /// Total number of attempts this policy allows
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Calculate the delay before a given retry attempt (1-based)
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 || attempt > self.max_retries {
            return Duration::ZERO;
        }

        let delay = if self.exponential_backoff {
            let factor = 2_u32.checked_pow(attempt - 1).unwrap_or(u32::MAX);
            self.base_delay.saturating_mul(factor)
        } else {
            self.base_delay
        };

        delay.min(self.max_delay)
    }
}

/// Configuration for [`HttpTransport`](crate::HttpTransport)
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Per-request deadline
    /// Default: 20 seconds
    pub timeout: Duration,

    /// Skip TLS certificate verification. The device serves a self-signed
    /// certificate on the LAN.
    /// Default: true
    pub accept_invalid_certs: bool,

    /// Retry policy for connection failures
    pub retry: RetryPolicy,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(20),
            accept_invalid_certs: true,
            retry: RetryPolicy::default(),
        }
    }
}

impl TransportConfig {
    /// Create a TransportConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a TransportConfig that gives up on the first connection failure
    pub fn fail_fast() -> Self {
        Self {
            retry: RetryPolicy::none(),
            ..Default::default()
        }
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry policy
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TransportConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(20));
        assert!(config.accept_invalid_certs);
        assert_eq!(config.retry.max_attempts(), 6);
    }

    #[test]
    fn test_exponential_delay_is_capped() {
        let policy = RetryPolicy::exponential(
            10,
            Duration::from_millis(250),
            Duration::from_secs(1),
        );
        assert_eq!(policy.delay_for_attempt(0), Duration::ZERO);
        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(250));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(500));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_secs(1));
        assert_eq!(policy.delay_for_attempt(9), Duration::from_secs(1));
        assert_eq!(policy.delay_for_attempt(11), Duration::ZERO);
    }

    #[test]
    fn test_fixed_delay() {
        let policy = RetryPolicy::fixed(2, Duration::from_millis(10));
        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(10));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(10));
        assert_eq!(policy.delay_for_attempt(3), Duration::ZERO);
        assert_eq!(policy.max_attempts(), 3);
    }

    #[test]
    fn test_no_retry() {
        let config = TransportConfig::fail_fast();
        assert_eq!(config.retry.max_retries, 0);
        assert_eq!(config.retry.max_attempts(), 1);
    }
}
