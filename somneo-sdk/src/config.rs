//! Configuration for a device handle

use std::time::Duration;

use somneo_transport::{RetryPolicy, TransportConfig};

/// Configuration for [`Somneo`](crate::Somneo)
#[derive(Debug, Clone, Default)]
pub struct SomneoConfig {
    /// HTTP timeout, TLS and retry settings
    pub transport: TransportConfig,

    /// Also fetch the firmware status blob on refresh. Not every firmware
    /// answers this endpoint.
    /// Default: false
    pub fetch_firmware: bool,
}

impl SomneoConfig {
    /// Create a SomneoConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a SomneoConfig that keeps retrying an unreachable device for
    /// roughly a minute, for devices that drop off Wi-Fi regularly
    pub fn patient() -> Self {
        Self {
            transport: TransportConfig::default().with_retry(RetryPolicy::exponential(
                12,
                Duration::from_millis(500),
                Duration::from_secs(8),
            )),
            ..Default::default()
        }
    }

    pub fn with_transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }

    pub fn with_firmware(mut self, fetch_firmware: bool) -> Self {
        self.fetch_firmware = fetch_firmware;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SomneoConfig::default();
        assert!(!config.fetch_firmware);
        assert_eq!(config.transport.timeout, Duration::from_secs(20));
    }

    #[test]
    fn test_patient_config_is_still_bounded() {
        let retry = SomneoConfig::patient().transport.retry;
        assert_eq!(retry.max_attempts(), 13);
        let total: Duration = (1..=retry.max_retries)
            .map(|attempt| retry.delay_for_attempt(attempt))
            .sum();
        assert!(total < Duration::from_secs(90));
    }
}
