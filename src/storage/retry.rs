//! Retry with exponential backoff for hosted-backend calls

use log::{debug, warn};
use rand::Rng;
use std::future::Future;
use std::time::Duration;

use crate::config::PersistenceConfig;

#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryConfig {
    pub fn from_persistence(config: &PersistenceConfig) -> Self {
        Self {
            max_attempts: config.retry_attempts.max(1),
            base_delay: Duration::from_millis(config.retry_base_delay_ms),
            ..Self::default()
        }
    }

    /// Single attempt, used where a prompt answer is expected
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RetryableError {
    /// Connection refused, DNS and friends
    Network,
    ServerError(u16),
    RateLimited,
    Timeout,
    ClientError(u16),
    AuthError,
    Unknown,
}

impl RetryableError {
    pub fn should_retry(&self) -> bool {
        matches!(
            self,
            RetryableError::Network
                | RetryableError::ServerError(_)
                | RetryableError::RateLimited
                | RetryableError::Timeout
        )
    }

    pub fn from_status_code(status: u16) -> Self {
        match status {
            401 | 403 => RetryableError::AuthError,
            408 => RetryableError::Timeout,
            429 => RetryableError::RateLimited,
            400..=499 => RetryableError::ClientError(status),
            500..=599 => RetryableError::ServerError(status),
            _ => RetryableError::Unknown,
        }
    }

    pub fn from_reqwest_error(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            RetryableError::Timeout
        } else if let Some(status) = error.status() {
            Self::from_status_code(status.as_u16())
        } else if error.is_connect() || error.is_request() {
            RetryableError::Network
        } else {
            RetryableError::Unknown
        }
    }
}

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    config: RetryConfig,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(RetryConfig::default())
    }
}

impl RetryPolicy {
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    pub async fn execute<F, Fut, T>(&self, operation: F) -> Result<T, reqwest::Error>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, reqwest::Error>>,
    {
        let mut attempt = 1;
        loop {
            match operation().await {
                Ok(result) => {
                    if attempt > 1 {
                        debug!("Request succeeded after {} attempts", attempt);
                    }
                    return Ok(result);
                }
                Err(error) => {
                    let kind = RetryableError::from_reqwest_error(&error);
                    if !kind.should_retry() || attempt >= self.config.max_attempts {
                        warn!(
                            "Request failed permanently on attempt {} ({:?}): {}",
                            attempt, kind, error
                        );
                        return Err(error);
                    }

                    let delay = self.calculate_delay(attempt);
                    warn!(
                        "Request failed on attempt {} ({:?}), retrying in {:?}: {}",
                        attempt, kind, delay, error
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    fn calculate_delay(&self, attempt: u32) -> Duration {
        let delay_ms = (self.config.base_delay.as_millis() as f64)
            * self.config.backoff_multiplier.powi(attempt as i32 - 1);
        let mut delay = Duration::from_millis(delay_ms as u64).min(self.config.max_delay);

        if self.config.jitter {
            let jitter_factor = rand::thread_rng().gen_range(0.5..=1.5);
            delay = Duration::from_millis((delay.as_millis() as f64 * jitter_factor) as u64);
        }
        delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_classification() {
        assert_eq!(RetryableError::from_status_code(401), RetryableError::AuthError);
        assert_eq!(RetryableError::from_status_code(408), RetryableError::Timeout);
        assert_eq!(RetryableError::from_status_code(429), RetryableError::RateLimited);
        assert_eq!(RetryableError::from_status_code(409), RetryableError::ClientError(409));
        assert_eq!(RetryableError::from_status_code(503), RetryableError::ServerError(503));

        assert!(RetryableError::ServerError(502).should_retry());
        assert!(!RetryableError::ClientError(400).should_retry());
        assert!(!RetryableError::AuthError.should_retry());
    }

    #[test]
    fn test_delay_backs_off_and_caps() {
        let policy = RetryPolicy::new(RetryConfig {
            max_attempts: 6,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(500),
            backoff_multiplier: 2.0,
            jitter: false,
        });
        assert_eq!(policy.calculate_delay(1), Duration::from_millis(100));
        assert_eq!(policy.calculate_delay(2), Duration::from_millis(200));
        assert_eq!(policy.calculate_delay(3), Duration::from_millis(400));
        assert_eq!(policy.calculate_delay(4), Duration::from_millis(500));
    }

    #[test]
    fn test_jitter_stays_within_half_to_one_and_a_half() {
        let policy = RetryPolicy::new(RetryConfig {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
            max_delay: Duration::from_secs(10),
            backoff_multiplier: 2.0,
            jitter: true,
        });
        for _ in 0..50 {
            let d = policy.calculate_delay(1);
            assert!(d >= Duration::from_millis(500) && d <= Duration::from_millis(1500));
        }
    }

    #[test]
    fn test_config_from_persistence_settings() {
        let persistence = PersistenceConfig {
            retry_attempts: 0,
            retry_base_delay_ms: 50,
            ..PersistenceConfig::default()
        };
        let config = RetryConfig::from_persistence(&persistence);
        assert_eq!(config.max_attempts, 1);
        assert_eq!(config.base_delay, Duration::from_millis(50));
    }
}
