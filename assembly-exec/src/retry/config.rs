use std::collections::BTreeSet;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub retry_statuses: BTreeSet<u16>,
    pub base_delay: Duration,
    pub factor: f64,
    pub max_delay: Duration,
    /// Total attempts, including the first.
    pub max_attempts: usize,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            retry_statuses: [429u16, 500, 502, 503, 504].into_iter().collect(),
            base_delay: Duration::from_secs(1),
            factor: 2.0,
            max_delay: Duration::from_secs(10),
            max_attempts: 3,
        }
    }
}
