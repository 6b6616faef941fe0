use std::time::Duration;

use crate::retry::config::RetryConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryDecision {
    RetryAfter { delay: Duration, reason: RetryReason },
    Stop { reason: RetryReason },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryReason {
    NotRetryable,
    AttemptsExhausted,
    NetworkFailure,
    HttpStatus(u16),
}

/// Decide if a failed attempt should be retried and how long to wait.
///
/// - `attempt_no`: 1-based number of the attempt that just failed.
/// - `http_status`: status code if a response was received.
/// - `network_failed`: true for timeouts and connection failures.
pub fn decide_retry(
    cfg: &RetryConfig,
    attempt_no: usize,
    http_status: Option<u16>,
    network_failed: bool,
) -> RetryDecision {
    if attempt_no >= cfg.max_attempts.max(1) {
        return RetryDecision::Stop {
            reason: RetryReason::AttemptsExhausted,
        };
    }

    if let Some(status) = http_status {
        if !cfg.retry_statuses.contains(&status) {
            return RetryDecision::Stop {
                reason: RetryReason::HttpStatus(status),
            };
        }
    } else if !network_failed {
        return RetryDecision::Stop {
            reason: RetryReason::NotRetryable,
        };
    }

    // Exponential backoff: base * factor^(attempt_no-1).
    let exp = (attempt_no.saturating_sub(1)) as i32;
    let raw = (cfg.base_delay.as_millis() as f64) * cfg.factor.powi(exp);
    let raw_ms = raw.min(cfg.max_delay.as_millis() as f64).max(0.0) as u64;

    RetryDecision::RetryAfter {
        delay: Duration::from_millis(raw_ms),
        reason: http_status
            .map(RetryReason::HttpStatus)
            .unwrap_or(RetryReason::NetworkFailure),
    }
}
