//! Linear backoff between checks.

use std::time::Duration;

/// Wait before the next check of an endpoint with `errors` consecutive failures.
///
/// `poll_interval + error_backoff * errors`, saturating instead of overflowing.
/// There is no cap: a permanently failing endpoint waits longer every cycle.
pub fn backoff_delay(poll_interval: Duration, error_backoff: Duration, errors: u32) -> Duration {
    poll_interval.saturating_add(error_backoff.saturating_mul(errors))
}
