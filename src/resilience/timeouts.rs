//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap health checks with a deadline
//! - Turn an expired deadline into an ordinary check failure
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities; the check future is dropped on expiry
//! - A timeout is a `CheckError::Timeout`, distinct from transport errors

use std::future::Future;
use std::time::Duration;

use tokio::time;

use crate::health::CheckError;

/// Run `check`, failing with `CheckError::Timeout` once `deadline` elapses.
pub async fn with_deadline<F, T>(deadline: Duration, check: F) -> Result<T, CheckError>
where
    F: Future<Output = Result<T, CheckError>>,
{
    match time::timeout(deadline, check).await {
        Ok(result) => result,
        Err(_) => Err(CheckError::Timeout(deadline)),
    }
}
