//! Collapse engine errors into empty values.
//!
//! For callers that want a blank answer instead of an error: an empty
//! string, list or table, or `false`. The cause is logged.

use tracing::warn;

use super::error::EngineError;

pub trait Lenient<T> {
    /// The value, or `T::default()` if the operation failed.
    fn lenient(self) -> T;
}

impl<T: Default> Lenient<T> for Result<T, EngineError> {
    fn lenient(self) -> T {
        match self {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, outcome = ?e.outcome(), "Engine operation failed, using empty result");
                T::default()
            }
        }
    }
}
