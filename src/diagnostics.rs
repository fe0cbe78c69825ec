//! Uniform message formatting for errors and warnings.

use std::fmt::Display;

/// Prefix an error message so it reads the same wherever it is surfaced.
pub fn error_message(msg: impl Display) -> String {
    format!("cluster spec error: {}", msg)
}

/// Report a tolerated oddity in the input.
pub fn warn(msg: impl Display) {
    tracing::warn!("cluster spec warning: {}", msg);
}
