// ── Backend error taxonomy ──
//
// Failures a system-control executor can report. Variants mirror what
// actually goes wrong when driving host tooling: the tool is missing, the
// call is rejected, output cannot be parsed, or the host never answers.
// Callers in the engine never branch on these — they normalize everything
// at the gateway and recover through rollback or reconciliation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error reported by a [`SystemBackend`](crate::SystemBackend) operation.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
pub enum BackendError {
    #[error("command execution failed: {0}")]
    CommandFailed(String),

    #[error("command not found: {0}")]
    CommandNotFound(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("failed to parse backend output: {0}")]
    Parse(String),

    #[error("backend timed out: {0}")]
    Timeout(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_detail() {
        let err = BackendError::CommandFailed("pactl exited with status 1".into());
        assert_eq!(
            err.to_string(),
            "command execution failed: pactl exited with status 1"
        );
    }
}
