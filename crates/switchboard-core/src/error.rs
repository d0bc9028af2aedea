// ── Core error types ──
//
// The engine's two failure surfaces: a mutation that the backend rejected
// (Gateway) and a state fetch that never produced truth (Query). Both wrap
// the executor's error. Out-of-range slider values never appear here --
// they are clamped into the domain before any call is made.

use switchboard_backend::BackendError;
use thiserror::Error;

/// Error surfaced by engine operations.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    /// A backend mutation failed. The control it targeted has been rolled
    /// back or queued for reconciliation by the time this is observed.
    #[error("backend call failed: {source}")]
    Gateway {
        #[source]
        source: BackendError,
    },

    /// A reconciliation fetch failed. Mirrored state is left at its last
    /// known values.
    #[error("state fetch failed: {source}")]
    Query {
        #[source]
        source: BackendError,
    },
}
