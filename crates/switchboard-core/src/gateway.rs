// ── Command gateway ──
//
// Single chokepoint for backend traffic. Stateless: delegates to the
// executor and normalizes failures into the core error taxonomy. No
// retries here -- idempotency differs per command (re-sending a suspend
// is unsafe, re-sending a volume level is not), so retry policy belongs
// to callers.

use std::sync::Arc;

use tracing::{debug, warn};

use switchboard_backend::{MutateReply, Mutation, Query, StateReply, SystemBackend};

use crate::error::CoreError;

pub(crate) struct Gateway<B> {
    backend: Arc<B>,
}

impl<B: SystemBackend> Gateway<B> {
    pub(crate) fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// Dispatch a mutation. Any failure surfaces as [`CoreError::Gateway`].
    pub(crate) async fn call(&self, mutation: Mutation) -> Result<MutateReply, CoreError> {
        debug!(?mutation, "dispatching mutation");
        self.backend.mutate(mutation.clone()).await.map_err(|source| {
            warn!(?mutation, error = %source, "mutation failed");
            CoreError::Gateway { source }
        })
    }

    /// Fetch state. Any failure surfaces as [`CoreError::Query`].
    pub(crate) async fn fetch(&self, query: Query) -> Result<StateReply, CoreError> {
        debug!(?query, "fetching state");
        self.backend.query(query).await.map_err(|source| {
            warn!(?query, error = %source, "state fetch failed");
            CoreError::Query { source }
        })
    }
}
