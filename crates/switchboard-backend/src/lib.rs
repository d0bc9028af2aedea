//! Executor boundary between the switchboard engine and the host machine.
//!
//! The engine never shells out, talks IPC, or touches a socket itself — it
//! depends on the [`SystemBackend`] capability, and whatever sits behind it
//! (a process spawner, a compositor IPC socket, a remote daemon) is a
//! deployment decision:
//!
//! - **[`SystemBackend`]** — the capability trait: `query` reads control
//!   state, `mutate` changes it. Both are async and carry no retry policy;
//!   idempotency differs per operation (re-sending a suspend is unsafe,
//!   re-sending a volume level is not), so retries belong to the caller.
//!
//! - **[`Query`] / [`Mutation`]** — the full operation vocabulary, with
//!   [`StateReply`] / [`MutateReply`] as the typed responses.
//!
//! - **[`MemoryBackend`]** — a scripted in-memory implementation with
//!   failure injection and a call journal. It is selected explicitly by the
//!   code that wires an engine up (typically tests); nothing in this
//!   workspace probes at runtime for which backend is present.

use std::future::Future;

pub mod error;
pub mod memory;
pub mod request;
pub mod types;

pub use error::BackendError;
pub use memory::MemoryBackend;
pub use request::{MutateReply, Mutation, MutationKind, Query, StateReply};
pub use types::{AllStates, BrightnessState, DisplayState, NetworkState, VolumeState};

/// Capability interface to the host machine's control surface.
///
/// Implementations must be cheap to share (`&self` methods) and safe to call
/// from spawned tasks, hence the `Send` bounds on the returned futures.
pub trait SystemBackend: Send + Sync + 'static {
    /// Read control state. Reads are side-effect free.
    fn query(&self, query: Query) -> impl Future<Output = Result<StateReply, BackendError>> + Send;

    /// Change control state. No retries happen below this line.
    fn mutate(
        &self,
        mutation: Mutation,
    ) -> impl Future<Output = Result<MutateReply, BackendError>> + Send;
}
