//! State synchronization and optimistic command dispatch for switchboard.
//!
//! This crate owns the logic between raw panel input and the
//! `switchboard-backend` executor:
//!
//! - **[`Engine`]** — Central facade constructed once with an injected
//!   backend and [`EngineConfig`]. [`start()`](Engine::start) runs the
//!   initial full reconciliation; input flows in through the slider and
//!   toggle methods, mirrored state flows out through `watch`
//!   subscriptions on the [`MirrorStore`].
//!
//! - **[`MirrorStore`]** — Last-known value, confirmation flag, and
//!   in-flight marker for every control. The only shared mutable resource
//!   in the engine; every write is a single synchronous step.
//!
//! - **Debounced mutator** — Slider input mirrors on every event; commit
//!   signals collapse through a cancel-and-restart quiet-period timer into
//!   one backend call carrying the final value.
//!
//! - **Guarded toggle** — Binary controls serialize through a per-control
//!   pending permit: optimistic flip, dispatch, confirm or roll back, with
//!   the permit released on every exit path.
//!
//! - **Reconciler** — Authoritative re-fetch (`reconcile_all` /
//!   `reconcile_one`) that overwrites optimistic guesses with backend
//!   truth and leaves the mirror untouched when the fetch itself fails.
//!
//! - **[`Notice`]** — Queue-of-one advisory messages with latest-wins
//!   replacement and auto-dismiss. Nothing gates on them.

pub mod config;
pub mod control;
pub mod engine;
pub mod error;
pub mod notify;
pub mod store;

mod gateway;
mod reconcile;
mod slider;
mod toggle;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::EngineConfig;
pub use control::{ControlKind, ControlState, SliderKind, ToggleKind, WifiStatus};
pub use engine::Engine;
pub use error::CoreError;
pub use notify::{Notice, Severity};
pub use store::MirrorStore;
