// ── Per-control mirror cell ──
//
// One cell per control: the last-known value, whether the backend has
// acknowledged it, and the in-flight marker. Push-based change
// notification via `watch` channels; every operation is a single
// synchronous step with no suspension point inside.

use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore, watch};

use crate::control::ControlState;

/// Mirrored state cell for a single control.
pub(crate) struct ControlCell<T: Clone + Send + Sync + 'static> {
    state: watch::Sender<ControlState<T>>,
    pending: PendingFlag,
}

impl<T: Clone + Send + Sync + 'static> ControlCell<T> {
    /// A fresh cell starts unconfirmed: nothing has been acknowledged by
    /// the backend until the first reconciliation lands.
    pub(crate) fn new(initial: T) -> Self {
        let (state, _) = watch::channel(ControlState {
            value: initial,
            confirmed: false,
        });
        Self {
            state,
            pending: PendingFlag::new(),
        }
    }

    /// Current value and confirmation flag.
    pub(crate) fn get(&self) -> ControlState<T> {
        self.state.borrow().clone()
    }

    /// Overwrite the value ahead of backend acknowledgement.
    pub(crate) fn set_optimistic(&self, value: T) {
        // `send_replace` updates unconditionally, even with zero receivers.
        self.state.send_replace(ControlState {
            value,
            confirmed: false,
        });
    }

    /// Record a backend-acknowledged value.
    pub(crate) fn confirm(&self, value: T) {
        self.state.send_replace(ControlState::confirmed(value));
    }

    /// Restore a prior confirmed value after a rejected mutation.
    pub(crate) fn rollback(&self, prior: T) {
        self.state.send_replace(ControlState::confirmed(prior));
    }

    /// Subscribe to state changes via a `watch::Receiver`.
    pub(crate) fn subscribe(&self) -> watch::Receiver<ControlState<T>> {
        self.state.subscribe()
    }

    pub(crate) fn pending(&self) -> &PendingFlag {
        &self.pending
    }
}

/// Per-control mutual-exclusion marker for in-flight mutations.
///
/// A one-permit semaphore, not a counter: `try_begin` either hands out the
/// sole permit or reports the control busy. The permit rides inside a
/// [`PendingGuard`], so release happens on every exit path of the holder,
/// including early returns and panics.
pub(crate) struct PendingFlag {
    permits: Arc<Semaphore>,
}

impl PendingFlag {
    pub(crate) fn new() -> Self {
        Self {
            permits: Arc::new(Semaphore::new(1)),
        }
    }

    /// Mark the control in-flight, or return `None` if it already is.
    pub(crate) fn try_begin(&self) -> Option<PendingGuard> {
        Arc::clone(&self.permits)
            .try_acquire_owned()
            .ok()
            .map(|permit| PendingGuard { _permit: permit })
    }

    /// Whether a mutation for this control is currently in flight.
    pub(crate) fn is_pending(&self) -> bool {
        self.permits.available_permits() == 0
    }
}

/// RAII marker: the control stays pending for exactly this guard's lifetime.
pub(crate) struct PendingGuard {
    _permit: OwnedSemaphorePermit,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn new_cell_is_unconfirmed() {
        let cell = ControlCell::new(40u8);
        let state = cell.get();
        assert_eq!(state.value, 40);
        assert!(!state.confirmed);
    }

    #[test]
    fn optimistic_then_confirm_round_trip() {
        let cell = ControlCell::new(0u8);
        cell.set_optimistic(70);
        assert!(!cell.get().confirmed);

        cell.confirm(70);
        let state = cell.get();
        assert_eq!(state.value, 70);
        assert!(state.confirmed);
    }

    #[test]
    fn rollback_restores_prior_value_exactly() {
        let cell = ControlCell::new(false);
        cell.confirm(false);
        cell.set_optimistic(true);

        cell.rollback(false);
        let state = cell.get();
        assert!(!state.value);
        assert!(state.confirmed);
    }

    #[test]
    fn subscribers_observe_every_step() {
        let cell = ControlCell::new(10u8);
        let mut rx = cell.subscribe();

        cell.set_optimistic(55);
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().value, 55);

        cell.confirm(55);
        assert!(rx.borrow_and_update().confirmed);
    }

    #[test]
    fn pending_flag_is_exclusive_and_released_on_drop() {
        let flag = PendingFlag::new();
        assert!(!flag.is_pending());

        let guard = flag.try_begin().unwrap();
        assert!(flag.is_pending());
        assert!(flag.try_begin().is_none());

        drop(guard);
        assert!(!flag.is_pending());
        assert!(flag.try_begin().is_some());
    }
}
