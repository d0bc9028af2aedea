// ── Debounced mutator ──
//
// Slider input handling in two phases. Raw input events clamp and write
// optimistically with no await point, so the visible value tracks the
// pointer. Commit signals arm (or re-arm) a quiet-period timer; only the
// timer that survives the burst dispatches, and it reads the store at
// fire time so the call always carries the latest value.

use tracing::debug;

use switchboard_backend::SystemBackend;

use crate::control::SliderKind;
use crate::engine::{Engine, TimerSlot};
use crate::notify::Severity;
use crate::store::ControlCell;

impl<B: SystemBackend> Engine<B> {
    /// A raw slider event: clamp into the domain and mirror immediately.
    ///
    /// Synchronous — no backend call, no timer. The rendering layer sees
    /// the new value before the next frame.
    pub fn slider_input(&self, kind: SliderKind, raw: i16) {
        let value = kind.clamp(raw);
        self.slider_cell(kind).set_optimistic(value);
    }

    /// A keyboard step (arrow key, key repeat): apply a signed delta to
    /// the current value, then commit through the same debounce window as
    /// a pointer release.
    pub fn slider_adjust(&self, kind: SliderKind, delta: i16) {
        let current = i16::from(self.slider_cell(kind).get().value);
        let value = kind.clamp(current.saturating_add(delta));
        self.slider_cell(kind).set_optimistic(value);
        self.slider_commit(kind);
    }

    /// A commit signal (pointer release): start or restart this slider's
    /// quiet-period timer. A burst of commits inside the window collapses
    /// into a single backend call carrying the final value.
    pub fn slider_commit(&self, kind: SliderKind) {
        let token = self.slider_timer(kind).restart();
        let engine = self.clone();
        tokio::spawn(async move {
            tokio::select! {
                biased;
                () = token.cancelled() => {}
                () = tokio::time::sleep(engine.inner.config.quiet_period) => {
                    engine.dispatch_slider(kind).await;
                }
            }
        });
    }

    /// Quiet period elapsed: push the current mirrored value to the
    /// backend.
    async fn dispatch_slider(&self, kind: SliderKind) {
        // Read at fire time, not at schedule time — input that arrived
        // while the timer ran must not be shadowed by a stale capture.
        let value = self.slider_cell(kind).get().value;
        debug!(%kind, value, "committing slider value");

        match self.inner.gateway.call(kind.mutation(value)).await {
            Ok(_) => {
                let cell = self.slider_cell(kind);
                // A newer optimistic edit may have arrived while this call
                // was in flight; its own commit will confirm it.
                if cell.get().value == value {
                    cell.confirm(value);
                }
            }
            Err(_) => {
                // No local rollback: intervening edits may already have
                // superseded the failed value. Ground truth wins instead.
                self.inner
                    .notifier
                    .notify(format!("Failed to set {kind}"), Severity::Error);
                let _ = self.reconcile_one(kind.kind()).await;
            }
        }
    }

    fn slider_cell(&self, kind: SliderKind) -> &ControlCell<u8> {
        match kind {
            SliderKind::Volume => &self.inner.store.volume,
            SliderKind::Brightness => &self.inner.store.brightness,
        }
    }

    fn slider_timer(&self, kind: SliderKind) -> &TimerSlot {
        match kind {
            SliderKind::Volume => &self.inner.volume_timer,
            SliderKind::Brightness => &self.inner.brightness_timer,
        }
    }
}
