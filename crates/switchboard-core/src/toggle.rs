// ── Guarded toggle ──
//
// Binary controls flip through a strict sequence: acquire the control's
// pending marker (or bail out), mirror the flip optimistically, dispatch,
// then confirm or roll back. The marker is an RAII guard moved into the
// dispatch task, so it clears on every exit path. Suspend is the
// degenerate variant: no mirrored value, nothing to roll back.

use tracing::debug;

use switchboard_backend::{MutateReply, Mutation, SystemBackend};

use crate::control::{ControlKind, ToggleKind, WifiStatus};
use crate::engine::Engine;
use crate::notify::Severity;
use crate::store::ControlCell;

impl<B: SystemBackend> Engine<B> {
    /// Flip a binary control.
    ///
    /// If a mutation for `kind` is already in flight the call is a no-op:
    /// no mirror change, no backend call. Rapid repeated clicks produce
    /// exactly one serialized mutation at a time.
    pub fn toggle(&self, kind: ToggleKind) {
        match kind {
            ToggleKind::Wifi => self.toggle_wifi(),
            ToggleKind::Mute | ToggleKind::Bluetooth | ToggleKind::NightLight => {
                self.toggle_flag(kind);
            }
        }
    }

    fn toggle_flag(&self, kind: ToggleKind) {
        let cell = self.flag_cell(kind);
        let Some(pending) = cell.pending().try_begin() else {
            debug!(%kind, "toggle already in flight; ignoring");
            return;
        };

        let prior = cell.get().value;
        let next = !prior;
        cell.set_optimistic(next);
        debug!(%kind, from = prior, to = next, "toggle dispatched");

        let engine = self.clone();
        tokio::spawn(async move {
            let _pending = pending;
            let result = engine.inner.gateway.call(kind.mutation(next)).await;
            let cell = engine.flag_cell(kind);
            match result {
                Ok(reply) => {
                    // The host owns the mute flip, so its reply is the
                    // authoritative state; other radios echo what we sent.
                    let confirmed = match reply {
                        MutateReply::Muted(actual) => actual,
                        MutateReply::Ack => next,
                    };
                    cell.confirm(confirmed);
                }
                Err(_) => {
                    cell.rollback(prior);
                    engine
                        .inner
                        .notifier
                        .notify(format!("Failed to toggle {kind}"), Severity::Error);
                }
            }
        });
    }

    /// WiFi keeps the composite enabled/connected/SSID view consistent:
    /// the optimistic flip drops the association when disabling, and every
    /// successful toggle schedules one deferred correction fetch, since
    /// association lags enablement.
    fn toggle_wifi(&self) {
        let cell = &self.inner.store.wifi;
        let Some(pending) = cell.pending().try_begin() else {
            debug!("wifi toggle already in flight; ignoring");
            return;
        };

        let prior = cell.get().value;
        let next_enabled = !prior.enabled;
        cell.set_optimistic(WifiStatus {
            enabled: next_enabled,
            connected: prior.connected && next_enabled,
            ssid: prior.ssid.clone(),
        });
        debug!(from = prior.enabled, to = next_enabled, "wifi toggle dispatched");

        let engine = self.clone();
        tokio::spawn(async move {
            let _pending = pending;
            let result = engine
                .inner
                .gateway
                .call(Mutation::SetWifiEnabled(next_enabled))
                .await;
            let cell = &engine.inner.store.wifi;
            match result {
                Ok(_) => {
                    cell.confirm(WifiStatus {
                        enabled: next_enabled,
                        connected: prior.connected && next_enabled,
                        ssid: prior.ssid,
                    });
                    engine.schedule_wifi_correction();
                }
                Err(_) => {
                    cell.rollback(prior);
                    engine
                        .inner
                        .notifier
                        .notify("Failed to toggle wifi", Severity::Error);
                }
            }
        });
    }

    /// One deferred authoritative fetch of the WiFi triple. Single-shot,
    /// single-slot: a newer toggle cancels an outstanding correction and
    /// schedules its own.
    fn schedule_wifi_correction(&self) {
        let token = self.inner.wifi_settle.restart();
        let engine = self.clone();
        tokio::spawn(async move {
            tokio::select! {
                biased;
                () = token.cancelled() => {}
                () = tokio::time::sleep(engine.inner.config.wifi_settle_delay) => {
                    let _ = engine.reconcile_one(ControlKind::Wifi).await;
                }
            }
        });
    }

    /// Request a host suspend: hide the panel, give the compositor a
    /// moment, then send the suspend command. One request at a time;
    /// there is no mirrored value and nothing to roll back.
    pub fn suspend(&self) {
        let Some(pending) = self.inner.store.suspend_pending.try_begin() else {
            debug!("suspend already in flight; ignoring");
            return;
        };

        let engine = self.clone();
        tokio::spawn(async move {
            let _pending = pending;
            // A failed hide is cosmetic; the suspend still goes out.
            let _ = engine.inner.gateway.call(Mutation::CloseWindow).await;
            tokio::time::sleep(engine.inner.config.suspend_delay).await;

            if engine.inner.gateway.call(Mutation::Suspend).await.is_err() {
                engine
                    .inner
                    .notifier
                    .notify("Failed to suspend", Severity::Error);
            }
        });
    }

    fn flag_cell(&self, kind: ToggleKind) -> &ControlCell<bool> {
        match kind {
            ToggleKind::Mute => &self.inner.store.muted,
            ToggleKind::Bluetooth => &self.inner.store.bluetooth,
            ToggleKind::NightLight => &self.inner.store.night_light,
            // WiFi carries a composite value and takes its own path.
            ToggleKind::Wifi => unreachable!("wifi is handled by toggle_wifi"),
        }
    }
}
