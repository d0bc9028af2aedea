// ── Reconciler ──
//
// Authoritative re-fetch. Whatever optimistic guesses are in the mirror,
// a reconciliation that lands overwrites them — it is the authority of
// record. A reconciliation that fails changes nothing: the mirror keeps
// its last known values and the user sees a notice.

use tracing::{debug, warn};

use switchboard_backend::{BackendError, Query, StateReply, SystemBackend};

use crate::control::{ControlKind, WifiStatus};
use crate::engine::Engine;
use crate::error::CoreError;
use crate::notify::Severity;

impl<B: SystemBackend> Engine<B> {
    /// Fetch every control state in one round trip and overwrite the
    /// whole mirror store. Runs at engine start and whenever the window
    /// becomes visible again.
    pub async fn reconcile_all(&self) -> Result<(), CoreError> {
        let reply = match self.inner.gateway.fetch(Query::AllStates).await {
            Ok(reply) => reply,
            Err(err) => {
                self.inner
                    .notifier
                    .notify("Failed to refresh system state", Severity::Error);
                return Err(err);
            }
        };

        let states = match reply {
            StateReply::All(states) => states,
            other => return Err(unexpected_reply(&other, Query::AllStates)),
        };

        self.inner.store.apply_snapshot(&states);
        debug!("full reconciliation applied");
        Ok(())
    }

    /// Re-fetch a single control. Used after a failed slider dispatch and
    /// for the deferred WiFi correction; deliberately narrow so it cannot
    /// clobber an unrelated in-flight optimistic write.
    pub async fn reconcile_one(&self, kind: ControlKind) -> Result<(), CoreError> {
        let query = match kind {
            ControlKind::Volume => Query::Volume,
            ControlKind::Mute => Query::Mute,
            ControlKind::Brightness => Query::Brightness,
            ControlKind::Wifi => Query::Network,
            ControlKind::Bluetooth => Query::Bluetooth,
            ControlKind::NightLight => Query::NightLight,
            // Fire-and-forget: there is no suspend state to fetch.
            ControlKind::Suspend => return Ok(()),
        };

        let reply = match self.inner.gateway.fetch(query).await {
            Ok(reply) => reply,
            Err(err) => {
                self.inner
                    .notifier
                    .notify(format!("Failed to refresh {kind} state"), Severity::Error);
                return Err(err);
            }
        };

        let store = &self.inner.store;
        match (kind, &reply) {
            (ControlKind::Volume, StateReply::Volume(value)) => store.volume.confirm(*value),
            (ControlKind::Mute, StateReply::Mute(muted)) => store.muted.confirm(*muted),
            (ControlKind::Brightness, StateReply::Brightness(value)) => {
                store.brightness.confirm(*value);
            }
            (ControlKind::Wifi, StateReply::Network(net)) => {
                store.wifi.confirm(WifiStatus::from(net));
            }
            (ControlKind::Bluetooth, StateReply::Bluetooth(enabled)) => {
                store.bluetooth.confirm(*enabled);
            }
            (ControlKind::NightLight, StateReply::NightLight(enabled)) => {
                store.night_light.confirm(*enabled);
            }
            _ => return Err(unexpected_reply(&reply, query)),
        }

        debug!(%kind, "control reconciled");
        Ok(())
    }
}

fn unexpected_reply(reply: &StateReply, query: Query) -> CoreError {
    warn!(?query, ?reply, "backend returned mismatched reply shape");
    CoreError::Query {
        source: BackendError::Parse(format!("unexpected reply {reply:?} for {query:?}")),
    }
}
