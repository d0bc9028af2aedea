// ── Mirror store ──
//
// The sole shared mutable resource in the engine: last-known state for
// every control plus per-control in-flight markers. No network or timer
// logic lives here; components mutate it through the cell operations and
// the rendering layer observes it through `watch` subscriptions.

mod cell;

pub(crate) use cell::{ControlCell, PendingFlag};

use tokio::sync::watch;

use crate::control::{ControlState, WifiStatus};
use switchboard_backend::AllStates;

/// In-memory mirror of every control's last-known state.
///
/// Created once at engine construction, populated by the initial full
/// reconciliation, and discarded with the engine. Nothing here persists.
pub struct MirrorStore {
    pub(crate) volume: ControlCell<u8>,
    pub(crate) muted: ControlCell<bool>,
    pub(crate) brightness: ControlCell<u8>,
    pub(crate) wifi: ControlCell<WifiStatus>,
    pub(crate) bluetooth: ControlCell<bool>,
    pub(crate) night_light: ControlCell<bool>,
    /// Suspend carries no mirrored value, but still gets an in-flight
    /// marker: one suspend request at a time.
    pub(crate) suspend_pending: PendingFlag,
}

impl MirrorStore {
    pub(crate) fn new() -> Self {
        Self {
            volume: ControlCell::new(0),
            muted: ControlCell::new(false),
            brightness: ControlCell::new(1),
            wifi: ControlCell::new(WifiStatus::default()),
            bluetooth: ControlCell::new(false),
            night_light: ControlCell::new(false),
            suspend_pending: PendingFlag::new(),
        }
    }

    /// Overwrite every cell from an authoritative backend snapshot.
    ///
    /// Reconciliation wins over any optimistic guess regardless of timing,
    /// so each cell is confirmed unconditionally.
    pub(crate) fn apply_snapshot(&self, states: &AllStates) {
        self.volume.confirm(states.volume.volume);
        self.muted.confirm(states.volume.muted);
        self.brightness.confirm(states.brightness.brightness);
        self.wifi.confirm(WifiStatus::from(&states.network));
        self.bluetooth.confirm(states.network.bluetooth_enabled);
        self.night_light.confirm(states.display.night_light_enabled);
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn volume(&self) -> ControlState<u8> {
        self.volume.get()
    }

    pub fn muted(&self) -> ControlState<bool> {
        self.muted.get()
    }

    pub fn brightness(&self) -> ControlState<u8> {
        self.brightness.get()
    }

    pub fn wifi(&self) -> ControlState<WifiStatus> {
        self.wifi.get()
    }

    pub fn bluetooth(&self) -> ControlState<bool> {
        self.bluetooth.get()
    }

    pub fn night_light(&self) -> ControlState<bool> {
        self.night_light.get()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_volume(&self) -> watch::Receiver<ControlState<u8>> {
        self.volume.subscribe()
    }

    pub fn subscribe_muted(&self) -> watch::Receiver<ControlState<bool>> {
        self.muted.subscribe()
    }

    pub fn subscribe_brightness(&self) -> watch::Receiver<ControlState<u8>> {
        self.brightness.subscribe()
    }

    pub fn subscribe_wifi(&self) -> watch::Receiver<ControlState<WifiStatus>> {
        self.wifi.subscribe()
    }

    pub fn subscribe_bluetooth(&self) -> watch::Receiver<ControlState<bool>> {
        self.bluetooth.subscribe()
    }

    pub fn subscribe_night_light(&self) -> watch::Receiver<ControlState<bool>> {
        self.night_light.subscribe()
    }
}
