// ── Operation vocabulary ──
//
// Every read and write the engine can ask of a backend. Queries are
// fieldless and hashable so fakes can match on them directly; mutations
// carry payloads, so `MutationKind` (derived discriminants) serves the
// same purpose for them.

use serde::{Deserialize, Serialize};
use strum::EnumDiscriminants;

use crate::types::{AllStates, NetworkState};

/// A read of host control state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Query {
    /// Full snapshot of every control, fetched in one round trip.
    AllStates,
    Volume,
    Mute,
    Brightness,
    /// WiFi enablement/association/SSID plus Bluetooth power.
    Network,
    Bluetooth,
    NightLight,
}

/// A write to host control state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumDiscriminants)]
#[strum_discriminants(name(MutationKind))]
#[strum_discriminants(derive(Hash))]
pub enum Mutation {
    /// Set sink volume, percentage 0–100.
    SetVolume(u8),
    /// Flip the sink mute flag. The reply carries the resulting state.
    ToggleMute,
    /// Set backlight brightness, percentage 1–100.
    SetBrightness(u8),
    SetWifiEnabled(bool),
    SetBluetoothEnabled(bool),
    SetNightLightEnabled(bool),
    /// Suspend the host. Fire-and-forget; never idempotent.
    Suspend,
    /// Ask the window collaborator to hide the panel.
    CloseWindow,
}

/// Reply to a [`Query`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateReply {
    All(AllStates),
    Volume(u8),
    Mute(bool),
    Brightness(u8),
    Network(NetworkState),
    Bluetooth(bool),
    NightLight(bool),
}

/// Reply to a [`Mutation`].
///
/// Most writes acknowledge and nothing more — the caller already knows the
/// value it sent. `ToggleMute` is the exception: the flip happens on the
/// host, so the authoritative resulting flag comes back with the ack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutateReply {
    Ack,
    Muted(bool),
}
