// ── Control state payloads ──
//
// Wire-shaped snapshots of host control state. These cross the executor
// boundary, so they stay serializable even though the in-process fake
// never serializes them.

use serde::{Deserialize, Serialize};

/// Audio sink state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeState {
    /// Volume as a percentage, 0–100.
    pub volume: u8,
    pub muted: bool,
}

/// Display backlight state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrightnessState {
    /// Brightness as a percentage, 1–100. Hosts report the raw hardware
    /// range separately via `max_brightness`.
    pub brightness: u8,
    pub max_brightness: u32,
}

/// Radio state: WiFi enablement, association, and Bluetooth power.
///
/// `wifi_ssid` is only meaningful while `wifi_connected` holds; enabling
/// the radio does not imply association.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct NetworkState {
    pub wifi_enabled: bool,
    pub wifi_connected: bool,
    pub wifi_ssid: Option<String>,
    pub bluetooth_enabled: bool,
    pub bluetooth_connected: bool,
}

/// Display effects state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayState {
    pub night_light_enabled: bool,
}

/// Every control state in one snapshot, as returned by
/// [`Query::AllStates`](crate::Query::AllStates).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllStates {
    pub volume: VolumeState,
    pub brightness: BrightnessState,
    pub network: NetworkState,
    pub display: DisplayState,
}
