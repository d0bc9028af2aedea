// ── Control domain model ──
//
// The fixed vocabulary of panel controls, their value domains, and the
// derived WiFi status view. Clamping lives here so no out-of-domain value
// can ever be stored or dispatched.

use serde::{Deserialize, Serialize};
use strum::Display;
use switchboard_backend::{Mutation, NetworkState, Query};

/// Every control the panel mirrors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ControlKind {
    Volume,
    Mute,
    Brightness,
    Wifi,
    Bluetooth,
    NightLight,
    Suspend,
}

/// The two percentage sliders, each with its own legal domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum SliderKind {
    Volume,
    Brightness,
}

impl SliderKind {
    /// Clamp a raw input value into this slider's domain.
    ///
    /// Volume accepts the full 0–100 range. Brightness floors at 1: a fully
    /// dark backlight would leave the user unable to see the panel that
    /// could restore it.
    pub fn clamp(self, raw: i16) -> u8 {
        let floor = match self {
            Self::Volume => 0,
            Self::Brightness => 1,
        };
        u8::try_from(raw.clamp(floor, 100)).expect("clamped into u8 range")
    }

    pub(crate) fn mutation(self, value: u8) -> Mutation {
        match self {
            Self::Volume => Mutation::SetVolume(value),
            Self::Brightness => Mutation::SetBrightness(value),
        }
    }

    pub(crate) fn query(self) -> Query {
        match self {
            Self::Volume => Query::Volume,
            Self::Brightness => Query::Brightness,
        }
    }

    pub(crate) fn kind(self) -> ControlKind {
        match self {
            Self::Volume => ControlKind::Volume,
            Self::Brightness => ControlKind::Brightness,
        }
    }
}

/// The binary controls driven through the guarded toggle path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ToggleKind {
    Mute,
    Wifi,
    Bluetooth,
    NightLight,
}

impl ToggleKind {
    pub(crate) fn mutation(self, enable: bool) -> Mutation {
        match self {
            // The host flips mute itself; the desired state rides along
            // only for the other radios.
            Self::Mute => Mutation::ToggleMute,
            Self::Wifi => Mutation::SetWifiEnabled(enable),
            Self::Bluetooth => Mutation::SetBluetoothEnabled(enable),
            Self::NightLight => Mutation::SetNightLightEnabled(enable),
        }
    }

    pub(crate) fn kind(self) -> ControlKind {
        match self {
            Self::Mute => ControlKind::Mute,
            Self::Wifi => ControlKind::Wifi,
            Self::Bluetooth => ControlKind::Bluetooth,
            Self::NightLight => ControlKind::NightLight,
        }
    }
}

/// A mirrored control value plus whether the backend has acknowledged it.
///
/// `confirmed` is false exactly while an optimistic write is outstanding;
/// every in-flight call settles the record back to confirmed through
/// `confirm` or `rollback`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlState<T> {
    pub value: T,
    pub confirmed: bool,
}

impl<T> ControlState<T> {
    pub(crate) fn confirmed(value: T) -> Self {
        Self {
            value,
            confirmed: true,
        }
    }
}

/// Composite WiFi view: enablement, association, and the network name.
///
/// Enablement and association are decoupled — the radio can be on with no
/// network attached — so the display label is derived, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WifiStatus {
    pub enabled: bool,
    pub connected: bool,
    pub ssid: Option<String>,
}

impl WifiStatus {
    /// Human-readable status: the SSID while associated, otherwise a bare
    /// on/off indicator. The SSID is never shown unless the radio is both
    /// enabled and connected.
    pub fn label(&self) -> &str {
        if self.enabled && self.connected {
            if let Some(ssid) = self.ssid.as_deref() {
                return ssid;
            }
        }
        if self.enabled { "On" } else { "Off" }
    }
}

impl From<&NetworkState> for WifiStatus {
    fn from(net: &NetworkState) -> Self {
        Self {
            enabled: net.wifi_enabled,
            connected: net.wifi_enabled && net.wifi_connected,
            ssid: net.wifi_ssid.clone(),
        }
    }
}
