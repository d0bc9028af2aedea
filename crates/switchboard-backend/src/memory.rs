// ── Scripted in-memory backend ──
//
// Stand-in for a real host executor. Holds the same state a host would,
// answers queries from it, applies mutations to it, and records every
// call in arrival order. Tests script it: seed state, inject failures
// per operation, add latency to widen interleaving windows.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::debug;

use crate::error::BackendError;
use crate::request::{MutateReply, Mutation, MutationKind, Query, StateReply};
use crate::types::{AllStates, BrightnessState, DisplayState, NetworkState, VolumeState};
use crate::SystemBackend;

#[derive(Debug)]
#[allow(clippy::struct_excessive_bools)]
struct Inner {
    volume: u8,
    muted: bool,
    brightness: u8,
    max_brightness: u32,
    wifi_enabled: bool,
    wifi_connected: bool,
    wifi_ssid: Option<String>,
    bluetooth_enabled: bool,
    night_light_enabled: bool,
    window_visible: bool,
    failing_queries: HashSet<Query>,
    failing_mutations: HashSet<MutationKind>,
    queries: Vec<Query>,
    mutations: Vec<Mutation>,
}

impl Default for Inner {
    fn default() -> Self {
        Self {
            volume: 50,
            muted: false,
            brightness: 50,
            max_brightness: 255,
            wifi_enabled: true,
            wifi_connected: false,
            wifi_ssid: None,
            bluetooth_enabled: false,
            night_light_enabled: false,
            window_visible: true,
            failing_queries: HashSet::new(),
            failing_mutations: HashSet::new(),
            queries: Vec::new(),
            mutations: Vec::new(),
        }
    }
}

/// In-memory [`SystemBackend`] for tests and embedding experiments.
///
/// Cheaply cloneable; all clones share state, so a test can keep a handle
/// for scripting and assertions while the engine owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    inner: Arc<Mutex<Inner>>,
    latency: Option<Duration>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every response by `latency`, widening the window in which
    /// calls are in flight.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    // ── State scripting ──────────────────────────────────────────────

    pub fn set_volume(&self, volume: u8, muted: bool) {
        let mut inner = self.lock();
        inner.volume = volume;
        inner.muted = muted;
    }

    pub fn set_brightness(&self, brightness: u8) {
        self.lock().brightness = brightness;
    }

    pub fn set_wifi(&self, enabled: bool, connected: bool, ssid: Option<&str>) {
        let mut inner = self.lock();
        inner.wifi_enabled = enabled;
        inner.wifi_connected = connected;
        inner.wifi_ssid = ssid.map(String::from);
    }

    pub fn set_bluetooth(&self, enabled: bool) {
        self.lock().bluetooth_enabled = enabled;
    }

    pub fn set_night_light(&self, enabled: bool) {
        self.lock().night_light_enabled = enabled;
    }

    // ── Failure injection ────────────────────────────────────────────

    /// Make `query` fail until [`clear_failures`](Self::clear_failures).
    pub fn fail_query(&self, query: Query) {
        self.lock().failing_queries.insert(query);
    }

    /// Make every mutation of `kind` fail until
    /// [`clear_failures`](Self::clear_failures).
    pub fn fail_mutation(&self, kind: MutationKind) {
        self.lock().failing_mutations.insert(kind);
    }

    pub fn clear_failures(&self) {
        let mut inner = self.lock();
        inner.failing_queries.clear();
        inner.failing_mutations.clear();
    }

    // ── Journal ──────────────────────────────────────────────────────

    /// Every mutation received so far, in arrival order.
    pub fn mutations(&self) -> Vec<Mutation> {
        self.lock().mutations.clone()
    }

    /// Every query received so far, in arrival order.
    pub fn queries(&self) -> Vec<Query> {
        self.lock().queries.clone()
    }

    /// Whether the panel window is visible (toggled by
    /// [`Mutation::CloseWindow`]).
    pub fn window_visible(&self) -> bool {
        self.lock().window_visible
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("memory backend lock poisoned")
    }

    async fn settle(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn snapshot(inner: &Inner) -> AllStates {
        AllStates {
            volume: VolumeState {
                volume: inner.volume,
                muted: inner.muted,
            },
            brightness: BrightnessState {
                brightness: inner.brightness,
                max_brightness: inner.max_brightness,
            },
            network: Self::network(inner),
            display: DisplayState {
                night_light_enabled: inner.night_light_enabled,
            },
        }
    }

    fn network(inner: &Inner) -> NetworkState {
        NetworkState {
            wifi_enabled: inner.wifi_enabled,
            wifi_connected: inner.wifi_enabled && inner.wifi_connected,
            wifi_ssid: if inner.wifi_enabled && inner.wifi_connected {
                inner.wifi_ssid.clone()
            } else {
                None
            },
            bluetooth_enabled: inner.bluetooth_enabled,
            bluetooth_connected: false,
        }
    }
}

impl SystemBackend for MemoryBackend {
    async fn query(&self, query: Query) -> Result<StateReply, BackendError> {
        self.settle().await;
        let mut inner = self.lock();
        inner.queries.push(query);

        if inner.failing_queries.contains(&query) {
            debug!(?query, "injected query failure");
            return Err(BackendError::CommandFailed(format!(
                "injected failure for {query:?}"
            )));
        }

        Ok(match query {
            Query::AllStates => StateReply::All(Self::snapshot(&inner)),
            Query::Volume => StateReply::Volume(inner.volume),
            Query::Mute => StateReply::Mute(inner.muted),
            Query::Brightness => StateReply::Brightness(inner.brightness),
            Query::Network => StateReply::Network(Self::network(&inner)),
            Query::Bluetooth => StateReply::Bluetooth(inner.bluetooth_enabled),
            Query::NightLight => StateReply::NightLight(inner.night_light_enabled),
        })
    }

    async fn mutate(&self, mutation: Mutation) -> Result<MutateReply, BackendError> {
        self.settle().await;
        let mut inner = self.lock();
        inner.mutations.push(mutation.clone());

        if inner.failing_mutations.contains(&MutationKind::from(&mutation)) {
            debug!(?mutation, "injected mutation failure");
            return Err(BackendError::CommandFailed(format!(
                "injected failure for {mutation:?}"
            )));
        }

        match mutation {
            Mutation::SetVolume(value) => {
                if value > 100 {
                    return Err(BackendError::InvalidArgument(format!(
                        "percentage must be 0-100, got {value}"
                    )));
                }
                inner.volume = value;
                Ok(MutateReply::Ack)
            }
            Mutation::ToggleMute => {
                inner.muted = !inner.muted;
                Ok(MutateReply::Muted(inner.muted))
            }
            Mutation::SetBrightness(value) => {
                if value > 100 {
                    return Err(BackendError::InvalidArgument(format!(
                        "percentage must be 0-100, got {value}"
                    )));
                }
                // Hosts refuse to black out the panel entirely.
                inner.brightness = value.max(1);
                Ok(MutateReply::Ack)
            }
            Mutation::SetWifiEnabled(enabled) => {
                inner.wifi_enabled = enabled;
                if !enabled {
                    inner.wifi_connected = false;
                }
                Ok(MutateReply::Ack)
            }
            Mutation::SetBluetoothEnabled(enabled) => {
                inner.bluetooth_enabled = enabled;
                Ok(MutateReply::Ack)
            }
            Mutation::SetNightLightEnabled(enabled) => {
                inner.night_light_enabled = enabled;
                Ok(MutateReply::Ack)
            }
            Mutation::Suspend => Ok(MutateReply::Ack),
            Mutation::CloseWindow => {
                inner.window_visible = false;
                Ok(MutateReply::Ack)
            }
        }
    }
}
