// ── Engine facade ──
//
// The main entry point for shells. Constructed once at process start with
// an injected backend and configuration; torn down at process exit. No
// ambient globals — everything the components share lives behind one
// `Arc`, so handles are cheap to clone into spawned tasks.

use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use switchboard_backend::SystemBackend;

use crate::config::EngineConfig;
use crate::error::CoreError;
use crate::gateway::Gateway;
use crate::notify::{Notice, Notifier};
use crate::store::MirrorStore;

/// The synchronization engine behind the panel.
///
/// Cheaply cloneable via `Arc<EngineInner>`. Input flows in through the
/// slider/toggle methods, state flows out through the [`MirrorStore`]
/// subscriptions, and the backend is only ever reached through the
/// internal gateway.
pub struct Engine<B: SystemBackend> {
    pub(crate) inner: Arc<EngineInner<B>>,
}

impl<B: SystemBackend> Clone for Engine<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

pub(crate) struct EngineInner<B> {
    pub(crate) config: EngineConfig,
    pub(crate) store: MirrorStore,
    pub(crate) gateway: Gateway<B>,
    pub(crate) notifier: Notifier,
    pub(crate) volume_timer: TimerSlot,
    pub(crate) brightness_timer: TimerSlot,
    pub(crate) wifi_settle: TimerSlot,
}

impl<B: SystemBackend> Engine<B> {
    /// Create a new engine around `backend`. Does NOT touch the backend —
    /// call [`start()`](Self::start) to run the initial reconciliation.
    pub fn new(backend: B, config: EngineConfig) -> Self {
        let notifier = Notifier::new(config.notice_duration);
        Self {
            inner: Arc::new(EngineInner {
                config,
                store: MirrorStore::new(),
                gateway: Gateway::new(Arc::new(backend)),
                notifier,
                volume_timer: TimerSlot::new(),
                brightness_timer: TimerSlot::new(),
                wifi_settle: TimerSlot::new(),
            }),
        }
    }

    /// Populate the mirror store with an initial full reconciliation.
    ///
    /// On failure the store keeps its construction defaults and a notice
    /// is shown; the engine remains usable and the next reconciliation
    /// (e.g. the window reappearing) will try again.
    pub async fn start(&self) -> Result<(), CoreError> {
        let result = self.reconcile_all().await;
        if result.is_ok() {
            info!("engine started");
        }
        result
    }

    /// The surrounding window became visible again. Mirrored state may
    /// have drifted arbitrarily while hidden, so re-fetch everything.
    pub async fn window_shown(&self) {
        debug!("window visible again; reconciling");
        let _ = self.reconcile_all().await;
    }

    /// Access the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.inner.config
    }

    /// Read access to the mirrored control states.
    pub fn store(&self) -> &MirrorStore {
        &self.inner.store
    }

    /// Convenience: the current WiFi display label ("Off", "On", or SSID).
    pub fn wifi_label(&self) -> String {
        self.inner.store.wifi().value.label().to_owned()
    }

    /// The currently visible notice, if any.
    pub fn notice(&self) -> Option<Notice> {
        self.inner.notifier.current()
    }

    /// Subscribe to notice changes.
    pub fn subscribe_notices(&self) -> watch::Receiver<Option<Notice>> {
        self.inner.notifier.subscribe()
    }
}

/// Single-slot holder for a cancelable scheduled task.
///
/// Each `restart` cancels whatever was scheduled before and hands out a
/// fresh token for the replacement: at most one schedule per slot is ever
/// live, which is what turns a burst of commit signals into one dispatch.
pub(crate) struct TimerSlot {
    token: Mutex<Option<CancellationToken>>,
}

impl TimerSlot {
    pub(crate) fn new() -> Self {
        Self {
            token: Mutex::new(None),
        }
    }

    pub(crate) fn restart(&self) -> CancellationToken {
        let token = CancellationToken::new();
        let previous = self
            .token
            .lock()
            .expect("timer slot lock poisoned")
            .replace(token.clone());
        if let Some(previous) = previous {
            previous.cancel();
        }
        token
    }
}
