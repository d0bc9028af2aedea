// ── Engine timing configuration ──
//
// Every delay the engine schedules, in one injectable struct. The shell
// constructs an `EngineConfig` and hands it in -- core never reads files.

use std::time::Duration;

/// Timing knobs for a single engine instance.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Quiet period a slider must observe after its last commit signal
    /// before the pending value is dispatched.
    pub quiet_period: Duration,
    /// Delay before the single-shot WiFi correction fetch after a
    /// successful enable/disable. Association lags enablement.
    pub wifi_settle_delay: Duration,
    /// Delay between the window-close request and the suspend command,
    /// giving the compositor time to hide the panel.
    pub suspend_delay: Duration,
    /// How long a notice stays visible before auto-dismissing.
    pub notice_duration: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            quiet_period: Duration::from_millis(50),
            wifi_settle_delay: Duration::from_millis(1000),
            suspend_delay: Duration::from_millis(200),
            notice_duration: Duration::from_millis(2500),
        }
    }
}
