#![allow(clippy::unwrap_used)]
// End-to-end engine behavior against the scripted in-memory backend.
// All tests run on a paused current-thread runtime, mirroring the
// single-threaded cooperative model the engine is written for.

use std::time::Duration;

use pretty_assertions::assert_eq;
use tokio_test::assert_ok;

use switchboard_backend::{MemoryBackend, Mutation, MutationKind, Query};
use switchboard_core::{Engine, EngineConfig, Severity, SliderKind, ToggleKind};

fn engine_with(backend: &MemoryBackend) -> Engine<MemoryBackend> {
    Engine::new(backend.clone(), EngineConfig::default())
}

async fn started_engine(backend: &MemoryBackend) -> Engine<MemoryBackend> {
    let engine = engine_with(backend);
    engine.start().await.unwrap();
    engine
}

// ── Startup / reconciliation ────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn start_populates_and_confirms_every_control() {
    let backend = MemoryBackend::new();
    backend.set_volume(65, true);
    backend.set_brightness(80);
    backend.set_wifi(true, true, Some("Home"));
    backend.set_bluetooth(true);

    let engine = engine_with(&backend);
    tokio_test::assert_ok!(engine.start().await);

    let volume = engine.store().volume();
    assert_eq!(volume.value, 65);
    assert!(volume.confirmed);
    assert!(engine.store().muted().value);
    assert_eq!(engine.store().brightness().value, 80);
    assert_eq!(engine.wifi_label(), "Home");
    assert!(engine.store().bluetooth().value);
    assert_eq!(backend.queries(), vec![Query::AllStates]);
}

#[tokio::test(start_paused = true)]
async fn failed_reconciliation_keeps_last_known_state_and_notifies() {
    let backend = MemoryBackend::new();
    let engine = engine_with(&backend);

    backend.fail_query(Query::AllStates);
    assert!(engine.start().await.is_err());

    // The mirror still holds its construction defaults, unconfirmed.
    assert!(!engine.store().volume().confirmed);
    let notice = engine.notice().unwrap();
    assert_eq!(notice.severity, Severity::Error);
}

#[tokio::test(start_paused = true)]
async fn window_shown_refetches_drifted_state() {
    let backend = MemoryBackend::new();
    let engine = started_engine(&backend).await;

    // State drifts while the panel is hidden.
    backend.set_volume(80, false);
    backend.set_night_light(true);

    engine.window_shown().await;

    assert_eq!(engine.store().volume().value, 80);
    assert!(engine.store().night_light().value);
}

// ── WiFi status labels ──────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn wifi_label_scenarios() {
    let backend = MemoryBackend::new();
    backend.set_wifi(true, true, Some("Home"));
    let engine = started_engine(&backend).await;
    assert_eq!(engine.wifi_label(), "Home");

    backend.set_wifi(true, false, None);
    engine.window_shown().await;
    assert_eq!(engine.wifi_label(), "On");

    backend.set_wifi(false, false, None);
    engine.window_shown().await;
    assert_eq!(engine.wifi_label(), "Off");
}

// ── Debounced sliders ───────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn slider_input_mirrors_synchronously_without_backend_call() {
    let backend = MemoryBackend::new();
    let engine = started_engine(&backend).await;

    engine.slider_input(SliderKind::Volume, 73);

    let volume = engine.store().volume();
    assert_eq!(volume.value, 73);
    assert!(!volume.confirmed);
    assert_eq!(backend.mutations(), vec![]);
}

#[tokio::test(start_paused = true)]
async fn commit_burst_coalesces_into_one_call_with_final_value() {
    let backend = MemoryBackend::new();
    let engine = started_engine(&backend).await;
    let start = tokio::time::Instant::now();

    engine.slider_input(SliderKind::Volume, 30);
    engine.slider_commit(SliderKind::Volume);
    tokio::time::sleep(Duration::from_millis(10)).await;

    engine.slider_input(SliderKind::Volume, 50);
    engine.slider_commit(SliderKind::Volume);
    tokio::time::sleep(Duration::from_millis(10)).await;

    engine.slider_input(SliderKind::Volume, 80);
    engine.slider_commit(SliderKind::Volume);

    // t = 69: the last quiet period (20 + 50) has not elapsed yet.
    tokio::time::sleep(Duration::from_millis(49)).await;
    assert_eq!(backend.mutations(), vec![]);

    tokio::time::sleep(Duration::from_millis(5)).await;
    assert_eq!(backend.mutations(), vec![Mutation::SetVolume(80)]);
    assert!(start.elapsed() >= Duration::from_millis(70));

    let volume = engine.store().volume();
    assert_eq!(volume.value, 80);
    assert!(volume.confirmed);
}

#[tokio::test(start_paused = true)]
async fn dispatch_carries_value_current_at_fire_time() {
    let backend = MemoryBackend::new();
    let engine = started_engine(&backend).await;

    engine.slider_input(SliderKind::Volume, 30);
    engine.slider_commit(SliderKind::Volume);

    // More drag input arrives after the commit but before the timer
    // fires; no further commit signal.
    tokio::time::sleep(Duration::from_millis(20)).await;
    engine.slider_input(SliderKind::Volume, 44);

    tokio::time::sleep(Duration::from_millis(40)).await;
    assert_eq!(backend.mutations(), vec![Mutation::SetVolume(44)]);
}

#[tokio::test(start_paused = true)]
async fn slider_adjust_clamps_and_commits_through_debounce() {
    let backend = MemoryBackend::new();
    backend.set_brightness(3);
    let engine = started_engine(&backend).await;

    // Repeated key-down steps, each restarting the quiet period.
    engine.slider_adjust(SliderKind::Brightness, -5);
    engine.slider_adjust(SliderKind::Brightness, -5);

    // The floor holds: brightness never reaches 0.
    assert_eq!(engine.store().brightness().value, 1);

    tokio::time::sleep(Duration::from_millis(60)).await;
    assert_eq!(backend.mutations(), vec![Mutation::SetBrightness(1)]);
}

#[tokio::test(start_paused = true)]
async fn failed_slider_dispatch_resyncs_from_backend_and_notifies() {
    let backend = MemoryBackend::new();
    backend.set_brightness(70);
    let engine = started_engine(&backend).await;

    backend.fail_mutation(MutationKind::SetBrightness);
    engine.slider_input(SliderKind::Brightness, 25);
    engine.slider_commit(SliderKind::Brightness);
    assert_eq!(engine.store().brightness().value, 25);

    tokio::time::sleep(Duration::from_millis(60)).await;

    // Ground truth restored via the single-control fetch, not a local
    // rollback.
    let brightness = engine.store().brightness();
    assert_eq!(brightness.value, 70);
    assert!(brightness.confirmed);
    assert!(backend.queries().contains(&Query::Brightness));

    let notice = engine.notice().unwrap();
    assert_eq!(notice.severity, Severity::Error);
}

// ── Guarded toggles ─────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn back_to_back_toggles_serialize_into_one_call() {
    let backend = MemoryBackend::new().with_latency(Duration::from_millis(5));
    let engine = started_engine(&backend).await;

    engine.toggle(ToggleKind::Bluetooth);
    engine.toggle(ToggleKind::Bluetooth);

    // The second call was a no-op: the optimistic flip from the first
    // call is still in place, unconfirmed.
    let bluetooth = engine.store().bluetooth();
    assert!(bluetooth.value);
    assert!(!bluetooth.confirmed);

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(backend.mutations(), vec![Mutation::SetBluetoothEnabled(true)]);
    assert!(engine.store().bluetooth().confirmed);

    // The permit cleared with the first call, so a new toggle goes out.
    engine.toggle(ToggleKind::Bluetooth);
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(backend.mutations().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn failed_toggle_rolls_back_and_notifies() {
    let backend = MemoryBackend::new();
    let engine = started_engine(&backend).await;
    assert!(!engine.store().night_light().value);

    backend.fail_mutation(MutationKind::SetNightLightEnabled);
    engine.toggle(ToggleKind::NightLight);
    assert!(engine.store().night_light().value);

    tokio::time::sleep(Duration::from_millis(5)).await;

    let night_light = engine.store().night_light();
    assert!(!night_light.value);
    assert!(night_light.confirmed);
    assert_eq!(engine.notice().unwrap().severity, Severity::Error);
}

#[tokio::test(start_paused = true)]
async fn mute_confirms_with_authoritative_backend_state() {
    let backend = MemoryBackend::new();
    let engine = started_engine(&backend).await;

    engine.toggle(ToggleKind::Mute);
    tokio::time::sleep(Duration::from_millis(5)).await;

    let muted = engine.store().muted();
    assert!(muted.value);
    assert!(muted.confirmed);
    assert_eq!(backend.mutations(), vec![Mutation::ToggleMute]);
}

// ── WiFi toggle and deferred correction ─────────────────────────────

#[tokio::test(start_paused = true)]
async fn wifi_toggle_flips_optimistically_and_defers_correction() {
    let backend = MemoryBackend::new();
    backend.set_wifi(false, false, None);
    let engine = started_engine(&backend).await;
    assert_eq!(engine.wifi_label(), "Off");

    engine.toggle(ToggleKind::Wifi);

    // Synchronous optimistic flip, before the backend call resolves.
    assert!(engine.store().wifi().value.enabled);
    assert_eq!(engine.wifi_label(), "On");

    // The mutation resolves; no association yet. The deferred fetch at
    // +1000 ms must leave the label at "On", not an SSID.
    tokio::time::sleep(Duration::from_millis(1100)).await;
    assert_eq!(engine.wifi_label(), "On");
    assert!(engine.store().wifi().confirmed);

    let network_fetches = backend
        .queries()
        .iter()
        .filter(|q| **q == Query::Network)
        .count();
    assert_eq!(network_fetches, 1, "the correction is single-shot");
}

#[tokio::test(start_paused = true)]
async fn wifi_correction_picks_up_late_association() {
    let backend = MemoryBackend::new();
    backend.set_wifi(false, false, None);
    let engine = started_engine(&backend).await;

    engine.toggle(ToggleKind::Wifi);
    tokio::time::sleep(Duration::from_millis(100)).await;

    // The radio associates while the correction timer runs.
    backend.set_wifi(true, true, Some("Home"));

    tokio::time::sleep(Duration::from_millis(1000)).await;
    assert_eq!(engine.wifi_label(), "Home");
}

#[tokio::test(start_paused = true)]
async fn failed_wifi_toggle_rolls_back_the_composite_view() {
    let backend = MemoryBackend::new();
    backend.set_wifi(true, true, Some("Home"));
    let engine = started_engine(&backend).await;
    assert_eq!(engine.wifi_label(), "Home");

    backend.fail_mutation(MutationKind::SetWifiEnabled);
    engine.toggle(ToggleKind::Wifi);
    assert_eq!(engine.wifi_label(), "Off");

    tokio::time::sleep(Duration::from_millis(5)).await;

    // Enablement, association, and SSID all restored.
    assert_eq!(engine.wifi_label(), "Home");
    assert!(engine.store().wifi().confirmed);
    assert_eq!(engine.notice().unwrap().severity, Severity::Error);
}

// ── Suspend ─────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn suspend_hides_window_then_suspends_after_delay() {
    let backend = MemoryBackend::new();
    let engine = started_engine(&backend).await;

    engine.suspend();
    // A second press while the first is in flight is ignored.
    engine.suspend();

    tokio::time::sleep(Duration::from_millis(250)).await;
    assert_eq!(
        backend.mutations(),
        vec![Mutation::CloseWindow, Mutation::Suspend]
    );
    assert!(!backend.window_visible());
}

#[tokio::test(start_paused = true)]
async fn failed_suspend_notifies_and_releases_the_guard() {
    let backend = MemoryBackend::new();
    let engine = started_engine(&backend).await;

    backend.fail_mutation(MutationKind::Suspend);
    engine.suspend();
    tokio::time::sleep(Duration::from_millis(250)).await;
    assert_eq!(engine.notice().unwrap().severity, Severity::Error);

    // The pending marker cleared on the failure path too.
    backend.clear_failures();
    engine.suspend();
    tokio::time::sleep(Duration::from_millis(250)).await;
    let suspends = backend
        .mutations()
        .iter()
        .filter(|m| **m == Mutation::Suspend)
        .count();
    assert_eq!(suspends, 2);
}

// ── Notices ─────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn repeated_failures_replace_rather_than_stack() {
    let backend = MemoryBackend::new();
    let engine = started_engine(&backend).await;

    backend.fail_mutation(MutationKind::SetNightLightEnabled);
    backend.fail_mutation(MutationKind::SetBluetoothEnabled);

    engine.toggle(ToggleKind::NightLight);
    tokio::time::sleep(Duration::from_millis(5)).await;
    engine.toggle(ToggleKind::Bluetooth);
    tokio::time::sleep(Duration::from_millis(5)).await;

    // One visible notice: the latest failure.
    let notice = engine.notice().unwrap();
    assert!(notice.message.contains("bluetooth"));

    // And it auto-dismisses.
    tokio::time::sleep(Duration::from_millis(2600)).await;
    assert_eq!(engine.notice(), None);
}
