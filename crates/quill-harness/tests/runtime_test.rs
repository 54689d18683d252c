//! End-to-end runtime tests on the simulation driver.
//!
//! Each test scripts host and surface events into a [`SimDriver`], runs the
//! generic [`Runtime`] to completion, and checks the posted envelopes,
//! navigations and invariant log.

use std::time::Duration;

use quill_app::{AppEvent, ComposerConfig, FontCatalog, Route, Runtime};
use quill_core::{DriverId, KeyboardInsets, PanelId};
use quill_harness::{InvariantRegistry, SimDriver, SimEnv};
use quill_proto::{Command, FontDescriptor, Outbound};

fn catalog() -> FontCatalog {
    FontCatalog::new(vec![
        FontDescriptor::new("LXGW").with_field("url", "fonts/lxgw.ttf"),
        FontDescriptor::new("Noto").with_field("url", "fonts/noto.ttf"),
    ])
}

fn driver() -> SimDriver {
    let driver = SimDriver::new(SimEnv::new())
        .with_frame(Duration::from_millis(16))
        .with_invariants(InvariantRegistry::standard());
    driver.inject_event(AppEvent::InputMounted(true));
    driver.inject_event(AppEvent::PanelLayout { panel: PanelId::Emoji, height: 320.0 });
    driver.inject_event(AppEvent::PanelLayout { panel: PanelId::ToolTray, height: 180.0 });
    driver
}

async fn run(handle: &SimDriver, config: &ComposerConfig) {
    let runtime = Runtime::new(handle.clone(), config, catalog());
    runtime.run().await.unwrap();
}

#[tokio::test]
async fn mount_injects_bootstrap_and_resets_content() {
    let handle = driver();
    let config = ComposerConfig { initial_font: Some("LXGW".into()), ..Default::default() };

    run(&handle, &config).await;

    let bootstrap = handle.bootstrap().unwrap();
    assert!(bootstrap.starts_with("window.ENV_RN = true;"));
    assert!(bootstrap.contains("\"scriptName\":\"Noto\""));

    let posted = handle.take_posted();
    assert!(matches!(&posted[0], Outbound::EnableFont { data } if data.script_name == "LXGW"));
    assert_eq!(posted[1], Outbound::SetContent { content: String::new() });
    assert_eq!(posted.len(), 2);
    assert!(handle.is_stopped());
    assert!(handle.violations().is_empty());
}

#[tokio::test]
async fn font_flow_opens_panel_then_keyboard() {
    let handle = driver();
    handle.inject_event(AppEvent::Tap(Command::ChangeFont));
    handle.inject_event(AppEvent::FontSelected("Noto".into()));
    handle.inject_event(AppEvent::Tap(Command::ChangeFont));

    run(&handle, &ComposerConfig::default()).await;

    assert_eq!(handle.navigations(), vec![Route::FontList]);
    assert!(handle.keyboard_up());

    let posted = handle.take_posted();
    let enables = posted.iter().filter(|m| matches!(m, Outbound::EnableFont { .. })).count();
    let resets = posted.iter().filter(|m| matches!(m, Outbound::SetContent { .. })).count();
    assert_eq!(enables, 1);
    // One reset on mount, one for the font change.
    assert_eq!(resets, 2);
    // Keyboard rising edge after the second font tap.
    assert_eq!(posted.last(), Some(&Outbound::ShowToolbar));
    assert!(handle.violations().is_empty());
}

#[tokio::test]
async fn surface_messages_drive_toolbar_and_selection() {
    let handle = driver();
    handle.inject_message(r#"{"messageType":"richEditor","type":"SHOW_TOOLBAR"}"#);
    handle.inject_message(r#"{"messageType":"richEditor","type":"SHOW_TOOLBAR"}"#);
    handle.inject_message(
        r#"{"messageType":"richEditor","block":"ordered-list-item","style":["ITALIC"]}"#,
    );
    handle.inject_message(r#"{"messageType":"somethingElse","type":"HIDE_TOOLBAR"}"#);

    run(&handle, &ComposerConfig::default()).await;

    let view = handle.last_view().unwrap();
    assert!(view.toolbar_visible);
    assert_eq!(view.toolbar_opacity(), 1.0);
    assert_eq!(view.highlighted(), vec![Command::Italic, Command::OrderedList]);
}

#[tokio::test]
async fn close_stops_before_queued_events() {
    let handle = driver();
    handle.inject_event(AppEvent::Close);
    handle.inject_event(AppEvent::Tap(Command::Bold));

    run(&handle, &ComposerConfig::default()).await;

    assert!(handle.is_stopped());
    assert!(handle.has_pending());
    assert!(handle.take_posted().iter().all(|m| !matches!(m, Outbound::DocumentCommand(_))));
}

#[tokio::test]
async fn keyboard_and_panels_stay_exclusive() {
    let handle = driver();
    for event in [
        AppEvent::Tap(Command::InsertImage),
        AppEvent::Tap(Command::ChangeFont),
        AppEvent::Tap(Command::InsertImage),
        AppEvent::Tap(Command::InsertImage),
        AppEvent::Tap(Command::ChangeFont),
        AppEvent::Tap(Command::ChangeFont),
        AppEvent::PanelLayout { panel: PanelId::Emoji, height: 260.0 },
        AppEvent::Tap(Command::Italic),
    ] {
        handle.inject_event(event);
    }

    run(&handle, &ComposerConfig::default()).await;

    assert!(handle.violations().is_empty(), "{:?}", handle.violations());
    assert_eq!(handle.navigations(), vec![Route::FontList, Route::FontList]);
    assert!(handle.keyboard_up());

    let view = handle.last_view().unwrap();
    assert_eq!(view.active_driver, Some(DriverId::Keyboard));
    assert!(view.panels.iter().all(|panel| !panel.visible));
    assert!(
        handle
            .take_posted()
            .iter()
            .any(|m| matches!(m, Outbound::DocumentCommand(entry) if entry.command == Command::Italic))
    );
}

#[tokio::test]
async fn composer_settles_after_animation() {
    let handle = driver();
    handle.inject_event(AppEvent::Tap(Command::InsertImage));
    for _ in 0..20 {
        handle.inject_event(AppEvent::Tick);
    }

    run(&handle, &ComposerConfig::default()).await;

    // 20 frames of 16ms is past the 250ms tween.
    let view = handle.last_view().unwrap();
    assert_eq!(view.composer_offset, -180.0);
    assert_eq!(view.panel(PanelId::ToolTray).map(|p| p.offset), Some(0.0));
    assert!(handle.env().elapsed() >= Duration::from_millis(320));
}

#[tokio::test]
async fn user_dismissed_keyboard_releases_slot() {
    let handle = driver();
    handle.inject_event(AppEvent::Tap(Command::ChangeFont));
    handle.inject_event(AppEvent::Tap(Command::ChangeFont));
    // Platform gesture drops the keyboard without a blur.
    handle.inject_event(AppEvent::KeyboardInsets(KeyboardInsets::bottom(0.0)));
    for _ in 0..20 {
        handle.inject_event(AppEvent::Tick);
    }

    run(&handle, &ComposerConfig::default()).await;

    let view = handle.last_view().unwrap();
    assert_eq!(view.active_driver, None);
    assert_eq!(view.composer_offset, 0.0);
    assert!(handle.violations().is_empty());
}
