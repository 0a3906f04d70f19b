//! Integration tests for the rain layer and its terminal host

use std::time::Duration;

use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;
use termfolio::rain::{FrameHost, RainLayer, RainOptions, Viewport, START_DEPTH, TOP_DEPTH};
use termfolio::tui::{AppState, FrameScheduler, TerminalCanvas, TERMINAL_CELL_SIZE};
use termfolio::{TermfolioConfig, TermfolioError, ThemeMode};

fn mount(
    scheduler: &mut FrameScheduler,
    options: RainOptions,
    seed: u64,
) -> RainLayer<TerminalCanvas> {
    let canvas = TerminalCanvas::acquire(scheduler.viewport());
    RainLayer::mount(
        scheduler,
        Some(canvas),
        ThemeMode::Dark,
        options,
        StdRng::seed_from_u64(seed),
    )
}

/// Deliver frames at a fixed host-time spacing.
fn pump(
    layer: &mut RainLayer<TerminalCanvas>,
    scheduler: &mut FrameScheduler,
    from: Duration,
    frames: u32,
    spacing: Duration,
) -> Duration {
    let mut now = from;
    for _ in 0..frames {
        now += spacing;
        if let Some(handle) = scheduler.take_frame() {
            layer.on_frame(scheduler, handle, now);
        }
    }
    now
}

/// Test that a 1024-wide viewport with 14-unit cells yields 73 columns at the start depth
#[test]
fn test_default_cell_columns() {
    let mut scheduler = FrameScheduler::new(Viewport::new(1024, 768));
    let layer = mount(&mut scheduler, RainOptions::default(), 1);

    let columns = layer.columns().unwrap();
    assert_eq!(columns.len(), 73);
    assert!(columns.depths().iter().all(|d| *d == START_DEPTH));
    assert!(scheduler.has_pending_frame());
    assert_eq!(scheduler.listener_count(), 1);
}

/// Test that mounting without a surface is silent and inert
#[test]
fn test_mount_without_surface() {
    let mut scheduler = FrameScheduler::new(Viewport::new(80, 24));
    let mut layer: RainLayer<TerminalCanvas> = RainLayer::mount(
        &mut scheduler,
        None,
        ThemeMode::Dark,
        RainOptions::default(),
        StdRng::seed_from_u64(1),
    );

    assert!(!layer.is_active());
    assert!(!scheduler.has_pending_frame());
    assert!(!scheduler.has_resize_listeners());

    layer.on_resize(Viewport::new(100, 100));
    layer.set_theme(&mut scheduler, ThemeMode::Light);
    layer.unmount(&mut scheduler);
    assert!(layer.surface().is_none());
    assert!(!scheduler.has_pending_frame());
}

/// Test that the rain draws and fades on a terminal canvas over a second of frames
#[test]
fn test_rain_fills_canvas() {
    let options = RainOptions::default().with_cell_size(TERMINAL_CELL_SIZE);
    let mut scheduler = FrameScheduler::new(Viewport::new(40, 20));
    let mut layer = mount(&mut scheduler, options, 42);

    pump(&mut layer, &mut scheduler, Duration::ZERO, 60, Duration::from_millis(16));

    let canvas = layer.surface().unwrap();
    assert!(canvas.lit_cells() > 0);
    assert!(layer
        .columns()
        .unwrap()
        .depths()
        .iter()
        .any(|d| *d > START_DEPTH));
}

/// Test that columns reaching the bottom eventually respawn at the top
#[test]
fn test_columns_respawn_at_top() {
    let options = RainOptions::default().with_cell_size(TERMINAL_CELL_SIZE);
    let mut scheduler = FrameScheduler::new(Viewport::new(30, 4));
    let mut layer = mount(&mut scheduler, options, 7);

    let mut seen_top = false;
    let mut now = Duration::ZERO;
    for _ in 0..400 {
        now = pump(&mut layer, &mut scheduler, now, 1, Duration::from_millis(34));
        if layer
            .columns()
            .unwrap()
            .depths()
            .iter()
            .any(|d| *d == TOP_DEPTH)
        {
            seen_top = true;
            break;
        }
    }
    assert!(seen_top);
}

/// Test that resize rebuilds fall-state for the new width
#[test]
fn test_resize_resets_fall_state() {
    let mut scheduler = FrameScheduler::new(Viewport::new(1024, 768));
    let mut layer = mount(&mut scheduler, RainOptions::default(), 3);
    pump(&mut layer, &mut scheduler, Duration::ZERO, 30, Duration::from_millis(40));

    let viewport = Viewport::new(700, 500);
    scheduler.set_viewport(viewport);
    layer.on_resize(viewport);

    let columns = layer.columns().unwrap();
    assert_eq!(columns.len(), 50);
    assert!(columns.depths().iter().all(|d| *d == START_DEPTH));
    assert_eq!(layer.surface().unwrap().lit_cells(), 0);
}

/// Test that a theme change rebuilds glyphs and keeps exactly one frame and listener
#[test]
fn test_theme_change_rebuilds() {
    let mut scheduler = FrameScheduler::new(Viewport::new(200, 100));
    let mut layer = mount(&mut scheduler, RainOptions::default(), 5);
    let before = layer.pending_frame();

    layer.set_theme(&mut scheduler, ThemeMode::Light);

    assert_ne!(layer.pending_frame(), before);
    assert_eq!(scheduler.listener_count(), 1);
    let glyphs = layer.glyphs().unwrap();
    assert_eq!(glyphs.theme(), ThemeMode::Light);
    assert!(glyphs
        .iter()
        .all(|g| g.color == ThemeMode::Light.palette().foreground));
}

/// Test that unmount leaves the host with nothing registered
#[test]
fn test_unmount_cleans_up() {
    let mut scheduler = FrameScheduler::new(Viewport::new(300, 200));
    let mut layer = mount(&mut scheduler, RainOptions::default(), 9);
    let stale = layer.pending_frame().unwrap();

    layer.unmount(&mut scheduler);
    assert!(!layer.is_active());
    assert!(!scheduler.has_pending_frame());
    assert!(!scheduler.has_resize_listeners());

    // a stale delivery after unmount does nothing
    layer.on_frame(&mut scheduler, stale, Duration::from_secs(1));
    assert!(!scheduler.has_pending_frame());
}

/// Test that the app state mounts rain at one glyph per terminal cell
#[test]
fn test_app_state_rain_matches_terminal() {
    let state = AppState::with_rng(
        TermfolioConfig::default(),
        Viewport::new(100, 30),
        StdRng::seed_from_u64(11),
    );
    assert_eq!(state.rain.columns().map(|c| c.len()), Some(100));
    assert_eq!(state.rain.options().cell_size, TERMINAL_CELL_SIZE);
}

/// Test that a config file is loaded and CLI-style overrides apply on top
#[test]
fn test_config_load_and_override() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
theme = "light"
prompt = "guest@site:~$"

[profile]
name = "Grace"
email = "grace@example.com"

[[profile.skills]]
title = "Languages"
skills = ["Rust", "COBOL"]
"#,
    )
    .unwrap();

    let config = TermfolioConfig::load(&path).unwrap();
    assert_eq!(config.theme, ThemeMode::Light);
    assert_eq!(config.prompt, "guest@site:~$");
    assert_eq!(config.profile.name, "Grace");
    assert_eq!(config.profile.skills.len(), 1);
    assert_eq!(config.profile.skills[0].skills, vec!["Rust", "COBOL"]);
    assert!(config.rain.enabled);

    let config = config.with_theme(ThemeMode::Dark).with_rain_enabled(false);
    assert_eq!(config.theme, ThemeMode::Dark);
    assert!(!config.rain.enabled);
}

/// Test that a missing config file yields defaults
#[test]
fn test_config_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = TermfolioConfig::load(&temp_dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, TermfolioConfig::default());
}

/// Test that a malformed config file reports its path
#[test]
fn test_config_malformed_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "theme = [unclosed").unwrap();

    let err = TermfolioConfig::load(&path).unwrap_err();
    assert!(matches!(err, TermfolioError::ConfigParse { .. }));
    assert!(err.to_string().contains("config.toml"));
}
