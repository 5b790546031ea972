//! Per-frame draw/update protocol tests: power-saving frame skip, input
//! dispatch precedence, overlay modality, and the playing-bar layout.

mod common;

use std::sync::atomic::Ordering;
use std::time::Duration;

use common::{press_b, press_select, scene_fixture, touch_at, wait_until};
use hid::InputSnapshot;
use pockettube::playback::PLAYING_BAR_HEIGHT;
use pockettube::scene::{NavigationIntent, Scene, SceneId};
use pockettube::ui::OVERLAY_MENU_ICON_SIZE;

fn touch_release_at(x: i32, y: i32) -> InputSnapshot {
    InputSnapshot {
        touch_released: true,
        last_touch: Some(hid::TouchPos { x, y }),
        ..InputSnapshot::default()
    }
}

#[test]
fn eco_mode_skips_idle_frames_but_returns_valid_intents() {
    let (mut scene, probes) = scene_fixture();
    scene.init();
    // Eco mode is on by default; the resume inside init forces exactly one
    // full redraw.
    assert_eq!(scene.draw(), NavigationIntent::None);
    assert_eq!(probes.render.submits(), 1);

    assert_eq!(scene.draw(), NavigationIntent::None);
    assert_eq!(scene.draw(), NavigationIntent::None);
    assert_eq!(probes.render.submits(), 1);
    assert_eq!(probes.render.vblanks(), 2);

    scene.exit();
}

#[test]
fn disabling_eco_mode_renders_every_frame() {
    let (mut scene, probes) = scene_fixture();
    scene.init();
    scene.store().update(|s| s.eco_mode = false);

    let _ = scene.draw();
    let _ = scene.draw();
    let _ = scene.draw();
    assert_eq!(probes.render.submits(), 3);
    assert_eq!(probes.render.vblanks(), 0);

    scene.exit();
}

#[test]
fn touch_interaction_forces_a_redraw_on_the_next_frame() {
    let (mut scene, probes) = scene_fixture();
    scene.init();
    let _ = scene.draw();
    assert_eq!(probes.render.submits(), 1);

    // This frame is skipped (no redraw pending), but the touch it carries
    // must schedule one.
    probes.input.push(touch_at(20, 100));
    let _ = scene.draw();
    assert_eq!(probes.render.submits(), 1);

    let _ = scene.draw();
    assert_eq!(probes.render.submits(), 2);

    scene.exit();
}

#[test]
fn error_overlay_captures_input_exclusively() {
    let (mut scene, probes) = scene_fixture();
    scene.init();

    probes.error.showing.store(true, Ordering::SeqCst);
    probes.input.push(press_b());
    assert_eq!(scene.draw(), NavigationIntent::None);
    assert_eq!(probes.error.inputs.load(Ordering::SeqCst), 1);

    probes.error.showing.store(false, Ordering::SeqCst);
    probes.input.push(press_b());
    assert_eq!(scene.draw(), NavigationIntent::Back);

    scene.exit();
}

#[test]
fn help_overlay_captures_input_when_no_error_is_showing() {
    let (mut scene, probes) = scene_fixture();
    scene.init();

    probes.help.showing.store(true, Ordering::SeqCst);
    probes.input.push(press_b());
    assert_eq!(scene.draw(), NavigationIntent::None);
    assert_eq!(probes.help.inputs.load(Ordering::SeqCst), 1);

    // Error outranks help.
    probes.error.showing.store(true, Ordering::SeqCst);
    probes.input.push(press_b());
    let _ = scene.draw();
    assert_eq!(probes.help.inputs.load(Ordering::SeqCst), 1);
    assert_eq!(probes.error.inputs.load(Ordering::SeqCst), 1);

    scene.exit();
}

#[test]
fn skipped_frames_still_dispatch_input_to_a_modal_overlay() {
    let (mut scene, probes) = scene_fixture();
    scene.init();
    let _ = scene.draw();
    assert_eq!(probes.render.submits(), 1);

    probes.error.showing.store(true, Ordering::SeqCst);
    probes.input.push(press_b());
    let _ = scene.draw();
    // Frame skipped, input not dropped. A modal overlay swallows the touch
    // flag, so no redraw gets scheduled either.
    assert_eq!(probes.render.submits(), 1);
    assert_eq!(probes.error.inputs.load(Ordering::SeqCst), 1);

    scene.exit();
}

#[test]
fn select_toggles_the_log_overlay() {
    let (mut scene, probes) = scene_fixture();
    scene.init();

    probes.input.push(press_select());
    let _ = scene.draw();
    assert!(probes.log.is_showing());

    probes.input.push(press_select());
    let _ = scene.draw();
    assert!(!probes.log.is_showing());

    scene.exit();
}

#[test]
fn log_overlay_does_not_capture_input() {
    let (mut scene, probes) = scene_fixture();
    scene.init();

    probes.log.toggle();
    probes.input.push(press_b());
    assert_eq!(scene.draw(), NavigationIntent::Back);
    assert!(probes.log.is_showing());

    scene.exit();
}

#[test]
fn playing_bar_adjusts_layout_and_receives_updates() {
    let (mut scene, probes) = scene_fixture();
    scene.init();
    scene.store().update(|s| s.eco_mode = false);

    probes.playback.playing.store(true, Ordering::SeqCst);
    let _ = scene.draw();
    assert_eq!(
        *probes.menu.icon_y.lock(),
        Some(240 - OVERLAY_MENU_ICON_SIZE - PLAYING_BAR_HEIGHT)
    );
    assert_eq!(probes.playback.bar_updates.load(Ordering::SeqCst), 1);

    probes.playback.playing.store(false, Ordering::SeqCst);
    let _ = scene.draw();
    assert_eq!(*probes.menu.icon_y.lock(), Some(240 - OVERLAY_MENU_ICON_SIZE));
    // Hidden bar gets no update calls.
    assert_eq!(probes.playback.bar_updates.load(Ordering::SeqCst), 1);

    scene.exit();
}

#[test]
fn every_frame_marks_the_scene_as_thumbnail_consumer() {
    let (mut scene, probes) = scene_fixture();
    scene.init();
    let _ = scene.draw();
    assert_eq!(*probes.thumbnails.last.lock(), Some(SceneId::Settings));
    scene.exit();
}

#[test]
fn tapping_the_eco_selector_flows_into_store_and_worker() {
    let (mut scene, probes) = scene_fixture();
    scene.init();
    assert!(scene.store().get().eco_mode);

    // The eco selector row sits at y 183..218; its first option cell
    // ("OFF") starts at x 160.
    probes.input.push(touch_at(200, 200));
    probes.input.push(touch_release_at(200, 200));
    let _ = scene.draw();
    let _ = scene.draw();

    assert!(!scene.store().get().eco_mode);
    // The raised save request reaches the worker and lands on disk.
    assert!(wait_until(Duration::from_secs(2), || {
        probes.settings_path.exists()
    }));

    scene.exit();
}
