//! Shared test doubles for the settings scene and its worker.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tempfile::TempDir;

use hid::{Button, InputSnapshot, TouchPos};
use pockettube::config::{Language, Settings, SettingsStore};
use pockettube::display::{
    Color, DisplayControl, DisplayError, DisplaySurface, FontSize, ScreenLayer,
};
use pockettube::locale::{StringTable, StrKey};
use pockettube::playback::PlaybackBar;
use pockettube::scene::settings::SettingsScene;
use pockettube::scene::{NavigationIntent, SceneId};
use pockettube::services::{ContentLanguageSink, InputSource, SceneServices, ThumbnailPriority};
use pockettube::ui::{DiagnosticLog, ModalOverlay, OverlayMenu};

/// Poll `condition` until it holds or `timeout` elapses.
pub fn wait_until(timeout: Duration, condition: impl Fn() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    condition()
}

/// Render-count probe shared with a [`CountingSurface`].
#[derive(Clone, Default)]
pub struct RenderProbe {
    pub submits: Arc<AtomicUsize>,
    pub vblanks: Arc<AtomicUsize>,
}

impl RenderProbe {
    pub fn submits(&self) -> usize {
        self.submits.load(Ordering::SeqCst)
    }

    pub fn vblanks(&self) -> usize {
        self.vblanks.load(Ordering::SeqCst)
    }
}

/// Surface that only counts; drawing is a no-op.
pub struct CountingSurface {
    probe: RenderProbe,
}

impl CountingSurface {
    pub fn new(probe: RenderProbe) -> Self {
        Self { probe }
    }
}

impl DisplaySurface for CountingSurface {
    fn frame_ready(&mut self) {}
    fn layer_ready(&mut self, _layer: ScreenLayer, _clear: Color) {}
    fn draw_text(&mut self, _text: &str, _x: i32, _y: i32, _size: FontSize, _color: Color) {}
    fn draw_rect(&mut self, _x: i32, _y: i32, _width: i32, _height: i32, _color: Color) {}
    fn draw_top_chrome(&mut self) {}
    fn draw_touch_marker(&mut self, _pos: Option<TouchPos>) {}

    fn submit(&mut self) {
        self.probe.submits.fetch_add(1, Ordering::SeqCst);
    }

    fn wait_vblank(&mut self) {
        self.probe.vblanks.fetch_add(1, Ordering::SeqCst);
    }
}

/// Input source fed from a queue of snapshots; empty frames after that.
pub struct ScriptedInput {
    queue: Arc<Mutex<Vec<InputSnapshot>>>,
}

#[derive(Clone)]
pub struct InputScript {
    queue: Arc<Mutex<Vec<InputSnapshot>>>,
}

impl InputScript {
    pub fn push(&self, snapshot: InputSnapshot) {
        self.queue.lock().push(snapshot);
    }
}

impl ScriptedInput {
    pub fn new() -> (Self, InputScript) {
        let queue = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                queue: Arc::clone(&queue),
            },
            InputScript { queue },
        )
    }
}

impl InputSource for ScriptedInput {
    fn take_snapshot(&mut self) -> InputSnapshot {
        let mut queue = self.queue.lock();
        if queue.is_empty() {
            InputSnapshot::default()
        } else {
            queue.remove(0)
        }
    }
}

pub fn press_b() -> InputSnapshot {
    let mut snapshot = InputSnapshot::default();
    snapshot.pressed.insert(Button::B);
    snapshot
}

pub fn press_select() -> InputSnapshot {
    let mut snapshot = InputSnapshot::default();
    snapshot.pressed.insert(Button::Select);
    snapshot
}

pub fn touch_at(x: i32, y: i32) -> InputSnapshot {
    InputSnapshot {
        touch_pressed: true,
        touch_held: true,
        touch: Some(TouchPos { x, y }),
        last_touch: Some(TouchPos { x, y }),
        ..InputSnapshot::default()
    }
}

/// Brightness hardware recording every applied level.
#[derive(Clone, Default)]
pub struct FakeDisplayControl {
    pub levels: Arc<Mutex<Vec<u8>>>,
    pub fail: Arc<AtomicBool>,
}

impl FakeDisplayControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn applied(&self) -> Vec<u8> {
        self.levels.lock().clone()
    }
}

impl DisplayControl for FakeDisplayControl {
    fn set_brightness(&self, _persist: bool, _immediate: bool, level: u8) -> Result<(), DisplayError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DisplayError("injected failure".to_string()));
        }
        self.levels.lock().push(level);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct RecordingSink {
    pub languages: Arc<Mutex<Vec<Language>>>,
}

impl ContentLanguageSink for RecordingSink {
    fn content_language_changed(&self, language: Language) {
        self.languages.lock().push(language);
    }
}

#[derive(Clone, Default)]
pub struct RecordingThumbnails {
    pub last: Arc<Mutex<Option<SceneId>>>,
}

impl ThumbnailPriority for RecordingThumbnails {
    fn set_active_scene(&self, scene: SceneId) {
        *self.last.lock() = Some(scene);
    }
}

/// Playback stub with a switchable playing state; records bar updates.
#[derive(Clone, Default)]
pub struct StubPlayback {
    pub playing: Arc<AtomicBool>,
    pub bar_updates: Arc<AtomicUsize>,
}

impl PlaybackBar for StubPlayback {
    fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }

    fn draw_bar(&mut self, _surface: &mut dyn DisplaySurface) {}

    fn update_bar(&mut self, _input: &InputSnapshot, _intent: &mut NavigationIntent) {
        self.bar_updates.fetch_add(1, Ordering::SeqCst);
    }
}

/// Modal overlay stub with a switchable show flag; counts received inputs.
#[derive(Clone, Default)]
pub struct StubModal {
    pub showing: Arc<AtomicBool>,
    pub inputs: Arc<AtomicUsize>,
}

impl ModalOverlay for StubModal {
    fn is_showing(&self) -> bool {
        self.showing.load(Ordering::SeqCst)
    }

    fn draw(&mut self, _surface: &mut dyn DisplaySurface, _strings: &StringTable) {}

    fn update(&mut self, _input: &InputSnapshot) {
        self.inputs.fetch_add(1, Ordering::SeqCst);
    }
}

/// Overlay menu stub; counts resume notifications and records the icon y.
#[derive(Clone, Default)]
pub struct StubMenu {
    pub resumes: Arc<AtomicUsize>,
    pub icon_y: Arc<Mutex<Option<i32>>>,
}

impl OverlayMenu for StubMenu {
    fn on_resume(&mut self) {
        self.resumes.fetch_add(1, Ordering::SeqCst);
    }

    fn draw(&mut self, _surface: &mut dyn DisplaySurface, icon_y: i32) {
        *self.icon_y.lock() = Some(icon_y);
    }

    fn update(&mut self, _input: &InputSnapshot, _intent: &mut NavigationIntent, _current: SceneId) {
    }
}

/// Every probe handle for a scene built by [`scene_fixture`].
pub struct Probes {
    pub render: RenderProbe,
    pub input: InputScript,
    pub display: FakeDisplayControl,
    pub sink: RecordingSink,
    pub thumbnails: RecordingThumbnails,
    pub playback: StubPlayback,
    pub help: StubModal,
    pub error: StubModal,
    pub menu: StubMenu,
    pub log: DiagnosticLog,
    pub settings_path: PathBuf,
    // Keeps the settings directory alive for the scene's lifetime.
    _dir: Option<TempDir>,
}

/// Build a settings scene wired entirely to test doubles, persisting into
/// a fresh temp directory.
pub fn scene_fixture() -> (SettingsScene, Probes) {
    let dir = TempDir::new().expect("temp dir");
    let settings_path = dir.path().join("settings.toml");
    scene_at(Some(dir), settings_path)
}

/// Like [`scene_fixture`], but reusing an existing settings file path so a
/// test can span an exit + init cycle across two scene instances.
pub fn scene_with_path(settings_path: PathBuf) -> (SettingsScene, Probes) {
    scene_at(None, settings_path)
}

fn scene_at(dir: Option<TempDir>, settings_path: PathBuf) -> (SettingsScene, Probes) {
    let render = RenderProbe::default();
    let (input, script) = ScriptedInput::new();
    let display = FakeDisplayControl::new();
    let sink = RecordingSink::default();
    let thumbnails = RecordingThumbnails::default();
    let playback = StubPlayback::default();
    let help = StubModal::default();
    let error = StubModal::default();
    let menu = StubMenu::default();
    let log = DiagnosticLog::new();

    let services = SceneServices {
        input: Box::new(input),
        surface: Box::new(CountingSurface::new(render.clone())),
        display: Arc::new(display.clone()),
        playback: Box::new(playback.clone()),
        overlay_menu: Box::new(menu.clone()),
        help: Box::new(help.clone()),
        error: Box::new(error.clone()),
        thumbnails: Arc::new(thumbnails.clone()),
        content_language: Arc::new(sink.clone()),
    };

    let store = SettingsStore::new(Settings::default(), settings_path.clone());
    let scene = SettingsScene::new(services, store, StringTable::new(), log.clone());

    let probes = Probes {
        render,
        input: script,
        display,
        sink,
        thumbnails,
        playback,
        help,
        error,
        menu,
        log,
        settings_path,
        _dir: dir,
    };
    (scene, probes)
}

/// Localized label helper used by a few assertions.
pub fn english(key: StrKey) -> String {
    let table = StringTable::new();
    table.reload(Language::En).expect("embedded table parses");
    table.get(key)
}
