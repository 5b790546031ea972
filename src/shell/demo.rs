//! Demo-shell implementations of the hardware and application
//! collaborators the settings scene talks to.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use hid::InputSnapshot;
use tracing::info;

use crate::config::Language;
use crate::display::{Color, DisplayControl, DisplayError, DisplaySurface, FontSize, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::locale::{StrKey, StringTable};
use crate::playback::{PlaybackBar, PLAYING_BAR_HEIGHT};
use crate::scene::{NavigationIntent, SceneId};
use crate::services::{ContentLanguageSink, ThumbnailPriority};

/// Fake playback subsystem; the `p` key toggles the playing state so the
/// bar and the content-area clamp can be exercised.
#[derive(Clone)]
pub struct DemoPlayback {
    playing: Arc<AtomicBool>,
    strings: StringTable,
}

impl DemoPlayback {
    pub fn new(strings: StringTable) -> Self {
        Self {
            playing: Arc::new(AtomicBool::new(false)),
            strings,
        }
    }

    pub fn toggle(&self) {
        self.playing.fetch_xor(true, Ordering::SeqCst);
    }
}

impl PlaybackBar for DemoPlayback {
    fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }

    fn draw_bar(&mut self, surface: &mut dyn DisplaySurface) {
        let top = SCREEN_HEIGHT - PLAYING_BAR_HEIGHT;
        surface.draw_rect(0, top, SCREEN_WIDTH, PLAYING_BAR_HEIGHT, Color::ACCENT);
        surface.draw_text(
            &self.strings.get(StrKey::NowPlaying),
            6,
            top + 4,
            FontSize::Small,
            Color::DARK_TEXT,
        );
    }

    fn update_bar(&mut self, input: &InputSnapshot, intent: &mut NavigationIntent) {
        if input.touch_pressed {
            if let Some(pos) = input.touch {
                if pos.y >= SCREEN_HEIGHT - PLAYING_BAR_HEIGHT {
                    *intent = NavigationIntent::To(SceneId::VideoPlayer);
                }
            }
        }
    }
}

/// Brightness "hardware" that just reports what it was asked to do.
pub struct LoggingDisplayControl;

impl DisplayControl for LoggingDisplayControl {
    fn set_brightness(&self, persist: bool, immediate: bool, level: u8) -> Result<(), DisplayError> {
        info!(target: "shell/display", persist, immediate, level, "set brightness");
        Ok(())
    }
}

pub struct NullThumbnails;

impl ThumbnailPriority for NullThumbnails {
    fn set_active_scene(&self, _scene: SceneId) {}
}

pub struct LoggingContentSink;

impl ContentLanguageSink for LoggingContentSink {
    fn content_language_changed(&self, language: Language) {
        info!(target: "shell/content", language = language.code(), "content language changed");
    }
}
