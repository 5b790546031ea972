//! Presentation-side collaborator contracts.
//!
//! The scene composes frames through [`DisplaySurface`] and never talks to
//! a frame buffer directly; the settings worker adjusts backlight through
//! [`DisplayControl`]. Both are narrow seams so hosts and tests can supply
//! their own implementations.

use hid::TouchPos;
use thiserror::Error;

use crate::config::Settings;

/// Content-screen dimensions in pixels.
pub const SCREEN_WIDTH: i32 = 320;
pub const SCREEN_HEIGHT: i32 = 240;

/// The two composition layers of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenLayer {
    /// Status bar, diagnostics, anything host-chrome.
    Chrome,
    /// The scene's own scrollable content area.
    Content,
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u32);

impl Color {
    pub const LIGHT_BG: Color = Color(0xF4F4F4);
    pub const DARK_BG: Color = Color(0x141414);
    pub const LIGHT_TEXT: Color = Color(0x101010);
    pub const DARK_TEXT: Color = Color(0xE8E8E8);
    pub const ACCENT: Color = Color(0xC03030);
    pub const RULE: Color = Color(0x808080);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSize {
    Small,
    Medium,
}

/// Whether the displayed theme is dark this frame.
///
/// Flash mode overrides the stored night level: the displayed level
/// alternates with `flash_phase` on every rendered frame.
pub fn effective_dark(settings: &Settings, flash_phase: bool) -> bool {
    if settings.flash_mode {
        flash_phase
    } else {
        settings.night_mode != 0
    }
}

pub fn background_color(dark: bool) -> Color {
    if dark {
        Color::DARK_BG
    } else {
        Color::LIGHT_BG
    }
}

pub fn text_color(dark: bool) -> Color {
    if dark {
        Color::DARK_TEXT
    } else {
        Color::LIGHT_TEXT
    }
}

/// Frame-composition contract the host's graphics layer implements.
///
/// Calls arrive in a fixed order per rendered frame: `frame_ready`, then
/// one `layer_ready` per layer with draw calls in between, then `submit`.
/// `wait_vblank` is called instead of the whole sequence when the frame is
/// skipped under power saving.
pub trait DisplaySurface {
    fn frame_ready(&mut self);
    fn layer_ready(&mut self, layer: ScreenLayer, clear: Color);
    fn draw_text(&mut self, text: &str, x: i32, y: i32, size: FontSize, color: Color);
    fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color);
    /// Host-owned status chrome (clock, battery, title bar).
    fn draw_top_chrome(&mut self);
    /// Debug marker at the current touch position.
    fn draw_touch_marker(&mut self, pos: Option<TouchPos>);
    fn submit(&mut self);
    /// Block until the next display refresh signal (bounded, one frame).
    fn wait_vblank(&mut self);
}

#[derive(Debug, Error)]
#[error("display control failure: {0}")]
pub struct DisplayError(pub String);

/// Display hardware contract, called only from the settings worker.
pub trait DisplayControl: Send + Sync {
    fn set_brightness(&self, persist: bool, immediate: bool, level: u8) -> Result<(), DisplayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flash_overrides_displayed_level() {
        let settings = Settings {
            flash_mode: true,
            night_mode: 1,
            ..Settings::default()
        };
        assert!(!effective_dark(&settings, false));
        assert!(effective_dark(&settings, true));
    }

    #[test]
    fn night_level_used_without_flash() {
        let settings = Settings {
            night_mode: 1,
            ..Settings::default()
        };
        assert!(effective_dark(&settings, false));
        assert!(effective_dark(&settings, true));
    }
}
