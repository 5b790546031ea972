//! Playback collaborator contract: the "currently playing" bar drawn along
//! the bottom edge of the content screen while a video is active.

use hid::InputSnapshot;

use crate::display::DisplaySurface;
use crate::scene::NavigationIntent;

/// Height in pixels reserved for the bar when it is shown.
pub const PLAYING_BAR_HEIGHT: i32 = 20;

pub trait PlaybackBar {
    /// Whether a video is currently playing (bar should be shown).
    fn is_playing(&self) -> bool;
    fn draw_bar(&mut self, surface: &mut dyn DisplaySurface);
    /// Dispatch input to the bar; tapping it may request navigation to the
    /// player scene through `intent`.
    fn update_bar(&mut self, input: &InputSnapshot, intent: &mut NavigationIntent);
}
