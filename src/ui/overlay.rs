//! Overlay collaborator contracts.

use hid::InputSnapshot;

use crate::display::DisplaySurface;
use crate::locale::StringTable;
use crate::scene::{NavigationIntent, SceneId};

/// Side length of the overlay-menu icon in pixels.
pub const OVERLAY_MENU_ICON_SIZE: i32 = 20;

/// Help and error overlays. While showing, an overlay captures input
/// exclusively; the scene routes nothing else until it is dismissed.
pub trait ModalOverlay {
    fn is_showing(&self) -> bool;
    fn draw(&mut self, surface: &mut dyn DisplaySurface, strings: &StringTable);
    fn update(&mut self, input: &InputSnapshot);
}

/// The slide-out menu available on every scene.
pub trait OverlayMenu {
    /// Called when the owning scene becomes frontmost again.
    fn on_resume(&mut self);
    /// `icon_y` is adjusted by the scene so the icon clears the playing bar.
    fn draw(&mut self, surface: &mut dyn DisplaySurface, icon_y: i32);
    /// May rewrite `intent` to request navigation to another scene.
    fn update(&mut self, input: &InputSnapshot, intent: &mut NavigationIntent, current: SceneId);
}
