//! Demo-shell overlay implementations: help, error, and the overlay menu.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use hid::{Button, InputSnapshot};
use parking_lot::Mutex;

use crate::display::{Color, DisplaySurface, FontSize};
use crate::locale::StringTable;
use crate::scene::{NavigationIntent, SceneId};
use crate::ui::{ModalOverlay, OverlayMenu, OVERLAY_MENU_ICON_SIZE};

const SHORTCUTS: &[(&str, &str)] = &[
    ("mouse", "touch panel"),
    ("Esc", "back (B button)"),
    ("Tab", "toggle log overlay (Select)"),
    ("Up/Down", "scroll log overlay"),
    ("p", "toggle fake playback bar"),
    ("h", "this help"),
    ("e", "raise a demo error"),
];

fn draw_panel(surface: &mut dyn DisplaySurface, title: &str, lines: &[String]) {
    let height = 30 + lines.len() as i32 * 12;
    let top = 40;
    surface.draw_rect(30, top, 260, height, Color::DARK_BG);
    surface.draw_text(title, 38, top + 6, FontSize::Medium, Color::DARK_TEXT);
    for (index, line) in lines.iter().enumerate() {
        surface.draw_text(
            line,
            38,
            top + 24 + index as i32 * 12,
            FontSize::Small,
            Color::DARK_TEXT,
        );
    }
}

/// Help overlay: a shortcut table. Modal; any press dismisses it.
#[derive(Clone, Default)]
pub struct DemoHelpOverlay {
    visible: Arc<AtomicBool>,
}

impl DemoHelpOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&self) {
        self.visible.fetch_xor(true, Ordering::SeqCst);
    }
}

impl ModalOverlay for DemoHelpOverlay {
    fn is_showing(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    fn draw(&mut self, surface: &mut dyn DisplaySurface, _strings: &StringTable) {
        let lines: Vec<String> = SHORTCUTS
            .iter()
            .map(|(key, what)| format!("{key:<9} {what}"))
            .collect();
        draw_panel(surface, "Shortcuts", &lines);
    }

    fn update(&mut self, input: &InputSnapshot) {
        if input.pressed.contains(Button::B)
            || input.pressed.contains(Button::A)
            || input.touch_pressed
        {
            self.visible.store(false, Ordering::SeqCst);
        }
    }
}

/// Error overlay: shows one message until dismissed. Modal.
#[derive(Clone, Default)]
pub struct DemoErrorOverlay {
    message: Arc<Mutex<Option<String>>>,
}

impl DemoErrorOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&self, message: impl Into<String>) {
        *self.message.lock() = Some(message.into());
    }

    pub fn show_demo_error(&self) {
        self.show("demo error: nothing actually went wrong");
    }
}

impl ModalOverlay for DemoErrorOverlay {
    fn is_showing(&self) -> bool {
        self.message.lock().is_some()
    }

    fn draw(&mut self, surface: &mut dyn DisplaySurface, _strings: &StringTable) {
        if let Some(message) = self.message.lock().clone() {
            draw_panel(surface, "Error", &[message, "press B to dismiss".to_string()]);
        }
    }

    fn update(&mut self, input: &InputSnapshot) {
        if input.pressed.contains(Button::B)
            || input.pressed.contains(Button::A)
            || input.touch_pressed
        {
            *self.message.lock() = None;
        }
    }
}

const MENU_ENTRIES: &[(SceneId, &str)] = &[
    (SceneId::Search, "Search"),
    (SceneId::Subscriptions, "Subscriptions"),
    (SceneId::History, "History"),
    (SceneId::About, "About"),
];

const ENTRY_HEIGHT: i32 = 14;
const MENU_WIDTH: i32 = 110;

/// Minimal overlay menu: an icon in the bottom-left corner that expands
/// into a scene list.
#[derive(Default)]
pub struct DemoOverlayMenu {
    open: bool,
    icon_y: i32,
}

impl DemoOverlayMenu {
    pub fn new() -> Self {
        Self::default()
    }

    fn icon_hit(&self, x: i32, y: i32) -> bool {
        x < OVERLAY_MENU_ICON_SIZE && y >= self.icon_y && y < self.icon_y + OVERLAY_MENU_ICON_SIZE
    }

    fn entry_hit(&self, x: i32, y: i32) -> Option<SceneId> {
        if !self.open || x >= MENU_WIDTH {
            return None;
        }
        let menu_top = self.icon_y - MENU_ENTRIES.len() as i32 * ENTRY_HEIGHT;
        if y < menu_top || y >= self.icon_y {
            return None;
        }
        let index = ((y - menu_top) / ENTRY_HEIGHT) as usize;
        MENU_ENTRIES.get(index).map(|(scene, _)| *scene)
    }
}

impl OverlayMenu for DemoOverlayMenu {
    fn on_resume(&mut self) {
        self.open = false;
    }

    fn draw(&mut self, surface: &mut dyn DisplaySurface, icon_y: i32) {
        self.icon_y = icon_y;
        surface.draw_rect(0, icon_y, OVERLAY_MENU_ICON_SIZE, OVERLAY_MENU_ICON_SIZE, Color::RULE);
        surface.draw_text("=", 6, icon_y + 4, FontSize::Medium, Color::DARK_TEXT);
        if self.open {
            let menu_top = icon_y - MENU_ENTRIES.len() as i32 * ENTRY_HEIGHT;
            surface.draw_rect(0, menu_top, MENU_WIDTH, self.icon_y - menu_top, Color::DARK_BG);
            for (index, (_, label)) in MENU_ENTRIES.iter().enumerate() {
                surface.draw_text(
                    label,
                    6,
                    menu_top + index as i32 * ENTRY_HEIGHT + 3,
                    FontSize::Small,
                    Color::DARK_TEXT,
                );
            }
        }
    }

    fn update(&mut self, input: &InputSnapshot, intent: &mut NavigationIntent, current: SceneId) {
        if !input.touch_pressed {
            return;
        }
        let Some(pos) = input.touch else { return };
        if self.icon_hit(pos.x, pos.y) {
            self.open = !self.open;
        } else if let Some(scene) = self.entry_hit(pos.x, pos.y) {
            self.open = false;
            if scene != current {
                *intent = NavigationIntent::To(scene);
            }
        } else if self.open {
            self.open = false;
        }
    }
}
