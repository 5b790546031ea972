//! Diagnostic log overlay: a capped ring of recent operator-visible lines,
//! drawn over the chrome layer when toggled. Unlike the help and error
//! overlays it is not modal; it only consumes the scroll buttons.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use hid::{Button, InputSnapshot};
use parking_lot::Mutex;

use crate::display::{Color, DisplaySurface, FontSize};

const LOG_CAPACITY: usize = 100;
const VISIBLE_LINES: usize = 6;
const LINE_HEIGHT: i32 = 10;

#[derive(Default)]
struct Inner {
    lines: Mutex<VecDeque<String>>,
    visible: AtomicBool,
    /// Scroll offset in lines back from the tail.
    scroll: AtomicUsize,
}

/// Cloneable handle; the settings worker holds one to report completed
/// side effects without touching the render thread.
#[derive(Clone, Default)]
pub struct DiagnosticLog {
    inner: Arc<Inner>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, line: impl Into<String>) {
        let mut lines = self.inner.lines.lock();
        if lines.len() == LOG_CAPACITY {
            lines.pop_front();
        }
        lines.push_back(line.into());
    }

    pub fn is_showing(&self) -> bool {
        self.inner.visible.load(Ordering::SeqCst)
    }

    pub fn toggle(&self) {
        self.inner.visible.fetch_xor(true, Ordering::SeqCst);
    }

    /// Snapshot of the retained lines, oldest first.
    pub fn lines(&self) -> Vec<String> {
        self.inner.lines.lock().iter().cloned().collect()
    }

    pub fn draw(&self, surface: &mut dyn DisplaySurface) {
        let lines = self.inner.lines.lock();
        let scroll = self
            .inner
            .scroll
            .load(Ordering::SeqCst)
            .min(lines.len().saturating_sub(VISIBLE_LINES));
        let end = lines.len() - scroll;
        let start = end.saturating_sub(VISIBLE_LINES);
        for (row, line) in lines.range(start..end).enumerate() {
            surface.draw_text(
                line,
                2,
                2 + row as i32 * LINE_HEIGHT,
                FontSize::Small,
                Color::DARK_TEXT,
            );
        }
    }

    /// Non-modal input handling: up/down scroll through the ring.
    pub fn update(&self, input: &InputSnapshot) {
        if input.pressed.contains(Button::Up) {
            self.inner.scroll.fetch_add(1, Ordering::SeqCst);
        }
        if input.pressed.contains(Button::Down) {
            let _ = self
                .inner
                .scroll
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |v| {
                    Some(v.saturating_sub(1))
                });
        }
    }
}
