//! Accumulates raw device events between frames and hands the render loop
//! a single [`InputSnapshot`] per frame via [`InputLatch::take_snapshot`].

use crate::snapshot::{Button, ButtonSet, InputSnapshot, TouchPos};

/// Event accumulator between two snapshots.
///
/// Edge accumulators (`went_down`, `went_up`, touch begin/end) are cleared
/// by `take_snapshot`; level state (`down`, current touch) persists.
#[derive(Debug, Default)]
pub struct InputLatch {
    down: ButtonSet,
    went_down: ButtonSet,
    went_up: ButtonSet,
    touch_down: bool,
    touch_went_down: bool,
    touch_went_up: bool,
    touch_pos: Option<TouchPos>,
    last_pos: Option<TouchPos>,
}

impl InputLatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, button: Button) {
        self.down.insert(button);
        self.went_down.insert(button);
    }

    pub fn release(&mut self, button: Button) {
        self.down.remove(button);
        self.went_up.insert(button);
    }

    pub fn touch_begin(&mut self, pos: TouchPos) {
        self.touch_down = true;
        self.touch_went_down = true;
        self.touch_pos = Some(pos);
        self.last_pos = Some(pos);
    }

    pub fn touch_move(&mut self, pos: TouchPos) {
        if self.touch_down {
            self.touch_pos = Some(pos);
            self.last_pos = Some(pos);
        }
    }

    pub fn touch_end(&mut self) {
        if self.touch_down {
            self.touch_down = false;
            self.touch_went_up = true;
            self.touch_pos = None;
        }
    }

    /// Return the snapshot for this frame and reset the edge accumulators.
    pub fn take_snapshot(&mut self) -> InputSnapshot {
        let snapshot = InputSnapshot {
            pressed: self.went_down,
            held: self.down,
            released: self.went_up,
            touch_pressed: self.touch_went_down,
            touch_held: self.touch_down,
            touch_released: self.touch_went_up,
            touch: self.touch_pos,
            last_touch: self.last_pos,
        };
        self.went_down = ButtonSet::EMPTY;
        self.went_up = ButtonSet::EMPTY;
        self.touch_went_down = false;
        self.touch_went_up = false;
        snapshot
    }
}
