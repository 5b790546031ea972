//! The scrollable vertical list the settings screen is composed of.
//!
//! A touch that moves vertically past a small threshold becomes a scroll
//! drag and cancels any pending row interaction, so scrolling through the
//! list cannot accidentally change a selection.

use hid::InputSnapshot;

use crate::display::DisplaySurface;
use crate::locale::StringTable;
use crate::scene::settings::SettingsCommand;
use crate::ui::widgets::Row;

const SCROLL_THRESHOLD: i32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Drag {
    Idle,
    /// Touch went down; may still become a tap or a scroll.
    Pending { row: Option<usize>, start_y: i32 },
    /// A slider row has captured the drag.
    Slider(usize),
    Scrolling { last_y: i32 },
}

pub struct ScrollList {
    rows: Vec<Row>,
    top: i32,
    bottom: i32,
    scroll: i32,
    drag: Drag,
}

impl ScrollList {
    pub fn new(rows: Vec<Row>, top: i32, bottom: i32) -> Self {
        Self {
            rows,
            top,
            bottom,
            scroll: 0,
            drag: Drag::Idle,
        }
    }

    /// Update the visible y range; the host shrinks it while the playing
    /// bar is shown so list content never paints underneath the bar.
    pub fn set_y_range(&mut self, top: i32, bottom: i32) {
        self.top = top;
        self.bottom = bottom;
        self.clamp_scroll();
    }

    /// Drop transient interaction state when the scene becomes frontmost.
    pub fn on_resume(&mut self) {
        self.drag = Drag::Idle;
        for row in &mut self.rows {
            if let Row::Slider(slider) = row {
                slider.cancel();
            }
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    fn content_height(&self) -> i32 {
        self.rows.iter().map(Row::height).sum()
    }

    fn clamp_scroll(&mut self) {
        let max = (self.content_height() - (self.bottom - self.top)).max(0);
        self.scroll = self.scroll.clamp(0, max);
    }

    fn row_at(&self, y: i32) -> Option<usize> {
        if y < self.top || y >= self.bottom {
            return None;
        }
        let mut row_y = self.top - self.scroll;
        for (index, row) in self.rows.iter().enumerate() {
            row_y += row.height();
            if y < row_y {
                return Some(index);
            }
        }
        None
    }

    /// Dispatch this frame's touch state and collect the commands produced
    /// by row interactions.
    pub fn update(&mut self, input: &InputSnapshot) -> Vec<SettingsCommand> {
        let mut out = Vec::new();

        if input.touch_pressed {
            if let Some(pos) = input.touch {
                match self.row_at(pos.y) {
                    Some(index) => {
                        if let Row::Slider(slider) = &mut self.rows[index] {
                            self.drag = Drag::Slider(index);
                            if let Some(command) = slider.grab(pos.x) {
                                out.push(command);
                            }
                        } else {
                            self.drag = Drag::Pending {
                                row: Some(index),
                                start_y: pos.y,
                            };
                        }
                    }
                    None => {
                        self.drag = Drag::Pending {
                            row: None,
                            start_y: pos.y,
                        };
                    }
                }
            }
        } else if input.touch_held {
            if let Some(pos) = input.touch {
                match self.drag {
                    Drag::Slider(index) => {
                        if let Row::Slider(slider) = &mut self.rows[index] {
                            if let Some(command) = slider.drag_to(pos.x) {
                                out.push(command);
                            }
                        }
                    }
                    Drag::Pending { start_y, .. }
                        if (pos.y - start_y).abs() > SCROLL_THRESHOLD =>
                    {
                        self.drag = Drag::Scrolling { last_y: pos.y };
                    }
                    Drag::Scrolling { last_y } => {
                        self.scroll -= pos.y - last_y;
                        self.clamp_scroll();
                        self.drag = Drag::Scrolling { last_y: pos.y };
                    }
                    _ => {}
                }
            }
        }

        if input.touch_released {
            match self.drag {
                Drag::Slider(index) => {
                    if let Row::Slider(slider) = &mut self.rows[index] {
                        if let Some(command) = slider.release() {
                            out.push(command);
                        }
                    }
                }
                Drag::Pending { row: Some(index), .. } => {
                    // A tap: fires only if the release is still on the row.
                    if let Some(pos) = input.last_touch {
                        if self.row_at(pos.y) == Some(index) {
                            if let Row::Selector(selector) = &mut self.rows[index] {
                                if let Some(command) = selector.tap(pos.x) {
                                    out.push(command);
                                }
                            }
                        }
                    }
                }
                _ => {}
            }
            self.drag = Drag::Idle;
        }

        out
    }

    pub fn draw(&self, surface: &mut dyn DisplaySurface, strings: &StringTable, dark: bool) {
        let mut y = self.top - self.scroll;
        for row in &self.rows {
            let height = row.height();
            if y + height > self.top && y < self.bottom {
                row.draw(surface, strings, y, dark);
            }
            y += height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::StrKey;
    use crate::scene::settings::SettingsCommand;
    use crate::ui::widgets::{SelectorRow, SliderRow, SliderScale, SELECTOR_HEIGHT};
    use hid::TouchPos;

    fn selector() -> Row {
        Row::Selector(SelectorRow::new(
            StrKey::EcoMode,
            vec![StrKey::Off, StrKey::On],
            0,
            |i| SettingsCommand::SetEcoMode(i == 1),
        ))
    }

    fn slider() -> Row {
        Row::Slider(SliderRow::new(
            StrKey::LcdBrightness,
            15,
            163,
            100,
            SliderScale::Plain,
            Some(|v| SettingsCommand::PreviewBrightness(v as u8)),
            |_| SettingsCommand::CommitBrightness,
        ))
    }

    fn press(x: i32, y: i32) -> InputSnapshot {
        InputSnapshot {
            touch_pressed: true,
            touch_held: true,
            touch: Some(TouchPos { x, y }),
            last_touch: Some(TouchPos { x, y }),
            ..InputSnapshot::default()
        }
    }

    fn hold(x: i32, y: i32) -> InputSnapshot {
        InputSnapshot {
            touch_held: true,
            touch: Some(TouchPos { x, y }),
            last_touch: Some(TouchPos { x, y }),
            ..InputSnapshot::default()
        }
    }

    fn release(x: i32, y: i32) -> InputSnapshot {
        InputSnapshot {
            touch_released: true,
            last_touch: Some(TouchPos { x, y }),
            ..InputSnapshot::default()
        }
    }

    #[test]
    fn tap_selector_emits_command_once() {
        let mut list = ScrollList::new(vec![selector()], 0, 240);
        // Tap the second option cell: options start at x=160, two cells.
        assert!(list.update(&press(250, 10)).is_empty());
        let commands = list.update(&release(250, 10));
        assert_eq!(commands, vec![SettingsCommand::SetEcoMode(true)]);
        // Tapping the already-selected cell produces nothing.
        let _ = list.update(&press(250, 10));
        assert!(list.update(&release(250, 10)).is_empty());
    }

    #[test]
    fn vertical_drag_scrolls_instead_of_tapping() {
        let rows = vec![selector(), selector(), selector(), selector(), selector()];
        let mut list = ScrollList::new(rows, 0, 2 * SELECTOR_HEIGHT);
        assert!(list.update(&press(250, 60)).is_empty());
        // First held frame converts the pending tap into a scroll drag,
        // the second one moves the content.
        assert!(list.update(&hold(250, 40)).is_empty());
        assert!(list.update(&hold(250, 20)).is_empty());
        assert!(list.update(&release(250, 20)).is_empty());
        assert!(list.scroll > 0);
    }

    #[test]
    fn scroll_clamps_to_content() {
        let mut list = ScrollList::new(vec![selector()], 0, 240);
        let _ = list.update(&press(20, 10));
        let _ = list.update(&hold(20, 200));
        assert_eq!(list.scroll, 0);
    }

    #[test]
    fn slider_drag_previews_then_commits() {
        let mut list = ScrollList::new(vec![slider()], 0, 240);
        let grab = list.update(&press(10, 10));
        assert_eq!(grab, vec![SettingsCommand::PreviewBrightness(15)]);
        let drag = list.update(&hold(310, 10));
        assert_eq!(drag, vec![SettingsCommand::PreviewBrightness(163)]);
        let done = list.update(&release(310, 10));
        assert_eq!(done, vec![SettingsCommand::CommitBrightness]);
    }

    #[test]
    fn y_range_excludes_rows_below_bound() {
        let mut list = ScrollList::new(vec![selector()], 0, 240);
        list.set_y_range(0, 20);
        // Touch below the bound hits nothing.
        let _ = list.update(&press(250, 30));
        assert!(list.update(&release(250, 30)).is_empty());
    }
}
