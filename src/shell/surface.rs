//! [`DisplaySurface`] implementation that paints into a ratatui buffer.
//!
//! Draw calls are recorded between `frame_ready` and `submit`, then
//! replayed into the terminal buffer in one `Terminal::draw` pass.

use std::io::Stdout;
use std::time::Duration;

use hid::TouchPos;
use ratatui::backend::CrosstermBackend;
use ratatui::buffer::Buffer;
use ratatui::style::{Color as TermColor, Style};
use ratatui::Terminal;

use crate::display::{Color, DisplaySurface, FontSize, ScreenLayer};

use super::{CELL_HEIGHT, CELL_WIDTH, CHROME_ROWS, CONTENT_COLS, CONTENT_ROWS};

enum DrawOp {
    Clear(ScreenLayer, Color),
    Text {
        layer: ScreenLayer,
        x: i32,
        y: i32,
        text: String,
        color: Color,
    },
    Rect {
        layer: ScreenLayer,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: Color,
    },
    Chrome,
    TouchMarker(TouchPos),
}

pub struct TermSurface {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    ops: Vec<DrawOp>,
    layer: ScreenLayer,
    frame_interval: Duration,
}

impl TermSurface {
    pub fn new(terminal: Terminal<CrosstermBackend<Stdout>>, fps: u32) -> Self {
        Self {
            terminal,
            ops: Vec::new(),
            layer: ScreenLayer::Content,
            frame_interval: Duration::from_millis(1000 / u64::from(fps.max(1))),
        }
    }
}

fn rgb(color: Color) -> TermColor {
    TermColor::Rgb(
        (color.0 >> 16) as u8,
        (color.0 >> 8) as u8,
        color.0 as u8,
    )
}

fn layer_row_range(layer: ScreenLayer) -> (u16, u16) {
    match layer {
        ScreenLayer::Chrome => (0, CHROME_ROWS),
        ScreenLayer::Content => (CHROME_ROWS, CHROME_ROWS + CONTENT_ROWS),
    }
}

fn cell_of(layer: ScreenLayer, x: i32, y: i32) -> (u16, u16) {
    let (origin, _) = layer_row_range(layer);
    let col = (x / CELL_WIDTH).max(0) as u16;
    let row = origin + (y / CELL_HEIGHT).max(0) as u16;
    (col, row)
}

fn fill(buf: &mut Buffer, col0: u16, row0: u16, col1: u16, row1: u16, color: Color) {
    let area = buf.area;
    for row in row0..row1.min(area.height) {
        for col in col0..col1.min(area.width).min(CONTENT_COLS) {
            if let Some(cell) = buf.cell_mut((col, row)) {
                cell.set_bg(rgb(color));
            }
        }
    }
}

fn paint(buf: &mut Buffer, ops: &[DrawOp]) {
    for op in ops {
        match op {
            DrawOp::Clear(layer, color) => {
                let (row0, row1) = layer_row_range(*layer);
                fill(buf, 0, row0, CONTENT_COLS, row1, *color);
            }
            DrawOp::Text {
                layer,
                x,
                y,
                text,
                color,
            } => {
                let (col, row) = cell_of(*layer, *x, *y);
                let (_, row_end) = layer_row_range(*layer);
                if row < row_end.min(buf.area.height) && col < buf.area.width {
                    let max = (CONTENT_COLS.min(buf.area.width) - col) as usize;
                    buf.set_stringn(col, row, text, max, Style::default().fg(rgb(*color)));
                }
            }
            DrawOp::Rect {
                layer,
                x,
                y,
                width,
                height,
                color,
            } => {
                let (col0, row0) = cell_of(*layer, *x, *y);
                let (col1, row1) = cell_of(*layer, x + width - 1, y + height - 1);
                let (_, row_end) = layer_row_range(*layer);
                fill(buf, col0, row0, col1 + 1, (row1 + 1).min(row_end), *color);
            }
            DrawOp::Chrome => {
                let style = Style::default().fg(rgb(Color::DARK_TEXT)).bg(rgb(Color::ACCENT));
                let title = format!("{:<width$}", " pockettube", width = CONTENT_COLS as usize);
                buf.set_stringn(0, 0, &title, CONTENT_COLS as usize, style);
            }
            DrawOp::TouchMarker(pos) => {
                let (col, row) = cell_of(ScreenLayer::Content, pos.x, pos.y);
                if let Some(cell) = buf.cell_mut((col, row)) {
                    cell.set_symbol("+");
                    cell.set_fg(rgb(Color::ACCENT));
                }
            }
        }
    }
}

impl DisplaySurface for TermSurface {
    fn frame_ready(&mut self) {
        self.ops.clear();
    }

    fn layer_ready(&mut self, layer: ScreenLayer, clear: Color) {
        self.layer = layer;
        self.ops.push(DrawOp::Clear(layer, clear));
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, _size: FontSize, color: Color) {
        self.ops.push(DrawOp::Text {
            layer: self.layer,
            x,
            y,
            text: text.to_string(),
            color,
        });
    }

    fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) {
        self.ops.push(DrawOp::Rect {
            layer: self.layer,
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn draw_top_chrome(&mut self) {
        self.ops.push(DrawOp::Chrome);
    }

    fn draw_touch_marker(&mut self, pos: Option<TouchPos>) {
        if let Some(pos) = pos {
            self.ops.push(DrawOp::TouchMarker(pos));
        }
    }

    fn submit(&mut self) {
        let ops = std::mem::take(&mut self.ops);
        let _ = self.terminal.draw(|frame| paint(frame.buffer_mut(), &ops));
    }

    fn wait_vblank(&mut self) {
        std::thread::sleep(self.frame_interval);
    }
}
