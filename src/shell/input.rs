//! crossterm event pump feeding the input latch.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use hid::{Button, InputLatch, InputSnapshot, TouchPos};

use crate::services::InputSource;

use super::demo::DemoPlayback;
use super::overlays::{DemoErrorOverlay, DemoHelpOverlay};
use super::{CELL_HEIGHT, CELL_WIDTH, CHROME_ROWS, CONTENT_COLS, CONTENT_ROWS};

pub struct TermHid {
    latch: InputLatch,
    playback: DemoPlayback,
    help: DemoHelpOverlay,
    error: DemoErrorOverlay,
}

impl TermHid {
    pub fn new(playback: DemoPlayback, help: DemoHelpOverlay, error: DemoErrorOverlay) -> Self {
        Self {
            latch: InputLatch::new(),
            playback,
            help,
            error,
        }
    }

    fn on_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(pos) = touch_position(mouse.column, mouse.row) {
                    self.latch.touch_begin(pos);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(pos) = touch_position(mouse.column, mouse.row) {
                    self.latch.touch_move(pos);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.latch.touch_end();
            }
            _ => {}
        }
    }
}

fn touch_position(column: u16, row: u16) -> Option<TouchPos> {
    if row < CHROME_ROWS || row >= CHROME_ROWS + CONTENT_ROWS || column >= CONTENT_COLS {
        return None;
    }
    Some(TouchPos {
        x: i32::from(column) * CELL_WIDTH + CELL_WIDTH / 2,
        y: i32::from(row - CHROME_ROWS) * CELL_HEIGHT + CELL_HEIGHT / 2,
    })
}

fn button_for(code: KeyCode) -> Option<Button> {
    match code {
        KeyCode::Esc | KeyCode::Backspace => Some(Button::B),
        KeyCode::Enter => Some(Button::A),
        KeyCode::Tab => Some(Button::Select),
        KeyCode::Up => Some(Button::Up),
        KeyCode::Down => Some(Button::Down),
        KeyCode::Left => Some(Button::Left),
        KeyCode::Right => Some(Button::Right),
        _ => None,
    }
}

impl InputSource for TermHid {
    fn take_snapshot(&mut self) -> InputSnapshot {
        while event::poll(Duration::ZERO).unwrap_or(false) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('p') => self.playback.toggle(),
                    KeyCode::Char('h') => self.help.toggle(),
                    KeyCode::Char('e') => self.error.show_demo_error(),
                    code => {
                        if let Some(button) = button_for(code) {
                            // Terminals do not report key releases, so each
                            // press is latched as a same-frame tap.
                            self.latch.press(button);
                            self.latch.release(button);
                        }
                    }
                },
                Ok(Event::Mouse(mouse)) => self.on_mouse(mouse),
                Ok(_) => {}
                Err(_) => break,
            }
        }
        self.latch.take_snapshot()
    }
}
