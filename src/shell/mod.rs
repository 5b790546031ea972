//! Terminal emulator front-end for the demo binary.
//!
//! Maps the 320x240 content screen onto an 80x30 cell region (4x8 pixel
//! cells) below a chrome strip, mouse events onto the touch panel, and a
//! handful of keys onto device buttons.

mod demo;
mod input;
mod overlays;
mod surface;
mod terminal;

pub use demo::{DemoPlayback, LoggingContentSink, LoggingDisplayControl, NullThumbnails};
pub use input::TermHid;
pub use overlays::{DemoErrorOverlay, DemoHelpOverlay, DemoOverlayMenu};
pub use surface::TermSurface;
pub use terminal::{setup_terminal, TerminalGuard};

/// Pixels per terminal cell.
pub(crate) const CELL_WIDTH: i32 = 4;
pub(crate) const CELL_HEIGHT: i32 = 8;

/// Rows reserved above the content region for chrome and the log overlay.
pub(crate) const CHROME_ROWS: u16 = 8;
pub(crate) const CONTENT_COLS: u16 = 80;
pub(crate) const CONTENT_ROWS: u16 = 30;
