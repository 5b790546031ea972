mod log_overlay;
mod overlay;
mod scroll;
pub mod widgets;

pub use log_overlay::DiagnosticLog;
pub use overlay::{ModalOverlay, OverlayMenu, OVERLAY_MENU_ICON_SIZE};
pub use scroll::ScrollList;
