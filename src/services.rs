//! Collaborator bundle injected into a scene at construction.

use std::sync::Arc;

use hid::InputSnapshot;

use crate::config::Language;
use crate::display::{DisplayControl, DisplaySurface};
use crate::playback::PlaybackBar;
use crate::scene::SceneId;
use crate::ui::{ModalOverlay, OverlayMenu};

/// Source of the per-frame input snapshot. Taking a snapshot resets the
/// device's edge state, so the scene calls this exactly once per frame.
pub trait InputSource {
    fn take_snapshot(&mut self) -> InputSnapshot;
}

/// Shared thumbnail loader priority signal: the active scene's requests are
/// served first.
pub trait ThumbnailPriority: Send + Sync {
    fn set_active_scene(&self, scene: SceneId);
}

/// Receives content-language changes so the content-fetching layer can
/// re-request localized metadata.
pub trait ContentLanguageSink: Send + Sync {
    fn content_language_changed(&self, language: Language);
}

/// Everything a scene needs from its host, wired up once by the shell.
pub struct SceneServices {
    pub input: Box<dyn InputSource>,
    pub surface: Box<dyn DisplaySurface>,
    pub display: Arc<dyn DisplayControl>,
    pub playback: Box<dyn PlaybackBar>,
    pub overlay_menu: Box<dyn OverlayMenu>,
    pub help: Box<dyn ModalOverlay>,
    pub error: Box<dyn ModalOverlay>,
    pub thumbnails: Arc<dyn ThumbnailPriority>,
    pub content_language: Arc<dyn ContentLanguageSink>,
}
