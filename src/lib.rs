//! Settings scene core of the pockettube handheld media player.
//!
//! The interesting parts are the scene lifecycle
//! ([`scene::SceneLifecycle`]), the deferred-mutation channel between the
//! render loop and the background settings worker
//! ([`scene::settings::RequestFlags`] / [`scene::settings::SettingsWorker`]),
//! and the per-frame draw/update protocol of
//! [`scene::settings::SettingsScene`]. Everything hardware- or host-shaped
//! (frame buffer, backlight, playback bar, overlays, thumbnails) sits
//! behind narrow collaborator traits in [`display`], [`playback`], [`ui`]
//! and [`services`], with terminal-backed demo implementations in
//! [`shell`].

pub mod config;
pub mod display;
pub mod locale;
pub mod playback;
pub mod scene;
pub mod services;
pub mod shell;
pub mod ui;
