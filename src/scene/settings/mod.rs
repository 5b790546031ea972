//! The Settings scene: lifecycle orchestration, the per-frame draw/update
//! protocol, and ownership of the background settings worker.

mod commands;
mod view;
mod worker;

use std::sync::Arc;

use hid::Button;
use tracing::{debug, error, info, warn};

pub use commands::{apply_settings_command, timeout_from_slider, SettingsCommand, ThemeChoice};
pub use worker::{RequestFlags, SettingsWorker, WorkerHandle, WORKER_IDLE_POLL, WORKER_JOIN_TIMEOUT};

use crate::config::SettingsStore;
use crate::display::{self, ScreenLayer, SCREEN_HEIGHT};
use crate::locale::StringTable;
use crate::playback::PLAYING_BAR_HEIGHT;
use crate::scene::{NavigationIntent, Scene, SceneId, SceneLifecycle, ScenePhase};
use crate::services::SceneServices;
use crate::ui::{DiagnosticLog, ScrollList, OVERLAY_MENU_ICON_SIZE};

use self::view::build_settings_view;

pub struct SettingsScene {
    lifecycle: Arc<SceneLifecycle>,
    store: SettingsStore,
    strings: StringTable,
    flags: Arc<RequestFlags>,
    worker: Option<WorkerHandle>,
    view: Option<ScrollList>,
    services: SceneServices,
    log: DiagnosticLog,
    needs_redraw: bool,
    content_y_high: i32,
    flash_phase: bool,
}

impl SettingsScene {
    pub fn new(
        services: SceneServices,
        store: SettingsStore,
        strings: StringTable,
        log: DiagnosticLog,
    ) -> Self {
        Self {
            lifecycle: Arc::new(SceneLifecycle::new()),
            store,
            strings,
            flags: Arc::new(RequestFlags::new()),
            worker: None,
            view: None,
            services,
            log,
            needs_redraw: false,
            content_y_high: SCREEN_HEIGHT,
            flash_phase: false,
        }
    }

    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    pub fn flags(&self) -> &Arc<RequestFlags> {
        &self.flags
    }

    pub fn diagnostic_log(&self) -> &DiagnosticLog {
        &self.log
    }

    /// Central interpreter for widget-produced commands: writes the shared
    /// configuration and raises the matching request flags.
    pub fn apply_command(&self, command: SettingsCommand) {
        apply_settings_command(
            &self.store,
            &self.flags,
            self.services.content_language.as_ref(),
            command,
        );
    }
}

impl Scene for SettingsScene {
    fn is_initialized(&self) -> bool {
        self.lifecycle.is_initialized()
    }

    fn init(&mut self) {
        if self.lifecycle.is_initialized() {
            warn!(target: "settings/init", "init called on an initialized scene");
            return;
        }
        info!(target: "settings/init", "initializing");

        if let Err(err) = self.store.reload() {
            warn!(target: "settings/init", %err, "failed to load settings, using defaults");
            self.log.push(format!("settings: load failed: {err}"));
        }
        let language = self.store.get().ui_language;
        if let Err(err) = self.strings.reload(language) {
            warn!(target: "settings/init", %err, "failed to load string resources");
        }

        let worker = SettingsWorker::new(
            Arc::clone(&self.lifecycle),
            Arc::clone(&self.flags),
            self.store.clone(),
            self.strings.clone(),
            Arc::clone(&self.services.display),
            self.log.clone(),
        );
        match worker.spawn() {
            Ok(handle) => self.worker = Some(handle),
            Err(err) => error!(target: "settings/init", %err, "failed to spawn settings worker"),
        }

        self.view = Some(build_settings_view(&self.store.get()));
        self.resume("");
    }

    fn resume(&mut self, _arg: &str) {
        if self.view.is_none() {
            warn!(target: "settings/resume", "resume called before init");
            return;
        }
        self.services.overlay_menu.on_resume();
        if let Some(view) = &mut self.view {
            view.on_resume();
        }
        self.lifecycle.set(ScenePhase::Active);
        self.needs_redraw = true;
    }

    fn suspend(&mut self) {
        self.lifecycle.set(ScenePhase::Suspended);
    }

    fn exit(&mut self) {
        if !self.lifecycle.is_initialized() {
            warn!(target: "settings/exit", "exit called on an uninitialized scene");
            return;
        }
        self.lifecycle.set(ScenePhase::Exiting);

        if let Some(handle) = self.worker.take() {
            if handle.join_timeout(WORKER_JOIN_TIMEOUT) {
                debug!(target: "settings/exit", "worker joined");
            } else {
                error!(
                    target: "settings/exit",
                    timeout = ?WORKER_JOIN_TIMEOUT,
                    "worker did not stop within the join timeout, abandoning it"
                );
                self.log.push("settings: worker join timed out");
            }
        }

        // Final synchronous save: a request racing shutdown must not be lost.
        if let Err(err) = self.store.save() {
            warn!(target: "settings/exit", %err, "final save failed");
        }

        self.view = None;
        self.lifecycle.set(ScenePhase::Uninitialized);
        info!(target: "settings/exit", "exited");
    }

    fn draw(&mut self) -> NavigationIntent {
        let mut intent = NavigationIntent::None;

        // One authoritative input snapshot per frame; taking it resets the
        // device edge state so nothing leaks into the next frame.
        let input = self.services.input.take_snapshot();

        self.services.thumbnails.set_active_scene(SceneId::Settings);

        let bar_shown = self.services.playback.is_playing();
        self.content_y_high = if bar_shown {
            SCREEN_HEIGHT - PLAYING_BAR_HEIGHT
        } else {
            SCREEN_HEIGHT
        };
        if let Some(view) = &mut self.view {
            view.set_y_range(0, self.content_y_high);
        }

        let settings = self.store.get();
        if self.needs_redraw || !settings.eco_mode {
            self.needs_redraw = false;
            if settings.flash_mode {
                // Flash alternates the displayed level every rendered frame
                // and keeps the redraw chain alive under eco mode.
                self.flash_phase = !self.flash_phase;
                self.needs_redraw = true;
            }
            let dark = display::effective_dark(&settings, self.flash_phase);
            let background = display::background_color(dark);

            let surface = self.services.surface.as_mut();
            surface.frame_ready();

            surface.layer_ready(ScreenLayer::Chrome, background);
            if self.log.is_showing() {
                self.log.draw(surface);
            }
            surface.draw_top_chrome();

            surface.layer_ready(ScreenLayer::Content, background);
            if let Some(view) = &self.view {
                view.draw(surface, &self.strings, dark);
            }
            if bar_shown {
                self.services.playback.draw_bar(surface);
            }
            let icon_y = if bar_shown {
                SCREEN_HEIGHT - OVERLAY_MENU_ICON_SIZE - PLAYING_BAR_HEIGHT
            } else {
                SCREEN_HEIGHT - OVERLAY_MENU_ICON_SIZE
            };
            self.services.overlay_menu.draw(surface, icon_y);
            // Modal overlays paint last, over everything else.
            if self.services.help.is_showing() {
                self.services.help.draw(surface, &self.strings);
            }
            if self.services.error.is_showing() {
                self.services.error.draw(surface, &self.strings);
            }
            surface.draw_touch_marker(input.touch);
            surface.submit();
        } else {
            // Power saving: skip composition, wait out the refresh. Input
            // dispatch below still runs, so no press or request is dropped.
            self.services.surface.wait_vblank();
        }

        if self.services.error.is_showing() {
            self.services.error.update(&input);
        } else if self.services.help.is_showing() {
            self.services.help.update(&input);
        } else {
            self.services
                .overlay_menu
                .update(&input, &mut intent, SceneId::Settings);

            let commands = match &mut self.view {
                Some(view) => view.update(&input),
                None => Vec::new(),
            };
            for command in commands {
                self.apply_command(command);
            }

            if bar_shown {
                self.services.playback.update_bar(&input, &mut intent);
            }
            if input.pressed.contains(Button::B) {
                intent = NavigationIntent::Back;
            }
            if input.touch_interaction() {
                self.needs_redraw = true;
            }
            if input.pressed.contains(Button::Select) {
                self.log.toggle();
            }
        }

        // The log overlay coexists with normal interaction: it gets input
        // last instead of capturing it.
        if self.log.is_showing() {
            self.log.update(&input);
        }

        intent
    }
}
