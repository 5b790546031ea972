//! Tagged commands produced by the settings widgets and the central
//! interpreter that applies them to shared state. Widgets never mutate the
//! store directly; every mutation funnels through
//! [`apply_settings_command`], which also raises the matching request
//! flags for the worker.

use crate::config::{Language, SettingsStore, LCD_TIMEOUT_NEVER};
use crate::scene::settings::worker::RequestFlags;
use crate::services::ContentLanguageSink;

/// Dark-theme selector positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeChoice {
    Light,
    Dark,
    Flash,
}

impl ThemeChoice {
    pub const ALL: [ThemeChoice; 3] = [ThemeChoice::Light, ThemeChoice::Dark, ThemeChoice::Flash];

    pub fn index(self) -> usize {
        match self {
            ThemeChoice::Light => 0,
            ThemeChoice::Dark => 1,
            ThemeChoice::Flash => 2,
        }
    }

    pub fn from_index(index: usize) -> ThemeChoice {
        Self::ALL.get(index).copied().unwrap_or(ThemeChoice::Light)
    }

    /// Stored night level for the non-flash choices.
    fn night_level(self) -> u8 {
        match self {
            ThemeChoice::Dark => 1,
            ThemeChoice::Light | ThemeChoice::Flash => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsCommand {
    SetUiLanguage(Language),
    SetContentLanguage(Language),
    /// Live preview while the brightness slider is held: store the level
    /// and ask the worker to push it to the hardware. The worker reads the
    /// level at processing time, so a drag coalesces into one call.
    PreviewBrightness(u8),
    /// Brightness slider released: persist the final level.
    CommitBrightness,
    SetLcdTimeout(u32),
    SetEcoMode(bool),
    SetTheme(ThemeChoice),
}

/// Apply one command to the shared configuration and raise request flags.
pub fn apply_settings_command(
    store: &SettingsStore,
    flags: &RequestFlags,
    content_language: &dyn ContentLanguageSink,
    command: SettingsCommand,
) {
    match command {
        SettingsCommand::SetUiLanguage(language) => {
            if store.get().ui_language != language {
                store.update(|s| s.ui_language = language);
                flags.request_save();
                flags.request_string_reload();
            }
        }
        SettingsCommand::SetContentLanguage(language) => {
            if store.get().content_language != language {
                store.update(|s| s.content_language = language);
                flags.request_save();
                content_language.content_language_changed(language);
            }
        }
        SettingsCommand::PreviewBrightness(level) => {
            store.update(|s| s.lcd_brightness = level);
            flags.request_brightness_change();
        }
        SettingsCommand::CommitBrightness => {
            flags.request_save();
        }
        SettingsCommand::SetLcdTimeout(seconds) => {
            if store.get().lcd_timeout_secs != seconds {
                store.update(|s| s.lcd_timeout_secs = seconds);
                flags.request_save();
            }
        }
        SettingsCommand::SetEcoMode(enabled) => {
            if store.get().eco_mode != enabled {
                store.update(|s| s.eco_mode = enabled);
                flags.request_save();
            }
        }
        SettingsCommand::SetTheme(choice) => {
            let current = store.get();
            let want_flash = choice == ThemeChoice::Flash;
            if current.flash_mode != want_flash {
                store.update(|s| s.flash_mode = want_flash);
                flags.request_save();
            }
            // The stored night level only follows the non-flash choices;
            // enabling flash preserves it for when flash is turned off.
            if !want_flash && current.night_mode != choice.night_level() {
                store.update(|s| s.night_mode = choice.night_level());
                flags.request_save();
            }
        }
    }
}

/// Timeout slider position → stored seconds: the top of the range is the
/// "never turn off" sentinel.
pub fn timeout_from_slider(value: i32) -> u32 {
    if value >= 310 {
        LCD_TIMEOUT_NEVER
    } else {
        value as u32
    }
}
