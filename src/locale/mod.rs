//! Localized string resources.
//!
//! String tables ship as embedded JSON, one file per language. The table is
//! shared between the render thread (label lookups every frame) and the
//! settings worker (reload after a language change), so lookups go through
//! a read lock and a reload atomically swaps the whole map.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;

use crate::config::Language;

/// Every label the settings widget tree can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrKey {
    Settings,
    UiLanguage,
    ContentLanguage,
    LcdBrightness,
    TimeToTurnOffLcd,
    Seconds,
    NeverTurnOff,
    EcoMode,
    DarkTheme,
    Off,
    On,
    Flash,
    LangEnglish,
    LangJapanese,
    NowPlaying,
}

impl StrKey {
    /// Key name as it appears in the JSON tables.
    pub fn name(self) -> &'static str {
        match self {
            StrKey::Settings => "settings",
            StrKey::UiLanguage => "ui_language",
            StrKey::ContentLanguage => "content_language",
            StrKey::LcdBrightness => "lcd_brightness",
            StrKey::TimeToTurnOffLcd => "time_to_turn_off_lcd",
            StrKey::Seconds => "seconds",
            StrKey::NeverTurnOff => "never_turn_off",
            StrKey::EcoMode => "eco_mode",
            StrKey::DarkTheme => "dark_theme",
            StrKey::Off => "off",
            StrKey::On => "on",
            StrKey::Flash => "flash",
            StrKey::LangEnglish => "lang_english",
            StrKey::LangJapanese => "lang_japanese",
            StrKey::NowPlaying => "now_playing",
        }
    }

    /// English fallback used when a table is missing a key.
    pub fn fallback(self) -> &'static str {
        match self {
            StrKey::Settings => "Settings",
            StrKey::UiLanguage => "UI language",
            StrKey::ContentLanguage => "Content language",
            StrKey::LcdBrightness => "LCD brightness",
            StrKey::TimeToTurnOffLcd => "Time to turn off the LCD",
            StrKey::Seconds => "seconds",
            StrKey::NeverTurnOff => "Never",
            StrKey::EcoMode => "Eco mode",
            StrKey::DarkTheme => "Dark theme",
            StrKey::Off => "OFF",
            StrKey::On => "ON",
            StrKey::Flash => "Flash",
            StrKey::LangEnglish => "English",
            StrKey::LangJapanese => "日本語",
            StrKey::NowPlaying => "Now playing",
        }
    }
}

#[derive(Debug, Error)]
pub enum LocaleError {
    #[error("failed to parse string table for '{language}': {source}")]
    Parse {
        language: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

fn bundle(language: Language) -> &'static str {
    match language {
        Language::En => include_str!("../../locales/en.json"),
        Language::Ja => include_str!("../../locales/ja.json"),
    }
}

/// Shared lookup table for localized strings.
#[derive(Clone, Default)]
pub struct StringTable {
    inner: Arc<RwLock<HashMap<String, String>>>,
}

impl StringTable {
    /// Empty table; every lookup falls back until the first reload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the embedded table for `language` and swap it in atomically.
    /// On failure the previous table is kept.
    pub fn reload(&self, language: Language) -> Result<(), LocaleError> {
        let parsed: HashMap<String, String> =
            serde_json::from_str(bundle(language)).map_err(|e| LocaleError::Parse {
                language: language.code(),
                source: e,
            })?;
        *self.inner.write() = parsed;
        Ok(())
    }

    /// Look up `key`, falling back to its English default when absent.
    pub fn get(&self, key: StrKey) -> String {
        self.inner
            .read()
            .get(key.name())
            .cloned()
            .unwrap_or_else(|| key.fallback().to_string())
    }
}
