use serde::{Deserialize, Serialize};

/// Languages the UI and content fetching can be set to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Ja,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Ja];

    /// ISO 639-1 code, as used in settings files and resource names.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ja => "ja",
        }
    }

    /// Position within [`Language::ALL`], for selector widgets.
    pub fn index(self) -> usize {
        match self {
            Language::En => 0,
            Language::Ja => 1,
        }
    }

    /// Inverse of [`Language::index`]; out-of-range falls back to English.
    pub fn from_index(index: usize) -> Language {
        Language::ALL.get(index).copied().unwrap_or(Language::En)
    }
}

/// Backlight level range accepted by the display hardware.
pub const LCD_BRIGHTNESS_MIN: u8 = 15;
pub const LCD_BRIGHTNESS_MAX: u8 = 163;

/// Idle-timeout range in seconds. Values above the max are stored as the
/// [`LCD_TIMEOUT_NEVER`] sentinel.
pub const LCD_TIMEOUT_MIN: u32 = 10;
pub const LCD_TIMEOUT_MAX: u32 = 309;
pub const LCD_TIMEOUT_NEVER: u32 = u32::MAX;

/// Stored dark-theme level while flash mode is off.
pub const NIGHT_MODE_MAX: u8 = 1;

/// Persisted global configuration.
///
/// Flash mode and night mode are mutually exclusive in effect: while
/// `flash_mode` is set, the displayed theme ignores `night_mode`, but the
/// stored level is preserved for when flash mode is disabled again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub ui_language: Language,
    pub content_language: Language,
    pub lcd_brightness: u8,
    pub lcd_timeout_secs: u32,
    pub eco_mode: bool,
    pub night_mode: u8,
    pub flash_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ui_language: Language::En,
            content_language: Language::En,
            lcd_brightness: 100,
            lcd_timeout_secs: 150,
            eco_mode: true,
            night_mode: 0,
            flash_mode: false,
        }
    }
}

impl Settings {
    /// Clamp every field into its valid range. Applied after loading so a
    /// hand-edited file cannot put the scene into an unrepresentable state.
    pub fn validate(&mut self) {
        self.lcd_brightness = self
            .lcd_brightness
            .clamp(LCD_BRIGHTNESS_MIN, LCD_BRIGHTNESS_MAX);
        if self.lcd_timeout_secs != LCD_TIMEOUT_NEVER {
            self.lcd_timeout_secs = self.lcd_timeout_secs.clamp(LCD_TIMEOUT_MIN, LCD_TIMEOUT_MAX);
        }
        self.night_mode = self.night_mode.min(NIGHT_MODE_MAX);
    }

    /// True when the idle timeout is the "never turn off" sentinel.
    pub fn timeout_is_never(&self) -> bool {
        self.lcd_timeout_secs == LCD_TIMEOUT_NEVER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_clamps_brightness() {
        let mut settings = Settings {
            lcd_brightness: 255,
            ..Settings::default()
        };
        settings.validate();
        assert_eq!(settings.lcd_brightness, LCD_BRIGHTNESS_MAX);
    }

    #[test]
    fn validate_keeps_never_sentinel() {
        let mut settings = Settings {
            lcd_timeout_secs: LCD_TIMEOUT_NEVER,
            ..Settings::default()
        };
        settings.validate();
        assert!(settings.timeout_is_never());
    }

    #[test]
    fn validate_clamps_short_timeout() {
        let mut settings = Settings {
            lcd_timeout_secs: 3,
            ..Settings::default()
        };
        settings.validate();
        assert_eq!(settings.lcd_timeout_secs, LCD_TIMEOUT_MIN);
    }

    #[test]
    fn language_index_round_trip() {
        for lang in Language::ALL {
            assert_eq!(Language::from_index(lang.index()), lang);
        }
    }
}
