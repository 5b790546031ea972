//! Construction of the settings widget tree from a configuration snapshot.
//! Built once at scene init; rebuilt only by a full exit + init cycle.

use crate::config::{Language, Settings, LCD_BRIGHTNESS_MAX, LCD_BRIGHTNESS_MIN};
use crate::display::SCREEN_HEIGHT;
use crate::locale::StrKey;
use crate::scene::settings::commands::{timeout_from_slider, SettingsCommand, ThemeChoice};
use crate::ui::widgets::{Row, SelectorRow, SliderRow, SliderScale};
use crate::ui::ScrollList;

/// Slider position representing the "never turn off" sentinel.
const TIMEOUT_SLIDER_MAX: i32 = 310;
const TIMEOUT_SLIDER_MIN: i32 = 10;

pub(crate) fn build_settings_view(settings: &Settings) -> ScrollList {
    let timeout_value = if settings.timeout_is_never() {
        TIMEOUT_SLIDER_MAX
    } else {
        (settings.lcd_timeout_secs as i32).min(TIMEOUT_SLIDER_MAX - 1)
    };
    let theme_selected = if settings.flash_mode {
        ThemeChoice::Flash.index()
    } else {
        settings.night_mode as usize
    };

    let rows = vec![
        Row::Heading(StrKey::Settings),
        Row::Rule,
        Row::Selector(SelectorRow::new(
            StrKey::UiLanguage,
            vec![StrKey::LangEnglish, StrKey::LangJapanese],
            settings.ui_language.index(),
            |index| SettingsCommand::SetUiLanguage(Language::from_index(index)),
        )),
        Row::Selector(SelectorRow::new(
            StrKey::ContentLanguage,
            vec![StrKey::LangEnglish, StrKey::LangJapanese],
            settings.content_language.index(),
            |index| SettingsCommand::SetContentLanguage(Language::from_index(index)),
        )),
        Row::Slider(SliderRow::new(
            StrKey::LcdBrightness,
            LCD_BRIGHTNESS_MIN as i32,
            LCD_BRIGHTNESS_MAX as i32,
            settings.lcd_brightness as i32,
            SliderScale::Plain,
            Some(|value| SettingsCommand::PreviewBrightness(value as u8)),
            |_| SettingsCommand::CommitBrightness,
        )),
        Row::Slider(SliderRow::new(
            StrKey::TimeToTurnOffLcd,
            TIMEOUT_SLIDER_MIN,
            TIMEOUT_SLIDER_MAX,
            timeout_value,
            SliderScale::Seconds,
            None,
            |value| SettingsCommand::SetLcdTimeout(timeout_from_slider(value)),
        )),
        Row::Selector(SelectorRow::new(
            StrKey::EcoMode,
            vec![StrKey::Off, StrKey::On],
            settings.eco_mode as usize,
            |index| SettingsCommand::SetEcoMode(index == 1),
        )),
        Row::Selector(SelectorRow::new(
            StrKey::DarkTheme,
            vec![StrKey::Off, StrKey::On, StrKey::Flash],
            theme_selected,
            |index| SettingsCommand::SetTheme(ThemeChoice::from_index(index)),
        )),
        Row::Spacer(4),
    ];

    ScrollList::new(rows, 0, SCREEN_HEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LCD_TIMEOUT_NEVER;

    #[test]
    fn theme_row_shows_flash_over_stored_night_level() {
        let settings = Settings {
            flash_mode: true,
            night_mode: 1,
            ..Settings::default()
        };
        let view = build_settings_view(&settings);
        let Row::Selector(theme) = &view.rows()[7] else {
            panic!("expected theme selector");
        };
        assert_eq!(theme.selected(), ThemeChoice::Flash.index());
    }

    #[test]
    fn never_timeout_maps_to_slider_top() {
        let settings = Settings {
            lcd_timeout_secs: LCD_TIMEOUT_NEVER,
            ..Settings::default()
        };
        let view = build_settings_view(&settings);
        let Row::Slider(slider) = &view.rows()[5] else {
            panic!("expected timeout slider");
        };
        assert_eq!(slider.value(), TIMEOUT_SLIDER_MAX);
    }
}
