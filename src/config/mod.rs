mod loader;
mod store;
mod types;

pub use loader::SettingsError;
pub use store::SettingsStore;
pub use types::{
    Language, Settings, LCD_BRIGHTNESS_MAX, LCD_BRIGHTNESS_MIN, LCD_TIMEOUT_MAX, LCD_TIMEOUT_MIN,
    LCD_TIMEOUT_NEVER, NIGHT_MODE_MAX,
};
