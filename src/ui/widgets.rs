//! Widget rows of the settings list.
//!
//! Rows own their current value and a command constructor; interaction
//! produces a tagged [`SettingsCommand`] that the scene interprets
//! centrally, so no widget ever mutates shared state itself. A row can
//! only produce commands built from the option set it was constructed
//! with, which rules out invalid selection indices structurally.

use crate::display::{text_color, Color, DisplaySurface, FontSize};
use crate::locale::{StrKey, StringTable};
use crate::scene::settings::SettingsCommand;

pub const HEADING_HEIGHT: i32 = 25;
pub const RULE_HEIGHT: i32 = 8;
pub const SELECTOR_HEIGHT: i32 = 35;
pub const SLIDER_HEIGHT: i32 = 40;

// Option cells occupy the right side of a selector row.
const OPTIONS_X: i32 = 160;
const OPTIONS_WIDTH: i32 = 150;

// Slider track geometry within its row.
const BAR_X: i32 = 10;
const BAR_WIDTH: i32 = 300;

pub enum Row {
    Heading(StrKey),
    Rule,
    Selector(SelectorRow),
    Slider(SliderRow),
    Spacer(i32),
}

impl Row {
    pub fn height(&self) -> i32 {
        match self {
            Row::Heading(_) => HEADING_HEIGHT,
            Row::Rule => RULE_HEIGHT,
            Row::Selector(_) => SELECTOR_HEIGHT,
            Row::Slider(_) => SLIDER_HEIGHT,
            Row::Spacer(height) => *height,
        }
    }

    pub fn draw(&self, surface: &mut dyn DisplaySurface, strings: &StringTable, y: i32, dark: bool) {
        match self {
            Row::Heading(key) => {
                surface.draw_text(&strings.get(*key), 8, y + 4, FontSize::Medium, text_color(dark));
            }
            Row::Rule => {
                surface.draw_rect(10, y + RULE_HEIGHT / 2, 300, 1, Color::RULE);
            }
            Row::Selector(selector) => selector.draw(surface, strings, y, dark),
            Row::Slider(slider) => slider.draw(surface, strings, y, dark),
            Row::Spacer(_) => {}
        }
    }
}

/// A titled row of option cells; tapping a cell selects it.
pub struct SelectorRow {
    title: StrKey,
    options: Vec<StrKey>,
    selected: usize,
    command: fn(usize) -> SettingsCommand,
}

impl SelectorRow {
    pub fn new(
        title: StrKey,
        options: Vec<StrKey>,
        selected: usize,
        command: fn(usize) -> SettingsCommand,
    ) -> Self {
        debug_assert!(!options.is_empty());
        let selected = selected.min(options.len().saturating_sub(1));
        Self {
            title,
            options,
            selected,
            command,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    fn hit_option(&self, x: i32) -> Option<usize> {
        if x < OPTIONS_X || x >= OPTIONS_X + OPTIONS_WIDTH {
            return None;
        }
        let cell = ((x - OPTIONS_X) as usize * self.options.len()) / OPTIONS_WIDTH as usize;
        Some(cell.min(self.options.len() - 1))
    }

    /// Tap at row-local `x`; returns a command when a different option was hit.
    pub(crate) fn tap(&mut self, x: i32) -> Option<SettingsCommand> {
        let cell = self.hit_option(x)?;
        if cell == self.selected {
            return None;
        }
        self.selected = cell;
        Some((self.command)(cell))
    }

    fn draw(&self, surface: &mut dyn DisplaySurface, strings: &StringTable, y: i32, dark: bool) {
        surface.draw_text(
            &strings.get(self.title),
            10,
            y + 10,
            FontSize::Small,
            text_color(dark),
        );
        let cell_width = OPTIONS_WIDTH / self.options.len() as i32;
        for (index, option) in self.options.iter().enumerate() {
            let cell_x = OPTIONS_X + index as i32 * cell_width;
            if index == self.selected {
                surface.draw_rect(cell_x, y + 6, cell_width - 2, SELECTOR_HEIGHT - 12, Color::ACCENT);
            }
            surface.draw_text(
                &strings.get(*option),
                cell_x + 4,
                y + 10,
                FontSize::Small,
                text_color(dark),
            );
        }
    }
}

/// How a slider's value is rendered into its title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderScale {
    /// Title only, no value suffix.
    Plain,
    /// "`title` : `value` seconds", or the never-turn-off label at the top
    /// of the range.
    Seconds,
}

/// A titled horizontal slider; dragging emits the while-holding command
/// each frame, letting go emits the release command.
pub struct SliderRow {
    title: StrKey,
    min: i32,
    max: i32,
    value: i32,
    scale: SliderScale,
    while_holding: Option<fn(i32) -> SettingsCommand>,
    on_release: fn(i32) -> SettingsCommand,
    dragging: bool,
}

impl SliderRow {
    pub fn new(
        title: StrKey,
        min: i32,
        max: i32,
        value: i32,
        scale: SliderScale,
        while_holding: Option<fn(i32) -> SettingsCommand>,
        on_release: fn(i32) -> SettingsCommand,
    ) -> Self {
        Self {
            title,
            min,
            max,
            value: value.clamp(min, max),
            scale,
            while_holding,
            on_release,
            dragging: false,
        }
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    fn value_from_x(&self, x: i32) -> i32 {
        let offset = (x - BAR_X).clamp(0, BAR_WIDTH);
        self.min + (offset * (self.max - self.min) + BAR_WIDTH / 2) / BAR_WIDTH
    }

    pub(crate) fn grab(&mut self, x: i32) -> Option<SettingsCommand> {
        self.dragging = true;
        self.drag_to(x)
    }

    pub(crate) fn drag_to(&mut self, x: i32) -> Option<SettingsCommand> {
        if !self.dragging {
            return None;
        }
        self.value = self.value_from_x(x);
        self.while_holding.map(|command| command(self.value))
    }

    pub(crate) fn release(&mut self) -> Option<SettingsCommand> {
        if !self.dragging {
            return None;
        }
        self.dragging = false;
        Some((self.on_release)(self.value))
    }

    pub(crate) fn cancel(&mut self) {
        self.dragging = false;
    }

    fn title_text(&self, strings: &StringTable) -> String {
        match self.scale {
            SliderScale::Plain => strings.get(self.title),
            SliderScale::Seconds => {
                if self.value >= self.max {
                    format!("{} : {}", strings.get(self.title), strings.get(StrKey::NeverTurnOff))
                } else {
                    format!(
                        "{} : {} {}",
                        strings.get(self.title),
                        self.value,
                        strings.get(StrKey::Seconds)
                    )
                }
            }
        }
    }

    fn draw(&self, surface: &mut dyn DisplaySurface, strings: &StringTable, y: i32, dark: bool) {
        surface.draw_text(
            &self.title_text(strings),
            10,
            y + 6,
            FontSize::Small,
            text_color(dark),
        );
        surface.draw_rect(BAR_X, y + 26, BAR_WIDTH, 3, Color::RULE);
        let knob_x = BAR_X + (self.value - self.min) * BAR_WIDTH / (self.max - self.min).max(1);
        surface.draw_rect(knob_x - 2, y + 21, 5, 13, Color::ACCENT);
    }
}
