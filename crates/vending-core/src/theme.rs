use crate::constants::*;

/// Two-state presentation theme toggled from the UI.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Day,
    Night,
}

/// Presentation parameters that differ between day and night.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThemePalette {
    pub clear_color: u32,
    pub directional_intensity: f32,
    pub ambient_intensity: f32,
    pub ambient_color: u32,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Day => Theme::Night,
            Theme::Night => Theme::Day,
        }
    }

    pub fn toggle(&mut self) {
        *self = self.toggled();
    }

    pub fn is_day(self) -> bool {
        self == Theme::Day
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Day => "day",
            Theme::Night => "night",
        }
    }

    pub fn palette(self) -> ThemePalette {
        match self {
            Theme::Day => ThemePalette {
                clear_color: DAY_CLEAR_COLOR,
                directional_intensity: DAY_DIRECTIONAL_INTENSITY,
                ambient_intensity: DAY_AMBIENT_INTENSITY,
                ambient_color: DAY_AMBIENT_COLOR,
            },
            Theme::Night => ThemePalette {
                clear_color: NIGHT_CLEAR_COLOR,
                directional_intensity: NIGHT_DIRECTIONAL_INTENSITY,
                ambient_intensity: NIGHT_AMBIENT_INTENSITY,
                ambient_color: NIGHT_AMBIENT_COLOR,
            },
        }
    }
}
