//! Option sets and control helpers for the filter panel.

use serde::{Deserialize, Serialize};

use super::{Choice, PriceRange};

/// Genre tags offered by the genre control.
pub const GENRES: [&str; 7] = [
    "Стратегия",
    "Приключения",
    "Детектив",
    "Семейная",
    "Научная фантастика",
    "Хоррор",
    "Ловкость",
];

/// Age tags offered by the age control.
pub const AGE_RATINGS: [&str; 8] = ["3+", "5+", "6+", "7+", "8+", "9+", "10+", "12+"];

/// Player counts offered by the player control.
pub const PLAYER_COUNTS: [&str; 5] = ["2", "3", "4", "5", "6"];

/// Rows of the filter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterDimension {
    /// Genre buttons.
    Genre,
    /// Age rating buttons.
    AgeRating,
    /// Player count buttons.
    PlayerCount,
    /// Price slider.
    Price,
}

impl FilterDimension {
    /// Panel rows, top to bottom.
    pub const ALL: [FilterDimension; 4] = [
        FilterDimension::Genre,
        FilterDimension::AgeRating,
        FilterDimension::PlayerCount,
        FilterDimension::Price,
    ];

    /// Row heading.
    pub fn label(self) -> &'static str {
        match self {
            FilterDimension::Genre => "Жанр",
            FilterDimension::AgeRating => "Возраст",
            FilterDimension::PlayerCount => "Количество игроков",
            FilterDimension::Price => "Цена",
        }
    }

    /// Raw option tags, without the sentinel. Empty for the price row.
    pub fn options(self) -> &'static [&'static str] {
        match self {
            FilterDimension::Genre => &GENRES,
            FilterDimension::AgeRating => &AGE_RATINGS,
            FilterDimension::PlayerCount => &PLAYER_COUNTS,
            FilterDimension::Price => &[],
        }
    }

    /// Selectable choices in button order, sentinel first.
    pub fn choices(self) -> Vec<Choice> {
        if self == FilterDimension::Price {
            return Vec::new();
        }
        std::iter::once(Choice::All)
            .chain(self.options().iter().map(|option| Choice::only(*option)))
            .collect()
    }

    /// Button caption for `choice` on this row.
    pub fn option_label(self, choice: &Choice) -> String {
        match (self, choice) {
            (FilterDimension::PlayerCount, Choice::Only(count)) => format!("{count} игрока"),
            _ => choice.label().to_string(),
        }
    }

    /// Row `delta` positions away, wrapping around.
    pub fn offset(self, delta: isize) -> FilterDimension {
        let index = Self::ALL.iter().position(|row| *row == self).unwrap_or(0) as isize;
        let len = Self::ALL.len() as isize;
        Self::ALL[(index + delta).rem_euclid(len) as usize]
    }
}

/// Which end of the price slider is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceHandle {
    /// Lower bound.
    #[default]
    Min,
    /// Upper bound.
    Max,
}

impl PriceHandle {
    /// The other handle.
    pub fn toggle(self) -> Self {
        match self {
            PriceHandle::Min => PriceHandle::Max,
            PriceHandle::Max => PriceHandle::Min,
        }
    }
}

/// Bounds and granularity of the price slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceSlider {
    /// Left end of the track.
    pub min: u32,
    /// Right end of the track.
    pub max: u32,
    /// Distance moved per key press.
    pub step: u32,
}

impl Default for PriceSlider {
    fn default() -> Self {
        Self {
            min: 0,
            max: 5000,
            step: 100,
        }
    }
}

impl PriceSlider {
    /// Swap inverted ends and force a non-zero step.
    pub fn normalized(self) -> Self {
        Self {
            min: self.min.min(self.max),
            max: self.min.max(self.max),
            step: self.step.max(1),
        }
    }

    /// Range covering the whole track.
    pub fn full_range(&self) -> PriceRange {
        PriceRange::new(self.min, self.max)
    }

    /// Move one handle by `steps` increments. The handle stays on the
    /// track and never crosses the other one. Returns whether the range
    /// changed.
    pub fn nudge(&self, range: &mut PriceRange, handle: PriceHandle, steps: i32) -> bool {
        let slider = self.normalized();
        let delta = i64::from(slider.step) * i64::from(steps);
        let before = *range;
        match handle {
            PriceHandle::Min => {
                let lo = i64::from(slider.min);
                let hi = i64::from(range.max.min(slider.max)).max(lo);
                range.min = (i64::from(range.min) + delta).clamp(lo, hi) as u32;
            }
            PriceHandle::Max => {
                let hi = i64::from(slider.max);
                let lo = i64::from(range.min.max(slider.min).min(slider.max));
                range.max = (i64::from(range.max) + delta).clamp(lo, hi) as u32;
            }
        }
        *range != before
    }
}
