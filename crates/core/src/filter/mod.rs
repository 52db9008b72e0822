//! Catalog filtering.
//!
//! [`filter_catalog`] is a pure function of the catalog and a
//! [`FilterState`]; the UI re-runs it after every change to the state.

mod options;

pub use options::{FilterDimension, PriceHandle, PriceSlider, AGE_RATINGS, GENRES, PLAYER_COUNTS};

use std::fmt;

use crate::models::GameRecord;

/// Storefront label for the "no constraint" option.
pub const ALL_LABEL: &str = "Все";

/// One selectable filter value, or the "All" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Choice {
    /// Impose no constraint on this dimension.
    #[default]
    All,
    /// Constrain to the given tag.
    Only(String),
}

impl Choice {
    /// Constrain to `value`.
    pub fn only(value: impl Into<String>) -> Self {
        Choice::Only(value.into())
    }

    /// Parse a control value. Both `All` and the storefront label map to
    /// the sentinel; anything else is taken verbatim.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "All" | ALL_LABEL => Choice::All,
            other => Choice::Only(other.to_string()),
        }
    }

    /// Whether this is the sentinel.
    pub fn is_all(&self) -> bool {
        matches!(self, Choice::All)
    }

    /// Text shown on the option button.
    pub fn label(&self) -> &str {
        match self {
            Choice::All => ALL_LABEL,
            Choice::Only(value) => value,
        }
    }

    fn accepts(&self, test: impl FnOnce(&str) -> bool) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(value) => test(value),
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<&str> for Choice {
    fn from(raw: &str) -> Self {
        Choice::parse(raw)
    }
}

/// Inclusive price bounds in roubles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    /// Lowest accepted price.
    pub min: u32,
    /// Highest accepted price.
    pub max: u32,
}

impl PriceRange {
    /// Create a range. `min > max` is allowed and matches nothing.
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Whether `price` lies within the bounds, both ends included.
    pub fn contains(&self, price: u32) -> bool {
        price >= self.min && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        PriceSlider::default().full_range()
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} ₽", self.min, self.max)
    }
}

/// The current set of user-selected constraints.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    /// Exact genre tag.
    pub genre: Choice,
    /// Exact age tag.
    pub age_rating: Choice,
    /// Player count, matched as a substring of the record's range.
    pub player_count: Choice,
    /// Inclusive price bounds.
    pub price_range: PriceRange,
}

impl FilterState {
    /// Unconstrained state spanning the whole slider.
    pub fn new(slider: &PriceSlider) -> Self {
        Self {
            price_range: slider.full_range(),
            ..Self::default()
        }
    }

    /// Whether `game` satisfies every active constraint.
    ///
    /// Player counts use substring containment, so `2-4` matches `2` and
    /// `4` but not `3`, and `10-12` matches `1`.
    pub fn matches(&self, game: &GameRecord) -> bool {
        let genre = self.genre.accepts(|genre| game.genre == genre);
        let age = self.age_rating.accepts(|age| game.age_rating == age);
        let players = self
            .player_count
            .accepts(|count| game.player_range.contains(count));
        let price = self.price_range.contains(game.price);
        genre && age && players && price
    }

    /// Restore every dimension to its default.
    pub fn reset(&mut self, slider: &PriceSlider) {
        *self = Self::new(slider);
    }

    /// Whether nothing narrows the catalog beyond the slider's full span.
    pub fn is_unconstrained(&self, slider: &PriceSlider) -> bool {
        *self == Self::new(slider)
    }

    /// Selected value for a choice dimension. `None` for the price row.
    pub fn choice(&self, dimension: FilterDimension) -> Option<&Choice> {
        match dimension {
            FilterDimension::Genre => Some(&self.genre),
            FilterDimension::AgeRating => Some(&self.age_rating),
            FilterDimension::PlayerCount => Some(&self.player_count),
            FilterDimension::Price => None,
        }
    }

    fn choice_mut(&mut self, dimension: FilterDimension) -> Option<&mut Choice> {
        match dimension {
            FilterDimension::Genre => Some(&mut self.genre),
            FilterDimension::AgeRating => Some(&mut self.age_rating),
            FilterDimension::PlayerCount => Some(&mut self.player_count),
            FilterDimension::Price => None,
        }
    }

    /// Step a choice dimension through its option set, wrapping at either
    /// end. A value outside the set restarts from the sentinel. Returns
    /// `false` for the price row, which is driven by [`PriceSlider`].
    pub fn cycle(&mut self, dimension: FilterDimension, delta: isize) -> bool {
        let choices = dimension.choices();
        let Some(current) = self.choice_mut(dimension) else {
            return false;
        };
        let next = match choices.iter().position(|choice| *choice == *current) {
            Some(index) => {
                let len = choices.len() as isize;
                let next = (index as isize + delta).rem_euclid(len) as usize;
                choices[next].clone()
            }
            None => Choice::All,
        };
        *current = next;
        true
    }
}

impl fmt::Display for FilterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "genre={} age={} players={} price={}",
            self.genre, self.age_rating, self.player_count, self.price_range
        )
    }
}

/// Records satisfying `state`, in catalog order.
pub fn filter_catalog<'a>(catalog: &'a [GameRecord], state: &FilterState) -> Vec<&'a GameRecord> {
    catalog.iter().filter(|game| state.matches(game)).collect()
}

/// Number of records [`filter_catalog`] would return.
pub fn count_matches(catalog: &[GameRecord], state: &FilterState) -> usize {
    catalog.iter().filter(|game| state.matches(game)).count()
}
