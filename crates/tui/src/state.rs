use boardgames_core::{
    filter::{FilterDimension, PriceHandle, PriceSlider},
    filter_catalog, Catalog, FilterState, GameRecord,
};
use tracing::debug;

/// Which half of the screen receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Filters,
    Catalog,
}

/// Everything the catalog screen needs between frames.
pub struct UiState {
    catalog: Catalog,
    slider: PriceSlider,
    pub filter: FilterState,
    pub filtered: Vec<GameRecord>,
    pub cursor: usize,
    pub offset: usize,
    pub list_height: usize,
    pub focus: Focus,
    pub filter_row: FilterDimension,
    pub price_handle: PriceHandle,
    pub cart: Vec<u32>,
    pub status: String,
    pub should_quit: bool,
}

impl UiState {
    pub fn new(catalog: Catalog, slider: PriceSlider) -> Self {
        let mut state = Self {
            catalog,
            slider,
            filter: FilterState::new(&slider),
            filtered: Vec::new(),
            cursor: 0,
            offset: 0,
            list_height: 1,
            focus: Focus::Filters,
            filter_row: FilterDimension::Genre,
            price_handle: PriceHandle::Min,
            cart: Vec::new(),
            status: "Готово".to_string(),
            should_quit: false,
        };
        state.apply_filter();
        state
    }

    pub fn slider(&self) -> &PriceSlider {
        &self.slider
    }

    pub fn total_games(&self) -> usize {
        self.catalog.len()
    }

    /// Re-run the filter, keeping the highlighted game when it survives.
    pub fn apply_filter(&mut self) {
        let selected = self.current_game().map(|game| game.id);
        self.filtered = filter_catalog(self.catalog.games(), &self.filter)
            .into_iter()
            .cloned()
            .collect();
        self.cursor = selected
            .and_then(|id| self.filtered.iter().position(|game| game.id == id))
            .unwrap_or(0);
        self.clamp_cursor();
        self.ensure_cursor_visible();
        debug!(filter = %self.filter, matches = self.filtered.len(), "Filter applied");
    }

    /// Change the value on the focused filter row. Returns whether the
    /// filter changed.
    pub fn adjust_filter(&mut self, delta: isize) -> bool {
        let changed = match self.filter_row {
            FilterDimension::Price => {
                let steps = delta.clamp(i32::MIN as isize, i32::MAX as isize) as i32;
                self.slider
                    .nudge(&mut self.filter.price_range, self.price_handle, steps)
            }
            row => self.filter.cycle(row, delta),
        };
        if changed {
            self.apply_filter();
        }
        changed
    }

    pub fn move_filter_row(&mut self, delta: isize) {
        self.filter_row = self.filter_row.offset(delta);
    }

    pub fn toggle_price_handle(&mut self) {
        self.price_handle = self.price_handle.toggle();
    }

    pub fn reset_filters(&mut self) {
        self.filter.reset(&self.slider);
        self.price_handle = PriceHandle::Min;
        self.apply_filter();
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Filters => Focus::Catalog,
            Focus::Catalog => Focus::Filters,
        };
    }

    /// Put the highlighted game in the session cart. Only games without
    /// vendor links can be carted.
    pub fn add_current_to_cart(&mut self) -> Option<&GameRecord> {
        let game = self.filtered.get(self.cursor)?;
        if !game.offers_cart() {
            return None;
        }
        self.cart.push(game.id);
        Some(game)
    }

    pub fn cart_count(&self, id: u32) -> usize {
        self.cart.iter().filter(|carted| **carted == id).count()
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if self.filtered.is_empty() {
            return;
        }
        let len = self.filtered.len() as isize;
        let mut idx = self.cursor as isize + delta;
        if idx < 0 {
            idx = 0;
        } else if idx >= len {
            idx = len - 1;
        }
        self.cursor = idx as usize;
        self.ensure_cursor_visible();
    }

    pub fn move_to(&mut self, index: usize) {
        if self.filtered.is_empty() {
            return;
        }
        self.cursor = index.min(self.filtered.len() - 1);
        self.ensure_cursor_visible();
    }

    pub fn move_to_end(&mut self) {
        if self.filtered.is_empty() {
            return;
        }
        self.cursor = self.filtered.len() - 1;
        self.ensure_cursor_visible();
    }

    pub fn page_down(&mut self) {
        if self.filtered.is_empty() || self.list_height == 0 {
            return;
        }
        let delta = self.list_height.min(self.filtered.len());
        self.move_cursor(delta as isize);
    }

    pub fn page_up(&mut self) {
        if self.filtered.is_empty() || self.list_height == 0 {
            return;
        }
        let delta = self.list_height.min(self.filtered.len());
        self.move_cursor(-(delta as isize));
    }

    pub fn visible_games(&self, height: usize) -> &[GameRecord] {
        if self.filtered.is_empty() {
            return &[];
        }
        let start = self.offset.min(self.filtered.len());
        let end = (start + height).min(self.filtered.len());
        &self.filtered[start..end]
    }

    pub fn current_game(&self) -> Option<&GameRecord> {
        self.filtered.get(self.cursor)
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = message.into();
    }

    pub fn clamp_cursor(&mut self) {
        if self.filtered.is_empty() {
            self.cursor = 0;
            self.offset = 0;
        } else if self.cursor >= self.filtered.len() {
            self.cursor = self.filtered.len() - 1;
        }
    }

    pub fn ensure_cursor_visible(&mut self) {
        if self.filtered.is_empty() || self.list_height == 0 {
            self.offset = 0;
            return;
        }
        let height = self.list_height;
        let max_offset = self.filtered.len().saturating_sub(height);

        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + height {
            self.offset = self.cursor + 1 - height;
        }

        if self.offset > max_offset {
            self.offset = max_offset;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardgames_core::{Choice, PriceRange, PurchaseLinks, Vendor};

    fn game(id: u32, genre: &str, price: u32, links: bool) -> GameRecord {
        GameRecord {
            id,
            title: format!("Game {id}"),
            genre: genre.to_string(),
            age_rating: "8+".to_string(),
            player_range: "2-4".to_string(),
            duration: "30 мин".to_string(),
            price,
            image: String::new(),
            description: String::new(),
            purchase_links: links.then(|| PurchaseLinks::new().with(Vendor::Ozon, "https://ozon")),
        }
    }

    fn state() -> UiState {
        let catalog = Catalog::new(vec![
            game(1, "Стратегия", 1000, true),
            game(2, "Хоррор", 2000, false),
            game(3, "Стратегия", 3000, false),
            game(4, "Ловкость", 4000, true),
        ])
        .expect("valid catalog");
        UiState::new(catalog, PriceSlider::default())
    }

    #[test]
    fn starts_with_everything() {
        let state = state();
        assert_eq!(state.filtered.len(), 4);
        assert_eq!(state.total_games(), 4);
        assert_eq!(state.current_game().map(|g| g.id), Some(1));
    }

    #[test]
    fn selection_survives_refilter_when_possible() {
        let mut state = state();
        state.move_to(2);
        assert_eq!(state.current_game().map(|g| g.id), Some(3));

        state.filter.genre = Choice::only("Стратегия");
        state.apply_filter();
        assert_eq!(state.current_game().map(|g| g.id), Some(3));

        state.filter.genre = Choice::only("Хоррор");
        state.apply_filter();
        assert_eq!(state.cursor, 0);
        assert_eq!(state.current_game().map(|g| g.id), Some(2));
    }

    #[test]
    fn empty_result_resets_cursor() {
        let mut state = state();
        state.move_to_end();
        state.filter.price_range = PriceRange::new(4500, 5000);
        state.apply_filter();
        assert!(state.filtered.is_empty());
        assert_eq!(state.cursor, 0);
        assert_eq!(state.offset, 0);
        assert!(state.current_game().is_none());
        assert!(state.visible_games(10).is_empty());
    }

    #[test]
    fn adjusting_rows_refilters() {
        let mut state = state();
        state.filter_row = FilterDimension::Genre;
        assert!(state.adjust_filter(1));
        assert_eq!(state.filter.genre, Choice::only("Стратегия"));
        assert_eq!(state.filtered.len(), 2);

        state.move_filter_row(-1);
        assert_eq!(state.filter_row, FilterDimension::Price);
        state.toggle_price_handle();
        assert!(state.adjust_filter(-25));
        assert_eq!(state.filter.price_range, PriceRange::new(0, 2500));
        assert_eq!(state.filtered.iter().map(|g| g.id).collect::<Vec<_>>(), vec![1]);

        state.reset_filters();
        assert_eq!(state.filtered.len(), 4);
        assert_eq!(state.price_handle, PriceHandle::Min);
    }

    #[test]
    fn only_linkless_games_go_to_cart() {
        let mut state = state();
        assert!(state.add_current_to_cart().is_none());
        state.move_cursor(1);
        assert_eq!(state.add_current_to_cart().map(|g| g.id), Some(2));
        state.add_current_to_cart();
        assert_eq!(state.cart_count(2), 2);
        assert_eq!(state.cart_count(1), 0);
    }

    #[test]
    fn cursor_scrolls_within_height() {
        let mut state = state();
        state.list_height = 2;
        state.move_to_end();
        assert_eq!(state.offset, 2);
        assert_eq!(state.visible_games(2).len(), 2);
        state.page_up();
        assert_eq!(state.cursor, 1);
        assert_eq!(state.offset, 1);
        state.move_cursor(-10);
        assert_eq!((state.cursor, state.offset), (0, 0));
    }

    #[test]
    fn focus_toggles() {
        let mut state = state();
        assert_eq!(state.focus, Focus::Filters);
        state.toggle_focus();
        assert_eq!(state.focus, Focus::Catalog);
    }
}
