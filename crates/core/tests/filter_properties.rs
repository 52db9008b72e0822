//! Property tests for the catalog filter.

use boardgames_core::{
    filter::{AGE_RATINGS, GENRES, PLAYER_COUNTS},
    filter_catalog, Catalog, Choice, FilterState, GameRecord, PriceRange,
};
use proptest::prelude::*;

const PLAYER_RANGES: [&str; 8] = ["2", "2-4", "2-8", "3-5", "5-6", "1-4", "10-12", "4"];

fn choice(options: &'static [&'static str]) -> impl Strategy<Value = Choice> {
    prop_oneof![
        Just(Choice::All),
        prop::sample::select(options.to_vec()).prop_map(|value| Choice::only(value)),
    ]
}

fn record() -> impl Strategy<Value = GameRecord> {
    (
        prop::sample::select(GENRES.to_vec()),
        prop::sample::select(AGE_RATINGS.to_vec()),
        prop::sample::select(PLAYER_RANGES.to_vec()),
        0u32..=6000,
    )
        .prop_map(|(genre, age, players, price)| GameRecord {
            id: 0,
            title: format!("{genre} {age}"),
            genre: genre.to_string(),
            age_rating: age.to_string(),
            player_range: players.to_string(),
            duration: "30 мин".to_string(),
            price,
            image: String::new(),
            description: String::new(),
            purchase_links: None,
        })
}

fn catalogs() -> impl Strategy<Value = Vec<GameRecord>> {
    prop::collection::vec(record(), 0..40).prop_map(|mut games| {
        for (index, game) in games.iter_mut().enumerate() {
            game.id = index as u32 + 1;
        }
        games
    })
}

fn states() -> impl Strategy<Value = FilterState> {
    (
        choice(&GENRES),
        choice(&AGE_RATINGS),
        choice(&PLAYER_COUNTS),
        0u32..=5000,
        0u32..=5000,
    )
        .prop_map(|(genre, age_rating, player_count, a, b)| FilterState {
            genre,
            age_rating,
            player_count,
            price_range: PriceRange::new(a.min(b), a.max(b)),
        })
}

fn ids(games: &[&GameRecord]) -> Vec<u32> {
    games.iter().map(|game| game.id).collect()
}

proptest! {
    #[test]
    fn filtering_is_idempotent(games in catalogs(), state in states()) {
        let first = filter_catalog(&games, &state);
        let second = filter_catalog(&games, &state);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn output_is_an_ordered_subsequence(games in catalogs(), state in states()) {
        let result = ids(&filter_catalog(&games, &state));
        // ids were assigned in catalog order, so order preservation means
        // strictly increasing ids
        prop_assert!(result.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert!(result.iter().all(|id| games.iter().any(|game| game.id == *id)));
    }

    #[test]
    fn every_result_satisfies_the_state(games in catalogs(), state in states()) {
        for game in filter_catalog(&games, &state) {
            prop_assert!(state.matches(game));
        }
        let rejected = games.iter().filter(|game| !state.matches(game)).count();
        prop_assert_eq!(rejected + filter_catalog(&games, &state).len(), games.len());
    }

    #[test]
    fn narrowing_price_never_grows_result(
        games in catalogs(),
        state in states(),
        raise in 0u32..=2500,
        lower in 0u32..=2500,
    ) {
        let loose = filter_catalog(&games, &state).len();
        let mut tight = state.clone();
        tight.price_range = PriceRange::new(
            state.price_range.min.saturating_add(raise),
            state.price_range.max.saturating_sub(lower),
        );
        prop_assert!(filter_catalog(&games, &tight).len() <= loose);
    }

    #[test]
    fn constraining_a_choice_never_grows_result(
        games in catalogs(),
        state in states(),
        genre in prop::sample::select(GENRES.to_vec()),
        players in prop::sample::select(PLAYER_COUNTS.to_vec()),
    ) {
        let mut loose = state.clone();
        loose.genre = Choice::All;
        let mut tight = loose.clone();
        tight.genre = Choice::only(genre);
        prop_assert!(filter_catalog(&games, &tight).len() <= filter_catalog(&games, &loose).len());

        let mut loose = state.clone();
        loose.player_count = Choice::All;
        let mut tight = loose.clone();
        tight.player_count = Choice::only(players);
        prop_assert!(filter_catalog(&games, &tight).len() <= filter_catalog(&games, &loose).len());
    }

    #[test]
    fn sentinels_return_everything_in_range(games in catalogs()) {
        let in_range: Vec<u32> = games
            .iter()
            .filter(|game| game.price <= 5000)
            .map(|game| game.id)
            .collect();
        prop_assert_eq!(ids(&filter_catalog(&games, &FilterState::default())), in_range);
    }
}

#[test]
fn builtin_catalog_passes_with_defaults() {
    let catalog = Catalog::builtin();
    let result = filter_catalog(catalog.games(), &FilterState::default());
    assert_eq!(result.len(), catalog.len());
}

#[test]
fn price_edges_of_the_slider() {
    let mut cheap = GameRecord {
        id: 1,
        title: "Edge".to_string(),
        genre: "Семейная".to_string(),
        age_rating: "5+".to_string(),
        player_range: "2-4".to_string(),
        duration: "10 мин".to_string(),
        price: 5000,
        image: String::new(),
        description: String::new(),
        purchase_links: None,
    };
    let state = FilterState::default();
    assert_eq!(filter_catalog(std::slice::from_ref(&cheap), &state).len(), 1);
    cheap.price = 5001;
    assert!(filter_catalog(std::slice::from_ref(&cheap), &state).is_empty());
}
