#![warn(clippy::all, missing_docs)]

//! Core domain logic for the board-game catalog browser.
//!
//! This crate hosts the game records, the catalog store and its loaders,
//! the filter engine with its option sets, and configuration handling
//! used by the terminal UI and any future frontends.

pub mod catalog;
pub mod config;
pub mod filter;
pub mod models;

pub use catalog::{Catalog, CatalogError, CatalogLoader};
pub use config::AppConfig;
pub use filter::{count_matches, filter_catalog, Choice, FilterDimension, FilterState, PriceRange};
pub use models::{GameRecord, PurchaseLinks, Vendor};
