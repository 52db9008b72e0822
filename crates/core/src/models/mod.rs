//! Shared domain models.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// External storefronts a game can be bought from.
///
/// Variant order is the order vendors are listed on a game card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    /// ozon.ru
    Ozon,
    /// wildberries.ru
    Wildberries,
    /// igroved.ru
    Igroved,
    /// hobbygames.ru
    HobbyGames,
    /// mosigra.ru
    Mosigra,
}

impl Vendor {
    /// Every known vendor in display order.
    pub const ALL: [Vendor; 5] = [
        Vendor::Ozon,
        Vendor::Wildberries,
        Vendor::Igroved,
        Vendor::HobbyGames,
        Vendor::Mosigra,
    ];

    /// Label shown on the purchase button.
    pub fn label(self) -> &'static str {
        match self {
            Vendor::Ozon => "Ozon",
            Vendor::Wildberries => "Wildberries",
            Vendor::Igroved => "Игровед",
            Vendor::HobbyGames => "Hobby Games",
            Vendor::Mosigra => "Мосигра",
        }
    }
}

/// Sparse mapping from vendor to product page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PurchaseLinks(BTreeMap<Vendor, String>);

impl PurchaseLinks {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, vendor: Vendor, url: impl Into<String>) -> Self {
        self.0.insert(vendor, url.into());
        self
    }

    /// URL for a single vendor, if listed.
    pub fn get(&self, vendor: Vendor) -> Option<&str> {
        self.0.get(&vendor).map(String::as_str)
    }

    /// Listed vendors with their URLs, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Vendor, &str)> + '_ {
        self.0.iter().map(|(vendor, url)| (*vendor, url.as_str()))
    }

    /// Number of listed vendors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no vendor is listed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A single game offered by the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Catalog-unique identifier.
    pub id: u32,
    /// Game title.
    pub title: String,
    /// Genre tag, compared exactly when filtering.
    pub genre: String,
    /// Age tag such as `8+`.
    pub age_rating: String,
    /// Player count or range such as `2-4`.
    pub player_range: String,
    /// Free-text play time.
    pub duration: String,
    /// Price in roubles.
    pub price: u32,
    /// Cover image URI or local path.
    pub image: String,
    /// Short blurb.
    pub description: String,
    /// External shops selling the game. `None` means the card offers the
    /// generic add-to-cart action instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_links: Option<PurchaseLinks>,
}

impl GameRecord {
    /// Price formatted for display, e.g. `3290 ₽`.
    pub fn price_label(&self) -> String {
        format!("{} ₽", self.price)
    }

    /// Player range formatted for display.
    pub fn players_label(&self) -> String {
        format!("{} игроков", self.player_range)
    }

    /// Whether the card should offer add-to-cart rather than vendor links.
    pub fn offers_cart(&self) -> bool {
        self.purchase_links.is_none()
    }
}
