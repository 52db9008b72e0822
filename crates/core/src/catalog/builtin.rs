use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::models::{GameRecord, PurchaseLinks, Vendor};

pub(super) static GAMES: Lazy<Arc<[GameRecord]>> = Lazy::new(|| {
    vec![
        GameRecord {
            id: 1,
            title: "Сырный замок".to_string(),
            genre: "Стратегия".to_string(),
            age_rating: "3+".to_string(),
            player_range: "2-4".to_string(),
            duration: "20-30 мин".to_string(),
            price: 3290,
            image: "https://cdn.poehali.dev/files/b6595022-e00a-4a21-907e-ee789d021ca8.jpg"
                .to_string(),
            description: "Мышки собирают сырную коллекцию в старом замке с ловушками".to_string(),
            purchase_links: Some(
                PurchaseLinks::new()
                    .with(
                        Vendor::Ozon,
                        "https://www.ozon.ru/product/nastolnaya-igra-syrnyy-zamok-5501859/",
                    )
                    .with(
                        Vendor::Wildberries,
                        "https://www.wildberries.ru/catalog/14111120/detail.aspx",
                    )
                    .with(Vendor::Igroved, "https://www.igroved.ru/games/burg-appenzell/")
                    .with(Vendor::HobbyGames, "https://hobbygames.ru/sirnij-zamok")
                    .with(Vendor::Mosigra, "https://www.mosigra.ru/sirnij-zamok/"),
            ),
        },
        GameRecord {
            id: 2,
            title: "Микадо".to_string(),
            genre: "Ловкость".to_string(),
            age_rating: "6+".to_string(),
            player_range: "2-8".to_string(),
            duration: "15-30 мин".to_string(),
            price: 495,
            image: "https://cdn1.ozone.ru/s3/multimedia-d/6017185349.jpg".to_string(),
            description:
                "Вытащите палочку из кучи, не задев остальные. Игра на ловкость и концентрацию"
                    .to_string(),
            purchase_links: Some(
                PurchaseLinks::new()
                    .with(
                        Vendor::Ozon,
                        "https://www.ozon.ru/product/dorozhnaya-igra-mikado-vozmi-s-soboy-164446316/",
                    )
                    .with(
                        Vendor::Wildberries,
                        "https://www.wildberries.ru/catalog/9017880/detail.aspx",
                    )
                    .with(
                        Vendor::Igroved,
                        "https://www.igroved.ru/games/mikado-series/mikado/",
                    ),
            ),
        },
    ]
    .into()
});
