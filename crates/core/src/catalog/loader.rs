use std::{
    fs,
    path::{Path, PathBuf},
};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::{Catalog, CatalogError};
use crate::models::GameRecord;

static AGE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{1,2}\+$").expect("valid age regex"));
static PLAYER_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}(-\d{1,2})?$").expect("valid player range regex"));

/// Reads catalog records from a JSON file or a directory of JSON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load a catalog from `path`.
    ///
    /// A file must hold a JSON array of records. A directory is walked
    /// recursively and every `*.json` file is read in sorted path order,
    /// the records concatenated.
    pub fn load(path: impl AsRef<Path>) -> Result<Catalog, CatalogError> {
        let path = path.as_ref();
        let files = if path.is_dir() {
            json_files(path)?
        } else {
            vec![path.to_path_buf()]
        };

        let mut games = Vec::new();
        for file in &files {
            let records = read_records(file)?;
            debug!(path = %file.display(), count = records.len(), "Read catalog file");
            games.extend(records);
        }

        for game in &games {
            check_tags(game);
        }

        Catalog::new(games)
    }
}

fn json_files(root: &Path) -> Result<Vec<PathBuf>, CatalogError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| CatalogError::Walk {
            path: root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        files.push(entry.into_path());
    }
    Ok(files)
}

fn read_records(path: &Path) -> Result<Vec<GameRecord>, CatalogError> {
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn check_tags(game: &GameRecord) {
    if !AGE_TAG.is_match(&game.age_rating) {
        warn!(
            id = game.id,
            age_rating = %game.age_rating,
            "Unusual age rating; age filter buttons will not select this game"
        );
    }
    if !PLAYER_RANGE.is_match(&game.player_range) {
        warn!(
            id = game.id,
            player_range = %game.player_range,
            "Unusual player range; player filter may behave unexpectedly"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    fn record_json(id: u32, title: &str) -> String {
        format!(
            r#"{{"id": {id}, "title": "{title}", "genre": "Детектив", "age_rating": "12+",
                "player_range": "3-6", "duration": "60 мин", "price": 2100,
                "image": "covers/{id}.jpg", "description": "..."}}"#
        )
    }

    #[test]
    fn loads_single_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("catalog.json");
        fs::write(
            &path,
            format!("[{}, {}]", record_json(10, "Шерлок"), record_json(11, "Мафия")),
        )?;

        let catalog = CatalogLoader::load(&path)?;
        let titles: Vec<&str> = catalog.games().iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, vec!["Шерлок", "Мафия"]);
        assert!(catalog.games().iter().all(GameRecord::offers_cart));
        Ok(())
    }

    #[test]
    fn directory_files_load_in_path_order() -> Result<()> {
        let dir = tempdir()?;
        fs::create_dir(dir.path().join("nested"))?;
        fs::write(dir.path().join("b.json"), format!("[{}]", record_json(2, "B")))?;
        fs::write(dir.path().join("a.json"), format!("[{}]", record_json(1, "A")))?;
        fs::write(
            dir.path().join("nested").join("c.json"),
            format!("[{}]", record_json(3, "C")),
        )?;
        fs::write(dir.path().join("notes.txt"), "ignored")?;

        let catalog = CatalogLoader::load(dir.path())?;
        let ids: Vec<u32> = catalog.games().iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        Ok(())
    }

    #[test]
    fn duplicate_ids_across_files_fail() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("a.json"), format!("[{}]", record_json(1, "A")))?;
        fs::write(dir.path().join("b.json"), format!("[{}]", record_json(1, "B")))?;

        let err = CatalogLoader::load(dir.path()).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId { id: 1, .. }));
        Ok(())
    }

    #[test]
    fn malformed_json_reports_path() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json")?;

        let err = CatalogLoader::load(&path).unwrap_err();
        match err {
            CatalogError::Parse { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error: {other}"),
        }
        Ok(())
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = CatalogLoader::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn tag_patterns() {
        assert!(AGE_TAG.is_match("3+"));
        assert!(AGE_TAG.is_match("12+"));
        assert!(!AGE_TAG.is_match("adults"));
        assert!(PLAYER_RANGE.is_match("2"));
        assert!(PLAYER_RANGE.is_match("10-12"));
        assert!(!PLAYER_RANGE.is_match("2 to 4"));
    }
}
