//! Loading pipeline: reads data files, builds the catalog, resolves
//! references to items.
//!
//! Provides format detection (RON/JSON/TOML), file discovery, and
//! (de)serialization helpers, plus [`load_game_data`], which turns a data
//! directory into a ready-to-query [`GameData`].

use crate::config::GameConfig;
use crate::schema::ItemData;
use alchemy_core::validation::{ValidationReport, validate_catalog};
use alchemy_core::{Catalog, CatalogError, Engine, ItemId, ItemKey, UserProgress};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Base name of the required item catalog file.
pub const ITEMS_FILE: &str = "items";

/// Base name of the optional game configuration file.
pub const GAME_FILE: &str = "game";

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur during data loading.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// A required data file was not found in the given directory.
    #[error("required file '{file}' not found in {dir}")]
    MissingRequired { file: String, dir: PathBuf },

    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two files with the same base name but different formats exist.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// A serialization error occurred while writing a file.
    #[error("serialize error for {file}: {detail}")]
    Serialize { file: PathBuf, detail: String },

    /// An item reference could not be resolved against the catalog.
    #[error("unresolved {expected_kind} reference '{name}' in {file}")]
    UnresolvedRef {
        file: PathBuf,
        name: String,
        expected_kind: &'static str,
    },

    /// The items could not be indexed.
    #[error("catalog error in {file}: {source}")]
    Catalog {
        file: PathBuf,
        #[source]
        source: CatalogError,
    },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Formats and file lookup
// ===========================================================================

/// Data file formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

impl Format {
    /// Lookup order when several extensions are possible.
    pub const ALL: [Format; 3] = [Format::Ron, Format::Toml, Format::Json];

    pub fn extension(self) -> &'static str {
        match self {
            Format::Ron => "ron",
            Format::Toml => "toml",
            Format::Json => "json",
        }
    }

    /// The format of `path`, from its extension.
    pub fn of(path: &Path) -> Result<Self, DataLoadError> {
        let extension = path.extension().and_then(|e| e.to_str());
        Self::ALL
            .into_iter()
            .find(|format| extension == Some(format.extension()))
            .ok_or_else(|| DataLoadError::UnsupportedFormat {
                file: path.to_path_buf(),
            })
    }
}

/// The `{base_name}.{ron,toml,json}` file in `dir`, if there is exactly one.
/// Two or more formats of the same file are a `ConflictingFormats` error.
pub fn find_data_file(dir: &Path, base_name: &str) -> Result<Option<PathBuf>, DataLoadError> {
    let mut present = Format::ALL
        .into_iter()
        .map(|format| dir.join(format!("{base_name}.{}", format.extension())))
        .filter(|candidate| candidate.is_file());

    match (present.next(), present.next()) {
        (Some(a), Some(b)) => Err(DataLoadError::ConflictingFormats { a, b }),
        (found, _) => Ok(found),
    }
}

// ===========================================================================
// (De)serialization
// ===========================================================================

fn parse_error(path: &Path, detail: impl ToString) -> DataLoadError {
    DataLoadError::Parse {
        file: path.to_path_buf(),
        detail: detail.to_string(),
    }
}

/// Read a file and deserialize it according to its format (detected from extension).
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let format = Format::of(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        Format::Ron => ron::from_str(&content).map_err(|e| parse_error(path, e)),
        Format::Json => serde_json::from_str(&content).map_err(|e| parse_error(path, e)),
        Format::Toml => toml::from_str(&content).map_err(|e| parse_error(path, e)),
    }
}

/// Deserialize a list from a file. For TOML files, extracts the array at the
/// given `toml_key` from a top-level table. For RON and JSON, deserializes
/// directly as `Vec<T>`.
pub fn deserialize_list<T: DeserializeOwned>(
    path: &Path,
    toml_key: &str,
) -> Result<Vec<T>, DataLoadError> {
    let format = Format::of(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        Format::Ron => ron::from_str(&content).map_err(|e| parse_error(path, e)),
        Format::Json => serde_json::from_str(&content).map_err(|e| parse_error(path, e)),
        Format::Toml => {
            let mut table: toml::Table =
                toml::from_str(&content).map_err(|e| parse_error(path, e))?;
            let array = table
                .remove(toml_key)
                .ok_or_else(|| parse_error(path, format!("missing key '{toml_key}' in TOML file")))?;
            array
                .try_into()
                .map_err(|e: toml::de::Error| parse_error(path, e))
        }
    }
}

/// Serialize `value` into `path`, choosing the format from the extension.
pub fn serialize_file<T: Serialize>(path: &Path, value: &T) -> Result<(), DataLoadError> {
    let serialize_error = |detail: String| DataLoadError::Serialize {
        file: path.to_path_buf(),
        detail,
    };

    let content = match Format::of(path)? {
        Format::Ron => ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())
            .map_err(|e| serialize_error(e.to_string()))?,
        Format::Json => {
            serde_json::to_string_pretty(value).map_err(|e| serialize_error(e.to_string()))?
        }
        Format::Toml => toml::to_string_pretty(value).map_err(|e| serialize_error(e.to_string()))?,
    };

    std::fs::write(path, content)?;
    tracing::debug!(file = %path.display(), "wrote data file");
    Ok(())
}

// ===========================================================================
// Reference resolution
// ===========================================================================

/// Look up an item id in the catalog, returning an `UnresolvedRef` error if
/// it is not there.
pub fn resolve_item(catalog: &Catalog, name: &str, file: &Path) -> Result<ItemKey, DataLoadError> {
    catalog
        .key_of(name)
        .ok_or_else(|| DataLoadError::UnresolvedRef {
            file: file.to_path_buf(),
            name: name.to_string(),
            expected_kind: "item",
        })
}

// ===========================================================================
// Game data
// ===========================================================================

/// A loaded data directory: the indexed catalog and the game configuration.
#[derive(Debug, Clone)]
pub struct GameData {
    pub catalog: Arc<Catalog>,
    pub config: GameConfig,
}

/// Everything wrong with a data directory that still loads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameDataReport {
    pub catalog: ValidationReport,

    /// Items whose `era_unlock` is past the last configured era. They can
    /// never be produced.
    pub beyond_last_era: Vec<ItemId>,
}

impl GameDataReport {
    pub fn is_clean(&self) -> bool {
        self.catalog.is_clean() && self.beyond_last_era.is_empty()
    }
}

impl GameData {
    /// An engine over this catalog. Engines share the catalog.
    pub fn engine(&self) -> Engine {
        Engine::new(Arc::clone(&self.catalog))
    }

    /// Progress for a new player: era 0 with the configured starting items.
    pub fn new_progress(&self) -> UserProgress {
        UserProgress::new(self.config.starting_items.iter().cloned())
    }

    pub fn era_name(&self, era: alchemy_core::Era) -> Option<&str> {
        self.config.era_name(era)
    }

    /// Run the catalog checks and compare item eras with the configured eras.
    pub fn validate(&self) -> GameDataReport {
        let catalog = validate_catalog(&self.catalog, self.config.starting_items.as_slice());
        let beyond_last_era = self
            .catalog
            .items()
            .iter()
            .filter(|item| match self.config.last_era() {
                Some(last) => item.era_unlock > last,
                None => true,
            })
            .map(|item| item.id.clone())
            .collect();

        GameDataReport {
            catalog,
            beyond_last_era,
        }
    }

    /// Load a progress snapshot, checking that every item it names is in
    /// the catalog.
    pub fn load_progress(&self, path: &Path) -> Result<UserProgress, DataLoadError> {
        let progress: UserProgress = deserialize_file(path)?;
        for id in progress.discovered_items.iter().chain(&progress.inventory) {
            resolve_item(&self.catalog, id.as_str(), path)?;
        }
        tracing::debug!(
            file = %path.display(),
            discovered = progress.discovered_items.len(),
            era = progress.current_era,
            "loaded progress snapshot"
        );
        Ok(progress)
    }
}

/// Write a progress snapshot. The format follows the file extension.
pub fn save_progress(path: &Path, progress: &UserProgress) -> Result<(), DataLoadError> {
    serialize_file(path, progress)
}

/// Load a data directory.
///
/// Reads `items.{ron,toml,json}` (required) and `game.{ron,toml,json}`
/// (optional, defaults apply), builds the catalog, and checks that every
/// starting item exists.
pub fn load_game_data(dir: &Path) -> Result<GameData, DataLoadError> {
    let items_path =
        find_data_file(dir, ITEMS_FILE)?.ok_or_else(|| DataLoadError::MissingRequired {
            file: ITEMS_FILE.to_string(),
            dir: dir.to_path_buf(),
        })?;
    let items: Vec<ItemData> = deserialize_list(&items_path, "items")?;
    tracing::debug!(file = %items_path.display(), items = items.len(), "read item definitions");

    let catalog = Catalog::from_items(items.into_iter().map(ItemData::into_item)).map_err(
        |source| DataLoadError::Catalog {
            file: items_path.clone(),
            source,
        },
    )?;

    let config = match find_data_file(dir, GAME_FILE)? {
        Some(game_path) => {
            let config: GameConfig = deserialize_file(&game_path)?;
            tracing::debug!(
                file = %game_path.display(),
                eras = config.era_count(),
                "read game config"
            );
            for id in &config.starting_items {
                resolve_item(&catalog, id.as_str(), &game_path)?;
            }
            config
        }
        None => {
            let config = GameConfig::default();
            for id in &config.starting_items {
                resolve_item(&catalog, id.as_str(), &items_path)?;
            }
            config
        }
    };

    Ok(GameData {
        catalog: Arc::new(catalog),
        config,
    })
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use alchemy_core::{ItemState, test_utils::*};
    use std::fs;

    /// Create a temporary directory with a unique name for test isolation.
    fn make_test_dir(suffix: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "alchemy_data_test_{suffix}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Clean up a test directory.
    fn cleanup(dir: &Path) {
        let _ = fs::remove_dir_all(dir);
    }

    const ELEMENTS_RON: &str = r#"[
        (id: "terre", name: "Terre", emoji: "🌍"),
        (id: "eau", name: "Eau", emoji: "💧"),
        (id: "feu", name: "Feu", emoji: "🔥"),
        (id: "air", name: "Air", emoji: "💨"),
        (id: "boue", recipes: [["terre", "eau"]]),
        (id: "outil_pierre", is_pivot: true, recipes: ["terre+feu"]),
        (id: "brique", era_unlock: 1, recipes: [["boue", "feu"]]),
    ]"#;

    // -----------------------------------------------------------------------
    // Formats and file lookup
    // -----------------------------------------------------------------------

    #[test]
    fn format_from_extension() {
        assert_eq!(Format::of(Path::new("items.ron")).unwrap(), Format::Ron);
        assert_eq!(Format::of(Path::new("data/game.toml")).unwrap(), Format::Toml);
        assert_eq!(Format::of(Path::new("progress.json")).unwrap(), Format::Json);
        for format in Format::ALL {
            let name = format!("items.{}", format.extension());
            assert_eq!(Format::of(Path::new(&name)).unwrap(), format);
        }
    }

    #[test]
    fn unknown_extensions_are_unsupported() {
        for name in ["items.yaml", "items", "items.RON"] {
            let result = Format::of(Path::new(name));
            assert!(matches!(result, Err(DataLoadError::UnsupportedFormat { .. })), "{name}");
        }
    }

    #[test]
    fn find_data_file_found_json() {
        let dir = make_test_dir("find_json");
        fs::write(dir.join("items.json"), "[]").unwrap();

        let result = find_data_file(&dir, "items").unwrap();
        assert_eq!(result, Some(dir.join("items.json")));

        cleanup(&dir);
    }

    #[test]
    fn find_data_file_missing() {
        let dir = make_test_dir("find_missing");
        fs::create_dir_all(dir.join("items.ron")).unwrap();

        // A directory named like a data file does not count.
        let result = find_data_file(&dir, "items").unwrap();
        assert_eq!(result, None);

        cleanup(&dir);
    }

    #[test]
    fn find_data_file_conflict() {
        let dir = make_test_dir("find_conflict");
        fs::write(dir.join("game.toml"), "").unwrap();
        fs::write(dir.join("game.json"), "{}").unwrap();

        let result = find_data_file(&dir, "game");
        assert!(matches!(
            result,
            Err(DataLoadError::ConflictingFormats { ref a, ref b })
                if a == &dir.join("game.toml") && b == &dir.join("game.json")
        ));

        cleanup(&dir);
    }

    // -----------------------------------------------------------------------
    // deserialize_list
    // -----------------------------------------------------------------------

    #[test]
    fn deserialize_list_toml() {
        let dir = make_test_dir("list_toml");
        let path = dir.join("items.toml");
        fs::write(
            &path,
            r#"
[[items]]
id = "terre"

[[items]]
id = "boue"
recipes = [["terre", "eau"], "eau+terre"]
"#,
        )
        .unwrap();

        let items: Vec<ItemData> = deserialize_list(&path, "items").unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].recipes.len(), 2);

        cleanup(&dir);
    }

    #[test]
    fn deserialize_list_toml_missing_key() {
        let dir = make_test_dir("list_toml_missing");
        let path = dir.join("items.toml");
        fs::write(&path, r#"foo = "bar""#).unwrap();

        let result: Result<Vec<ItemData>, _> = deserialize_list(&path, "items");
        assert!(matches!(result, Err(DataLoadError::Parse { .. })));

        cleanup(&dir);
    }

    #[test]
    fn deserialize_list_parse_error() {
        let dir = make_test_dir("list_parse_err");
        let path = dir.join("items.ron");
        fs::write(&path, "this is not valid RON {{{").unwrap();

        let result: Result<Vec<ItemData>, _> = deserialize_list(&path, "items");
        assert!(matches!(result, Err(DataLoadError::Parse { .. })));

        cleanup(&dir);
    }

    // -----------------------------------------------------------------------
    // load_game_data
    // -----------------------------------------------------------------------

    #[test]
    fn load_ron_directory_with_defaults() {
        let dir = make_test_dir("load_ron");
        fs::write(dir.join("items.ron"), ELEMENTS_RON).unwrap();

        let data = load_game_data(&dir).unwrap();
        assert_eq!(data.catalog.len(), 7);
        assert_eq!(data.config, GameConfig::default());
        assert_eq!(data.era_name(1), Some("Antiquité"));

        let engine = data.engine();
        let progress = data.new_progress();
        assert_eq!(engine.fuse("feu", "terre", &progress).unwrap().id, "outil_pierre");
        assert!(!engine.can_advance_era(&progress));
        assert_eq!(engine.classify("boue", &progress).unwrap(), ItemState::Locked);

        cleanup(&dir);
    }

    #[test]
    fn load_json_directory_with_camel_case() {
        let dir = make_test_dir("load_json");
        fs::write(
            dir.join("items.json"),
            r#"[
                {"id": "lumiere", "name": "Lumière", "emoji": "💡"},
                {"id": "ombre"},
                {"id": "eclipse", "eraUnlock": 1, "isPivot": true, "recipes": ["lumiere+ombre"]}
            ]"#,
        )
        .unwrap();
        fs::write(
            dir.join("game.json"),
            r#"{"eras": ["Aube", "Crépuscule"], "startingItems": ["lumiere", "ombre"]}"#,
        )
        .unwrap();

        let data = load_game_data(&dir).unwrap();
        assert_eq!(data.config.era_count(), 2);
        let eclipse = data.catalog.get("eclipse").unwrap();
        assert!(eclipse.is_pivot);
        assert_eq!(eclipse.era_unlock, 1);
        assert!(data.validate().is_clean());

        cleanup(&dir);
    }

    #[test]
    fn missing_items_file_is_an_error() {
        let dir = make_test_dir("load_missing");
        fs::write(dir.join("game.ron"), "()").unwrap();

        let result = load_game_data(&dir);
        assert!(matches!(result, Err(DataLoadError::MissingRequired { ref file, .. }) if file == "items"));

        cleanup(&dir);
    }

    #[test]
    fn unknown_starting_item_is_an_error() {
        let dir = make_test_dir("load_unknown_start");
        fs::write(dir.join("items.ron"), ELEMENTS_RON).unwrap();
        fs::write(dir.join("game.ron"), r#"(starting_items: ["terre", "ether"])"#).unwrap();

        let result = load_game_data(&dir);
        assert!(matches!(
            result,
            Err(DataLoadError::UnresolvedRef { ref name, expected_kind: "item", .. }) if name == "ether"
        ));

        cleanup(&dir);
    }

    #[test]
    fn default_starting_items_must_exist() {
        let dir = make_test_dir("load_no_elements");
        fs::write(dir.join("items.ron"), r#"[(id: "terre")]"#).unwrap();

        let result = load_game_data(&dir);
        assert!(matches!(result, Err(DataLoadError::UnresolvedRef { .. })));

        cleanup(&dir);
    }

    #[test]
    fn duplicate_item_id_is_a_catalog_error() {
        let dir = make_test_dir("load_dup_item");
        fs::write(dir.join("items.ron"), r#"[(id: "terre"), (id: "terre")]"#).unwrap();

        let result = load_game_data(&dir);
        assert!(matches!(
            result,
            Err(DataLoadError::Catalog {
                source: CatalogError::DuplicateItem(_),
                ..
            })
        ));

        cleanup(&dir);
    }

    #[test]
    fn items_past_the_last_era_are_reported() {
        let dir = make_test_dir("load_beyond_era");
        fs::write(dir.join("items.ron"), ELEMENTS_RON).unwrap();
        fs::write(dir.join("game.ron"), r#"(eras: ["Préhistoire"])"#).unwrap();

        let data = load_game_data(&dir).unwrap();
        let report = data.validate();
        assert_eq!(report.beyond_last_era, vec![ItemId::from("brique")]);
        assert!(!report.is_clean());

        cleanup(&dir);
    }

    #[test]
    fn starter_catalog_round_trips_through_json() {
        let dir = make_test_dir("load_starter");
        let items: Vec<serde_json::Value> = starter_items()
            .iter()
            .map(|item| serde_json::to_value(item).unwrap())
            .collect();
        fs::write(dir.join("items.json"), serde_json::to_string(&items).unwrap()).unwrap();

        let data = load_game_data(&dir).unwrap();
        assert_eq!(data.catalog.items(), starter_engine().catalog().items());

        cleanup(&dir);
    }

    // -----------------------------------------------------------------------
    // Progress snapshots
    // -----------------------------------------------------------------------

    #[test]
    fn progress_snapshot_round_trip() {
        let dir = make_test_dir("progress_round_trip");
        fs::write(dir.join("items.ron"), ELEMENTS_RON).unwrap();
        let data = load_game_data(&dir).unwrap();

        let mut progress = data.new_progress();
        progress.discover("boue");
        progress.enter_next_era();

        for name in ["progress.ron", "progress.json", "progress.toml"] {
            let path = dir.join(name);
            save_progress(&path, &progress).unwrap();
            assert_eq!(data.load_progress(&path).unwrap(), progress, "{name}");
        }

        cleanup(&dir);
    }

    #[test]
    fn progress_snapshot_with_unknown_item_is_rejected() {
        let dir = make_test_dir("progress_unknown");
        fs::write(dir.join("items.ron"), ELEMENTS_RON).unwrap();
        let data = load_game_data(&dir).unwrap();

        let path = dir.join("progress.json");
        fs::write(
            &path,
            r#"{"discoveredItems": ["terre", "phlogiston"], "currentEra": 0}"#,
        )
        .unwrap();

        let result = data.load_progress(&path);
        assert!(matches!(
            result,
            Err(DataLoadError::UnresolvedRef { ref name, .. }) if name == "phlogiston"
        ));

        cleanup(&dir);
    }

    // -----------------------------------------------------------------------
    // Error display messages
    // -----------------------------------------------------------------------

    #[test]
    fn error_display_messages() {
        let e = DataLoadError::MissingRequired {
            file: "items".to_string(),
            dir: PathBuf::from("/data"),
        };
        assert!(format!("{e}").contains("items"));
        assert!(format!("{e}").contains("/data"));

        let e = DataLoadError::UnresolvedRef {
            file: PathBuf::from("game.ron"),
            name: "ether".to_string(),
            expected_kind: "item",
        };
        let msg = format!("{e}");
        assert!(msg.contains("ether"));
        assert!(msg.contains("game.ron"));

        let e = DataLoadError::Catalog {
            file: PathBuf::from("items.ron"),
            source: CatalogError::DuplicateItem(ItemId::from("terre")),
        };
        assert!(format!("{e}").contains("terre"));
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let data_err: DataLoadError = io_err.into();
        assert!(matches!(data_err, DataLoadError::Io(_)));
        assert!(format!("{data_err}").contains("file not found"));
    }
}
