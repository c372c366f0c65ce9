use crate::errors::{BattleResult, DataError};
use schema::{MoveData, SpeciesData};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{LazyLock, RwLock};

// Global data storage - loaded once at startup, read-only afterwards.
static MOVE_DATA: LazyLock<RwLock<HashMap<String, MoveData>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));
static SPECIES_DATA: LazyLock<RwLock<HashMap<String, SpeciesData>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Load every move definition from `<data_path>/moves/*.ron` into the global
/// registry. Returns the number of definitions loaded.
pub fn initialize_move_data(data_path: &Path) -> Result<usize, DataError> {
    let entries = load_ron_dir::<MoveData>(&data_path.join("moves"))?;
    let count = entries.len();
    MOVE_DATA.write().unwrap().extend(entries);
    Ok(count)
}

/// Load every species definition from `<data_path>/species/*.ron` into the
/// global registry. Returns the number of definitions loaded.
pub fn initialize_species_data(data_path: &Path) -> Result<usize, DataError> {
    let entries = load_ron_dir::<SpeciesData>(&data_path.join("species"))?;
    let count = entries.len();
    SPECIES_DATA.write().unwrap().extend(entries);
    Ok(count)
}

/// Insert a single move definition under the given key. Used by the loader
/// and by tests that author data in code.
pub fn register_move_data(key: &str, data: MoveData) {
    MOVE_DATA.write().unwrap().insert(key.to_uppercase(), data);
}

/// Insert a single species definition under the given key.
pub fn register_species_data(key: &str, data: SpeciesData) {
    SPECIES_DATA.write().unwrap().insert(key.to_uppercase(), data);
}

/// Get move data for a registry key from the global store.
pub fn get_move_data(key: &str) -> BattleResult<MoveData> {
    MOVE_DATA
        .read()
        .unwrap()
        .get(&key.to_uppercase())
        .cloned()
        .ok_or_else(|| DataError::MoveNotFound(key.to_string()).into())
}

/// Get species data for a registry key from the global store.
pub fn get_species_data(key: &str) -> BattleResult<SpeciesData> {
    SPECIES_DATA
        .read()
        .unwrap()
        .get(&key.to_uppercase())
        .cloned()
        .ok_or_else(|| DataError::SpeciesNotFound(key.to_string()).into())
}

/// Read every `.ron` file in a directory, keyed by its uppercased file stem
/// (`moves/vine_lash.ron` -> `VINE_LASH`).
fn load_ron_dir<T: DeserializeOwned>(dir: &Path) -> Result<HashMap<String, T>, DataError> {
    if !dir.exists() {
        return Err(DataError::DataDirNotFound(dir.display().to_string()));
    }

    let mut map = HashMap::new();
    let entries = fs::read_dir(dir).map_err(|e| DataError::Io(e.to_string()))?;

    for entry in entries {
        let entry = entry.map_err(|e| DataError::Io(e.to_string()))?;
        let path = entry.path();

        if path.extension().and_then(|s| s.to_str()) != Some("ron") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        let content = fs::read_to_string(&path).map_err(|e| DataError::Io(e.to_string()))?;
        let value = ron::from_str(&content)
            .map_err(|e| DataError::Parse(format!("{}: {}", path.display(), e)))?;

        map.insert(stem.to_uppercase(), value);
    }

    Ok(map)
}
