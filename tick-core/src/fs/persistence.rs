use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Saves a serializable object to a file atomically, as pretty JSON.
///
/// # Arguments
///
/// * `path` - The target file path.
/// * `state` - The object to serialize and save.
///
/// # Returns
///
/// * `Ok(())` on success.
/// * `Err` on serialization or IO failure.
pub fn save_state<T: Serialize>(path: &Path, state: &T) -> Result<()> {
    let json = serde_json::to_vec_pretty(state).context("Failed to serialize state")?;
    write_atomically(path, &json)
}

/// Loads a deserializable object from a JSON file.
///
/// # Returns
///
/// * `Ok(T)` containing the deserialized object.
/// * `Err` if the file doesn't exist, cannot be read, or deserialization fails.
pub fn load_state<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = std::fs::File::open(path).context("Failed to open state file")?;
    let reader = std::io::BufReader::new(file);
    let state = serde_json::from_reader(reader).context("Failed to deserialize state")?;
    Ok(state)
}

/// Saves a serializable object to a file atomically, bincode encoded.
///
/// Used for tick data, where JSON would be several times larger.
pub fn save_binary<T: Serialize>(path: &Path, state: &T) -> Result<()> {
    let bytes = bincode::serialize(state).context("Failed to encode state")?;
    write_atomically(path, &bytes)
}

/// Loads a bincode encoded object written by [`save_binary`].
pub fn load_binary<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = std::fs::File::open(path).context("Failed to open state file")?;
    let reader = std::io::BufReader::new(file);
    let state = bincode::deserialize_from(reader).context("Failed to decode state")?;
    Ok(state)
}

// Write to a sibling temp file, sync it, then rename over the target so a
// reader never observes a half-written file.
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create parent directory")?;
    }

    let temp_path = path.with_extension("tmp");
    let mut temp_file = std::fs::File::create(&temp_path).context("Failed to create temp file")?;

    temp_file
        .write_all(bytes)
        .context("Failed to write to temp file")?;
    temp_file.sync_all().context("Failed to sync temp file")?;

    std::fs::rename(&temp_path, path).context("Failed to rename temp file to target")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_json_state_round_trip() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested").join("state.json");
        let state = BTreeMap::from([("USD/JPY".to_string(), 0usize), ("EUR/USD".to_string(), 1)]);

        save_state(&path, &state)?;
        let loaded: BTreeMap<String, usize> = load_state(&path)?;

        assert_eq!(loaded, state);
        assert!(!path.with_extension("tmp").exists());
        Ok(())
    }

    #[test]
    fn test_binary_state_round_trip() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("ticks.bin");
        let values = vec![Some(110.0), None, Some(1.25)];

        save_binary(&path, &values)?;
        let loaded: Vec<Option<f64>> = load_binary(&path)?;

        assert_eq!(loaded, values);
        Ok(())
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result: Result<Vec<u8>> = load_state(&dir.path().join("missing.json"));
        assert!(result.is_err());
    }
}
