use crate::fs::{load_state, save_state};
use anyhow::{Context, Result};
use std::path::Path;
use ticks::model::instrument::Instrument;
use ticks::model::instrument_registry::InstrumentRegistry;

/// Helper to load an InstrumentRegistry from disk.
///
/// A missing file yields an empty registry. Ids are restored exactly as they
/// were saved, so records encoded by an earlier run keep decoding.
pub fn load_registry(file_path: &Path) -> Result<InstrumentRegistry> {
    if !file_path.exists() {
        return Ok(InstrumentRegistry::new());
    }

    let instruments: Vec<Instrument> = load_state(file_path)
        .with_context(|| format!("Failed to load instruments from {:?}", file_path))?;
    let registry = InstrumentRegistry::restore(instruments)
        .with_context(|| format!("Corrupt instrument registry at {:?}", file_path))?;
    log::debug!("Loaded {} instruments from {:?}", registry.len(), file_path);

    Ok(registry)
}

/// Helper to save an InstrumentRegistry to disk.
pub fn save_registry(registry: &InstrumentRegistry, file_path: &Path) -> Result<()> {
    save_state(file_path, &registry.instruments())
        .with_context(|| format!("Failed to save instruments to {:?}", file_path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_persistence() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("instruments.json");

        let registry = load_registry(&path)?;
        assert!(registry.is_empty());
        registry.get_or_create("USD/JPY");
        registry.get_or_create("EUR/USD");
        save_registry(&registry, &path)?;

        let reloaded = load_registry(&path)?;
        assert_eq!(reloaded.instruments(), registry.instruments());
        assert_eq!(reloaded.get_or_create("EUR/USD").get_id(), 1);
        assert_eq!(reloaded.get_or_create("GBP/USD").get_id(), 2);
        Ok(())
    }

    #[test]
    fn test_corrupt_registry_is_rejected() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("instruments.json");
        save_state(&path, &vec![Instrument::new(3, "USD/JPY")])?;

        assert!(load_registry(&path).is_err());
        Ok(())
    }
}
