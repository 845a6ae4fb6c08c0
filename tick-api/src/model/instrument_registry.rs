//! In-memory registry assigning stable ids to instrument names.
//!
//! Ids are handed out in first-seen order starting at 0 and are never reused.
//! The registry is the single source of truth for tick array offsets, so a
//! registry must outlive (or be restored for) every record encoded against it.
//! Persistence is handled by the runtime.

use crate::error::TickError;
use crate::model::instrument::{Instrument, InstrumentId};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// An append-only, thread-safe registry of instruments.
///
/// Share it between encoders and decoders with an `Arc`; every method takes
/// `&self`.
#[derive(Debug, Default)]
pub struct InstrumentRegistry {
    inner: Mutex<Entries>,
}

#[derive(Debug, Default)]
struct Entries {
    /// Indexed by id.
    instruments: Vec<Instrument>,
    ids: HashMap<String, InstrumentId>,
}

impl InstrumentRegistry {
    /// Creates a new, empty InstrumentRegistry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a registry from a previously taken snapshot.
    ///
    /// # Arguments
    ///
    /// * `instruments` - Instruments in any order. Their ids must form the
    ///   sequence `0..n` and their names must be unique.
    ///
    /// # Returns
    ///
    /// * `Ok(InstrumentRegistry)` holding exactly those instruments.
    /// * `Err(TickError::InvalidArgument)` if ids have gaps or names repeat.
    pub fn restore(mut instruments: Vec<Instrument>) -> Result<Self, TickError> {
        instruments.sort_by_key(Instrument::get_id);

        let mut entries = Entries::default();
        for (expected, instrument) in instruments.into_iter().enumerate() {
            if instrument.get_id() != expected {
                return Err(TickError::InvalidArgument(format!(
                    "registry snapshot is not sequential: expected id {} but found {}",
                    expected, instrument
                )));
            }
            if entries
                .ids
                .insert(instrument.get_name().to_string(), expected)
                .is_some()
            {
                return Err(TickError::InvalidArgument(format!(
                    "duplicate instrument name in registry snapshot: {}",
                    instrument.get_name()
                )));
            }
            entries.instruments.push(instrument);
        }

        Ok(Self {
            inner: Mutex::new(entries),
        })
    }

    // Entries are append-only, so a panic in another holder cannot leave them
    // half-written. Recover the guard instead of propagating the poison.
    fn entries(&self) -> MutexGuard<'_, Entries> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Returns the instrument registered under `name`, registering it with the
    /// next sequential id if it has never been seen.
    pub fn get_or_create(&self, name: &str) -> Instrument {
        let mut entries = self.entries();
        if let Some(&id) = entries.ids.get(name) {
            return entries.instruments[id].clone();
        }

        let instrument = Instrument::new(entries.instruments.len(), name);
        entries.ids.insert(name.to_string(), instrument.get_id());
        entries.instruments.push(instrument.clone());
        instrument
    }

    /// Looks up an instrument by name without registering it.
    pub fn get(&self, name: &str) -> Option<Instrument> {
        let entries = self.entries();
        entries
            .ids
            .get(name)
            .map(|&id| entries.instruments[id].clone())
    }

    /// Retrieves an instrument by its ID.
    pub fn get_by_id(&self, id: InstrumentId) -> Option<Instrument> {
        self.entries().instruments.get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries().instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a snapshot of every registered instrument in id order.
    pub fn instruments(&self) -> Vec<Instrument> {
        self.entries().instruments.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_ids_follow_first_seen_order() {
        let registry = InstrumentRegistry::new();

        assert_eq!(registry.get_or_create("USD/JPY").get_id(), 0);
        assert_eq!(registry.get_or_create("EUR/USD").get_id(), 1);
        assert_eq!(registry.get_or_create("USD/JPY").get_id(), 0);
        assert_eq!(registry.get_or_create("GBP/JPY").get_id(), 2);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_lookups_never_register() {
        let registry = InstrumentRegistry::new();
        registry.get_or_create("EUR/USD");

        assert_eq!(registry.get("EUR/USD"), Some(Instrument::new(0, "EUR/USD")));
        assert_eq!(registry.get("AUD/USD"), None);
        assert_eq!(registry.get_by_id(1), None);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_concurrent_registration_allocates_each_id_once() {
        let registry = Arc::new(InstrumentRegistry::new());
        let names: Vec<String> = (0..32).map(|i| format!("PAIR{}", i)).collect();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                let names = names.clone();
                thread::spawn(move || {
                    for name in &names {
                        registry.get_or_create(name);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.len(), names.len());
        let mut ids: Vec<_> = registry.instruments().iter().map(Instrument::get_id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..names.len()).collect::<Vec<_>>());
        for name in &names {
            let instrument = registry.get(name).unwrap();
            assert_eq!(registry.get_by_id(instrument.get_id()), Some(instrument));
        }
    }

    #[test]
    fn test_restore_round_trips_snapshot() {
        let registry = InstrumentRegistry::new();
        registry.get_or_create("USD/JPY");
        registry.get_or_create("EUR/USD");

        let mut snapshot = registry.instruments();
        snapshot.reverse();
        let restored = InstrumentRegistry::restore(snapshot).unwrap();

        assert_eq!(restored.instruments(), registry.instruments());
        assert_eq!(restored.get_or_create("GBP/USD").get_id(), 2);
    }

    #[test]
    fn test_restore_rejects_gaps_and_duplicates() {
        let gap = vec![Instrument::new(0, "USD/JPY"), Instrument::new(2, "EUR/USD")];
        assert!(matches!(
            InstrumentRegistry::restore(gap),
            Err(TickError::InvalidArgument(_))
        ));

        let duplicate = vec![Instrument::new(0, "USD/JPY"), Instrument::new(1, "USD/JPY")];
        assert!(matches!(
            InstrumentRegistry::restore(duplicate),
            Err(TickError::InvalidArgument(_))
        ));
    }
}
