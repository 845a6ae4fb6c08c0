//! The tick abstraction handed to consumers.
//!
//! `Tick` is either a real `TickRecord` or a `NullTick` standing in for "no
//! data at this moment". Both answer the same questions, so callers can walk a
//! timeline without checking for missing ticks at every step.

use crate::error::Result;
use crate::model::instrument_registry::InstrumentRegistry;
use crate::model::quote::Quote;
use crate::model::record::TickRecord;
use crate::traits::quote_store::QuoteStore;
use chrono::{DateTime, Utc};

/// The absent tick. Holds no quotes and is never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NullTick {
    timestamp: DateTime<Utc>,
}

impl NullTick {
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self { timestamp }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl Default for NullTick {
    /// A null tick stamped with the current time.
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Tick {
    Record(TickRecord),
    Null(NullTick),
}

impl Tick {
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::Record(record) => record.timestamp(),
            Self::Null(null) => null.timestamp(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null(_))
    }

    pub fn record(&self) -> Option<&TickRecord> {
        match self {
            Self::Record(record) => Some(record),
            Self::Null(_) => None,
        }
    }

    /// Looks up the quote of one instrument.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Quote))` for a record holding the instrument.
    /// * `Ok(None)` for a null tick.
    /// * `Err(TickError::InvalidArgument)` if a record cannot decode the name.
    pub fn get(&self, registry: &InstrumentRegistry, name: &str) -> Result<Option<Quote>> {
        match self {
            Self::Record(record) => record.decode(registry, name).map(Some),
            Self::Null(_) => Ok(None),
        }
    }

    /// Iterates `(name, quote)` pairs. A null tick yields nothing.
    pub fn iter<'a>(
        &'a self,
        registry: &'a InstrumentRegistry,
    ) -> impl Iterator<Item = (String, Quote)> + 'a {
        self.record()
            .into_iter()
            .flat_map(move |record| record.iter(registry))
    }

    /// Persists a record; a null tick is a no-op.
    pub async fn persist(&self, store: &dyn QuoteStore) -> Result<()> {
        match self {
            Self::Record(record) => record.persist(store).await,
            Self::Null(_) => Ok(()),
        }
    }
}

impl From<TickRecord> for Tick {
    fn from(record: TickRecord) -> Self {
        Self::Record(record)
    }
}

impl From<NullTick> for Tick {
    fn from(null: NullTick) -> Self {
        Self::Null(null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn test_null_tick_answers_nothing() {
        let registry = InstrumentRegistry::new();
        registry.get_or_create("USD/JPY");
        let tick = Tick::from(NullTick::new(ts(42)));

        assert!(tick.is_null());
        assert_eq!(tick.timestamp(), ts(42));
        assert_eq!(tick.get(&registry, "USD/JPY").unwrap(), None);
        assert_eq!(tick.get(&registry, "never-registered").unwrap(), None);
        assert_eq!(tick.iter(&registry).count(), 0);
    }

    #[test]
    fn test_record_tick_delegates() {
        let registry = InstrumentRegistry::new();
        let record = TickRecord::encode(
            &registry,
            vec![("EUR/USD", Quote::new(1.2, 1.2005, 0.01, -0.02))],
            ts(7),
        );
        let tick = Tick::from(record);

        assert!(!tick.is_null());
        assert_eq!(tick.timestamp(), ts(7));
        assert_eq!(
            tick.get(&registry, "EUR/USD").unwrap(),
            Some(Quote::new(1.2, 1.2005, 0.01, -0.02))
        );
        assert!(tick.get(&registry, "USD/JPY").is_err());
        assert_eq!(tick.iter(&registry).count(), 1);
    }

    #[test]
    fn test_default_null_tick_is_stamped_now() {
        let before = Utc::now();
        let null = NullTick::default();
        assert!(null.timestamp() >= before);
    }
}
