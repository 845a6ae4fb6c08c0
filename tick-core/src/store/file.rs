use crate::fs::{load_binary, save_binary};
use crate::store::series::OrderedSeries;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use ticks::{QuoteRow, QuoteStore, SwapEntry, SwapStore};
use tokio::sync::Mutex;

/// On-disk layout of a `FileStore` snapshot.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    quotes: Vec<QuoteRow>,
    swaps: Vec<SwapEntry>,
}

#[derive(Debug, Default, Clone)]
struct State {
    quotes: OrderedSeries<QuoteRow>,
    swaps: OrderedSeries<SwapEntry>,
    dirty: bool,
}

#[derive(Debug)]
struct Inner {
    path: PathBuf,
    autosave: bool,
    state: Mutex<State>,
}

/// A quote and swap store persisted as a single bincode snapshot.
///
/// Every mutation rewrites the snapshot atomically unless autosave is turned
/// off, in which case changes stay in memory until [`FileStore::flush`].
/// Clones share the same state, so one `FileStore` can back both the quote
/// and the swap side of a `TickStore`.
#[derive(Debug, Clone)]
pub struct FileStore {
    inner: Arc<Inner>,
}

impl FileStore {
    /// Opens the snapshot at `path`, starting empty if the file does not
    /// exist yet.
    ///
    /// # Returns
    ///
    /// * `Ok(FileStore)` with autosave enabled.
    /// * `Err` if the file exists but cannot be decoded.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open_with(path, true)
    }

    /// Like [`FileStore::open`], choosing whether mutations are written
    /// through immediately.
    pub fn open_with(path: impl Into<PathBuf>, autosave: bool) -> Result<Self> {
        let path = path.into();
        let state = if path.exists() {
            let snapshot: Snapshot = load_binary(&path)
                .with_context(|| format!("Failed to load tick snapshot from {:?}", path))?;
            log::debug!(
                "Loaded {} quote rows and {} swap entries from {:?}",
                snapshot.quotes.len(),
                snapshot.swaps.len(),
                path
            );
            State {
                quotes: OrderedSeries::from(snapshot.quotes),
                swaps: OrderedSeries::from(snapshot.swaps),
                dirty: false,
            }
        } else {
            State::default()
        };

        Ok(Self {
            inner: Arc::new(Inner {
                path,
                autosave,
                state: Mutex::new(state),
            }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Writes pending changes to disk. A clean store is left untouched.
    pub async fn flush(&self) -> Result<()> {
        let mut state = self.inner.state.lock().await;
        self.write(&mut state)
    }

    fn write(&self, state: &mut State) -> Result<()> {
        if !state.dirty {
            return Ok(());
        }
        let snapshot = Snapshot {
            quotes: state.quotes.as_slice().to_vec(),
            swaps: state.swaps.as_slice().to_vec(),
        };
        save_binary(&self.inner.path, &snapshot)
            .with_context(|| format!("Failed to save tick snapshot to {:?}", self.inner.path))?;
        state.dirty = false;
        Ok(())
    }

    // With autosave on, the change is applied to a copy and only replaces
    // `state` once the snapshot is on disk, so a failed write leaves memory
    // untouched.
    fn commit<R>(&self, state: &mut State, change: impl FnOnce(&mut State) -> R) -> Result<R> {
        if !self.inner.autosave {
            let result = change(state);
            state.dirty = true;
            return Ok(result);
        }

        let mut next = state.clone();
        let result = change(&mut next);
        next.dirty = true;
        self.write(&mut next)?;
        *state = next;
        Ok(result)
    }
}

#[async_trait]
impl QuoteStore for FileStore {
    async fn insert(&self, row: QuoteRow) -> Result<()> {
        let mut state = self.inner.state.lock().await;
        self.commit(&mut state, |state| state.quotes.insert(row))
    }

    async fn query_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<QuoteRow>> {
        Ok(self.inner.state.lock().await.quotes.range(start, end).to_vec())
    }

    async fn delete_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<usize> {
        let mut state = self.inner.state.lock().await;
        if state.quotes.range(start, end).is_empty() {
            return Ok(0);
        }
        self.commit(&mut state, |state| state.quotes.remove_range(start, end))
    }

    async fn exists(&self) -> Result<bool> {
        Ok(!self.inner.state.lock().await.quotes.is_empty())
    }

    async fn min_timestamp(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(self.inner.state.lock().await.quotes.first_timestamp())
    }

    async fn max_timestamp(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(self.inner.state.lock().await.quotes.last_timestamp())
    }
}

#[async_trait]
impl SwapStore for FileStore {
    async fn insert(&self, entry: SwapEntry) -> Result<()> {
        let mut state = self.inner.state.lock().await;
        self.commit(&mut state, |state| state.swaps.insert(entry))
    }

    async fn query_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<SwapEntry>> {
        Ok(self.inner.state.lock().await.swaps.range(start, end).to_vec())
    }
}
