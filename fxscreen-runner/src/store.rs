//! Broker dataset store and the explicit dataset cache.
//!
//! The broker list and the generated trait flags are two JSON documents
//! produced before deploy and read-only at runtime. `BrokerStore` loads
//! and indexes the broker list; `DatasetCache` pairs a loaded store with
//! its resolver and carries explicit lifecycle (construct on startup,
//! `invalidate()` to force a reload) instead of hidden module state.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use fxscreen_core::{Broker, TraitResolver, TraitTable};

/// Errors from loading the broker dataset or the flags document.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read-only broker collection with an id index.
#[derive(Debug, Clone, Default)]
pub struct BrokerStore {
    brokers: Vec<Broker>,
    index: HashMap<String, usize>,
}

impl BrokerStore {
    /// Load a JSON array of broker records.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let brokers: Vec<Broker> =
            serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::from_brokers(brokers))
    }

    /// Build a store from an in-memory list. Later records win on
    /// duplicate ids, matching last-write semantics of the dataset
    /// generator.
    pub fn from_brokers(brokers: Vec<Broker>) -> Self {
        let index = brokers
            .iter()
            .enumerate()
            .map(|(i, broker)| (broker.id.clone(), i))
            .collect();
        Self { brokers, index }
    }

    /// All brokers, dataset order.
    pub fn all(&self) -> &[Broker] {
        &self.brokers
    }

    /// One broker by id, or None.
    pub fn get(&self, id: &str) -> Option<&Broker> {
        self.index.get(id).map(|&i| &self.brokers[i])
    }

    pub fn len(&self) -> usize {
        self.brokers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brokers.is_empty()
    }
}

/// Load the generated trait flags document.
pub fn load_trait_table(path: impl AsRef<Path>) -> Result<TraitTable, StoreError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    TraitTable::from_json_str(&raw).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Metadata recorded when a dataset is loaded into the cache.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheMeta {
    /// blake3 over the raw bytes of both documents.
    pub fingerprint: String,
    pub loaded_at: DateTime<Utc>,
    pub broker_count: usize,
}

/// A loaded dataset: store, resolver, and load metadata.
#[derive(Debug, Clone)]
pub struct CachedDataset {
    pub store: BrokerStore,
    pub resolver: TraitResolver,
    pub meta: CacheMeta,
}

/// Explicit dataset cache with injected lifecycle.
///
/// Owned by the application, passed by reference to callers; nothing here
/// is global. `get_or_load` loads at most once until `invalidate()`.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entry: Option<CachedDataset>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached dataset, loading it on first use (or after an
    /// invalidation).
    pub fn get_or_load(
        &mut self,
        brokers_path: impl AsRef<Path>,
        flags_path: impl AsRef<Path>,
    ) -> Result<&CachedDataset, StoreError> {
        if self.entry.is_none() {
            self.entry = Some(load_dataset(brokers_path, flags_path)?);
        }
        Ok(self
            .entry
            .as_ref()
            .expect("dataset cache entry populated above"))
    }

    /// Drop the cached dataset; the next `get_or_load` re-reads disk.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.entry.is_some()
    }

    pub fn meta(&self) -> Option<&CacheMeta> {
        self.entry.as_ref().map(|e| &e.meta)
    }
}

/// Load both documents and fingerprint them.
pub fn load_dataset(
    brokers_path: impl AsRef<Path>,
    flags_path: impl AsRef<Path>,
) -> Result<CachedDataset, StoreError> {
    let brokers_path = brokers_path.as_ref();
    let flags_path = flags_path.as_ref();

    let broker_bytes = fs::read(brokers_path).map_err(|source| StoreError::Io {
        path: brokers_path.to_path_buf(),
        source,
    })?;
    let flag_bytes = fs::read(flags_path).map_err(|source| StoreError::Io {
        path: flags_path.to_path_buf(),
        source,
    })?;

    let brokers: Vec<Broker> =
        serde_json::from_slice(&broker_bytes).map_err(|source| StoreError::Parse {
            path: brokers_path.to_path_buf(),
            source,
        })?;
    let table: TraitTable =
        serde_json::from_slice(&flag_bytes).map_err(|source| StoreError::Parse {
            path: flags_path.to_path_buf(),
            source,
        })?;

    let mut hasher = blake3::Hasher::new();
    hasher.update(&broker_bytes);
    hasher.update(&flag_bytes);
    let fingerprint = hasher.finalize().to_hex().to_string();

    let store = BrokerStore::from_brokers(brokers);
    let meta = CacheMeta {
        fingerprint,
        loaded_at: Utc::now(),
        broker_count: store.len(),
    };
    Ok(CachedDataset {
        store,
        resolver: TraitResolver::new(table),
        meta,
    })
}
