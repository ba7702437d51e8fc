//! FXScreen Runner — screening orchestration over `fxscreen-core`.
//!
//! This crate builds on the core classification engine to provide:
//! - Broker dataset loading and an explicit dataset cache
//! - Serializable screen configs with content-addressed ids
//! - The filter/sort/truncate screening pipeline
//! - Curated country availability tiers
//! - JSON/CSV artifact export

pub mod config;
pub mod country;
pub mod export;
pub mod screen;
pub mod store;

pub use config::{ConfigError, ScreenConfig, ScreenId, SortKey};
pub use country::{available_in, brokers_for_country, has_regulator};
pub use export::{export_csv, export_json, import_json, save_artifacts};
pub use screen::{run_screen, ScreenEntry, ScreenResult, SCHEMA_VERSION};
pub use store::{
    load_dataset, load_trait_table, BrokerStore, CacheMeta, CachedDataset, DatasetCache,
    StoreError,
};
