//! FXScreen Core — broker classification engine.
//!
//! This crate contains the heart of the screening system:
//! - The broker record (deeply nested, optional-by-default)
//! - The precomputed trait table (offline-generated boolean flags)
//! - Feature key normalization
//! - The derivation predicate library (pure `&Broker -> bool` rules)
//! - The trait resolver: normalized-key dispatch over a closed vocabulary
//! - Listing metrics (defensive numeric coercions for sorting/display)
//!
//! Everything here is synchronous, pure, and free of I/O; data loading
//! lives in `fxscreen-runner`.

pub mod domain;
pub mod features;
pub mod metrics;
pub mod traits;

pub use domain::Broker;
pub use features::{supported_feature_keys, Feature, TraitResolver, UnknownFeatureError};
pub use traits::TraitTable;
