//! The screening pipeline — filter, sort, truncate.
//!
//! A screen takes the loaded dataset and a `ScreenConfig`, keeps the
//! brokers matching every requested feature (optionally restricted by
//! country availability), and orders them for display. Feature
//! resolution is pure per broker, so the match phase fans out with
//! rayon; ordering is restored by the explicit sort afterwards.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use fxscreen_core::{metrics, Broker, TraitResolver};

use crate::config::{ScreenConfig, SortKey};
use crate::country::available_in;
use crate::store::BrokerStore;

/// Artifact schema version; bump when `ScreenResult`'s shape changes.
pub const SCHEMA_VERSION: u32 = 1;

/// One matched broker with its display aggregates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScreenEntry {
    pub id: String,
    pub name: String,
    pub score: f64,
    /// Lowest deposit floor; None when the dataset doesn't say.
    pub min_deposit: Option<f64>,
    pub eurusd_spread: f64,
    pub max_leverage: u32,
}

impl ScreenEntry {
    pub fn from_broker(broker: &Broker) -> Self {
        let deposit = metrics::min_deposit(broker);
        Self {
            id: broker.id.clone(),
            name: broker.name.clone(),
            score: metrics::overall_score(broker),
            min_deposit: deposit.is_finite().then_some(deposit),
            eurusd_spread: metrics::eurusd_spread(broker),
            max_leverage: metrics::leverage_value(broker),
        }
    }
}

/// Outcome of one screen run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScreenResult {
    pub schema_version: u32,
    pub screen_id: String,
    /// Candidate count before feature matching (after any country cut).
    pub total_screened: usize,
    pub matched: Vec<ScreenEntry>,
}

/// Run one screen over the loaded dataset.
pub fn run_screen(
    store: &BrokerStore,
    resolver: &TraitResolver,
    config: &ScreenConfig,
) -> ScreenResult {
    let candidates: Vec<&Broker> = match config.country.as_deref() {
        Some(country) => store
            .all()
            .iter()
            .filter(|broker| available_in(broker, country))
            .collect(),
        None => store.all().iter().collect(),
    };
    let total_screened = candidates.len();

    let mut matched: Vec<ScreenEntry> = candidates
        .par_iter()
        .filter(|broker| {
            config
                .features
                .iter()
                .all(|key| resolver.has_feature(broker, key))
        })
        .map(|broker| ScreenEntry::from_broker(broker))
        .collect();

    sort_entries(&mut matched, config.sort);
    if let Some(limit) = config.limit {
        matched.truncate(limit);
    }

    ScreenResult {
        schema_version: SCHEMA_VERSION,
        screen_id: config.screen_id(),
        total_screened,
        matched,
    }
}

/// Deterministic ordering per sort key, with name as the tiebreaker.
fn sort_entries(entries: &mut [ScreenEntry], sort: SortKey) {
    entries.sort_by(|a, b| {
        let primary = match sort {
            SortKey::Score => b.score.total_cmp(&a.score),
            SortKey::MinDeposit => {
                // Known deposits first, ascending; unknown last.
                let a_dep = a.min_deposit.unwrap_or(f64::INFINITY);
                let b_dep = b.min_deposit.unwrap_or(f64::INFINITY);
                a_dep.total_cmp(&b_dep)
            }
            SortKey::Spread => a.eurusd_spread.total_cmp(&b.eurusd_spread),
            SortKey::Leverage => b.max_leverage.cmp(&a.max_leverage),
        };
        primary.then_with(|| a.name.cmp(&b.name))
    });
}
