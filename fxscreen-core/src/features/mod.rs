//! Feature vocabulary and dispatch — the trait resolver.
//!
//! A `Feature` is one classification rule; a feature *key* is a
//! normalized string a caller asks about ("ecn", "no-dealing-desk",
//! "copy-trading"). Several keys may alias one rule. `KEY_TABLE` is the
//! single source of truth for the registered vocabulary; the resolver
//! answers `has_feature` by normalizing the key, looking up the rule, and
//! evaluating it against the broker plus the precomputed trait table.
//!
//! Unknown keys resolve to false — a typo or a not-yet-implemented filter
//! degrades to an empty category instead of failing a listing.

pub mod normalize;
pub mod predicates;

use thiserror::Error;

use crate::domain::Broker;
use crate::traits::TraitTable;

use normalize::{normalize_key, text_contains};
use predicates::{
    allows_hedging, allows_scalping, has_api_access, has_corporate_accounts, has_fixed_spreads,
    has_instant_execution, has_islamic_account, has_low_swap_fees, has_micro_accounts,
    has_no_requotes, has_pamm_support, has_platform, has_raw_spreads, is_high_leverage,
    is_offshore, mentions_gold, offers_crypto_instruments, offers_stock_instruments,
    offers_trailing_stops, supports_copy_trading,
};

/// The closed classification vocabulary.
///
/// One variant per distinct rule; alias keys in `KEY_TABLE` map onto the
/// same variant. Adding a variant without registering a key (or vice
/// versa) breaks the round-trip test below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Ndd,
    Ecn,
    Stp,
    Dma,
    Mt4,
    Mt5,
    CopyTrading,
    IslamicAccount,
    Scalping,
    DayTrading,
    SwingTrading,
    Hedging,
    LowSwap,
    RawSpreads,
    ZeroSpread,
    FixedSpreads,
    InstantExecution,
    Hft,
    Pamm,
    ApiTrading,
    TrailingStops,
    MicroAccounts,
    Offshore,
    CorporateAccounts,
    NoDepositBonus,
    HighLeverage,
    Beginner,
    Advanced,
    Crypto,
    Gold,
    Stocks,
    NoRequotes,
}

/// Registered key -> rule table. Keys are stored pre-normalized
/// (lowercase, hyphen-separated) and include every accepted alias.
const KEY_TABLE: &[(&str, Feature)] = &[
    ("ndd", Feature::Ndd),
    ("no-dealing-desk", Feature::Ndd),
    ("ecn", Feature::Ecn),
    ("stp", Feature::Stp),
    ("dma", Feature::Dma),
    ("mt4", Feature::Mt4),
    ("mt5", Feature::Mt5),
    ("copytrading", Feature::CopyTrading),
    ("copy-trading", Feature::CopyTrading),
    ("copy", Feature::CopyTrading),
    ("social-trading", Feature::CopyTrading),
    ("islamic", Feature::IslamicAccount),
    ("islamic-account", Feature::IslamicAccount),
    ("swap-free", Feature::IslamicAccount),
    ("scalping", Feature::Scalping),
    ("day-trading", Feature::DayTrading),
    ("swing-trading", Feature::SwingTrading),
    ("hedging", Feature::Hedging),
    ("low-swap", Feature::LowSwap),
    ("raw-spreads", Feature::RawSpreads),
    ("zero-spread", Feature::ZeroSpread),
    ("fixed-spreads", Feature::FixedSpreads),
    ("instant-execution", Feature::InstantExecution),
    ("hft", Feature::Hft),
    ("pamm", Feature::Pamm),
    ("pamm-accounts", Feature::Pamm),
    ("api-trading", Feature::ApiTrading),
    ("trailing-stops", Feature::TrailingStops),
    ("micro-accounts", Feature::MicroAccounts),
    ("offshore", Feature::Offshore),
    ("corporate", Feature::CorporateAccounts),
    ("corporate-accounts", Feature::CorporateAccounts),
    ("no-deposit-bonus", Feature::NoDepositBonus),
    ("high-leverage", Feature::HighLeverage),
    ("leverage", Feature::HighLeverage),
    ("beginner", Feature::Beginner),
    ("advanced", Feature::Advanced),
    ("crypto", Feature::Crypto),
    ("gold", Feature::Gold),
    ("stocks", Feature::Stocks),
    ("no-requotes", Feature::NoRequotes),
];

/// A requested feature key that is not in the registered vocabulary.
///
/// Only surfaced by the strict [`Feature::from_key`] parser; the resolver
/// itself treats unknown keys as non-matches.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown feature key: {0}")]
pub struct UnknownFeatureError(pub String);

impl Feature {
    /// Lenient lookup: normalized key first, then the raw lowercased key
    /// as a fallback for legacy exact-cased callers.
    pub fn parse_key(raw: &str) -> Option<Feature> {
        lookup(&normalize_key(raw)).or_else(|| lookup(&raw.to_lowercase()))
    }

    /// Strict lookup for callers validating explicit user input.
    pub fn from_key(raw: &str) -> Result<Feature, UnknownFeatureError> {
        Self::parse_key(raw).ok_or_else(|| UnknownFeatureError(raw.to_string()))
    }
}

fn lookup(key: &str) -> Option<Feature> {
    KEY_TABLE
        .iter()
        .find(|(registered, _)| *registered == key)
        .map(|(_, feature)| *feature)
}

/// Every registered key (aliases included), in registration order.
///
/// The single enumeration source for UI filter lists and caller-side
/// input validation.
pub fn supported_feature_keys() -> Vec<&'static str> {
    KEY_TABLE.iter().map(|(key, _)| *key).collect()
}

/// Resolves feature keys against a broker record and the precomputed
/// trait table.
///
/// Pure and stateless per call: safe to share across threads and to map
/// over whole broker lists concurrently.
#[derive(Debug, Clone, Default)]
pub struct TraitResolver {
    traits: TraitTable,
}

impl TraitResolver {
    pub fn new(traits: TraitTable) -> Self {
        Self { traits }
    }

    /// Resolver with an empty trait table: every trait-backed rule
    /// answers false, derivation rules still apply.
    pub fn without_traits() -> Self {
        Self::default()
    }

    pub fn trait_table(&self) -> &TraitTable {
        &self.traits
    }

    /// Whether `broker_id` carries the exact-named precomputed trait.
    pub fn has_trait(&self, broker_id: &str, trait_name: &str) -> bool {
        self.traits.has(broker_id, trait_name)
    }

    /// All precomputed flags for one broker, if any.
    pub fn traits_for(&self, broker_id: &str) -> Option<&std::collections::HashMap<String, bool>> {
        self.traits.get(broker_id)
    }

    /// Primary entry point: does `broker` match the requested key?
    ///
    /// Unknown keys are not an error — the broker simply does not match.
    pub fn has_feature(&self, broker: &Broker, raw_key: &str) -> bool {
        match Feature::parse_key(raw_key) {
            Some(feature) => self.evaluate(broker, feature),
            None => false,
        }
    }

    /// Evaluate one rule. Exhaustive over the vocabulary; every arm is
    /// written defensively so missing broker data yields false rather
    /// than a panic.
    pub fn evaluate(&self, broker: &Broker, feature: Feature) -> bool {
        let id = broker.id.as_str();
        match feature {
            Feature::Ndd => self.traits.has(id, "isNDD"),
            Feature::Ecn => self.traits.has(id, "isECN"),
            Feature::Stp => self.traits.has(id, "isSTP"),
            Feature::Dma => {
                text_contains(broker.execution_type(), "dma") || self.traits.has(id, "isDMA")
            }
            Feature::Mt4 => has_platform(broker, "mt4") || has_platform(broker, "metatrader 4"),
            Feature::Mt5 => has_platform(broker, "mt5") || has_platform(broker, "metatrader 5"),
            Feature::CopyTrading => supports_copy_trading(broker),
            Feature::IslamicAccount => has_islamic_account(broker),
            Feature::Scalping => allows_scalping(broker),
            Feature::DayTrading => allows_scalping(broker) || self.traits.has(id, "isDayTrading"),
            Feature::SwingTrading => self.traits.has(id, "isSwing"),
            Feature::Hedging => allows_hedging(broker),
            Feature::LowSwap => has_low_swap_fees(broker),
            // Two registered keys, one rule: kept aliased on purpose.
            Feature::RawSpreads | Feature::ZeroSpread => has_raw_spreads(broker),
            Feature::FixedSpreads => has_fixed_spreads(broker),
            Feature::InstantExecution => has_instant_execution(broker),
            Feature::Hft => {
                self.traits.has(id, "isHFT")
                    || (self.traits.has(id, "isECN") && has_instant_execution(broker))
            }
            Feature::Pamm => has_pamm_support(broker),
            Feature::ApiTrading => has_api_access(broker),
            Feature::TrailingStops => offers_trailing_stops(broker),
            Feature::MicroAccounts => has_micro_accounts(broker),
            Feature::Offshore => is_offshore(broker),
            Feature::CorporateAccounts => has_corporate_accounts(broker),
            Feature::NoDepositBonus => self.traits.has(id, "isNoDeposit"),
            Feature::HighLeverage => is_high_leverage(broker),
            Feature::Beginner => self.traits.has(id, "isBeginnerFriendly"),
            Feature::Advanced => self.traits.has(id, "isAdvanced"),
            Feature::Crypto => self.traits.has(id, "isCrypto") || offers_crypto_instruments(broker),
            Feature::Gold => self.traits.has(id, "isGold") || mentions_gold(broker),
            Feature::Stocks => self.traits.has(id, "isStocks") || offers_stock_instruments(broker),
            Feature::NoRequotes => has_no_requotes(broker),
        }
    }
}
