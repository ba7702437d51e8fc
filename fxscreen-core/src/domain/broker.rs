//! The broker record — a deeply nested, optional-by-default profile.
//!
//! Every field along every nested path may be absent. The dataset is
//! produced upstream (static data or a generated JSON document) and
//! consumed read-only; nothing here is guaranteed beyond `id` and `name`.
//! All derivation logic over this type must fail closed: a missing path
//! means "does not match", never a panic.

use serde::{Deserialize, Serialize};

/// Spread pricing model advertised by a broker.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SpreadType {
    Fixed,
    Variable,
    Raw,
}

/// Coarse swap/overnight fee classification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SwapFeeCategory {
    Low,
    Standard,
    High,
}

/// Regulatory section: list of regulator codes (e.g. "FCA", "ASIC").
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Regulation {
    pub regulators: Option<Vec<String>>,
}

/// Technology section: platforms, execution type, API access.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Technology {
    pub platforms: Option<Vec<String>>,
    pub execution_type: Option<String>,
    pub api_access: Option<bool>,
}

/// Legacy per-pair spread table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SpreadTable {
    pub eurusd: Option<f64>,
    pub gbpusd: Option<f64>,
    pub usdjpy: Option<f64>,
}

/// Legacy trading conditions: leverage string, swap category, spreads.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TradingConditions {
    pub spreads: Option<SpreadTable>,
    pub swap_fee_category: Option<SwapFeeCategory>,
    /// Free-form leverage string, e.g. `"1:500"` or `"Unlimited"`.
    pub max_leverage: Option<String>,
}

/// Extended trading conditions: scalping/hedging policy flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TradingConditionsExtended {
    pub scalping_allowed: Option<bool>,
    pub hedging_allowed: Option<bool>,
}

/// One offered account tier.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AccountType {
    pub name: Option<String>,
    pub min_deposit: Option<f64>,
    /// Free-form spread description, e.g. `"0.0-0.3 pips"`.
    pub spreads: Option<String>,
    pub commission: Option<String>,
}

/// Trading fee subsection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TradingFees {
    pub spread_type: Option<SpreadType>,
    pub commission_structure: Option<String>,
}

/// Fee section wrapper.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Fees {
    pub trading: Option<TradingFees>,
}

/// Execution environment measurements and order capabilities.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TradingEnvironment {
    pub requotes: Option<bool>,
    pub execution_speed_ms: Option<f64>,
    pub order_types: Option<Vec<String>>,
}

/// A nested `{ available: bool }` flag, used by several sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AvailabilityFlag {
    pub available: Option<bool>,
}

/// Account management section: islamic/MAM-PAMM/corporate offerings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AccountManagement {
    pub islamic_account: Option<AvailabilityFlag>,
    pub mam_pamm_support: Option<bool>,
    pub corporate_accounts: Option<bool>,
}

/// Per-asset-class instrument count.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct InstrumentCount {
    pub total: Option<u32>,
    pub details: Option<String>,
}

/// Tradable instrument universe, grouped by asset class.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TradableInstruments {
    pub forex_pairs: Option<InstrumentCount>,
    pub commodities: Option<InstrumentCount>,
    pub indices: Option<InstrumentCount>,
    pub stocks: Option<InstrumentCount>,
    pub cryptocurrencies: Option<InstrumentCount>,
    pub etfs: Option<InstrumentCount>,
}

/// Platform feature section: copy trading, automation, platform list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PlatformFeatures {
    pub copy_trading: Option<AvailabilityFlag>,
    pub automated_trading: Option<Vec<String>>,
    pub platforms: Option<Vec<String>>,
}

/// Accessibility section (deposit floor, as advertised broker-wide).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Accessibility {
    pub min_deposit: Option<f64>,
}

/// A broker profile record.
///
/// Field names serialize camelCase to match the upstream dataset. The
/// `Default` impl plus `#[serde(default)]` lets sparse JSON objects
/// deserialize with every unlisted section absent, and lets tests build
/// minimal fixtures with struct-update syntax.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Broker {
    pub id: String,
    pub name: String,
    pub score: Option<f64>,
    pub headquarters: Option<String>,
    pub summary: Option<String>,
    pub restricted_countries: Option<Vec<String>>,
    pub regulation: Option<Regulation>,
    pub technology: Option<Technology>,
    pub trading_conditions: Option<TradingConditions>,
    pub trading_conditions_extended: Option<TradingConditionsExtended>,
    pub account_types: Option<Vec<AccountType>>,
    pub fees: Option<Fees>,
    pub trading_environment: Option<TradingEnvironment>,
    pub account_management: Option<AccountManagement>,
    pub tradable_instruments: Option<TradableInstruments>,
    pub platform_features: Option<PlatformFeatures>,
    pub accessibility: Option<Accessibility>,
    /// Legacy top-level flag kept for backward compatibility with older
    /// dataset entries; superseded by `platform_features.copy_trading`.
    pub copy_trading: Option<bool>,
    /// Legacy top-level flag; superseded by
    /// `account_management.islamic_account`.
    pub is_islamic: Option<bool>,
}

impl Broker {
    /// Minimal record with only identity populated.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Execution type text, if the technology section carries one.
    pub fn execution_type(&self) -> Option<&str> {
        self.technology.as_ref()?.execution_type.as_deref()
    }

    /// Advertised spread pricing model, if present.
    pub fn spread_type(&self) -> Option<SpreadType> {
        self.fees.as_ref()?.trading.as_ref()?.spread_type
    }

    /// Regulator code list, if present.
    pub fn regulators(&self) -> Option<&[String]> {
        self.regulation.as_ref()?.regulators.as_deref()
    }
}
