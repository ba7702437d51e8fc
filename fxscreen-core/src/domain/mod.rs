//! Domain types for the broker screening engine

pub mod broker;

pub use broker::{
    AccountManagement, AccountType, Accessibility, AvailabilityFlag, Broker, Fees,
    InstrumentCount, PlatformFeatures, Regulation, SpreadTable, SpreadType, SwapFeeCategory,
    Technology, TradableInstruments, TradingConditions, TradingConditionsExtended, TradingEnvironment,
    TradingFees,
};

/// Broker identifier type alias
pub type BrokerId = String;
