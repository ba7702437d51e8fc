//! Derivation predicates — pure `&Broker -> bool` rules.
//!
//! Each predicate inspects nested optional broker attributes and fails
//! closed: an absent path means "does not match". None of these touch the
//! precomputed trait table; trait-backed rules live in the dispatch match
//! where the resolver combines both sources.

use crate::domain::{AccountType, Broker, SpreadType, SwapFeeCategory};

use super::normalize::{list_contains, text_contains};

/// Headquarters substrings that mark an offshore jurisdiction.
const OFFSHORE_JURISDICTIONS: &[&str] = &[
    "seychelles",
    "belize",
    "vanuatu",
    "mauritius",
    "bahamas",
    "bvi",
    "cayman",
    "st. vincent",
    "st.vincent",
    "nevis",
    "marshall islands",
];

/// Regulator-code substrings that mark an offshore registration.
const OFFSHORE_REGULATORS: &[&str] = &[
    "fsc",
    "ifsc",
    "vfsc",
    "labuan",
    "mauritius",
    "svg",
    "st. vincent",
    "st.vincent",
    "belize",
    "seychelles",
    "bahamas",
    "bvi",
    "cayman",
];

fn account_types(broker: &Broker) -> Option<&[AccountType]> {
    broker.account_types.as_deref()
}

/// Platform match across the technology and platform-feature sections.
///
/// The platform-feature section sometimes lists platforms under
/// `automated_trading` instead of `platforms`; the dedicated list wins
/// when both are present.
pub fn has_platform(broker: &Broker, needle: &str) -> bool {
    let tech_platforms = broker
        .technology
        .as_ref()
        .and_then(|t| t.platforms.as_deref());
    if list_contains(tech_platforms, needle) {
        return true;
    }
    let features = broker.platform_features.as_ref();
    let feature_platforms = features
        .and_then(|f| f.platforms.as_deref())
        .or_else(|| features.and_then(|f| f.automated_trading.as_deref()));
    list_contains(feature_platforms, needle)
}

/// Legacy top-level flag or the nested platform-feature availability flag.
pub fn supports_copy_trading(broker: &Broker) -> bool {
    if broker.copy_trading == Some(true) {
        return true;
    }
    broker
        .platform_features
        .as_ref()
        .and_then(|f| f.copy_trading.as_ref())
        .and_then(|c| c.available)
        == Some(true)
}

/// Legacy top-level flag or the nested account-management availability flag.
pub fn has_islamic_account(broker: &Broker) -> bool {
    if broker.is_islamic == Some(true) {
        return true;
    }
    broker
        .account_management
        .as_ref()
        .and_then(|m| m.islamic_account.as_ref())
        .and_then(|i| i.available)
        == Some(true)
}

pub fn allows_scalping(broker: &Broker) -> bool {
    broker
        .trading_conditions_extended
        .as_ref()
        .and_then(|c| c.scalping_allowed)
        == Some(true)
}

pub fn allows_hedging(broker: &Broker) -> bool {
    broker
        .trading_conditions_extended
        .as_ref()
        .and_then(|c| c.hedging_allowed)
        == Some(true)
}

pub fn has_low_swap_fees(broker: &Broker) -> bool {
    broker
        .trading_conditions
        .as_ref()
        .and_then(|c| c.swap_fee_category)
        == Some(SwapFeeCategory::Low)
}

pub fn has_pamm_support(broker: &Broker) -> bool {
    broker
        .account_management
        .as_ref()
        .and_then(|m| m.mam_pamm_support)
        == Some(true)
}

pub fn has_corporate_accounts(broker: &Broker) -> bool {
    broker
        .account_management
        .as_ref()
        .and_then(|m| m.corporate_accounts)
        == Some(true)
}

/// Explicit API access flag, or "api" listed among automation options.
pub fn has_api_access(broker: &Broker) -> bool {
    if broker.technology.as_ref().and_then(|t| t.api_access) == Some(true) {
        return true;
    }
    let automated = broker
        .platform_features
        .as_ref()
        .and_then(|f| f.automated_trading.as_deref());
    list_contains(automated, "api")
}

pub fn offers_trailing_stops(broker: &Broker) -> bool {
    let order_types = broker
        .trading_environment
        .as_ref()
        .and_then(|e| e.order_types.as_deref());
    list_contains(order_types, "trailing")
}

/// Any account tier with a deposit floor of 50 or less.
pub fn has_micro_accounts(broker: &Broker) -> bool {
    account_types(broker).is_some_and(|accounts| {
        accounts
            .iter()
            .any(|account| account.min_deposit.is_some_and(|d| d <= 50.0))
    })
}

/// Raw spread pricing, or any account tier advertising a "0.0" spread.
///
/// Registered under both `raw-spreads` and `zero-spread`; the two keys
/// intentionally share this rule.
pub fn has_raw_spreads(broker: &Broker) -> bool {
    if broker.spread_type() == Some(SpreadType::Raw) {
        return true;
    }
    account_types(broker).is_some_and(|accounts| {
        accounts
            .iter()
            .any(|account| text_contains(account.spreads.as_deref(), "0.0"))
    })
}

pub fn has_fixed_spreads(broker: &Broker) -> bool {
    broker.spread_type() == Some(SpreadType::Fixed)
}

pub fn has_no_requotes(broker: &Broker) -> bool {
    broker
        .trading_environment
        .as_ref()
        .and_then(|e| e.requotes)
        == Some(false)
}

/// No requotes and a measured execution speed of 80ms or better; brokers
/// without a measurement fall back to an "instant" execution-type label.
pub fn has_instant_execution(broker: &Broker) -> bool {
    if let Some(env) = broker.trading_environment.as_ref() {
        if env.requotes == Some(false) {
            if let Some(speed_ms) = env.execution_speed_ms {
                if speed_ms > 0.0 {
                    return speed_ms <= 80.0;
                }
            }
        }
    }
    text_contains(broker.execution_type(), "instant")
}

/// "Unlimited" leverage, or a `1:N` ratio with N >= 500.
///
/// The numeric value is the integer after the first `:` that is followed
/// by digits; a malformed string is simply not high leverage.
pub fn is_high_leverage(broker: &Broker) -> bool {
    let Some(leverage) = broker
        .trading_conditions
        .as_ref()
        .and_then(|c| c.max_leverage.as_deref())
    else {
        return false;
    };
    let lowered = leverage.to_lowercase();
    if lowered.contains("unlimited") {
        return true;
    }
    leverage_after_colon(&lowered).is_some_and(|value| value >= 500)
}

/// Integer following the first `:` that has digits after it, if any.
fn leverage_after_colon(text: &str) -> Option<u32> {
    let mut rest = text;
    while let Some(pos) = rest.find(':') {
        rest = &rest[pos + 1..];
        let digits: &str = {
            let end = rest
                .char_indices()
                .find(|(_, c)| !c.is_ascii_digit())
                .map_or(rest.len(), |(i, _)| i);
            &rest[..end]
        };
        if !digits.is_empty() {
            return digits.parse().ok();
        }
    }
    None
}

/// Offshore headquarters jurisdiction or offshore regulator registration.
pub fn is_offshore(broker: &Broker) -> bool {
    if let Some(headquarters) = broker.headquarters.as_deref() {
        let lowered = headquarters.to_lowercase();
        if OFFSHORE_JURISDICTIONS
            .iter()
            .any(|pattern| lowered.contains(pattern))
        {
            return true;
        }
    }
    broker.regulators().is_some_and(|regulators| {
        regulators.iter().any(|code| {
            let lowered = code.to_lowercase();
            OFFSHORE_REGULATORS
                .iter()
                .any(|pattern| lowered.contains(pattern))
        })
    })
}

/// Any cryptocurrencies listed in the tradable instrument universe.
pub fn offers_crypto_instruments(broker: &Broker) -> bool {
    broker
        .tradable_instruments
        .as_ref()
        .and_then(|t| t.cryptocurrencies.as_ref())
        .and_then(|c| c.total)
        .is_some_and(|total| total > 0)
}

/// Any stocks listed in the tradable instrument universe.
pub fn offers_stock_instruments(broker: &Broker) -> bool {
    broker
        .tradable_instruments
        .as_ref()
        .and_then(|t| t.stocks.as_ref())
        .and_then(|s| s.total)
        .is_some_and(|total| total > 0)
}

/// Broker summary text mentions gold.
pub fn mentions_gold(broker: &Broker) -> bool {
    text_contains(broker.summary.as_deref(), "gold")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        AccountManagement, Accessibility, AvailabilityFlag, Fees, InstrumentCount,
        PlatformFeatures, Regulation, TradableInstruments, Technology, TradingConditions,
        TradingConditionsExtended, TradingEnvironment, TradingFees,
    };

    fn bare() -> Broker {
        Broker::new("bare", "Bare Broker")
    }

    // ── Platform matching ────────────────────────────────────────

    #[test]
    fn platform_matches_technology_list() {
        let broker = Broker {
            technology: Some(Technology {
                platforms: Some(vec!["MetaTrader 4".into(), "cTrader".into()]),
                ..Default::default()
            }),
            ..bare()
        };
        assert!(has_platform(&broker, "metatrader 4"));
        assert!(!has_platform(&broker, "mt5"));
    }

    #[test]
    fn platform_falls_back_to_automated_trading_list() {
        let broker = Broker {
            platform_features: Some(PlatformFeatures {
                automated_trading: Some(vec!["MT4 EAs".into()]),
                ..Default::default()
            }),
            ..bare()
        };
        assert!(has_platform(&broker, "mt4"));
    }

    #[test]
    fn platform_prefers_dedicated_feature_list() {
        let broker = Broker {
            platform_features: Some(PlatformFeatures {
                platforms: Some(vec!["TradingView".into()]),
                automated_trading: Some(vec!["MT4 EAs".into()]),
                ..Default::default()
            }),
            ..bare()
        };
        // The dedicated platforms list is consulted instead of automation.
        assert!(!has_platform(&broker, "mt4"));
        assert!(has_platform(&broker, "tradingview"));
    }

    // ── Copy trading / islamic ───────────────────────────────────

    #[test]
    fn copy_trading_via_legacy_flag() {
        let broker = Broker {
            copy_trading: Some(true),
            ..bare()
        };
        assert!(supports_copy_trading(&broker));
    }

    #[test]
    fn copy_trading_via_platform_features() {
        let broker = Broker {
            platform_features: Some(PlatformFeatures {
                copy_trading: Some(AvailabilityFlag {
                    available: Some(true),
                }),
                ..Default::default()
            }),
            ..bare()
        };
        assert!(supports_copy_trading(&broker));
    }

    #[test]
    fn copy_trading_unavailable_flag_is_not_a_match() {
        let broker = Broker {
            copy_trading: Some(false),
            platform_features: Some(PlatformFeatures {
                copy_trading: Some(AvailabilityFlag {
                    available: Some(false),
                }),
                ..Default::default()
            }),
            ..bare()
        };
        assert!(!supports_copy_trading(&broker));
    }

    #[test]
    fn islamic_via_either_source() {
        let legacy = Broker {
            is_islamic: Some(true),
            ..bare()
        };
        let nested = Broker {
            account_management: Some(AccountManagement {
                islamic_account: Some(AvailabilityFlag {
                    available: Some(true),
                }),
                ..Default::default()
            }),
            ..bare()
        };
        assert!(has_islamic_account(&legacy));
        assert!(has_islamic_account(&nested));
        assert!(!has_islamic_account(&bare()));
    }

    // ── Spreads ──────────────────────────────────────────────────

    #[test]
    fn raw_spread_type_matches() {
        let broker = Broker {
            fees: Some(Fees {
                trading: Some(TradingFees {
                    spread_type: Some(SpreadType::Raw),
                    ..Default::default()
                }),
            }),
            ..bare()
        };
        assert!(has_raw_spreads(&broker));
        assert!(!has_fixed_spreads(&broker));
    }

    #[test]
    fn zero_spread_account_text_matches_raw() {
        let broker = Broker {
            fees: Some(Fees {
                trading: Some(TradingFees {
                    spread_type: Some(SpreadType::Variable),
                    ..Default::default()
                }),
            }),
            account_types: Some(vec![AccountType {
                spreads: Some("0.0-0.3 pips".into()),
                ..Default::default()
            }]),
            ..bare()
        };
        assert!(has_raw_spreads(&broker));
    }

    #[test]
    fn plain_variable_spreads_do_not_match_raw() {
        let broker = Broker {
            account_types: Some(vec![AccountType {
                spreads: Some("from 1.2 pips".into()),
                ..Default::default()
            }]),
            ..bare()
        };
        assert!(!has_raw_spreads(&broker));
    }

    // ── Execution ────────────────────────────────────────────────

    #[test]
    fn instant_execution_from_measured_speed() {
        let broker = Broker {
            trading_environment: Some(TradingEnvironment {
                requotes: Some(false),
                execution_speed_ms: Some(40.0),
                ..Default::default()
            }),
            ..bare()
        };
        assert!(has_instant_execution(&broker));
    }

    #[test]
    fn slow_execution_is_not_instant() {
        let broker = Broker {
            trading_environment: Some(TradingEnvironment {
                requotes: Some(false),
                execution_speed_ms: Some(200.0),
                ..Default::default()
            }),
            ..bare()
        };
        assert!(!has_instant_execution(&broker));
    }

    #[test]
    fn instant_execution_from_type_label() {
        let broker = Broker {
            technology: Some(Technology {
                execution_type: Some("Instant Execution".into()),
                ..Default::default()
            }),
            ..bare()
        };
        assert!(has_instant_execution(&broker));
    }

    #[test]
    fn requotes_without_speed_falls_back_to_label() {
        let broker = Broker {
            trading_environment: Some(TradingEnvironment {
                requotes: Some(false),
                ..Default::default()
            }),
            ..bare()
        };
        assert!(!has_instant_execution(&broker));
    }

    // ── Leverage ─────────────────────────────────────────────────

    fn with_leverage(raw: &str) -> Broker {
        Broker {
            trading_conditions: Some(TradingConditions {
                max_leverage: Some(raw.into()),
                ..Default::default()
            }),
            ..bare()
        }
    }

    #[test]
    fn leverage_500_is_high() {
        assert!(is_high_leverage(&with_leverage("1:500")));
    }

    #[test]
    fn leverage_499_is_not_high() {
        assert!(!is_high_leverage(&with_leverage("1:499")));
    }

    #[test]
    fn unlimited_leverage_is_high() {
        assert!(is_high_leverage(&with_leverage("Unlimited Leverage")));
    }

    #[test]
    fn garbage_leverage_is_not_high() {
        assert!(!is_high_leverage(&with_leverage("garbage")));
        assert!(!is_high_leverage(&with_leverage("1:")));
        assert!(!is_high_leverage(&with_leverage(":")));
    }

    #[test]
    fn leverage_takes_first_ratio_with_digits() {
        assert!(is_high_leverage(&with_leverage("up to 1:1000 (pro)")));
        assert!(!is_high_leverage(&with_leverage("note: up to 1:30")));
    }

    #[test]
    fn absent_leverage_is_not_high() {
        assert!(!is_high_leverage(&bare()));
    }

    #[test]
    fn oversized_leverage_number_fails_closed() {
        // u32 overflow parses to None rather than panicking.
        assert!(!is_high_leverage(&with_leverage("1:99999999999999999999")));
    }

    // ── Offshore ─────────────────────────────────────────────────

    #[test]
    fn offshore_headquarters_matches() {
        let broker = Broker {
            headquarters: Some("Road Town, British Virgin Islands (BVI)".into()),
            ..bare()
        };
        assert!(is_offshore(&broker));
    }

    #[test]
    fn onshore_headquarters_with_fca_is_not_offshore() {
        let broker = Broker {
            headquarters: Some("London, United Kingdom".into()),
            regulation: Some(Regulation {
                regulators: Some(vec!["FCA".into()]),
            }),
            ..bare()
        };
        assert!(!is_offshore(&broker));
    }

    #[test]
    fn offshore_regulator_matches() {
        let broker = Broker {
            headquarters: Some("Limassol, Cyprus".into()),
            regulation: Some(Regulation {
                regulators: Some(vec!["CySEC".into(), "FSC Mauritius".into()]),
            }),
            ..bare()
        };
        assert!(is_offshore(&broker));
    }

    #[test]
    fn st_vincent_variants_match() {
        let dotted = Broker {
            headquarters: Some("Kingstown, St. Vincent and the Grenadines".into()),
            ..bare()
        };
        assert!(is_offshore(&dotted));
    }

    // ── Accounts, orders, instruments ────────────────────────────

    #[test]
    fn micro_account_threshold_is_inclusive() {
        let at = |deposit: f64| Broker {
            account_types: Some(vec![AccountType {
                min_deposit: Some(deposit),
                ..Default::default()
            }]),
            ..bare()
        };
        assert!(has_micro_accounts(&at(50.0)));
        assert!(has_micro_accounts(&at(5.0)));
        assert!(!has_micro_accounts(&at(51.0)));
        assert!(!has_micro_accounts(&bare()));
    }

    #[test]
    fn trailing_stops_from_order_types() {
        let broker = Broker {
            trading_environment: Some(TradingEnvironment {
                order_types: Some(vec!["Market".into(), "Trailing Stop".into()]),
                ..Default::default()
            }),
            ..bare()
        };
        assert!(offers_trailing_stops(&broker));
        assert!(!offers_trailing_stops(&bare()));
    }

    #[test]
    fn api_access_flag_or_automation_text() {
        let flagged = Broker {
            technology: Some(Technology {
                api_access: Some(true),
                ..Default::default()
            }),
            ..bare()
        };
        let listed = Broker {
            platform_features: Some(PlatformFeatures {
                automated_trading: Some(vec!["REST API".into()]),
                ..Default::default()
            }),
            ..bare()
        };
        assert!(has_api_access(&flagged));
        assert!(has_api_access(&listed));
        assert!(!has_api_access(&bare()));
    }

    #[test]
    fn instrument_counts_gate_on_positive_totals() {
        let broker = Broker {
            tradable_instruments: Some(TradableInstruments {
                cryptocurrencies: Some(InstrumentCount {
                    total: Some(25),
                    ..Default::default()
                }),
                stocks: Some(InstrumentCount {
                    total: Some(0),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..bare()
        };
        assert!(offers_crypto_instruments(&broker));
        assert!(!offers_stock_instruments(&broker));
    }

    #[test]
    fn policy_flags_fail_closed() {
        assert!(!allows_scalping(&bare()));
        assert!(!allows_hedging(&bare()));
        assert!(!has_pamm_support(&bare()));
        assert!(!has_corporate_accounts(&bare()));
        assert!(!has_low_swap_fees(&bare()));
        assert!(!has_no_requotes(&bare()));

        let explicit = Broker {
            trading_conditions_extended: Some(TradingConditionsExtended {
                scalping_allowed: Some(true),
                hedging_allowed: Some(false),
            }),
            ..bare()
        };
        assert!(allows_scalping(&explicit));
        assert!(!allows_hedging(&explicit));
    }

    #[test]
    fn gold_mention_in_summary() {
        let broker = Broker {
            summary: Some("Strong Gold and commodities offering".into()),
            ..bare()
        };
        assert!(mentions_gold(&broker));
        assert!(!mentions_gold(&bare()));
    }

    #[test]
    fn accessibility_section_alone_is_not_micro() {
        // Micro accounts key on account tiers, not the broker-wide floor.
        let broker = Broker {
            accessibility: Some(Accessibility {
                min_deposit: Some(10.0),
            }),
            ..bare()
        };
        assert!(!has_micro_accounts(&broker));
    }
}
