//! Country availability — curated broker tiers per region.
//!
//! Country listing pages show only brokers that plausibly accept clients
//! from that country. The mapping is editorial, not derived: a global
//! tier-1 list plus regional tiers, with a broker's own
//! `restricted_countries` list always winning.

use fxscreen_core::features::normalize::normalize_key;
use fxscreen_core::Broker;

/// Brokers with widespread availability; the fallback for any country
/// without a curated regional tier.
const GLOBAL_TIER_1: &[&str] = &[
    "pepperstone",
    "ic-markets",
    "xtb",
    "forex-com",
    "ig",
    "saxo-bank",
    "avatrade",
    "oanda",
    "fxpro",
    "axi",
    "fp-markets",
    "cmc-markets",
];

/// EU-focused brokers (ESMA-compliant).
const EU_BROKERS: &[&str] = &[
    "xtb",
    "admirals",
    "saxo-bank",
    "swissquote",
    "dukascopy",
    "activtrades",
    "markets-com",
    "trading212",
    "capital-com",
    "freedom24",
];

/// UK-focused brokers (FCA-regulated).
const UK_BROKERS: &[&str] = &[
    "ig",
    "cmc-markets",
    "city-index",
    "lcg",
    "spreadex",
    "trade-nation",
    "forex-com",
    "pepperstone",
    "oanda",
    "activtrades",
];

/// Asia-Pacific brokers.
const APAC_BROKERS: &[&str] = &[
    "pepperstone",
    "ic-markets",
    "axi",
    "fp-markets",
    "thinkmarkets",
    "fxpro",
    "xm",
    "exness",
    "hf-markets",
    "octafx",
    "go-markets",
    "vt-markets",
    "tmgm",
    "eightcap",
];

/// Middle East and islamic-account-focused brokers (swap-free offerings).
const ISLAMIC_BROKERS: &[&str] = &[
    "xm",
    "exness",
    "hf-markets",
    "avatrade",
    "fxpro",
    "octafx",
    "fbs",
    "instaforex",
];

const EU_COUNTRIES: &[&str] = &[
    "germany",
    "france",
    "spain",
    "italy",
    "netherlands",
    "belgium",
    "austria",
    "ireland",
    "portugal",
    "poland",
    "sweden",
    "denmark",
    "finland",
    "greece",
    "czech-republic",
    "romania",
    "hungary",
];

const UK_COUNTRIES: &[&str] = &["united-kingdom", "uk", "great-britain"];

const APAC_COUNTRIES: &[&str] = &[
    "australia",
    "new-zealand",
    "singapore",
    "malaysia",
    "thailand",
    "indonesia",
    "philippines",
    "vietnam",
    "hong-kong",
    "japan",
];

const ISLAMIC_COUNTRIES: &[&str] = &[
    "united-arab-emirates",
    "uae",
    "saudi-arabia",
    "qatar",
    "kuwait",
    "bahrain",
    "oman",
    "jordan",
    "egypt",
    "pakistan",
];

/// Curated broker ids for a country (order preserved, deduplicated).
///
/// Countries with a regional tier get that tier plus global tier-1;
/// everything else falls back to global tier-1 alone.
pub fn brokers_for_country(country: &str) -> Vec<&'static str> {
    let slug = normalize_key(country);
    let regional: &[&str] = if UK_COUNTRIES.contains(&slug.as_str()) {
        UK_BROKERS
    } else if EU_COUNTRIES.contains(&slug.as_str()) {
        EU_BROKERS
    } else if APAC_COUNTRIES.contains(&slug.as_str()) {
        APAC_BROKERS
    } else if ISLAMIC_COUNTRIES.contains(&slug.as_str()) {
        ISLAMIC_BROKERS
    } else {
        &[]
    };

    let mut ids: Vec<&'static str> = Vec::with_capacity(regional.len() + GLOBAL_TIER_1.len());
    for &id in regional.iter().chain(GLOBAL_TIER_1) {
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}

/// Whether a broker serves clients from `country`.
///
/// The broker's own restricted-countries list always wins; otherwise the
/// curated mapping decides.
pub fn available_in(broker: &Broker, country: &str) -> bool {
    let slug = normalize_key(country);
    let restricted = broker
        .restricted_countries
        .as_deref()
        .is_some_and(|countries| countries.iter().any(|c| normalize_key(c) == slug));
    if restricted {
        return false;
    }
    brokers_for_country(country).iter().any(|&id| id == broker.id)
}

/// Exact regulator-code match, compared trimmed and lowercased.
pub fn has_regulator(broker: &Broker, code: &str) -> bool {
    let wanted = code.trim().to_lowercase();
    if wanted.is_empty() {
        return false;
    }
    broker.regulators().is_some_and(|regulators| {
        regulators
            .iter()
            .any(|reg| reg.trim().to_lowercase() == wanted)
    })
}
