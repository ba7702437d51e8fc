//! Listing metrics — shared defensive numeric coercions.
//!
//! Country/listing pages sort and aggregate over the same sparse broker
//! records the feature rules classify. These helpers centralize the
//! parse-defensively-default-safely policy (0, infinity, or empty) so
//! pages don't each grow their own coercion.

use crate::domain::Broker;

/// Leverage value assigned to "unlimited" leverage strings.
pub const UNLIMITED_LEVERAGE: u32 = 10_000;

/// First decimal number embedded in a string, if any.
///
/// `"0.9 pips"` -> 0.9, `"from $100"` -> 100.0, `"n/a"` -> None.
pub fn parse_numeric(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let start = bytes.iter().position(|b| b.is_ascii_digit())?;
    let mut end = start;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => end += 1,
            b'.' if !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }
    text[start..end].parse().ok()
}

/// Numeric leverage from the free-form `maxLeverage` string.
///
/// "Unlimited" maps to [`UNLIMITED_LEVERAGE`]; `1:N` (also `1-N`, `1/N`,
/// with optional spaces) yields N; otherwise any embedded digits are
/// taken as-is; anything else is 0.
pub fn leverage_value(broker: &Broker) -> u32 {
    let Some(raw) = broker
        .trading_conditions
        .as_ref()
        .and_then(|c| c.max_leverage.as_deref())
    else {
        return 0;
    };
    let lowered = raw.to_lowercase();
    if lowered.contains("unlimited") {
        return UNLIMITED_LEVERAGE;
    }
    if let Some(value) = ratio_denominator(&lowered) {
        return value;
    }
    let digits: String = lowered.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// Denominator of the first `1:N`-style ratio (at most five digits).
fn ratio_denominator(text: &str) -> Option<u32> {
    let bytes = text.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b != b'1' {
            continue;
        }
        let mut j = i + 1;
        while j < bytes.len() && bytes[j] == b' ' {
            j += 1;
        }
        if j >= bytes.len() || !matches!(bytes[j], b':' | b'-' | b'/') {
            continue;
        }
        j += 1;
        while j < bytes.len() && bytes[j] == b' ' {
            j += 1;
        }
        let start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() && j - start < 5 {
            j += 1;
        }
        if j > start {
            return text[start..j].parse().ok();
        }
    }
    None
}

/// Minimum deposit across the broker-wide floor and every account tier.
///
/// Infinity when nothing is populated, so unknown-deposit brokers sort
/// after every known one.
pub fn min_deposit(broker: &Broker) -> f64 {
    let mut lowest = f64::INFINITY;
    if let Some(value) = broker.accessibility.as_ref().and_then(|a| a.min_deposit) {
        if value.is_finite() {
            lowest = lowest.min(value);
        }
    }
    if let Some(accounts) = &broker.account_types {
        for account in accounts {
            if let Some(value) = account.min_deposit {
                if value.is_finite() {
                    lowest = lowest.min(value);
                }
            }
        }
    }
    lowest
}

/// Legacy EUR/USD spread, defaulting to 0.0 when absent.
pub fn eurusd_spread(broker: &Broker) -> f64 {
    broker
        .trading_conditions
        .as_ref()
        .and_then(|c| c.spreads.as_ref())
        .and_then(|s| s.eurusd)
        .unwrap_or(0.0)
}

/// Overall review score, defaulting to 0.0 when absent.
pub fn overall_score(broker: &Broker) -> f64 {
    broker.score.unwrap_or(0.0)
}
