//! Normalization of loosely formatted dashboard text into exact decimals.
//!
//! Dashboard cells carry currency symbols, thousands separators, and unit
//! suffixes (`"$1,234.56"`, `"1234.56 USD"`). Money math downstream is done
//! in `rust_decimal`, so the conversion here must be exact.

use regex::Regex;
use rust_decimal::Decimal;
use std::sync::OnceLock;

/// First signed or unsigned decimal-looking token in a string.
fn numeric_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"-?\d+(?:\.\d+)?").expect("valid numeric pattern"))
}

/// Extracts the first numeric token from `text` as an exact `Decimal`.
///
/// Strips `,`, `$`, the literal `USD`, and surrounding whitespace before
/// matching. A total function: absence of a parseable token yields
/// `Decimal::ZERO`, never an error. Callers treat zero as "no position",
/// which deliberately conflates unparseable text with a true zero.
#[must_use]
pub fn extract_decimal(text: &str) -> Decimal {
    let cleaned = text.replace(',', "").replace('$', "").replace("USD", "");
    let cleaned = cleaned.trim();

    match numeric_pattern().find(cleaned) {
        Some(token) => token.as_str().parse().unwrap_or(Decimal::ZERO),
        None => Decimal::ZERO,
    }
}
