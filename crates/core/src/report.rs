//! Email report formatting for the threshold monitor.

use crate::position::PositionRecord;

pub const ALERT_SUBJECT: &str = "⚠️ Hyperliquid Threshold Alert";
pub const STATUS_SUBJECT: &str = "Hyperliquid Threshold Status";

const ALERT_HEADER: &str = "🚨 PERP Position Exceeds $50,000 🚨";
const STATUS_BODY: &str = "No positions exceed $50,000.";

/// Subject and plain-text body of the single email sent per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub subject: String,
    pub body: String,
}

impl Report {
    #[must_use]
    pub fn is_alert(&self) -> bool {
        self.subject == ALERT_SUBJECT
    }
}

/// Builds the run's report from the breaching set.
///
/// An empty set yields the fixed status report. Otherwise the body is the
/// alert header followed by one line per breaching position:
/// `<coin> | Value: $<value> | Size: <size> | Mark: <mark>`, with the value
/// thousands-grouped.
#[must_use]
pub fn build_report(exceeding: &[&PositionRecord]) -> Report {
    if exceeding.is_empty() {
        return Report {
            subject: STATUS_SUBJECT.to_string(),
            body: STATUS_BODY.to_string(),
        };
    }

    let mut lines = vec![ALERT_HEADER.to_string(), String::new()];
    for position in exceeding {
        lines.push(format!(
            "{} | Value: ${} | Size: {} | Mark: {}",
            position.coin,
            group_thousands(&position.value.to_string()),
            position.size,
            position.mark,
        ));
    }

    Report {
        subject: ALERT_SUBJECT.to_string(),
        body: lines.join("\n"),
    }
}

/// Inserts thousands separators into the integer part of a decimal string.
/// Sign and fractional digits pass through untouched.
fn group_thousands(text: &str) -> String {
    let (sign, rest) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (rest, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, digit) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}
