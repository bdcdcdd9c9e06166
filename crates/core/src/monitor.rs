//! The run-once pipeline: fetch rows, parse, evaluate, notify.

use crate::position::{breaching, parse_rows};
use crate::report::build_report;
use crate::traits::{Notifier, RowSource};
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use tracing::{info, warn};

/// Summary of a completed run, for logging only. Nothing persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    /// Positions retained after row parsing.
    pub positions: usize,
    /// Positions above the threshold.
    pub breaching: usize,
}

/// Executes one full monitoring pass and sends exactly one email.
///
/// A linear fetch → parse → compare → notify sequence with two terminal
/// outcomes: an alert email listing the breaching positions, or a fixed
/// status email when none breach. Zero scraped rows is a valid result and
/// takes the status path. Scrape and delivery errors both abort the run;
/// neither is retried.
pub async fn run_once(
    source: &dyn RowSource,
    notifier: &dyn Notifier,
    threshold: Decimal,
) -> Result<RunOutcome> {
    let rows = source
        .fetch_rows()
        .await
        .context("Failed to scrape position table")?;

    if rows.is_empty() {
        warn!("No rows found in PERP table");
    }

    let records = parse_rows(&rows);
    info!(
        "Extracted {} position(s) from {} row(s)",
        records.len(),
        rows.len()
    );

    let exceeding = breaching(&records, threshold);
    let outcome = RunOutcome {
        positions: records.len(),
        breaching: exceeding.len(),
    };

    let report = build_report(&exceeding);
    notifier
        .send(&report)
        .await
        .context("Failed to deliver notification email")?;

    if outcome.breaching > 0 {
        info!(
            "Alert sent: {} position(s) above {}",
            outcome.breaching, threshold
        );
    } else {
        info!("No positions above {}. Status email sent", threshold);
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::TableRow;
    use crate::report::Report;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    struct StubSource {
        rows: Vec<TableRow>,
        fail: bool,
    }

    #[async_trait]
    impl RowSource for StubSource {
        async fn fetch_rows(&self) -> Result<Vec<TableRow>> {
            if self.fail {
                return Err(anyhow!("navigation timed out"));
            }
            Ok(self.rows.clone())
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<Report>>,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send(&self, report: &Report) -> Result<()> {
            self.sent.lock().unwrap().push(report.clone());
            Ok(())
        }
    }

    struct FailingNotifier;

    #[async_trait]
    impl Notifier for FailingNotifier {
        async fn send(&self, _report: &Report) -> Result<()> {
            Err(anyhow!("535 authentication failed"))
        }
    }

    fn row(cells: &[&str]) -> TableRow {
        TableRow::new(cells.iter().map(ToString::to_string).collect())
    }

    #[tokio::test]
    async fn breaching_position_sends_alert() {
        let source = StubSource {
            rows: vec![
                row(&["BTC", "10x", "1", "40000"]),
                row(&["ETH", "5x", "100", "600"]),
            ],
            fail: false,
        };
        let notifier = RecordingNotifier::default();

        let outcome = run_once(&source, &notifier, dec!(50000)).await.unwrap();

        assert_eq!(outcome, RunOutcome { positions: 2, breaching: 1 });

        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].is_alert());
        assert!(sent[0].body.contains("ETH | Value: $60,000 | Size: 100 | Mark: 600"));
        assert!(!sent[0].body.contains("BTC"));
    }

    #[tokio::test]
    async fn zero_rows_sends_status_email() {
        let source = StubSource { rows: vec![], fail: false };
        let notifier = RecordingNotifier::default();

        let outcome = run_once(&source, &notifier, dec!(50000)).await.unwrap();

        assert_eq!(outcome, RunOutcome { positions: 0, breaching: 0 });

        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(!sent[0].is_alert());
        assert_eq!(sent[0].body, "No positions exceed $50,000.");
    }

    #[tokio::test]
    async fn malformed_rows_still_take_status_path() {
        let source = StubSource {
            rows: vec![
                row(&["BTC", "10x", "2"]),          // too few cells
                row(&["ETH", "5x", "0", "600"]),    // zero size
                row(&["SOL", "2x", "N/A", "150"]),  // unparseable size
            ],
            fail: false,
        };
        let notifier = RecordingNotifier::default();

        let outcome = run_once(&source, &notifier, dec!(50000)).await.unwrap();

        assert_eq!(outcome.positions, 0);
        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(!sent[0].is_alert());
    }

    #[tokio::test]
    async fn exactly_one_email_for_many_breaches() {
        let source = StubSource {
            rows: vec![
                row(&["BTC", "10x", "2", "30000"]),
                row(&["ETH", "5x", "100", "600"]),
                row(&["SOL", "2x", "1000", "150"]),
            ],
            fail: false,
        };
        let notifier = RecordingNotifier::default();

        let outcome = run_once(&source, &notifier, dec!(50000)).await.unwrap();

        assert_eq!(outcome.breaching, 3);
        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].body.matches("| Value:").count(), 3);
    }

    #[tokio::test]
    async fn scrape_failure_sends_nothing() {
        let source = StubSource { rows: vec![], fail: true };
        let notifier = RecordingNotifier::default();

        let result = run_once(&source, &notifier, dec!(50000)).await;

        assert!(result.is_err());
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn delivery_failure_propagates() {
        let source = StubSource {
            rows: vec![row(&["ETH", "5x", "100", "600"])],
            fail: false,
        };

        let result = run_once(&source, &FailingNotifier, dec!(50000)).await;

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("notification"));
    }
}
