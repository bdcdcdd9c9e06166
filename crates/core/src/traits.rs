use crate::position::TableRow;
use crate::report::Report;
use anyhow::Result;
use async_trait::async_trait;

/// Source of raw position table rows.
///
/// The browser-driven scraper lives behind this seam so parsing and
/// threshold evaluation can be exercised without a real browser.
#[async_trait]
pub trait RowSource: Send + Sync {
    async fn fetch_rows(&self) -> Result<Vec<TableRow>>;
}

/// Delivery channel for the run's single report.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, report: &Report) -> Result<()>;
}
