//! Headless-Chrome row source for the vault dashboard.
//!
//! The dashboard renders its position table client-side, so a plain HTTP
//! fetch sees an empty shell. This module drives a headless browser session:
//! navigate, wait for the page to settle, give client-side rendering a fixed
//! grace period, then read the table rows out of the DOM.

use anyhow::{Context, Result};
use async_trait::async_trait;
use headless_chrome::{Browser, LaunchOptions};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};
use vault_monitor_core::{RowSource, TableRow, VaultConfig};

/// Browser-layer failures, all fatal for the run.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("failed to launch headless browser: {0}")]
    Launch(String),
    #[error("failed to load vault page {url}: {reason}")]
    Navigation { url: String, reason: String },
    #[error("scrape task aborted before completion")]
    Aborted,
}

/// Fetches position table rows by rendering the vault page in headless
/// Chrome. One browser session per fetch; the session is released when the
/// scrape returns, on every path.
pub struct ChromeRowSource {
    url: String,
    render_wait: Duration,
}

impl ChromeRowSource {
    #[must_use]
    pub fn new(url: String, render_wait: Duration) -> Self {
        Self { url, render_wait }
    }

    #[must_use]
    pub fn from_config(config: &VaultConfig) -> Self {
        Self::new(
            config.url.clone(),
            Duration::from_millis(config.render_wait_ms),
        )
    }
}

#[async_trait]
impl RowSource for ChromeRowSource {
    async fn fetch_rows(&self) -> Result<Vec<TableRow>> {
        let url = self.url.clone();
        let render_wait = self.render_wait;

        // headless_chrome is a blocking API; keep it off the async runtime.
        let rows = tokio::task::spawn_blocking(move || scrape_table(&url, render_wait))
            .await
            .map_err(|_| ScrapeError::Aborted)??;

        Ok(rows)
    }
}

fn scrape_table(url: &str, render_wait: Duration) -> Result<Vec<TableRow>> {
    let options = LaunchOptions::default_builder()
        .headless(true)
        .build()
        .map_err(|e| ScrapeError::Launch(e.to_string()))?;
    let browser = Browser::new(options).map_err(|e| ScrapeError::Launch(e.to_string()))?;
    let tab = browser
        .new_tab()
        .map_err(|e| ScrapeError::Launch(e.to_string()))?;

    info!("Loading vault page {}", url);
    tab.navigate_to(url)
        .and_then(|tab| tab.wait_until_navigated())
        .map_err(|e| ScrapeError::Navigation {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    // The table is populated after navigation settles; a fixed grace
    // period, not a guarantee.
    std::thread::sleep(render_wait);

    let rows = match tab.find_elements("table tbody tr") {
        Ok(rows) => rows,
        // Selector matching nothing is a position-less vault, not an error.
        Err(_) => {
            warn!("No rows found in PERP table");
            return Ok(Vec::new());
        }
    };

    let mut table = Vec::with_capacity(rows.len());
    for row in &rows {
        let cells = match row.find_elements("td") {
            Ok(cells) => cells,
            Err(_) => continue,
        };
        let mut texts = Vec::with_capacity(cells.len());
        for cell in &cells {
            texts.push(
                cell.get_inner_text()
                    .context("Failed to read table cell text")?,
            );
        }
        table.push(TableRow::new(texts));
    }

    info!("Found {} row(s) in position table", table.len());

    // The browser session drops on every return path, closing Chrome.
    Ok(table)
}
