pub mod chrome;

pub use chrome::{ChromeRowSource, ScrapeError};
