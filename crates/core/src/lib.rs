pub mod config;
pub mod config_loader;
pub mod monitor;
pub mod numeric;
pub mod position;
pub mod report;
pub mod traits;

pub use config::{EmailConfig, MonitorConfig, ThresholdConfig, VaultConfig};
pub use config_loader::ConfigLoader;
pub use monitor::{run_once, RunOutcome};
pub use numeric::extract_decimal;
pub use position::{breaching, parse_rows, PositionRecord, TableRow};
pub use report::{build_report, Report};
pub use traits::{Notifier, RowSource};
