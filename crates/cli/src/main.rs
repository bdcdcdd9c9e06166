use clap::{Parser, Subcommand};
use vault_monitor_core::{ConfigLoader, RowSource};
use vault_monitor_notify::SmtpNotifier;
use vault_monitor_scraper::ChromeRowSource;

#[derive(Parser)]
#[command(name = "vault-monitor")]
#[command(about = "Threshold monitor for Hyperliquid vault perpetual positions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape the vault and send the threshold alert or status email
    Run {
        /// Config file path
        #[arg(short, long, default_value = "config/Config.toml")]
        config: String,
    },
    /// Scrape the vault and print positions without sending email
    Scrape {
        /// Config file path
        #[arg(short, long, default_value = "config/Config.toml")]
        config: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config } => {
            run_monitor(&config).await?;
        }
        Commands::Scrape { config } => {
            run_scrape(&config).await?;
        }
    }

    Ok(())
}

async fn run_monitor(config_path: &str) -> anyhow::Result<()> {
    tracing::info!("Starting threshold monitor with config: {}", config_path);

    let config = ConfigLoader::load_from(config_path)?;

    let source = ChromeRowSource::from_config(&config.vault);
    let notifier = SmtpNotifier::new(config.email.clone());

    let outcome = vault_monitor_core::run_once(
        &source,
        &notifier,
        config.threshold.position_value_usd,
    )
    .await?;

    tracing::info!(
        "Run complete: {} position(s) scraped, {} above threshold",
        outcome.positions,
        outcome.breaching
    );

    Ok(())
}

async fn run_scrape(config_path: &str) -> anyhow::Result<()> {
    let config = ConfigLoader::load_from(config_path)?;

    let source = ChromeRowSource::from_config(&config.vault);
    let rows = source.fetch_rows().await?;
    let records = vault_monitor_core::parse_rows(&rows);

    println!("\n{}", "=".repeat(72));
    println!("Vault positions - {}", config.vault.url);
    println!("{}", "=".repeat(72));
    println!(
        "{:<10} {:>10} {:>16} {:>14} {:>18}",
        "Coin", "Leverage", "Size", "Mark", "Value"
    );
    println!("{}", "-".repeat(72));

    for record in &records {
        let flag = if record.value.abs() > config.threshold.position_value_usd {
            " ⚠"
        } else {
            ""
        };
        println!(
            "{:<10} {:>10} {:>16} {:>14} {:>18}{}",
            record.coin, record.leverage, record.size, record.mark, record.value, flag
        );
    }

    println!("{}", "=".repeat(72));
    println!(
        "\n{} position(s), threshold ${}",
        records.len(),
        config.threshold.position_value_usd
    );

    Ok(())
}
