use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    pub vault: VaultConfig,
    pub threshold: ThresholdConfig,
    pub email: EmailConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Dashboard URL rendering the vault's position table.
    pub url: String,
    /// Fixed grace period after navigation for late client-side rendering.
    pub render_wait_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Absolute notional value above which a position triggers the alert.
    pub position_value_usd: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub sender: String,
    pub recipient: String,
    /// App-level SMTP credential. Never checked in; sourced from the
    /// environment (`VAULT_EMAIL__PASSWORD`).
    #[serde(default)]
    pub password: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            vault: VaultConfig {
                url: "https://app.hyperliquid.xyz/vaults/0xdfc24b077bc1425ad1dea75bcb6f8158e10df303"
                    .to_string(),
                render_wait_ms: 3000,
            },
            threshold: ThresholdConfig {
                position_value_usd: Decimal::from(50_000),
            },
            email: EmailConfig {
                smtp_host: "smtp.gmail.com".to_string(),
                smtp_port: 465,
                sender: String::new(),
                recipient: String::new(),
                password: String::new(),
            },
        }
    }
}
