use serde::Deserialize;
use std::{path::Path, time::Duration};

use crate::constants::FAUCET_URL;

const CONFIG_FILE_PATH: &str = "data/config.toml";
const CAPTCHA_API_KEY_ENV: &str = "TWOCAPTCHA_API_KEY";

#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct Config {
    pub captcha_api_key: String,
    pub faucet_url: String,
    pub request_timeout_secs: u64,
    pub wallet_delay_secs: u64,
    pub sweep_interval_secs: u64,
    pub captcha_poll_interval_secs: u64,
    pub captcha_max_polls: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            captcha_api_key: String::new(),
            faucet_url: FAUCET_URL.to_string(),
            request_timeout_secs: 30,
            wallet_delay_secs: 10,
            sweep_interval_secs: 3 * 60 * 60,
            captcha_poll_interval_secs: 5,
            captcha_max_polls: 60,
        }
    }
}

impl Config {
    async fn read_from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let cfg_str = tokio::fs::read_to_string(path).await?;
        Ok(toml::from_str(&cfg_str)?)
    }

    /// Reads `data/config.toml`, falling back to defaults when it is missing
    /// or malformed. `TWOCAPTCHA_API_KEY` overrides the key from the file.
    pub async fn read_default() -> Self {
        let mut config = Self::read_from_file(CONFIG_FILE_PATH)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to read {CONFIG_FILE_PATH}: {e}. Using defaults");
                Self::default()
            });

        if let Ok(key) = std::env::var(CAPTCHA_API_KEY_ENV) {
            if !key.trim().is_empty() {
                config.captcha_api_key = key.trim().to_string();
            }
        }

        if config.captcha_api_key.is_empty() {
            tracing::warn!("No 2Captcha API key configured, every captcha solve will fail");
        }

        config
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn wallet_delay(&self) -> Duration {
        Duration::from_secs(self.wallet_delay_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    pub fn captcha_poll_interval(&self) -> Duration {
        Duration::from_secs(self.captcha_poll_interval_secs)
    }
}
