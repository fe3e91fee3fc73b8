use std::{future::Future, time::Duration};

use reqwest::Client;
use serde::Deserialize;

use crate::{config::Config, constants::TWOCAPTCHA_BASE_URL};

const NOT_READY: &str = "CAPCHA_NOT_READY";

pub trait CaptchaSolver {
    /// Returns the `h-captcha-response` token for the given site.
    fn solve_hcaptcha(
        &self,
        site_key: &str,
        page_url: &str,
    ) -> impl Future<Output = eyre::Result<String>> + Send;
}

#[derive(Deserialize, Debug)]
struct TwoCaptchaResponse {
    status: u8,
    request: String,
}

/// 2Captcha legacy `in.php` / `res.php` API.
#[derive(Clone, Debug)]
pub struct TwoCaptcha {
    client: Client,
    api_key: String,
    base_url: String,
    poll_interval: Duration,
    max_polls: u32,
}

impl TwoCaptcha {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> eyre::Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .no_proxy()
                .build()?,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            poll_interval: Duration::from_secs(5),
            max_polls: 60,
        })
    }

    pub fn from_config(config: &Config) -> eyre::Result<Self> {
        Ok(Self::new(config.captcha_api_key.clone(), TWOCAPTCHA_BASE_URL)?
            .with_polling(config.captcha_poll_interval(), config.captcha_max_polls))
    }

    pub fn with_polling(mut self, poll_interval: Duration, max_polls: u32) -> Self {
        self.poll_interval = poll_interval;
        self.max_polls = max_polls;
        self
    }

    async fn submit(&self, site_key: &str, page_url: &str) -> eyre::Result<String> {
        let form = [
            ("key", self.api_key.as_str()),
            ("method", "hcaptcha"),
            ("sitekey", site_key),
            ("pageurl", page_url),
            ("json", "1"),
        ];

        let response: TwoCaptchaResponse = self
            .client
            .post(format!("{}/in.php", self.base_url))
            .form(&form)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if response.status != 1 {
            eyre::bail!("2Captcha rejected the task: {}", response.request);
        }

        Ok(response.request)
    }

    async fn poll(&self, task_id: &str) -> eyre::Result<Option<String>> {
        let query = [
            ("key", self.api_key.as_str()),
            ("action", "get"),
            ("id", task_id),
            ("json", "1"),
        ];

        let response: TwoCaptchaResponse = self
            .client
            .get(format!("{}/res.php", self.base_url))
            .query(&query)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if response.status == 1 {
            return Ok(Some(response.request));
        }

        if response.request == NOT_READY {
            return Ok(None);
        }

        eyre::bail!("2Captcha failed to solve task {task_id}: {}", response.request)
    }
}

impl CaptchaSolver for TwoCaptcha {
    async fn solve_hcaptcha(&self, site_key: &str, page_url: &str) -> eyre::Result<String> {
        let task_id = self.submit(site_key, page_url).await?;
        tracing::debug!("Submitted hCaptcha task {task_id}");

        for _ in 0..self.max_polls {
            tokio::time::sleep(self.poll_interval).await;

            if let Some(token) = self.poll(&task_id).await? {
                return Ok(token);
            }
        }

        eyre::bail!("hCaptcha task {task_id} not solved after {} polls", self.max_polls)
    }
}
