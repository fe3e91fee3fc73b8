use std::future::Future;

use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Client, StatusCode,
};
use serde::Serialize;

use crate::{
    captcha::CaptchaSolver,
    config::Config,
    constants::{FAUCET_ORIGIN, FAUCET_TOKEN_SYMBOL, HCAPTCHA_PAGE_URL, HCAPTCHA_SITE_KEY},
    history::ClaimHistory,
    proxy::{to_reqwest_proxy, ProxyRotation},
    response::{interpret_response, ClaimOutcome},
};

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ClaimRequest<'a> {
    address: &'a str,
    hcaptcha_token: &'a str,
    token: &'a str,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepSummary {
    pub claimed: usize,
    pub rate_limited: usize,
    pub cooling_down: usize,
    pub failed: usize,
}

impl SweepSummary {
    fn add(&mut self, outcome: &ClaimOutcome) {
        match outcome {
            ClaimOutcome::Claimed => self.claimed += 1,
            ClaimOutcome::RateLimited { .. } => self.rate_limited += 1,
            ClaimOutcome::Cooldown => self.cooling_down += 1,
            ClaimOutcome::Failed(_) => self.failed += 1,
        }
    }
}

pub struct FaucetClaimer<S> {
    config: Config,
    history: ClaimHistory,
    solver: S,
}

impl<S: CaptchaSolver> FaucetClaimer<S> {
    pub fn new(config: Config, history: ClaimHistory, solver: S) -> Self {
        Self {
            config,
            history,
            solver,
        }
    }

    async fn send_claim(
        &self,
        address: &str,
        hcaptcha_token: &str,
        proxy: Option<&str>,
    ) -> eyre::Result<(StatusCode, String)> {
        let builder = Client::builder()
            .timeout(self.config.request_timeout())
            .default_headers(get_headers());

        let client = match proxy.and_then(to_reqwest_proxy) {
            Some(proxy) => builder.proxy(proxy),
            None => builder.no_proxy(),
        }
        .build()?;

        let body = ClaimRequest {
            address,
            hcaptcha_token,
            token: FAUCET_TOKEN_SYMBOL,
        };

        let response = client
            .post(&self.config.faucet_url)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        Ok((status, text))
    }

    /// Runs one claim attempt for `address` if its cooldown has passed and
    /// persists the resulting cooldown, if any.
    pub async fn claim_wallet(&self, address: &str, proxies: &mut ProxyRotation) -> ClaimOutcome {
        if !self.history.is_eligible(address).await {
            tracing::info!("{address} is still cooling down, skipping");
            return ClaimOutcome::Cooldown;
        }

        let proxy = proxies.next_proxy();
        tracing::info!(
            "Claiming for {address} via {}",
            proxy.as_deref().unwrap_or("direct connection")
        );

        let hcaptcha_token = match self
            .solver
            .solve_hcaptcha(HCAPTCHA_SITE_KEY, HCAPTCHA_PAGE_URL)
            .await
        {
            Ok(token) => token,
            Err(e) => {
                tracing::error!("Failed to solve hCaptcha for {address}: {e}");
                return ClaimOutcome::Failed(format!("captcha: {e}"));
            }
        };

        let outcome = match self
            .send_claim(address, &hcaptcha_token, proxy.as_deref())
            .await
        {
            Ok((status, body)) => {
                tracing::info!("Faucet answered {status} for {address}: {body}");
                interpret_response(status, &body)
            }
            Err(e) => {
                tracing::error!("Claim request failed for {address}: {e}");
                ClaimOutcome::Failed(format!("request: {e}"))
            }
        };

        match &outcome {
            ClaimOutcome::Claimed => tracing::info!("Claimed faucet for {address}"),
            ClaimOutcome::RateLimited { wait_secs } => {
                tracing::warn!("{address} must wait {} hours", wait_secs / 3600)
            }
            ClaimOutcome::Failed(reason) => {
                tracing::warn!("Claim failed for {address}, retrying next sweep: {reason}")
            }
            ClaimOutcome::Cooldown => {}
        }

        if let Some(cooldown) = outcome.cooldown_secs() {
            match self.history.record_claim(address, cooldown).await {
                Ok(next) => tracing::debug!("{address} eligible again at {next}"),
                Err(e) => tracing::error!("Failed to save claim history for {address}: {e}"),
            }
        }

        tokio::time::sleep(self.config.wallet_delay()).await;

        outcome
    }

    pub async fn sweep(&self, addresses: &[String], proxies: &mut ProxyRotation) -> SweepSummary {
        let mut summary = SweepSummary::default();

        for address in addresses {
            let outcome = self.claim_wallet(address, proxies).await;
            summary.add(&outcome);
        }

        tracing::info!(
            "Sweep done: {} claimed, {} rate limited, {} cooling down, {} failed",
            summary.claimed,
            summary.rate_limited,
            summary.cooling_down,
            summary.failed
        );

        summary
    }

    /// Sweeps, sleeps for the sweep interval, and repeats until `shutdown`
    /// resolves.
    pub async fn run_forever(
        &self,
        addresses: &[String],
        mut proxies: ProxyRotation,
        shutdown: impl Future<Output = ()>,
    ) {
        tokio::pin!(shutdown);

        loop {
            tracing::info!("Starting sweep over {} wallets", addresses.len());

            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = self.sweep(addresses, &mut proxies) => {}
            }

            tracing::info!(
                "Next sweep in {} seconds",
                self.config.sweep_interval().as_secs()
            );

            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = tokio::time::sleep(self.config.sweep_interval()) => {}
            }
        }

        tracing::info!("Claim loop stopped");
    }
}

fn get_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();

    headers.insert(
        HeaderName::from_static("accept"),
        HeaderValue::from_static("application/json, text/plain, */*"),
    );
    headers.insert(
        HeaderName::from_static("accept-language"),
        HeaderValue::from_static("en-GB,en-US;q=0.9,en;q=0.8,id;q=0.7"),
    );
    headers.insert(
        HeaderName::from_static("content-type"),
        HeaderValue::from_static("application/json"),
    );
    headers.insert(
        HeaderName::from_static("origin"),
        HeaderValue::from_static(FAUCET_ORIGIN),
    );
    headers.insert(
        HeaderName::from_static("referer"),
        HeaderValue::from_static("https://hub.0g.ai/"),
    );
    headers.insert(
        HeaderName::from_static("user-agent"),
        HeaderValue::from_static("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/134.0.0.0 Safari/537.36"),
    );

    headers
}
