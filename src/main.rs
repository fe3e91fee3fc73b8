use captcha::TwoCaptcha;
use claimer::FaucetClaimer;
use config::Config;
use constants::CLAIM_HISTORY_FILE_PATH;
use history::ClaimHistory;
use logger::init_default_logger;
use proxy::ProxyRotation;
use tokio::signal;
use utils::{read_addresses, read_proxies};

mod captcha;
mod claimer;
mod config;
mod constants;
mod history;
mod logger;
mod proxy;
mod response;
#[cfg(test)]
mod test_support;
mod utils;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let _guard = init_default_logger();

    let config = Config::read_default().await;
    let addresses = read_addresses().await;
    let proxies = ProxyRotation::new(read_proxies().await);

    tracing::info!(
        "Loaded {} wallets and {} proxies",
        addresses.len(),
        proxies.len()
    );

    if proxies.is_empty() {
        tracing::warn!("No proxies configured, claiming over a direct connection");
    }

    let history = ClaimHistory::new(CLAIM_HISTORY_FILE_PATH);
    tracing::info!("Claim history kept in {}", history.path().display());

    let solver = TwoCaptcha::from_config(&config)?;
    let claimer = FaucetClaimer::new(config, history, solver);

    claimer
        .run_forever(&addresses, proxies, shutdown_signal())
        .await;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
