//! Per-wallet cooldown bookkeeping persisted as a flat JSON object of
//! `address -> next eligible unix timestamp`.
//!
//! Every write reloads the file first and only touches the wallet being
//! recorded, so entries written by another process in the meantime survive.
//! There is no locking and no atomic rename: two processes writing at the
//! same moment can still lose an update, and a crash mid-write can truncate
//! the file (which then loads as empty).

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use serde_json::Value;

use crate::utils::unix_now;

pub type History = BTreeMap<String, i64>;

#[derive(Clone, Debug)]
pub struct ClaimHistory {
    path: PathBuf,
}

impl ClaimHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing or unreadable files load as an empty history.
    pub async fn load(&self) -> History {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => parse_history(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => History::new(),
            Err(e) => {
                tracing::warn!("Failed to read {}: {e}", self.path.display());
                History::new()
            }
        }
    }

    pub async fn next_eligible_at(&self, wallet: &str) -> i64 {
        self.load().await.get(wallet).copied().unwrap_or(0)
    }

    pub async fn is_eligible_at(&self, wallet: &str, now: i64) -> bool {
        now >= self.next_eligible_at(wallet).await
    }

    pub async fn is_eligible(&self, wallet: &str) -> bool {
        self.is_eligible_at(wallet, unix_now()).await
    }

    /// Sets `wallet` to become eligible at `now + cooldown_secs` and returns
    /// that timestamp.
    pub async fn record_claim_at(
        &self,
        wallet: &str,
        cooldown_secs: i64,
        now: i64,
    ) -> eyre::Result<i64> {
        let mut history = self.load().await;
        let next_eligible = now + cooldown_secs;
        history.insert(wallet.to_string(), next_eligible);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, serde_json::to_string_pretty(&history)?).await?;

        Ok(next_eligible)
    }

    pub async fn record_claim(&self, wallet: &str, cooldown_secs: i64) -> eyre::Result<i64> {
        self.record_claim_at(wallet, cooldown_secs, unix_now()).await
    }
}

fn parse_history(contents: &str) -> History {
    let value: Value = match serde_json::from_str(contents) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Claim history is not valid JSON ({e}), starting fresh");
            return History::new();
        }
    };

    let Value::Object(entries) = value else {
        tracing::warn!("Claim history is not a JSON object, starting fresh");
        return History::new();
    };

    entries
        .into_iter()
        .filter_map(|(wallet, at)| {
            let timestamp = at.as_i64().or_else(|| at.as_f64().map(|f| f as i64));
            if timestamp.is_none() {
                tracing::warn!("Dropping non-numeric claim history entry for {wallet}: {at}");
            }
            timestamp.map(|t| (wallet, t))
        })
        .collect()
}
