use std::{
    path::Path,
    str::FromStr,
    time::{SystemTime, UNIX_EPOCH},
};

use alloy::primitives::Address;
use tokio::io::AsyncBufReadExt;

use crate::constants::{ADDRESSES_FILE_PATH, PROXIES_FILE_PATH};

/// Non-blank lines of a text file, trimmed.
pub async fn read_file_lines(path: impl AsRef<Path>) -> eyre::Result<Vec<String>> {
    let file = tokio::fs::read(path).await?;
    let mut lines = file.lines();

    let mut contents = vec![];
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if !line.is_empty() {
            contents.push(line.to_string());
        }
    }

    Ok(contents)
}

pub async fn read_addresses_from(path: impl AsRef<Path>) -> Vec<String> {
    let path = path.as_ref();
    let lines = match read_file_lines(path).await {
        Ok(lines) => lines,
        Err(e) => {
            tracing::error!("Failed to read addresses from {}: {e}", path.display());
            return vec![];
        }
    };

    lines
        .into_iter()
        .filter(|line| match Address::from_str(line) {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!("Skipping invalid address {line}: {e}");
                false
            }
        })
        .collect()
}

pub async fn read_addresses() -> Vec<String> {
    read_addresses_from(ADDRESSES_FILE_PATH).await
}

pub async fn read_proxies() -> Vec<String> {
    read_file_lines(PROXIES_FILE_PATH)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!("No proxies loaded from {PROXIES_FILE_PATH}: {e}. Going direct");
            vec![]
        })
}

pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}
