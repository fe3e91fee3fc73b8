use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::StatusCode;

use crate::constants::{CLAIM_COOLDOWN_SECS, SECS_PER_HOUR};

static WAIT_HOURS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Please wait (\d+) hours?").expect("wait regex to be valid"));

/// Result of processing one wallet in a sweep.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// Still cooling down, nothing was sent.
    Cooldown,
    Claimed,
    RateLimited { wait_secs: i64 },
    Failed(String),
}

impl ClaimOutcome {
    /// Cooldown to persist for this outcome, if any.
    pub fn cooldown_secs(&self) -> Option<i64> {
        match self {
            ClaimOutcome::Claimed => Some(CLAIM_COOLDOWN_SECS),
            ClaimOutcome::RateLimited { wait_secs } => Some(*wait_secs),
            ClaimOutcome::Cooldown | ClaimOutcome::Failed(_) => None,
        }
    }
}

/// Seconds to wait parsed from a "Please wait N hour(s)" message, with one
/// extra hour on top.
pub fn extract_wait_time(body: &str) -> Option<i64> {
    let hours: i64 = WAIT_HOURS_REGEX.captures(body)?.get(1)?.as_str().parse().ok()?;
    hours
        .checked_add(1)
        .and_then(|h| h.checked_mul(SECS_PER_HOUR))
}

pub fn interpret_response(status: StatusCode, body: &str) -> ClaimOutcome {
    match status {
        StatusCode::OK => ClaimOutcome::Claimed,
        StatusCode::BAD_REQUEST => match extract_wait_time(body) {
            Some(wait_secs) => ClaimOutcome::RateLimited { wait_secs },
            None => ClaimOutcome::Failed(format!("rejected without wait time: {body}")),
        },
        other => ClaimOutcome::Failed(format!("unexpected status {other}: {body}")),
    }
}
