pub const FAUCET_URL: &str = "https://992dkn4ph6.execute-api.us-west-1.amazonaws.com/";
pub const FAUCET_ORIGIN: &str = "https://hub.0g.ai";
pub const FAUCET_TOKEN_SYMBOL: &str = "A0GI";

// HCAPTCHA
pub const HCAPTCHA_SITE_KEY: &str = "1230eb62-f50c-4da4-a736-da5c3c342e8e";
pub const HCAPTCHA_PAGE_URL: &str = "https://hub.0g.ai/faucet";
pub const TWOCAPTCHA_BASE_URL: &str = "https://2captcha.com";

// FILES
pub const ADDRESSES_FILE_PATH: &str = "data/listaddress.txt";
pub const PROXIES_FILE_PATH: &str = "data/proxies.txt";
pub const CLAIM_HISTORY_FILE_PATH: &str = "data/claim_history.json";

pub const SECS_PER_HOUR: i64 = 3600;
// 24h faucet window plus one hour of slack
pub const CLAIM_COOLDOWN_SECS: i64 = 25 * SECS_PER_HOUR;
