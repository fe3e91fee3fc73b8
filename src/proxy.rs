use std::collections::VecDeque;

use reqwest::Proxy;

/// Round-robin over the configured proxy URLs.
#[derive(Clone, Debug, Default)]
pub struct ProxyRotation {
    proxies: VecDeque<String>,
}

impl ProxyRotation {
    pub fn new(proxies: impl IntoIterator<Item = String>) -> Self {
        Self {
            proxies: proxies.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.proxies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }

    /// Takes the front proxy and moves it to the back. `None` means go direct.
    pub fn next_proxy(&mut self) -> Option<String> {
        let proxy = self.proxies.pop_front()?;
        self.proxies.push_back(proxy.clone());
        Some(proxy)
    }
}

/// The same proxy is used for both http and https traffic.
pub fn to_reqwest_proxy(url: &str) -> Option<Proxy> {
    Proxy::all(url)
        .inspect_err(|e| tracing::error!("Invalid proxy {url}: {e}. Going direct"))
        .ok()
}
