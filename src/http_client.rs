// ABOUTME: Shared HTTP client with connection pooling for Firebase REST calls
// ABOUTME: One pooled client per run; the realtime call narrows its own timeout per request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use std::sync::OnceLock;
use std::time::Duration;

use reqwest::{Client, ClientBuilder};
use tracing::warn;

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connection timeout in seconds
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Timeouts and identification for outbound requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Whole-request timeout
    pub timeout_secs: u64,
    /// TCP/TLS connect timeout
    pub connect_timeout_secs: u64,
    /// `User-Agent` header value
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            user_agent: format!("caretrack-seed/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Build a pooled client with these settings
    ///
    /// Falls back to a default client if the TLS backend cannot be configured.
    #[must_use]
    pub fn build(&self) -> Client {
        ClientBuilder::new()
            .timeout(Duration::from_secs(self.timeout_secs))
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .user_agent(self.user_agent.clone())
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "Falling back to default HTTP client");
                Client::new()
            })
    }
}

/// Configuration used when the shared client is first built
static CLIENT_CONFIG: OnceLock<HttpClientConfig> = OnceLock::new();

/// Global shared HTTP client
static SHARED_CLIENT: OnceLock<Client> = OnceLock::new();

/// Set the shared client configuration
///
/// Only the first call wins, and only if it happens before `shared_client()`.
pub fn initialize_shared_client(config: HttpClientConfig) {
    let _ = CLIENT_CONFIG.set(config);
}

/// Get the shared HTTP client for Firebase REST calls
pub fn shared_client() -> &'static Client {
    SHARED_CLIENT.get_or_init(|| CLIENT_CONFIG.get().cloned().unwrap_or_default().build())
}
