//! Server configuration parsed from environment variables.

pub const DEFAULT_MIRO_API_BASE_URL: &str = "https://api.miro.com/v2";
pub const DEFAULT_PAGE_LIMIT: u32 = 50;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_PORT: u16 = 8001;
pub const DEFAULT_SSE_KEEPALIVE_SECS: u64 = 30;
pub const DEFAULT_MAX_ITEMS: usize = 100;
pub const DEFAULT_MAX_CONNECTIONS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MiroTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

/// Upstream board API settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiroConfig {
    /// Bearer credential. `None` is allowed at startup; board operations
    /// then fail with a configuration error before touching the network.
    pub access_token: Option<String>,
    pub base_url: String,
    pub page_limit: u32,
    pub timeouts: MiroTimeouts,
}

/// Caps applied when rendering board data as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderLimits {
    pub max_items: usize,
    pub max_connections: usize,
}

impl Default for RenderLimits {
    fn default() -> Self {
        Self { max_items: DEFAULT_MAX_ITEMS, max_connections: DEFAULT_MAX_CONNECTIONS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub sse_keepalive_secs: u64,
    pub miro: MiroConfig,
    pub render: RenderLimits,
}

impl MiroConfig {
    /// Build upstream config from environment variables.
    ///
    /// Optional:
    /// - `MIRO_ACCESS_TOKEN`: bearer credential (empty counts as absent)
    /// - `MIRO_API_BASE_URL`: default `https://api.miro.com/v2`
    /// - `MIRO_PAGE_LIMIT`: default 50
    /// - `MIRO_REQUEST_TIMEOUT_SECS`: default 30
    /// - `MIRO_CONNECT_TIMEOUT_SECS`: default 10
    #[must_use]
    pub fn from_env() -> Self {
        let access_token = std::env::var("MIRO_ACCESS_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());
        let base_url = std::env::var("MIRO_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_MIRO_API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let page_limit = env_parse("MIRO_PAGE_LIMIT", DEFAULT_PAGE_LIMIT).max(1);
        let timeouts = MiroTimeouts {
            request_secs: env_parse("MIRO_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse("MIRO_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        Self { access_token, base_url, page_limit, timeouts }
    }
}

impl ServerConfig {
    /// Build the full server config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 8001
    /// - `SSE_KEEPALIVE_SECS`: default 30
    /// - `FILTER_MAX_ITEMS`: default 100
    /// - `FILTER_MAX_CONNECTIONS`: default 50
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            port: env_parse("PORT", DEFAULT_PORT),
            sse_keepalive_secs: env_parse("SSE_KEEPALIVE_SECS", DEFAULT_SSE_KEEPALIVE_SECS).max(1),
            miro: MiroConfig::from_env(),
            render: RenderLimits {
                max_items: env_parse("FILTER_MAX_ITEMS", DEFAULT_MAX_ITEMS),
                max_connections: env_parse("FILTER_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS),
            },
        }
    }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
