use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use zeroize::Zeroizing;

use crate::retry::RetryConfig;

pub const DEFAULT_BASE_URL: &str = "https://open.assembly.go.kr/portal/openapi";
pub const DEFAULT_SPEC_URL: &str =
    "https://open.assembly.go.kr/portal/data/openapi/downloadOpenApiSpec.do";
/// Specification revision that is published for nearly every service.
pub const DEFAULT_REVISION: u32 = 2;
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

pub const API_KEY_ENV: &str = "ASSEMBLY_API_KEY";
pub const CACHE_DIR_ENV: &str = "ASSEMBLY_CACHE_DIR";
const CACHE_DIR_NAME: &str = "assembly-api-client";

/// API credential. Not `Debug`/`Display` printable; zeroized on drop.
#[derive(Clone)]
pub struct ApiKey(Arc<Zeroizing<String>>);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(Arc::new(Zeroizing::new(key.into())))
    }

    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Data requests go to `<base_url>/<endpoint>`.
    pub base_url: String,
    /// Specification download endpoint; `infId` and `infSeq` are appended.
    pub spec_url: String,
    /// Sent as `KEY`; omitted from requests when absent.
    pub api_key: Option<ApiKey>,
    pub cache_dir: PathBuf,
    pub revision: u32,
    pub page_index: u32,
    pub page_size: u32,
    /// Per HTTP request, for both specification and data fetches.
    pub request_timeout: Duration,
    /// Deadline for one whole logical call, retries and backoff included.
    pub call_timeout: Option<Duration>,
    pub max_response_bytes: usize,
    pub user_agent: String,
    pub retry: RetryConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            spec_url: DEFAULT_SPEC_URL.to_string(),
            api_key: None,
            cache_dir: default_cache_dir(),
            revision: DEFAULT_REVISION,
            page_index: 1,
            page_size: 100,
            request_timeout: Duration::from_secs(30),
            call_timeout: None,
            max_response_bytes: 32 * 1024 * 1024,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            retry: RetryConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Defaults overlaid with `ASSEMBLY_API_KEY` and `ASSEMBLY_CACHE_DIR`.
    ///
    /// A missing key is not an error here; the client warns about it when it is built.
    pub fn from_env() -> Self {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .map(ApiKey::new);

        let cache_dir = std::env::var_os(CACHE_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(default_cache_dir);

        Self {
            api_key,
            cache_dir,
            ..Default::default()
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(ApiKey::new(key));
        self
    }

    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = dir.into();
        self
    }
}

/// Per-user cache location, `<user cache dir>/assembly-api-client`.
pub fn default_cache_dir() -> PathBuf {
    dirs_next::cache_dir()
        .or_else(|| dirs_next::home_dir().map(|h| h.join(".cache")))
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join(CACHE_DIR_NAME)
}
