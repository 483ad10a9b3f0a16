//! Client configuration: endpoint bases and the date-cleaning policy.

use crate::dates::DatePolicy;

pub const DEFAULT_API_BASE: &str = "http://api.linkedin.com/v1";
pub const DEFAULT_OAUTH_BASE: &str = "https://api.linkedin.com";
pub const DEFAULT_WEB_BASE: &str = "https://www.linkedin.com";

/// Where requests go and how responses are pre-processed.
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `LINKEDIN_API_BASE` | `http://api.linkedin.com/v1` | Base of every REST resource |
/// | `LINKEDIN_OAUTH_BASE` | `https://api.linkedin.com` | Base of the token endpoints |
/// | `LINKEDIN_WEB_BASE` | `https://www.linkedin.com` | Base of the member-facing authorize page |
/// | `LINKEDIN_DATE_POLICY` | `heuristic` | `heuristic`, `off`, or a comma-separated tag list |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base: String,
    pub oauth_base: String,
    pub web_base: String,
    pub date_policy: DatePolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            oauth_base: DEFAULT_OAUTH_BASE.to_string(),
            web_base: DEFAULT_WEB_BASE.to_string(),
            date_policy: DatePolicy::default(),
        }
    }
}

impl ClientConfig {
    /// Populate config from environment variables, applying defaults where absent.
    pub fn from_env() -> Self {
        let var = |name: &str, default: &str| std::env::var(name).unwrap_or_else(|_| default.to_string());
        Self {
            api_base: trim(var("LINKEDIN_API_BASE", DEFAULT_API_BASE)),
            oauth_base: trim(var("LINKEDIN_OAUTH_BASE", DEFAULT_OAUTH_BASE)),
            web_base: trim(var("LINKEDIN_WEB_BASE", DEFAULT_WEB_BASE)),
            date_policy: std::env::var("LINKEDIN_DATE_POLICY")
                .map(|v| parse_date_policy(&v))
                .unwrap_or_default(),
        }
    }

    /// Point every endpoint at one server, e.g. a local mock.
    pub fn for_host(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            api_base: format!("{base}/v1"),
            oauth_base: base.to_string(),
            web_base: base.to_string(),
            date_policy: DatePolicy::default(),
        }
    }

    pub fn with_date_policy(mut self, policy: DatePolicy) -> Self {
        self.date_policy = policy;
        self
    }

    pub fn profile_url(&self) -> String {
        format!("{}/people/~", self.api_base)
    }

    pub fn connections_url(&self) -> String {
        format!("{}/people/~/connections", self.api_base)
    }

    pub fn network_url(&self) -> String {
        format!("{}/people/~/network", self.api_base)
    }

    pub fn comment_feed_url(&self, network_key: &str) -> String {
        format!(
            "{}/people/~/network/updates/key={network_key}/update-comments",
            self.api_base
        )
    }

    pub fn status_url(&self) -> String {
        format!("{}/people/~/current-status", self.api_base)
    }

    pub fn shares_url(&self) -> String {
        format!("{}/people/~/shares", self.api_base)
    }

    pub fn mailbox_url(&self) -> String {
        format!("{}/people/~/mailbox", self.api_base)
    }

    pub fn search_url(&self) -> String {
        format!("{}/people-search", self.api_base)
    }

    pub fn request_token_url(&self) -> String {
        format!("{}/uas/oauth/requestToken", self.oauth_base)
    }

    pub fn access_token_url(&self) -> String {
        format!("{}/uas/oauth/accessToken", self.oauth_base)
    }

    pub fn authorize_url(&self) -> String {
        format!("{}/uas/oauth/authorize", self.web_base)
    }
}

fn trim(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

fn parse_date_policy(raw: &str) -> DatePolicy {
    match raw.trim() {
        "" | "heuristic" => DatePolicy::Heuristic,
        "off" => DatePolicy::Off,
        tags => DatePolicy::Fields(
            tags.split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
        ),
    }
}
