use anyhow::{bail, Context, Result};
use url::Url;

/// Backend base URL, fixed when the client is built.
///
/// Set `NOTIFIER_API_BASE` at compile time to point a build at another backend.
pub const DEFAULT_API_BASE: &str = match option_env!("NOTIFIER_API_BASE") {
    Some(base) => base,
    None => "http://localhost:8080/api/v1",
};

const USER_AGENT: &str = concat!("delayed-notifier-client/", env!("CARGO_PKG_VERSION"));

/// Configuration of the REST backend the client talks to
#[derive(Debug, Clone)]
pub struct ApiConfig {
    base_url: Url,
    user_agent: String,
}

impl ApiConfig {
    /// Build a configuration for an explicit base URL
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("Invalid API base URL: {base_url}"))?;

        if !matches!(base_url.scheme(), "http" | "https") {
            bail!("API base URL must use http or https: {base_url}");
        }
        if base_url.cannot_be_a_base() {
            bail!("API base URL cannot carry a path: {base_url}");
        }

        Ok(Self {
            base_url,
            user_agent: USER_AGENT.to_string(),
        })
    }

    /// Configuration baked in at build time
    pub fn from_build() -> Result<Self> {
        Self::new(DEFAULT_API_BASE)
    }

    /// Builder pattern: set the user agent sent with every request
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Append path segments to the base URL; each segment is percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// `{base}/notify`
    pub fn notify_url(&self) -> Url {
        self.endpoint(&["notify"])
    }

    /// `{base}/notify/{id}`
    pub fn notification_url(&self, id: &str) -> Url {
        self.endpoint(&["notify", id])
    }
}
