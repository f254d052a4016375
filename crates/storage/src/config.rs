use std::env;

use url::Url;

/// Connection settings for the remote document store.
///
/// Read from `SKILLSCAN_PROJECT_ID`, `SKILLSCAN_API_KEY` and
/// `SKILLSCAN_BACKEND_URL`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteConfig {
    pub project_id: String,
    pub api_key: String,
    pub base_url: String,
}

impl RemoteConfig {
    #[must_use]
    pub fn new(
        project_id: impl Into<String>,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    #[must_use]
    pub fn from_env() -> Option<Self> {
        let config = Self::new(
            env::var("SKILLSCAN_PROJECT_ID").ok()?,
            env::var("SKILLSCAN_API_KEY").ok()?,
            env::var("SKILLSCAN_BACKEND_URL").ok()?,
        );
        config.is_configured().then_some(config)
    }

    /// Whether these settings point at a real backend.
    ///
    /// Scaffold values tend to outlive setup instructions, so blank strings,
    /// `YOUR_`-prefixed template values and the literal word `placeholder`
    /// all count as unconfigured. The base URL must also parse as an
    /// absolute URL.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        if is_placeholder(&self.project_id)
            || is_placeholder(&self.api_key)
            || is_placeholder(&self.base_url)
        {
            return false;
        }
        Url::parse(&self.base_url).is_ok()
    }
}

fn is_placeholder(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.starts_with("YOUR_") || value.eq_ignore_ascii_case("placeholder")
}
