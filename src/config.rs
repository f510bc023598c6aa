use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts;

/// Plugin configuration.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Wiki lookup configuration
    #[serde(default)]
    pub wiki: WikiConfig,
}

/// Configuration for the wiki lookup plugin.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct WikiConfig {
    /// The base URL of the wiki to query, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// The duration before a wiki API request times out.
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,
    /// The duration to pause before performing a lookup.
    #[serde(default = "default_lookup_delay", with = "humantime_serde")]
    pub lookup_delay: Duration,
}

impl Default for WikiConfig {
    fn default() -> WikiConfig {
        WikiConfig {
            base_url: default_base_url(),
            request_timeout: default_request_timeout(),
            lookup_delay: default_lookup_delay(),
        }
    }
}

#[must_use]
fn default_base_url() -> String {
    consts::DEFAULT_WIKI_BASE_URL.to_string()
}

#[must_use]
const fn default_request_timeout() -> Duration {
    consts::HTTP_TIMEOUT
}

#[must_use]
const fn default_lookup_delay() -> Duration {
    consts::DEFAULT_LOOKUP_DELAY
}
