use std::time::Duration;

/// The `User-Agent` header to send when issuing HTTP requests.
pub const HTTP_USER_AGENT: &str = concat!(
    env!("CARGO_PKG_NAME"),
    "/",
    env!("CARGO_PKG_VERSION"),
    " (mk@maero.dk)"
);

/// The duration before a wiki API request times out.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// The default duration to pause before performing a lookup.
///
/// The pause keeps the plugin below the wiki's rate limits when a burst of
/// commands comes in.
pub const DEFAULT_LOOKUP_DELAY: Duration = Duration::from_secs(1);

/// The default base URL of the wiki to query.
pub const DEFAULT_WIKI_BASE_URL: &str = "https://minecraft.fandom.com";
