use std::time::Duration;

use serde::Deserialize;
use tokio::time::sleep;
use tracing::debug;

use crate::config::Config;
use crate::plugin::prelude::*;

mod client;

pub use client::Client;

/// Usage instruction sent when the command is given without a keyword.
pub const USAGE: &str = "Usage: wiki <keyword>";
/// Reply sent when the search returns no hits.
pub const NO_RESULTS: &str = "No matching entry found.";
/// Reply sent when a wiki request times out.
pub const TIMED_OUT: &str = "The wiki request timed out, please try again.";
/// Note included in the reply when a page has no introductory extract.
pub const NO_SUMMARY: &str = "(no summary available)";

/// The maximum number of characters of an extract to include in a reply.
pub const EXTRACT_MAX_CHARS: usize = 250;

/// An entry in the wiki's search results.
#[derive(Debug, Deserialize)]
pub struct SearchHit {
    /// The title of the matching page.
    pub title: String,
    /// The unique id of the matching page.
    #[serde(rename = "pageid")]
    pub page_id: u64,
    /// An HTML fragment of the matching text.
    #[serde(default)]
    pub snippet: String,
}

/// The introductory summary of a wiki page.
#[derive(Debug, Deserialize)]
pub struct PageSummary {
    /// The canonical title of the page.
    pub title: String,
    /// The plain text introduction of the page, if it has one.
    pub extract: Option<String>,
}

/// Errors that can occur during a lookup.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("wiki request timed out")]
    Timeout,
    #[error("unable to send search request: {0}")]
    SearchRequest(#[source] reqwest::Error),
    #[error("unable to parse search response: {0}")]
    ParseSearch(#[source] serde_path_to_error::Error<serde_json::Error>),
    #[error("unable to send extract request: {0}")]
    ExtractRequest(#[source] reqwest::Error),
    #[error("unable to parse extract response: {0}")]
    ParseExtract(#[source] serde_path_to_error::Error<serde_json::Error>),
    #[error("extract response contained no page entry")]
    MissingPage,
}

impl Error {
    /// Wraps a search transport error, mapping timeouts to their own variant.
    fn search_transport(err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout
        } else {
            Error::SearchRequest(err)
        }
    }

    /// Wraps an extract transport error, mapping timeouts to their own variant.
    fn extract_transport(err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout
        } else {
            Error::ExtractRequest(err)
        }
    }
}

/// Minecraft Wiki lookup plugin.
pub struct Wiki {
    /// Wiki API client.
    client: Client,
    /// `wiki` lookup command.
    command: Command,
    /// Pause before performing a lookup.
    lookup_delay: Duration,
}

#[async_trait]
impl Plugin for Wiki {
    fn new(config: &Config) -> Wiki {
        Wiki::new(config)
    }

    fn name() -> Name {
        Name("wiki")
    }

    fn author() -> Author {
        Author("Mikkel Kroman <mk@maero.dk>")
    }

    fn version() -> Version {
        Version("0.1")
    }

    async fn handle_message(&self, event: &MessageEvent) -> Result<Option<Reply>, PluginError> {
        let Some(keyword) = self.command.parse(&event.text) else {
            return Ok(None);
        };

        if keyword.is_empty() {
            return Ok(Some(Reply::suppressing(USAGE)));
        }

        debug!(%keyword, scope = ?event.scope, "handling wiki lookup");

        // Brief pause before calling out, to stay below the wiki's rate limits.
        sleep(self.lookup_delay).await;

        let reply = self.lookup(keyword).await;

        Ok(Some(Reply::suppressing(reply)))
    }
}

impl Wiki {
    /// Creates the plugin from the given configuration.
    #[must_use]
    pub fn new(config: &Config) -> Wiki {
        let client = Client::new(&config.wiki);
        let command = Command::new("wiki");
        let lookup_delay = config.wiki.lookup_delay;

        Wiki {
            client,
            command,
            lookup_delay,
        }
    }

    /// Looks up the given `keyword` on the wiki and renders a reply.
    ///
    /// This never fails: every error is rendered as a descriptive reply string, so the caller
    /// always has something to send back.
    pub async fn lookup(&self, keyword: &str) -> String {
        match self.summarize(keyword).await {
            Ok(reply) => reply,
            Err(Error::Timeout) => TIMED_OUT.to_string(),
            Err(err) => format!("Wiki lookup failed: {err}"),
        }
    }

    /// Searches the wiki for `keyword` and fetches the introductory extract of the best match.
    async fn summarize(&self, keyword: &str) -> Result<String, Error> {
        let hits = self.client.search(keyword).await?;

        // First hit wins. The search endpoint orders hits by relevance and nothing in the reply
        // disambiguates between multiple matches.
        let Some(hit) = hits.first() else {
            return Ok(NO_RESULTS.to_string());
        };

        let page = self.client.page_summary(&hit.title).await?;
        let url = self.client.article_url(&hit.title);

        match page.extract {
            Some(extract) => Ok(format!(
                "{title}\n{summary}\n{url}",
                title = hit.title,
                summary = presentable(&extract)
            )),
            None => Ok(format!("{title}\n{NO_SUMMARY}\n{url}", title = hit.title)),
        }
    }
}

/// Renders a page extract in a chat-presentable way by replacing newlines with spaces and
/// truncating to [`EXTRACT_MAX_CHARS`] characters, with a trailing ellipsis when the extract was
/// longer.
fn presentable(extract: &str) -> String {
    let flattened = extract.replace('\r', "").replace('\n', " ");

    match flattened.char_indices().nth(EXTRACT_MAX_CHARS) {
        Some((byte_idx, _)) => format!("{}…", &flattened[..byte_idx]),
        None => flattened,
    }
}
