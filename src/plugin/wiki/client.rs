use std::collections::HashMap;

use reqwest::redirect::Policy;
use serde::Deserialize;
use tracing::{debug, error};

use crate::config::WikiConfig;
use crate::consts;

use super::{Error, PageSummary, SearchHit};

/// The relative path of the wiki's API endpoint.
const API_PATH: &str = "/api.php";

/// Response envelope of a `list=search` query.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    query: SearchQuery,
}

#[derive(Debug, Default, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

/// Response envelope of a `prop=extracts` query.
#[derive(Debug, Deserialize)]
struct ExtractResponse {
    query: PagesQuery,
}

#[derive(Debug, Deserialize)]
struct PagesQuery {
    /// Pages keyed by the page id the wiki assigned them.
    pages: HashMap<String, PageSummary>,
}

/// An asynchronous client for a MediaWiki-compatible wiki API.
pub struct Client {
    /// The base URL of the wiki, without a trailing slash.
    base_url: String,
    /// The underlying [`reqwest::Client`] used for making HTTP requests.
    http: reqwest::Client,
}

impl Client {
    /// Constructs a new `Client` from the given configuration.
    ///
    /// The client is configured with the configured request timeout, redirects disabled and the
    /// crate's user agent.
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be built. This can happen in environments with
    /// misconfigured network or TLS dependencies.
    #[must_use]
    pub fn new(config: &WikiConfig) -> Client {
        let http = reqwest::ClientBuilder::new()
            .redirect(Policy::none())
            .timeout(config.request_timeout)
            .user_agent(consts::HTTP_USER_AGENT)
            .build()
            .expect("could not build http client");

        Self::with_client(config.base_url.clone(), http)
    }

    /// Constructs a `Client` using a pre-configured `reqwest::Client`.
    ///
    /// This is useful if you want to share an HTTP client between multiple plugins or require
    /// custom configuration.
    #[must_use]
    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Client {
        Client {
            base_url: base_url.into(),
            http,
        }
    }

    /// Searches the wiki for pages matching `keyword`.
    ///
    /// Hits are returned in the order the wiki ranked them. The list may be empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timeout`] when the request exceeds its deadline, [`Error::SearchRequest`]
    /// on any other transport or status failure and [`Error::ParseSearch`] when the response body
    /// does not match the expected schema.
    pub async fn search(&self, keyword: &str) -> Result<Vec<SearchHit>, Error> {
        let params = [
            ("action", "query"),
            ("format", "json"),
            ("list", "search"),
            ("srsearch", keyword),
        ];
        let request = self.http.get(self.api_url()).query(&params);
        debug!(%keyword, "requesting search results");
        let response = request.send().await.map_err(Error::search_transport)?;

        match response.error_for_status() {
            Ok(response) => {
                let text = response.text().await.map_err(Error::search_transport)?;
                let jd = &mut serde_json::Deserializer::from_str(&text);
                let parsed: SearchResponse = serde_path_to_error::deserialize(jd)
                    .inspect_err(|err| error!(?err, "could not parse search response"))
                    .map_err(Error::ParseSearch)?;
                debug!(num_hits = parsed.query.search.len(), "fetched search results");

                Ok(parsed.query.search)
            }
            Err(err) => Err(Error::search_transport(err)),
        }
    }

    /// Fetches the introductory plain text extract for the page with the exact `title`.
    ///
    /// The wiki keys the result by page id; an exact-title query is expected to return a single
    /// entry, and whichever single entry is present is returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timeout`] when the request exceeds its deadline, [`Error::ExtractRequest`]
    /// on any other transport or status failure, [`Error::ParseExtract`] when the response body
    /// does not match the expected schema and [`Error::MissingPage`] when the response contains no
    /// page entry at all.
    pub async fn page_summary(&self, title: &str) -> Result<PageSummary, Error> {
        let params = [
            ("action", "query"),
            ("format", "json"),
            ("prop", "extracts"),
            ("exintro", "true"),
            ("explaintext", "true"),
            ("titles", title),
        ];
        let request = self.http.get(self.api_url()).query(&params);
        debug!(%title, "requesting page extract");
        let response = request.send().await.map_err(Error::extract_transport)?;

        match response.error_for_status() {
            Ok(response) => {
                let text = response.text().await.map_err(Error::extract_transport)?;
                let jd = &mut serde_json::Deserializer::from_str(&text);
                let parsed: ExtractResponse = serde_path_to_error::deserialize(jd)
                    .inspect_err(|err| error!(?err, "could not parse extract response"))
                    .map_err(Error::ParseExtract)?;

                parsed
                    .query
                    .pages
                    .into_values()
                    .next()
                    .ok_or(Error::MissingPage)
            }
            Err(err) => Err(Error::extract_transport(err)),
        }
    }

    /// Returns the URL of the article with the given `title`.
    #[must_use]
    pub fn article_url(&self, title: &str) -> String {
        format!(
            "{base_url}/wiki/{title}",
            base_url = self.base_url,
            title = title.replace(' ', "_")
        )
    }

    /// Returns the URL of the wiki's API endpoint.
    fn api_url(&self) -> String {
        format!("{base_url}{API_PATH}", base_url = self.base_url)
    }
}
