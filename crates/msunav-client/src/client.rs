//! HTTP client for the MapleStory Universe Navigator API.
//!
//! Wraps `reqwest` with endpoint URL construction, status checking, and typed
//! response deserialization. No request is ever retried: a failure is returned
//! to the caller, which decides whether to ask the user to try again.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::NavigatorError;
use crate::normalize::normalize_search_records;
use crate::types::{
    EnhancementQuery, ItemId, ItemInfoBody, ItemMetadata, LookbackWindow, PricingHistory,
    SearchRecord, SearchResponse,
};

const DEFAULT_BASE_URL: &str = "https://msu.io/navigator/api/navigator/";
const DEFAULT_USER_AGENT: &str = "msunav/0.1 (item-lookup)";

const SEARCH_PATH: &[&str] = &["search"];
const PRICING_HISTORY_PATH: &[&str] = &["msu-stats", "dynamic-pricing", "enhance-price", "history"];

/// Client for the Navigator REST API.
///
/// Use [`NavigatorClient::new`] for production or
/// [`NavigatorClient::with_base_url`] to point at a mock server in tests.
/// Cloning is cheap: the underlying connection pool is shared.
#[derive(Clone)]
pub struct NavigatorClient {
    client: Client,
    base_url: Url,
}

impl NavigatorClient {
    /// Creates a new client pointed at the production Navigator API.
    ///
    /// # Errors
    ///
    /// Returns [`NavigatorError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64) -> Result<Self, NavigatorError> {
        Self::with_base_url(timeout_secs, DEFAULT_USER_AGENT, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL and user agent.
    ///
    /// # Errors
    ///
    /// Returns [`NavigatorError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`NavigatorError::InvalidBaseUrl`] if
    /// `base_url` is not an absolute hierarchical URL.
    pub fn with_base_url(
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, NavigatorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so endpoint segments are appended to the
        // base path instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| NavigatorError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(NavigatorError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: "URL cannot be used as a base".to_owned(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// Searches the item database by free-text keyword.
    ///
    /// Hits without an item ID or name are dropped. A keyword with no matches
    /// yields an empty list.
    ///
    /// # Errors
    ///
    /// - [`NavigatorError::Http`] on network failure.
    /// - [`NavigatorError::UnexpectedStatus`] on a non-2xx response.
    /// - [`NavigatorError::Deserialize`] if the body is not the expected shape.
    pub async fn search(&self, keyword: &str) -> Result<Vec<SearchRecord>, NavigatorError> {
        let url = self.build_url(SEARCH_PATH, &[("keyword", keyword)])?;
        let response: SearchResponse = self
            .request_json(&url, || format!("search(keyword={keyword})"))
            .await?;

        let records = normalize_search_records(response.records);
        tracing::debug!(keyword, count = records.len(), "search completed");
        Ok(records)
    }

    /// Fetches full metadata for one item.
    ///
    /// # Errors
    ///
    /// - [`NavigatorError::Http`] on network failure.
    /// - [`NavigatorError::UnexpectedStatus`] on a non-2xx response.
    /// - [`NavigatorError::Deserialize`] if the body is not item metadata.
    pub async fn fetch_item_details(
        &self,
        item_id: &ItemId,
    ) -> Result<ItemMetadata, NavigatorError> {
        let url = self.build_url(&["metadata", "items", item_id.as_str(), "info"], &[])?;
        let body: ItemInfoBody = self
            .request_json(&url, || format!("item info(id={item_id})"))
            .await?;
        Ok(body.into_metadata())
    }

    /// Fetches the enhancement price history for one item and one
    /// enhancement filter within `window`.
    ///
    /// # Errors
    ///
    /// - [`NavigatorError::Http`] on network failure.
    /// - [`NavigatorError::UnexpectedStatus`] on a non-2xx response.
    /// - [`NavigatorError::Deserialize`] if the body is not a price history.
    pub async fn fetch_enhancement_pricing(
        &self,
        item_id: &ItemId,
        query: EnhancementQuery,
        window: LookbackWindow,
    ) -> Result<PricingHistory, NavigatorError> {
        let url = self.pricing_url(item_id, query, window)?;
        self.request_json(&url, || format!("pricing history(id={item_id}, {query:?})"))
            .await
    }

    fn pricing_url(
        &self,
        item_id: &ItemId,
        query: EnhancementQuery,
        window: LookbackWindow,
    ) -> Result<Url, NavigatorError> {
        let min_timestamp = window.min_timestamp.to_string();
        let max_timestamp = window.max_timestamp.to_string();
        let mut params = vec![
            ("itemId", item_id.as_str().to_owned()),
            ("period", "1".to_owned()),
            ("minTimestamp", min_timestamp),
            ("maxTimestamp", max_timestamp),
        ];
        match query {
            EnhancementQuery::Potential { sub_type } => {
                params.push(("itemUpgradeType", "1".to_owned()));
                params.push(("itemUpgradeSubType", sub_type.to_string()));
            }
            EnhancementQuery::Starforce { tier } => {
                params.push(("itemUpgrade", tier.to_string()));
            }
        }

        let borrowed: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();
        self.build_url(PRICING_HISTORY_PATH, &borrowed)
    }

    /// Builds an endpoint URL from path segments and query parameters.
    ///
    /// Segments and values are percent-encoded by [`Url`]; an empty `query`
    /// leaves the URL without a `?`.
    fn build_url(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url, NavigatorError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| NavigatorError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: "URL cannot be used as a base".to_owned(),
            })?
            .pop_if_empty()
            .extend(segments);

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a GET request, asserts a 2xx status, and decodes the JSON body.
    ///
    /// `context` is only evaluated when decoding fails.
    async fn request_json<T, C>(&self, url: &Url, context: C) -> Result<T, NavigatorError>
    where
        T: DeserializeOwned,
        C: FnOnce() -> String,
    {
        tracing::debug!(url = %url, "GET");
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NavigatorError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| NavigatorError::Deserialize {
            context: context(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
