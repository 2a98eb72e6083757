//! TheTVDB v2 REST client.
//!
//! Implements [`CatalogSource`] against the JSON API:
//!
//! - Bearer-token login on first use, repeated once when a request comes back
//!   `401`.
//! - `links.next` pagination flattened into one list per call.
//! - Token-bucket rate limiting via [`governor`].
//! - Timeouts and connect failures are recorded on the shared
//!   [`TimeoutBreaker`].
//!
//! No response caching and no retry policy beyond the single re-login.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::{Quota, RateLimiter};
use reqwest::header::ACCEPT_LANGUAGE;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info};
use tvindex_common::{Error, Language, Result, ShowId};

use super::breaker::TimeoutBreaker;
use super::source::{CatalogSource, SeriesCandidate};
use crate::catalog::Record;
use crate::config::ApiConfig;

// ---------------------------------------------------------------------------
// Wire types (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
struct Credentials {
    apikey: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    userkey: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Value,
    #[serde(default)]
    links: Option<Links>,
}

#[derive(Debug, Deserialize)]
struct Links {
    next: Option<u64>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP-backed catalog source for TheTVDB.
///
/// ```no_run
/// use std::sync::Arc;
/// use tvindex::clock::SystemClock;
/// use tvindex::config::ApiConfig;
/// use tvindex::provider::{TimeoutBreaker, TvdbClient, DEFAULT_COOL_DOWN};
///
/// let api = ApiConfig { apikey: Some("0123456789ABCDEF".into()), ..ApiConfig::default() };
/// let breaker = Arc::new(TimeoutBreaker::new(DEFAULT_COOL_DOWN, Arc::new(SystemClock)));
/// let client = TvdbClient::new(&api, breaker).unwrap();
/// ```
pub struct TvdbClient {
    http: reqwest::Client,
    api_url: String,
    credentials: Credentials,
    token: Mutex<Option<String>>,
    rate_limiter: governor::RateLimiter<
        governor::state::NotKeyed,
        governor::state::InMemoryState,
        governor::clock::DefaultClock,
    >,
    breaker: Arc<TimeoutBreaker>,
}

impl TvdbClient {
    /// Build a client from the `[api]` config section.
    ///
    /// Fails with a validation error when no API key is configured.
    pub fn new(api: &ApiConfig, breaker: Arc<TimeoutBreaker>) -> Result<Self> {
        let apikey = api
            .apikey
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| Error::validation("api.apikey is required to talk to TheTVDB"))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(api.timeout_secs))
            .build()
            .map_err(|e| Error::fetch("http client", e))?;

        let per_second = NonZeroU32::new(api.requests_per_second).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = RateLimiter::direct(Quota::per_second(per_second));

        Ok(Self {
            http,
            api_url: api.api_url.trim_end_matches('/').to_string(),
            credentials: Credentials {
                apikey,
                username: api.username.clone(),
                userkey: api.userkey.clone(),
            },
            token: Mutex::new(None),
            rate_limiter,
            breaker,
        })
    }

    fn transport_error(&self, what: &str, err: reqwest::Error) -> Error {
        if err.is_timeout() || err.is_connect() {
            self.breaker.record_failure();
        }
        Error::fetch(what, err)
    }

    async fn login(&self) -> Result<String> {
        self.rate_limiter.until_ready().await;

        let response = self
            .http
            .post(format!("{}/login", self.api_url))
            .json(&self.credentials)
            .send()
            .await
            .map_err(|e| self.transport_error("login", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::fetch("login", format!("HTTP {status}")));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| Error::fetch("login", e))?;
        info!("Authenticated against TheTVDB");
        Ok(body.token)
    }

    /// Current bearer token, logging in when none is held.
    async fn token(&self) -> Result<String> {
        let mut slot = self.token.lock().await;
        if let Some(token) = slot.as_ref() {
            return Ok(token.clone());
        }
        let token = self.login().await?;
        *slot = Some(token.clone());
        Ok(token)
    }

    async fn invalidate_token(&self, stale: &str) {
        let mut slot = self.token.lock().await;
        if slot.as_deref() == Some(stale) {
            *slot = None;
        }
    }

    /// GET one page. `Ok(None)` means the API answered 404.
    async fn get_envelope(
        &self,
        what: &str,
        path: &str,
        query: &[(&str, String)],
        language: Option<Language>,
    ) -> Result<Option<Envelope>> {
        let url = format!("{}{}", self.api_url, path);
        let mut reauthenticated = false;

        loop {
            let token = self.token().await?;
            self.rate_limiter.until_ready().await;

            let mut request = self.http.get(&url).bearer_auth(&token).query(query);
            if let Some(language) = language {
                request = request.header(ACCEPT_LANGUAGE, language.as_str());
            }

            debug!(url = %url, ?query, "TheTVDB request");
            let response = request
                .send()
                .await
                .map_err(|e| self.transport_error(what, e))?;

            match response.status() {
                StatusCode::NOT_FOUND => return Ok(None),
                StatusCode::UNAUTHORIZED if !reauthenticated => {
                    debug!("Token rejected, logging in again");
                    reauthenticated = true;
                    self.invalidate_token(&token).await;
                    continue;
                }
                status if !status.is_success() => {
                    let body = response.text().await.unwrap_or_default();
                    return Err(Error::fetch(what, format!("HTTP {status}: {body}")));
                }
                _ => {}
            }

            let envelope = response
                .json::<Envelope>()
                .await
                .map_err(|e| Error::fetch(what, e))?;
            return Ok(Some(envelope));
        }
    }

    /// GET every page of a list endpoint. `Ok(None)` when the first page is a
    /// 404.
    async fn get_all(
        &self,
        what: &str,
        path: &str,
        query: &[(&str, String)],
        language: Option<Language>,
    ) -> Result<Option<Vec<Value>>> {
        let mut items = Vec::new();
        let mut page: Option<u64> = None;

        loop {
            let mut params = query.to_vec();
            if let Some(page) = page {
                params.push(("page", page.to_string()));
            }

            let Some(envelope) = self.get_envelope(what, path, &params, language).await? else {
                if page.is_none() {
                    return Ok(None);
                }
                break;
            };

            match envelope.data {
                Value::Array(values) => items.extend(values),
                Value::Null => {}
                other => items.push(other),
            }

            match envelope.links.and_then(|links| links.next) {
                Some(next) if page.map_or(true, |current| next > current) => {
                    debug!(path, next, "Following next page");
                    page = Some(next);
                }
                _ => break,
            }
        }

        Ok(Some(items))
    }

    async fn get_records(
        &self,
        what: &str,
        path: &str,
        query: &[(&str, String)],
        language: Option<Language>,
    ) -> Result<Vec<Record>> {
        let items = self
            .get_all(what, path, query, language)
            .await?
            .unwrap_or_default();
        items
            .into_iter()
            .map(|item| Record::from_json(item).map_err(|e| Error::fetch(what, e)))
            .collect()
    }
}

#[async_trait]
impl CatalogSource for TvdbClient {
    fn name(&self) -> &'static str {
        "tvdb"
    }

    async fn search_by_name(&self, name: &str, language: Language) -> Result<Vec<SeriesCandidate>> {
        let query = [("name", name.to_string())];
        let items = self
            .get_all("search", "/search/series", &query, Some(language))
            .await?
            .unwrap_or_default();

        let mut candidates = Vec::with_capacity(items.len());
        for item in items {
            let mut candidate: SeriesCandidate =
                serde_json::from_value(item).map_err(|e| Error::fetch("search", e))?;
            candidate.language_id = Some(language.tvdb_id());
            debug!(id = %candidate.id, name = %candidate.display_name(), "Found series");
            candidates.push(candidate);
        }
        Ok(candidates)
    }

    async fn fetch_metadata(&self, id: ShowId, language: Language) -> Result<Record> {
        let path = format!("/series/{id}");
        let envelope = self
            .get_envelope("series", &path, &[], Some(language))
            .await?
            .ok_or_else(|| Error::show_not_found(format!("no series with id {id}")))?;
        match envelope.data {
            Value::Null => Err(Error::show_not_found(format!("no series with id {id}"))),
            data => Record::from_json(data).map_err(|e| Error::fetch("series", e)),
        }
    }

    async fn fetch_episodes(&self, id: ShowId, language: Language) -> Result<Vec<Record>> {
        let path = format!("/series/{id}/episodes");
        self.get_records("episodes", &path, &[], Some(language)).await
    }

    async fn fetch_banners(&self, id: ShowId) -> Result<Vec<Record>> {
        let path = format!("/series/{id}/images");
        let Some(summary) = self.get_envelope("images", &path, &[], None).await? else {
            return Ok(Vec::new());
        };
        let Value::Object(counts) = summary.data else {
            return Ok(Vec::new());
        };

        let query_path = format!("/series/{id}/images/query");
        let mut banners = Vec::new();
        for (key_type, count) in counts {
            if count.as_u64() == Some(0) {
                continue;
            }
            let query = [("keyType", key_type)];
            banners.extend(self.get_records("images", &query_path, &query, None).await?);
        }
        Ok(banners)
    }

    async fn fetch_actors(&self, id: ShowId) -> Result<Vec<Record>> {
        let path = format!("/series/{id}/actors");
        self.get_records("actors", &path, &[], None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::provider::DEFAULT_COOL_DOWN;

    fn breaker() -> Arc<TimeoutBreaker> {
        Arc::new(TimeoutBreaker::new(DEFAULT_COOL_DOWN, ManualClock::shared()))
    }

    #[test]
    fn missing_apikey_is_a_validation_error() {
        let result = TvdbClient::new(&ApiConfig::default(), breaker());
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn credentials_omit_absent_user_fields() {
        let creds = Credentials {
            apikey: "KEY".into(),
            username: None,
            userkey: Some("UK".into()),
        };
        let json = serde_json::to_value(&creds).unwrap();
        assert_eq!(json, serde_json::json!({"apikey": "KEY", "userkey": "UK"}));
    }

    #[test]
    fn envelope_tolerates_missing_links() {
        let envelope: Envelope = serde_json::from_str(r#"{"data": [1, 2]}"#).unwrap();
        assert!(envelope.links.is_none());
        let envelope: Envelope =
            serde_json::from_str(r#"{"data": [], "links": {"next": null}}"#).unwrap();
        assert!(envelope.links.unwrap().next.is_none());
    }

    #[test]
    fn api_url_trailing_slash_is_trimmed() {
        let api = ApiConfig {
            apikey: Some("KEY".into()),
            api_url: "http://localhost:1234/".into(),
            ..ApiConfig::default()
        };
        let client = TvdbClient::new(&api, breaker()).unwrap();
        assert_eq!(client.api_url, "http://localhost:1234");
        assert_eq!(client.name(), "tvdb");
    }
}
