//! OmdbApiClient - REST implementation of the catalog client for OMDb.
//!
//! Both operations are plain `GET` requests against the same endpoint:
//! `?apikey=…&s=<title>&page=<n>` for searches and `?apikey=…&i=<imdbID>` for
//! details. OMDb reports logical failures in-band with `"Response": "False"`
//! and an optional `"Error"` text, sometimes together with a non-2xx status.

use async_trait::async_trait;
use cinelight_core::catalog::{MediaType, MovieDetail, MovieSummary, Rating, SearchPage};
use cinelight_core::{CatalogClient, DetailError, SearchError};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::config::OmdbConfig;

/// Placeholder OMDb uses for missing values.
const NOT_AVAILABLE: &str = "N/A";

/// Catalog client that talks to the OMDb HTTP API.
#[derive(Clone)]
pub struct OmdbApiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OmdbApiClient {
    /// Creates a client whose requests are bounded by the configured timeout.
    pub fn new(config: &OmdbConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends one GET request and returns the status and body text.
    ///
    /// Errors carry a transport description suitable for logs.
    async fn send_request(
        &self,
        params: &[(&str, &str)],
    ) -> Result<(StatusCode, String), String> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    format!("OMDb request timed out: {err}")
                } else {
                    format!("OMDb request failed: {err}")
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| format!("Failed to read OMDb response body: {err}"))?;

        Ok((status, body))
    }
}

#[async_trait]
impl CatalogClient for OmdbApiClient {
    async fn search(&self, query: &str, page: u32) -> Result<SearchPage, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::not_found(None));
        }

        tracing::debug!(query, page, "OMDb search request");
        let page_param = page.max(1).to_string();
        let (status, body) = self
            .send_request(&[("s", query), ("page", page_param.as_str())])
            .await
            .map_err(|detail| {
                tracing::warn!("{}", detail);
                SearchError::transport(detail)
            })?;

        let result = parse_search_response(status, &body);
        if let Err(SearchError::Transport(detail)) = &result {
            tracing::warn!(%status, "Unusable OMDb search response: {}", detail);
        }
        result
    }

    async fn fetch_details(&self, imdb_id: &str) -> Result<MovieDetail, DetailError> {
        let imdb_id = imdb_id.trim();
        if imdb_id.is_empty() {
            return Err(DetailError::not_found(None));
        }

        tracing::debug!(imdb_id, "OMDb detail request");
        let (status, body) = self
            .send_request(&[("i", imdb_id)])
            .await
            .map_err(|detail| {
                tracing::warn!("{}", detail);
                DetailError::transport(detail)
            })?;

        let result = parse_detail_response(status, &body);
        if let Err(DetailError::Transport(detail)) = &result {
            tracing::warn!(%status, "Unusable OMDb detail response: {}", detail);
        }
        result
    }
}

/// Outcome of reading OMDb's in-band `Response` flag.
enum Verdict {
    Success,
    Failure(Option<String>),
}

fn read_verdict(
    status: StatusCode,
    response: Option<&str>,
    error: Option<String>,
) -> Result<Verdict, String> {
    match response.map(str::trim) {
        Some(flag) if flag.eq_ignore_ascii_case("true") && status.is_success() => {
            Ok(Verdict::Success)
        }
        Some(flag) if flag.eq_ignore_ascii_case("false") => Ok(Verdict::Failure(error)),
        Some(_) if !status.is_success() => Err(format!("OMDb returned HTTP {}", status)),
        Some(flag) => Err(format!("unexpected Response flag '{}'", flag)),
        None if !status.is_success() => Err(format!("OMDb returned HTTP {}", status)),
        None => Err("response has no Response flag".to_string()),
    }
}

/// Parses a search body into a result page.
pub(crate) fn parse_search_response(
    status: StatusCode,
    body: &str,
) -> Result<SearchPage, SearchError> {
    let envelope: SearchEnvelope = serde_json::from_str(body).map_err(|err| {
        if status.is_success() {
            SearchError::transport(format!("Failed to parse OMDb search response: {err}"))
        } else {
            SearchError::transport(format!("OMDb returned HTTP {}", status))
        }
    })?;

    match read_verdict(status, envelope.response.as_deref(), envelope.error)
        .map_err(SearchError::transport)?
    {
        Verdict::Failure(message) => Err(SearchError::not_found(message)),
        Verdict::Success => {
            let raw_total = envelope.total_results.unwrap_or_default();
            let total_results = raw_total.trim().parse::<u32>().map_err(|_| {
                SearchError::transport(format!("invalid totalResults value '{}'", raw_total))
            })?;

            Ok(SearchPage {
                items: envelope.search.into_iter().map(MovieSummary::from).collect(),
                total_results,
            })
        }
    }
}

/// Parses a detail body into a full record.
pub(crate) fn parse_detail_response(
    status: StatusCode,
    body: &str,
) -> Result<MovieDetail, DetailError> {
    let raw: OmdbDetail = serde_json::from_str(body).map_err(|err| {
        if status.is_success() {
            DetailError::transport(format!("Failed to parse OMDb detail response: {err}"))
        } else {
            DetailError::transport(format!("OMDb returned HTTP {}", status))
        }
    })?;

    match read_verdict(status, raw.response.as_deref(), raw.error.clone())
        .map_err(DetailError::transport)?
    {
        Verdict::Failure(message) => Err(DetailError::not_found(message)),
        Verdict::Success if raw.imdb_id.trim().is_empty() => {
            Err(DetailError::transport("detail response has no imdbID"))
        }
        Verdict::Success => Ok(raw.into()),
    }
}

fn available(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == NOT_AVAILABLE {
        None
    } else {
        Some(value)
    }
}

#[derive(Deserialize)]
struct SearchEnvelope {
    #[serde(rename = "Search", default)]
    search: Vec<OmdbSearchItem>,
    #[serde(rename = "totalResults")]
    total_results: Option<String>,
    #[serde(rename = "Response")]
    response: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OmdbSearchItem {
    title: String,
    #[serde(default)]
    year: String,
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(default)]
    r#type: String,
    #[serde(default)]
    poster: String,
}

impl From<OmdbSearchItem> for MovieSummary {
    fn from(item: OmdbSearchItem) -> Self {
        Self {
            title: item.title,
            year: item.year,
            imdb_id: item.imdb_id,
            media_type: MediaType::from_label(&item.r#type),
            poster_url: available(item.poster),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OmdbRating {
    source: String,
    value: String,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct OmdbDetail {
    title: String,
    year: String,
    rated: String,
    released: String,
    runtime: String,
    genre: String,
    director: String,
    writer: String,
    actors: String,
    plot: String,
    language: String,
    country: String,
    awards: String,
    poster: String,
    ratings: Vec<OmdbRating>,
    metascore: String,
    #[serde(rename = "imdbRating")]
    imdb_rating: String,
    #[serde(rename = "imdbVotes")]
    imdb_votes: String,
    #[serde(rename = "imdbID")]
    imdb_id: String,
    r#type: String,
    #[serde(rename = "DVD")]
    dvd: String,
    box_office: String,
    production: String,
    website: String,
    response: Option<String>,
    error: Option<String>,
}

impl From<OmdbDetail> for MovieDetail {
    fn from(raw: OmdbDetail) -> Self {
        Self {
            title: raw.title,
            year: raw.year,
            rated: raw.rated,
            released: raw.released,
            runtime: raw.runtime,
            genre: raw.genre,
            director: raw.director,
            writer: raw.writer,
            actors: raw.actors,
            plot: raw.plot,
            language: raw.language,
            country: raw.country,
            awards: raw.awards,
            poster_url: available(raw.poster),
            ratings: raw
                .ratings
                .into_iter()
                .map(|r| Rating {
                    source: r.source,
                    value: r.value,
                })
                .collect(),
            metascore: available(raw.metascore),
            imdb_rating: raw.imdb_rating,
            imdb_votes: raw.imdb_votes,
            imdb_id: raw.imdb_id,
            media_type: MediaType::from_label(&raw.r#type),
            dvd: available(raw.dvd),
            box_office: available(raw.box_office),
            production: available(raw.production),
            website: available(raw.website),
        }
    }
}
