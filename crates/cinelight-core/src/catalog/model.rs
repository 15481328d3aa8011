//! Catalog domain models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of items the catalog returns per result page.
pub const PAGE_SIZE: u32 = 10;

const IMDB_TITLE_URL: &str = "https://www.imdb.com/title";

/// Kind of catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Series,
    Episode,
    Game,
    /// Any kind the service reports that we do not model explicitly.
    Other(String),
}

impl MediaType {
    /// Parses the service's type label. Unknown labels are preserved.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "movie" => Self::Movie,
            "series" => Self::Series,
            "episode" => Self::Episode,
            "game" => Self::Game,
            _ => Self::Other(label.trim().to_string()),
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Movie => write!(f, "movie"),
            Self::Series => write!(f, "series"),
            Self::Episode => write!(f, "episode"),
            Self::Game => write!(f, "game"),
            Self::Other(label) => write!(f, "{}", label),
        }
    }
}

/// A single search hit. Identity is the IMDb id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub title: String,
    pub year: String,
    pub imdb_id: String,
    pub media_type: MediaType,
    /// Absent when the service has no poster for this title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
}

impl MovieSummary {
    /// Card label, e.g. `Batman Begins (2005)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.title, self.year)
    }
}

/// One rating source and its value, e.g. `Rotten Tomatoes` / `85%`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub source: String,
    pub value: String,
}

/// Full record for one title, fetched lazily when the user opens it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub title: String,
    pub year: String,
    pub rated: String,
    pub released: String,
    pub runtime: String,
    pub genre: String,
    pub director: String,
    pub writer: String,
    pub actors: String,
    pub plot: String,
    pub language: String,
    pub country: String,
    pub awards: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    pub ratings: Vec<Rating>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metascore: Option<String>,
    pub imdb_rating: String,
    pub imdb_votes: String,
    pub imdb_id: String,
    pub media_type: MediaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dvd: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub box_office: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub production: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl MovieDetail {
    /// Link to the title's IMDb page.
    pub fn imdb_url(&self) -> String {
        format!("{}/{}", IMDB_TITLE_URL, self.imdb_id)
    }

    /// Labelled attributes in display order.
    pub fn info_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("Title", self.title.as_str()),
            ("Year", self.year.as_str()),
            ("Country", self.country.as_str()),
            ("Genres", self.genre.as_str()),
            ("Language", self.language.as_str()),
            ("Release Date", self.released.as_str()),
            ("Runtime", self.runtime.as_str()),
            ("Director", self.director.as_str()),
            ("Writer", self.writer.as_str()),
            ("Actors", self.actors.as_str()),
        ]
    }
}

/// One page of search results as reported by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPage {
    /// Items in service order, at most [`PAGE_SIZE`].
    pub items: Vec<MovieSummary>,
    /// Total number of matches for the query across all pages.
    pub total_results: u32,
}

/// Number of pages needed to show `total_results` items.
pub fn total_pages(total_results: u32) -> u32 {
    total_results.div_ceil(PAGE_SIZE)
}
