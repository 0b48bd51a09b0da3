//! Movie-metadata port and the read-only projections of its responses.

use std::fmt;

use async_trait::async_trait;
use serde::Deserialize;

/// Outcome of one metadata read: either a page of results or an explicit
/// "no data" with the reason. Unavailable is never an empty page.
#[derive(Clone, Debug, PartialEq)]
pub enum Lookup<T> {
    Ready(T),
    Unavailable(Unavailable),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Unavailable {
    MissingApiKey,
    Status(u16),
    Transport(String),
    Decode(String),
}

impl fmt::Display for Unavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingApiKey => f.write_str("no API key configured"),
            Self::Status(code) => write!(f, "upstream returned HTTP {code}"),
            Self::Transport(e) => write!(f, "request failed: {e}"),
            Self::Decode(e) => write!(f, "unreadable response: {e}"),
        }
    }
}

impl<T> Lookup<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(v) => Some(v),
            Self::Unavailable(_) => None,
        }
    }
}

/// A page of results (`{"results": [...]}`).
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct MediaPage {
    #[serde(default)]
    pub results: Vec<MediaItem>,
}

/// One movie / series / person entry. Movies carry `title` + `release_date`,
/// series carry `name` + `first_air_date`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct MediaItem {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl MediaItem {
    pub fn display_title(&self) -> Option<&str> {
        present(&self.title).or_else(|| present(&self.name))
    }

    pub fn any_date(&self) -> Option<&str> {
        present(&self.release_date).or_else(|| present(&self.first_air_date))
    }

    pub fn release_date(&self) -> Option<&str> {
        present(&self.release_date)
    }

    pub fn overview(&self) -> Option<&str> {
        present(&self.overview)
    }

    pub fn poster_path(&self) -> Option<&str> {
        present(&self.poster_path)
    }
}

/// Empty strings count as absent (TMDB sends `""` for unknown dates).
fn present(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.trim().is_empty())
}

/// Read-only metadata service port.
#[async_trait]
pub trait MetadataPort: Send + Sync {
    /// Whether reads can reach the upstream at all (an API key is configured).
    fn is_configured(&self) -> bool;

    /// Multi-type (movie, tv, person) free-text search.
    async fn search(&self, query: &str) -> Lookup<MediaPage>;

    /// Weekly trending across all media types.
    async fn trending(&self) -> Lookup<MediaPage>;

    /// Movies currently in theatres.
    async fn now_playing(&self) -> Lookup<MediaPage>;
}
