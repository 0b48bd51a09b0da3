//! TMDB adapter (movie metadata).
//!
//! Implements the `popcorn-core` MetadataPort over the TMDB v3 REST API.
//! Every failure becomes `Lookup::Unavailable`; nothing here returns an error.

use async_trait::async_trait;

use popcorn_core::{
    config::Config,
    errors::Error,
    metadata::{Lookup, MediaPage, MetadataPort, Unavailable},
    Result,
};

#[derive(Clone, Debug)]
pub struct TmdbClient {
    api_key: Option<String>,
    base_url: String,
    language: String,
    http: reqwest::Client,
}

impl TmdbClient {
    pub fn new(
        api_key: Option<String>,
        base_url: impl Into<String>,
        language: impl Into<String>,
    ) -> Result<Self> {
        // No explicit timeout: reqwest defaults apply.
        let http = reqwest::Client::builder()
            .user_agent(concat!("popcorn/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::External(format!("http client build failed: {e}")))?;
        Ok(Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            language: language.into(),
            http,
        })
    }

    pub fn from_config(cfg: &Config) -> Result<Self> {
        Self::new(
            cfg.tmdb_api_key.clone(),
            cfg.tmdb_base_url.clone(),
            cfg.tmdb_language.clone(),
        )
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_page(&self, path: &str, extra: &[(&str, &str)]) -> Lookup<MediaPage> {
        let Some(key) = self.api_key.as_deref() else {
            return Lookup::Unavailable(Unavailable::MissingApiKey);
        };

        let mut query: Vec<(&str, &str)> =
            vec![("api_key", key), ("language", self.language.as_str())];
        query.extend_from_slice(extra);

        let resp = match self.http.get(self.endpoint(path)).query(&query).send().await {
            Ok(r) => r,
            Err(e) => {
                // reqwest errors can echo the URL, which carries the key.
                return Lookup::Unavailable(Unavailable::Transport(
                    e.without_url().to_string(),
                ));
            }
        };

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            tracing::debug!(path, status = status.as_u16(), "tmdb request rejected");
            return Lookup::Unavailable(Unavailable::Status(status.as_u16()));
        }

        let body = match resp.text().await {
            Ok(b) => b,
            Err(e) => {
                return Lookup::Unavailable(Unavailable::Transport(e.without_url().to_string()))
            }
        };
        decode_page(&body)
    }
}

fn decode_page(body: &str) -> Lookup<MediaPage> {
    match serde_json::from_str::<MediaPage>(body) {
        Ok(page) => Lookup::Ready(page),
        Err(e) => Lookup::Unavailable(Unavailable::Decode(e.to_string())),
    }
}

#[async_trait]
impl MetadataPort for TmdbClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn search(&self, query: &str) -> Lookup<MediaPage> {
        self.get_page("search/multi", &[("query", query)]).await
    }

    async fn trending(&self) -> Lookup<MediaPage> {
        self.get_page("trending/all/week", &[]).await
    }

    async fn now_playing(&self) -> Lookup<MediaPage> {
        self.get_page("movie/now_playing", &[]).await
    }
}
