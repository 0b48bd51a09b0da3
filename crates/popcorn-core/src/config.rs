use std::env;

use crate::{
    domain::{ChannelRef, ChatId},
    errors::Error,
    Result,
};

const DEFAULT_PUBLIC_CHANNEL: &str = "@yourpublic";
const DEFAULT_PRIVATE_CHANNEL: &str = "-100123";
const DEFAULT_BOT_USERNAME: &str = "PopcornMovieBot";
const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
const DEFAULT_TMDB_IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";
const DEFAULT_TMDB_LANGUAGE: &str = "en-US";

/// Typed, immutable configuration, read once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    // Core
    pub bot_token: String,
    pub bot_username: String,

    // Gate
    pub public_channel: ChannelRef,
    pub private_channel: ChannelRef,
    pub private_invite: Option<String>,
    pub helper_bot_username: String,
    /// Re-apply the gate on trending / now-playing buttons.
    pub gate_content_callbacks: bool,

    // Audit
    pub log_channel: Option<ChatId>,

    // TMDB
    pub tmdb_api_key: Option<String>,
    pub tmdb_base_url: String,
    pub tmdb_image_base: String,
    pub tmdb_language: String,
}

impl Config {
    /// Load from `.env` (if present) and the process environment.
    pub fn load() -> Result<Self> {
        // Existing env vars win over `.env` entries.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).and_then(non_empty);

        let bot_token = get("BOT_TOKEN").ok_or_else(|| {
            Error::Config("BOT_TOKEN environment variable is required".to_string())
        })?;

        let public_channel = channel(&get, "PUBLIC_CHANNEL", DEFAULT_PUBLIC_CHANNEL)?;
        let private_channel = channel(&get, "PRIVATE_CHANNEL", DEFAULT_PRIVATE_CHANNEL)?;

        // 0 (the historical default) means "no audit channel".
        let log_channel = get("LOG_GROUP_ID")
            .and_then(|s| s.trim().parse::<i64>().ok())
            .filter(|id| *id != 0)
            .map(ChatId);

        Ok(Self {
            bot_token,
            bot_username: get("BOT_USERNAME")
                .map(|s| s.trim_start_matches('@').to_string())
                .unwrap_or_else(|| DEFAULT_BOT_USERNAME.to_string()),
            public_channel,
            private_channel,
            private_invite: get("PRIVATE_INVITE"),
            helper_bot_username: get("SECOND_BOT_USERNAME")
                .map(|s| s.trim_start_matches('@').to_string())
                .unwrap_or_default(),
            gate_content_callbacks: get("GATE_CONTENT_CALLBACKS")
                .map(|s| parse_bool(&s))
                .unwrap_or(false),
            log_channel,
            tmdb_api_key: get("TMDB_API_KEY"),
            tmdb_base_url: get("TMDB_BASE_URL")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_TMDB_BASE_URL.to_string()),
            tmdb_image_base: get("TMDB_IMAGE_BASE")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_TMDB_IMAGE_BASE.to_string()),
            tmdb_language: get("TMDB_LANGUAGE")
                .unwrap_or_else(|| DEFAULT_TMDB_LANGUAGE.to_string()),
        })
    }

    pub fn search_enabled(&self) -> bool {
        self.tmdb_api_key.is_some()
    }
}

fn channel(
    get: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<ChannelRef> {
    if let Some(raw) = get(key) {
        match ChannelRef::parse(&raw) {
            Some(parsed) => return Ok(parsed),
            None => tracing::warn!(key, value = %raw, default, "invalid channel, using default"),
        }
    }
    ChannelRef::parse(default)
        .ok_or_else(|| Error::Config(format!("{key} default is not a channel: {default:?}")))
}

fn parse_bool(s: &str) -> bool {
    matches!(
        s.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s.trim().to_string())
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "BOT_TOKEN" => Some("123:abc".to_string()),
        "PUBLIC_CHANNEL" => Some("@popcorn_pub".to_string()),
        "PRIVATE_CHANNEL" => Some("-100999".to_string()),
        "PRIVATE_INVITE" => Some("https://t.me/+invite".to_string()),
        "SECOND_BOT_USERNAME" => Some("HelperBot".to_string()),
        "LOG_GROUP_ID" => Some("-100777".to_string()),
        "TMDB_API_KEY" => Some("k".to_string()),
        _ => None,
    })
    .expect("test config")
}
