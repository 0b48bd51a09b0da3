//! Screen rendering: every message payload the bot sends.
//!
//! All dynamic values are HTML-escaped; the transport sends in HTML parse mode.

use crate::{
    callback::CallbackAction,
    config::Config,
    formatting::{bold, escape_html, truncate_text},
    messaging::types::{InlineButton, InlineKeyboard, Screen},
    metadata::{Lookup, MediaItem, MediaPage},
};

/// Max entries shown on the trending / now-playing lists.
pub const LIST_LIMIT: usize = 10;

pub const NO_SEARCH_RESULT: &str = "❌ कोई रिज़ल्ट नहीं मिला।";
const NO_OVERVIEW: &str = "No description available.";
const UNKNOWN_TITLE: &str = "Unknown";
const NO_DATE: &str = "N/A";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListKind {
    Trending,
    NowPlaying,
}

impl ListKind {
    fn header(self) -> &'static str {
        match self {
            Self::Trending => "🔥 Trending This Week:",
            Self::NowPlaying => "🎬 Now Playing in Theatres:",
        }
    }

    pub fn empty_text(self) -> &'static str {
        match self {
            Self::Trending => "No trending results found.",
            Self::NowPlaying => "No now playing results found.",
        }
    }

    fn date_of(self, item: &MediaItem) -> &str {
        let date = match self {
            Self::Trending => item.any_date(),
            // Theatrical list only has movies.
            Self::NowPlaying => item.release_date(),
        };
        date.unwrap_or(NO_DATE)
    }
}

/// What to send back for a search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchReply {
    /// `caption` fits the transport's caption limit; `text` is the full
    /// caption, used when the image cannot be delivered.
    Photo {
        url: String,
        caption: String,
        text: String,
    },
    Text(String),
    NoResult,
}

/// Builds screens from the (immutable) link configuration.
#[derive(Clone, Debug)]
pub struct ScreenRenderer {
    public_channel_url: String,
    private_invite_url: String,
    helper_bot_url: String,
    share_url: String,
    image_base: String,
    caption_limit: Option<usize>,
}

impl ScreenRenderer {
    pub fn new(cfg: &Config) -> Self {
        Self {
            public_channel_url: format!("https://t.me/{}", cfg.public_channel.link_slug()),
            private_invite_url: cfg
                .private_invite
                .clone()
                .unwrap_or_else(|| "https://t.me/".to_string()),
            helper_bot_url: format!("https://t.me/{}?start=start", cfg.helper_bot_username),
            share_url: format!(
                "https://t.me/share/url?url=https://t.me/{}",
                cfg.bot_username
            ),
            image_base: cfg.tmdb_image_base.clone(),
            caption_limit: None,
        }
    }

    /// Cap visible photo-caption length (Telegram: 1024 characters).
    pub fn with_caption_limit(mut self, max_chars: usize) -> Self {
        self.caption_limit = Some(max_chars);
        self
    }

    pub fn force_join(&self) -> Screen {
        let html = format!(
            "⚠️ {}\n\n\
             कृपया नीचे दिए गए चरण पूरे करें:\n\
             1️⃣ Public Channel Join करें\n\
             2️⃣ Private Channel Join करें\n\
             3️⃣ Helper Bot को Start करें\n\n\
             फिर '✅ I Completed All' पर क्लिक करें ✅",
            bold("आपने सभी स्टेप पूरे नहीं किए हैं!")
        );
        let keyboard = InlineKeyboard::new(vec![
            vec![InlineButton::url(
                "📢 Join Public Channel",
                &self.public_channel_url,
            )],
            vec![InlineButton::url(
                "🔒 Join Private Channel",
                &self.private_invite_url,
            )],
            vec![InlineButton::url("🤖 Start Helper Bot", &self.helper_bot_url)],
            vec![InlineButton::callback(
                "✅ I Completed All",
                CallbackAction::Recheck,
            )],
        ]);
        Screen::with_keyboard(html, keyboard)
    }

    pub fn welcome(&self) -> Screen {
        let html = format!(
            "{}\n\n\
             अब आप कोई भी मूवी या वेब सीरीज़ सर्च कर सकते हैं!\n\
             👇 नीचे दिए गए बटन से शुरू करें 👇",
            bold("🍿 WELCOME TO POPCORN BOT 🎬")
        );
        let keyboard = InlineKeyboard::new(vec![
            vec![InlineButton::switch_inline_current_chat(
                "🔎 Search Movies or Series",
                "",
            )],
            vec![
                InlineButton::callback("🔥 Trending", CallbackAction::Trending),
                InlineButton::callback("🎬 Now Playing", CallbackAction::NowPlaying),
            ],
            vec![InlineButton::url("📢 Share Bot", &self.share_url)],
        ]);
        Screen::with_keyboard(html, keyboard)
    }

    /// Numbered list of at most [`LIST_LIMIT`] entries, or the fixed empty text.
    pub fn media_list(&self, kind: ListKind, lookup: &Lookup<MediaPage>) -> Screen {
        let items = match lookup {
            Lookup::Ready(page) if !page.results.is_empty() => &page.results,
            Lookup::Ready(_) | Lookup::Unavailable(_) => {
                return Screen::text(kind.empty_text());
            }
        };

        let mut html = format!("{}\n\n", bold(kind.header()));
        for (rank, item) in items.iter().take(LIST_LIMIT).enumerate() {
            let title = item.display_title().unwrap_or(UNKNOWN_TITLE);
            html.push_str(&format!(
                "{}. {} ({})\n",
                rank + 1,
                bold(title),
                escape_html(kind.date_of(item))
            ));
        }
        Screen::text(html)
    }

    pub fn searching(&self, query: &str) -> Screen {
        Screen::text(format!("🔍 Searching for {} ...", bold(query)))
    }

    /// Reply used when no API key is configured: echo the query back.
    pub fn search_echo(&self, query: &str) -> Screen {
        Screen::text(format!("🔍 You searched: {}", bold(query)))
    }

    /// Render the top match only; further results are ignored.
    pub fn search_result(&self, lookup: &Lookup<MediaPage>) -> SearchReply {
        let Some(item) = lookup.ready().and_then(|page| page.results.first()) else {
            return SearchReply::NoResult;
        };

        let title = item.display_title().unwrap_or(UNKNOWN_TITLE);
        let overview = item.overview().unwrap_or(NO_OVERVIEW);
        let text = format_caption(title, overview);

        let Some(path) = item.poster_path() else {
            return SearchReply::Text(text);
        };

        // Limits count visible characters, so budget on the unescaped overview.
        let title_len = title.chars().count();
        let caption = match self.caption_limit {
            Some(limit) if title_len + 2 + overview.chars().count() > limit => {
                let budget = limit.saturating_sub(title_len + 2);
                // No room for even "x..." of overview: the caption is the title alone.
                if budget <= 3 {
                    bold(&truncate_text(title, limit))
                } else {
                    format_caption(title, &truncate_text(overview, budget))
                }
            }
            _ => text.clone(),
        };

        SearchReply::Photo {
            url: format!("{}{}", self.image_base, path),
            caption,
            text,
        }
    }
}

fn format_caption(title: &str, overview: &str) -> String {
    format!("{}\n\n{}", bold(title), escape_html(overview))
}
