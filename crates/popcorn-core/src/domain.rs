use std::fmt;

/// Telegram user id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

/// Telegram chat id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

/// Telegram message id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageId(pub i32);

/// A stable reference to a Telegram message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub chat_id: ChatId,
    pub message_id: MessageId,
}

/// A channel the bot can query membership in: either a public `@handle` or a
/// numeric id (private channels, `-100...`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ChannelRef {
    Handle(String),
    Id(i64),
}

impl ChannelRef {
    /// Parse a configured channel identifier. Anything that is not an integer
    /// is treated as a handle; a missing `@` is added.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(id) = raw.parse::<i64>() {
            return Some(Self::Id(id));
        }
        let handle = raw.trim_start_matches('@');
        if handle.is_empty() {
            return None;
        }
        Some(Self::Handle(format!("@{handle}")))
    }

    /// The path segment used in `https://t.me/<slug>` links.
    pub fn link_slug(&self) -> String {
        match self {
            Self::Handle(h) => h.trim_start_matches('@').to_string(),
            Self::Id(id) => id.to_string(),
        }
    }
}

impl fmt::Display for ChannelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Handle(h) => f.write_str(h),
            Self::Id(id) => write!(f, "{id}"),
        }
    }
}

/// The user behind an inbound update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Actor {
    pub user_id: UserId,
    pub full_name: String,
    pub username: Option<String>,
}
