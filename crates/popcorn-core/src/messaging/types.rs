use crate::{
    callback::CallbackAction,
    domain::{Actor, ChatId, MessageRef},
};

/// Transport-agnostic inbound update.
///
/// Telegram-specific fields stay in the Telegram adapter.
#[derive(Clone, Debug)]
pub enum IncomingUpdate {
    Start(StartCommand),
    Text(TextMessage),
    Callback(CallbackQuery),
}

#[derive(Clone, Debug)]
pub struct StartCommand {
    pub chat_id: ChatId,
    pub actor: Actor,
}

#[derive(Clone, Debug)]
pub struct TextMessage {
    pub chat_id: ChatId,
    pub actor: Actor,
    pub text: String,
}

#[derive(Clone, Debug)]
pub struct CallbackQuery {
    pub actor: Actor,
    pub callback_id: String,
    pub data: String,
    /// The message carrying the pressed button, when the transport exposes it.
    pub message: Option<MessageRef>,
}

/// A user's standing in a channel, as reported by the transport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemberStatus {
    Creator,
    Administrator,
    Member,
    Restricted,
    Left,
    Kicked,
}

impl MemberStatus {
    /// Statuses that satisfy the join requirement.
    pub fn counts_as_joined(self) -> bool {
        matches!(self, Self::Creator | Self::Administrator | Self::Member)
    }
}

/// A complete outgoing message: HTML text plus optional buttons.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Screen {
    pub html: String,
    pub keyboard: Option<InlineKeyboard>,
}

impl Screen {
    pub fn text(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            keyboard: None,
        }
    }

    pub fn with_keyboard(html: impl Into<String>, keyboard: InlineKeyboard) -> Self {
        Self {
            html: html.into(),
            keyboard: Some(keyboard),
        }
    }
}

/// Inline keyboard laid out as rows of buttons.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineKeyboard {
    pub rows: Vec<Vec<InlineButton>>,
}

impl InlineKeyboard {
    pub fn new(rows: Vec<Vec<InlineButton>>) -> Self {
        Self { rows }
    }

    pub fn buttons(&self) -> impl Iterator<Item = &InlineButton> {
        self.rows.iter().flatten()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineButton {
    pub label: String,
    pub kind: ButtonKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ButtonKind {
    Callback(CallbackAction),
    Url(String),
    /// Pre-fill the chat's inline-query box with this text.
    SwitchInlineQueryCurrentChat(String),
}

impl InlineButton {
    pub fn callback(label: impl Into<String>, action: CallbackAction) -> Self {
        Self {
            label: label.into(),
            kind: ButtonKind::Callback(action),
        }
    }

    pub fn url(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: ButtonKind::Url(url.into()),
        }
    }

    pub fn switch_inline_current_chat(label: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: ButtonKind::SwitchInlineQueryCurrentChat(query.into()),
        }
    }
}

/// Capabilities / limits of a transport implementation.
#[derive(Clone, Copy, Debug)]
pub struct MessagingCapabilities {
    pub max_message_len: usize,
    pub max_caption_len: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_member_like_statuses_count() {
        assert!(MemberStatus::Creator.counts_as_joined());
        assert!(MemberStatus::Administrator.counts_as_joined());
        assert!(MemberStatus::Member.counts_as_joined());
        assert!(!MemberStatus::Restricted.counts_as_joined());
        assert!(!MemberStatus::Left.counts_as_joined());
        assert!(!MemberStatus::Kicked.counts_as_joined());
    }
}
