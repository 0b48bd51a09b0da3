//! Telegram adapter (teloxide).
//!
//! This crate implements the `popcorn-core` MessagingPort over the Telegram Bot API
//! and feeds Telegram updates into the core event router.

use async_trait::async_trait;

use teloxide::{
    prelude::*,
    types::{
        ChatMemberStatus, InlineKeyboardButton, InlineKeyboardMarkup, InputFile, ParseMode,
        Recipient,
    },
};

pub mod handlers;
pub mod router;

use popcorn_core::{
    domain::{ChannelRef, ChatId, MessageId, MessageRef, UserId},
    errors::Error,
    messaging::{
        port::MessagingPort,
        types::{ButtonKind, InlineKeyboard, MemberStatus, MessagingCapabilities, Screen},
    },
    Result,
};

#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    pub fn bot(&self) -> Bot {
        self.bot.clone()
    }

    fn tg_chat(chat_id: ChatId) -> teloxide::types::ChatId {
        teloxide::types::ChatId(chat_id.0)
    }

    fn tg_msg_id(message_id: MessageId) -> teloxide::types::MessageId {
        teloxide::types::MessageId(message_id.0)
    }

    fn map_err(e: teloxide::RequestError) -> Error {
        Error::External(format!("telegram error: {e}"))
    }
}

fn recipient(channel: &ChannelRef) -> Recipient {
    match channel {
        ChannelRef::Handle(h) => Recipient::ChannelUsername(h.clone()),
        ChannelRef::Id(id) => Recipient::Id(teloxide::types::ChatId(*id)),
    }
}

fn member_status(status: ChatMemberStatus) -> MemberStatus {
    match status {
        ChatMemberStatus::Owner => MemberStatus::Creator,
        ChatMemberStatus::Administrator => MemberStatus::Administrator,
        ChatMemberStatus::Member => MemberStatus::Member,
        ChatMemberStatus::Restricted => MemberStatus::Restricted,
        ChatMemberStatus::Left => MemberStatus::Left,
        ChatMemberStatus::Banned => MemberStatus::Kicked,
    }
}

fn parse_url(raw: &str) -> Result<reqwest::Url> {
    reqwest::Url::parse(raw).map_err(|e| Error::External(format!("invalid url {raw:?}: {e}")))
}

fn markup(keyboard: &InlineKeyboard) -> Result<InlineKeyboardMarkup> {
    let mut rows = Vec::with_capacity(keyboard.rows.len());
    for row in &keyboard.rows {
        let mut buttons = Vec::with_capacity(row.len());
        for b in row {
            let button = match &b.kind {
                ButtonKind::Callback(action) => {
                    InlineKeyboardButton::callback(b.label.clone(), action.as_data())
                }
                ButtonKind::Url(url) => InlineKeyboardButton::url(b.label.clone(), parse_url(url)?),
                ButtonKind::SwitchInlineQueryCurrentChat(query) => {
                    InlineKeyboardButton::switch_inline_query_current_chat(
                        b.label.clone(),
                        query.clone(),
                    )
                }
            };
            buttons.push(button);
        }
        rows.push(buttons);
    }
    Ok(InlineKeyboardMarkup::new(rows))
}

#[async_trait]
impl MessagingPort for TelegramMessenger {
    fn capabilities(&self) -> MessagingCapabilities {
        MessagingCapabilities {
            max_message_len: 4096,
            max_caption_len: 1024,
        }
    }

    async fn send_screen(&self, chat_id: ChatId, screen: &Screen) -> Result<MessageRef> {
        let mut req = self
            .bot
            .send_message(Self::tg_chat(chat_id), screen.html.clone())
            .parse_mode(ParseMode::Html);
        if let Some(kb) = &screen.keyboard {
            req = req.reply_markup(markup(kb)?);
        }
        let msg = req.await.map_err(Self::map_err)?;

        Ok(MessageRef {
            chat_id,
            message_id: MessageId(msg.id.0),
        })
    }

    async fn edit_screen(&self, msg: MessageRef, screen: &Screen) -> Result<()> {
        let mut req = self
            .bot
            .edit_message_text(
                Self::tg_chat(msg.chat_id),
                Self::tg_msg_id(msg.message_id),
                screen.html.clone(),
            )
            .parse_mode(ParseMode::Html);
        // Without a markup the old buttons are removed.
        if let Some(kb) = &screen.keyboard {
            req = req.reply_markup(markup(kb)?);
        }
        req.await.map_err(Self::map_err)?;
        Ok(())
    }

    async fn send_photo(
        &self,
        chat_id: ChatId,
        photo_url: &str,
        caption_html: &str,
    ) -> Result<MessageRef> {
        let photo = InputFile::url(parse_url(photo_url)?);
        let msg = self
            .bot
            .send_photo(Self::tg_chat(chat_id), photo)
            .caption(caption_html.to_string())
            .parse_mode(ParseMode::Html)
            .await
            .map_err(Self::map_err)?;

        Ok(MessageRef {
            chat_id,
            message_id: MessageId(msg.id.0),
        })
    }

    async fn answer_callback_query(&self, callback_id: &str, text: Option<&str>) -> Result<()> {
        let mut req = self.bot.answer_callback_query(callback_id.to_string());
        if let Some(t) = text {
            req = req.text(t.to_string());
        }
        req.await.map_err(Self::map_err)?;
        Ok(())
    }

    async fn member_status(&self, channel: &ChannelRef, user_id: UserId) -> Result<MemberStatus> {
        let user = teloxide::types::UserId(
            u64::try_from(user_id.0)
                .map_err(|_| Error::External(format!("invalid user id {}", user_id.0)))?,
        );
        let member = self
            .bot
            .get_chat_member(recipient(channel), user)
            .await
            .map_err(Self::map_err)?;
        Ok(member_status(member.status()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use popcorn_core::{callback::CallbackAction, messaging::types::InlineButton};

    #[test]
    fn owner_counts_as_creator_and_banned_as_kicked() {
        assert_eq!(member_status(ChatMemberStatus::Owner), MemberStatus::Creator);
        assert_eq!(member_status(ChatMemberStatus::Banned), MemberStatus::Kicked);
        assert!(member_status(ChatMemberStatus::Administrator).counts_as_joined());
        assert!(!member_status(ChatMemberStatus::Restricted).counts_as_joined());
    }

    #[test]
    fn channels_map_to_recipients() {
        assert!(matches!(
            recipient(&ChannelRef::Handle("@popcorn".into())),
            Recipient::ChannelUsername(h) if h == "@popcorn"
        ));
        assert!(matches!(
            recipient(&ChannelRef::Id(-100123)),
            Recipient::Id(teloxide::types::ChatId(-100123))
        ));
    }

    #[test]
    fn keyboard_keeps_row_layout() {
        let kb = InlineKeyboard::new(vec![
            vec![InlineButton::switch_inline_current_chat("search", "")],
            vec![
                InlineButton::callback("a", CallbackAction::Trending),
                InlineButton::callback("b", CallbackAction::NowPlaying),
            ],
            vec![InlineButton::url("share", "https://t.me/share/url?url=x")],
        ]);
        let m = markup(&kb).unwrap();
        let sizes: Vec<usize> = m.inline_keyboard.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![1, 2, 1]);
    }

    #[test]
    fn malformed_button_url_is_an_error() {
        let kb = InlineKeyboard::new(vec![vec![InlineButton::url("bad", "not a url")]]);
        assert!(matches!(markup(&kb), Err(Error::External(_))));
    }
}
