//! Telegram update handlers.
//!
//! Each handler only translates a teloxide update into a core
//! `IncomingUpdate` and hands it to the event router.

use std::sync::Arc;

use teloxide::{
    prelude::*,
    types::{CallbackQuery, Message, User},
};

use popcorn_core::{
    domain::{Actor, ChatId, MessageId, MessageRef, UserId},
    messaging::types::{self, IncomingUpdate, StartCommand, TextMessage},
};

use crate::router::AppState;

pub async fn handle_callback(q: CallbackQuery, state: Arc<AppState>) -> ResponseResult<()> {
    dispatch(&state, callback_update(&q)).await
}

pub async fn handle_message(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(update) = message_update(&msg, &state.bot_username) else {
        return Ok(());
    };
    dispatch(&state, update).await
}

async fn dispatch(state: &AppState, update: IncomingUpdate) -> ResponseResult<()> {
    if let Err(e) = state.router.handle(update).await {
        tracing::error!(error = %e, "failed to handle update");
    }
    Ok(())
}

fn actor(user: &User) -> Actor {
    Actor {
        user_id: UserId(user.id.0 as i64),
        full_name: user.full_name(),
        username: user.username.clone(),
    }
}

fn callback_update(q: &CallbackQuery) -> IncomingUpdate {
    IncomingUpdate::Callback(types::CallbackQuery {
        actor: actor(&q.from),
        callback_id: q.id.clone(),
        data: q.data.clone().unwrap_or_default(),
        message: q.message.as_ref().map(|m| MessageRef {
            chat_id: ChatId(m.chat.id.0),
            message_id: MessageId(m.id.0),
        }),
    })
}

fn message_update(msg: &Message, bot_username: &str) -> Option<IncomingUpdate> {
    let user = msg.from()?;
    let text = msg.text()?;
    let chat_id = ChatId(msg.chat.id.0);

    let update = match classify_text(text, bot_username)? {
        TextKind::Start => IncomingUpdate::Start(StartCommand {
            chat_id,
            actor: actor(user),
        }),
        TextKind::Search => IncomingUpdate::Text(TextMessage {
            chat_id,
            actor: actor(user),
            text: text.to_string(),
        }),
    };
    Some(update)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TextKind {
    Start,
    Search,
}

/// Only `/start` for this bot and plain text reach the router; other commands,
/// including `/start@OtherBot`, are dropped.
fn classify_text(text: &str, bot_username: &str) -> Option<TextKind> {
    if !text.starts_with('/') {
        return Some(TextKind::Search);
    }
    let cmd = parse_command(text);
    let for_us = cmd
        .target
        .as_deref()
        .map_or(true, |t| t.eq_ignore_ascii_case(bot_username));
    (for_us && cmd.name == "start").then_some(TextKind::Start)
}

#[derive(Debug, PartialEq, Eq)]
struct ParsedCommand {
    name: String,
    /// Bot named in `/cmd@botname`, if any.
    target: Option<String>,
    args: String,
}

fn parse_command(text: &str) -> ParsedCommand {
    // Telegram may send `/cmd@botname arg1 ...`
    let mut parts = text.trim().splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("").trim();
    let args = parts.next().unwrap_or("").trim().to_string();

    let mut head = first.trim_start_matches('/').splitn(2, '@');
    let name = head.next().unwrap_or("").to_lowercase();
    let target = head.next().filter(|t| !t.is_empty()).map(str::to_string);

    ParsedCommand { name, target, args }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(name: &str, target: Option<&str>, args: &str) -> ParsedCommand {
        ParsedCommand {
            name: name.into(),
            target: target.map(str::to_string),
            args: args.into(),
        }
    }

    #[test]
    fn parses_plain_and_addressed_commands() {
        assert_eq!(parse_command("/start"), cmd("start", None, ""));
        assert_eq!(
            parse_command("/start@PopcornMovieBot"),
            cmd("start", Some("PopcornMovieBot"), "")
        );
        assert_eq!(
            parse_command("/START  ref_123 "),
            cmd("start", None, "ref_123")
        );
        assert_eq!(parse_command("/help me"), cmd("help", None, "me"));
    }

    #[test]
    fn start_counts_only_when_addressed_to_this_bot() {
        let me = "PopcornMovieBot";
        assert_eq!(classify_text("/start", me), Some(TextKind::Start));
        assert_eq!(classify_text("/start ref", me), Some(TextKind::Start));
        assert_eq!(
            classify_text("/start@popcornmoviebot", me),
            Some(TextKind::Start)
        );
        assert_eq!(classify_text("/start@SomeOtherBot", me), None);
    }

    #[test]
    fn other_commands_drop_and_plain_text_searches() {
        let me = "PopcornMovieBot";
        assert_eq!(classify_text("/help", me), None);
        assert_eq!(classify_text("Inception", me), Some(TextKind::Search));
    }
}
