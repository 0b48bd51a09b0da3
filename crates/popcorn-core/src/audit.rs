//! Operator notifications for new users.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::{
    domain::{Actor, ChatId},
    formatting::{bold, code, escape_html},
    messaging::{port::MessagingPort, types::Screen},
};

/// Best-effort "new user started the bot" notifier.
///
/// Disabled when no operator channel is configured. Delivery errors are logged
/// and otherwise ignored.
#[derive(Clone)]
pub struct AuditNotifier {
    messenger: Arc<dyn MessagingPort>,
    channel: Option<ChatId>,
}

impl AuditNotifier {
    pub fn new(messenger: Arc<dyn MessagingPort>, channel: Option<ChatId>) -> Self {
        Self { messenger, channel }
    }

    pub fn is_enabled(&self) -> bool {
        self.channel.is_some()
    }

    /// Fire-and-forget variant of [`Self::notify_start`].
    pub fn spawn_notify_start(&self, actor: &Actor) -> Option<JoinHandle<()>> {
        if !self.is_enabled() {
            return None;
        }
        let this = self.clone();
        let actor = actor.clone();
        Some(tokio::spawn(async move { this.notify_start(&actor).await }))
    }

    pub async fn notify_start(&self, actor: &Actor) {
        let Some(channel) = self.channel else {
            return;
        };

        let screen = Screen::text(start_notice(actor));
        if let Err(e) = self.messenger.send_screen(channel, &screen).await {
            tracing::warn!(
                user_id = actor.user_id.0,
                channel = channel.0,
                error = %e,
                "audit notification failed"
            );
        }
    }
}

fn start_notice(actor: &Actor) -> String {
    let username = actor.username.as_deref().unwrap_or("No Username");
    format!(
        "📥 {}\n\n👤 Name: {}\n🧾 Username: @{}\n🆔 ID: {}",
        bold("New User Started Bot"),
        escape_html(&actor.full_name),
        escape_html(username),
        code(&actor.user_id.0.to_string())
    )
}
