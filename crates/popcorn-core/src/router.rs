//! Event router: one inbound update in, one screen (or edit) out.
//!
//! The router keeps no memory of earlier screens. Every decision comes from
//! the update type and a freshly computed membership verdict.

use std::sync::Arc;

use crate::{
    audit::AuditNotifier,
    callback::CallbackAction,
    config::Config,
    domain::{ChatId, MessageRef},
    gate::MembershipGate,
    messaging::{
        port::MessagingPort,
        types::{CallbackQuery, IncomingUpdate, Screen, StartCommand, TextMessage},
    },
    metadata::{Lookup, MetadataPort},
    screens::{ListKind, ScreenRenderer, SearchReply, NO_SEARCH_RESULT},
    Result,
};

#[derive(Clone)]
pub struct EventRouter {
    messenger: Arc<dyn MessagingPort>,
    metadata: Arc<dyn MetadataPort>,
    gate: MembershipGate,
    screens: ScreenRenderer,
    audit: AuditNotifier,
    gate_content_callbacks: bool,
}

impl EventRouter {
    pub fn new(
        cfg: &Config,
        messenger: Arc<dyn MessagingPort>,
        metadata: Arc<dyn MetadataPort>,
    ) -> Self {
        let caption_limit = messenger.capabilities().max_caption_len;
        Self {
            gate: MembershipGate::new(cfg, messenger.clone()),
            screens: ScreenRenderer::new(cfg).with_caption_limit(caption_limit),
            audit: AuditNotifier::new(messenger.clone(), cfg.log_channel),
            gate_content_callbacks: cfg.gate_content_callbacks,
            messenger,
            metadata,
        }
    }

    pub async fn handle(&self, update: IncomingUpdate) -> Result<()> {
        match update {
            IncomingUpdate::Start(cmd) => self.on_start(cmd).await,
            IncomingUpdate::Callback(q) => self.on_callback(q).await,
            IncomingUpdate::Text(msg) => self.on_text(msg).await,
        }
    }

    async fn on_start(&self, cmd: StartCommand) -> Result<()> {
        // Runs regardless of the gate outcome and never delays the reply.
        let _ = self.audit.spawn_notify_start(&cmd.actor);

        let screen = if self.gate.is_joined(cmd.actor.user_id).await {
            self.screens.welcome()
        } else {
            self.screens.force_join()
        };
        self.messenger.send_screen(cmd.chat_id, &screen).await?;
        Ok(())
    }

    async fn on_callback(&self, q: CallbackQuery) -> Result<()> {
        if let Err(e) = self
            .messenger
            .answer_callback_query(&q.callback_id, None)
            .await
        {
            tracing::warn!(error = %e, "failed to answer callback query");
        }

        let action = match q.data.parse::<CallbackAction>() {
            Ok(a) => a,
            Err(e) => {
                tracing::debug!(error = %e, "ignoring callback");
                return Ok(());
            }
        };
        let Some(msg) = q.message else {
            tracing::debug!(%action, "callback without an editable message");
            return Ok(());
        };

        let needs_gate = action == CallbackAction::Recheck
            || (action.is_content() && self.gate_content_callbacks);
        if needs_gate && !self.gate.is_joined(q.actor.user_id).await {
            return self.edit(msg, &self.screens.force_join()).await;
        }

        let screen = match action {
            CallbackAction::Recheck => self.screens.welcome(),
            CallbackAction::Trending => {
                let lookup = self.metadata.trending().await;
                log_unavailable("trending", &lookup);
                self.screens.media_list(ListKind::Trending, &lookup)
            }
            CallbackAction::NowPlaying => {
                let lookup = self.metadata.now_playing().await;
                log_unavailable("now_playing", &lookup);
                self.screens.media_list(ListKind::NowPlaying, &lookup)
            }
        };
        self.edit(msg, &screen).await
    }

    async fn on_text(&self, msg: TextMessage) -> Result<()> {
        // Text can arrive without passing through /start, so gate again.
        if !self.gate.is_joined(msg.actor.user_id).await {
            self.messenger
                .send_screen(msg.chat_id, &self.screens.force_join())
                .await?;
            return Ok(());
        }

        let query = msg.text.trim();
        if query.is_empty() {
            return Ok(());
        }

        if !self.metadata.is_configured() {
            self.messenger
                .send_screen(msg.chat_id, &self.screens.search_echo(query))
                .await?;
            return Ok(());
        }

        self.messenger
            .send_screen(msg.chat_id, &self.screens.searching(query))
            .await?;

        let lookup = self.metadata.search(query).await;
        log_unavailable("search", &lookup);
        self.deliver_search(msg.chat_id, self.screens.search_result(&lookup))
            .await
    }

    async fn deliver_search(&self, chat_id: ChatId, reply: SearchReply) -> Result<()> {
        match reply {
            SearchReply::NoResult => {
                self.messenger
                    .send_screen(chat_id, &Screen::text(NO_SEARCH_RESULT))
                    .await?;
            }
            SearchReply::Text(text) => {
                self.messenger
                    .send_screen(chat_id, &Screen::text(text))
                    .await?;
            }
            SearchReply::Photo { url, caption, text } => {
                if let Err(e) = self.messenger.send_photo(chat_id, &url, &caption).await {
                    tracing::warn!(%url, error = %e, "poster delivery failed; sending text");
                    self.messenger
                        .send_screen(chat_id, &Screen::text(text))
                        .await?;
                }
            }
        }
        Ok(())
    }

    async fn edit(&self, msg: MessageRef, screen: &Screen) -> Result<()> {
        self.messenger.edit_screen(msg, screen).await
    }
}

fn log_unavailable<T>(what: &str, lookup: &Lookup<T>) {
    if let Lookup::Unavailable(reason) = lookup {
        tracing::warn!(lookup = what, %reason, "metadata unavailable");
    }
}
