//! Membership gate: a user must be in both configured channels.

use std::{fmt, sync::Arc};

use crate::{
    config::Config,
    domain::{ChannelRef, UserId},
    messaging::{port::MessagingPort, types::MemberStatus},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateChannel {
    Public,
    Private,
}

impl fmt::Display for GateChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => f.write_str("public"),
            Self::Private => f.write_str("private"),
        }
    }
}

/// Result of one gate check. Computed fresh on every gated action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Joined,
    NotMember {
        channel: GateChannel,
        status: MemberStatus,
    },
    /// The lookup itself failed; the gate fails closed.
    LookupFailed {
        channel: GateChannel,
        reason: String,
    },
}

impl Verdict {
    pub fn is_joined(&self) -> bool {
        matches!(self, Self::Joined)
    }
}

#[derive(Clone)]
pub struct MembershipGate {
    messenger: Arc<dyn MessagingPort>,
    public_channel: ChannelRef,
    private_channel: ChannelRef,
}

impl MembershipGate {
    pub fn new(cfg: &Config, messenger: Arc<dyn MessagingPort>) -> Self {
        Self {
            messenger,
            public_channel: cfg.public_channel.clone(),
            private_channel: cfg.private_channel.clone(),
        }
    }

    pub async fn is_joined(&self, user_id: UserId) -> bool {
        self.check(user_id).await.is_joined()
    }

    /// Look up the public channel, then the private one. The first lookup that
    /// fails or reports a non-member status decides the verdict.
    pub async fn check(&self, user_id: UserId) -> Verdict {
        let channels = [
            (GateChannel::Public, &self.public_channel),
            (GateChannel::Private, &self.private_channel),
        ];

        for (channel, chat) in channels {
            match self.messenger.member_status(chat, user_id).await {
                Ok(status) if status.counts_as_joined() => {}
                Ok(status) => {
                    tracing::debug!(user_id = user_id.0, %channel, ?status, "user not in channel");
                    return Verdict::NotMember { channel, status };
                }
                Err(e) => {
                    tracing::warn!(
                        user_id = user_id.0,
                        %channel,
                        %chat,
                        error = %e,
                        "membership check error"
                    );
                    return Verdict::LookupFailed {
                        channel,
                        reason: e.to_string(),
                    };
                }
            }
        }

        Verdict::Joined
    }
}
