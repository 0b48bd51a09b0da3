use async_trait::async_trait;

use crate::{
    domain::{ChannelRef, ChatId, MessageRef, UserId},
    messaging::types::{MemberStatus, MessagingCapabilities, Screen},
    Result,
};

/// Chat-transport port.
///
/// Telegram is the implementation; the router only needs these shapes.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    fn capabilities(&self) -> MessagingCapabilities;

    async fn send_screen(&self, chat_id: ChatId, screen: &Screen) -> Result<MessageRef>;

    /// Replace the text and buttons of an existing message in place.
    async fn edit_screen(&self, msg: MessageRef, screen: &Screen) -> Result<()>;

    async fn send_photo(
        &self,
        chat_id: ChatId,
        photo_url: &str,
        caption_html: &str,
    ) -> Result<MessageRef>;

    async fn answer_callback_query(&self, callback_id: &str, text: Option<&str>) -> Result<()>;

    async fn member_status(&self, channel: &ChannelRef, user_id: UserId) -> Result<MemberStatus>;
}
