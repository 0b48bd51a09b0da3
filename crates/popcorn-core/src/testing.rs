//! In-test fakes for the transport and metadata ports.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicI32, AtomicUsize, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;

use crate::{
    config::test_config,
    domain::{ChannelRef, ChatId, MessageId, MessageRef, UserId},
    errors::Error,
    messaging::{
        port::MessagingPort,
        types::{MemberStatus, MessagingCapabilities, Screen},
    },
    metadata::{Lookup, MediaItem, MediaPage, MetadataPort, Unavailable},
    Result,
};

type StatusReply = std::result::Result<MemberStatus, &'static str>;

pub struct FakeMessenger {
    next_id: AtomicI32,
    statuses: Mutex<HashMap<ChannelRef, StatusReply>>,
    status_lookups: Mutex<Vec<ChannelRef>>,
    pub sends: Mutex<Vec<(ChatId, Screen)>>,
    pub edits: Mutex<Vec<(MessageRef, Screen)>>,
    pub photos: Mutex<Vec<(ChatId, String, String)>>,
    pub answers: Mutex<Vec<String>>,
    pub fail_photos: Mutex<bool>,
    pub fail_sends_to: Mutex<Option<ChatId>>,
}

impl FakeMessenger {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI32::new(100),
            statuses: Mutex::new(HashMap::new()),
            status_lookups: Mutex::new(Vec::new()),
            sends: Mutex::new(Vec::new()),
            edits: Mutex::new(Vec::new()),
            photos: Mutex::new(Vec::new()),
            answers: Mutex::new(Vec::new()),
            fail_photos: Mutex::new(false),
            fail_sends_to: Mutex::new(None),
        }
    }

    /// Set lookup replies for the public / private channels of `test_config()`.
    pub fn set_status(&self, public: StatusReply, private: StatusReply) {
        let cfg = test_config();
        let mut map = self.statuses.lock().unwrap();
        map.insert(cfg.public_channel, public);
        map.insert(cfg.private_channel, private);
    }

    pub fn joined() -> Self {
        let m = Self::new();
        m.set_status(Ok(MemberStatus::Member), Ok(MemberStatus::Member));
        m
    }

    pub fn not_joined() -> Self {
        let m = Self::new();
        m.set_status(Ok(MemberStatus::Member), Ok(MemberStatus::Left));
        m
    }

    pub fn status_lookups(&self) -> Vec<ChannelRef> {
        self.status_lookups.lock().unwrap().clone()
    }

    pub fn sent_html(&self) -> Vec<String> {
        self.sends
            .lock()
            .unwrap()
            .iter()
            .map(|(_, s)| s.html.clone())
            .collect()
    }

    pub fn edited_html(&self) -> Vec<String> {
        self.edits
            .lock()
            .unwrap()
            .iter()
            .map(|(_, s)| s.html.clone())
            .collect()
    }

    fn alloc(&self, chat_id: ChatId) -> MessageRef {
        MessageRef {
            chat_id,
            message_id: MessageId(self.next_id.fetch_add(1, Ordering::SeqCst)),
        }
    }
}

#[async_trait]
impl MessagingPort for FakeMessenger {
    fn capabilities(&self) -> MessagingCapabilities {
        MessagingCapabilities {
            max_message_len: 4096,
            max_caption_len: 64,
        }
    }

    async fn send_screen(&self, chat_id: ChatId, screen: &Screen) -> Result<MessageRef> {
        if *self.fail_sends_to.lock().unwrap() == Some(chat_id) {
            return Err(Error::External("chat not found".to_string()));
        }
        self.sends.lock().unwrap().push((chat_id, screen.clone()));
        Ok(self.alloc(chat_id))
    }

    async fn edit_screen(&self, msg: MessageRef, screen: &Screen) -> Result<()> {
        self.edits.lock().unwrap().push((msg, screen.clone()));
        Ok(())
    }

    async fn send_photo(
        &self,
        chat_id: ChatId,
        photo_url: &str,
        caption_html: &str,
    ) -> Result<MessageRef> {
        if *self.fail_photos.lock().unwrap() {
            return Err(Error::External("wrong file identifier/HTTP URL".to_string()));
        }
        self.photos.lock().unwrap().push((
            chat_id,
            photo_url.to_string(),
            caption_html.to_string(),
        ));
        Ok(self.alloc(chat_id))
    }

    async fn answer_callback_query(&self, callback_id: &str, _text: Option<&str>) -> Result<()> {
        self.answers.lock().unwrap().push(callback_id.to_string());
        Ok(())
    }

    async fn member_status(&self, channel: &ChannelRef, _user_id: UserId) -> Result<MemberStatus> {
        self.status_lookups.lock().unwrap().push(channel.clone());
        match self.statuses.lock().unwrap().get(channel) {
            Some(Ok(status)) => Ok(*status),
            Some(Err(e)) => Err(Error::External(e.to_string())),
            None => Err(Error::External("chat not found".to_string())),
        }
    }
}

/// Metadata fake; `None` pages report the upstream as unavailable.
pub struct FakeMetadata {
    configured: bool,
    page: Option<MediaPage>,
    pub calls: AtomicUsize,
    pub queries: Mutex<Vec<String>>,
}

impl FakeMetadata {
    pub fn with_page(page: MediaPage) -> Self {
        Self {
            configured: true,
            page: Some(page),
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            configured: true,
            page: None,
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            page: None,
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn respond(&self) -> Lookup<MediaPage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.configured {
            return Lookup::Unavailable(Unavailable::MissingApiKey);
        }
        match &self.page {
            Some(p) => Lookup::Ready(p.clone()),
            None => Lookup::Unavailable(Unavailable::Status(500)),
        }
    }
}

#[async_trait]
impl MetadataPort for FakeMetadata {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn search(&self, query: &str) -> Lookup<MediaPage> {
        self.queries.lock().unwrap().push(query.to_string());
        self.respond()
    }

    async fn trending(&self) -> Lookup<MediaPage> {
        self.respond()
    }

    async fn now_playing(&self) -> Lookup<MediaPage> {
        self.respond()
    }
}

/// `n` movies titled `Movie 1..=n`, each released on 2024-01-01.
pub fn movies(n: usize) -> MediaPage {
    MediaPage {
        results: (1..=n)
            .map(|i| MediaItem {
                id: Some(i as u64),
                title: Some(format!("Movie {i}")),
                release_date: Some("2024-01-01".to_string()),
                overview: Some(format!("Overview {i}")),
                poster_path: Some(format!("/p{i}.jpg")),
                ..Default::default()
            })
            .collect(),
    }
}
