/// Core error type for the bot.
///
/// Adapter crates map their specific errors into this type so the router can
/// handle failures consistently (log them, never show them raw to users).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("invalid callback data: {0:?}")]
    InvalidCallback(String),

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;
