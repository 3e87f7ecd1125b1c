/// Core error type for the relay bot.
///
/// The adapter crate maps its specific errors into this type so the relay
/// loop can handle failures consistently (fatal at startup vs retryable).
/// A completed-but-rejected delivery is not an error: `send_text` reports it
/// as `Ok(false)`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
