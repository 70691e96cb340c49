/// Core error type for the relay bot.
///
/// Adapter crates map their specific errors into this type so handlers can
/// decide what each failure means for the user (usage hint vs refusal vs
/// operator-visible transport error).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    /// Bad command arguments. The payload is the user-visible usage hint.
    #[error("{0}")]
    Validation(String),

    /// Non-operator invoking an operator-only command.
    #[error("unauthorized")]
    Unauthorized,

    /// Target specifier resolved to nothing. The payload is the specifier.
    #[error("no user matching {0}")]
    NotFound(String),

    /// Outbound send/forward failed at the transport.
    #[error("transport error: {0}")]
    Transport(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
