use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("path error: {0}")]
    PathError(String),

    #[error("external opener error: {0}")]
    OpenerError(String),

    #[error("menu error: {0}")]
    MenuError(String),

    #[error("window error: {0}")]
    WindowError(String),

    #[error("not supported: {0}")]
    NotSupported(String),
}

/// Errors raised by a cookie storage backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("invalid cookie: {0}")]
    InvalidCookie(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Errors observed by a caller of the bridge.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BridgeError {
    #[error("host unreachable")]
    HostUnreachable,

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The host answered with a failure outcome.
    #[error("request failed: {0}")]
    Failed(String),

    /// The host answered with a value of an unexpected shape.
    #[error("malformed response: {0}")]
    Decode(String),
}

#[derive(Debug, thiserror::Error)]
pub enum MusicboxError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("webview error: {0}")]
    WebView(String),

    #[error("{0}")]
    Other(String),
}
