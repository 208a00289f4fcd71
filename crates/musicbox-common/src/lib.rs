pub mod errors;

pub use errors::{BridgeError, ConfigError, MusicboxError, PlatformError, StorageError};

pub type Result<T> = std::result::Result<T, MusicboxError>;
