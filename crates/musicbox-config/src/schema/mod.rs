//! Configuration schema types for musicbox.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod content;
mod system;
mod window;

pub use content::*;
pub use system::*;
pub use window::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct MusicboxConfig {
    pub window: WindowConfig,
    pub content: ContentConfig,
    pub logging: LoggingConfig,
}
