//! Configuration types and path resolution for hira.
//!
//! Hira stores its settings as TOML at the platform's XDG config path
//! (e.g. `~/.config/hira/config.toml` on Linux). The backing CSV tables live
//! in a configurable data directory, `./data` by default.

mod loader;
mod paths;
mod resolve;
mod types;

pub use types::AgentConfig;
pub use types::Config;
#[allow(unused_imports)]
pub use types::{ProviderConfig, ProviderEntry};

use anyhow::Result;

impl Config {
    /// Load config from the XDG path, creating a default file if none exists,
    /// then resolve `{env:VAR}` substitutions.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_global()?;
        config.resolve_substitutions();
        Ok(config)
    }
}
