//! Layered configuration.
//!
//! Tiers, lowest to highest, merged field-by-field:
//! 1. **Defaults** - built into [`Config::default`]
//! 2. **Project** - `$CWD/time-tracker/config.yaml`
//! 3. **User** - `~/.time-tracker/config.yaml`
//! 4. **Environment** - the variables below
//!
//! ## Environment Variables
//! - `TIME_TRACKER_CONFIG_PATH` - Explicit config file (replaces the file tiers)
//! - `TIME_TRACKER_HOST` / `TIME_TRACKER_PORT` - Listener address
//! - `TIME_TRACKER_DB_PATH` - Database path
//! - `TIME_TRACKER_MIGRATE` - `true`/`false`, migrate on startup
//! - `TIME_TRACKER_LOG` - Log target (`off`, `stdout`, `stderr`, or a file)

mod loader;
mod merge;
mod types;

pub use loader::{ConfigLoader, ConfigPaths, ConfigTier};
pub use merge::deep_merge;
pub use types::*;
