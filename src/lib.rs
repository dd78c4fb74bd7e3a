//! Scroll Keeper - remembers where a reader left off on a page
//!
//! Core modules:
//! - `key`: Storage key and stored offset encoding
//! - `persistence`: Save/restore of the vertical scroll offset
//! - `platform`: Browser/in-memory host abstraction
//! - `config`: Key format and logging preferences
//! - `error`: Host failures surfaced to callers

pub mod config;
pub mod error;
pub mod key;
pub mod persistence;
pub mod platform;

pub use config::Config;
pub use error::HostError;
pub use key::{ScrollKey, StoredOffset};
pub use persistence::{Params, ScrollPositionPersistence};
pub use platform::{Host, MemoryHost, ScriptElement};

/// Storage contract constants
pub mod consts {
    /// Namespace prefix of every storage key
    pub const KEY_PREFIX: &str = "twitter_";
    /// Suffix of every storage key
    pub const KEY_SUFFIX: &str = "_scrollPosition";
    /// Script tag attribute carrying the user identifier
    pub const USER_ATTRIBUTE: &str = "user_id";
    /// Key fragment used when no user identifier is present
    pub const MISSING_USER: &str = "null";

    /// DOM events that trigger a save
    pub const SAVE_EVENTS: [&str; 2] = ["beforeunload", "scroll"];
    /// DOM event that triggers a restore
    pub const RESTORE_EVENT: &str = "DOMContentLoaded";
}
