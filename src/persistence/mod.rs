//! Save/restore of the vertical scroll offset
//!
//! Each call re-reads the user id from the page and talks to storage
//! directly. Nothing is cached between calls, so a page that swaps its
//! script tag or clears storage is picked up on the next event.
//!
//! Known limitation: the user id comes from the *last* `<script>` element at
//! call time. Pages that append scripts after the hosting one will key
//! positions under whatever those scripts carry.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::HostError;
use crate::key::{ScrollKey, StoredOffset};
use crate::platform::{Host, ScriptElement};

/// Values read from the hosting script tag
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Params {
    pub user_id: Option<String>,
}

pub struct ScrollPositionPersistence<H: Host> {
    host: H,
    config: Config,
}

impl<H: Host> ScrollPositionPersistence<H> {
    pub fn new(host: H) -> Self {
        Self::with_config(host, Config::default())
    }

    pub fn with_config(host: H, config: Config) -> Self {
        Self { host, config }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read the user id from the last script element. Never fails.
    pub fn get_params(&self) -> Params {
        let user_id = self
            .host
            .last_script()
            .and_then(|script| script.attribute(&self.config.user_attribute));
        Params { user_id }
    }

    /// Key for whichever user the page currently names
    pub fn scroll_key(&self) -> ScrollKey {
        let params = self.get_params();
        ScrollKey::for_user(params.user_id.as_deref(), &self.config)
    }

    /// Write the current offset, overwriting any earlier entry
    pub fn save_scroll_position(&self) -> Result<StoredOffset, HostError> {
        let offset = StoredOffset::from_scroll_y(self.host.scroll_y()?);
        let key = self.scroll_key();
        self.host.set_item(key.as_str(), &offset.to_string())?;
        log::debug!("Save ScrollPosition: {} : {}", key, offset);
        Ok(offset)
    }

    /// Jump to the stored offset; a missing or unreadable value goes to the top
    pub fn restore_scroll_position(&self) -> Result<StoredOffset, HostError> {
        let key = self.scroll_key();
        let raw = self.host.get_item(key.as_str())?;
        let offset = StoredOffset::coerce(raw.as_deref());
        self.host.scroll_to(0.0, offset.as_f64());
        log::info!("Restore ScrollPosition: {} : {}", key, offset);
        Ok(offset)
    }
}
