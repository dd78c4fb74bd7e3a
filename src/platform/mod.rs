//! Platform abstraction layer
//!
//! Everything the persistence logic needs from the browser:
//! - Scroll offset (read and jump)
//! - Persistent key-value storage (LocalStorage on web)
//! - The last `<script>` element on the page

mod memory;
#[cfg(target_arch = "wasm32")]
pub mod web;
pub mod wiring;

pub use memory::{MemoryHost, MemoryScript};
pub use wiring::{EventSource, Listener, Trigger, WiringPlan, wiring_plan};

use crate::error::HostError;

/// A script element whose attributes can be read
pub trait ScriptElement {
    fn attribute(&self, name: &str) -> Option<String>;
}

/// Window, document and storage as seen by the persistence logic
pub trait Host {
    type Script: ScriptElement;

    /// Current vertical scroll offset in CSS pixels
    fn scroll_y(&self) -> Result<f64, HostError>;

    /// Move the viewport; hosts clamp to the scrollable range
    fn scroll_to(&self, x: f64, y: f64);

    fn get_item(&self, key: &str) -> Result<Option<String>, HostError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), HostError>;

    /// Last script element in document order, if any
    fn last_script(&self) -> Option<Self::Script>;
}
