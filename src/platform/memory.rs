//! In-memory host for native runs and tests
//!
//! Behaves like a single page: one scroll position clamped to the document
//! height, one storage map, and the script tags in document order.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use super::{Host, ScriptElement};
use crate::error::HostError;

/// Scroll range of a page taller than any test needs
const DEFAULT_MAX_SCROLL_Y: f64 = 100_000.0;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryScript {
    attributes: BTreeMap<String, String>,
}

impl MemoryScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }
}

impl ScriptElement for MemoryScript {
    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.get(name).cloned()
    }
}

#[derive(Debug)]
pub struct MemoryHost {
    scroll_y: Cell<f64>,
    max_scroll_y: f64,
    storage: RefCell<BTreeMap<String, String>>,
    scripts: Vec<MemoryScript>,
    /// Simulates disabled storage
    storage_disabled: Cell<bool>,
    /// Simulates QuotaExceededError on writes
    quota_exceeded: Cell<bool>,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    /// Empty page scrolled to the top, no scripts
    pub fn new() -> Self {
        Self {
            scroll_y: Cell::new(0.0),
            max_scroll_y: DEFAULT_MAX_SCROLL_Y,
            storage: RefCell::new(BTreeMap::new()),
            scripts: Vec::new(),
            storage_disabled: Cell::new(false),
            quota_exceeded: Cell::new(false),
        }
    }

    /// Page whose last script tag carries `user_id`
    pub fn for_user(user_id: &str) -> Self {
        Self::new().with_script(
            MemoryScript::new().with_attribute(crate::consts::USER_ATTRIBUTE, user_id),
        )
    }

    /// Append a script tag (document order)
    pub fn with_script(mut self, script: MemoryScript) -> Self {
        self.scripts.push(script);
        self
    }

    pub fn with_max_scroll_y(mut self, max: f64) -> Self {
        self.max_scroll_y = max.max(0.0);
        self
    }

    /// Simulate the user scrolling
    pub fn scroll_by_user(&self, y: f64) {
        self.scroll_to(0.0, y);
    }

    pub fn current_scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    /// Raw storage entry, bypassing failure simulation
    pub fn stored(&self, key: &str) -> Option<String> {
        self.storage.borrow().get(key).cloned()
    }

    /// Seed storage as if an earlier visit had written it
    pub fn seed(&self, key: &str, value: &str) {
        self.storage
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    pub fn stored_len(&self) -> usize {
        self.storage.borrow().len()
    }

    pub fn set_storage_disabled(&self, disabled: bool) {
        self.storage_disabled.set(disabled);
    }

    pub fn set_quota_exceeded(&self, exceeded: bool) {
        self.quota_exceeded.set(exceeded);
    }
}

impl Host for MemoryHost {
    type Script = MemoryScript;

    fn scroll_y(&self) -> Result<f64, HostError> {
        Ok(self.scroll_y.get())
    }

    fn scroll_to(&self, _x: f64, y: f64) {
        let y = if y.is_nan() { 0.0 } else { y };
        self.scroll_y.set(y.clamp(0.0, self.max_scroll_y));
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, HostError> {
        if self.storage_disabled.get() {
            return Err(HostError::StorageUnavailable);
        }
        Ok(self.storage.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), HostError> {
        if self.storage_disabled.get() {
            return Err(HostError::StorageUnavailable);
        }
        if self.quota_exceeded.get() {
            return Err(HostError::StorageWrite {
                key: key.to_string(),
                reason: "QuotaExceededError".to_string(),
            });
        }
        self.storage
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn last_script(&self) -> Option<MemoryScript> {
        self.scripts.last().cloned()
    }
}
