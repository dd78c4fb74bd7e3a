//! Failures reported by a [`Host`](crate::Host)

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("no window in this context")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    /// localStorage is missing or disabled (private mode, blocked cookies)
    #[error("persistent storage unavailable")]
    StorageUnavailable,

    #[error("failed to read {key}: {reason}")]
    StorageRead { key: String, reason: String },

    /// Typically QuotaExceededError
    #[error("failed to write {key}: {reason}")]
    StorageWrite { key: String, reason: String },

    #[error("scroll offset unavailable: {0}")]
    ScrollUnavailable(String),
}

/// Readable reason for a thrown JS exception (`QuotaExceededError: ...`)
pub fn exception_reason(name: &str, message: &str) -> String {
    match (name.is_empty(), message.is_empty()) {
        (false, false) => format!("{}: {}", name, message),
        (false, true) => name.to_string(),
        (true, false) => message.to_string(),
        (true, true) => "unknown exception".to_string(),
    }
}

#[cfg(target_arch = "wasm32")]
impl From<HostError> for wasm_bindgen::JsValue {
    fn from(err: HostError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
