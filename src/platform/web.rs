//! Browser host backed by `web_sys`
//!
//! LocalStorage is looked up on every call: a page can lose storage access
//! mid-session (site data cleared, privacy settings changed).

use std::rc::Rc;

use js_sys::{Object, Reflect};
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Document, DomException, Element, EventTarget,
    Storage, Window,
};

use super::wiring::{EventSource, Trigger, wiring_plan};
use super::{Host, ScriptElement};
use crate::error::{HostError, exception_reason};
use crate::persistence::ScrollPositionPersistence;

fn js_reason(err: &JsValue) -> String {
    if let Some(e) = err.dyn_ref::<js_sys::Error>() {
        return exception_reason(&String::from(e.name()), &String::from(e.message()));
    }
    if let Some(e) = err.dyn_ref::<DomException>() {
        return exception_reason(&e.name(), &e.message());
    }
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

impl ScriptElement for Element {
    fn attribute(&self, name: &str) -> Option<String> {
        self.get_attribute(name)
    }
}

#[derive(Clone)]
pub struct WebHost {
    window: Window,
    document: Document,
}

impl WebHost {
    pub fn new() -> Result<Self, HostError> {
        let window = web_sys::window().ok_or(HostError::NoWindow)?;
        let document = window.document().ok_or(HostError::NoDocument)?;
        Ok(Self { window, document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn storage(&self) -> Result<Storage, HostError> {
        self.window
            .local_storage()
            .ok()
            .flatten()
            .ok_or(HostError::StorageUnavailable)
    }
}

impl Host for WebHost {
    type Script = Element;

    fn scroll_y(&self) -> Result<f64, HostError> {
        self.window
            .scroll_y()
            .map_err(|e| HostError::ScrollUnavailable(js_reason(&e)))
    }

    fn scroll_to(&self, x: f64, y: f64) {
        self.window.scroll_to_with_x_and_y(x, y);
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, HostError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| HostError::StorageRead {
                key: key.to_string(),
                reason: js_reason(&e),
            })
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), HostError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| HostError::StorageWrite {
                key: key.to_string(),
                reason: js_reason(&e),
            })
    }

    fn last_script(&self) -> Option<Element> {
        let scripts = self.document.get_elements_by_tag_name("script");
        match scripts.length() {
            0 => None,
            n => scripts.item(n - 1),
        }
    }
}

/// Register the listeners from [`wiring_plan`] and restore right away when
/// the document is already parsed (the module is instantiated asynchronously).
pub fn install(keeper: Rc<ScrollPositionPersistence<WebHost>>) -> Result<(), JsValue> {
    let host = keeper.host().clone();
    let plan = wiring_plan(host.document.ready_state() == "loading");

    for listener in &plan.listeners {
        let keeper = keeper.clone();
        let trigger = listener.trigger;
        let closure = Closure::<dyn FnMut(_) -> Result<(), JsValue>>::new(
            move |_event: web_sys::Event| {
                keeper.handle(trigger)?;
                Ok(())
            },
        );
        let target: &EventTarget = match listener.source {
            EventSource::Window => host.window.as_ref(),
            EventSource::Document => host.document.as_ref(),
        };
        let options = AddEventListenerOptions::new();
        options.set_once(listener.once);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            listener.event,
            closure.as_ref().unchecked_ref(),
            &options,
        )?;
        closure.forget();
    }

    if plan.restore_now {
        log::debug!("Document already parsed, restoring immediately");
        keeper.handle(Trigger::Restore)?;
    }

    log::info!("Scroll keeper installed");
    Ok(())
}

fn keeper() -> Result<ScrollPositionPersistence<WebHost>, JsValue> {
    Ok(ScrollPositionPersistence::new(WebHost::new()?))
}

/// Save the current offset now (page code calling in directly)
#[wasm_bindgen(js_name = saveScrollPosition)]
pub fn save_scroll_position() -> Result<(), JsValue> {
    keeper()?.save_scroll_position()?;
    Ok(())
}

/// Restore the stored offset now
#[wasm_bindgen(js_name = restoreScrollPosition)]
pub fn restore_scroll_position() -> Result<(), JsValue> {
    keeper()?.restore_scroll_position()?;
    Ok(())
}

/// `{ userId: string | null }`
#[wasm_bindgen(js_name = getParams)]
pub fn get_params() -> Result<JsValue, JsValue> {
    let params = keeper()?.get_params();
    let obj = Object::new();
    let user_id = params.user_id.map(JsValue::from).unwrap_or(JsValue::NULL);
    Reflect::set(&obj, &JsValue::from_str("userId"), &user_id)?;
    Ok(obj.into())
}
