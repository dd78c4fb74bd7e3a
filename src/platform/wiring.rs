//! Which DOM events drive save and restore
//!
//! Kept free of `web_sys` so the event contract is checked natively; the
//! browser host only turns a [`WiringPlan`] into listeners.

use crate::consts::{RESTORE_EVENT, SAVE_EVENTS};
use crate::error::HostError;
use crate::key::StoredOffset;
use crate::persistence::ScrollPositionPersistence;
use crate::platform::Host;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSource {
    Window,
    Document,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Save,
    Restore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Listener {
    pub source: EventSource,
    pub event: &'static str,
    pub trigger: Trigger,
    /// Removed by the browser after the first dispatch
    pub once: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WiringPlan {
    pub listeners: Vec<Listener>,
    /// Restore during install instead of waiting for an event
    pub restore_now: bool,
}

/// Plan the listeners for a document that is (or is not) still parsing.
///
/// Once parsing has finished `DOMContentLoaded` will not fire again, so the
/// restore happens straight away.
pub fn wiring_plan(document_loading: bool) -> WiringPlan {
    let mut listeners: Vec<Listener> = SAVE_EVENTS
        .iter()
        .map(|&event| Listener {
            source: EventSource::Window,
            event,
            trigger: Trigger::Save,
            once: false,
        })
        .collect();

    if document_loading {
        listeners.push(Listener {
            source: EventSource::Document,
            event: RESTORE_EVENT,
            trigger: Trigger::Restore,
            once: true,
        });
    }

    WiringPlan {
        listeners,
        restore_now: !document_loading,
    }
}

impl<H: Host> ScrollPositionPersistence<H> {
    /// Run the operation an event listener is bound to
    pub fn handle(&self, trigger: Trigger) -> Result<StoredOffset, HostError> {
        match trigger {
            Trigger::Save => self.save_scroll_position(),
            Trigger::Restore => self.restore_scroll_position(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryHost;

    fn listener<'a>(plan: &'a WiringPlan, event: &str) -> Option<&'a Listener> {
        plan.listeners.iter().find(|l| l.event == event)
    }

    #[test]
    fn test_event_names() {
        assert_eq!(SAVE_EVENTS, ["beforeunload", "scroll"]);
        assert_eq!(RESTORE_EVENT, "DOMContentLoaded");
    }

    #[test]
    fn test_plan_while_loading() {
        let plan = wiring_plan(true);
        assert!(!plan.restore_now);
        assert_eq!(plan.listeners.len(), 3);

        for event in ["beforeunload", "scroll"] {
            let l = listener(&plan, event).unwrap();
            assert_eq!(l.source, EventSource::Window);
            assert_eq!(l.trigger, Trigger::Save);
            assert!(!l.once);
        }

        let restore = listener(&plan, "DOMContentLoaded").unwrap();
        assert_eq!(restore.source, EventSource::Document);
        assert_eq!(restore.trigger, Trigger::Restore);
        assert!(restore.once);
    }

    #[test]
    fn test_plan_after_parsing_restores_now() {
        let plan = wiring_plan(false);
        assert!(plan.restore_now);
        assert!(listener(&plan, "DOMContentLoaded").is_none());
        assert!(plan.listeners.iter().all(|l| l.trigger == Trigger::Save));
        assert_eq!(plan.listeners.len(), 2);
    }

    #[test]
    fn test_every_plan_restores_exactly_once() {
        for loading in [true, false] {
            let plan = wiring_plan(loading);
            let restores = plan
                .listeners
                .iter()
                .filter(|l| l.trigger == Trigger::Restore)
                .count()
                + usize::from(plan.restore_now);
            assert_eq!(restores, 1, "loading = {}", loading);
        }
    }

    #[test]
    fn test_dispatching_plan_saves_and_restores() {
        let host = MemoryHost::for_user("42");
        host.seed("twitter_42_scrollPosition", "500");
        let keeper = ScrollPositionPersistence::new(host);

        let plan = wiring_plan(true);
        let on_load = listener(&plan, "DOMContentLoaded").unwrap();
        assert_eq!(keeper.handle(on_load.trigger), Ok(StoredOffset(500)));
        assert_eq!(keeper.host().current_scroll_y(), 500.0);

        keeper.host().scroll_by_user(730.0);
        let on_scroll = listener(&plan, "scroll").unwrap();
        assert_eq!(keeper.handle(on_scroll.trigger), Ok(StoredOffset(730)));
        assert_eq!(
            keeper.host().stored("twitter_42_scrollPosition").as_deref(),
            Some("730")
        );
    }
}
