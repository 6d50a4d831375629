//! Session change notifications.
//!
//! Listeners are plain `FnMut` callbacks invoked synchronously and in order,
//! strictly after the state mutation they describe has completed. One commit
//! batch produces one history notification, never one per edit.

use std::collections::BTreeMap;
use std::collections::HashMap;

use crate::history::HistoryEntry;
use crate::journal::{Issue, LogEntry};

/// Snapshot event delivered to session observers.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Emitted after every successful commit, undo or redo.
    HistoryChanged {
        history: Vec<HistoryEntry>,
        cursor: usize,
    },

    /// Emitted after every log or issue ingestion.
    JournalChanged {
        log: Vec<LogEntry>,
        diagnoses: HashMap<String, Vec<Issue>>,
    },
}

/// Registry of session observers.
pub(crate) struct Listeners {
    next_id: u64,
    listeners: BTreeMap<u64, Box<dyn FnMut(&SessionEvent)>>,
}

impl Listeners {
    pub(crate) fn new() -> Self {
        Self {
            next_id: 1,
            listeners: BTreeMap::new(),
        }
    }

    pub(crate) fn observe<F>(&mut self, listener: F) -> u64
    where
        F: FnMut(&SessionEvent) + 'static,
    {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        self.listeners.insert(id, Box::new(listener));
        id
    }

    pub(crate) fn unobserve(&mut self, listener_id: u64) -> bool {
        self.listeners.remove(&listener_id).is_some()
    }

    pub(crate) fn emit(&mut self, event: &SessionEvent) {
        for listener in self.listeners.values_mut() {
            listener(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn listeners_fire_in_registration_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::new();

        for tag in ["first", "second"] {
            let order = Rc::clone(&order);
            listeners.observe(move |_| order.borrow_mut().push(tag));
        }

        listeners.emit(&SessionEvent::HistoryChanged {
            history: Vec::new(),
            cursor: 0,
        });

        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn unobserve_stops_delivery() {
        let seen = Rc::new(RefCell::new(0));
        let mut listeners = Listeners::new();

        let seen_inner = Rc::clone(&seen);
        let id = listeners.observe(move |_| *seen_inner.borrow_mut() += 1);

        let event = SessionEvent::HistoryChanged {
            history: Vec::new(),
            cursor: 0,
        };
        listeners.emit(&event);
        assert!(listeners.unobserve(id));
        assert!(!listeners.unobserve(id));
        listeners.emit(&event);

        assert_eq!(*seen.borrow(), 1);
    }
}
