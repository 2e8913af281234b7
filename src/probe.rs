//! `Probe` — records every change of a wire, stamped with the tick.

use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::Rc;

use tracing::info;

use crate::agenda::Agenda;
use crate::signal::Signal;
use crate::time::Tick;
use crate::wire::Wire;

/// One observed change.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Change<V> {
    /// Instant at which the wire took the new signal.
    pub tick: Tick,
    pub signal: Signal<V>,
}

impl<V: std::fmt::Display> std::fmt::Display for Change<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.tick, self.signal)
    }
}

/// An append-only log of the changes seen on one wire.
///
/// Attaching a probe registers a listener; there is no way to detach it,
/// the probe simply records for as long as the wire lives.
pub struct Probe<V> {
    label: String,
    changes: Rc<RefCell<Vec<Change<V>>>>,
}

impl<V: Clone + Debug + 'static> Probe<V> {
    pub fn attach(label: impl Into<String>, agenda: &Agenda, wire: &Wire<V>) -> Self {
        let label = label.into();
        let changes = Rc::new(RefCell::new(Vec::new()));
        {
            let label = label.clone();
            let agenda = agenda.clone();
            let changes = Rc::clone(&changes);
            wire.on_change(Rc::new(move |signal: Signal<V>| {
                let tick = agenda.now();
                info!(probe = %label, %tick, signal = ?signal.value(), "wire changed");
                changes.borrow_mut().push(Change { tick, signal });
                Ok(())
            }));
        }
        Probe { label, changes }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// All changes so far, oldest first.
    pub fn changes(&self) -> Vec<Change<V>> {
        self.changes.borrow().clone()
    }

    pub fn last(&self) -> Option<Change<V>> {
        self.changes.borrow().last().cloned()
    }

    /// Ticks from `start` to the most recent change, or `None` if nothing
    /// changed at or after `start`.
    pub fn settled_after(&self, start: Tick) -> Option<u64> {
        self.changes
            .borrow()
            .last()
            .and_then(|change| change.tick.duration_since(start))
    }

    pub fn len(&self) -> usize {
        self.changes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.borrow().is_empty()
    }
}
