//! Wires: the current signal of one connection plus change listeners.
//!
//! Writing a signal equal to the current one is a no-op. Only a real
//! change reaches the listeners, which is what makes a network settle.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::trace;

use crate::agenda::Callback;
use crate::error::SimResult;
use crate::signal::Signal;

/// A change listener registered on a wire.
pub type Listener<V> = Callback<Signal<V>>;

struct WireInner<V> {
    name: Option<String>,
    signal: RefCell<Signal<V>>,
    listeners: RefCell<Vec<Listener<V>>>,
}

/// A shared, typed holder of the current [`Signal`].
///
/// Cloning a `Wire` yields another handle to the same wire. Every node
/// reading or writing the wire holds such a handle; the wire lives as long
/// as the last of them.
pub struct Wire<V> {
    inner: Rc<WireInner<V>>,
}

/// A non-owning wire handle, used inside reaction closures so that
/// feedback loops do not keep themselves alive.
pub struct WeakWire<V> {
    inner: Weak<WireInner<V>>,
}

/// Listener identity is the allocation, not the closure's behaviour.
fn same_listener<V>(a: &Listener<V>, b: &Listener<V>) -> bool {
    Rc::as_ptr(a) as *const () == Rc::as_ptr(b) as *const ()
}

impl<V> Wire<V> {
    /// A new anonymous wire carrying [`Signal::none`].
    pub fn new() -> Self {
        Self::build(None, Signal::none())
    }

    /// A new wire with a label used in log output.
    pub fn named(name: impl Into<String>) -> Self {
        Self::build(Some(name.into()), Signal::none())
    }

    /// A new anonymous wire seeded with `signal`. No listener exists yet,
    /// so nothing is notified.
    pub fn with_signal(signal: Signal<V>) -> Self {
        Self::build(None, signal)
    }

    fn build(name: Option<String>, signal: Signal<V>) -> Self {
        Wire {
            inner: Rc::new(WireInner {
                name,
                signal: RefCell::new(signal),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    pub(crate) fn label(&self) -> &str {
        self.name().unwrap_or("<wire>")
    }

    /// Register `listener`. Registering the same listener twice is ignored;
    /// returns `true` if it was newly added.
    pub fn on_change(&self, listener: Listener<V>) -> bool {
        let mut listeners = self.inner.listeners.borrow_mut();
        if listeners.iter().any(|l| same_listener(l, &listener)) {
            return false;
        }
        listeners.push(listener);
        true
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Returns `true` if both handles point at the same wire.
    pub fn ptr_eq(&self, other: &Wire<V>) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn downgrade(&self) -> WeakWire<V> {
        WeakWire {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

impl<V: Clone> Wire<V> {
    /// The current signal.
    pub fn get_signal(&self) -> Signal<V> {
        self.inner.signal.borrow().clone()
    }
}

impl<V: Clone + Eq> Wire<V> {
    /// Replace the current signal and notify listeners, unless `signal`
    /// equals what the wire already carries.
    ///
    /// Listeners run synchronously before this returns. The first listener
    /// error aborts the notification and is returned.
    ///
    /// The wire keeps the new signal even then, and the listeners after the
    /// failing one are never told about it. Writing the same signal again
    /// is suppressed as usual, so those listeners stay behind until the
    /// signal next changes. Treat the network as poisoned after an error.
    pub fn set_signal(&self, signal: Signal<V>) -> SimResult<()> {
        {
            let mut current = self.inner.signal.borrow_mut();
            if *current == signal {
                return Ok(());
            }
            *current = signal.clone();
        }

        // Snapshot so listeners may register further listeners.
        let listeners = self.inner.listeners.borrow().clone();
        trace!(wire = self.label(), listeners = listeners.len(), "signal changed");
        for listener in listeners {
            listener(signal.clone())?;
        }
        Ok(())
    }

    /// Shorthand for `set_signal(Signal::of(value))`.
    pub fn set(&self, value: V) -> SimResult<()> {
        self.set_signal(Signal::of(value))
    }
}

impl<V> WeakWire<V> {
    /// The wire, if any strong handle is still alive.
    pub fn upgrade(&self) -> Option<Wire<V>> {
        self.inner.upgrade().map(|inner| Wire { inner })
    }
}

impl<V> Clone for Wire<V> {
    fn clone(&self) -> Self {
        Wire {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<V> Clone for WeakWire<V> {
    fn clone(&self) -> Self {
        WeakWire {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<V> Default for Wire<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: std::fmt::Debug> std::fmt::Debug for Wire<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wire")
            .field("name", &self.inner.name)
            .field("signal", &*self.inner.signal.borrow())
            .field("listeners", &self.listener_count())
            .finish()
    }
}
