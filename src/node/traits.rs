//! `Node` trait and the `NodeCore` every node is built around.

use std::cell::Cell;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::agenda::{Agenda, Callback};
use crate::combine::WhenCombining;
use crate::error::{SimError, SimResult};
use crate::signal::Signal;
use crate::time::Delay;
use crate::wire::{Listener, WeakWire, Wire};

// ── NodeCore ──────────────────────────────────────────────────────────

/// What every node has: the agenda it runs on, its delay, the absence
/// policy for anything it combines, and a one-shot start flag.
#[derive(Debug)]
pub struct NodeCore {
    name: Rc<str>,
    agenda: Agenda,
    delay: Delay,
    policy: WhenCombining,
    started: Cell<bool>,
}

impl NodeCore {
    /// A core using [`WhenCombining::AbsentWins`].
    pub fn new(name: impl Into<String>, agenda: &Agenda, delay: Delay) -> Self {
        NodeCore {
            name: Rc::from(name.into()),
            agenda: agenda.clone(),
            delay,
            policy: WhenCombining::default(),
            started: Cell::new(false),
        }
    }

    /// Override the absence policy.
    pub fn with_policy(mut self, policy: WhenCombining) -> Self {
        self.policy = policy;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn agenda(&self) -> &Agenda {
        &self.agenda
    }

    pub fn delay(&self) -> Delay {
        self.delay
    }

    pub fn policy(&self) -> WhenCombining {
        self.policy
    }

    pub fn is_started(&self) -> bool {
        self.started.get()
    }

    /// Flip the start flag, failing if it was already set.
    ///
    /// Every [`Node::start`] implementation calls this first.
    pub fn begin_start(&self) -> SimResult<()> {
        if self.started.replace(true) {
            return Err(SimError::AlreadyStarted {
                node: self.name.to_string(),
            });
        }
        debug!(node = %self.name, delay = %self.delay, policy = ?self.policy, "node started");
        Ok(())
    }

    /// Subscribe `reaction` to `wire`, delayed by this node's delay.
    ///
    /// `capture` runs synchronously on every change and builds the input
    /// the reaction will see; only its result crosses the delay. Anything
    /// a multi-input node reads from its other inputs must be read here,
    /// so that later changes cannot leak into an earlier reaction.
    ///
    /// Returns the listener that was registered, which can be called
    /// directly to book a reaction without a wire change.
    pub fn observe<V, S>(
        &self,
        wire: &Wire<V>,
        capture: impl Fn(Signal<V>) -> S + 'static,
        reaction: Callback<S>,
    ) -> Listener<V>
    where
        V: 'static,
        S: 'static,
    {
        let delayed = self.agenda.after_delay(self.delay, reaction);
        let listener: Listener<V> = Rc::new(move |signal: Signal<V>| delayed(capture(signal)));
        wire.on_change(Rc::clone(&listener));
        listener
    }

    pub(crate) fn name_handle(&self) -> Rc<str> {
        Rc::clone(&self.name)
    }
}

// ── Node ──────────────────────────────────────────────────────────────

/// A computational unit reacting to wire changes after a fixed delay.
///
/// Construction is inert. [`start`](Node::start) performs every
/// subscription and must run exactly once, after the node is fully built;
/// [`spawn`] does both for the factories in this crate.
///
/// # Example
///
/// ```rust
/// use tickwire::{spawn, Agenda, Delay, Node, NodeCore, Signal, Unary, Wire};
///
/// let agenda = Agenda::new();
/// let input = Wire::new();
/// let output = Wire::new();
/// let double = spawn(Unary::new(
///     NodeCore::new("double", &agenda, Delay::ONE),
///     &input,
///     &output,
///     |v: &u32| v * 2,
/// ))
/// .unwrap();
///
/// input.set(21).unwrap();
/// agenda.tick().unwrap();
/// assert_eq!(output.get_signal(), Signal::of(42));
/// assert!(double.start().is_err());
/// ```
pub trait Node {
    fn core(&self) -> &NodeCore;

    /// Subscribe this node's reactions to its input wires.
    fn start(&self) -> SimResult<()>;

    fn name(&self) -> &str {
        self.core().name()
    }

    fn delay(&self) -> Delay {
        self.core().delay()
    }
}

/// Start `node` and hand it back.
pub fn spawn<N: Node>(node: N) -> SimResult<N> {
    node.start()?;
    Ok(node)
}

// ── Reaction helpers ──────────────────────────────────────────────────

/// Current signal of a wire a reaction only reads; a dropped wire reads
/// as absent.
pub(crate) fn read<V: Clone>(wire: &WeakWire<V>) -> Signal<V> {
    wire.upgrade().map(|w| w.get_signal()).unwrap_or_default()
}

/// Write a reaction's result to its target wire.
pub(crate) fn write<V: Clone + Eq>(
    node: &str,
    target: &WeakWire<V>,
    signal: Signal<V>,
) -> SimResult<()> {
    match target.upgrade() {
        Some(wire) => wire.set_signal(signal),
        None => {
            warn!(node, "output wire dropped, reaction discarded");
            Ok(())
        }
    }
}
