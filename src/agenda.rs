//! The agenda: current time plus per-tick queues of pending callbacks.
//!
//! Appointments are kept in a `BTreeMap<Tick, VecDeque<_>>`. Each tick
//! owns exactly one FIFO queue, so two runs that book the same work in
//! the same order always execute it in the same order.

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;

use tracing::{debug, trace};

use crate::error::{SimError, SimResult};
use crate::time::{Delay, Tick};

/// A shared, fallible callback taking one value.
///
/// Wire listeners and node reactions are both `Callback`s; the error path
/// lets an overflow raised deep inside a reaction reach whoever called
/// [`Agenda::tick`] or [`Wire::set_signal`](crate::wire::Wire::set_signal).
pub type Callback<V> = Rc<dyn Fn(V) -> SimResult<()>>;

/// A booked `(callback, value)` pair, already bound together.
struct Appointment {
    seq: u64,
    action: Box<dyn FnOnce() -> SimResult<()>>,
}

struct AgendaState {
    now: Tick,
    appointments: BTreeMap<Tick, VecDeque<Appointment>>,
    /// Sequence number handed to the next booking.
    next_seq: u64,
    /// Appointments run so far.
    executed: u64,
}

/// The scheduler owning logical time for one network.
///
/// `Agenda` is a cheap handle: clones share the same clock and queues.
/// Every node of a network holds a clone of the one agenda it runs on.
/// The agenda is single-threaded (`!Send`); confine a network to the
/// thread that built it.
#[derive(Clone)]
pub struct Agenda {
    state: Rc<RefCell<AgendaState>>,
}

impl Agenda {
    /// Create an agenda at [`Tick::ZERO`] with nothing booked.
    pub fn new() -> Self {
        Self::starting_at(Tick::ZERO)
    }

    /// Create an agenda whose clock starts at `now`.
    pub fn starting_at(now: Tick) -> Self {
        Agenda {
            state: Rc::new(RefCell::new(AgendaState {
                now,
                appointments: BTreeMap::new(),
                next_seq: 0,
                executed: 0,
            })),
        }
    }

    /// Current instant.
    #[inline]
    pub fn now(&self) -> Tick {
        self.state.borrow().now
    }

    /// Wrap `callback` so that calling the wrapper books `callback` to run
    /// with the same value `delay` ticks later.
    ///
    /// The target tick is computed when the wrapper is called, not when it
    /// is created, and not when the appointment finally runs.
    pub fn after_delay<V: 'static>(&self, delay: Delay, callback: Callback<V>) -> Callback<V> {
        let agenda = self.clone();
        Rc::new(move |value: V| {
            let at = agenda.now().plus(delay)?;
            agenda.schedule(at, Rc::clone(&callback), value)
        })
    }

    /// Append `(callback, value)` to the FIFO queue for `at`.
    ///
    /// `at` must lie strictly in the future; anything else is rejected
    /// with [`SimError::NonCausalAppointment`].
    pub fn schedule<V: 'static>(&self, at: Tick, callback: Callback<V>, value: V) -> SimResult<()> {
        let mut state = self.state.borrow_mut();
        if !state.now.is_before(at) {
            return Err(SimError::NonCausalAppointment {
                requested: at,
                now: state.now,
            });
        }
        let seq = state.next_seq;
        state.next_seq += 1;
        state.appointments.entry(at).or_default().push_back(Appointment {
            seq,
            action: Box::new(move || callback(value)),
        });
        trace!(%at, seq, "appointment booked");
        Ok(())
    }

    /// Advance the clock by one tick and run everything booked for it.
    ///
    /// The queue for the new instant is detached before any callback runs,
    /// so work booked while draining always lands on a later tick and
    /// waits for a later call. If an appointment fails, its error is
    /// returned at once and the rest of that tick's queue is dropped.
    pub fn tick(&self) -> SimResult<Tick> {
        let (next, due) = {
            let mut state = self.state.borrow_mut();
            let next = state.now.plus(Delay::ONE)?;
            state.now = next;
            (next, state.appointments.remove(&next).unwrap_or_default())
        };

        if !due.is_empty() {
            debug!(tick = %next, appointments = due.len(), "running agenda");
        }
        for appointment in due {
            trace!(tick = %next, seq = appointment.seq, "appointment running");
            (appointment.action)()?;
            self.state.borrow_mut().executed += 1;
        }
        Ok(next)
    }

    /// Call [`tick`](Self::tick) `n` times; returns the final instant.
    pub fn run_for(&self, n: u64) -> SimResult<Tick> {
        for _ in 0..n {
            self.tick()?;
        }
        Ok(self.now())
    }

    /// Tick until nothing is booked or `max_ticks` ticks have passed,
    /// whichever comes first. Returns the number of ticks taken.
    ///
    /// A network with a feedback loop (a counter) never goes idle, hence
    /// the limit.
    pub fn run_until_idle(&self, max_ticks: u64) -> SimResult<u64> {
        let mut taken = 0u64;
        while taken < max_ticks && !self.is_idle() {
            self.tick()?;
            taken += 1;
        }
        Ok(taken)
    }

    /// Number of booked appointments that have not run yet.
    pub fn pending(&self) -> usize {
        self.state
            .borrow()
            .appointments
            .values()
            .map(VecDeque::len)
            .sum()
    }

    /// Returns `true` if nothing is booked.
    pub fn is_idle(&self) -> bool {
        self.state.borrow().appointments.is_empty()
    }

    /// Earliest tick with a booked appointment.
    pub fn next_appointment(&self) -> Option<Tick> {
        self.state.borrow().appointments.keys().next().copied()
    }

    /// Total appointments run so far.
    pub fn executed(&self) -> u64 {
        self.state.borrow().executed
    }
}

impl Default for Agenda {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Agenda {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agenda")
            .field("now", &self.now())
            .field("pending", &self.pending())
            .field("executed", &self.executed())
            .finish()
    }
}
