//! Structured error types for the tickwire kernel.
//!
//! All fallible public APIs return `SimResult<T>`. Absence of a value
//! (`Signal::none()`) is ordinary data and never shows up here.

use crate::time::{Delay, Tick};

/// The top-level error type for the simulation kernel.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimError {
    // ── Time errors ───────────────────────────────────────

    /// `current + delay` does not fit in a `Tick`.
    #[error("tick overflow: {current} + {delay} is not representable")]
    TickOverflow { current: Tick, delay: Delay },

    /// A delay of zero ticks was requested.
    #[error("delay must be positive, got {ticks}")]
    NonPositiveDelay { ticks: u64 },

    // ── Scheduling errors ─────────────────────────────────

    /// Attempted to book an appointment at or before the current tick.
    #[error("cannot book an appointment at {requested} when now is {now}")]
    NonCausalAppointment { requested: Tick, now: Tick },

    // ── Construction errors ───────────────────────────────

    /// An N-ary node was built over an empty input list.
    #[error("node {node} needs at least one input wire")]
    NoInputs { node: String },

    /// A per-input parameter list does not match the number of inputs.
    #[error("node {node} expects {expected} parameters, got {actual}")]
    ArityMismatch {
        node: String,
        expected: usize,
        actual: usize,
    },

    /// `start` was called on a node that is already wired up.
    #[error("node {node} has already been started")]
    AlreadyStarted { node: String },

    // ── Node runtime errors ───────────────────────────────

    /// A counter's running total left the representable range.
    #[error("counter overflow: {value} + {step} exceeds u64")]
    CounterOverflow { value: u64, step: u64 },
}

/// Convenience alias for `Result<T, SimError>`.
pub type SimResult<T> = Result<T, SimError>;
