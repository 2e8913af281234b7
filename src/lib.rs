//! # tickwire — Discrete-Event Signal Propagation
//!
//! A simulation kernel for networks of wires connected by delayed nodes,
//! in the tradition of digital-circuit simulators. No async, no threads,
//! no wall-clock time: a caller changes wires, advances a logical clock
//! and watches changes ripple through the network.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────┐
//! │  Nodes (gates, adders…)  │ ← react to wire changes after a delay
//! │  ┌────────────────────┐  │
//! │  │ Combination algebra│  │ ← folds N optional inputs into one
//! │  └────────────────────┘  │
//! │  ┌────────────────────┐  │
//! │  │       Wires        │  │ ← current Signal + change listeners
//! │  └────────────────────┘  │
//! │  ┌────────────────────┐  │
//! │  │       Agenda       │  │ ← Tick → FIFO queue of callbacks
//! │  └────────────────────┘  │
//! │  ┌────────────────────┐  │
//! │  │   Tick / Delay     │  │ ← logical clock
//! │  └────────────────────┘  │
//! └──────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use tickwire::{Agenda, Delay, HalfAdder, Signal, Wire};
//!
//! let agenda = Agenda::new();
//! let (a, b, sum, carry) = (Wire::new(), Wire::new(), Wire::new(), Wire::new());
//! let adder = HalfAdder::new(&agenda, Delay::ONE, &a, &b, &sum, &carry).unwrap();
//!
//! a.set(true).unwrap();
//! b.set(true).unwrap();
//! agenda.run_for(adder.settle_ticks()).unwrap();
//!
//! assert_eq!(sum.get_signal(), Signal::of(false));
//! assert_eq!(carry.get_signal(), Signal::of(true));
//! ```
//!
//! Everything is single-threaded: the types here are `!Send`, and every
//! listener and appointment runs to completion inside the `set_signal` or
//! `tick` call that triggered it.

pub mod agenda;
pub mod combine;
pub mod error;
pub mod node;
pub mod probe;
pub mod signal;
pub mod time;
pub mod wire;

// Re-exports for convenience.
pub use agenda::{Agenda, Callback};
pub use combine::{Accumulable, Algebra, Combiner, FoldStyle, WhenCombining};
pub use error::{SimError, SimResult};
pub use node::{spawn, Binary, Counter, FullAdder, HalfAdder, Nary, Node, NodeCore, Unary};
pub use probe::{Change, Probe};
pub use signal::Signal;
pub use time::{Delay, Tick};
pub use wire::{Listener, WeakWire, Wire};
