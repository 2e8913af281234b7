//! Built-in nodes — logic gates, adders, a counter, selectors and a
//! weighted-sum neuron.
//!
//! None of these add mechanism: they are all `Unary`, `Binary` or `Nary`
//! instances, composites of those, or (the counter) a node built directly
//! on `NodeCore::observe`.

pub mod adder;
pub mod counter;
pub mod gates;
pub mod neuron;
pub mod select;

pub use adder::{FullAdder, HalfAdder};
pub use counter::Counter;
pub use gates::{and_all, and_gate, inverter, nand_gate, or_all, or_gate, xor_gate};
pub use neuron::{weighted_sum, Level};
pub use select::{answer_first, answer_second};
