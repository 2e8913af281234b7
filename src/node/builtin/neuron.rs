//! A static weighted-sum neuron: fires when `Σ wᵢ·xᵢ ≥ threshold`.
//!
//! The weights are fixed at construction; nothing here learns.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::agenda::Agenda;
use crate::combine::{Algebra, Combiner};
use crate::error::{SimError, SimResult};
use crate::time::Delay;
use crate::wire::Wire;

use crate::node::nary::Nary;
use crate::node::traits::{spawn, NodeCore};

/// A neuron input level.
///
/// Equality is bitwise on the underlying `f64`, so `NaN` equals itself
/// and a wire carrying `NaN` suppresses a repeated `NaN` write like any
/// other value. `0.0` and `-0.0` compare unequal.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Level(pub f64);

impl Level {
    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl PartialEq for Level {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for Level {}

impl Hash for Level {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl From<f64> for Level {
    fn from(value: f64) -> Self {
        Level(value)
    }
}

impl From<Level> for f64 {
    fn from(level: Level) -> Self {
        level.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

pub type Neuron = Nary<Level, f64, bool>;

/// Build and start a neuron over `inputs`, one weight per input.
///
/// Uses the indexed collect fold so each input meets its own weight.
pub fn weighted_sum(
    agenda: &Agenda,
    delay: Delay,
    inputs: &[Wire<Level>],
    weights: Vec<f64>,
    threshold: f64,
    output: &Wire<bool>,
) -> SimResult<Neuron> {
    if weights.len() != inputs.len() {
        return Err(SimError::ArityMismatch {
            node: "neuron".into(),
            expected: inputs.len(),
            actual: weights.len(),
        });
    }
    let algebra = Algebra::indexed(move |i, x: &Level| weights[i] * x.get(), |a, b| a + b);
    let combiner = Combiner::collect(algebra).finish_with(move |total| total >= threshold);
    spawn(Nary::new(NodeCore::new("neuron", agenda, delay), inputs, output, combiner)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_level_equality_is_bitwise() {
        assert_eq!(Level(f64::NAN), Level(f64::NAN));
        assert_eq!(Level(1.5), Level::from(1.5));
        assert_ne!(Level(0.0), Level(-0.0));
        assert_eq!(f64::from(Level(2.0)), 2.0);
        assert_eq!(Level(0.25).to_string(), "0.25");
    }

    #[test]
    fn test_repeated_nan_write_notifies_once() {
        let wire = Wire::new();
        let hits = Rc::new(Cell::new(0u32));
        {
            let hits = Rc::clone(&hits);
            wire.on_change(Rc::new(move |_| {
                hits.set(hits.get() + 1);
                Ok(())
            }));
        }
        wire.set(Level(f64::NAN)).unwrap();
        wire.set(Level(f64::NAN)).unwrap();
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_nan_input_reacts_once() {
        let agenda = Agenda::new();
        let inputs: Vec<Wire<Level>> = (0..2).map(|_| Wire::new()).collect();
        let out = Wire::new();
        let weights = vec![1.0, 1.0];
        let _neuron = weighted_sum(&agenda, Delay::ONE, &inputs, weights, 0.0, &out).unwrap();

        inputs[1].set(Level(0.0)).unwrap();
        inputs[0].set(Level(f64::NAN)).unwrap();
        inputs[0].set(Level(f64::NAN)).unwrap();
        assert_eq!(agenda.pending(), 2);
        agenda.tick().unwrap();
        // NaN never reaches the threshold.
        assert_eq!(out.get_signal(), crate::signal::Signal::of(false));
    }
}
