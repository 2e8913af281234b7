//! `Nary` — N homogeneous input wires folded into one output.

use std::fmt;
use std::rc::Rc;

use crate::agenda::Callback;
use crate::combine::Combiner;
use crate::error::{SimError, SimResult};
use crate::signal::Signal;
use crate::wire::{WeakWire, Wire};

use super::traits::{read, write, Node, NodeCore};

/// Folds the signals of all inputs with a [`Combiner`] under the core's
/// policy.
///
/// When input `i` changes, the value delivered for `i` and the signals
/// every other input carries at that instant are collected at once; the
/// fold over that snapshot runs one delay later.
pub struct Nary<I, A, T> {
    core: NodeCore,
    inputs: Vec<Wire<I>>,
    output: Wire<T>,
    combiner: Combiner<I, A, T>,
}

impl<I, A, T> Nary<I, A, T> {
    /// Fails with [`SimError::NoInputs`] for an empty input list.
    pub fn new(
        core: NodeCore,
        inputs: &[Wire<I>],
        output: &Wire<T>,
        combiner: Combiner<I, A, T>,
    ) -> SimResult<Self> {
        if inputs.is_empty() {
            return Err(SimError::NoInputs {
                node: core.name().to_string(),
            });
        }
        Ok(Nary {
            core,
            inputs: inputs.to_vec(),
            output: output.clone(),
            combiner,
        })
    }

    pub fn inputs(&self) -> &[Wire<I>] {
        &self.inputs
    }

    pub fn output(&self) -> &Wire<T> {
        &self.output
    }

    pub fn combiner(&self) -> &Combiner<I, A, T> {
        &self.combiner
    }
}

impl<I, A, T> Node for Nary<I, A, T>
where
    I: Clone + Eq + 'static,
    A: 'static,
    T: Clone + Eq + 'static,
{
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn start(&self) -> SimResult<()> {
        self.core.begin_start()?;

        let reaction: Callback<Vec<Signal<I>>> = {
            let policy = self.core.policy();
            let name = self.core.name_handle();
            let output = self.output.downgrade();
            let combiner = self.combiner.clone();
            Rc::new(move |signals: Vec<Signal<I>>| {
                write(&name, &output, combiner.apply(policy, &signals))
            })
        };

        let peers: Rc<[WeakWire<I>]> = self.inputs.iter().map(Wire::downgrade).collect();
        for (index, input) in self.inputs.iter().enumerate() {
            let peers = Rc::clone(&peers);
            let capture = move |changed: Signal<I>| -> Vec<Signal<I>> {
                let mut signals: Vec<Signal<I>> = peers.iter().map(read).collect();
                signals[index] = changed;
                signals
            };
            self.core.observe(input, capture, Rc::clone(&reaction));
        }
        Ok(())
    }
}

impl<I: fmt::Debug, A, T: fmt::Debug> fmt::Debug for Nary<I, A, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Nary")
            .field("core", &self.core)
            .field("inputs", &self.inputs)
            .field("output", &self.output)
            .field("style", &self.combiner.style())
            .finish()
    }
}
