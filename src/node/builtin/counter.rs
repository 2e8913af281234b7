//! `Counter` — a node that reads its own output.

use std::rc::Rc;

use crate::agenda::Agenda;
use crate::error::{SimError, SimResult};
use crate::signal::Signal;
use crate::time::Delay;
use crate::wire::Wire;

use crate::node::traits::{write, Node, NodeCore};

/// Adds `step` to its output wire one delay after every change of that
/// same wire.
///
/// Starting writes `initial`, so with a one-tick delay the output reads
/// `initial + k * step` after `k` ticks. The feedback loop is legal because
/// the delay keeps every write on a later tick than the one that caused it.
/// Exceeding `u64` fails the tick with [`SimError::CounterOverflow`].
#[derive(Debug)]
pub struct Counter {
    core: NodeCore,
    output: Wire<u64>,
    initial: u64,
    step: u64,
}

impl Counter {
    pub fn new(agenda: &Agenda, delay: Delay, output: &Wire<u64>, initial: u64, step: u64) -> Self {
        Counter {
            core: NodeCore::new("counter", agenda, delay),
            output: output.clone(),
            initial,
            step,
        }
    }

    pub fn output(&self) -> &Wire<u64> {
        &self.output
    }

    pub fn step(&self) -> u64 {
        self.step
    }
}

impl Node for Counter {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn start(&self) -> SimResult<()> {
        self.core.begin_start()?;

        let name = self.core.name_handle();
        let target = self.output.downgrade();
        let step = self.step;
        let delayed = self.core.observe(
            &self.output,
            |signal| signal,
            Rc::new(move |signal: Signal<u64>| match signal.into_value() {
                Some(value) => {
                    let next = value
                        .checked_add(step)
                        .ok_or(SimError::CounterOverflow { value, step })?;
                    write(&name, &target, Signal::of(next))
                }
                None => Ok(()),
            }),
        );

        let seed = Signal::of(self.initial);
        if self.output.get_signal() == seed {
            // No change to observe, so book the first increment directly.
            delayed(seed)
        } else {
            self.output.set_signal(seed)
        }
    }
}
