//! `Unary` — one input wire, one output wire, a pure transform.

use std::fmt;
use std::rc::Rc;

use crate::error::SimResult;
use crate::signal::Signal;
use crate::wire::Wire;

use super::traits::{write, Node, NodeCore};

/// Writes `f(input)` to `output` one delay after every input change.
/// An absent input yields an absent output.
pub struct Unary<I, O> {
    core: NodeCore,
    input: Wire<I>,
    output: Wire<O>,
    f: Rc<dyn Fn(&I) -> O>,
}

impl<I, O> Unary<I, O> {
    pub fn new<F>(core: NodeCore, input: &Wire<I>, output: &Wire<O>, f: F) -> Self
    where
        F: Fn(&I) -> O + 'static,
    {
        Unary {
            core,
            input: input.clone(),
            output: output.clone(),
            f: Rc::new(f),
        }
    }

    pub fn input(&self) -> &Wire<I> {
        &self.input
    }

    pub fn output(&self) -> &Wire<O> {
        &self.output
    }
}

impl<I, O> Node for Unary<I, O>
where
    I: Clone + Eq + 'static,
    O: Clone + Eq + 'static,
{
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn start(&self) -> SimResult<()> {
        self.core.begin_start()?;

        let name = self.core.name_handle();
        let output = self.output.downgrade();
        let f = Rc::clone(&self.f);
        self.core.observe(
            &self.input,
            |signal| signal,
            Rc::new(move |signal: Signal<I>| write(&name, &output, signal.map(|v| f(&v)))),
        );
        Ok(())
    }
}

impl<I: fmt::Debug, O: fmt::Debug> fmt::Debug for Unary<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unary")
            .field("core", &self.core)
            .field("input", &self.input)
            .field("output", &self.output)
            .finish_non_exhaustive()
    }
}
