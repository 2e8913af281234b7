//! `Binary` — two input wires, one output wire.
//!
//! On a change of either input the node pairs the delivered value with
//! the other input's signal at that same instant. The pair is what crosses
//! the delay, so the output at `t + d` reflects the inputs as of `t`.
//!
//! | inputs            | `AbsentWins` | `PresentWins`        |
//! |---|---|---|
//! | both present      | `f(a, b)`    | `f(a, b)`            |
//! | one absent        | none         | `f` sees `None` side |
//! | both absent       | none         | none                 |

use std::fmt;
use std::rc::Rc;

use crate::agenda::Callback;
use crate::combine::WhenCombining;
use crate::error::SimResult;
use crate::signal::Signal;
use crate::wire::Wire;

use super::traits::{read, write, Node, NodeCore};

type PartialFn<A, B, O> = Rc<dyn Fn(Option<&A>, Option<&B>) -> Option<O>>;

/// A two-input node. See the module docs for the absence table.
pub struct Binary<A, B, O> {
    core: NodeCore,
    first: Wire<A>,
    second: Wire<B>,
    output: Wire<O>,
    f: PartialFn<A, B, O>,
}

impl<A: 'static, B: 'static, O: 'static> Binary<A, B, O> {
    /// A node over a total function. With one side absent a total
    /// function has nothing to work with, so the output is absent under
    /// either policy.
    pub fn new<F>(
        core: NodeCore,
        first: &Wire<A>,
        second: &Wire<B>,
        output: &Wire<O>,
        f: F,
    ) -> Self
    where
        F: Fn(&A, &B) -> O + 'static,
    {
        Self::partial(core, first, second, output, move |a, b| Some(f(a?, b?)))
    }

    /// A node over a partial function, consulted with a `None` side when
    /// the core's policy is [`WhenCombining::PresentWins`].
    pub fn partial<F>(
        core: NodeCore,
        first: &Wire<A>,
        second: &Wire<B>,
        output: &Wire<O>,
        f: F,
    ) -> Self
    where
        F: Fn(Option<&A>, Option<&B>) -> Option<O> + 'static,
    {
        Binary {
            core,
            first: first.clone(),
            second: second.clone(),
            output: output.clone(),
            f: Rc::new(f),
        }
    }
}

impl<A, B, O> Binary<A, B, O> {
    pub fn first(&self) -> &Wire<A> {
        &self.first
    }

    pub fn second(&self) -> &Wire<B> {
        &self.second
    }

    pub fn output(&self) -> &Wire<O> {
        &self.output
    }
}

fn evaluate<A, B, O>(
    policy: WhenCombining,
    f: &dyn Fn(Option<&A>, Option<&B>) -> Option<O>,
    a: &Signal<A>,
    b: &Signal<B>,
) -> Signal<O> {
    match (a.value(), b.value()) {
        (None, None) => Signal::none(),
        (Some(_), None) | (None, Some(_)) if policy == WhenCombining::AbsentWins => Signal::none(),
        (a, b) => Signal::from(f(a, b)),
    }
}

impl<A, B, O> Node for Binary<A, B, O>
where
    A: Clone + Eq + 'static,
    B: Clone + Eq + 'static,
    O: Clone + Eq + 'static,
{
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn start(&self) -> SimResult<()> {
        self.core.begin_start()?;

        let reaction: Callback<(Signal<A>, Signal<B>)> = {
            let policy = self.core.policy();
            let name = self.core.name_handle();
            let output = self.output.downgrade();
            let f = Rc::clone(&self.f);
            Rc::new(move |(a, b): (Signal<A>, Signal<B>)| {
                write(&name, &output, evaluate(policy, &*f, &a, &b))
            })
        };

        let second = self.second.downgrade();
        self.core.observe(
            &self.first,
            move |a: Signal<A>| (a, read(&second)),
            Rc::clone(&reaction),
        );

        let first = self.first.downgrade();
        self.core.observe(
            &self.second,
            move |b: Signal<B>| (read(&first), b),
            reaction,
        );
        Ok(())
    }
}

impl<A: fmt::Debug, B: fmt::Debug, O: fmt::Debug> fmt::Debug for Binary<A, B, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binary")
            .field("core", &self.core)
            .field("first", &self.first)
            .field("second", &self.second)
            .field("output", &self.output)
            .finish_non_exhaustive()
    }
}
