//! Selectors that forward one of two inputs.
//!
//! Under `AbsentWins` a selector answers only once both inputs are
//! present. Under `PresentWins` it answers with its own side when that is
//! present and falls back to the other side otherwise, so it produces a
//! value as soon as either input has one.

use crate::error::SimResult;
use crate::wire::Wire;

use crate::node::binary::Binary;
use crate::node::traits::{spawn, NodeCore};

pub fn answer_first<V>(
    core: NodeCore,
    first: &Wire<V>,
    second: &Wire<V>,
    output: &Wire<V>,
) -> SimResult<Binary<V, V, V>>
where
    V: Clone + Eq + 'static,
{
    spawn(Binary::partial(core, first, second, output, |a, b| {
        a.or(b).cloned()
    }))
}

pub fn answer_second<V>(
    core: NodeCore,
    first: &Wire<V>,
    second: &Wire<V>,
    output: &Wire<V>,
) -> SimResult<Binary<V, V, V>>
where
    V: Clone + Eq + 'static,
{
    spawn(Binary::partial(core, first, second, output, |a, b| {
        b.or(a).cloned()
    }))
}
