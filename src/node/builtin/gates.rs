//! Boolean gates. Every gate is started before it is returned.

use crate::agenda::Agenda;
use crate::combine::{Algebra, Combiner, FoldStyle};
use crate::error::SimResult;
use crate::time::Delay;
use crate::wire::Wire;

use crate::node::binary::Binary;
use crate::node::nary::Nary;
use crate::node::traits::{spawn, NodeCore};
use crate::node::unary::Unary;

pub type Gate = Binary<bool, bool, bool>;
pub type NaryGate = Nary<bool, bool, bool>;

pub fn inverter(
    agenda: &Agenda,
    delay: Delay,
    input: &Wire<bool>,
    output: &Wire<bool>,
) -> SimResult<Unary<bool, bool>> {
    spawn(Unary::new(NodeCore::new("not", agenda, delay), input, output, |v: &bool| !v))
}

pub fn and_gate(
    agenda: &Agenda,
    delay: Delay,
    a: &Wire<bool>,
    b: &Wire<bool>,
    output: &Wire<bool>,
) -> SimResult<Gate> {
    spawn(Binary::new(NodeCore::new("and", agenda, delay), a, b, output, |a, b| *a && *b))
}

pub fn or_gate(
    agenda: &Agenda,
    delay: Delay,
    a: &Wire<bool>,
    b: &Wire<bool>,
    output: &Wire<bool>,
) -> SimResult<Gate> {
    spawn(Binary::new(NodeCore::new("or", agenda, delay), a, b, output, |a, b| *a || *b))
}

pub fn xor_gate(
    agenda: &Agenda,
    delay: Delay,
    a: &Wire<bool>,
    b: &Wire<bool>,
    output: &Wire<bool>,
) -> SimResult<Gate> {
    spawn(Binary::new(NodeCore::new("xor", agenda, delay), a, b, output, |a, b| a != b))
}

pub fn nand_gate(
    agenda: &Agenda,
    delay: Delay,
    a: &Wire<bool>,
    b: &Wire<bool>,
    output: &Wire<bool>,
) -> SimResult<Gate> {
    spawn(Binary::new(NodeCore::new("nand", agenda, delay), a, b, output, |a, b| !(*a && *b)))
}

/// N-input AND, folded with either call convention.
pub fn and_all(
    agenda: &Agenda,
    delay: Delay,
    style: FoldStyle,
    inputs: &[Wire<bool>],
    output: &Wire<bool>,
) -> SimResult<NaryGate> {
    let combiner = Combiner::new(style, Algebra::new(|b: &bool| *b, |a, b| a && b));
    spawn(Nary::new(NodeCore::new("and-all", agenda, delay), inputs, output, combiner)?)
}

/// N-input OR, folded with either call convention.
pub fn or_all(
    agenda: &Agenda,
    delay: Delay,
    style: FoldStyle,
    inputs: &[Wire<bool>],
    output: &Wire<bool>,
) -> SimResult<NaryGate> {
    let combiner = Combiner::new(style, Algebra::new(|b: &bool| *b, |a, b| a || b));
    spawn(Nary::new(NodeCore::new("or-all", agenda, delay), inputs, output, combiner)?)
}
