//! Half and full adders assembled from gates.
//!
//! The composites own their internal wires; dropping one stops the
//! propagation through it.

use crate::agenda::Agenda;
use crate::error::SimResult;
use crate::time::Delay;
use crate::wire::Wire;

use crate::node::unary::Unary;

use super::gates::{and_gate, inverter, or_gate, Gate};

/// `sum = (a OR b) AND NOT (a AND b)`, `carry = a AND b`.
#[derive(Debug)]
pub struct HalfAdder {
    delay: Delay,
    either: Wire<bool>,
    not_both: Wire<bool>,
    gates: (Gate, Gate, Unary<bool, bool>, Gate),
}

impl HalfAdder {
    /// Build and start every gate, each with delay `delay`.
    pub fn new(
        agenda: &Agenda,
        delay: Delay,
        a: &Wire<bool>,
        b: &Wire<bool>,
        sum: &Wire<bool>,
        carry: &Wire<bool>,
    ) -> SimResult<Self> {
        let either = Wire::named("half-adder.d");
        let not_both = Wire::named("half-adder.e");

        let or = or_gate(agenda, delay, a, b, &either)?;
        let and = and_gate(agenda, delay, a, b, carry)?;
        let not = inverter(agenda, delay, carry, &not_both)?;
        let out = and_gate(agenda, delay, &either, &not_both, sum)?;

        Ok(HalfAdder {
            delay,
            either,
            not_both,
            gates: (or, and, not, out),
        })
    }

    /// Ticks along the longest path, AND → NOT → AND.
    pub fn settle_ticks(&self) -> u64 {
        3 * self.delay.ticks()
    }

    /// `(a OR b)` and `NOT (a AND b)`, for inspection.
    pub fn internal_wires(&self) -> (&Wire<bool>, &Wire<bool>) {
        (&self.either, &self.not_both)
    }

    pub fn sum(&self) -> &Wire<bool> {
        self.gates.3.output()
    }

    pub fn carry(&self) -> &Wire<bool> {
        self.gates.1.output()
    }
}

/// Two half adders and an OR for the carry.
#[derive(Debug)]
pub struct FullAdder {
    delay: Delay,
    low: HalfAdder,
    high: HalfAdder,
    carry_or: Gate,
}

impl FullAdder {
    pub fn new(
        agenda: &Agenda,
        delay: Delay,
        a: &Wire<bool>,
        b: &Wire<bool>,
        carry_in: &Wire<bool>,
        sum: &Wire<bool>,
        carry_out: &Wire<bool>,
    ) -> SimResult<Self> {
        let partial_sum = Wire::named("full-adder.s");
        let low_carry = Wire::named("full-adder.c1");
        let high_carry = Wire::named("full-adder.c2");

        let low = HalfAdder::new(agenda, delay, b, carry_in, &partial_sum, &low_carry)?;
        let high = HalfAdder::new(agenda, delay, a, &partial_sum, sum, &high_carry)?;
        let carry_or = or_gate(agenda, delay, &low_carry, &high_carry, carry_out)?;

        Ok(FullAdder {
            delay,
            low,
            high,
            carry_or,
        })
    }

    /// Ticks along the longest path, through both half adders' sums.
    pub fn settle_ticks(&self) -> u64 {
        6 * self.delay.ticks()
    }

    pub fn sum(&self) -> &Wire<bool> {
        self.high.sum()
    }

    pub fn carry_out(&self) -> &Wire<bool> {
        self.carry_or.output()
    }

    /// The partial sum between the two half adders.
    pub fn partial_sum(&self) -> &Wire<bool> {
        self.low.sum()
    }
}
