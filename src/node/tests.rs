//! Network-level scenarios for the node shapes and built-in nodes.

use crate::agenda::Agenda;
use crate::combine::{FoldStyle, WhenCombining};
use crate::error::SimError;
use crate::node::builtin::{
    and_all, and_gate, answer_first, answer_second, inverter, nand_gate, or_all, or_gate,
    weighted_sum, xor_gate, Level,
};
use crate::node::{spawn, Binary, Counter, FullAdder, HalfAdder, Nary, Node, NodeCore, Unary};
use crate::probe::{Change, Probe};
use crate::signal::Signal;
use crate::time::{Delay, Tick};
use crate::wire::Wire;

fn delay(ticks: u64) -> Delay {
    Delay::new(ticks).unwrap()
}

fn bool_wires(n: usize) -> Vec<Wire<bool>> {
    (0..n).map(|_| Wire::new()).collect()
}

// ── Delay ordering ────────────────────────────────────────────────────

#[test]
fn test_output_appears_exactly_after_delay() {
    let agenda = Agenda::new();
    let input = Wire::new();
    let output = Wire::new();
    let _inc = spawn(Unary::new(
        NodeCore::new("inc", &agenda, delay(3)),
        &input,
        &output,
        |v: &i32| v + 1,
    ))
    .unwrap();

    input.set(1).unwrap();
    agenda.run_for(3).unwrap();
    assert_eq!(output.get_signal(), Signal::of(2));

    // Change at t=5, answer at t=8, old value in between.
    agenda.run_for(2).unwrap();
    input.set(10).unwrap();
    for t in 6..8 {
        agenda.tick().unwrap();
        assert_eq!(agenda.now(), Tick::new(t));
        assert_eq!(output.get_signal(), Signal::of(2), "changed early at T={}", t);
    }
    agenda.tick().unwrap();
    assert_eq!(output.get_signal(), Signal::of(11));
}

#[test]
fn test_binary_staggered_inputs_respect_delay() {
    let agenda = Agenda::new();
    let (a, b, out) = (Wire::new(), Wire::new(), Wire::new());
    let _and = and_gate(&agenda, delay(2), &a, &b, &out).unwrap();

    a.set(true).unwrap();
    b.set(true).unwrap();
    agenda.tick().unwrap();
    a.set(false).unwrap();

    // The t=0 change answers at t=2 and must not see the t=1 change.
    agenda.tick().unwrap();
    assert_eq!(out.get_signal(), Signal::of(true));
    agenda.tick().unwrap();
    assert_eq!(out.get_signal(), Signal::of(false));
}

#[test]
fn test_nary_staggered_inputs_respect_delay() {
    for style in [FoldStyle::Reduce, FoldStyle::Collect] {
        let agenda = Agenda::new();
        let inputs = bool_wires(3);
        let out = Wire::new();
        let _and = and_all(&agenda, delay(2), style, &inputs, &out).unwrap();
        let log = Probe::attach("and-all", &agenda, &out);

        for input in &inputs {
            input.set(true).unwrap();
        }
        agenda.tick().unwrap();
        inputs[1].set(false).unwrap();
        agenda.run_for(2).unwrap();

        assert_eq!(
            log.changes(),
            vec![
                Change { tick: Tick::new(2), signal: Signal::of(true) },
                Change { tick: Tick::new(3), signal: Signal::of(false) },
            ],
            "{:?}",
            style
        );
    }
}

#[test]
fn test_unary_absent_input_clears_output() {
    let agenda = Agenda::new();
    let input = Wire::new();
    let output = Wire::new();
    let _neg = spawn(Unary::new(
        NodeCore::new("neg", &agenda, Delay::ONE),
        &input,
        &output,
        |v: &i64| -v,
    ))
    .unwrap();

    input.set(5).unwrap();
    agenda.tick().unwrap();
    assert_eq!(output.get_signal(), Signal::of(-5));
    input.set_signal(Signal::none()).unwrap();
    agenda.tick().unwrap();
    assert_eq!(output.get_signal(), Signal::none());
}

#[test]
fn test_start_twice_fails() {
    let agenda = Agenda::new();
    let node = Unary::new(
        NodeCore::new("once", &agenda, Delay::ONE),
        &Wire::new(),
        &Wire::new(),
        |v: &bool| *v,
    );
    node.start().unwrap();
    assert_eq!(
        node.start().unwrap_err(),
        SimError::AlreadyStarted { node: "once".into() }
    );
    assert_eq!(node.input().listener_count(), 1);
}

#[test]
fn test_unstarted_node_is_inert() {
    let agenda = Agenda::new();
    let input = Wire::new();
    let output = Wire::new();
    let node = Unary::new(NodeCore::new("idle", &agenda, Delay::ONE), &input, &output, |v: &u8| *v);

    input.set(3).unwrap();
    agenda.run_for(3).unwrap();
    assert_eq!(output.get_signal(), Signal::none());
    assert!(!node.core().is_started());
    assert_eq!(node.name(), "idle");
    assert_eq!(node.delay(), Delay::ONE);
}

#[test]
fn test_booking_overflow_reaches_set_signal_caller() {
    let agenda = Agenda::starting_at(Tick::new(u64::MAX - 1));
    let input = Wire::new();
    let output = Wire::new();
    let _slow = inverter(&agenda, delay(2), &input, &output).unwrap();

    let err = input.set(true).unwrap_err();
    assert_eq!(
        err,
        SimError::TickOverflow {
            current: Tick::new(u64::MAX - 1),
            delay: delay(2),
        }
    );
}

// ── Gates ─────────────────────────────────────────────────────────────

#[test]
fn test_and_gate_after_one_tick() {
    let agenda = Agenda::new();
    let [in1, in2, out] = [Wire::new(), Wire::new(), Wire::new()];
    let _and = and_gate(&agenda, Delay::ONE, &in1, &in2, &out).unwrap();

    in1.set(false).unwrap();
    in2.set(true).unwrap();
    assert_eq!(out.get_signal(), Signal::none());
    agenda.tick().unwrap();
    assert_eq!(out.get_signal(), Signal::of(false));

    in1.set(true).unwrap();
    agenda.tick().unwrap();
    assert_eq!(out.get_signal(), Signal::of(true));
}

#[test]
fn test_binary_gates_truth_tables() {
    let cases = [(false, false), (false, true), (true, false), (true, true)];
    for (a_val, b_val) in cases {
        let agenda = Agenda::new();
        let (a, b) = (Wire::new(), Wire::new());
        let outs = bool_wires(4);
        let _gates = [
            and_gate(&agenda, Delay::ONE, &a, &b, &outs[0]).unwrap(),
            or_gate(&agenda, Delay::ONE, &a, &b, &outs[1]).unwrap(),
            xor_gate(&agenda, Delay::ONE, &a, &b, &outs[2]).unwrap(),
            nand_gate(&agenda, Delay::ONE, &a, &b, &outs[3]).unwrap(),
        ];
        a.set(a_val).unwrap();
        b.set(b_val).unwrap();
        agenda.tick().unwrap();

        let expected = [a_val && b_val, a_val || b_val, a_val != b_val, !(a_val && b_val)];
        for (out, want) in outs.iter().zip(expected) {
            assert_eq!(out.get_signal(), Signal::of(want), "inputs ({}, {})", a_val, b_val);
        }
    }
}

#[test]
fn test_and_all_scenarios() {
    for style in [FoldStyle::Reduce, FoldStyle::Collect] {
        let agenda = Agenda::new();
        let inputs = bool_wires(4);
        let out = Wire::new();
        let _and = and_all(&agenda, Delay::ONE, style, &inputs, &out).unwrap();

        for w in &inputs {
            w.set(true).unwrap();
        }
        agenda.tick().unwrap();
        assert_eq!(out.get_signal(), Signal::of(true));

        inputs[2].set(false).unwrap();
        agenda.tick().unwrap();
        assert_eq!(out.get_signal(), Signal::of(false));

        inputs[2].set_signal(Signal::none()).unwrap();
        agenda.tick().unwrap();
        assert_eq!(out.get_signal(), Signal::none());
    }
}

#[test]
fn test_and_all_true_true_none_is_none() {
    let agenda = Agenda::new();
    let inputs = bool_wires(3);
    let out = Wire::new();
    let _and = and_all(&agenda, Delay::ONE, FoldStyle::Collect, &inputs, &out).unwrap();
    inputs[0].set(true).unwrap();
    inputs[1].set(true).unwrap();
    agenda.tick().unwrap();
    assert_eq!(out.get_signal(), Signal::none());
}

#[test]
fn test_reduce_and_collect_nodes_agree() {
    let choices = [Signal::of(true), Signal::of(false), Signal::none()];
    for x in &choices {
        for y in &choices {
            for z in &choices {
                let agenda = Agenda::new();
                let inputs = bool_wires(3);
                let (by_reduce, by_collect) = (Wire::new(), Wire::new());
                let (reduce, collect) = (FoldStyle::Reduce, FoldStyle::Collect);
                let _r = and_all(&agenda, Delay::ONE, reduce, &inputs, &by_reduce).unwrap();
                let _c = and_all(&agenda, Delay::ONE, collect, &inputs, &by_collect).unwrap();

                for (w, s) in inputs.iter().zip([x, y, z]) {
                    w.set_signal(s.clone()).unwrap();
                }
                agenda.run_until_idle(5).unwrap();
                assert_eq!(by_reduce.get_signal(), by_collect.get_signal(), "{:?}", (x, y, z));
            }
        }
    }
}

#[test]
fn test_or_all_present_wins() {
    let agenda = Agenda::new();
    let inputs = bool_wires(3);
    let out = Wire::new();
    let combiner = crate::combine::Combiner::reduce(crate::combine::Algebra::new(
        |b: &bool| *b,
        |a, b| a || b,
    ));
    let _or = spawn(
        Nary::new(
            NodeCore::new("or-any", &agenda, Delay::ONE).with_policy(WhenCombining::PresentWins),
            &inputs,
            &out,
            combiner,
        )
        .unwrap(),
    )
    .unwrap();

    inputs[1].set(false).unwrap();
    agenda.tick().unwrap();
    assert_eq!(out.get_signal(), Signal::of(false));
    inputs[2].set(true).unwrap();
    agenda.tick().unwrap();
    assert_eq!(out.get_signal(), Signal::of(true));
}

#[test]
fn test_or_all_absent_wins_waits_for_every_input() {
    let agenda = Agenda::new();
    let inputs = bool_wires(2);
    let out = Wire::new();
    let _or = or_all(&agenda, Delay::ONE, FoldStyle::Reduce, &inputs, &out).unwrap();
    inputs[0].set(true).unwrap();
    agenda.tick().unwrap();
    assert_eq!(out.get_signal(), Signal::none());
    inputs[1].set(false).unwrap();
    agenda.tick().unwrap();
    assert_eq!(out.get_signal(), Signal::of(true));
}

#[test]
fn test_nary_without_inputs_rejected() {
    let agenda = Agenda::new();
    let err = and_all(&agenda, Delay::ONE, FoldStyle::Reduce, &[], &Wire::new()).unwrap_err();
    assert_eq!(err, SimError::NoInputs { node: "and-all".into() });
}

#[test]
fn test_nodes_are_debuggable() {
    let agenda = Agenda::new();
    let inputs = bool_wires(2);
    let out = Wire::named("out");
    let and = and_all(&agenda, Delay::ONE, FoldStyle::Collect, &inputs, &out).unwrap();
    let shown = format!("{:?}", and);
    assert!(shown.contains("and-all"), "{}", shown);
    assert!(shown.contains("Collect"), "{}", shown);

    let gate = and_gate(&agenda, Delay::ONE, &inputs[0], &inputs[1], &out).unwrap();
    assert!(format!("{:?}", gate).starts_with("Binary"));
}

// ── Selectors ─────────────────────────────────────────────────────────

#[test]
fn test_selectors_exhaustive() {
    let sides = [Signal::of(1u8), Signal::none()];
    let seconds = [Signal::of(2u8), Signal::none()];
    for policy in [WhenCombining::AbsentWins, WhenCombining::PresentWins] {
        for first in &sides {
            for second in &seconds {
                let agenda = Agenda::new();
                let (a, b) = (Wire::new(), Wire::new());
                let (out_first, out_second) = (Wire::new(), Wire::new());
                let core =
                    |name: &str| NodeCore::new(name, &agenda, Delay::ONE).with_policy(policy);
                let _f = answer_first(core("first"), &a, &b, &out_first).unwrap();
                let _s = answer_second(core("second"), &a, &b, &out_second).unwrap();

                a.set_signal(first.clone()).unwrap();
                b.set_signal(second.clone()).unwrap();
                agenda.tick().unwrap();

                let present = (first.is_present(), second.is_present());
                let (want_first, want_second) = match (policy, present.0, present.1) {
                    (_, true, true) => (Signal::of(1), Signal::of(2)),
                    (_, false, false) => (Signal::none(), Signal::none()),
                    (WhenCombining::AbsentWins, _, _) => (Signal::none(), Signal::none()),
                    (WhenCombining::PresentWins, true, false) => (Signal::of(1), Signal::of(1)),
                    (WhenCombining::PresentWins, false, true) => (Signal::of(2), Signal::of(2)),
                };
                let case = format!("{:?} first={:?} second={:?}", policy, first, second);
                assert_eq!(out_first.get_signal(), want_first, "answer_first {}", case);
                assert_eq!(out_second.get_signal(), want_second, "answer_second {}", case);
            }
        }
    }
}

#[test]
fn test_selector_follows_late_input() {
    let agenda = Agenda::new();
    let (a, b, out) = (Wire::new(), Wire::new(), Wire::new());
    let core = NodeCore::new("first", &agenda, Delay::ONE).with_policy(WhenCombining::PresentWins);
    let _sel = answer_first(core, &a, &b, &out).unwrap();

    b.set("fallback").unwrap();
    agenda.tick().unwrap();
    assert_eq!(out.get_signal(), Signal::of("fallback"));
    a.set("own").unwrap();
    agenda.tick().unwrap();
    assert_eq!(out.get_signal(), Signal::of("own"));
}

#[test]
fn test_binary_total_fn_under_present_wins_stays_absent() {
    let agenda = Agenda::new();
    let (a, b, out) = (Wire::new(), Wire::new(), Wire::new());
    let core = NodeCore::new("sum", &agenda, Delay::ONE).with_policy(WhenCombining::PresentWins);
    let _sum = spawn(Binary::new(core, &a, &b, &out, |x: &u32, y: &u32| x + y)).unwrap();

    a.set(4).unwrap();
    agenda.tick().unwrap();
    assert_eq!(out.get_signal(), Signal::none());
    b.set(5).unwrap();
    agenda.tick().unwrap();
    assert_eq!(out.get_signal(), Signal::of(9));
}

// ── Adders ────────────────────────────────────────────────────────────

fn half_adder_run(a_val: bool, b_val: bool) -> (Signal<bool>, Signal<bool>) {
    let agenda = Agenda::new();
    let (a, b, sum, carry) = (Wire::new(), Wire::new(), Wire::new(), Wire::new());
    let adder = HalfAdder::new(&agenda, Delay::ONE, &a, &b, &sum, &carry).unwrap();

    a.set(a_val).unwrap();
    b.set(b_val).unwrap();
    agenda.run_for(adder.settle_ticks()).unwrap();
    (sum.get_signal(), carry.get_signal())
}

#[test]
fn test_half_adder() {
    assert_eq!(half_adder_run(true, true), (Signal::of(false), Signal::of(true)));
    assert_eq!(half_adder_run(false, true), (Signal::of(true), Signal::of(false)));
    assert_eq!(half_adder_run(true, false), (Signal::of(true), Signal::of(false)));
    assert_eq!(half_adder_run(false, false), (Signal::of(false), Signal::of(false)));
}

#[test]
fn test_half_adder_wires_and_idle() {
    let agenda = Agenda::new();
    let (a, b, sum, carry) = (Wire::new(), Wire::new(), Wire::new(), Wire::new());
    let adder = HalfAdder::new(&agenda, delay(2), &a, &b, &sum, &carry).unwrap();
    assert_eq!(adder.settle_ticks(), 6);
    assert!(adder.sum().ptr_eq(&sum));
    assert!(adder.carry().ptr_eq(&carry));

    a.set(true).unwrap();
    b.set(false).unwrap();
    agenda.run_until_idle(100).unwrap();
    let (either, not_both) = adder.internal_wires();
    assert_eq!(either.get_signal(), Signal::of(true));
    assert_eq!(not_both.get_signal(), Signal::of(true));
    assert_eq!(sum.get_signal(), Signal::of(true));
}

#[test]
fn test_full_adder_truth_table() {
    for bits in 0u8..8 {
        let (a_val, b_val, c_val) = (bits & 4 != 0, bits & 2 != 0, bits & 1 != 0);
        let agenda = Agenda::new();
        let wires = bool_wires(5);
        let [a, b, c, sum, carry] = &wires[..] else {
            unreachable!()
        };
        let adder = FullAdder::new(&agenda, Delay::ONE, a, b, c, sum, carry).unwrap();

        wires[0].set(a_val).unwrap();
        wires[1].set(b_val).unwrap();
        wires[2].set(c_val).unwrap();
        agenda.run_for(adder.settle_ticks()).unwrap();
        assert!(agenda.is_idle(), "still busy for {:03b}", bits);

        let total = u8::from(a_val) + u8::from(b_val) + u8::from(c_val);
        assert_eq!(adder.sum().get_signal(), Signal::of(total & 1 == 1), "sum for {:03b}", bits);
        assert_eq!(
            adder.carry_out().get_signal(),
            Signal::of(total >= 2),
            "carry for {:03b}",
            bits
        );
        assert_eq!(adder.partial_sum().get_signal(), Signal::of(b_val != c_val));
    }
}

#[test]
fn test_half_adder_trace_is_deterministic() {
    fn trace() -> Vec<Change<bool>> {
        let agenda = Agenda::new();
        let (a, b, sum, carry) = (Wire::new(), Wire::new(), Wire::new(), Wire::new());
        let _adder = HalfAdder::new(&agenda, Delay::ONE, &a, &b, &sum, &carry).unwrap();
        let probe = Probe::attach("sum", &agenda, &sum);
        a.set(true).unwrap();
        b.set(false).unwrap();
        agenda.run_for(4).unwrap();
        b.set(true).unwrap();
        agenda.run_for(4).unwrap();
        probe.changes()
    }
    let run1 = trace();
    assert_eq!(run1.last().map(|c| c.signal.clone()), Some(Signal::of(false)));
    assert_eq!(run1, trace());
}

// ── Feedback ──────────────────────────────────────────────────────────

#[test]
fn test_counter_counts_ticks() {
    let agenda = Agenda::new();
    let out = Wire::new();
    let _counter = spawn(Counter::new(&agenda, Delay::ONE, &out, 0, 1)).unwrap();
    assert_eq!(out.get_signal(), Signal::of(0));

    for k in 1..=20u64 {
        agenda.tick().unwrap();
        assert_eq!(out.get_signal(), Signal::of(k));
    }
    assert!(!agenda.is_idle());
}

#[test]
fn test_counter_with_step_and_delay() {
    let agenda = Agenda::new();
    let out = Wire::new();
    let counter = spawn(Counter::new(&agenda, delay(2), &out, 10, 5)).unwrap();
    agenda.run_for(6).unwrap();
    assert_eq!(out.get_signal(), Signal::of(25));
    assert_eq!(counter.step(), 5);
    assert!(counter.output().ptr_eq(&out));
}

#[test]
fn test_counter_on_seeded_wire_still_counts() {
    let agenda = Agenda::new();
    let out = Wire::with_signal(Signal::of(7));
    let _counter = spawn(Counter::new(&agenda, Delay::ONE, &out, 7, 1)).unwrap();
    agenda.run_for(3).unwrap();
    assert_eq!(out.get_signal(), Signal::of(10));
}

#[test]
fn test_counter_overflow_fails_tick() {
    let agenda = Agenda::new();
    let out = Wire::new();
    let _counter = spawn(Counter::new(&agenda, Delay::ONE, &out, u64::MAX - 2, 1)).unwrap();
    agenda.run_for(2).unwrap();
    assert_eq!(out.get_signal(), Signal::of(u64::MAX));

    let err = agenda.tick().unwrap_err();
    assert_eq!(err, SimError::CounterOverflow { value: u64::MAX, step: 1 });
    assert_eq!(out.get_signal(), Signal::of(u64::MAX));
}

#[test]
fn test_self_inverting_wire_oscillates() {
    let agenda = Agenda::new();
    let w = Wire::new();
    let _osc = inverter(&agenda, Delay::ONE, &w, &w).unwrap();
    let probe = Probe::attach("osc", &agenda, &w);

    w.set(true).unwrap();
    agenda.run_for(4).unwrap();
    let values: Vec<_> = probe.changes().into_iter().map(|c| (c.tick.ticks(), c.signal)).collect();
    assert_eq!(
        values,
        vec![
            (0, Signal::of(true)),
            (1, Signal::of(false)),
            (2, Signal::of(true)),
            (3, Signal::of(false)),
            (4, Signal::of(true)),
        ]
    );
}

#[test]
fn test_dropped_output_wire_stops_propagation() {
    let agenda = Agenda::new();
    let input = Wire::new();
    let node = {
        let output = Wire::new();
        let core = NodeCore::new("orphan", &agenda, Delay::ONE);
        spawn(Unary::new(core, &input, &output, |v: &u8| *v)).unwrap()
    };
    input.set(1).unwrap();
    agenda.tick().unwrap();
    // The node still owns its output wire.
    assert_eq!(node.output().get_signal(), Signal::of(1));

    let weak = node.output().downgrade();
    drop(node);
    assert!(weak.upgrade().is_none());
    input.set(2).unwrap();
    assert!(agenda.tick().is_ok());
}

// ── Neuron ────────────────────────────────────────────────────────────

#[test]
fn test_weighted_sum_fires_on_threshold() {
    let agenda = Agenda::new();
    let inputs: Vec<Wire<Level>> = (0..3).map(|_| Wire::new()).collect();
    let out = Wire::new();
    let weights = vec![0.5, 0.5, -1.0];
    let _neuron = weighted_sum(&agenda, Delay::ONE, &inputs, weights, 0.5, &out).unwrap();

    inputs[0].set(Level(1.0)).unwrap();
    inputs[1].set(Level(1.0)).unwrap();
    inputs[2].set(Level(0.0)).unwrap();
    agenda.tick().unwrap();
    assert_eq!(out.get_signal(), Signal::of(true));

    inputs[2].set(Level(1.0)).unwrap();
    agenda.tick().unwrap();
    assert_eq!(out.get_signal(), Signal::of(false));
}

#[test]
fn test_weighted_sum_arity_checked() {
    let agenda = Agenda::new();
    let inputs: Vec<Wire<Level>> = (0..2).map(|_| Wire::new()).collect();
    let err =
        weighted_sum(&agenda, Delay::ONE, &inputs, vec![1.0], 0.0, &Wire::new()).unwrap_err();
    assert_eq!(
        err,
        SimError::ArityMismatch {
            node: "neuron".into(),
            expected: 2,
            actual: 1,
        }
    );
}
