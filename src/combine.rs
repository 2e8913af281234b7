//! The N-ary combination algebra.
//!
//! Folding N optional inputs into one output needs three things: an
//! injection (`weight`) from input to accumulation type, an associative
//! `combine`, and a [`WhenCombining`] policy saying what an absent operand
//! does to a present one.
//!
//! Two call conventions share that algebra:
//!
//! - **Reduce** ([`Algebra::reduce`]) folds straight to a scalar.
//! - **Collect** ([`Accumulable`]) keeps a partial accumulation that can
//!   absorb more inputs or merge with another partial accumulation, in any
//!   grouping.
//!
//! [`Combiner`] tags which of the two a node uses and adds a finisher.
//!
//! ```text
//!   EMPTY ──accumulate/combine──▶ ABSENT | PRESENT(a) ──finish──▶ Signal<T>
//! ```

use std::rc::Rc;

use crate::signal::Signal;

// ── Policy ────────────────────────────────────────────────────────────

/// How an absent operand interacts with a present one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum WhenCombining {
    /// Any absent operand makes the whole combination absent.
    #[default]
    AbsentWins,
    /// Absent operands are skipped; the result is absent only when every
    /// operand is.
    PresentWins,
}

// ── Accumulation state ────────────────────────────────────────────────

/// Internal three-state accumulation. `Empty` is the identity of `merge`
/// under both policies, which keeps merging associative.
#[derive(Debug, Clone)]
enum Accumulation<A> {
    Empty,
    Absent,
    Present(A),
}

fn merge<A>(
    policy: WhenCombining,
    left: Accumulation<A>,
    right: Accumulation<A>,
    combine: &dyn Fn(A, A) -> A,
) -> Accumulation<A> {
    use Accumulation::{Absent, Empty, Present};

    match (left, right) {
        (Empty, x) | (x, Empty) => x,
        (Present(a), Present(b)) => Present(combine(a, b)),
        (Absent, Absent) => Absent,
        (Present(a), Absent) | (Absent, Present(a)) => match policy {
            WhenCombining::AbsentWins => Absent,
            WhenCombining::PresentWins => Present(a),
        },
    }
}

// ── Algebra ───────────────────────────────────────────────────────────

/// Injection plus associative combiner over inputs of type `I`.
///
/// `combine` must be associative; [`Accumulable::combine`] relies on it to
/// give the same answer regardless of how partial folds are grouped.
pub struct Algebra<I, A> {
    weight: Rc<dyn Fn(usize, &I) -> A>,
    combine: Rc<dyn Fn(A, A) -> A>,
}

impl<I: 'static, A: 'static> Algebra<I, A> {
    /// Position-insensitive algebra.
    pub fn new<W, C>(weight: W, combine: C) -> Self
    where
        W: Fn(&I) -> A + 'static,
        C: Fn(A, A) -> A + 'static,
    {
        Algebra {
            weight: Rc::new(move |_, input| weight(input)),
            combine: Rc::new(combine),
        }
    }

    /// Algebra whose injection also sees the input's position.
    pub fn indexed<W, C>(weight: W, combine: C) -> Self
    where
        W: Fn(usize, &I) -> A + 'static,
        C: Fn(A, A) -> A + 'static,
    {
        Algebra {
            weight: Rc::new(weight),
            combine: Rc::new(combine),
        }
    }
}

impl<I, A> Algebra<I, A> {
    /// Fold `inputs` straight to a signal.
    ///
    /// Under [`WhenCombining::AbsentWins`] the first absent input ends the
    /// fold with an absent result.
    pub fn reduce(&self, policy: WhenCombining, inputs: &[Signal<I>]) -> Signal<A> {
        let mut acc: Option<A> = None;
        for (index, input) in inputs.iter().enumerate() {
            match input.value() {
                Some(v) => {
                    let w = (self.weight)(index, v);
                    acc = Some(match acc {
                        Some(a) => (self.combine)(a, w),
                        None => w,
                    });
                }
                None if policy == WhenCombining::AbsentWins => return Signal::none(),
                None => {}
            }
        }
        Signal::from(acc)
    }

    /// A fresh accumulator whose first input sits at position 0.
    pub fn seed(&self, policy: WhenCombining) -> Accumulable<I, A> {
        self.seed_at(policy, 0)
    }

    /// A fresh accumulator whose first input sits at position `start`.
    ///
    /// Used when a list is folded in chunks with an indexed injection.
    pub fn seed_at(&self, policy: WhenCombining, start: usize) -> Accumulable<I, A> {
        Accumulable {
            algebra: self.clone(),
            policy,
            state: Accumulation::Empty,
            position: start,
        }
    }
}

impl<I, A> Clone for Algebra<I, A> {
    fn clone(&self) -> Self {
        Algebra {
            weight: Rc::clone(&self.weight),
            combine: Rc::clone(&self.combine),
        }
    }
}

// ── Accumulable ───────────────────────────────────────────────────────

/// One fold in progress.
///
/// A scratch value: seed it, feed it inputs with
/// [`accumulate`](Self::accumulate), optionally merge other partial folds
/// in with [`combine`](Self::combine), then read it out.
pub struct Accumulable<I, A> {
    algebra: Algebra<I, A>,
    policy: WhenCombining,
    state: Accumulation<A>,
    position: usize,
}

impl<I, A> Accumulable<I, A> {
    /// Fold in the next input.
    pub fn accumulate(&mut self, input: &Signal<I>) {
        let index = self.position;
        self.position += 1;

        let lifted = match input.value() {
            Some(v) => Accumulation::Present((self.algebra.weight)(index, v)),
            None => Accumulation::Absent,
        };
        let current = std::mem::replace(&mut self.state, Accumulation::Empty);
        self.state = merge(self.policy, current, lifted, &*self.algebra.combine);
    }

    /// Merge a partial fold over the inputs that follow this one's.
    ///
    /// The receiver's policy governs the merge.
    pub fn combine(mut self, other: Accumulable<I, A>) -> Self {
        let current = std::mem::replace(&mut self.state, Accumulation::Empty);
        self.state = merge(self.policy, current, other.state, &*self.algebra.combine);
        self.position = self.position.max(other.position);
        self
    }

    /// Returns `true` while no input has been folded in.
    pub fn is_empty(&self) -> bool {
        matches!(self.state, Accumulation::Empty)
    }

    /// Read the accumulation out as a signal.
    pub fn into_signal(self) -> Signal<A> {
        match self.state {
            Accumulation::Present(a) => Signal::of(a),
            Accumulation::Empty | Accumulation::Absent => Signal::none(),
        }
    }

    /// Read the accumulation out through `finisher`.
    pub fn finish<T, F>(self, finisher: F) -> Signal<T>
    where
        F: FnOnce(A) -> T,
    {
        self.into_signal().map(finisher)
    }
}

// ── Combiner ──────────────────────────────────────────────────────────

/// Which call convention a [`Combiner`] uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FoldStyle {
    /// Fold to a scalar in one pass.
    #[default]
    Reduce,
    /// Seed an [`Accumulable`] and feed it every input.
    Collect,
}

/// An [`Algebra`], a [`FoldStyle`] and a finisher turning the accumulation
/// type `A` into the public output type `T`.
pub struct Combiner<I, A, T = A> {
    style: FoldStyle,
    algebra: Algebra<I, A>,
    finisher: Rc<dyn Fn(A) -> T>,
}

impl<I, A: 'static> Combiner<I, A, A> {
    pub fn new(style: FoldStyle, algebra: Algebra<I, A>) -> Self {
        Combiner {
            style,
            algebra,
            finisher: Rc::new(|a| a),
        }
    }

    pub fn reduce(algebra: Algebra<I, A>) -> Self {
        Self::new(FoldStyle::Reduce, algebra)
    }

    pub fn collect(algebra: Algebra<I, A>) -> Self {
        Self::new(FoldStyle::Collect, algebra)
    }

    /// Replace the identity finisher.
    pub fn finish_with<T, F>(self, finisher: F) -> Combiner<I, A, T>
    where
        F: Fn(A) -> T + 'static,
    {
        Combiner {
            style: self.style,
            algebra: self.algebra,
            finisher: Rc::new(finisher),
        }
    }
}

impl<I, A, T> Combiner<I, A, T> {
    pub fn style(&self) -> FoldStyle {
        self.style
    }

    /// Fold `inputs` under `policy` and run the finisher.
    pub fn apply(&self, policy: WhenCombining, inputs: &[Signal<I>]) -> Signal<T> {
        let folded = match self.style {
            FoldStyle::Reduce => self.algebra.reduce(policy, inputs),
            FoldStyle::Collect => {
                let mut acc = self.algebra.seed(policy);
                for input in inputs {
                    acc.accumulate(input);
                }
                acc.into_signal()
            }
        };
        folded.map(|a| (self.finisher)(a))
    }
}

impl<I, A, T> Clone for Combiner<I, A, T> {
    fn clone(&self) -> Self {
        Combiner {
            style: self.style,
            algebra: self.algebra.clone(),
            finisher: Rc::clone(&self.finisher),
        }
    }
}
