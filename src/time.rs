//! Logical time for the kernel.
//!
//! A [`Tick`] is an instant on the discrete clock, a [`Delay`] is the
//! positive latency of a node. Time only moves when the agenda ticks;
//! nothing here looks at the wall clock.

use crate::error::{SimError, SimResult};

/// A discrete instant of logical time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(u64);

impl Tick {
    /// The zero-point of simulation time.
    pub const ZERO: Tick = Tick(0);

    /// The last representable instant.
    pub const MAX: Tick = Tick(u64::MAX);

    /// Create a tick from a raw value.
    #[inline]
    pub fn new(ticks: u64) -> Self {
        Tick(ticks)
    }

    /// Same as [`Tick::ZERO`].
    #[inline]
    pub fn zero() -> Self {
        Tick::ZERO
    }

    /// Return the raw tick value.
    #[inline]
    pub fn ticks(self) -> u64 {
        self.0
    }

    /// The instant `delay` ticks after `self`.
    ///
    /// Fails with [`SimError::TickOverflow`] instead of wrapping.
    #[inline]
    pub fn plus(self, delay: Delay) -> SimResult<Tick> {
        self.0
            .checked_add(delay.ticks())
            .map(Tick)
            .ok_or(SimError::TickOverflow {
                current: self,
                delay,
            })
    }

    /// Returns `true` if `self` is strictly before `other`.
    #[inline]
    pub fn is_before(self, other: Tick) -> bool {
        self.0 < other.0
    }

    /// Ticks elapsed since `earlier`, or `None` if `earlier` is later.
    #[inline]
    pub fn duration_since(self, earlier: Tick) -> Option<u64> {
        self.0.checked_sub(earlier.0)
    }
}

impl std::fmt::Display for Tick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "T={}", self.0)
    }
}

/// How many ticks a node takes to answer. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialize", serde(try_from = "u64", into = "u64"))]
pub struct Delay(u64);

impl Delay {
    /// A one-tick delay, the shortest there is.
    pub const ONE: Delay = Delay(1);

    /// Validate and wrap a duration.
    ///
    /// A zero delay would let a node react within the tick that triggered
    /// it, so it is rejected with [`SimError::NonPositiveDelay`].
    pub fn new(ticks: u64) -> SimResult<Self> {
        if ticks == 0 {
            return Err(SimError::NonPositiveDelay { ticks });
        }
        Ok(Delay(ticks))
    }

    /// Return the duration in ticks.
    #[inline]
    pub fn ticks(self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for Delay {
    type Error = SimError;

    fn try_from(ticks: u64) -> SimResult<Self> {
        Delay::new(ticks)
    }
}

impl From<Delay> for u64 {
    fn from(delay: Delay) -> u64 {
        delay.0
    }
}

impl std::fmt::Display for Delay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "+{}", self.0)
    }
}
