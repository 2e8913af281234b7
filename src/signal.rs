//! Optional values flowing on wires.
//!
//! A [`Signal`] is either absent ("no value yet") or present. Equality is
//! by value, which is what lets a wire recognise a write that changes
//! nothing.

/// An optional value carried by a [`Wire`](crate::wire::Wire).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Signal<V>(Option<V>);

impl<V> Signal<V> {
    /// A present signal carrying `value`.
    #[inline]
    pub fn of(value: V) -> Self {
        Signal(Some(value))
    }

    /// The absent signal.
    #[inline]
    pub fn none() -> Self {
        Signal(None)
    }

    /// Borrow the carried value, if any.
    #[inline]
    pub fn value(&self) -> Option<&V> {
        self.0.as_ref()
    }

    /// Unwrap into the underlying `Option`.
    #[inline]
    pub fn into_value(self) -> Option<V> {
        self.0
    }

    #[inline]
    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }

    #[inline]
    pub fn is_absent(&self) -> bool {
        self.0.is_none()
    }

    /// Transform the carried value; absence stays absence.
    pub fn map<U, F>(self, f: F) -> Signal<U>
    where
        F: FnOnce(V) -> U,
    {
        Signal(self.0.map(f))
    }

    /// Transform into another signal; absence stays absence.
    pub fn and_then<U, F>(self, f: F) -> Signal<U>
    where
        F: FnOnce(V) -> Signal<U>,
    {
        match self.0 {
            Some(v) => f(v),
            None => Signal::none(),
        }
    }

    /// `self` if present, otherwise `other`.
    pub fn or(self, other: Signal<V>) -> Signal<V> {
        Signal(self.0.or(other.0))
    }
}

impl<V> Default for Signal<V> {
    fn default() -> Self {
        Signal::none()
    }
}

impl<V> From<Option<V>> for Signal<V> {
    fn from(value: Option<V>) -> Self {
        Signal(value)
    }
}

impl<V> From<Signal<V>> for Option<V> {
    fn from(signal: Signal<V>) -> Self {
        signal.0
    }
}

impl<V: std::fmt::Display> std::fmt::Display for Signal<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Some(v) => write!(f, "{}", v),
            None => write!(f, "none"),
        }
    }
}
