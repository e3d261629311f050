//! Monotone accumulators.
//!
//! Cell metrics only ever move in one direction. An [`Accumulator`] carries
//! its combining rule in the type, so a max-ratchet can never be lowered and
//! a min-ratchet can never be raised:
//!
//! ```text
//! observe(0.3)  observe(0.8)  observe(0.5)
//!   Max:  0.3 ──► 0.8 ──────► 0.8
//!   Min:  0.3 ──► 0.3 ──────► 0.3
//!   Sum:  0.3 ──► 1.1 ──────► 1.6
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// Combining rule for an [`Accumulator`].
pub trait AccumulateRule {
    /// Value before any observation.
    const INITIAL: f32;

    /// Combine the stored value with a new sample.
    fn combine(current: f32, sample: f32) -> f32;
}

/// Keeps the largest sample seen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaxRule;

impl AccumulateRule for MaxRule {
    const INITIAL: f32 = 0.0;

    #[inline]
    fn combine(current: f32, sample: f32) -> f32 {
        current.max(sample)
    }
}

/// Keeps the smallest sample seen, clamped to [0, 1].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClampedMinRule;

impl AccumulateRule for ClampedMinRule {
    const INITIAL: f32 = 1.0;

    #[inline]
    fn combine(current: f32, sample: f32) -> f32 {
        current.min(sample.clamp(0.0, 1.0))
    }
}

/// Running total.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SumRule;

impl AccumulateRule for SumRule {
    const INITIAL: f32 = 0.0;

    #[inline]
    fn combine(current: f32, sample: f32) -> f32 {
        current + sample
    }
}

/// A value that can only be updated through its rule.
#[derive(Serialize, Deserialize)]
#[serde(transparent, bound = "")]
pub struct Accumulator<R: AccumulateRule> {
    value: f32,
    #[serde(skip)]
    _rule: PhantomData<R>,
}

impl<R: AccumulateRule> Accumulator<R> {
    /// Fresh accumulator at the rule's initial value.
    #[inline]
    pub fn new() -> Self {
        Self {
            value: R::INITIAL,
            _rule: PhantomData,
        }
    }

    /// Current value.
    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Feed a sample. Returns true if the stored value changed.
    ///
    /// NaN samples are ignored.
    #[inline]
    pub fn observe(&mut self, sample: f32) -> bool {
        if sample.is_nan() {
            return false;
        }
        let next = R::combine(self.value, sample);
        let changed = next != self.value;
        self.value = next;
        changed
    }
}

impl<R: AccumulateRule> Default for Accumulator<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: AccumulateRule> Clone for Accumulator<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: AccumulateRule> Copy for Accumulator<R> {}

impl<R: AccumulateRule> PartialEq for Accumulator<R> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<R: AccumulateRule> fmt::Debug for Accumulator<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Max-ratchet.
pub type MaxAccumulator = Accumulator<MaxRule>;
/// Min-ratchet clamped to [0, 1].
pub type MinAccumulator = Accumulator<ClampedMinRule>;
/// Running sum.
pub type SumAccumulator = Accumulator<SumRule>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_never_decreases() {
        let mut acc = MaxAccumulator::new();
        assert_eq!(acc.value(), 0.0);
        assert!(acc.observe(0.4));
        assert!(!acc.observe(0.1));
        assert!(acc.observe(0.9));
        assert_eq!(acc.value(), 0.9);
    }

    #[test]
    fn test_min_clamped() {
        let mut acc = MinAccumulator::new();
        assert_eq!(acc.value(), 1.0);
        acc.observe(1.7);
        assert_eq!(acc.value(), 1.0);
        acc.observe(0.3);
        acc.observe(0.6);
        assert_eq!(acc.value(), 0.3);
        acc.observe(-2.0);
        assert_eq!(acc.value(), 0.0);
    }

    #[test]
    fn test_sum() {
        let mut acc = SumAccumulator::new();
        for _ in 0..4 {
            acc.observe(1.0);
        }
        assert_eq!(acc.value(), 4.0);
    }

    #[test]
    fn test_nan_ignored() {
        let mut acc = MaxAccumulator::new();
        acc.observe(0.5);
        assert!(!acc.observe(f32::NAN));
        assert_eq!(acc.value(), 0.5);
    }

    #[test]
    fn test_serde_transparent() {
        let mut acc = MaxAccumulator::new();
        acc.observe(0.25);
        let yaml = serde_yaml::to_string(&acc).unwrap();
        assert_eq!(yaml.trim(), "0.25");
        let back: MaxAccumulator = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back.value(), 0.25);
    }
}
