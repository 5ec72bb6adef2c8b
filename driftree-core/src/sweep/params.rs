//! Parameter domains swept by the engine.

use std::slice;

use crate::error::SweepError;

/// Relative slack applied to the end bound so that `start + i * step`
/// landing a rounding error past `end` is still included.
const END_TOLERANCE: f64 = 1e-9;

/// Evenly spaced, inclusive parameter range.
///
/// Values are computed as `start + i * step` rather than by repeated addition
/// so that long sweeps do not accumulate drift.
///
/// # Examples
/// ```
/// use driftree_core::ParameterRange;
///
/// let range = ParameterRange::new(0.0, 1.0, 0.25).expect("range is valid");
/// let values: Vec<f64> = range.iter().collect();
/// assert_eq!(values, [0.0, 0.25, 0.5, 0.75, 1.0]);
/// assert_eq!(range.len(), 5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParameterRange {
    start: f64,
    end: f64,
    step: f64,
    len: usize,
}

impl Default for ParameterRange {
    /// Sweeps `0, 5, 10, ..., 100`.
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 100.0,
            step: 5.0,
            len: 21,
        }
    }
}

impl ParameterRange {
    /// The largest number of values a range may hold.
    pub const MAX_SAMPLES: usize = 1_000_000;

    /// Validates and creates an inclusive range.
    ///
    /// # Errors
    /// Returns [`SweepError::NonFiniteParameter`] when a bound or the step is
    /// not finite, [`SweepError::InvalidStep`] when `step <= 0`,
    /// [`SweepError::InvalidRange`] when `start > end`, and
    /// [`SweepError::TooManySamples`] when the range would hold more than
    /// [`ParameterRange::MAX_SAMPLES`] values.
    pub fn new(start: f64, end: f64, step: f64) -> Result<Self, SweepError> {
        for value in [start, end, step] {
            if !value.is_finite() {
                return Err(SweepError::NonFiniteParameter { value });
            }
        }
        if step <= 0.0 {
            return Err(SweepError::InvalidStep { step });
        }
        if start > end {
            return Err(SweepError::InvalidRange { start, end });
        }

        let intervals = ((end - start) / step + END_TOLERANCE).floor();
        let len = Self::sample_count(intervals).ok_or(SweepError::TooManySamples {
            start,
            end,
            step,
            max: Self::MAX_SAMPLES,
        })?;
        Ok(Self {
            start,
            end,
            step,
            len,
        })
    }

    fn sample_count(intervals: f64) -> Option<usize> {
        if !intervals.is_finite() || intervals >= Self::MAX_SAMPLES as f64 {
            return None;
        }
        (intervals as usize)
            .checked_add(1)
            .filter(|&count| count <= Self::MAX_SAMPLES)
    }

    /// Returns the first value.
    #[must_use]
    #[rustfmt::skip]
    pub fn start(&self) -> f64 { self.start }

    /// Returns the inclusive upper bound.
    #[must_use]
    #[rustfmt::skip]
    pub fn end(&self) -> f64 { self.end }

    /// Returns the spacing between values.
    #[must_use]
    #[rustfmt::skip]
    pub fn step(&self) -> f64 { self.step }

    /// Returns the number of values in the range.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.len }

    /// Always `false`; a valid range holds at least `start`.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.len == 0 }

    /// Iterates the values in increasing order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        (0..self.len).map(|index| self.start + index as f64 * self.step)
    }
}

/// The ordered sequence of parameter values a sweep visits.
#[derive(Clone, Debug, PartialEq)]
pub enum Parameters {
    /// An evenly spaced inclusive range.
    Range(ParameterRange),
    /// Explicit values, swept in the given order.
    Explicit(Vec<f64>),
}

impl Default for Parameters {
    fn default() -> Self {
        Self::Range(ParameterRange::default())
    }
}

impl Parameters {
    /// Validates explicit values.
    ///
    /// # Errors
    /// Returns [`SweepError::NonFiniteParameter`] for the first NaN or
    /// infinite value.
    pub fn explicit(values: Vec<f64>) -> Result<Self, SweepError> {
        if let Some(value) = values.iter().copied().find(|value| !value.is_finite()) {
            return Err(SweepError::NonFiniteParameter { value });
        }
        Ok(Self::Explicit(values))
    }

    /// Returns the number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Range(range) => range.len(),
            Self::Explicit(values) => values.len(),
        }
    }

    /// Returns `true` when no value will be visited.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates the values in sweep order.
    #[must_use]
    pub fn iter(&self) -> ParameterIter<'_> {
        match self {
            Self::Range(range) => ParameterIter::Range { range, index: 0 },
            Self::Explicit(values) => ParameterIter::Explicit(values.iter()),
        }
    }

    /// Collects the values into a vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }
}

/// Iterator over [`Parameters`].
#[derive(Clone, Debug)]
pub enum ParameterIter<'a> {
    /// Walks a range by index.
    #[doc(hidden)]
    Range {
        /// Range being walked.
        range: &'a ParameterRange,
        /// Index of the next value.
        index: usize,
    },
    /// Walks explicit values.
    #[doc(hidden)]
    Explicit(slice::Iter<'a, f64>),
}

impl Iterator for ParameterIter<'_> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        match self {
            Self::Range { range, index } => {
                if *index >= range.len() {
                    return None;
                }
                let value = range.start() + *index as f64 * range.step();
                *index += 1;
                Some(value)
            }
            Self::Explicit(values) => values.next().copied(),
        }
    }
}
