//! Walker's Alias Method: O(n) table construction.
//!
//! The table is built with the single-sweep variant. Probabilities are scaled
//! so the average slot holds exactly 1.0 of mass and visited in ascending
//! order. Every outcome initializes the next free slot with whatever mass it
//! has left after donating its excess to earlier slots that are still short of
//! 1.0. Because the sweep is sorted, all under-full slots are created before
//! any donor that could top them up, so one left pointer (`il`) and one right
//! pointer (`ir`) are enough.

use crate::error::InvalidDistribution;

/// Alias table for discrete distribution sampling.
///
/// Slot `i` owns the interval `[i, i + 1)` of the scaled uniform draw. Draws
/// whose fractional part is at most `threshold[i]` pick the low outcome
/// `values[2 * i]`, the rest pick the high outcome `values[2 * i + 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasTable {
    threshold: Vec<f32>,
    values: Vec<i32>,
}

impl AliasTable {
    /// Construct an alias table from non-negative weights. O(n log n) for the
    /// sort, O(n) for the sweep.
    ///
    /// # Errors
    /// * [`InvalidDistribution::Empty`] if `weights` is empty.
    /// * [`InvalidDistribution::Negative`] if any weight is below zero.
    /// * [`InvalidDistribution::NonFinite`] if any weight is `NaN` or infinite.
    /// * [`InvalidDistribution::ZeroSum`] if the weights sum to zero.
    ///
    /// # Panics
    /// If the finished table holds an outcome index outside `0..n`. That can
    /// only happen through a bug in the sweep, never through user input.
    pub fn new(weights: &[f32]) -> Result<Self, InvalidDistribution> {
        let n = weights.len();
        if n == 0 {
            return Err(InvalidDistribution::Empty);
        }
        if i32::try_from(n).is_err() {
            return Err(InvalidDistribution::TooLong { len: n });
        }

        // f64 accumulator: a sum of finite f32 weights can neither overflow
        // nor flush to zero unless every weight is zero.
        let mut sum = 0.0f64;
        for (index, &value) in weights.iter().enumerate() {
            if !value.is_finite() {
                return Err(InvalidDistribution::NonFinite { index, value });
            }
            if value < 0.0 {
                return Err(InvalidDistribution::Negative { index, value });
            }
            sum += f64::from(value);
        }
        if sum <= 0.0 {
            return Err(InvalidDistribution::ZeroSum);
        }

        // (probability, outcome) ascending. Ties keep input order.
        let mut pairs: Vec<(f32, i32)> = weights
            .iter()
            .zip(0i32..)
            .map(|(&w, i)| ((f64::from(w) / sum) as f32, i))
            .collect();
        pairs.sort_unstable_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        let scale = n as f32;
        let mut threshold = vec![0.0f32; n];
        // -1 marks "unassigned" so the postcondition below can catch a slot
        // the sweep forgot.
        let mut values = vec![-1i32; 2 * n];
        let (mut il, mut ir) = (0usize, 0usize);
        let mut donations = 0usize;

        for (prob, i) in pairs {
            let mut p = prob * scale;
            while p > 1.0 && ir < il {
                values[2 * ir + 1] = i;
                p -= 1.0 - threshold[ir];
                ir += 1;
                donations += 1;
            }
            threshold[il] = p.min(1.0);
            values[2 * il] = i;
            il += 1;
        }

        // Slots that never met a donor: their threshold keeps every draw on
        // the low branch, but the high branch must still name a real outcome.
        for slot in ir..n {
            values[2 * slot + 1] = 0;
        }

        let bound = n as i32;
        assert!(
            values.iter().all(|&v| (0..bound).contains(&v)),
            "alias table holds an outcome outside 0..{n}"
        );

        log::debug!("built alias table: n={n} donations={donations} unfilled={}", n - ir);

        Ok(Self { threshold, values })
    }

    /// Build from any iterator of weights.
    pub fn from_weights<I>(weights: I) -> Result<Self, InvalidDistribution>
    where
        I: IntoIterator<Item = f32>,
    {
        let weights: Vec<f32> = weights.into_iter().collect();
        Self::new(&weights)
    }

    pub fn len(&self) -> usize {
        self.threshold.len()
    }
    pub fn is_empty(&self) -> bool {
        self.threshold.is_empty()
    }

    /// Per-slot cutoffs, length `n`.
    pub fn threshold(&self) -> &[f32] {
        &self.threshold
    }

    /// Interleaved `(low, high)` outcomes, length `2 * n`.
    pub fn values(&self) -> &[i32] {
        &self.values
    }

    /// Low outcome of `slot`.
    #[inline]
    pub fn low(&self, slot: usize) -> i32 {
        self.values[2 * slot]
    }

    /// High outcome of `slot`.
    #[inline]
    pub fn high(&self, slot: usize) -> i32 {
        self.values[2 * slot + 1]
    }

    pub fn into_parts(self) -> (Vec<f32>, Vec<i32>) {
        (self.threshold, self.values)
    }

    /// Outcome probabilities implied by the table.
    ///
    /// Each slot carries `1 / n` of the mass, split `threshold` to the low
    /// outcome and `1 - threshold` to the high one. For a well-built table
    /// this reproduces the normalized input weights up to `f32` rounding.
    pub fn probabilities(&self) -> Vec<f32> {
        let n = self.len();
        let slot_mass = 1.0 / n as f64;
        let mut probs = vec![0.0f64; n];
        for (slot, &t) in self.threshold.iter().enumerate() {
            let t = f64::from(t);
            probs[self.low(slot) as usize] += t * slot_mass;
            probs[self.high(slot) as usize] += (1.0 - t) * slot_mass;
        }
        probs.into_iter().map(|p| p as f32).collect()
    }
}
