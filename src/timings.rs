//! Asynchronous timing synthesis
//!
//! This module generates the stimulus-onset schedule for an asynchronous
//! block from the recorded timings of a synchronous (cardiac-locked) block.
//! The inter-stimulus intervals of the recording are trimmed to a symmetric
//! percentile band and resampled with replacement, which preserves the
//! marginal interval distribution while destroying the original event order.

use rand::Rng;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::error::TimingError;
use crate::stats;

/// Default bottom/top trim percentage applied to the interval distribution
pub const DEFAULT_EDGE_PERC: f64 = 10.0;

/// Generate timings for an asynchronous block from a synchronous block.
///
/// Given the sequence of timings at which an R-peak occurred during a
/// synchronous block, generate the sequence of stimulus timings for a
/// future asynchronous block. The bottom and top `perc`% of the
/// inter-stimulus intervals are removed, and the asynchronous sequence is
/// built by drawing `n - 1` of the remaining intervals with replacement
/// and accumulating them from an onset of 0.
///
/// # Arguments
///
/// * `sequence_timings` - Timings (seconds) at which an R-peak occurred.
///   Must contain at least 2 finite, strictly increasing values.
/// * `perc` - Bottom and top percentage of intervals removed, in `[0, 50)`.
/// * `rng` - Random source for the interval draws. Pass a seeded generator
///   for reproducible schedules.
///
/// # Errors
///
/// * [`TimingError::InvalidPercentage`] if `perc` is outside `[0, 50)`.
/// * [`TimingError::InsufficientEvents`] if fewer than 2 timings are given.
/// * [`TimingError::NonMonotonicSequence`] if the timings are not finite
///   and strictly increasing.
/// * [`TimingError::EmptyDistribution`] if no interval survives trimming.
///   Non-retryable with identical inputs; lower `perc` or record a longer
///   sequence.
pub fn generate_async_timings<R: Rng>(
    sequence_timings: &[f64],
    perc: f64,
    rng: &mut R,
) -> Result<Vec<f64>, TimingError> {
    let pool = retained_intervals(sequence_timings, perc)?;

    let n = sequence_timings.len();
    let mut timings = Vec::with_capacity(n);
    let mut last = 0.0;
    timings.push(last);
    for _ in 1..n {
        last += pool[rng.random_range(0..pool.len())];
        timings.push(last);
    }
    Ok(timings)
}

/// Compute the trimmed inter-stimulus interval pool of a recorded sequence.
///
/// Validates the inputs, computes the consecutive differences of
/// `sequence_timings`, and keeps the intervals inside the closed percentile
/// band `[P(perc), P(100 - perc)]`, estimated with linear interpolation
/// between order statistics.
///
/// The retained pool is guaranteed non-empty on success: an empty pool is
/// reported as [`TimingError::EmptyDistribution`], never returned.
pub fn retained_intervals(
    sequence_timings: &[f64],
    perc: f64,
) -> Result<Vec<f64>, TimingError> {
    if !(0.0..50.0).contains(&perc) {
        return Err(TimingError::InvalidPercentage(perc));
    }
    if sequence_timings.len() < 2 {
        return Err(TimingError::InsufficientEvents(format!(
            "at least 2 timings are required to estimate intervals, got {}",
            sequence_timings.len()
        )));
    }
    validate_monotonic(sequence_timings)?;

    let intervals = stats::diff(sequence_timings);
    let low = stats::percentile(&intervals, perc);
    let high = stats::percentile(&intervals, 100.0 - perc);

    let pool: Vec<f64> = intervals
        .iter()
        .copied()
        .filter(|&d| low <= d && d <= high)
        .collect();

    if pool.is_empty() {
        return Err(TimingError::EmptyDistribution(format!(
            "trim band [{:.6}, {:.6}] at perc {}% retains none of the {} intervals",
            low,
            high,
            perc,
            intervals.len()
        )));
    }

    Ok(pool)
}

/// Check that timings are finite and strictly increasing.
fn validate_monotonic(timings: &[f64]) -> Result<(), TimingError> {
    if let Some(idx) = timings.iter().position(|t| !t.is_finite()) {
        return Err(TimingError::NonMonotonicSequence(format!(
            "timing at index {idx} is not finite"
        )));
    }
    for (i, pair) in timings.windows(2).enumerate() {
        if pair[1] <= pair[0] {
            return Err(TimingError::NonMonotonicSequence(format!(
                "timing at index {} ({}) does not exceed its predecessor ({})",
                i + 1,
                pair[1],
                pair[0]
            )));
        }
    }
    Ok(())
}

/// Seeded asynchronous-timing generator.
///
/// Owns a Xoshiro256++ stream so that a block scheduler can derive every
/// asynchronous schedule of a session from one recorded seed. Use
/// [`generate_async_timings`] directly to supply a different random source.
pub struct AsyncTimingGenerator {
    rng: Xoshiro256PlusPlus,
}

impl AsyncTimingGenerator {
    /// Create a generator from an explicit seed
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }

    /// Generate an asynchronous schedule from a recorded synchronous block
    pub fn generate(
        &mut self,
        sequence_timings: &[f64],
        perc: f64,
    ) -> Result<Vec<f64>, TimingError> {
        generate_async_timings(sequence_timings, perc, &mut self.rng)
    }
}
