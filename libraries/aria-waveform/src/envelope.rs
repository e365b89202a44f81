//! Envelope reduction
//!
//! Partitions a sample stream into equal time buckets and computes a
//! boosted, clamped RMS per bucket. Cost is bounded by stride-sampling at
//! most [`MAX_POINTS_PER_BUCKET`] points per bucket.

/// Default envelope length
pub const DEFAULT_BUCKETS: usize = 60;

/// Upper bound on points sampled per bucket
const MAX_POINTS_PER_BUCKET: usize = 100;

/// RMS boost applied before clamping
const BOOST: f32 = 2.0;

/// Output range
const FLOOR: f32 = 0.05;
const CEIL: f32 = 1.0;

/// Mid-level value used when no audio is available
const FLAT_LEVEL: f32 = 0.5;

/// A flat fallback envelope
pub(crate) fn flat(buckets: usize) -> Vec<f32> {
    vec![FLAT_LEVEL; buckets]
}

/// Reduce mono samples to a fixed-length envelope
///
/// Always returns exactly `buckets` values in `[0.05, 1.0]`; an empty
/// sample stream yields the flat fallback.
pub fn envelope_from_samples(samples: &[f32], buckets: usize) -> Vec<f32> {
    if buckets == 0 {
        return Vec::new();
    }
    if samples.is_empty() {
        return flat(buckets);
    }

    let len = samples.len();
    (0..buckets)
        .map(|bucket| {
            let start = bucket * len / buckets;
            let end = ((bucket + 1) * len / buckets).clamp(start + 1, len);
            let start = start.min(len - 1);

            let stride = ((end - start) / MAX_POINTS_PER_BUCKET).max(1);
            let mut sum_squares = 0.0f64;
            let mut count = 0usize;
            let mut i = start;
            while i < end {
                let s = f64::from(samples[i]);
                sum_squares += s * s;
                count += 1;
                i += stride;
            }

            let rms = (sum_squares / count as f64).sqrt() as f32;
            (rms * BOOST).clamp(FLOOR, CEIL)
        })
        .collect()
}
