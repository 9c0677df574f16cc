//! Splitting a star field into draw batches by brightness.
//!
//! Point size is global rasterizer state, so stars that share a size have to be drawn together.
//! A `MagnitudeGrouper` decides which stars go into which batch and how large each batch is
//! drawn. Whatever the policy, a brighter star is never drawn smaller than a dimmer one.

use crate::error::{GroupingError, InvalidRangeError};
use crate::parse_stars::star::{Color, Star};
use std::cmp::Ordering;

/// stars drawn with one point size and one color
#[derive(Debug, Clone, PartialEq)]
pub struct StarBatch {
    pub size: f64,
    pub color: Color,
    pub stars: Vec<Star>,
}

pub trait MagnitudeGrouper {
    /// batches ordered brightest first
    fn group(&self, stars: &[Star]) -> Vec<StarBatch>;
}

fn by_magnitude(a: &Star, b: &Star) -> Ordering {
    a.magnitude.total_cmp(&b.magnitude)
}

/// `value` has to be strictly positive, NaN included in the failures
fn positive(name: &'static str, value: f64) -> Result<f64, GroupingError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(GroupingError::NotPositive { name, value })
    }
}

/// Sorts stars by magnitude and cuts them into `buckets` equally long runs, the last one taking
/// the remainder. Bucket sizes fall off as a power of the bucket rank so the brightest few stars
/// stand out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankBuckets {
    pub buckets: usize,
    pub min_size: f64,
    pub max_size: f64,
    pub exponent: f64,
}

impl Default for RankBuckets {
    fn default() -> Self {
        RankBuckets {
            buckets: 10,
            min_size: 1.0,
            max_size: 5.5,
            exponent: 8.5,
        }
    }
}

impl RankBuckets {
    pub fn new(buckets: usize, min_size: f64, max_size: f64, exponent: f64) -> Result<RankBuckets, GroupingError> {
        let min_size = positive("min_size", min_size)?;
        let max_size = positive("max_size", max_size)?;
        if min_size > max_size {
            return Err(GroupingError::InvertedSizes {
                min: min_size,
                max: max_size,
            });
        }
        Ok(RankBuckets {
            buckets,
            min_size,
            max_size,
            exponent: positive("exponent", exponent)?,
        })
    }

    /// point size of the 1-based bucket `rank`, rank 1 holds the brightest stars
    pub fn bucket_size(&self, rank: usize) -> f64 {
        let n = self.buckets as f64;
        let inverted = (n - rank as f64 + 1.0) / n;
        self.min_size + (self.max_size - self.min_size) * inverted.powf(self.exponent)
    }
}

impl MagnitudeGrouper for RankBuckets {
    fn group(&self, stars: &[Star]) -> Vec<StarBatch> {
        if self.buckets == 0 {
            return vec![];
        }
        let mut sorted: Vec<&Star> = stars.iter().collect();
        sorted.sort_by(|a, b| by_magnitude(a, b));

        let mut batches: Vec<StarBatch> = (1..=self.buckets)
            .map(|rank| StarBatch {
                size: self.bucket_size(rank),
                color: Color::WHITE,
                stars: vec![],
            })
            .collect();
        // with fewer stars than buckets every star gets its own bucket and the tail stays empty
        let bucket_len = (sorted.len() / self.buckets).max(1);
        for (i, s) in sorted.into_iter().enumerate() {
            let index = (i / bucket_len).min(self.buckets - 1);
            batches[index].stars.push(s.clone());
        }
        log::debug!(
            "rank buckets: {:?}",
            batches.iter().map(|b| b.stars.len()).collect::<Vec<_>>()
        );
        batches
    }
}

/// Keeps only stars with magnitude in `[min_magnitude, max_magnitude]` and sizes each one
/// continuously, `min_radius * exp(k * (max_magnitude - magnitude))`, colored by spectral class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeFilter {
    min_magnitude: f64,
    max_magnitude: f64,
    min_radius: f64,
    k: f64,
}

impl RangeFilter {
    pub const DEFAULT_K: f64 = 0.4;

    pub fn new(
        min_magnitude: f64,
        max_magnitude: f64,
        min_radius: f64,
        k: f64,
    ) -> Result<RangeFilter, GroupingError> {
        if min_magnitude > max_magnitude {
            return Err(InvalidRangeError {
                min: min_magnitude,
                max: max_magnitude,
            }
            .into());
        }
        Ok(RangeFilter {
            min_magnitude,
            max_magnitude,
            min_radius: positive("min_radius", min_radius)?,
            k: positive("k", k)?,
        })
    }

    pub fn contains(&self, magnitude: f64) -> bool {
        (self.min_magnitude..=self.max_magnitude).contains(&magnitude)
    }

    pub fn size_of(&self, magnitude: f64) -> f64 {
        self.min_radius * (self.k * (self.max_magnitude - magnitude)).exp()
    }
}

impl MagnitudeGrouper for RangeFilter {
    fn group(&self, stars: &[Star]) -> Vec<StarBatch> {
        let mut kept: Vec<&Star> = stars.iter().filter(|s| self.contains(s.magnitude)).collect();
        kept.sort_by(|a, b| by_magnitude(a, b));

        let mut batches: Vec<StarBatch> = vec![];
        for s in kept {
            let size = self.size_of(s.magnitude);
            let color = s.class().color();
            // neighbours with the same magnitude and class can share a draw call
            match batches.last_mut() {
                Some(last) if last.size == size && last.color == color => last.stars.push(s.clone()),
                _ => batches.push(StarBatch {
                    size,
                    color,
                    stars: vec![s.clone()],
                }),
            }
        }
        log::debug!(
            "range filter [{}, {}] kept {} of {} stars in {} batches",
            self.min_magnitude,
            self.max_magnitude,
            batches.iter().map(|b| b.stars.len()).sum::<usize>(),
            stars.len(),
            batches.len()
        );
        batches
    }
}
