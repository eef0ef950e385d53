//! Half-star rating histograms.

use serde::Serialize;

use super::{format_star_level, half_star_index, mean_of_present, HALF_STAR_LEVELS};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingBucket {
    pub star: f64,
    pub count: usize,
    /// Share of all present ratings, 0–100. Computed per bucket, so the
    /// ten values sum to 100 only up to floating point.
    pub percentage: f64,
}

impl RatingBucket {
    pub fn label(&self) -> String {
        format_star_level(self.star)
    }
}

/// Distribution of a set of ratings over the ten half-star levels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingDistribution {
    /// Mean of the raw ratings (not of the snapped bucket levels).
    pub average: f64,
    pub total_count: usize,
    pub buckets: [RatingBucket; 10],
    /// Largest bucket count, never below 1.
    pub max_count: usize,
}

impl RatingDistribution {
    /// Build a distribution from optional ratings.
    ///
    /// Returns `None` when no rating is present; callers skip the chart.
    pub fn from_ratings<I>(ratings: I) -> Option<Self>
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let present: Vec<f64> = ratings
            .into_iter()
            .flatten()
            .filter(|r| r.is_finite())
            .collect();

        let (average, total_count) = mean_of_present(present.iter().copied().map(Some))?;

        let mut counts = [0usize; 10];
        for &rating in &present {
            match half_star_index(rating) {
                Some(idx) => counts[idx] += 1,
                None => log::debug!("Rating {} outside half-star range, left out of histogram", rating),
            }
        }

        let buckets = std::array::from_fn(|i| RatingBucket {
            star: HALF_STAR_LEVELS[i],
            count: counts[i],
            percentage: counts[i] as f64 / total_count as f64 * 100.0,
        });
        let max_count = counts.iter().copied().max().unwrap_or(0).max(1);

        Some(Self {
            average,
            total_count,
            buckets,
            max_count,
        })
    }

    /// Convenience for rating lists that carry no absent values.
    pub fn from_present(ratings: &[f64]) -> Option<Self> {
        Self::from_ratings(ratings.iter().copied().map(Some))
    }

    /// Bar height for a bucket relative to the tallest bar, 0–100.
    pub fn bar_height(&self, bucket: &RatingBucket) -> f64 {
        bucket.count as f64 / self.max_count as f64 * 100.0
    }

    /// Average formatted to one decimal place.
    pub fn average_label(&self) -> String {
        format!("{:.1}", self.average)
    }

    pub fn count_label(&self) -> String {
        if self.total_count == 1 {
            "1 rating".to_string()
        } else {
            format!("{} ratings", self.total_count)
        }
    }
}
