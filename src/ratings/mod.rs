//! Rating arithmetic shared by the profile, library and podcast views.
//!
//! Ratings are half-star values in `[0.5, 5.0]`. An absent rating is
//! `None`, never zero, and is excluded from every mean and count computed
//! here.

pub mod categories;
pub mod histogram;
pub mod summary;

use serde::{Deserialize, Serialize};

pub use categories::{
    aggregate_custom_ratings, category_distributions, category_suggestions, known_categories,
    CategoryDistribution, CategoryRatings,
};
pub use histogram::{RatingBucket, RatingDistribution};
pub use summary::PodcastSummary;

pub const MIN_RATING: f64 = 0.5;
pub const MAX_RATING: f64 = 5.0;

/// The ten half-star levels a rating can land on, lowest first.
pub const HALF_STAR_LEVELS: [f64; 10] = [0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0, 4.5, 5.0];

/// Rating given to a freshly added custom category.
pub const DEFAULT_CUSTOM_RATING: f64 = 3.0;

/// Snap a value to the nearest half star (halves round away from zero).
pub fn snap_to_half_star(value: f64) -> f64 {
    (value * 2.0).round() / 2.0
}

/// Index into [`HALF_STAR_LEVELS`] for a rating after snapping, or `None`
/// when the snapped value falls outside the ten levels.
pub fn half_star_index(value: f64) -> Option<usize> {
    if !value.is_finite() {
        return None;
    }
    let steps = (value * 2.0).round();
    if (1.0..=10.0).contains(&steps) {
        Some(steps as usize - 1)
    } else {
        None
    }
}

/// True for finite values in `[0.5, 5.0]` that are exact multiples of 0.5.
pub fn is_valid_rating(value: f64) -> bool {
    value.is_finite()
        && (MIN_RATING..=MAX_RATING).contains(&value)
        && (value * 2.0).fract() == 0.0
}

/// Arithmetic mean and count of the present, finite ratings.
///
/// Returns `None` when nothing is left to average.
pub fn mean_of_present<I>(ratings: I) -> Option<(f64, usize)>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (sum, count) = ratings
        .into_iter()
        .flatten()
        .filter(|r| r.is_finite())
        .fold((0.0_f64, 0_usize), |(sum, count), r| (sum + r, count + 1));

    if count == 0 {
        None
    } else {
        Some((sum / count as f64, count))
    }
}

/// Chart label for a star level: whole stars print plainly, halves get `½`
/// (`4.5` → `"4½"`, `0.5` → `"0½"`).
pub fn format_star_level(star: f64) -> String {
    if star.fract() == 0.5 {
        format!("{}½", star.floor() as i64)
    } else {
        format!("{}", star)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StarFill {
    Full,
    Half,
    Empty,
}

/// How each of the five stars of a star widget is drawn for a rating.
/// An absent rating draws five empty stars.
pub fn star_fills(rating: Option<f64>) -> [StarFill; 5] {
    let rating = rating.unwrap_or(0.0);
    std::array::from_fn(|i| {
        let i = i as f64;
        if rating >= i + 1.0 {
            StarFill::Full
        } else if rating >= i + 0.5 {
            StarFill::Half
        } else {
            StarFill::Empty
        }
    })
}
