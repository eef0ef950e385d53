use serde::Serialize;

use super::{mean_of_present, snap_to_half_star};
use crate::database::models::LibraryEntry;

/// Review totals for one podcast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PodcastSummary {
    /// Every review, rated or not.
    pub review_count: usize,
    pub rated_count: usize,
    /// Mean overall rating of the rated reviews; `None` when nobody rated.
    pub average: Option<f64>,
}

impl PodcastSummary {
    pub fn from_reviews(reviews: &[LibraryEntry]) -> Self {
        let mean = mean_of_present(reviews.iter().map(|r| r.overall_rating));
        Self {
            review_count: reviews.len(),
            rated_count: mean.map(|(_, count)| count).unwrap_or(0),
            average: mean.map(|(avg, _)| avg),
        }
    }

    /// Average snapped to a half star, for the star widget.
    pub fn star_rating(&self) -> Option<f64> {
        self.average.map(snap_to_half_star)
    }

    /// Raw average to one decimal place, for the text next to the stars.
    pub fn average_label(&self) -> Option<String> {
        self.average.map(|avg| format!("{:.1}", avg))
    }
}
