//! Custom-category cohorts across a user's library.
//!
//! Category names are grouped by exact string equality. "Story" and
//! "story" are different categories, as are "Audio" and "Audio ".

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::Serialize;

use super::RatingDistribution;
use crate::database::models::{CustomRating, LibraryEntry};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRatings {
    pub name: String,
    /// Entry order, then rating order within an entry.
    pub ratings: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDistribution {
    pub name: String,
    pub distribution: RatingDistribution,
}

/// Group every custom rating in the library by category name.
///
/// Categories come back most-populated first; equal populations keep the
/// order in which the category was first seen.
pub fn aggregate_custom_ratings(entries: &[LibraryEntry]) -> Vec<CategoryRatings> {
    let mut groups: Vec<CategoryRatings> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for cr in entries.iter().flat_map(|e| e.custom_ratings.iter()) {
        match index.get(cr.category_name.as_str()) {
            Some(&i) => groups[i].ratings.push(cr.rating),
            None => {
                index.insert(cr.category_name.as_str(), groups.len());
                groups.push(CategoryRatings {
                    name: cr.category_name.clone(),
                    ratings: vec![cr.rating],
                });
            }
        }
    }

    // Vec::sort_by is stable, so ties stay in first-seen order.
    groups.sort_by(|a, b| b.ratings.len().cmp(&a.ratings.len()));
    groups
}

/// One histogram per category, in [`aggregate_custom_ratings`] order.
pub fn category_distributions(entries: &[LibraryEntry]) -> Vec<CategoryDistribution> {
    aggregate_custom_ratings(entries)
        .into_iter()
        .filter_map(|group| {
            RatingDistribution::from_present(&group.ratings).map(|distribution| {
                CategoryDistribution {
                    name: group.name,
                    distribution,
                }
            })
        })
        .collect()
}

/// Distinct category names used anywhere in the library, sorted.
pub fn known_categories(entries: &[LibraryEntry]) -> Vec<String> {
    entries
        .iter()
        .flat_map(|e| e.custom_ratings.iter())
        .map(|cr| cr.category_name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Previously used category names to offer while adding a category to an
/// entry: names already on the entry are left out, and the rest are kept
/// when they contain `typed` case-insensitively. Input order is kept and
/// duplicates collapse to their first occurrence.
pub fn category_suggestions(
    previous: &[String],
    current: &[CustomRating],
    typed: &str,
) -> Vec<String> {
    let taken: HashSet<&str> = current.iter().map(|cr| cr.category_name.as_str()).collect();
    let needle = typed.to_lowercase();
    let mut seen = HashSet::new();

    previous
        .iter()
        .filter(|name| !taken.contains(name.as_str()))
        .filter(|name| seen.insert(name.as_str()))
        .filter(|name| name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
