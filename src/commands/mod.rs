//! Page assembly and library mutations.
//!
//! Each function takes the already-open [`Database`] (and the catalog client
//! where one is needed) and returns a serializable view or an [`AppError`].

mod library;
mod podcast;
mod profile;
mod search;
mod settings;

pub use library::*;
pub use podcast::*;
pub use profile::*;
pub use search::*;
pub use settings::*;

use crate::database::{Database, Profile};
use crate::error::AppError;

pub(crate) fn require_profile(db: &Database, username: &str) -> Result<Profile, AppError> {
    db.get_profile_by_username(username)?
        .ok_or_else(|| AppError::NotFound(format!("profile '{}'", username)))
}

pub(crate) fn validate_rating(rating: f64) -> Result<(), AppError> {
    if crate::ratings::is_valid_rating(rating) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "rating {} must be a half-star value between 0.5 and 5",
            rating
        )))
    }
}
