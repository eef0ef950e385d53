use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::database::Database;
use crate::error::AppError;

const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Dark => write!(f, "dark"),
            Theme::Light => write!(f, "light"),
        }
    }
}

impl FromStr for Theme {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(AppError::Validation(format!("unknown theme '{}'", other))),
        }
    }
}

/// Stored theme, or the default when unset or unreadable.
pub fn get_theme(db: &Database) -> Result<Theme, AppError> {
    let theme = match db.get_setting(THEME_KEY)? {
        Some(value) => value.parse().unwrap_or_else(|_| {
            log::warn!("Ignoring stored theme '{}'", value);
            Theme::default()
        }),
        None => Theme::default(),
    };
    Ok(theme)
}

pub fn set_theme(db: &Database, theme: Theme) -> Result<(), AppError> {
    log::info!("Setting {} = {}", THEME_KEY, theme);
    db.set_setting(THEME_KEY, &theme.to_string())?;
    Ok(())
}

pub fn toggle_theme(db: &Database) -> Result<Theme, AppError> {
    let next = get_theme(db)?.toggled();
    set_theme(db, next)?;
    Ok(next)
}
