use thiserror::Error;

/// Typed application error hierarchy for all command entry points.
///
/// Serializes as a plain string so JSON consumers receive the same
/// `"error message"` shape regardless of variant, while Rust code still
/// gets typed variants that can be matched or propagated with `?`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Database(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Catalog request failed: {0}")]
    Http(String),

    #[error("{0}")]
    Io(String),

    #[error("{0}")]
    Json(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl serde::Serialize for AppError {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_string())
    }
}

// ── From impls ─────────────────────────────────────────────────────────────

// SQLite failures stay `Database`; data-layer rule violations (missing rows,
// rejected values) raised with `bail!` become `Other`.
impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        if e.downcast_ref::<rusqlite::Error>().is_some() {
            AppError::Database(e.to_string())
        } else {
            AppError::Other(e.to_string())
        }
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::Database(e.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Http(e.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Json(e.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(e: serde_yaml::Error) -> Self {
        AppError::Config(e.to_string())
    }
}

/// Allows `ok_or_else(|| format!(…))?` to coerce into AppError.
impl From<String> for AppError {
    fn from(s: String) -> Self {
        AppError::Other(s)
    }
}

impl From<&str> for AppError {
    fn from(s: &str) -> Self {
        AppError::Other(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_plain_string() {
        let err = AppError::NotFound("profile 'nobody'".to_string());
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#""Not found: profile 'nobody'""#);
    }

    #[test]
    fn test_anyhow_keeps_sqlite_failures_apart() {
        let sqlite: AppError = anyhow::Error::from(rusqlite::Error::QueryReturnedNoRows).into();
        assert!(matches!(sqlite, AppError::Database(_)));

        let rule: AppError = anyhow::anyhow!("custom rating x not found").into();
        assert!(matches!(rule, AppError::Other(ref s) if s == "custom rating x not found"));
    }

    #[test]
    fn test_string_coerces_to_other() {
        let err: AppError = "boom".into();
        assert!(matches!(err, AppError::Other(ref s) if s == "boom"));
    }
}
