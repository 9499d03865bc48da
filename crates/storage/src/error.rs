use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    /// A value was rejected by the data layer (duplicate name, dangling reference).
    #[error("Invalid {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23505")
        )
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23503")
        )
    }

    /// Turns a unique constraint failure into a field error, leaves anything else untouched.
    pub fn on_unique_violation(self, field: &'static str, message: &str) -> Self {
        if self.is_unique_violation() {
            Self::invalid(field, message)
        } else {
            self
        }
    }

    /// Turns a foreign key failure into a field error, leaves anything else untouched.
    pub fn on_foreign_key_violation(self, field: &'static str, message: &str) -> Self {
        if self.is_foreign_key_violation() {
            Self::invalid(field, message)
        } else {
            self
        }
    }

    /// Name of the constraint that rejected the statement, if the database reported one.
    pub fn constraint(&self) -> Option<&str> {
        match self {
            StorageError::Database(sqlx::Error::Database(e)) => e.constraint(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_display() {
        let err = StorageError::invalid("name", "already exists");
        assert_eq!(err.to_string(), "Invalid name: already exists");
    }

    #[test]
    fn test_non_database_errors_pass_through() {
        let err = StorageError::NotFound.on_unique_violation("name", "duplicate");
        assert!(matches!(err, StorageError::NotFound));

        let err = StorageError::NotFound.on_foreign_key_violation("pilot", "missing");
        assert!(matches!(err, StorageError::NotFound));
    }

    #[test]
    fn test_row_not_found_is_not_a_constraint_violation() {
        let err = StorageError::from(sqlx::Error::RowNotFound);
        assert!(!err.is_unique_violation());
        assert!(!err.is_foreign_key_violation());
        assert!(err.constraint().is_none());
    }
}
