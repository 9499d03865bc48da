use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const TOKEN_KEY_LENGTH: usize = 40;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuthToken {
    pub key: String,
    pub username: String,
    pub created: DateTime<Utc>,
}

impl AuthToken {
    /// Produces a fresh 40 character lowercase hex key.
    pub fn generate_key() -> String {
        let mut key = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
        key.truncate(TOKEN_KEY_LENGTH);
        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_key_shape() {
        let key = AuthToken::generate_key();
        assert_eq!(key.len(), TOKEN_KEY_LENGTH);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_generated_keys_differ() {
        assert_ne!(AuthToken::generate_key(), AuthToken::generate_key());
    }
}
