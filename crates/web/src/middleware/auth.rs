use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use drones_storage::{Database, repository::auth_token::AuthTokenRepository};
use std::collections::HashSet;

use crate::error::WebError;

pub const MISSING_CREDENTIALS: &str = "Authentication credentials were not provided.";
pub const NO_CREDENTIALS_IN_HEADER: &str = "Invalid token header. No credentials provided.";
pub const SPACES_IN_TOKEN: &str = "Invalid token header. Token string should not contain spaces.";
pub const INVALID_CHARACTERS: &str =
    "Invalid token header. Token string should not contain invalid characters.";
pub const INVALID_TOKEN: &str = "Invalid token.";

/// Username attached to requests authenticated with a static service key.
pub const SERVICE_USERNAME: &str = "service";

/// Identity of the caller, inserted into request extensions by [`require_auth`].
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub username: String,
}

/// State for the token middleware: issued tokens live in the database,
/// service keys come from configuration.
#[derive(Clone)]
pub struct AuthState {
    db: Database,
    api_keys: ApiKeys,
}

impl AuthState {
    pub fn new(db: Database, api_keys: ApiKeys) -> Self {
        Self { db, api_keys }
    }
}

pub async fn require_auth(
    State(auth): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, WebError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .map(|value| value.to_str().map_err(|_| WebError::Unauthorized(INVALID_CHARACTERS)))
        .transpose()?;
    let key = parse_token(header)
        .map_err(WebError::Unauthorized)?
        .to_owned();

    let user = authenticate(&auth, &key).await?;
    tracing::debug!(username = %user.username, "Request authenticated");

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

async fn authenticate(auth: &AuthState, key: &str) -> Result<AuthenticatedUser, WebError> {
    if auth.api_keys.is_valid(key) {
        return Ok(AuthenticatedUser {
            username: SERVICE_USERNAME.to_string(),
        });
    }

    match AuthTokenRepository::new(auth.db.pool()).find_by_key(key).await? {
        Some(token) => Ok(AuthenticatedUser {
            username: token.username,
        }),
        None => {
            tracing::warn!("Invalid token attempt");
            Err(WebError::Unauthorized(INVALID_TOKEN))
        }
    }
}

/// Extracts the key from an `Authorization: Token <key>` header.
///
/// The keyword is matched case-insensitively and `Bearer` is accepted as well.
/// A header using any other scheme counts as no credentials at all.
pub fn parse_token(header: Option<&str>) -> Result<&str, &'static str> {
    let mut parts = header.unwrap_or_default().split_whitespace();

    let keyword = parts.next().ok_or(MISSING_CREDENTIALS)?;
    if !keyword.eq_ignore_ascii_case("token") && !keyword.eq_ignore_ascii_case("bearer") {
        return Err(MISSING_CREDENTIALS);
    }

    let key = parts.next().ok_or(NO_CREDENTIALS_IN_HEADER)?;
    if parts.next().is_some() {
        return Err(SPACES_IN_TOKEN);
    }

    Ok(key)
}

#[derive(Clone, Default)]
pub struct ApiKeys {
    keys: HashSet<String>,
}

impl ApiKeys {
    pub fn from_comma_separated(keys_str: &str) -> Self {
        let keys = keys_str
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        Self { keys }
    }

    pub fn is_valid(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token_keyword_is_case_insensitive() {
        assert_eq!(parse_token(Some("TOKEN abc123")), Ok("abc123"));
        assert_eq!(parse_token(Some("Token abc123")), Ok("abc123"));
        assert_eq!(parse_token(Some("token abc123")), Ok("abc123"));
        assert_eq!(parse_token(Some("Bearer abc123")), Ok("abc123"));
    }

    #[test]
    fn test_parse_token_missing_credentials() {
        assert_eq!(parse_token(None), Err(MISSING_CREDENTIALS));
        assert_eq!(parse_token(Some("")), Err(MISSING_CREDENTIALS));
        assert_eq!(parse_token(Some("Basic dXNlcjpwYXNz")), Err(MISSING_CREDENTIALS));
    }

    #[test]
    fn test_parse_token_malformed_header() {
        assert_eq!(parse_token(Some("Token")), Err(NO_CREDENTIALS_IN_HEADER));
        assert_eq!(parse_token(Some("Token abc def")), Err(SPACES_IN_TOKEN));
    }

    #[test]
    fn test_api_keys_from_comma_separated() {
        let keys = ApiKeys::from_comma_separated(" alpha, beta ,,gamma ");
        assert_eq!(keys.len(), 3);
        assert!(keys.is_valid("alpha"));
        assert!(keys.is_valid("beta"));
        assert!(!keys.is_valid(" beta "));
        assert!(!keys.is_valid("delta"));
    }

    #[test]
    fn test_api_keys_empty() {
        let keys = ApiKeys::from_comma_separated("");
        assert!(keys.is_empty());
        assert!(!keys.is_valid(""));
    }
}
