use anyhow::{Context, Result};

const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    pub api_keys: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let database_max_connections = match std::env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(value) => value
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a positive number")?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("Cannot load PORT env variable")?
                .parse()
                .context("PORT must be a number")?,
            database_url: std::env::var("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            database_max_connections,
            api_keys: std::env::var("API_KEYS").unwrap_or_default(),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Host part of the database URL, without credentials.
    pub fn database_location(&self) -> &str {
        self.database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(database_url: &str) -> Config {
        Config {
            host: "127.0.0.1".to_string(),
            port: 8000,
            database_url: database_url.to_string(),
            database_max_connections: DEFAULT_MAX_CONNECTIONS,
            api_keys: String::new(),
        }
    }

    #[test]
    fn test_database_location_hides_credentials() {
        let config = config("postgres://drones:secret@db:5432/drones");
        assert_eq!(config.database_location(), "db:5432/drones");
    }

    #[test]
    fn test_bind_address() {
        assert_eq!(config("postgres://db").bind_address(), "127.0.0.1:8000");
    }
}
