use std::env;
use std::io;
use std::str::FromStr;

/// Settings for token issuing and password hashing.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub bcrypt_cost: u32,
}

pub struct Config {
    /// Postgres URL. `None` selects the in-memory repositories.
    pub database_url: Option<String>,
    pub server_port: u16,
    pub server_host: String,
    pub max_db_connections: u32,
    pub run_migrations: bool,
    pub auth: AuthConfig,
}

impl Config {
    pub fn from_env() -> io::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup so tests never touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> io::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| invalid("JWT_SECRET must be set"))?;

        let bcrypt_cost = parse_or(&lookup, "BCRYPT_COST", bcrypt::DEFAULT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(invalid("BCRYPT_COST must be between 4 and 31"));
        }

        Ok(Self {
            database_url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
            server_port: parse_or(&lookup, "SERVER_PORT", 8080)?,
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            max_db_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?,
            run_migrations: parse_or(&lookup, "RUN_MIGRATIONS", true)?,
            auth: AuthConfig {
                jwt_secret,
                token_ttl_hours: parse_or(&lookup, "JWT_EXPIRATION_HOURS", 24)?,
                bcrypt_cost,
            },
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> io::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| invalid(&format!("{} has an invalid value: {}", key, raw))),
        None => Ok(default),
    }
}

fn invalid(message: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, message.to_string())
}
