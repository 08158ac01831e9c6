use crate::{Error, Result};

/// Environment variable holding the connection string.
pub const DATABASE_URL: &str = "DATABASE_URL";

/// Connection settings, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    connection_string: String,
}

impl ConnectionSettings {
    /// Create settings from a connection string. An empty string is treated
    /// as a missing one.
    pub fn new(connection_string: impl Into<String>) -> Result<Self> {
        let connection_string = connection_string.into();

        if connection_string.is_empty() {
            return Err(Error::MissingConfiguration(DATABASE_URL));
        }

        Ok(Self { connection_string })
    }

    /// Read the settings from the process environment. A `.env` file is
    /// loaded first when present; variables already set take precedence.
    pub fn from_env() -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!("could not load .env file: {e}");
            }
        }

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the settings through the given lookup function.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let connection_string =
            lookup(DATABASE_URL).ok_or(Error::MissingConfiguration(DATABASE_URL))?;

        Self::new(connection_string)
    }

    /// The connection string as given.
    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }
}
