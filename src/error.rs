use thiserror::Error;

use crate::HydrationError;

/// Errors raised by the connection layer and the HTTP driver.
#[derive(Debug, Error)]
pub enum Error {
    /// A required configuration value is absent or empty. The process cannot
    /// talk to any database without it.
    #[error("{0} is required")]
    MissingConfiguration(&'static str),

    /// The driver could not work out where to send queries from the
    /// connection string.
    #[error("invalid connection string: {0}")]
    InvalidConnectionString(String),

    /// The HTTP request could not be sent or its response could not be read.
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The database refused the query.
    #[error("database error: {message}{}", code_suffix(.code))]
    Database {
        /// SQLSTATE code when the server sent one.
        code: Option<String>,
        /// Server message.
        message: String,
    },

    /// The endpoint answered something that is not a SQL-over-HTTP payload.
    #[error("unexpected response: {0}")]
    Protocol(String),

    /// A result row could not be turned into an entity.
    #[error(transparent)]
    Hydration(#[from] HydrationError),
}

fn code_suffix(code: &Option<String>) -> String {
    code.as_ref()
        .map(|code| format!(" (code {code})"))
        .unwrap_or_default()
}
