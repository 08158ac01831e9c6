//! Connection string parsing.
//!
//! Only the network target is extracted here: the host and the port as they
//! appear in a `scheme://[user[:password]@]host[:port][/path][?query]` URL.
//! Everything else is left to the server, which receives the connection
//! string untouched.

use std::fmt::Display;

use thiserror::Error;

/// Port used when the connection string does not carry one.
pub const DEFAULT_PORT: &str = "5432";

/// The connection string is not a well formed URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed connection string: {reason}")]
pub struct MalformedConnectionString {
    reason: &'static str,
}

impl MalformedConnectionString {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Network target of a connection string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionTarget {
    host: String,
    port: Option<String>,
}

impl ConnectionTarget {
    /// Parse the host and port out of a URL shaped connection string.
    pub fn parse(connection_string: &str) -> Result<Self, MalformedConnectionString> {
        let (scheme, rest) = connection_string
            .split_once("://")
            .ok_or_else(|| MalformedConnectionString::new("missing scheme"))?;

        if !is_valid_scheme(scheme) {
            return Err(MalformedConnectionString::new("invalid scheme"));
        }

        let authority = rest
            .split(['/', '?', '#'])
            .next()
            .unwrap_or_default();

        // Passwords may contain '@', the host starts after the last one.
        let host_port = match authority.rfind('@') {
            Some(index) => &authority[index + 1..],
            None => authority,
        };

        let (host, port) = split_host_port(host_port)?;

        if host.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(MalformedConnectionString::new("invalid character in host"));
        }

        let port = match port {
            None | Some("") => None,
            Some(port) => {
                if !port.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(MalformedConnectionString::new("port is not a number"));
                }
                let port = port
                    .parse::<u16>()
                    .map_err(|_| MalformedConnectionString::new("port out of range"))?;
                Some(port.to_string())
            }
        };

        Ok(Self {
            host: host.to_string(),
            port,
        })
    }

    /// Host name as written in the connection string.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Port given in the connection string without leading zeros, if any.
    pub fn port(&self) -> Option<&str> {
        self.port.as_deref()
    }

    /// Port given in the connection string or the Postgres default one.
    pub fn port_or_default(&self) -> &str {
        self.port().unwrap_or(DEFAULT_PORT)
    }
}

impl Display for ConnectionTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.port_or_default())
    }
}

fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();

    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}

fn split_host_port(host_port: &str) -> Result<(&str, Option<&str>), MalformedConnectionString> {
    if host_port.starts_with('[') {
        // IPv6 literal, brackets are part of the host.
        let end = host_port
            .find(']')
            .ok_or_else(|| MalformedConnectionString::new("unterminated IPv6 address"))?;
        let (host, rest) = host_port.split_at(end + 1);

        return match rest.strip_prefix(':') {
            Some(port) => Ok((host, Some(port))),
            None if rest.is_empty() => Ok((host, None)),
            None => Err(MalformedConnectionString::new("garbage after IPv6 address")),
        };
    }

    Ok(match host_port.split_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (host_port, None),
    })
}
