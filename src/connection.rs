//! Process wide database handles.
//!
//! [connect] reads `DATABASE_URL` once, picks the transport (a local
//! development proxy over plain HTTP or the cloud endpoint) and builds the
//! low level [SqlClient] along with the [Database] query builder wrapping it.
//! Both live as long as the process and are shared by every caller.

use std::sync::{Arc, OnceLock};

use crate::{ConnectionSettings, Database, Result, SqlClient, TransportConfig};

static CONNECTION: OnceLock<Connection> = OnceLock::new();

/// The pair of clients built from the connection settings.
#[derive(Debug)]
pub struct Connection {
    sql: Arc<SqlClient>,
    db: Database,
}

impl Connection {
    /// Build the clients for the given settings. No network I/O happens here.
    pub fn open(settings: &ConnectionSettings) -> Result<Self> {
        let connection_string = settings.connection_string();
        let transport = TransportConfig::detect(connection_string);
        let sql = Arc::new(SqlClient::new(connection_string, transport)?);
        let db = Database::new(sql.clone());

        Ok(Self { sql, db })
    }

    /// Low level client.
    pub fn sql(&self) -> &SqlClient {
        &self.sql
    }

    /// Query builder client.
    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Transport detected from the connection string.
    pub fn transport(&self) -> &TransportConfig {
        self.sql.transport()
    }
}

/// Return the process connection, creating it from the environment on first
/// call. Fails with [crate::Error::MissingConfiguration] when `DATABASE_URL`
/// is not set; nothing is stored in that case.
pub fn connect() -> Result<&'static Connection> {
    if let Some(connection) = CONNECTION.get() {
        return Ok(connection);
    }

    let settings = ConnectionSettings::from_env()?;
    let connection = Connection::open(&settings)?;

    // Concurrent first calls may race here, every caller gets the stored one.
    let connection = CONNECTION.get_or_init(|| connection);
    tracing::info!(
        local_proxy = connection.transport().is_local_proxy(),
        "database clients initialized"
    );

    Ok(connection)
}

/// Return the process connection if it has been created.
pub fn get() -> Option<&'static Connection> {
    CONNECTION.get()
}

/// Process wide low level client.
pub fn sql() -> Result<&'static SqlClient> {
    connect().map(Connection::sql)
}

/// Process wide query builder client.
pub fn db() -> Result<&'static Database> {
    connect().map(Connection::db)
}
