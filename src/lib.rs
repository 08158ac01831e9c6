#![warn(missing_docs)]
//! # Agrum Neon
//!
//! Agrum database layer running over the Neon serverless SQL-over-HTTP
//! driver. It lets developers:
//!  1. get process wide database handles from `DATABASE_URL` with [connect]
//!  2. develop against a Neon Local proxy with no configuration change
//!  3. write the SQL they want and hydrate their entities from it
//!
//! The low level [SqlClient] sends raw statements, the [Database] query
//! builder client runs [SqlQuery] instances built from query books.

mod client;
mod condition;
pub mod connection;
mod converter;
mod database;
mod error;
mod projection;
mod query;
mod query_book;
mod row;
mod settings;
mod structure;
mod target;
mod transport;

pub use client::*;
pub use condition::*;
pub use connection::{Connection, connect, db, sql};
pub use converter::*;
pub use database::*;
pub use error::*;
pub use projection::*;
pub use query::*;
pub use query_book::*;
pub use row::*;
pub use settings::*;
pub use structure::*;
pub use target::*;
pub use transport::*;

/// Result type of this crate.
pub type Result<T> = std::result::Result<T, Error>;
