use std::sync::Arc;

use crate::{Result, SqlClient, SqlEntity, SqlQuery};

/// Query builder client: runs [SqlQuery] instances through a shared
/// [SqlClient] and hydrates the resulting entities.
#[derive(Debug, Clone)]
pub struct Database {
    client: Arc<SqlClient>,
}

impl Database {
    /// Wrap a shared low level client.
    pub fn new(client: Arc<SqlClient>) -> Self {
        Self { client }
    }

    /// The low level client this database sends its queries through.
    pub fn client(&self) -> &SqlClient {
        &self.client
    }

    /// Run the query and hydrate every returned row.
    pub async fn query<T: SqlEntity>(&self, query: SqlQuery<'_, T>) -> Result<Vec<T>> {
        let (statement, parameters) = query.expand();
        let result = self.client.query(&statement, &parameters).await?;

        let entities = result
            .rows()
            .iter()
            .map(T::hydrate)
            .collect::<std::result::Result<Vec<T>, _>>()?;

        Ok(entities)
    }

    /// Run the query and hydrate the first returned row, if any.
    pub async fn query_one<T: SqlEntity>(&self, query: SqlQuery<'_, T>) -> Result<Option<T>> {
        let (statement, parameters) = query.expand();
        let result = self.client.query(&statement, &parameters).await?;

        let entity = result.rows().first().map(T::hydrate).transpose()?;

        Ok(entity)
    }
}
