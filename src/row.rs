use std::sync::Arc;

use postgres_types::Type;

use crate::{FromSqlText, HydrationError};

/// Description of a result column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    type_oid: u32,
}

impl Field {
    /// Constructor
    pub fn new(name: &str, type_oid: u32) -> Self {
        Self {
            name: name.to_string(),
            type_oid,
        }
    }

    /// Column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Postgres OID of the column type.
    pub fn type_oid(&self) -> u32 {
        self.type_oid
    }

    /// Column type when it is a built-in one.
    pub fn sql_type(&self) -> Option<Type> {
        Type::from_oid(self.type_oid)
    }
}

/// A result row, values are kept in Postgres text output format.
#[derive(Debug, Clone)]
pub struct Row {
    fields: Arc<[Field]>,
    values: Vec<Option<String>>,
}

impl Row {
    pub(crate) fn new(fields: Arc<[Field]>, values: Vec<Option<String>>) -> Self {
        Self { fields, values }
    }

    /// Columns of this row.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Number of values in this row.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the row holds no value.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Position of the named column.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Raw text of the named column, `None` when the value is NULL or when
    /// there is no such column.
    pub fn raw(&self, name: &str) -> Option<&str> {
        self.index_of(name)
            .and_then(|index| self.values.get(index))
            .and_then(|value| value.as_deref())
    }

    /// Convert the value of the named column.
    pub fn get<T: FromSqlText>(&self, name: &str) -> Result<T, HydrationError> {
        let index = self
            .index_of(name)
            .ok_or_else(|| HydrationError::MissingField(name.to_string()))?;

        self.get_index(index)
    }

    /// Convert the value at the given position.
    pub fn get_index<T: FromSqlText>(&self, index: usize) -> Result<T, HydrationError> {
        let value = self
            .values
            .get(index)
            .ok_or_else(|| HydrationError::MissingField(format!("#{index}")))?;

        T::from_sql_text(value.as_deref())
            .map_err(|error| HydrationError::FieldFetchFailed { error, field_index: index })
    }
}

/// Outcome of a statement.
#[derive(Debug, Clone)]
pub struct QueryResult {
    command: String,
    row_count: Option<u64>,
    fields: Arc<[Field]>,
    rows: Vec<Row>,
}

impl QueryResult {
    pub(crate) fn new(
        command: String,
        row_count: Option<u64>,
        fields: Vec<Field>,
        values: Vec<Vec<Option<String>>>,
    ) -> Self {
        let fields: Arc<[Field]> = fields.into();
        let rows = values
            .into_iter()
            .map(|values| Row::new(fields.clone(), values))
            .collect();

        Self {
            command,
            row_count,
            fields,
            rows,
        }
    }

    /// SQL command tag (`SELECT`, `INSERT`, …).
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Number of rows affected or returned, as reported by the server.
    pub fn row_count(&self) -> Option<u64> {
        self.row_count
    }

    /// Columns of the result set.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Returned rows.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Take the returned rows.
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}
