use std::error::Error;
use std::fmt::Display;

use crate::{ConversionError, Projection, Row};

/// SQL field structure.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct StructureField {
    /// Name of the field.
    name: String,

    /// SQL type of the field.
    sql_type: String,
}

impl StructureField {
    /// Field with the given name and SQL type.
    pub fn new(name: &str, sql_type: &str) -> Self {
        Self {
            name: name.to_string(),
            sql_type: sql_type.to_string(),
        }
    }

    /// Name and SQL type of the field.
    pub fn dump(&self) -> (&str, &str) {
        (&self.name, &self.sql_type)
    }
}
/// Structure of a SQL tuple.
#[derive(Debug, Clone, Default)]
pub struct Structure {
    fields: Vec<StructureField>,
}

impl Structure {
    /// Create a new instance of Structure from a slice of tuples.
    pub fn new(field_definitions: &[(&str, &str)]) -> Self {
        let fields = field_definitions
            .iter()
            .map(|(name, sql_type)| StructureField::new(name, sql_type))
            .collect();

        Self { fields }
    }

    /// Append a field.
    pub fn set_field(&mut self, name: &str, sql_type: &str) -> &mut Self {
        self.fields.push(StructureField::new(name, sql_type));

        self
    }

    /// Fields in declaration order.
    pub fn get_fields(&self) -> &Vec<StructureField> {
        &self.fields
    }

    /// Field names in declaration order.
    pub fn get_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}

/// Types whose SQL tuple structure is known.
pub trait Structured {
    /// Structure of the tuple.
    fn get_structure() -> Structure;
}

/// Error raised during entity hydration process.
#[derive(Debug)]
pub enum HydrationError {
    /// Data could not be parsed or cast in the expected structure.
    InvalidData(String),

    /// The row has no such field.
    MissingField(String),

    /// The value of a field could not be converted.
    FieldFetchFailed {
        error: ConversionError,
        field_index: usize,
    },
}

impl Display for HydrationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidData(msg) => write!(f, "Invalid data error: «{msg}»"),
            Self::MissingField(name) => write!(f, "No field «{name}» in the row."),
            Self::FieldFetchFailed { error, field_index } => write!(
                f,
                "Fail to fetch data for field index {field_index}, message: «{error}»."
            ),
        }
    }
}

impl Error for HydrationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::FieldFetchFailed { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Database entity, this trait defines how entities are projected from and
/// hydrated with database data.
pub trait SqlEntity: Structured + Sized {
    /// Return the SQL projection required to build this entity.
    fn get_projection() -> Projection<Self>;

    /// Create a new entity from a result row.
    fn hydrate(row: &Row) -> Result<Self, HydrationError>;
}
