//! Text representation of SQL values.
//!
//! The HTTP driver asks the server for raw text output, every value arrives
//! as a string in Postgres output format (or NULL) and every parameter is
//! sent in Postgres input format.

use std::{
    error::Error,
    fmt::{Debug, Display},
};

mod core_types;

/// A text value could not be converted to the expected Rust type.
#[derive(Debug)]
pub struct ConversionError {
    nested_error: Option<Box<dyn Error + Send + Sync>>,
    message: String,
}

impl ConversionError {
    /// Error without underlying cause.
    pub fn raise(message: &str) -> Self {
        Self {
            message: message.to_string(),
            nested_error: None,
        }
    }

    /// Error caused by another one.
    pub fn nest(message: &str, nested_error: Box<dyn Error + Send + Sync>) -> Self {
        Self {
            message: message.to_string(),
            nested_error: Some(nested_error),
        }
    }
}

impl Display for ConversionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.nested_error {
            Some(e) => write!(f, "{}, error caught '{}'", self.message, e),
            None => write!(f, "{}", self.message),
        }
    }
}

impl Error for ConversionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.nested_error
            .as_deref()
            .map(|e| e as &(dyn Error + 'static))
    }
}

/// Types that can be built from a value in Postgres text output format.
pub trait FromSqlText: Sized {
    /// Convert the given value, `None` stands for SQL NULL.
    fn from_sql_text(value: Option<&str>) -> Result<Self, ConversionError>;
}

/// Types that can be sent as a query parameter.
pub trait ToSqlText: Debug + Sync {
    /// Postgres input representation of the value, `None` stands for SQL NULL.
    fn to_sql_text(&self) -> Option<String>;
}

/// Build a `Vec<&dyn ToSqlText>` from a list of values.
#[macro_export]
macro_rules! params {
    () => {
        ::std::vec::Vec::<&dyn $crate::ToSqlText>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$(&$value as &dyn $crate::ToSqlText),+]
    };
}

impl<T: FromSqlText> FromSqlText for Option<T> {
    fn from_sql_text(value: Option<&str>) -> Result<Self, ConversionError> {
        value.map(|v| T::from_sql_text(Some(v))).transpose()
    }
}

impl<T: ToSqlText> ToSqlText for Option<T> {
    fn to_sql_text(&self) -> Option<String> {
        self.as_ref().and_then(ToSqlText::to_sql_text)
    }
}

impl<T: ToSqlText + ?Sized> ToSqlText for &T {
    fn to_sql_text(&self) -> Option<String> {
        (**self).to_sql_text()
    }
}

pub(crate) fn not_null<'v>(value: Option<&'v str>, type_name: &str) -> Result<&'v str, ConversionError> {
    value.ok_or_else(|| ConversionError::raise(&format!("Unexpected NULL for type {type_name}")))
}
