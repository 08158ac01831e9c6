use std::{fmt::Display, marker::PhantomData};

use crate::Structured;

/// Definition of a projection field.
#[derive(Debug, Clone)]
pub struct ProjectionFieldDefinition {
    /// SQL definition of the field, usually a field name but can be any SQL
    /// operation or function call.
    definition: String,

    /// Output field name
    name: String,
}

impl ProjectionFieldDefinition {
    /// Instantiate field definition.
    pub fn new(definition: &str, name: &str) -> Self {
        Self {
            definition: definition.to_string(),
            name: name.to_string(),
        }
    }

    /// Name the expression is exposed under.
    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// Create the SQL definition of the projection field.
    pub fn expand(&self) -> String {
        format!("{} as {}", self.definition, self.name)
    }
}

/// A Projection defines what is output from a query in order to hydrate a
/// [crate::SqlEntity]. By default, each field of the entity structure is
/// fetched from the source alias with the same name.
#[derive(Debug, Clone)]
pub struct Projection<T: Structured> {
    fields: Vec<ProjectionFieldDefinition>,
    _phantom: PhantomData<T>,
}

impl<T: Structured> Default for Projection<T> {
    fn default() -> Self {
        Self::from_fields(|name| name.to_string())
    }
}

impl<T: Structured> Projection<T> {
    /// Projection of the entity structure fields taken from the given source
    /// alias.
    pub fn new(source_alias: &str) -> Self {
        Self::from_fields(|name| format!("{source_alias}.{name}"))
    }

    fn from_fields(definition: impl Fn(&str) -> String) -> Self {
        let fields = T::get_structure()
            .get_names()
            .into_iter()
            .map(|name| ProjectionFieldDefinition::new(&definition(name), name))
            .collect();

        Self {
            fields,
            _phantom: PhantomData,
        }
    }

    /// Replace the definition of a field, the field is added when it is not
    /// part of the projection yet.
    pub fn set_definition(mut self, name: &str, definition: &str) -> Self {
        let field = ProjectionFieldDefinition::new(definition, name);

        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }

        self
    }

    /// Projected fields, in order.
    pub fn get_fields(&self) -> &[ProjectionFieldDefinition] {
        &self.fields
    }
}

impl<T: Structured> Display for Projection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields = self
            .fields
            .iter()
            .map(ProjectionFieldDefinition::expand)
            .collect::<Vec<String>>()
            .join(", ");

        write!(f, "{fields}")
    }
}
