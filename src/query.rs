use std::{collections::HashMap, fmt::Display, marker::PhantomData};

use crate::{SqlEntity, ToSqlText};

/// SQL query template returning `T` entities.
///
/// Variables are written `{:name:}` and replaced by their value, the
/// `{:projection:}` variable is set from the entity projection. Parameters
/// placeholders are written `$?` and numbered in order of appearance.
pub struct SqlQuery<'a, T: SqlEntity> {
    query: String,
    parameters: Vec<&'a dyn ToSqlText>,
    variables: HashMap<&'a str, String>,
    _phantom: PhantomData<T>,
}

impl<'a, T: SqlEntity> SqlQuery<'a, T> {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_string(),
            parameters: Vec::new(),
            variables: [("projection", T::get_projection().to_string())].into(),
            _phantom: PhantomData,
        }
    }

    /// Set a variable in the query. This variable will be replaced by its value
    /// in the query.
    pub fn set_variable(&mut self, name: &'a str, value: &str) -> &mut Self {
        self.variables.insert(name, value.to_string());
        self
    }

    /// Add a parameter to the query. The parameter will be expanded in the
    /// `$?` placeholder.
    pub fn add_parameter(&mut self, parameter: &'a dyn ToSqlText) -> &mut Self {
        self.parameters.push(parameter);
        self
    }

    /// Append a vec of parameters to the query.
    pub fn append_parameters(&mut self, parameters: Vec<&'a dyn ToSqlText>) -> &mut Self {
        self.parameters.extend(parameters);
        self
    }

    /// Set the parameters of the query.
    pub fn set_parameters(&mut self, parameters: Vec<&'a dyn ToSqlText>) -> &mut Self {
        self.parameters = parameters;
        self
    }

    /// Return the variables of the query.
    pub fn get_variables(&self) -> &HashMap<&'a str, String> {
        &self.variables
    }

    /// Return the parameters of the query.
    pub fn get_parameters(&self) -> &[&'a dyn ToSqlText] {
        &self.parameters
    }

    /// Return the query and the parameters to be sent to the server.
    /// This consumes the query instance.
    pub fn expand(self) -> (String, Vec<&'a dyn ToSqlText>) {
        let query = self.to_string();

        (query, self.parameters)
    }
}

impl<T: SqlEntity> Display for SqlQuery<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut query = self.query.clone();
        for (name, value) in &self.variables {
            query = query.replace(&format!("{{:{name}:}}"), value);
        }
        //
        // Replace parameters placeholders by numerated parameters.
        let mut param_index = 1;
        while query.contains("$?") {
            query = query.replacen("$?", &format!("${param_index}"), 1);
            param_index += 1;
        }

        write!(f, "{query}")
    }
}
