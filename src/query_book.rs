use std::{collections::HashMap, iter::repeat_n};

use crate::{SqlEntity, SqlQuery, Structured, ToSqlText, WhereCondition};

/// Set of queries dealing with one kind of entity and its data source.
pub trait QueryBook<T: SqlEntity> {
    /// Return the definition of the SQL data source.
    /// It could be a table name or a view name or a values list or function or
    /// even a sub-query.
    fn get_sql_source(&self) -> &'static str;
}

/// Query book able to select entities.
pub trait ReadQueryBook<T: SqlEntity>: QueryBook<T> {
    /// Return the definition of the SQL select statement.
    fn get_sql_definition(&self) -> &'static str {
        "select {:projection:} from {:source:} where {:condition:}"
    }

    fn select<'a>(&self, conditions: WhereCondition<'a>) -> SqlQuery<'a, T> {
        let mut query = SqlQuery::new(self.get_sql_definition());
        let (conditions, parameters) = conditions.expand();
        query
            .set_variable("source", self.get_sql_source())
            .set_variable("condition", &conditions)
            .set_parameters(parameters);

        query
    }
}

/// Query book able to delete entities.
pub trait DeleteQueryBook<T: SqlEntity>: QueryBook<T> {
    fn get_sql_definition(&self) -> &'static str {
        "delete from {:source:} where {:condition:} returning {:projection:}"
    }

    fn delete<'a>(&self, conditions: WhereCondition<'a>) -> SqlQuery<'a, T> {
        let mut query = SqlQuery::new(self.get_sql_definition());
        let (conditions, parameters) = conditions.expand();
        query
            .set_variable("source", self.get_sql_source())
            .set_variable("condition", &conditions)
            .set_parameters(parameters);

        query
    }
}

/// Query book able to update entities.
pub trait UpdateQueryBook<T: SqlEntity>: QueryBook<T> {
    fn get_sql_definition(&self) -> &'static str {
        "update {:source:} set {:updates:} where {:condition:} returning {:projection:}"
    }

    /// Updated columns are set following the entity structure order.
    fn update<'a>(
        &self,
        updates: HashMap<&'a str, &'a dyn ToSqlText>,
        conditions: WhereCondition<'a>,
    ) -> SqlQuery<'a, T> {
        let (condition_sql, condition_params) = conditions.expand();
        let mut updates_fragments = Vec::with_capacity(updates.len());
        let mut params: Vec<&'a dyn ToSqlText> =
            Vec::with_capacity(updates.len() + condition_params.len());

        for name in <T as Structured>::get_structure().get_names() {
            if let Some(value) = updates.get(name) {
                updates_fragments.push(format!("{name} = $?"));
                params.push(*value);
            }
        }

        let mut query = SqlQuery::new(self.get_sql_definition());
        query
            .set_variable("source", self.get_sql_source())
            .set_variable("updates", &updates_fragments.join(", "))
            .set_variable("condition", &condition_sql)
            .set_parameters(params)
            .append_parameters(condition_params);

        query
    }
}

/// Query book able to insert entities.
pub trait InsertQueryBook<T: SqlEntity>: QueryBook<T> {
    fn get_sql_definition(&self) -> &'static str {
        "insert into {:source:} ({:structure:}) values ({:values:}) returning {:projection:}"
    }

    fn insert<'a>(&self, values: HashMap<&'a str, &'a dyn ToSqlText>) -> SqlQuery<'a, T> {
        // Build column list and parameter list following the entity structure
        let structure = <T as Structured>::get_structure();

        let mut columns: Vec<&str> = Vec::new();
        let mut params: Vec<&'a dyn ToSqlText> = Vec::new();

        for name in structure.get_names() {
            if let Some(value) = values.get(name) {
                columns.push(name);
                params.push(*value);
            }
        }

        let values_sql = repeat_n("$?", columns.len()).collect::<Vec<_>>().join(", ");

        let mut query = SqlQuery::new(self.get_sql_definition());
        query
            .set_variable("source", self.get_sql_source())
            .set_variable("structure", &columns.join(", "))
            .set_variable("values", &values_sql)
            .set_parameters(params);

        query
    }
}
