use std::iter::repeat_n;

use crate::ToSqlText;

enum BooleanCondition {
    None,
    Expression(String),
    And(Box<BooleanCondition>, Box<BooleanCondition>),
    Or(Box<BooleanCondition>, Box<BooleanCondition>),
}

impl BooleanCondition {
    /// Render the condition as SQL.
    pub fn expand(&self) -> String {
        match self {
            Self::None => "true".to_string(),
            Self::Expression(expr) => expr.to_owned(),
            Self::And(lft, rgt) => {
                format!("{} and {}", lft.expand_operand(), rgt.expand_operand())
            }
            Self::Or(lft, rgt) => format!("{} or {}", lft.expand(), rgt.expand()),
        }
    }

    fn expand_operand(&self) -> String {
        if self.needs_precedence() {
            format!("({})", self.expand())
        } else {
            self.expand()
        }
    }

    fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    fn needs_precedence(&self) -> bool {
        matches!(self, Self::Or(_, _))
    }
}

/// Boolean SQL expression and the parameters it refers to, in order. Use the
/// `$?` placeholder for parameters, they are numbered when the query is
/// expanded.
pub struct WhereCondition<'a> {
    condition: BooleanCondition,
    parameters: Vec<&'a dyn ToSqlText>,
}

impl Default for WhereCondition<'_> {
    fn default() -> Self {
        Self {
            condition: BooleanCondition::None,
            parameters: Vec::new(),
        }
    }
}

impl<'a> WhereCondition<'a> {
    /// Condition from a SQL expression and the values of its `$?` placeholders.
    pub fn new(expression: &str, parameters: Vec<&'a dyn ToSqlText>) -> Self {
        Self {
            condition: BooleanCondition::Expression(expression.to_string()),
            parameters,
        }
    }

    /// Split into the SQL expression and its parameters.
    pub fn expand(self) -> (String, Vec<&'a dyn ToSqlText>) {
        let expression = self.condition.expand();

        (expression, self.parameters)
    }

    /// `field in (...)` condition with one placeholder per value.
    pub fn where_in(field: &str, parameters: Vec<&'a dyn ToSqlText>) -> Self {
        let placeholders = repeat_n("$?", parameters.len())
            .collect::<Vec<_>>()
            .join(", ");
        let expression = format!("{field} in ({placeholders})");

        Self {
            condition: BooleanCondition::Expression(expression),
            parameters,
        }
    }

    /// Combine with another condition using `and`.
    pub fn and_where(&mut self, condition: WhereCondition<'a>) -> &mut Self {
        self.combine(condition, BooleanCondition::And)
    }

    /// Combine with another condition using `or`.
    pub fn or_where(&mut self, condition: WhereCondition<'a>) -> &mut Self {
        self.combine(condition, BooleanCondition::Or)
    }

    fn combine(
        &mut self,
        mut condition: WhereCondition<'a>,
        operator: fn(Box<BooleanCondition>, Box<BooleanCondition>) -> BooleanCondition,
    ) -> &mut Self {
        if condition.condition.is_none() {
            return self;
        }
        if self.condition.is_none() {
            self.condition = condition.condition;
            self.parameters = condition.parameters;
        } else {
            let my_condition = std::mem::replace(&mut self.condition, BooleanCondition::None);
            self.condition = operator(Box::new(my_condition), Box::new(condition.condition));
            self.parameters.append(&mut condition.parameters);
        }

        self
    }
}
