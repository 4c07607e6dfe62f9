//! The fluent SELECT query builder.

use crate::error::{QbError, QbResult};
use crate::expr::{Predicate, SelectItem};
use crate::ident::{DEFAULT_QUOTE, write_identifier};
use crate::operator::IntoOperator;
use crate::value::Value;

/// Create an empty query builder.
pub fn query() -> QueryBuilder {
    QueryBuilder::new()
}

/// Create a query builder for the given table.
///
/// # Example
/// ```
/// let sql = myqb::table("users").to_sql()?;
/// assert_eq!(sql, "select * from `users`");
/// # Ok::<(), myqb::QbError>(())
/// ```
pub fn table(name: &str) -> QueryBuilder {
    QueryBuilder::new().table(name)
}

/// Fluent builder for a parameterized SELECT statement.
///
/// State accumulates through chained calls; each method returns the
/// builder so calls compose left to right. Fallible methods (those that
/// accept an operator) return `QbResult<Self>` and chain with `?`.
///
/// Rendering borrows the builder immutably, so it can be repeated and
/// always yields the same `(sql, params)` pair.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    table: Option<String>,
    columns: Vec<SelectItem>,
    wheres: Vec<Predicate>,
    distinct: bool,
    quote: char,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryBuilder {
    /// Create an empty builder with the default backtick quoting.
    pub fn new() -> Self {
        Self {
            table: None,
            columns: Vec::new(),
            wheres: Vec::new(),
            distinct: false,
            quote: DEFAULT_QUOTE,
        }
    }

    /// Fresh builder for a sub-query, inheriting the quote character.
    fn for_subquery(&self) -> QueryBuilder {
        let mut child = QueryBuilder::new();
        child.quote = self.quote;
        child
    }

    // ==================== FROM ====================

    /// Set the FROM target to a non-empty identifier.
    ///
    /// Calling this (or [`from`](Self::from)) again replaces the previous
    /// value: last write wins.
    pub fn table(mut self, name: &str) -> Self {
        self.table = Some(name.to_string());
        self
    }

    /// Alias for [`table`](Self::table); reads naturally inside sub-query
    /// closures.
    pub fn from(self, name: &str) -> Self {
        self.table(name)
    }

    // ==================== Select list ====================

    /// Append one column reference per name.
    ///
    /// An empty select list renders as `*`.
    pub fn select(mut self, columns: &[&str]) -> Self {
        for column in columns {
            self.columns.push(SelectItem::Column((*column).to_string()));
        }
        self
    }

    /// Append a raw select expression, rendered verbatim with no quoting
    /// and no parameterization. The caller vouches for its contents.
    pub fn select_raw(mut self, expression: &str) -> Self {
        self.columns.push(SelectItem::Raw(expression.to_string()));
        self
    }

    /// Render `select distinct`.
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Override the identifier quote character (backtick by default).
    ///
    /// Sub-query builders created after this call inherit the override.
    pub fn quote_char(mut self, quote: char) -> Self {
        self.quote = quote;
        self
    }

    // ==================== WHERE ====================

    /// Compare two column references: `` `first` <op> `second` ``.
    ///
    /// Fails with [`QbError::InvalidOperator`] if `op` is outside the
    /// allow-list.
    pub fn where_column(
        mut self,
        first: &str,
        op: impl IntoOperator,
        second: &str,
    ) -> QbResult<Self> {
        let op = op.into_operator()?;
        self.wheres.push(Predicate::ColumnCompare {
            first: first.to_string(),
            op,
            second: second.to_string(),
        });
        Ok(self)
    }

    /// Compare a column against a bound value: `` `column` <op> ? ``.
    pub fn where_value(
        mut self,
        column: &str,
        op: impl IntoOperator,
        value: impl Into<Value>,
    ) -> QbResult<Self> {
        let op = op.into_operator()?;
        self.wheres.push(Predicate::ValueCompare {
            column: column.to_string(),
            op,
            value: value.into(),
        });
        Ok(self)
    }

    /// Compare a scalar sub-query against a bound value:
    /// `(<sub sql>) <op> ?`.
    ///
    /// `configure` receives a fresh child builder and returns it fully
    /// configured; the child is frozen into the predicate when this method
    /// returns, and its parameters splice in ahead of `value`. The
    /// operator is validated before the closure runs.
    ///
    /// # Example
    /// ```
    /// use myqb::Value;
    ///
    /// let qb = myqb::table("users").where_sub(
    ///     |q| Ok(q.from("posts").where_column("id", "=", "users.id")?.select_raw("count(*)")),
    ///     "<",
    ///     3,
    /// )?;
    /// assert_eq!(
    ///     qb.to_sql()?,
    ///     "select * from `users` where (select count(*) from `posts` where `id` = `users`.`id`) < ?"
    /// );
    /// assert_eq!(qb.to_params()?, vec![Value::Int(3)]);
    /// # Ok::<(), myqb::QbError>(())
    /// ```
    pub fn where_sub<F>(
        self,
        configure: F,
        op: impl IntoOperator,
        value: impl Into<Value>,
    ) -> QbResult<Self>
    where
        F: FnOnce(QueryBuilder) -> QbResult<QueryBuilder>,
    {
        let op = op.into_operator()?;
        let child = configure(self.for_subquery())?;
        self.add_where_subquery(child, op, value)
    }

    /// Sub-query comparison from a pre-built child builder.
    pub fn add_where_subquery(
        mut self,
        query: QueryBuilder,
        op: impl IntoOperator,
        value: impl Into<Value>,
    ) -> QbResult<Self> {
        let op = op.into_operator()?;
        self.wheres.push(Predicate::SubqueryCompare {
            query: Box::new(query),
            op,
            value: value.into(),
        });
        Ok(self)
    }

    /// `` `column` is null ``
    pub fn where_null(mut self, column: &str) -> Self {
        self.wheres.push(Predicate::Null {
            column: column.to_string(),
            negated: false,
        });
        self
    }

    /// `` `column` is not null ``
    pub fn where_not_null(mut self, column: &str) -> Self {
        self.wheres.push(Predicate::Null {
            column: column.to_string(),
            negated: true,
        });
        self
    }

    /// `` `column` in (?, ...) ``. An empty list renders the constant
    /// `0 = 1`.
    pub fn where_in<T: Into<Value>>(mut self, column: &str, values: Vec<T>) -> Self {
        self.wheres.push(Predicate::In {
            column: column.to_string(),
            values: values.into_iter().map(Into::into).collect(),
            negated: false,
        });
        self
    }

    /// `` `column` not in (?, ...) ``. An empty list renders the constant
    /// `1 = 1`.
    pub fn where_not_in<T: Into<Value>>(mut self, column: &str, values: Vec<T>) -> Self {
        self.wheres.push(Predicate::In {
            column: column.to_string(),
            values: values.into_iter().map(Into::into).collect(),
            negated: true,
        });
        self
    }

    /// `` `column` between ? and ? ``
    pub fn where_between(
        mut self,
        column: &str,
        from: impl Into<Value>,
        to: impl Into<Value>,
    ) -> Self {
        self.wheres.push(Predicate::Between {
            column: column.to_string(),
            from: from.into(),
            to: to.into(),
            negated: false,
        });
        self
    }

    /// `` `column` not between ? and ? ``
    pub fn where_not_between(
        mut self,
        column: &str,
        from: impl Into<Value>,
        to: impl Into<Value>,
    ) -> Self {
        self.wheres.push(Predicate::Between {
            column: column.to_string(),
            from: from.into(),
            to: to.into(),
            negated: true,
        });
        self
    }

    /// Append a raw WHERE fragment with its own bindings. `?` placeholders
    /// in the fragment must line up with `bindings` in order; nothing is
    /// quoted or validated.
    pub fn where_raw<T: Into<Value>>(mut self, sql: &str, bindings: Vec<T>) -> Self {
        self.wheres.push(Predicate::Raw {
            sql: sql.to_string(),
            bindings: bindings.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// `exists (<sub sql>)` over a closure-configured child builder.
    pub fn where_exists<F>(self, configure: F) -> QbResult<Self>
    where
        F: FnOnce(QueryBuilder) -> QbResult<QueryBuilder>,
    {
        let child = configure(self.for_subquery())?;
        Ok(self.add_where_exists(child, false))
    }

    /// `not exists (<sub sql>)` over a closure-configured child builder.
    pub fn where_not_exists<F>(self, configure: F) -> QbResult<Self>
    where
        F: FnOnce(QueryBuilder) -> QbResult<QueryBuilder>,
    {
        let child = configure(self.for_subquery())?;
        Ok(self.add_where_exists(child, true))
    }

    /// Exists predicate from a pre-built child builder.
    pub fn add_where_exists(mut self, query: QueryBuilder, not: bool) -> Self {
        self.wheres.push(Predicate::Exists {
            query: Box::new(query),
            negated: not,
        });
        self
    }

    /// Append an already-constructed predicate.
    pub fn add_predicate(mut self, predicate: Predicate) -> Self {
        self.wheres.push(predicate);
        self
    }

    // ==================== Rendering ====================

    /// Compile to SQL text plus bound values in placeholder order.
    ///
    /// This is the whole output contract: an executor binds `params`
    /// positionally against the `?` placeholders in the text. Fails with
    /// [`QbError::MissingTable`] if no table was ever set, here or in any
    /// nested sub-query.
    pub fn build(&self) -> QbResult<(String, Vec<Value>)> {
        let mut sql = String::new();
        let mut params = Vec::new();
        self.compile_into(&mut sql, &mut params)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(sql = %sql, params = params.len(), "compiled select statement");

        Ok((sql, params))
    }

    /// The SQL text alone.
    pub fn to_sql(&self) -> QbResult<String> {
        self.build().map(|(sql, _)| sql)
    }

    /// The bound values alone, in placeholder order.
    pub fn to_params(&self) -> QbResult<Vec<Value>> {
        self.build().map(|(_, params)| params)
    }

    /// Render into a shared buffer; sub-query predicates re-enter here
    /// with the parent's accumulator so their parameters splice in at the
    /// position their placeholders occupy.
    pub(crate) fn compile_into(&self, out: &mut String, params: &mut Vec<Value>) -> QbResult<()> {
        let table = self.table.as_deref().ok_or(QbError::MissingTable)?;

        out.push_str("select ");
        if self.distinct {
            out.push_str("distinct ");
        }
        if self.columns.is_empty() {
            out.push('*');
        } else {
            for (i, item) in self.columns.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                item.render(self.quote, out);
            }
        }

        out.push_str(" from ");
        write_identifier(table, self.quote, out);

        if !self.wheres.is_empty() {
            out.push_str(" where ");
            for (i, predicate) in self.wheres.iter().enumerate() {
                if i > 0 {
                    out.push_str(" and ");
                }
                predicate.render(self.quote, out, params)?;
            }
        }

        Ok(())
    }
}
