//! Expression model: select items and WHERE predicates.
//!
//! Nodes hold data and know how to render themselves into a shared SQL
//! buffer plus an ordered parameter list. Composite nodes render children
//! first, so parameters always land in the order their `?` placeholders
//! appear in the final text; positional binding depends on that.

use crate::builder::QueryBuilder;
use crate::error::QbResult;
use crate::ident::write_identifier;
use crate::operator::Operator;
use crate::value::Value;

/// One item of the select list.
#[derive(Debug, Clone)]
pub enum SelectItem {
    /// A column reference, rendered as a quoted identifier.
    Column(String),
    /// A raw SQL fragment, rendered verbatim. The caller vouches for it.
    Raw(String),
}

impl SelectItem {
    pub(crate) fn render(&self, quote: char, out: &mut String) {
        match self {
            SelectItem::Column(name) => write_identifier(name, quote, out),
            SelectItem::Raw(sql) => out.push_str(sql),
        }
    }
}

/// A single boolean condition of the conjunctive WHERE list.
#[derive(Debug, Clone)]
pub enum Predicate {
    /// `first <op> second`, both sides column references.
    ColumnCompare {
        first: String,
        op: Operator,
        second: String,
    },

    /// `(<subquery>) <op> ?`, a scalar sub-query compared to a bound
    /// value. The sub-query's own parameters splice in ahead of `value`.
    SubqueryCompare {
        query: Box<QueryBuilder>,
        op: Operator,
        value: Value,
    },

    /// `column <op> ?`
    ValueCompare {
        column: String,
        op: Operator,
        value: Value,
    },

    /// `column is null` / `column is not null`
    Null { column: String, negated: bool },

    /// `column in (?, ...)`; an empty list degrades to a constant truth
    /// value instead of invalid SQL.
    In {
        column: String,
        values: Vec<Value>,
        negated: bool,
    },

    /// `column between ? and ?`
    Between {
        column: String,
        from: Value,
        to: Value,
        negated: bool,
    },

    /// `exists (<subquery>)`
    Exists {
        query: Box<QueryBuilder>,
        negated: bool,
    },

    /// A raw fragment with its own ordered bindings. `?` placeholders in
    /// the fragment must line up with `bindings`.
    Raw { sql: String, bindings: Vec<Value> },
}

impl Predicate {
    /// Render this predicate, appending SQL text to `out` and bound values
    /// to `params` in placeholder order.
    pub(crate) fn render(
        &self,
        quote: char,
        out: &mut String,
        params: &mut Vec<Value>,
    ) -> QbResult<()> {
        match self {
            Predicate::ColumnCompare { first, op, second } => {
                write_identifier(first, quote, out);
                out.push(' ');
                out.push_str(op.as_str());
                out.push(' ');
                write_identifier(second, quote, out);
            }
            Predicate::SubqueryCompare { query, op, value } => {
                out.push('(');
                query.compile_into(out, params)?;
                out.push_str(") ");
                out.push_str(op.as_str());
                out.push_str(" ?");
                params.push(value.clone());
            }
            Predicate::ValueCompare { column, op, value } => {
                write_identifier(column, quote, out);
                out.push(' ');
                out.push_str(op.as_str());
                out.push_str(" ?");
                params.push(value.clone());
            }
            Predicate::Null { column, negated } => {
                write_identifier(column, quote, out);
                out.push_str(if *negated { " is not null" } else { " is null" });
            }
            Predicate::In {
                column,
                values,
                negated,
            } => {
                if values.is_empty() {
                    out.push_str(if *negated { "1 = 1" } else { "0 = 1" });
                    return Ok(());
                }
                write_identifier(column, quote, out);
                out.push_str(if *negated { " not in (" } else { " in (" });
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push('?');
                    params.push(value.clone());
                }
                out.push(')');
            }
            Predicate::Between {
                column,
                from,
                to,
                negated,
            } => {
                write_identifier(column, quote, out);
                out.push_str(if *negated {
                    " not between ? and ?"
                } else {
                    " between ? and ?"
                });
                params.push(from.clone());
                params.push(to.clone());
            }
            Predicate::Exists { query, negated } => {
                if *negated {
                    out.push_str("not ");
                }
                out.push_str("exists (");
                query.compile_into(out, params)?;
                out.push(')');
            }
            Predicate::Raw { sql, bindings } => {
                out.push_str(sql);
                params.extend(bindings.iter().cloned());
            }
        }
        Ok(())
    }
}
