//! # myqb
//!
//! A fluent, parameter-safe SELECT query builder with MySQL-style quoting.
//!
//! ## Features
//!
//! - **Fluent chaining**: builder methods return the builder; fallible ones
//!   (anything taking an operator) return `QbResult<Self>` and chain with `?`
//! - **Positional parameters**: compiles to SQL text with `?` placeholders
//!   plus the bound values in exactly placeholder order
//! - **Scalar sub-queries**: a closure configures a fresh child builder that
//!   is frozen into the parent as `(<sub sql>) <op> ?`
//! - **Closed operator set**: unknown operators are rejected when the
//!   predicate is constructed, never at render time
//! - **No execution**: the output contract is `(sql, params)`; binding and
//!   running the statement belongs to the caller's executor
//!
//! ## Example
//!
//! ```
//! use myqb::{QueryBuilder, Value};
//!
//! let (sql, params) = QueryBuilder::new()
//!     .table("users")
//!     .where_sub(
//!         |q| Ok(q.from("posts").where_column("id", "=", "users.id")?.select_raw("count(*)")),
//!         "<",
//!         3,
//!     )?
//!     .build()?;
//!
//! assert_eq!(
//!     sql,
//!     "select * from `users` where (select count(*) from `posts` where `id` = `users`.`id`) < ?"
//! );
//! assert_eq!(params, vec![Value::Int(3)]);
//! # Ok::<(), myqb::QbError>(())
//! ```

pub mod builder;
pub mod error;
pub mod expr;
pub mod ident;
pub mod operator;
pub mod value;

pub use builder::{QueryBuilder, query, table};
pub use error::{QbError, QbResult};
pub use expr::{Predicate, SelectItem};
pub use ident::{DEFAULT_QUOTE, quote_identifier};
pub use operator::{IntoOperator, Operator};
pub use value::Value;

#[cfg(test)]
mod tests;
