//! Comparison operators.
//!
//! The operator slot of a predicate is a closed enumeration: anything
//! outside the allow-list is rejected when the predicate is constructed,
//! so an unchecked string can never reach the rendered SQL.

use crate::error::{QbError, QbResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A comparison operator from the fixed allow-list.
///
/// The two not-equal spellings are distinct variants; rendering always
/// emits the spelling the caller chose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    /// `=`
    #[serde(rename = "=")]
    Eq,
    /// `<`
    #[serde(rename = "<")]
    Lt,
    /// `>`
    #[serde(rename = ">")]
    Gt,
    /// `<=`
    #[serde(rename = "<=")]
    Le,
    /// `>=`
    #[serde(rename = ">=")]
    Ge,
    /// `<>`
    #[serde(rename = "<>")]
    Ne,
    /// `!=`
    #[serde(rename = "!=")]
    NotEq,
}

impl Operator {
    /// The SQL spelling of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::Le => "<=",
            Operator::Ge => ">=",
            Operator::Ne => "<>",
            Operator::NotEq => "!=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = QbError;

    fn from_str(s: &str) -> QbResult<Self> {
        match s {
            "=" => Ok(Operator::Eq),
            "<" => Ok(Operator::Lt),
            ">" => Ok(Operator::Gt),
            "<=" => Ok(Operator::Le),
            ">=" => Ok(Operator::Ge),
            "<>" => Ok(Operator::Ne),
            "!=" => Ok(Operator::NotEq),
            other => Err(QbError::InvalidOperator(other.to_string())),
        }
    }
}

/// Convert an input into an [`Operator`].
///
/// This is mainly for ergonomics in the fluent API: methods accept either
/// an `Operator` value or its SQL spelling as a string.
pub trait IntoOperator {
    fn into_operator(self) -> QbResult<Operator>;
}

impl IntoOperator for Operator {
    fn into_operator(self) -> QbResult<Operator> {
        Ok(self)
    }
}

impl IntoOperator for &str {
    fn into_operator(self) -> QbResult<Operator> {
        self.parse()
    }
}

impl IntoOperator for String {
    fn into_operator(self) -> QbResult<Operator> {
        self.as_str().parse()
    }
}
