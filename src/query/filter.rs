//! Filter conditions.
//!
//! A [`QueryFilter`] is a stateless `{field, condition, value}` triple,
//! evaluated independently against each candidate document. An absent field
//! or a type-incompatible value makes the predicate false, never an error:
//! a scan must not die because one document shaped its data differently.

use super::value::{compare, loosely_equal};
use crate::fields::get_path;
use crate::model::DocumentData;
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Comparison operator of a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Eq,
    Ne,
    Ge,
    Gt,
    Le,
    Lt,
    StartsWith,
    EndsWith,
    StringContains,
    ArrayContains,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Eq => "==",
            Condition::Ne => "!=",
            Condition::Ge => ">=",
            Condition::Gt => ">",
            Condition::Le => "<=",
            Condition::Lt => "<",
            Condition::StartsWith => "starts-with",
            Condition::EndsWith => "ends-with",
            Condition::StringContains => "string-contains",
            Condition::ArrayContains => "array-contains",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Condition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "==" => Ok(Condition::Eq),
            "!=" => Ok(Condition::Ne),
            ">=" => Ok(Condition::Ge),
            ">" => Ok(Condition::Gt),
            "<=" => Ok(Condition::Le),
            "<" => Ok(Condition::Lt),
            "starts-with" => Ok(Condition::StartsWith),
            "ends-with" => Ok(Condition::EndsWith),
            "string-contains" => Ok(Condition::StringContains),
            "array-contains" => Ok(Condition::ArrayContains),
            other => Err(format!("Unknown filter condition: {other}")),
        }
    }
}

/// A single field-level predicate.
#[derive(Debug, Clone)]
pub struct QueryFilter {
    pub field: String,
    pub condition: Condition,
    pub value: Value,
}

impl QueryFilter {
    pub fn new(field: impl Into<String>, condition: Condition, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            condition,
            value: value.into(),
        }
    }

    /// Evaluate against a document's field mapping.
    pub fn matches(&self, data: &DocumentData) -> bool {
        let Some(actual) = get_path(data, &self.field) else {
            return false;
        };

        match self.condition {
            Condition::Eq => loosely_equal(actual, &self.value),
            Condition::Ne => !loosely_equal(actual, &self.value),
            Condition::Ge => self.ordered(actual, &[Ordering::Greater, Ordering::Equal]),
            Condition::Gt => self.ordered(actual, &[Ordering::Greater]),
            Condition::Le => self.ordered(actual, &[Ordering::Less, Ordering::Equal]),
            Condition::Lt => self.ordered(actual, &[Ordering::Less]),
            Condition::StartsWith => self.strings(actual, |a, b| a.starts_with(b)),
            Condition::EndsWith => self.strings(actual, |a, b| a.ends_with(b)),
            Condition::StringContains => self.strings(actual, |a, b| a.contains(b)),
            Condition::ArrayContains => match actual {
                Value::Array(items) => items.iter().any(|item| loosely_equal(item, &self.value)),
                _ => false,
            },
        }
    }

    fn ordered(&self, actual: &Value, accepted: &[Ordering]) -> bool {
        match compare(actual, &self.value) {
            Some(ordering) => accepted.contains(&ordering),
            None => false,
        }
    }

    fn strings(&self, actual: &Value, test: impl Fn(&str, &str) -> bool) -> bool {
        match (actual, &self.value) {
            (Value::String(a), Value::String(b)) => test(a, b),
            _ => false,
        }
    }
}
