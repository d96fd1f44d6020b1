//! Structured OData query options
//!
//! These are plain data; rendering them into `$filter`/`$select`/`$expand`
//! syntax is the job of the query builder in `riskview-core`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::impl_keyword_conversions;

/// Query options for a single collection request.
///
/// Each present field is a fully rendered clause fragment. Absent (or empty)
/// fields produce no clause at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOptions {
    pub filter: Option<String>,
    pub select: Option<String>,
    pub expand: Option<String>,
    pub orderby: Option<String>,
    pub top: Option<u32>,
    pub skip: Option<u32>,
    pub count: Option<bool>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn select(mut self, select: impl Into<String>) -> Self {
        self.select = Some(select.into());
        self
    }

    pub fn expand(mut self, expand: impl Into<String>) -> Self {
        self.expand = Some(expand.into());
        self
    }

    pub fn orderby(mut self, orderby: impl Into<String>) -> Self {
        self.orderby = Some(orderby.into());
        self
    }

    pub fn top(mut self, top: u32) -> Self {
        self.top = Some(top);
        self
    }

    pub fn skip(mut self, skip: u32) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn count(mut self, count: bool) -> Self {
        self.count = Some(count);
        self
    }
}

/// Comparison and string-function operators supported in `$filter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperator {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
    Contains,
    StartsWith,
    EndsWith,
}

impl_keyword_conversions!(FilterOperator {
    Eq => "eq",
    Ne => "ne",
    Gt => "gt",
    Ge => "ge",
    Lt => "lt",
    Le => "le",
    Contains => "contains",
    StartsWith => "startswith",
    EndsWith => "endswith",
});

impl FilterOperator {
    /// Function-style operators render as `op(field,value)` instead of infix.
    pub fn is_function(self) -> bool {
        matches!(self, Self::Contains | Self::StartsWith | Self::EndsWith)
    }
}

/// Logical connective between filter conditions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicalOperator {
    #[default]
    And,
    Or,
}

impl_keyword_conversions!(LogicalOperator {
    And => "and",
    Or => "or",
});

/// Literal on the right-hand side of a filter condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Boolean(bool),
    Integer(i64),
    Number(f64),
    String(String),
}

impl fmt::Display for FilterValue {
    /// Renders the OData literal. Strings are wrapped in single quotes
    /// verbatim: embedded quotes are not escaped.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Number(value) => write!(f, "{value}"),
            Self::String(value) => write!(f, "'{value}'"),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&String> for FilterValue {
    fn from(value: &String) -> Self {
        Self::String(value.clone())
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// A single `$filter` condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCondition {
    pub field: String,
    pub operator: FilterOperator,
    pub value: FilterValue,
}

impl FilterCondition {
    pub fn new(
        field: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<FilterValue>,
    ) -> Self {
        Self { field: field.into(), operator, value: value.into() }
    }

    /// Shorthand for the most common condition, `field eq value`.
    pub fn eq(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOperator::Eq, value)
    }
}

/// A navigation property to `$expand`, optionally narrowed with a nested
/// `$select`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandRelation {
    pub name: String,
    #[serde(default)]
    pub select: Vec<String>,
}

impl ExpandRelation {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), select: Vec::new() }
    }

    pub fn with_select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select = fields.into_iter().map(Into::into).collect();
        self
    }
}

impl From<&str> for ExpandRelation {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operators_render_as_odata_keywords() {
        assert_eq!(FilterOperator::StartsWith.to_string(), "startswith");
        assert_eq!(LogicalOperator::Or.to_string(), "or");
        assert_eq!("EQ".parse::<FilterOperator>().unwrap(), FilterOperator::Eq);
    }

    #[test]
    fn only_string_functions_are_function_style() {
        assert!(FilterOperator::Contains.is_function());
        assert!(FilterOperator::EndsWith.is_function());
        assert!(!FilterOperator::Ge.is_function());
    }

    #[test]
    fn literal_rendering_quotes_only_strings() {
        assert_eq!(FilterValue::from("ZIDE").to_string(), "'ZIDE'");
        assert_eq!(FilterValue::from(72).to_string(), "72");
        assert_eq!(FilterValue::from(2.5).to_string(), "2.5");
        assert_eq!(FilterValue::from(true).to_string(), "true");
    }

    #[test]
    fn string_literals_are_not_escaped() {
        assert_eq!(FilterValue::from("O'Brien").to_string(), "'O'Brien'");
    }

    #[test]
    fn option_builders_set_fields() {
        let options = QueryOptions::new().filter("ID eq '1'").top(1).count(true);

        assert_eq!(options.filter.as_deref(), Some("ID eq '1'"));
        assert_eq!(options.top, Some(1));
        assert_eq!(options.count, Some(true));
        assert_eq!(options.select, None);
    }
}
