//! Property filter tokens and queries.

use std::fmt;

use crate::column::{ColumnDescriptor, ColumnSet};
use crate::error::{Error, Result};

/// Comparison applied by a filter token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOperator {
    /// Exact match (`=`).
    Equals,
    /// Exact mismatch (`!=`).
    NotEquals,
    /// Case-sensitive substring (`:`).
    Contains,
    /// Case-sensitive substring absent (`!:`).
    NotContains,
}

impl FilterOperator {
    /// Every operator, in menu order.
    pub const ALL: [Self; 4] = [
        Self::Equals,
        Self::NotEquals,
        Self::Contains,
        Self::NotContains,
    ];

    /// Operators that only make sense for exact values such as timestamps.
    pub const EXACT: [Self; 2] = [Self::Equals, Self::NotEquals];

    /// Returns the operator symbol shown in the filter bar.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Equals => "=",
            Self::NotEquals => "!=",
            Self::Contains => ":",
            Self::NotContains => "!:",
        }
    }

    /// Parses an operator symbol.
    #[must_use]
    pub fn parse(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    /// Returns true for `!=` and `!:`.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        matches!(self, Self::NotEquals | Self::NotContains)
    }

    /// Applies the operator to an attribute's string form.
    ///
    /// A missing attribute never matches a positive operator and always
    /// matches a negative one.
    #[must_use]
    pub fn apply(self, attribute: Option<&str>, value: &str) -> bool {
        let Some(attribute) = attribute else {
            return self.is_negative();
        };
        match self {
            Self::Equals => attribute == value,
            Self::NotEquals => attribute != value,
            Self::Contains => attribute.contains(value),
            Self::NotContains => !attribute.contains(value),
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// How the tokens of a query combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Operation {
    /// Every token must match.
    And,
    /// Any token may match.
    #[default]
    Or,
}

impl Operation {
    /// Returns the display name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

/// One structured filter condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterToken {
    /// Id of the column the token filters on.
    pub property_key: String,
    /// Comparison to apply.
    pub operator: FilterOperator,
    /// Value to compare against.
    pub value: String,
}

impl FilterToken {
    /// Creates a token.
    #[must_use]
    pub fn new(
        property_key: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<String>,
    ) -> Self {
        Self {
            property_key: property_key.into(),
            operator,
            value: value.into(),
        }
    }

    /// Evaluates the token against one record.
    pub(crate) fn matches<R>(&self, column: Option<&ColumnDescriptor<R>>, record: &R) -> bool {
        let attribute = column
            .and_then(|c| c.value_of(record))
            .map(|v| v.to_string());
        self.operator.apply(attribute.as_deref(), &self.value)
    }
}

/// A set of filter tokens plus optional free text.
///
/// The default query, `{tokens: [], operation: or}`, filters nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterQuery {
    /// Structured tokens.
    pub tokens: Vec<FilterToken>,
    /// Combination rule for `tokens`.
    pub operation: Operation,
    /// Free text, only consulted when `tokens` is empty.
    pub free_text: String,
}

impl FilterQuery {
    /// Returns true when the query filters nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty() && self.free_text.trim().is_empty()
    }

    /// Returns a copy of the query with one more token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token's property or operator is not declared
    /// by `columns`.
    pub fn with_token<R>(mut self, columns: &ColumnSet<R>, token: FilterToken) -> Result<Self> {
        check_token(columns, &token)?;
        self.tokens.push(token);
        Ok(self)
    }

    /// Checks every token against the column declarations.
    ///
    /// # Errors
    ///
    /// Returns the first token that references an unknown property or an
    /// operator its column does not allow.
    pub fn validate<R>(&self, columns: &ColumnSet<R>) -> Result<()> {
        self.tokens.iter().try_for_each(|t| check_token(columns, t))
    }

    /// Evaluates the structured tokens against one record.
    ///
    /// An empty token list matches everything.
    pub(crate) fn matches_tokens<R>(&self, columns: &ColumnSet<R>, record: &R) -> bool {
        if self.tokens.is_empty() {
            return true;
        }
        let check = |t: &FilterToken| t.matches(columns.get(&t.property_key), record);
        match self.operation {
            Operation::And => self.tokens.iter().all(check),
            Operation::Or => self.tokens.iter().any(check),
        }
    }
}

fn check_token<R>(columns: &ColumnSet<R>, token: &FilterToken) -> Result<()> {
    let column = columns
        .get(&token.property_key)
        .ok_or_else(|| Error::UnknownProperty(token.property_key.clone()))?;
    if column.operators.contains(&token.operator) {
        Ok(())
    } else {
        Err(Error::UnsupportedOperator {
            property: token.property_key.clone(),
            operator: token.operator.symbol().to_string(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::Value;

    struct Row {
        name: &'static str,
        created: Option<&'static str>,
    }

    fn columns() -> ColumnSet<Row> {
        ColumnSet::new(vec![
            ColumnDescriptor::new("Name", "Name", |r: &Row| Some(Value::from(r.name))),
            ColumnDescriptor::new("CreatedAt", "Created", |r: &Row| r.created.map(Value::from))
                .operators(&FilterOperator::EXACT),
        ])
        .unwrap()
    }

    #[test]
    fn test_operator_symbols_round_trip() {
        for op in FilterOperator::ALL {
            assert_eq!(FilterOperator::parse(op.symbol()), Some(op));
        }
        assert_eq!(FilterOperator::parse("~"), None);
    }

    #[test]
    fn test_missing_attribute_semantics() {
        assert!(!FilterOperator::Equals.apply(None, "x"));
        assert!(!FilterOperator::Contains.apply(None, "x"));
        assert!(FilterOperator::NotEquals.apply(None, "x"));
        assert!(FilterOperator::NotContains.apply(None, "x"));
    }

    #[test]
    fn test_contains_is_case_sensitive() {
        assert!(FilterOperator::Contains.apply(Some("Hello"), "ell"));
        assert!(!FilterOperator::Contains.apply(Some("Hello"), "HELL"));
    }

    #[test]
    fn test_with_token_rejects_unknown_property() {
        let err = FilterQuery::default()
            .with_token(&columns(), FilterToken::new("Nope", FilterOperator::Equals, "a"))
            .unwrap_err();
        assert_eq!(err, Error::UnknownProperty("Nope".to_string()));
    }

    #[test]
    fn test_with_token_rejects_undeclared_operator() {
        let err = FilterQuery::default()
            .with_token(
                &columns(),
                FilterToken::new("CreatedAt", FilterOperator::Contains, "2024"),
            )
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedOperator { .. }));
    }

    #[test]
    fn test_and_or_combination() {
        let cols = columns();
        let row = Row {
            name: "Inbox",
            created: Some("2024-01-01"),
        };
        let mut query = FilterQuery::default()
            .with_token(&cols, FilterToken::new("Name", FilterOperator::Equals, "Inbox"))
            .unwrap()
            .with_token(
                &cols,
                FilterToken::new("CreatedAt", FilterOperator::Equals, "1999-01-01"),
            )
            .unwrap();

        assert!(query.matches_tokens(&cols, &row));
        query.operation = Operation::And;
        assert!(!query.matches_tokens(&cols, &row));
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let row = Row {
            name: "x",
            created: None,
        };
        assert!(FilterQuery::default().matches_tokens(&columns(), &row));
        assert!(FilterQuery::default().is_empty());
    }
}
