//! Predicate composition and evaluation
//!
//! `FilterSet::compile` turns request parameters into a `FilterQuery` (coercion
//! errors surface here). The query is then either evaluated against records in
//! memory or rendered to a SQL fragment for the database to execute.

use std::borrow::Cow;
use std::cmp::Ordering;

use crate::utils::sql::escape_like_pattern;

use super::error::FilterError;
use super::parser::{coerce, lookup};
use super::types::{ComparisonKind, FieldDeclaration, FieldValue, FilterSet, FilterValue, Filterable};

/// Comparison a predicate performs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredicateOp {
    /// Equality. Case-insensitive text values are stored lower-cased.
    Equals {
        value: FilterValue,
        case_sensitive: bool,
    },
    /// Substring match. Case-insensitive needles are stored lower-cased.
    Contains {
        needle: String,
        case_sensitive: bool,
    },
    /// Inclusive lower bound
    AtLeast(FilterValue),
    /// Inclusive upper bound
    AtMost(FilterValue),
}

/// Stored form of a column a SQL predicate compares against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnForm {
    /// The value as written
    Stored,
    /// A companion column holding the value lower-cased with Unicode rules
    Lowercase,
}

/// Boolean test over one record field, built from one supplied parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub parameter: String,
    pub source_field: &'static str,
    pub op: PredicateOp,
}

impl Predicate {
    fn build(field: &FieldDeclaration, parameter: &str, raw: &str) -> Result<Self, FilterError> {
        let op = match field.kind {
            ComparisonKind::Exact | ComparisonKind::Boolean => {
                let value = match coerce(parameter, raw, field.value_type)? {
                    FilterValue::Text(s) if !field.case_sensitive => {
                        FilterValue::Text(s.to_lowercase())
                    }
                    other => other,
                };
                PredicateOp::Equals {
                    value,
                    case_sensitive: field.case_sensitive,
                }
            }
            ComparisonKind::Contains => PredicateOp::Contains {
                needle: if field.case_sensitive {
                    raw.to_string()
                } else {
                    raw.to_lowercase()
                },
                case_sensitive: field.case_sensitive,
            },
            ComparisonKind::Range => {
                let bound = coerce(parameter, raw, field.value_type)?;
                let (from, _) = field.range_parameters();
                if parameter == from {
                    PredicateOp::AtLeast(bound)
                } else {
                    PredicateOp::AtMost(bound)
                }
            }
        };

        Ok(Self {
            parameter: parameter.to_string(),
            source_field: field.source_field,
            op,
        })
    }

    /// Evaluate against a record. Missing field values never match.
    pub fn matches<R: Filterable + ?Sized>(&self, record: &R) -> bool {
        let Some(actual) = record.field_value(self.source_field) else {
            return false;
        };

        match &self.op {
            PredicateOp::Equals {
                value: FilterValue::Text(expected),
                case_sensitive: false,
            } => match actual {
                FieldValue::Text(s) => s.to_lowercase() == *expected,
                _ => false,
            },
            PredicateOp::Equals { value, .. } => value.compare(&actual) == Some(Ordering::Equal),
            PredicateOp::Contains {
                needle,
                case_sensitive,
            } => {
                let haystack: Cow<'_, str> = match actual {
                    FieldValue::Text(s) => Cow::Borrowed(s),
                    other => Cow::Owned(other.to_string()),
                };
                if *case_sensitive {
                    haystack.contains(needle.as_str())
                } else {
                    haystack.to_lowercase().contains(needle.as_str())
                }
            }
            PredicateOp::AtLeast(bound) => matches!(
                bound.compare(&actual),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            PredicateOp::AtMost(bound) => matches!(
                bound.compare(&actual),
                Some(Ordering::Less | Ordering::Equal)
            ),
        }
    }

    /// Column form this predicate compares against.
    ///
    /// Case-insensitive text predicates need the lower-cased companion
    /// column, since SQLite `LOWER()` only folds ASCII.
    pub fn column_form(&self) -> ColumnForm {
        match &self.op {
            PredicateOp::Equals {
                value: FilterValue::Text(_),
                case_sensitive: false,
            }
            | PredicateOp::Contains {
                case_sensitive: false,
                ..
            } => ColumnForm::Lowercase,
            _ => ColumnForm::Stored,
        }
    }

    /// Render as a SQL condition with `?` placeholders, pushing bind values.
    ///
    /// `column` must be in the form named by [`Predicate::column_form`].
    pub fn to_sql(&self, column: &str, params: &mut SqlParams) -> String {
        match &self.op {
            PredicateOp::Equals { value, .. } => {
                params.values.push(value.clone());
                format!("{} = ?", column)
            }
            PredicateOp::Contains {
                needle,
                case_sensitive: true,
            } => {
                params.values.push(FilterValue::Text(needle.clone()));
                format!("instr({}, ?) > 0", column)
            }
            PredicateOp::Contains {
                needle,
                case_sensitive: false,
            } => {
                let pattern = format!("%{}%", escape_like_pattern(needle));
                params.values.push(FilterValue::Text(pattern));
                format!("{} LIKE ? ESCAPE '\\'", column)
            }
            PredicateOp::AtLeast(bound) => {
                params.values.push(bound.clone());
                format!("{} >= ?", column)
            }
            PredicateOp::AtMost(bound) => {
                params.values.push(bound.clone());
                format!("{} <= ?", column)
            }
        }
    }
}

/// Bind values collected while rendering SQL (in placeholder order)
#[derive(Debug, Default)]
pub struct SqlParams {
    pub values: Vec<FilterValue>,
}

/// AND-composition of the predicates compiled for one request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterQuery {
    predicates: Vec<Predicate>,
}

impl FilterQuery {
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// True when the record satisfies every predicate
    pub fn matches<R: Filterable + ?Sized>(&self, record: &R) -> bool {
        self.predicates.iter().all(|p| p.matches(record))
    }

    /// Records satisfying every predicate, in input order
    pub fn apply<'r, R: Filterable>(&self, records: &'r [R]) -> Vec<&'r R> {
        records.iter().filter(|r| self.matches(*r)).collect()
    }

    /// Render the WHERE condition, or `None` when nothing filters.
    ///
    /// `mapper` translates a source field into the SQL column expression
    /// holding it in the requested form.
    pub fn to_sql<F>(&self, params: &mut SqlParams, mapper: F) -> Option<String>
    where
        F: Fn(&str, ColumnForm) -> &str,
    {
        if self.predicates.is_empty() {
            return None;
        }
        let clauses: Vec<String> = self
            .predicates
            .iter()
            .map(|p| p.to_sql(mapper(p.source_field, p.column_form()), params))
            .collect();
        Some(clauses.join(" AND "))
    }
}

impl FilterSet {
    /// Compile request parameters into a query.
    ///
    /// Parameters that match no declaration are ignored. Predicates follow
    /// declaration order.
    pub fn compile(&self, params: &[(String, String)]) -> Result<FilterQuery, FilterError> {
        let mut predicates = Vec::new();

        for field in self.fields() {
            for parameter in field.parameters() {
                if let Some(raw) = lookup(params, &parameter) {
                    predicates.push(Predicate::build(field, &parameter, raw)?);
                }
            }
        }

        Ok(FilterQuery { predicates })
    }
}

/// Narrow `records` to those matching every supplied filter.
///
/// Neither the filter set nor the records are modified.
pub fn resolve<'r, R: Filterable>(
    filter_set: &FilterSet,
    params: &[(String, String)],
    records: &'r [R],
) -> Result<Vec<&'r R>, FilterError> {
    Ok(filter_set.compile(params)?.apply(records))
}
