//! Filter schema types
//!
//! A filter set is a plain table of field declarations. Each declaration binds a
//! public query parameter to a record field and a comparison kind.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

/// Suffix of the lower bound parameter of a range field (`date_0`)
pub const RANGE_FROM_SUFFIX: &str = "_0";

/// Suffix of the upper bound parameter of a range field (`date_1`)
pub const RANGE_TO_SUFFIX: &str = "_1";

/// Matching strategy applied when evaluating a parameter against a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonKind {
    Exact,
    Contains,
    Boolean,
    Range,
}

impl ComparisonKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Contains => "contains",
            Self::Boolean => "boolean",
            Self::Range => "range",
        }
    }
}

impl fmt::Display for ComparisonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Type a raw parameter string is coerced to before comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Text,
    Boolean,
    Date,
}

impl ValueType {
    /// Human-readable description used in error messages
    pub fn expectation(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Boolean => "one of true, false, 1, 0",
            Self::Date => "a date (YYYY-MM-DD, MM/DD/YYYY or MM/DD/YY)",
        }
    }
}

/// Declaration of one filterable parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDeclaration {
    /// Public query parameter name
    pub name: &'static str,
    /// Record field the predicate reads (defaults to `name`)
    pub source_field: &'static str,
    pub kind: ComparisonKind,
    pub case_sensitive: bool,
    pub value_type: ValueType,
}

impl FieldDeclaration {
    fn new(name: &'static str, kind: ComparisonKind, value_type: ValueType) -> Self {
        Self {
            name,
            source_field: name,
            kind,
            case_sensitive: true,
            value_type,
        }
    }

    /// Case-sensitive equality. Boolean and date fields coerce the value first.
    pub fn exact(name: &'static str, value_type: ValueType) -> Self {
        Self::new(name, ComparisonKind::Exact, value_type)
    }

    /// Case-insensitive text equality
    pub fn iexact(name: &'static str) -> Self {
        Self::new(name, ComparisonKind::Exact, ValueType::Text).case_insensitive()
    }

    /// Case-sensitive substring match
    pub fn contains(name: &'static str) -> Self {
        Self::new(name, ComparisonKind::Contains, ValueType::Text)
    }

    /// Case-insensitive substring match
    pub fn icontains(name: &'static str) -> Self {
        Self::contains(name).case_insensitive()
    }

    /// Boolean match using the fixed true/false vocabulary
    pub fn boolean(name: &'static str) -> Self {
        Self::new(name, ComparisonKind::Boolean, ValueType::Boolean)
    }

    /// Inclusive range over an ordered field, driven by `<name>_0` and `<name>_1`
    pub fn range(name: &'static str, value_type: ValueType) -> Self {
        Self::new(name, ComparisonKind::Range, value_type)
    }

    /// Bind the parameter to a differently named record field
    pub fn source(mut self, source_field: &'static str) -> Self {
        self.source_field = source_field;
        self
    }

    pub fn case_insensitive(mut self) -> Self {
        self.case_sensitive = false;
        self
    }

    /// Lower and upper bound parameter names of a range declaration
    pub fn range_parameters(&self) -> (String, String) {
        (
            format!("{}{}", self.name, RANGE_FROM_SUFFIX),
            format!("{}{}", self.name, RANGE_TO_SUFFIX),
        )
    }

    /// Query parameter names this declaration responds to
    pub fn parameters(&self) -> Vec<String> {
        match self.kind {
            ComparisonKind::Range => {
                let (from, to) = self.range_parameters();
                vec![from, to]
            }
            _ => vec![self.name.to_string()],
        }
    }
}

/// Immutable, ordered schema of filterable fields for one record type
#[derive(Debug, Clone)]
pub struct FilterSet {
    resource: &'static str,
    fields: Vec<FieldDeclaration>,
}

impl FilterSet {
    /// Build a filter set.
    ///
    /// # Panics
    /// Panics if two declarations answer to the same parameter name, or if a
    /// declaration pairs a comparison kind with a value type it cannot compare.
    /// Filter sets are static schemas, so both are programming errors.
    pub fn new(resource: &'static str, fields: Vec<FieldDeclaration>) -> Self {
        let mut seen = HashSet::new();
        for field in &fields {
            match (field.kind, field.value_type) {
                (ComparisonKind::Boolean, ValueType::Boolean) => {}
                (ComparisonKind::Boolean, _) => {
                    panic!("{resource}.{}: boolean filters need a boolean field", field.name)
                }
                (ComparisonKind::Contains, ValueType::Text) => {}
                (ComparisonKind::Contains, _) => {
                    panic!("{resource}.{}: contains filters need a text field", field.name)
                }
                _ => {}
            }
            for parameter in field.parameters() {
                if !seen.insert(parameter.clone()) {
                    panic!("{resource}: duplicate filter parameter '{parameter}'");
                }
            }
        }
        Self { resource, fields }
    }

    pub fn resource(&self) -> &'static str {
        self.resource
    }

    pub fn fields(&self) -> &[FieldDeclaration] {
        &self.fields
    }

    /// Look up a declaration by its public name
    pub fn field(&self, name: &str) -> Option<&FieldDeclaration> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Value of a record field as seen by predicates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Bool(bool),
    Date(NaiveDate),
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{}", s),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

/// Coerced parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Bool(bool),
    Date(NaiveDate),
}

impl FilterValue {
    /// Order a field value against this parameter value.
    ///
    /// Returns `None` when the types differ, which never matches.
    pub fn compare(&self, actual: &FieldValue<'_>) -> Option<Ordering> {
        match (actual, self) {
            (FieldValue::Text(a), Self::Text(b)) => Some((*a).cmp(b.as_str())),
            (FieldValue::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            (FieldValue::Date(a), Self::Date(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

/// A record type the resolver can read fields from
pub trait Filterable {
    /// Value of `source_field`, or `None` when the record has no value for it
    fn field_value(&self, source_field: &str) -> Option<FieldValue<'_>>;
}
