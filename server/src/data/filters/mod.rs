//! Query filter resolver
//!
//! Narrows a record collection from raw query-string parameters:
//! - `types` - field declarations, filter sets and the `Filterable` trait
//! - `parser` - parameter lookup and value coercion
//! - `query` - predicate composition, in-memory evaluation and SQL rendering
//! - `sets` - the filter sets exposed by the API
//! - `error` - client-input errors

pub mod error;
pub mod parser;
pub mod query;
pub mod sets;
pub mod types;

pub use error::FilterError;
pub use query::{ColumnForm, FilterQuery, Predicate, PredicateOp, SqlParams, resolve};
pub use sets::{COURSE_FILTER, SITE_DAILY_METRICS_FILTER, USER_FILTER};
pub use types::{
    ComparisonKind, FieldDeclaration, FieldValue, FilterSet, FilterValue, Filterable, ValueType,
};
