//! Parameter coercion
//!
//! Converts raw query-string values into typed filter values.

use chrono::NaiveDate;

use super::error::FilterError;
use super::types::{FilterValue, ValueType};

/// Accepted spellings of `true` (ASCII case-insensitive)
const TRUE_VALUES: &[&str] = &["true", "1"];

/// Accepted spellings of `false` (ASCII case-insensitive)
const FALSE_VALUES: &[&str] = &["false", "0"];

/// ISO date input format
const DATE_FORMAT_ISO: &str = "%Y-%m-%d";

/// US date input formats with four and two digit years
const DATE_FORMAT_US: &str = "%m/%d/%Y";
const DATE_FORMAT_US_SHORT: &str = "%m/%d/%y";

/// Find the value supplied for `name`.
///
/// Repeated parameters resolve to the last occurrence. Blank values count as
/// absent so that `?name=` does not filter.
pub fn lookup<'a>(params: &'a [(String, String)], name: &str) -> Option<&'a str> {
    params
        .iter()
        .rev()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

pub fn parse_bool(parameter: &str, value: &str) -> Result<bool, FilterError> {
    if TRUE_VALUES.iter().any(|v| v.eq_ignore_ascii_case(value)) {
        Ok(true)
    } else if FALSE_VALUES.iter().any(|v| v.eq_ignore_ascii_case(value)) {
        Ok(false)
    } else {
        Err(FilterError::invalid_parameter(parameter, value, ValueType::Boolean))
    }
}

pub fn parse_date(parameter: &str, value: &str) -> Result<NaiveDate, FilterError> {
    // chrono's %Y accepts short years, so pick the format from the year width
    let format = match value.rsplit_once('/') {
        None => DATE_FORMAT_ISO,
        Some((_, year)) if year.len() == 2 => DATE_FORMAT_US_SHORT,
        Some(_) => DATE_FORMAT_US,
    };
    NaiveDate::parse_from_str(value, format)
        .map_err(|_| FilterError::invalid_parameter(parameter, value, ValueType::Date))
}

/// Coerce a raw value to the declared value type
pub fn coerce(
    parameter: &str,
    value: &str,
    value_type: ValueType,
) -> Result<FilterValue, FilterError> {
    match value_type {
        ValueType::Text => Ok(FilterValue::Text(value.to_string())),
        ValueType::Boolean => parse_bool(parameter, value).map(FilterValue::Bool),
        ValueType::Date => parse_date(parameter, value).map(FilterValue::Date),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn lookup_last_value_wins() {
        let p = params(&[("org", "first"), ("other", "x"), ("org", "second")]);
        assert_eq!(lookup(&p, "org"), Some("second"));
    }

    #[test]
    fn lookup_blank_is_absent() {
        let p = params(&[("org", "  ")]);
        assert_eq!(lookup(&p, "org"), None);
        assert_eq!(lookup(&p, "missing"), None);
    }

    #[test]
    fn lookup_trims_whitespace() {
        let p = params(&[("username", " alice ")]);
        assert_eq!(lookup(&p, "username"), Some("alice"));
    }

    #[test]
    fn parse_bool_vocabulary() {
        assert_eq!(parse_bool("b", "true"), Ok(true));
        assert_eq!(parse_bool("b", "True"), Ok(true));
        assert_eq!(parse_bool("b", "1"), Ok(true));
        assert_eq!(parse_bool("b", "FALSE"), Ok(false));
        assert_eq!(parse_bool("b", "0"), Ok(false));
    }

    #[test]
    fn parse_bool_rejects_other_values() {
        for value in ["maybe", "yes", "2", "t"] {
            let err = parse_bool("is_active", value).unwrap_err();
            assert_eq!(err.parameter(), "is_active");
        }
    }

    #[test]
    fn parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2020, 1, 15).unwrap();
        assert_eq!(parse_date("d", "2020-01-15"), Ok(expected));
        assert_eq!(parse_date("d", "01/15/2020"), Ok(expected));
        assert_eq!(parse_date("d", "01/15/20"), Ok(expected));
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert!(parse_date("date_0", "2020-13-01").is_err());
        assert!(parse_date("date_0", "last week").is_err());
    }

    #[test]
    fn coerce_by_type() {
        assert_eq!(
            coerce("p", "Abc", ValueType::Text),
            Ok(FilterValue::Text("Abc".into()))
        );
        assert_eq!(
            coerce("p", "0", ValueType::Boolean),
            Ok(FilterValue::Bool(false))
        );
        assert!(coerce("p", "nope", ValueType::Date).is_err());
    }
}
