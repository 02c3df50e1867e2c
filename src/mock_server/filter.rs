//! Search filter evaluation for the mock server.
//!
//! Comparisons are case-insensitive for strings, numeric when both sides
//! parse as numbers, and fall back to string comparison otherwise (which
//! orders ISO-8601 dates correctly).

use std::cmp::Ordering;

use serde_json::{Map, Value};

use crate::query::{Conjunction, Filter, Operator};

/// Whether a record satisfies every top-level filter.
pub fn matches_all(record: &Map<String, Value>, filters: &[Filter]) -> bool {
    filters.iter().all(|f| matches(record, f))
}

/// Whether a record satisfies one filter entry.
pub fn matches(record: &Map<String, Value>, filter: &Filter) -> bool {
    match filter {
        Filter::Group { op, items } => match op {
            Conjunction::And => items.iter().all(|f| matches(record, f)),
            Conjunction::Or => items.iter().any(|f| matches(record, f)),
        },
        Filter::Condition {
            op,
            field,
            value,
            udf,
        } => {
            let actual = if *udf {
                udf_value(record, field)
            } else {
                field_value(record, field)
            };
            compare(*op, actual, value.as_ref())
        }
    }
}

fn field_value<'a>(record: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    record
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(field))
        .map(|(_, v)| v)
}

fn udf_value<'a>(record: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    field_value(record, "userDefinedFields")?
        .as_array()?
        .iter()
        .find(|udf| {
            udf.get("name")
                .and_then(Value::as_str)
                .is_some_and(|n| n.eq_ignore_ascii_case(name))
        })?
        .get("value")
}

fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

fn compare(op: Operator, actual: Option<&Value>, expected: Option<&Value>) -> bool {
    match op {
        Operator::Exist => is_present(actual),
        Operator::NotExist => !is_present(actual),
        _ => match (actual.filter(|v| !v.is_null()), expected) {
            (Some(actual), Some(expected)) => compare_values(op, actual, expected),
            // A missing value only satisfies negative comparisons
            _ => matches!(op, Operator::NotEq | Operator::NotIn),
        },
    }
}

fn compare_values(op: Operator, actual: &Value, expected: &Value) -> bool {
    match op {
        Operator::Eq => order(actual, expected) == Some(Ordering::Equal),
        Operator::NotEq => order(actual, expected) != Some(Ordering::Equal),
        Operator::Gt => order(actual, expected) == Some(Ordering::Greater),
        Operator::Gte => matches!(
            order(actual, expected),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        Operator::Lt => order(actual, expected) == Some(Ordering::Less),
        Operator::Lte => matches!(order(actual, expected), Some(Ordering::Less | Ordering::Equal)),
        Operator::BeginsWith => text(actual).starts_with(&text(expected)),
        Operator::EndsWith => text(actual).ends_with(&text(expected)),
        Operator::Contains => text(actual).contains(&text(expected)),
        Operator::In => any_equal(actual, expected),
        Operator::NotIn => !any_equal(actual, expected),
        Operator::Exist | Operator::NotExist => false,
    }
}

fn any_equal(actual: &Value, expected: &Value) -> bool {
    match expected {
        Value::Array(candidates) => candidates
            .iter()
            .any(|c| order(actual, c) == Some(Ordering::Equal)),
        single => order(actual, single) == Some(Ordering::Equal),
    }
}

fn order(actual: &Value, expected: &Value) -> Option<Ordering> {
    if let (Some(a), Some(b)) = (number(actual), number(expected)) {
        return a.partial_cmp(&b);
    }
    Some(text(actual).cmp(&text(expected)))
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.to_lowercase(),
        other => other.to_string().to_lowercase(),
    }
}
