//! Query model for live and one-shot reads.
//!
//! A query names a collection and optionally narrows it with a single
//! equality filter and orders it by a single field. That is the full extent
//! of what the client needs: the order-history feed filters by owner and
//! sorts by creation time; every other feed reads its collection whole.

use serde_json::Value;

/// A collection read, optionally filtered and sorted.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// Collection path.
    pub collection: String,
    /// Optional equality predicate.
    pub filter: Option<Filter>,
    /// Optional result ordering. When present, the store guarantees the
    /// snapshot order and consumers must not re-sort.
    pub sort: Option<Sort>,
}

impl Query {
    /// Read a whole collection.
    #[must_use]
    pub fn collection(path: impl Into<String>) -> Self {
        Self {
            collection: path.into(),
            filter: None,
            sort: None,
        }
    }

    /// Keep only documents where `field` equals `value`.
    #[must_use]
    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter = Some(Filter {
            field: field.into(),
            equals: value.into(),
        });
        self
    }

    /// Order results by `field`.
    #[must_use]
    pub fn order_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some(Sort {
            field: field.into(),
            direction,
        });
        self
    }

    /// Whether a document's fields satisfy the filter predicate.
    ///
    /// Documents missing the filtered field never match.
    #[must_use]
    pub fn matches(&self, fields: &Value) -> bool {
        match &self.filter {
            None => true,
            Some(filter) => fields.get(&filter.field) == Some(&filter.equals),
        }
    }
}

/// Equality predicate on a single field.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    /// Field name.
    pub field: String,
    /// Value the field must equal.
    pub equals: Value,
}

/// Result ordering on a single field.
#[derive(Debug, Clone, PartialEq)]
pub struct Sort {
    /// Field name.
    pub field: String,
    /// Sort direction.
    pub direction: SortDirection,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Total order over JSON values for sorting snapshots.
///
/// Null sorts first, then booleans, numbers, strings; arrays and objects
/// compare equal among themselves (nothing in the data model sorts on them).
/// A document missing the sort field is treated as null.
#[must_use]
pub fn compare_values(a: &Value, b: &Value) -> std::cmp::Ordering {
    use std::cmp::Ordering;

    fn rank(value: &Value) -> u8 {
        match value {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    }

    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}
