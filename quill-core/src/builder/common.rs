//! Common types and traits shared across all query builder transitions

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{Error, IntoOperator, Operator, Result, Value};

/// A single `<column> <operator> [?]` predicate
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub column: String,
    pub operator: Operator,
    pub value: Option<Value>,
}

impl Condition {
    /// Render the predicate text, with a placeholder when a value is bound
    pub fn to_sql(&self) -> String {
        match self.value {
            Some(_) => format!("{} {} ?", self.column, self.operator),
            None => format!("{} {}", self.column, self.operator),
        }
    }
}

/// Trait for conditions that can be used in WHERE clauses
pub trait IntoCondition {
    fn into_condition(self) -> Condition;
}

// Binary operators: where_(("age", op::GT, 18)) or where_(("age", ">", 18))
impl<O, T> IntoCondition for (&str, O, T)
where
    O: IntoOperator,
    T: Into<Value>,
{
    fn into_condition(self) -> Condition {
        let operator = self.1.into_operator();
        // A unary operator never binds, whatever the caller passed
        let value = if operator.is_unary() {
            None
        } else {
            Some(self.2.into())
        };
        Condition {
            column: self.0.to_string(),
            operator,
            value,
        }
    }
}

// Unary operators: where_(("email", "IS NOT NULL"))
impl<O> IntoCondition for (&str, O)
where
    O: IntoOperator,
{
    fn into_condition(self) -> Condition {
        Condition {
            column: self.0.to_string(),
            operator: self.1.into_operator(),
            value: None,
        }
    }
}

impl IntoCondition for Condition {
    fn into_condition(self) -> Condition {
        self
    }
}

/// Trait to convert various types into a column list
pub trait IntoColumns {
    fn into_columns(self) -> Vec<String>;
}

impl IntoColumns for &str {
    fn into_columns(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl IntoColumns for String {
    fn into_columns(self) -> Vec<String> {
        vec![self]
    }
}

impl IntoColumns for Vec<String> {
    fn into_columns(self) -> Vec<String> {
        self
    }
}

impl IntoColumns for Vec<&str> {
    fn into_columns(self) -> Vec<String> {
        self.into_iter().map(|s| s.to_string()).collect()
    }
}

impl<const N: usize> IntoColumns for [&str; N] {
    fn into_columns(self) -> Vec<String> {
        self.iter().map(|s| s.to_string()).collect()
    }
}

impl IntoColumns for (&str, &str) {
    fn into_columns(self) -> Vec<String> {
        vec![self.0.to_string(), self.1.to_string()]
    }
}

impl IntoColumns for (&str, &str, &str) {
    fn into_columns(self) -> Vec<String> {
        vec![self.0.to_string(), self.1.to_string(), self.2.to_string()]
    }
}

impl IntoColumns for (&str, &str, &str, &str) {
    fn into_columns(self) -> Vec<String> {
        vec![
            self.0.to_string(),
            self.1.to_string(),
            self.2.to_string(),
            self.3.to_string(),
        ]
    }
}

/// JOIN kinds, at most one of each is active on a query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Left,
    Right,
    Inner,
    Outer,
}

impl std::fmt::Display for JoinType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JoinType::Left => write!(f, "LEFT"),
            JoinType::Right => write!(f, "RIGHT"),
            JoinType::Inner => write!(f, "INNER"),
            // SQLite rejects a bare OUTER JOIN
            JoinType::Outer => write!(f, "FULL OUTER"),
        }
    }
}

/// A recorded JOIN, its ON predicate lives on the descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    pub kind: JoinType,
    pub table: String,
}

/// Sort direction for ORDER BY
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "ASC"),
            SortDirection::Desc => write!(f, "DESC"),
        }
    }
}

/// Trait for ORDER BY entries, rendered as `"<column> ASC|DESC"`
pub trait IntoOrderBy {
    fn into_order_by(self) -> String;
}

impl IntoOrderBy for &str {
    fn into_order_by(self) -> String {
        self.to_string()
    }
}

impl IntoOrderBy for String {
    fn into_order_by(self) -> String {
        self
    }
}

impl IntoOrderBy for (&str, SortDirection) {
    fn into_order_by(self) -> String {
        format!("{} {}", self.0, self.1)
    }
}

/// Ordered column/value pairs for INSERT and UPDATE ... SET.
///
/// Column order is preserved, it decides both the rendered column list
/// and the binding order of the values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column, replacing the value if the column is already present
    pub fn field(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        let column = column.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == column) {
            Some(existing) => existing.1 = value,
            None => self.fields.push((column, value)),
        }
        self
    }

    /// Build a record from any serde struct or map, in field order
    ///
    /// # Examples
    /// ```
    /// use quill_core::Record;
    /// use serde::Serialize;
    ///
    /// #[derive(Serialize)]
    /// struct NewShader { title: String, body: String }
    ///
    /// let record = Record::from_serialize(&NewShader {
    ///     title: "bar".into(),
    ///     body: "void main() {}".into(),
    /// }).unwrap();
    /// assert_eq!(record.columns(), vec!["title", "body"]);
    /// ```
    pub fn from_serialize<T: Serialize>(data: &T) -> Result<Self> {
        match serde_json::to_value(data)? {
            serde_json::Value::Object(map) => Ok(map.into_record()),
            other => Err(Error::Serialization(serde::ser::Error::custom(format!(
                "expected a struct or map, got {other}"
            )))),
        }
    }

    pub fn columns(&self) -> Vec<&str> {
        self.fields.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Split into the column list and the values in the same order
    pub fn into_parts(self) -> (Vec<String>, Vec<Value>) {
        self.fields.into_iter().unzip()
    }
}

/// Trait for types that can be converted to INSERT/SET data
pub trait IntoRecord {
    fn into_record(self) -> Record;
}

impl IntoRecord for Record {
    fn into_record(self) -> Record {
        self
    }
}

impl<K, V> IntoRecord for Vec<(K, V)>
where
    K: Into<String>,
    V: Into<Value>,
{
    fn into_record(self) -> Record {
        self.into_iter()
            .fold(Record::new(), |record, (k, v)| record.field(k, v))
    }
}

impl<K, V, const N: usize> IntoRecord for [(K, V); N]
where
    K: Into<String>,
    V: Into<Value>,
{
    fn into_record(self) -> Record {
        self.into_iter()
            .fold(Record::new(), |record, (k, v)| record.field(k, v))
    }
}

impl<K, V> IntoRecord for BTreeMap<K, V>
where
    K: Into<String>,
    V: Into<Value>,
{
    fn into_record(self) -> Record {
        self.into_iter()
            .fold(Record::new(), |record, (k, v)| record.field(k, v))
    }
}

impl IntoRecord for serde_json::Map<String, serde_json::Value> {
    fn into_record(self) -> Record {
        self.into_iter()
            .fold(Record::new(), |record, (k, v)| record.field(k, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::op;

    #[test]
    fn test_condition_trait_implementations() {
        let cond = ("age", op::GT, 18).into_condition();
        assert_eq!(cond.column, "age");
        assert_eq!(cond.operator, Operator::GT);
        assert_eq!(cond.value, Some(Value::Integer(18)));
        assert_eq!(cond.to_sql(), "age > ?");

        let cond = ("name", "LIKE", "%john%").into_condition();
        assert_eq!(cond.operator, Operator::LIKE);
        assert_eq!(cond.value, Some(Value::Text("%john%".to_string())));
    }

    #[test]
    fn test_unary_condition_has_no_placeholder() {
        let cond = ("email", "IS NOT NULL").into_condition();
        assert_eq!(cond.value, None);
        assert_eq!(cond.to_sql(), "email IS NOT NULL");

        // Value is dropped when the operator is unary
        let cond = ("email", op::IS_NULL, 5).into_condition();
        assert_eq!(cond.to_sql(), "email IS NULL");
    }

    #[test]
    fn test_order_by_conversions() {
        assert_eq!("id DESC".into_order_by(), "id DESC");
        assert_eq!(("title", SortDirection::Asc).into_order_by(), "title ASC");
    }

    #[test]
    fn test_join_type_display() {
        assert_eq!(JoinType::Left.to_string(), "LEFT");
        assert_eq!(JoinType::Outer.to_string(), "FULL OUTER");
    }

    #[test]
    fn test_record_keeps_insertion_order() {
        let record = Record::new()
            .field("title", "bar")
            .field("body", "x")
            .field("title", "baz");
        let (columns, values) = record.into_parts();
        assert_eq!(columns, vec!["title", "body"]);
        assert_eq!(values, vec![Value::from("baz"), Value::from("x")]);
    }

    #[test]
    fn test_record_from_serialize() {
        #[derive(Serialize)]
        struct NewUser {
            name: String,
            email: Option<String>,
            age: i32,
        }

        let record = Record::from_serialize(&NewUser {
            name: "John".into(),
            email: None,
            age: 30,
        })
        .unwrap();
        assert_eq!(record.columns(), vec!["name", "email", "age"]);
        let (_, values) = record.into_parts();
        assert_eq!(
            values,
            vec![Value::from("John"), Value::Null, Value::Integer(30)]
        );
    }

    #[test]
    fn test_record_from_serialize_rejects_scalars() {
        let result = Record::from_serialize(&42);
        assert!(matches!(result, Err(Error::Serialization(_))));
    }

    #[test]
    fn test_into_record_from_pairs() {
        let record = [("title", "bar")].into_record();
        assert_eq!(record.columns(), vec!["title"]);

        let record = vec![("a", Value::Integer(1)), ("b", Value::Null)].into_record();
        assert_eq!(record.len(), 2);
    }
}
