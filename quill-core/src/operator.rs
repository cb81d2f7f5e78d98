//! SQL operator types and conversions

use std::fmt::{self, Display};

/// SQLite comparison operator used in WHERE and JOIN ON predicates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operator(&'static str);

impl Operator {
    pub const EQ: Self = Operator("=");
    pub const NEQ: Self = Operator("!=");
    pub const LTGT: Self = Operator("<>");
    pub const GT: Self = Operator(">");
    pub const LT: Self = Operator("<");
    pub const GTE: Self = Operator(">=");
    pub const LTE: Self = Operator("<=");
    pub const LIKE: Self = Operator("LIKE");
    pub const NOT_LIKE: Self = Operator("NOT LIKE");
    pub const GLOB: Self = Operator("GLOB");
    pub const NOT_GLOB: Self = Operator("NOT GLOB");
    pub const IN: Self = Operator("IN");
    pub const NOT_IN: Self = Operator("NOT IN");
    pub const IS: Self = Operator("IS");
    pub const IS_NOT: Self = Operator("IS NOT");
    pub const BETWEEN: Self = Operator("BETWEEN");
    pub const NOT_BETWEEN: Self = Operator("NOT BETWEEN");

    // Unary: rendered without a placeholder
    pub const IS_NULL: Self = Operator("IS NULL");
    pub const IS_NOT_NULL: Self = Operator("IS NOT NULL");
    pub const NOT: Self = Operator("NOT");
    pub const EXISTS: Self = Operator("EXISTS");

    /// Create a custom operator for database-specific operations
    ///
    /// # Examples
    /// ```
    /// use quill_core::Operator;
    ///
    /// // SQLite REGEXP (needs a user function on the connection)
    /// let regexp = Operator::custom("REGEXP");
    /// assert_eq!(regexp.as_str(), "REGEXP");
    /// ```
    pub const fn custom(op: &'static str) -> Self {
        Operator(op)
    }

    /// Get the string representation of the operator
    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Whether the operator takes no right-hand value
    pub fn is_unary(&self) -> bool {
        matches!(self.0, "IS NULL" | "IS NOT NULL" | "NOT" | "EXISTS")
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trait for types that can be converted to SQL operators
pub trait IntoOperator {
    fn into_operator(self) -> Operator;
}

impl IntoOperator for Operator {
    fn into_operator(self) -> Operator {
        self
    }
}

/// Allow string literals for the SQLite operators, case-insensitively
impl IntoOperator for &str {
    fn into_operator(self) -> Operator {
        match self.trim().to_uppercase().as_str() {
            "=" | "==" => Operator::EQ,
            "!=" => Operator::NEQ,
            "<>" => Operator::LTGT,
            ">" => Operator::GT,
            "<" => Operator::LT,
            ">=" => Operator::GTE,
            "<=" => Operator::LTE,
            "LIKE" => Operator::LIKE,
            "NOT LIKE" => Operator::NOT_LIKE,
            "GLOB" => Operator::GLOB,
            "NOT GLOB" => Operator::NOT_GLOB,
            "IN" => Operator::IN,
            "NOT IN" => Operator::NOT_IN,
            "IS" => Operator::IS,
            "IS NOT" => Operator::IS_NOT,
            "BETWEEN" => Operator::BETWEEN,
            "NOT BETWEEN" => Operator::NOT_BETWEEN,
            "IS NULL" => Operator::IS_NULL,
            "IS NOT NULL" => Operator::IS_NOT_NULL,
            "NOT" => Operator::NOT,
            "EXISTS" => Operator::EXISTS,
            _ => panic!(
                "Unknown operator '{}'. Use Operator::{} constants or Operator::custom(\"{}\") for custom operators.",
                self,
                self.to_uppercase().replace(' ', "_").replace('!', "N"),
                self
            ),
        }
    }
}

/// Convenience module for operator constants
pub mod op {
    use super::Operator;

    pub const EQ: Operator = Operator::EQ;
    pub const NEQ: Operator = Operator::NEQ;
    pub const GT: Operator = Operator::GT;
    pub const LT: Operator = Operator::LT;
    pub const GTE: Operator = Operator::GTE;
    pub const LTE: Operator = Operator::LTE;
    pub const LIKE: Operator = Operator::LIKE;
    pub const GLOB: Operator = Operator::GLOB;
    pub const IN: Operator = Operator::IN;
    pub const NOT_IN: Operator = Operator::NOT_IN;
    pub const IS_NULL: Operator = Operator::IS_NULL;
    pub const IS_NOT_NULL: Operator = Operator::IS_NOT_NULL;
}
