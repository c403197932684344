//! Operator types for version constraints

use std::fmt;
use std::str::FromStr;

use crate::error::VersionError;

/// Comparison operators for version constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Less than (<)
    LessThan,
    /// Less than or equal (<=)
    LessThanOrEqual,
    /// Equal (==)
    Equal,
    /// Arbitrary string equality (===)
    ArbitraryEqual,
    /// Not equal (!=)
    NotEqual,
    /// Greater than or equal (>=)
    GreaterThanOrEqual,
    /// Greater than (>)
    GreaterThan,
    /// Compatible release (~=)
    Compatible,
}

impl Operator {
    /// Get the string representation of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::LessThan => "<",
            Operator::LessThanOrEqual => "<=",
            Operator::Equal => "==",
            Operator::ArbitraryEqual => "===",
            Operator::NotEqual => "!=",
            Operator::GreaterThanOrEqual => ">=",
            Operator::GreaterThan => ">",
            Operator::Compatible => "~=",
        }
    }

    /// Get all supported operators
    pub fn supported_operators() -> &'static [&'static str] {
        &["<", "<=", "==", "===", "!=", ">=", ">", "~="]
    }

    /// Whether a `.*` prefix literal may follow this operator.
    pub fn allows_prefix(&self) -> bool {
        matches!(self, Operator::Equal | Operator::NotEqual)
    }
}

impl FromStr for Operator {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "<" => Ok(Operator::LessThan),
            "<=" => Ok(Operator::LessThanOrEqual),
            "==" => Ok(Operator::Equal),
            "===" => Ok(Operator::ArbitraryEqual),
            "!=" => Ok(Operator::NotEqual),
            ">=" => Ok(Operator::GreaterThanOrEqual),
            ">" => Ok(Operator::GreaterThan),
            "~=" => Ok(Operator::Compatible),
            _ => Err(VersionError::invalid_constraint(s, "unknown operator")),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
