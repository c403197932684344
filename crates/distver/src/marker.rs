//! Version comparisons inside environment markers
//!
//! Only the comparison step is handled here. Marker expressions are parsed
//! elsewhere and hand over already resolved operand values.

use std::fmt;
use std::str::FromStr;

use crate::constraint::{Constraint, Operator};
use crate::error::VersionError;
use crate::scheme::NormalizedVersion;
use crate::version::SchemeVersion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerOp {
    LessThan,
    LessThanOrEqual,
    Equal,
    NotEqual,
    GreaterThanOrEqual,
    GreaterThan,
    Compatible,
    ArbitraryEqual,
    In,
    NotIn,
}

impl MarkerOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkerOp::LessThan => "<",
            MarkerOp::LessThanOrEqual => "<=",
            MarkerOp::Equal => "==",
            MarkerOp::NotEqual => "!=",
            MarkerOp::GreaterThanOrEqual => ">=",
            MarkerOp::GreaterThan => ">",
            MarkerOp::Compatible => "~=",
            MarkerOp::ArbitraryEqual => "===",
            MarkerOp::In => "in",
            MarkerOp::NotIn => "not in",
        }
    }

    fn version_operator(self) -> Option<Operator> {
        match self {
            MarkerOp::LessThan => Some(Operator::LessThan),
            MarkerOp::LessThanOrEqual => Some(Operator::LessThanOrEqual),
            MarkerOp::Equal => Some(Operator::Equal),
            MarkerOp::NotEqual => Some(Operator::NotEqual),
            MarkerOp::GreaterThanOrEqual => Some(Operator::GreaterThanOrEqual),
            MarkerOp::GreaterThan => Some(Operator::GreaterThan),
            MarkerOp::Compatible => Some(Operator::Compatible),
            MarkerOp::ArbitraryEqual => Some(Operator::ArbitraryEqual),
            MarkerOp::In | MarkerOp::NotIn => None,
        }
    }
}

impl FromStr for MarkerOp {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_whitespace().collect::<Vec<_>>().as_slice() {
            ["<"] => Ok(MarkerOp::LessThan),
            ["<="] => Ok(MarkerOp::LessThanOrEqual),
            ["=="] => Ok(MarkerOp::Equal),
            ["!="] => Ok(MarkerOp::NotEqual),
            [">="] => Ok(MarkerOp::GreaterThanOrEqual),
            [">"] => Ok(MarkerOp::GreaterThan),
            ["~="] => Ok(MarkerOp::Compatible),
            ["==="] => Ok(MarkerOp::ArbitraryEqual),
            ["in"] => Ok(MarkerOp::In),
            ["not", "in"] => Ok(MarkerOp::NotIn),
            _ => Err(VersionError::invalid_constraint(s, "unknown marker operator")),
        }
    }
}

impl fmt::Display for MarkerOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split a marker value such as `"2.7 3.4, 3.5"` into versions, if every
/// item parses.
fn version_list(text: &str) -> Option<Vec<NormalizedVersion>> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|item| !item.is_empty())
        .map(|item| NormalizedVersion::parse(item).ok())
        .collect()
}

/// Evaluate `lhs <op> rhs`.
///
/// When both operands parse as normalized versions the comparison follows
/// version semantics. Otherwise equality and membership operators compare
/// strings and ordering operators are an error.
pub fn evaluate(lhs: &str, op: MarkerOp, rhs: &str) -> Result<bool, VersionError> {
    let left = NormalizedVersion::parse(lhs).ok();

    if let Some(operator) = op.version_operator() {
        if let (Some(left), Ok(right)) = (&left, NormalizedVersion::parse(rhs)) {
            return Ok(left.matches_clause(&Constraint::new(operator, right, false)));
        }
        return match op {
            MarkerOp::Equal | MarkerOp::ArbitraryEqual => Ok(lhs == rhs),
            MarkerOp::NotEqual => Ok(lhs != rhs),
            _ => Err(VersionError::invalid_constraint(
                &format!("{lhs} {op} {rhs}"),
                "ordering requires version operands",
            )),
        };
    }

    let contained = match (&left, version_list(rhs)) {
        (Some(left), Some(list)) if !list.is_empty() => list.contains(left),
        _ => rhs.contains(lhs),
    };
    Ok(match op {
        MarkerOp::NotIn => !contained,
        _ => contained,
    })
}
