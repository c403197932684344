//! Constraint types for version matching

mod matcher;
mod operator;
mod requirement;

use std::fmt;

use crate::version::SchemeVersion;

pub use matcher::{
    AdaptiveMatcher, LegacyMatcher, Matcher, NormalizedMatcher, SemanticMatcher, VersionMatcher,
};
pub use operator::Operator;
pub use requirement::{parse_requirement, Requirement, RequirementClause};

/// One `(operator, version)` clause, already parsed under a scheme.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Constraint<V> {
    operator: Operator,
    version: V,
    prefix: bool,
}

impl<V> Constraint<V> {
    /// `prefix` marks a `V.*` literal; only `==` and `!=` honour it.
    pub fn new(operator: Operator, version: V, prefix: bool) -> Self {
        Constraint {
            operator,
            version,
            prefix,
        }
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn version(&self) -> &V {
        &self.version
    }

    pub fn is_prefix(&self) -> bool {
        self.prefix
    }
}

impl<V: fmt::Display> fmt::Display for Constraint<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.operator, self.version)?;
        if self.prefix {
            f.write_str(".*")?;
        }
        Ok(())
    }
}

/// True when `x` equals `y` or continues it with a `.`-separated segment.
///
/// `match_prefix("1.0.3", "1.0")` holds, `match_prefix("1.03", "1.0")` does not.
pub fn match_prefix(x: &str, y: &str) -> bool {
    match x.strip_prefix(y) {
        Some("") => true,
        Some(rest) => rest.starts_with('.'),
        None => false,
    }
}

/// Plain evaluation by the scheme's total order.
///
/// `~=` degrades to `>=` here; schemes with a real compatible-release rule
/// override [`SchemeVersion::matches_clause`].
pub(crate) fn evaluate<V: SchemeVersion>(version: &V, clause: &Constraint<V>) -> bool {
    let constraint = clause.version();
    match clause.operator() {
        Operator::LessThan => version < constraint,
        Operator::LessThanOrEqual => version <= constraint,
        Operator::Equal if clause.is_prefix() => match_prefix(version.as_str(), constraint.as_str()),
        Operator::Equal => version == constraint,
        Operator::ArbitraryEqual => version.as_str() == constraint.as_str(),
        Operator::NotEqual if clause.is_prefix() => {
            !match_prefix(version.as_str(), constraint.as_str())
        }
        Operator::NotEqual => version != constraint,
        Operator::GreaterThanOrEqual => version >= constraint,
        Operator::GreaterThan => version > constraint,
        Operator::Compatible => version >= constraint,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme::LegacyVersion;

    #[test]
    fn test_match_prefix() {
        assert!(match_prefix("1.0", "1.0"));
        assert!(match_prefix("1.0.3", "1.0"));
        assert!(match_prefix("1.0.post1", "1.0"));
        assert!(!match_prefix("1.03", "1.0"));
        assert!(!match_prefix("1.0", "1.0.3"));
        assert!(!match_prefix("2.0", "1.0"));
    }

    #[test]
    fn test_evaluate_by_order() {
        let v = LegacyVersion::new("1.2");
        let clause = |op, s| Constraint::new(op, LegacyVersion::new(s), false);

        assert!(evaluate(&v, &clause(Operator::LessThan, "1.3")));
        assert!(evaluate(&v, &clause(Operator::Equal, "1.2.0")));
        assert!(!evaluate(&v, &clause(Operator::ArbitraryEqual, "1.2.0")));
        assert!(evaluate(&v, &clause(Operator::ArbitraryEqual, "1.2")));
        assert!(evaluate(&v, &clause(Operator::NotEqual, "1.2.1")));
        assert!(evaluate(&v, &clause(Operator::GreaterThan, "1.2a1")));
        assert!(evaluate(&v, &clause(Operator::Compatible, "1.0")));
    }

    #[test]
    fn test_evaluate_prefix() {
        let equal = Constraint::new(Operator::Equal, LegacyVersion::new("1.2"), true);
        let not_equal = Constraint::new(Operator::NotEqual, LegacyVersion::new("1.2"), true);
        assert!(evaluate(&LegacyVersion::new("1.2.5"), &equal));
        assert!(!evaluate(&LegacyVersion::new("1.20"), &equal));
        assert!(evaluate(&LegacyVersion::new("1.20"), &not_equal));
    }

    #[test]
    fn test_display() {
        let clause = Constraint::new(Operator::NotEqual, LegacyVersion::new("1.2"), true);
        assert_eq!(clause.to_string(), "!= 1.2.*");
    }
}
