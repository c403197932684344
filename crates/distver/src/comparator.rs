//! Version comparison utilities

use std::cmp::Ordering;

use crate::constraint::Operator;
use crate::error::VersionError;
use crate::scheme::SchemeKind;
use crate::version::Version;

/// Compares version strings under one scheme.
#[derive(Debug, Clone, Copy, Default)]
pub struct Comparator {
    scheme: SchemeKind,
}

impl Comparator {
    pub fn new(scheme: SchemeKind) -> Self {
        Comparator { scheme }
    }

    pub fn scheme(&self) -> SchemeKind {
        self.scheme
    }

    /// Check if version1 > version2
    pub fn greater_than(&self, version1: &str, version2: &str) -> Result<bool, VersionError> {
        self.compare(version1, Operator::GreaterThan, version2)
    }

    /// Check if version1 >= version2
    pub fn greater_than_or_equal_to(&self, version1: &str, version2: &str) -> Result<bool, VersionError> {
        self.compare(version1, Operator::GreaterThanOrEqual, version2)
    }

    /// Check if version1 < version2
    pub fn less_than(&self, version1: &str, version2: &str) -> Result<bool, VersionError> {
        self.compare(version1, Operator::LessThan, version2)
    }

    /// Check if version1 <= version2
    pub fn less_than_or_equal_to(&self, version1: &str, version2: &str) -> Result<bool, VersionError> {
        self.compare(version1, Operator::LessThanOrEqual, version2)
    }

    /// Check if version1 == version2
    pub fn equal_to(&self, version1: &str, version2: &str) -> Result<bool, VersionError> {
        self.compare(version1, Operator::Equal, version2)
    }

    /// Check if version1 != version2
    pub fn not_equal_to(&self, version1: &str, version2: &str) -> Result<bool, VersionError> {
        self.compare(version1, Operator::NotEqual, version2)
    }

    /// Compare version1 to version2 using the given operator
    pub fn compare(&self, version1: &str, operator: Operator, version2: &str) -> Result<bool, VersionError> {
        let left = Version::parse(self.scheme, version1)?;
        let right = Version::parse(self.scheme, version2)?;
        left.satisfies(operator, &right)
    }

    /// Three-way comparison of two version strings.
    pub fn ordering(&self, version1: &str, version2: &str) -> Result<Ordering, VersionError> {
        let left = Version::parse(self.scheme, version1)?;
        let right = Version::parse(self.scheme, version2)?;
        left.compare(&right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalized() -> Comparator {
        Comparator::new(SchemeKind::Normalized)
    }

    #[test]
    fn test_greater_than() {
        let c = normalized();
        assert!(c.greater_than("1.25.0", "1.24.0").unwrap());
        assert!(!c.greater_than("1.25.0", "1.25.0").unwrap());
        assert!(!c.greater_than("1.25.0", "1.26.0").unwrap());
        // a post release of the same version is not "greater" under PEP 440 rules
        assert!(!c.greater_than("1.25.post1", "1.25").unwrap());
    }

    #[test]
    fn test_less_than() {
        let c = normalized();
        assert!(!c.less_than("1.25.0", "1.24.0").unwrap());
        assert!(!c.less_than("1.25.0", "1.25.0").unwrap());
        assert!(c.less_than("1.25.0", "1.26.0").unwrap());
        assert!(c.less_than("1.0.0", "1.2.dev0").unwrap());
    }

    #[test]
    fn test_or_equal() {
        let c = normalized();
        assert!(c.greater_than_or_equal_to("1.25.0", "1.25").unwrap());
        assert!(!c.greater_than_or_equal_to("1.25.0", "1.26.0").unwrap());
        assert!(c.less_than_or_equal_to("1.25.0", "1.25.0").unwrap());
        assert!(!c.less_than_or_equal_to("1.25.0", "1.24.0").unwrap());
    }

    #[test]
    fn test_equal_to() {
        let c = normalized();
        assert!(c.equal_to("1.25.0", "1.25").unwrap());
        assert!(!c.equal_to("1.25.0", "1.26.0").unwrap());
        assert!(c.not_equal_to("1.25.0", "1.24.0").unwrap());
        assert!(!c.not_equal_to("1.25.0", "1.25.0").unwrap());
    }

    #[test]
    fn test_compare_other_schemes() {
        let legacy = Comparator::new(SchemeKind::Legacy);
        assert!(legacy.less_than("2.1.0-rc0", "2.1.0").unwrap());
        assert!(legacy.equal_to("0pre1", "0.0c1").unwrap());

        let semantic = Comparator::new(SchemeKind::Semantic);
        assert!(semantic.less_than("1.0.0-rc.1", "1.0.0").unwrap());
        assert!(semantic.equal_to("1.0.0+a", "1.0.0+b").unwrap());
        assert!(semantic.less_than("1.0", "2.0").is_err());

        let adaptive = Comparator::default();
        assert_eq!(adaptive.scheme(), SchemeKind::Adaptive);
        assert!(adaptive.less_than("0pre1", "0pl1").unwrap());
    }

    #[test]
    fn test_ordering() {
        let c = normalized();
        assert_eq!(c.ordering("1.0.dev1", "1.0").unwrap(), Ordering::Less);
        assert_eq!(c.ordering("1.0.post1", "1.0").unwrap(), Ordering::Greater);
        assert_eq!(c.ordering("1.0", "1.0.0").unwrap(), Ordering::Equal);
        assert!(c.ordering("1.0", "bogus").is_err());
    }
}
