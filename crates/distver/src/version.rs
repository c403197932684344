//! Scheme-independent version values and keys

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;

use crate::constraint::{Constraint, Operator};
use crate::error::VersionError;
use crate::scheme::{
    AdaptiveVersion, LegacyKey, LegacyVersion, NormalizedKey, NormalizedVersion, SchemeKind,
    SemanticKey, SemanticVersion,
};

/// Behaviour shared by the version type of every scheme.
pub trait SchemeVersion: Clone + Ord + Hash + fmt::Debug + fmt::Display + Send + Sync + Sized {
    const SCHEME: SchemeKind;

    fn parse(text: &str) -> Result<Self, VersionError>;

    /// The trimmed source text, which is also the canonical form.
    fn as_str(&self) -> &str;

    fn is_prerelease(&self) -> bool;

    fn to_key(&self) -> VersionKey;

    /// Evaluate one constraint clause against this version.
    fn matches_clause(&self, clause: &Constraint<Self>) -> bool {
        crate::constraint::evaluate(self, clause)
    }
}

/// Comparable key of a parsed version, tagged with its scheme.
///
/// Keys of different schemes are unordered: `partial_cmp` returns `None`
/// and [`VersionKey::try_cmp`] reports a [`VersionError::CrossSchemeComparison`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VersionKey {
    Normalized(NormalizedKey),
    Legacy(LegacyKey),
    Semantic(SemanticKey),
}

impl VersionKey {
    pub fn scheme(&self) -> SchemeKind {
        match self {
            VersionKey::Normalized(_) => SchemeKind::Normalized,
            VersionKey::Legacy(_) => SchemeKind::Legacy,
            VersionKey::Semantic(_) => SchemeKind::Semantic,
        }
    }

    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, VersionError> {
        self.partial_cmp(other)
            .ok_or(VersionError::CrossSchemeComparison {
                left: self.scheme(),
                right: other.scheme(),
            })
    }
}

impl PartialOrd for VersionKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (VersionKey::Normalized(a), VersionKey::Normalized(b)) => Some(a.cmp(b)),
            (VersionKey::Legacy(a), VersionKey::Legacy(b)) => Some(a.cmp(b)),
            (VersionKey::Semantic(a), VersionKey::Semantic(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

/// A version parsed under a scheme chosen at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Version {
    Normalized(NormalizedVersion),
    Legacy(LegacyVersion),
    Semantic(SemanticVersion),
    Adaptive(AdaptiveVersion),
}

impl Version {
    pub fn parse(scheme: SchemeKind, text: &str) -> Result<Self, VersionError> {
        Ok(match scheme {
            SchemeKind::Normalized => Version::Normalized(NormalizedVersion::parse(text)?),
            SchemeKind::Legacy => Version::Legacy(LegacyVersion::parse(text)?),
            SchemeKind::Semantic => Version::Semantic(SemanticVersion::parse(text)?),
            SchemeKind::Adaptive => Version::Adaptive(AdaptiveVersion::parse(text)?),
        })
    }

    /// Like [`Version::parse`], but the normalized scheme skips its
    /// huge-major guard.
    pub fn parse_unlimited(scheme: SchemeKind, text: &str) -> Result<Self, VersionError> {
        match scheme {
            SchemeKind::Normalized => NormalizedVersion::parse_unlimited(text).map(Version::Normalized),
            _ => Version::parse(scheme, text),
        }
    }

    pub fn scheme(&self) -> SchemeKind {
        match self {
            Version::Normalized(_) => SchemeKind::Normalized,
            Version::Legacy(_) => SchemeKind::Legacy,
            Version::Semantic(_) => SchemeKind::Semantic,
            Version::Adaptive(_) => SchemeKind::Adaptive,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Version::Normalized(v) => v.as_str(),
            Version::Legacy(v) => v.as_str(),
            Version::Semantic(v) => v.as_str(),
            Version::Adaptive(v) => v.as_str(),
        }
    }

    pub fn is_prerelease(&self) -> bool {
        match self {
            Version::Normalized(v) => v.is_prerelease(),
            Version::Legacy(v) => v.is_prerelease(),
            Version::Semantic(v) => v.is_prerelease(),
            Version::Adaptive(v) => v.is_prerelease(),
        }
    }

    pub fn key(&self) -> VersionKey {
        match self {
            Version::Normalized(v) => v.to_key(),
            Version::Legacy(v) => v.to_key(),
            Version::Semantic(v) => v.to_key(),
            Version::Adaptive(v) => v.to_key(),
        }
    }

    /// Order two versions of the same scheme.
    pub fn compare(&self, other: &Self) -> Result<Ordering, VersionError> {
        self.partial_cmp(other)
            .ok_or(VersionError::CrossSchemeComparison {
                left: self.scheme(),
                right: other.scheme(),
            })
    }

    /// Check `self <op> other` using the scheme's operator rules.
    pub fn satisfies(&self, operator: Operator, other: &Self) -> Result<bool, VersionError> {
        fn check<V: SchemeVersion>(v: &V, operator: Operator, other: &V) -> bool {
            v.matches_clause(&Constraint::new(operator, other.clone(), false))
        }

        match (self, other) {
            (Version::Normalized(a), Version::Normalized(b)) => Ok(check(a, operator, b)),
            (Version::Legacy(a), Version::Legacy(b)) => Ok(check(a, operator, b)),
            (Version::Semantic(a), Version::Semantic(b)) => Ok(check(a, operator, b)),
            (Version::Adaptive(a), Version::Adaptive(b)) => Ok(check(a, operator, b)),
            _ => Err(VersionError::CrossSchemeComparison {
                left: self.scheme(),
                right: other.scheme(),
            }),
        }
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Version::Normalized(a), Version::Normalized(b)) => Some(a.cmp(b)),
            (Version::Legacy(a), Version::Legacy(b)) => Some(a.cmp(b)),
            (Version::Semantic(a), Version::Semantic(b)) => Some(a.cmp(b)),
            (Version::Adaptive(a), Version::Adaptive(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<NormalizedVersion> for Version {
    fn from(v: NormalizedVersion) -> Self {
        Version::Normalized(v)
    }
}

impl From<LegacyVersion> for Version {
    fn from(v: LegacyVersion) -> Self {
        Version::Legacy(v)
    }
}

impl From<SemanticVersion> for Version {
    fn from(v: SemanticVersion) -> Self {
        Version::Semantic(v)
    }
}

impl From<AdaptiveVersion> for Version {
    fn from(v: AdaptiveVersion) -> Self {
        Version::Adaptive(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(scheme: SchemeKind, s: &str) -> Version {
        Version::parse(scheme, s).unwrap()
    }

    #[test]
    fn test_parse_dispatch() {
        assert_eq!(parse(SchemeKind::Normalized, "1.0").scheme(), SchemeKind::Normalized);
        assert_eq!(parse(SchemeKind::Adaptive, "0pre1").scheme(), SchemeKind::Adaptive);
        assert!(Version::parse(SchemeKind::Semantic, "1.0").is_err());
        assert!(Version::parse(SchemeKind::Normalized, "0pre1").is_err());
        assert!(Version::parse(SchemeKind::Legacy, "0pre1").is_ok());
    }

    #[test]
    fn test_parse_unlimited() {
        assert!(matches!(
            Version::parse(SchemeKind::Normalized, "2013.1"),
            Err(VersionError::HugeMajorVersion { .. })
        ));
        assert_eq!(
            Version::parse_unlimited(SchemeKind::Normalized, "2013.1").unwrap().as_str(),
            "2013.1"
        );
        assert!(Version::parse_unlimited(SchemeKind::Semantic, "2013.1").is_err());
    }

    #[test]
    fn test_compare_same_scheme() {
        let a = parse(SchemeKind::Normalized, "1.0.dev1");
        let b = parse(SchemeKind::Normalized, "1.0");
        assert_eq!(a.compare(&b), Ok(Ordering::Less));
        assert_eq!(b.compare(&a), Ok(Ordering::Greater));
        assert_eq!(b.compare(&parse(SchemeKind::Normalized, "1.0.0")), Ok(Ordering::Equal));
    }

    #[test]
    fn test_cross_scheme_comparison() {
        let a = parse(SchemeKind::Normalized, "1.0");
        let b = parse(SchemeKind::Legacy, "1.0");
        assert_eq!(a.partial_cmp(&b), None);
        assert_ne!(a, b);
        assert_eq!(
            a.compare(&b),
            Err(VersionError::CrossSchemeComparison {
                left: SchemeKind::Normalized,
                right: SchemeKind::Legacy,
            })
        );
        assert!(a.key().try_cmp(&b.key()).is_err());
        assert!(a.satisfies(Operator::Equal, &b).is_err());
    }

    #[test]
    fn test_adaptive_keys_follow_resolved_scheme() {
        assert_eq!(parse(SchemeKind::Adaptive, "1.0").key().scheme(), SchemeKind::Normalized);
        assert_eq!(parse(SchemeKind::Adaptive, "1.0.0-rc.1").key().scheme(), SchemeKind::Semantic);
        assert_eq!(parse(SchemeKind::Adaptive, "1.0pl1").key().scheme(), SchemeKind::Legacy);
    }

    #[test]
    fn test_satisfies() {
        let v = parse(SchemeKind::Semantic, "1.4.2");
        assert_eq!(v.satisfies(Operator::Compatible, &parse(SchemeKind::Semantic, "1.0.0")), Ok(true));
        assert_eq!(v.satisfies(Operator::Compatible, &parse(SchemeKind::Semantic, "1.4.0")), Ok(true));
        assert_eq!(v.satisfies(Operator::Compatible, &parse(SchemeKind::Semantic, "1.3.1")), Ok(false));
        assert_eq!(v.satisfies(Operator::LessThan, &parse(SchemeKind::Semantic, "2.0.0")), Ok(true));
    }
}
