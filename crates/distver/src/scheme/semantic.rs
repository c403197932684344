//! Semantic versions (`MAJOR.MINOR.PATCH[-pre][+build]`)

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

use crate::constraint::{Constraint, Operator};
use crate::error::VersionError;
use crate::scheme::SchemeKind;
use crate::version::{SchemeVersion, VersionKey};

lazy_static! {
    static ref SEMVER_RE: Regex = Regex::new(
        r"^(0|[1-9]\d*)\.(0|[1-9]\d*)\.(0|[1-9]\d*)(?:-([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?(?:\+([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?$"
    ).unwrap();
}

/// Check whether the text is a valid semantic version.
pub fn is_semver(text: &str) -> bool {
    SEMVER_RE.is_match(text)
}

/// A pre-release identifier. Numeric identifiers sort first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Identifier {
    Numeric(u64),
    Alphanumeric(String),
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Numeric(n) => write!(f, "{n}"),
            Identifier::Alphanumeric(s) => f.write_str(s),
        }
    }
}

/// Pre-release part of the key; a release sorts after any pre-release.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SemanticPre {
    Identifiers(Vec<Identifier>),
    Release,
}

/// Comparable key of a semantic version. Build metadata is not part of it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SemanticKey {
    major: u64,
    minor: u64,
    patch: u64,
    pre: SemanticPre,
}

impl SemanticKey {
    pub fn pre(&self) -> &SemanticPre {
        &self.pre
    }
}

/// A version parsed under the semantic scheme.
#[derive(Debug, Clone)]
pub struct SemanticVersion {
    text: String,
    key: SemanticKey,
    build: Option<String>,
}

impl SemanticVersion {
    pub fn parse(text: &str) -> Result<Self, VersionError> {
        let text = text.trim();
        let unsupported = || VersionError::unsupported(SchemeKind::Semantic, text);
        let caps = SEMVER_RE.captures(text).ok_or_else(unsupported)?;

        let number = |i: usize| caps[i].parse::<u64>().map_err(|_| unsupported());
        let (major, minor, patch) = (number(1)?, number(2)?, number(3)?);

        let pre = match caps.get(4) {
            Some(m) => SemanticPre::Identifiers(
                m.as_str()
                    .split('.')
                    .map(|id| {
                        if id.bytes().all(|b| b.is_ascii_digit()) {
                            id.parse().map(Identifier::Numeric).map_err(|_| unsupported())
                        } else {
                            Ok(Identifier::Alphanumeric(id.to_string()))
                        }
                    })
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            None => SemanticPre::Release,
        };

        Ok(SemanticVersion {
            text: text.to_string(),
            key: SemanticKey {
                major,
                minor,
                patch,
                pre,
            },
            build: caps.get(5).map(|m| m.as_str().to_string()),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn key(&self) -> &SemanticKey {
        &self.key
    }

    pub fn major(&self) -> u64 {
        self.key.major
    }

    pub fn minor(&self) -> u64 {
        self.key.minor
    }

    pub fn patch(&self) -> u64 {
        self.key.patch
    }

    pub fn build(&self) -> Option<&str> {
        self.build.as_deref()
    }

    pub fn is_prerelease(&self) -> bool {
        self.key.pre != SemanticPre::Release
    }
}

impl SchemeVersion for SemanticVersion {
    const SCHEME: SchemeKind = SchemeKind::Semantic;

    fn parse(text: &str) -> Result<Self, VersionError> {
        SemanticVersion::parse(text)
    }

    fn as_str(&self) -> &str {
        &self.text
    }

    fn is_prerelease(&self) -> bool {
        SemanticVersion::is_prerelease(self)
    }

    fn to_key(&self) -> VersionKey {
        VersionKey::Semantic(self.key.clone())
    }

    fn matches_clause(&self, clause: &Constraint<Self>) -> bool {
        if clause.operator() != Operator::Compatible {
            return crate::constraint::evaluate(self, clause);
        }

        // ~=X.0.0 pins the major only; anything more specific pins major.minor.
        let constraint = clause.version();
        self >= constraint
            && self.major() == constraint.major()
            && ((constraint.minor() == 0 && constraint.patch() == 0)
                || self.minor() == constraint.minor())
    }
}

impl PartialEq for SemanticVersion {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for SemanticVersion {}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl Hash for SemanticVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for SemanticVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SemanticVersion::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sv(s: &str) -> SemanticVersion {
        SemanticVersion::parse(s).unwrap()
    }

    #[test]
    fn test_basic() {
        for s in ["a", "1", "1.", "1.2", "1.2.", "1.2.a", "1.2.3.a", "01.2.3", "1.02.3", "1.2.3-", "1.2.3+"] {
            assert!(!is_semver(s), "{s}");
            assert!(
                matches!(
                    SemanticVersion::parse(s),
                    Err(VersionError::UnsupportedVersion { .. })
                ),
                "{s}"
            );
        }
        for s in [
            "1.2.3",
            "0.0.0",
            "1.2.3-pre.1.abc.2.def",
            "1.2.3+post.1.abc.2.def",
            "1.2.3-pre.1.abc.2.def+post.1.abc.2.def",
            "1.0.0-x-y.7",
        ] {
            assert!(is_semver(s), "{s}");
            assert_eq!(sv(s).to_string(), s);
        }
    }

    #[test]
    fn test_ordering() {
        let versions = [
            "1.0.0-alpha",
            "1.0.0-alpha.1",
            "1.0.0-alpha.beta",
            "1.0.0-beta",
            "1.0.0-beta.2",
            "1.0.0-beta.11",
            "1.0.0-rc.1",
            "1.0.0",
            "1.3.7",
            "2.0.0",
            "10.0.0",
        ];
        for (i, v1) in versions.iter().enumerate() {
            for v2 in &versions[i + 1..] {
                assert!(sv(v1) < sv(v2), "{v1} < {v2}");
            }
        }
    }

    #[test]
    fn test_build_metadata_ignored_by_ordering() {
        let a = sv("1.0.0+a");
        let b = sv("1.0.0+b");
        assert_eq!(a.cmp(&b), Ordering::Equal);
        assert_eq!(a, b);
        assert_ne!(a.as_str(), b.as_str());
        assert_eq!(a.build(), Some("a"));
        assert_eq!(sv("1.0.0-rc.1+build.1").cmp(&sv("1.0.0-rc.1")), Ordering::Equal);
    }

    #[test]
    fn test_prereleases() {
        for s in ["1.0.0-alpha", "1.0.0-alpha.1", "1.0.0-beta.11", "1.0.0-rc.1+build.1"] {
            assert!(sv(s).is_prerelease(), "{s}");
        }
        for s in ["1.0.0", "1.0.0+0.3.7", "1.3.7+build.11.e0f985a"] {
            assert!(!sv(s).is_prerelease(), "{s}");
        }
    }

    #[test]
    fn test_components() {
        let v = sv("3.14.15-beta.2+exp.sha.5114f85");
        assert_eq!((v.major(), v.minor(), v.patch()), (3, 14, 15));
        assert_eq!(
            v.key().pre(),
            &SemanticPre::Identifiers(vec![
                Identifier::Alphanumeric("beta".to_string()),
                Identifier::Numeric(2)
            ])
        );
        assert_eq!(v.build(), Some("exp.sha.5114f85"));
    }
}
