//! Scheme-bound matchers built from requirement text

use std::fmt;
use std::str::FromStr;

use super::{parse_requirement, Constraint, Operator};
use crate::error::VersionError;
use crate::scheme::{AdaptiveVersion, LegacyVersion, NormalizedVersion, SchemeKind, SemanticVersion};
use crate::version::{SchemeVersion, Version};

/// A requirement whose constraint versions are parsed under scheme `V`.
///
/// Every clause must hold for a candidate to match; a matcher without
/// clauses accepts every version the scheme can parse.
#[derive(Debug, Clone)]
pub struct Matcher<V> {
    source: String,
    name: String,
    key: String,
    extras: Vec<String>,
    marker: Option<String>,
    constraints: Vec<Constraint<V>>,
}

pub type NormalizedMatcher = Matcher<NormalizedVersion>;
pub type LegacyMatcher = Matcher<LegacyVersion>;
pub type SemanticMatcher = Matcher<SemanticVersion>;
pub type AdaptiveMatcher = Matcher<AdaptiveVersion>;

impl<V: SchemeVersion> Matcher<V> {
    pub fn parse(text: &str) -> Result<Self, VersionError> {
        let requirement = parse_requirement(text)?;
        let constraints = requirement
            .clauses
            .iter()
            .map(|clause| {
                V::parse(&clause.version)
                    .map(|version| Constraint::new(clause.operator, version, clause.prefix))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Matcher {
            source: text.trim().to_string(),
            key: requirement.name.to_lowercase(),
            name: requirement.name,
            extras: requirement.extras,
            marker: requirement.marker,
            constraints,
        })
    }

    /// Parse `candidate` under the matcher's scheme and test it.
    pub fn matches(&self, candidate: &str) -> Result<bool, VersionError> {
        let version = V::parse(candidate)?;
        Ok(self.matches_version(&version))
    }

    pub fn matches_version(&self, version: &V) -> bool {
        self.constraints
            .iter()
            .all(|constraint| version.matches_clause(constraint))
    }

    /// The pinned version when the matcher is a single `==` or `===` clause.
    pub fn exact_version(&self) -> Option<&V> {
        match self.constraints.as_slice() {
            [only]
                if !only.is_prefix()
                    && matches!(only.operator(), Operator::Equal | Operator::ArbitraryEqual) =>
            {
                Some(only.version())
            }
            _ => None,
        }
    }

    /// The highest candidate that parses and matches. Unparseable
    /// candidates are skipped.
    pub fn best_match<'a, I>(&self, candidates: I) -> Option<V>
    where
        I: IntoIterator<Item = &'a str>,
    {
        candidates
            .into_iter()
            .filter_map(|candidate| V::parse(candidate).ok())
            .filter(|version| self.matches_version(version))
            .max()
    }

    /// Distribution name as written.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lower-cased name for case-insensitive lookups.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn extras(&self) -> &[String] {
        &self.extras
    }

    pub fn marker(&self) -> Option<&str> {
        self.marker.as_deref()
    }

    pub fn constraints(&self) -> &[Constraint<V>] {
        &self.constraints
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl<V: SchemeVersion> PartialEq for Matcher<V> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.constraints == other.constraints
    }
}

impl<V: SchemeVersion> fmt::Display for Matcher<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl<V: SchemeVersion> FromStr for Matcher<V> {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Matcher::parse(s)
    }
}

/// A matcher for a scheme chosen at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum VersionMatcher {
    Normalized(NormalizedMatcher),
    Legacy(LegacyMatcher),
    Semantic(SemanticMatcher),
    Adaptive(AdaptiveMatcher),
}

macro_rules! dispatch {
    ($matcher:expr, $m:ident => $body:expr) => {
        match $matcher {
            VersionMatcher::Normalized($m) => $body,
            VersionMatcher::Legacy($m) => $body,
            VersionMatcher::Semantic($m) => $body,
            VersionMatcher::Adaptive($m) => $body,
        }
    };
}

impl VersionMatcher {
    pub fn parse(scheme: SchemeKind, text: &str) -> Result<Self, VersionError> {
        Ok(match scheme {
            SchemeKind::Normalized => VersionMatcher::Normalized(Matcher::parse(text)?),
            SchemeKind::Legacy => VersionMatcher::Legacy(Matcher::parse(text)?),
            SchemeKind::Semantic => VersionMatcher::Semantic(Matcher::parse(text)?),
            SchemeKind::Adaptive => VersionMatcher::Adaptive(Matcher::parse(text)?),
        })
    }

    pub fn scheme(&self) -> SchemeKind {
        match self {
            VersionMatcher::Normalized(_) => SchemeKind::Normalized,
            VersionMatcher::Legacy(_) => SchemeKind::Legacy,
            VersionMatcher::Semantic(_) => SchemeKind::Semantic,
            VersionMatcher::Adaptive(_) => SchemeKind::Adaptive,
        }
    }

    pub fn matches(&self, candidate: &str) -> Result<bool, VersionError> {
        dispatch!(self, m => m.matches(candidate))
    }

    /// Test an already parsed version; a version of another scheme is an error.
    pub fn matches_version(&self, version: &Version) -> Result<bool, VersionError> {
        match (self, version) {
            (VersionMatcher::Normalized(m), Version::Normalized(v)) => Ok(m.matches_version(v)),
            (VersionMatcher::Legacy(m), Version::Legacy(v)) => Ok(m.matches_version(v)),
            (VersionMatcher::Semantic(m), Version::Semantic(v)) => Ok(m.matches_version(v)),
            (VersionMatcher::Adaptive(m), Version::Adaptive(v)) => Ok(m.matches_version(v)),
            _ => Err(VersionError::CrossSchemeComparison {
                left: version.scheme(),
                right: self.scheme(),
            }),
        }
    }

    pub fn exact_version(&self) -> Option<Version> {
        dispatch!(self, m => m.exact_version().cloned().map(Version::from))
    }

    pub fn best_match<'a, I>(&self, candidates: I) -> Option<Version>
    where
        I: IntoIterator<Item = &'a str>,
    {
        dispatch!(self, m => m.best_match(candidates).map(Version::from))
    }

    pub fn name(&self) -> &str {
        dispatch!(self, m => m.name())
    }

    pub fn key(&self) -> &str {
        dispatch!(self, m => m.key())
    }

    pub fn extras(&self) -> &[String] {
        dispatch!(self, m => m.extras())
    }

    pub fn marker(&self) -> Option<&str> {
        dispatch!(self, m => m.marker())
    }

    /// Clauses rendered back to text, e.g. `>= 1.0`.
    pub fn constraint_strings(&self) -> Vec<String> {
        dispatch!(self, m => m.constraints().iter().map(|c| c.to_string()).collect())
    }

    pub fn as_str(&self) -> &str {
        dispatch!(self, m => m.as_str())
    }
}

impl fmt::Display for VersionMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<NormalizedMatcher> for VersionMatcher {
    fn from(m: NormalizedMatcher) -> Self {
        VersionMatcher::Normalized(m)
    }
}

impl From<LegacyMatcher> for VersionMatcher {
    fn from(m: LegacyMatcher) -> Self {
        VersionMatcher::Legacy(m)
    }
}

impl From<SemanticMatcher> for VersionMatcher {
    fn from(m: SemanticMatcher) -> Self {
        VersionMatcher::Semantic(m)
    }
}

impl From<AdaptiveMatcher> for VersionMatcher {
    fn from(m: AdaptiveMatcher) -> Self {
        VersionMatcher::Adaptive(m)
    }
}
