//! Adaptive versions: normalized if possible, then semantic, then legacy

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;
use std::str::FromStr;

use log::debug;

use super::{LegacyVersion, NormalizedVersion, SchemeKind, SemanticVersion};
use crate::constraint::{self, Constraint, Operator};
use crate::error::VersionError;
use crate::version::{SchemeVersion, VersionKey};

/// A version remembering which underlying scheme accepted it.
///
/// Two values resolved by the same scheme compare by that scheme's key.
/// Values resolved by different schemes compare by epoch and release
/// numbers, then by scheme: semantic, normalized, legacy. Every scheme's own
/// order sorts by release numbers first, so the combined order stays total.
#[derive(Debug, Clone)]
pub enum AdaptiveVersion {
    Normalized(NormalizedVersion),
    Semantic(SemanticVersion),
    Legacy(LegacyVersion),
}

impl AdaptiveVersion {
    /// Never fails: the legacy scheme accepts any text.
    pub fn parse(text: &str) -> Result<Self, VersionError> {
        let err = match NormalizedVersion::parse(text) {
            Ok(v) => return Ok(AdaptiveVersion::Normalized(v)),
            Err(err) => err,
        };
        debug!("{err}; trying the semantic scheme");

        let err = match SemanticVersion::parse(text) {
            Ok(v) => return Ok(AdaptiveVersion::Semantic(v)),
            Err(err) => err,
        };
        debug!("{err}; falling back to the legacy scheme");

        Ok(AdaptiveVersion::Legacy(LegacyVersion::new(text)))
    }

    /// The scheme that actually parsed the text.
    pub fn resolved_scheme(&self) -> SchemeKind {
        match self {
            AdaptiveVersion::Normalized(_) => SchemeKind::Normalized,
            AdaptiveVersion::Semantic(_) => SchemeKind::Semantic,
            AdaptiveVersion::Legacy(_) => SchemeKind::Legacy,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            AdaptiveVersion::Normalized(v) => v.as_str(),
            AdaptiveVersion::Semantic(v) => v.as_str(),
            AdaptiveVersion::Legacy(v) => v.as_str(),
        }
    }

    pub fn is_prerelease(&self) -> bool {
        match self {
            AdaptiveVersion::Normalized(v) => v.is_prerelease(),
            AdaptiveVersion::Semantic(v) => v.is_prerelease(),
            AdaptiveVersion::Legacy(v) => v.is_prerelease(),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            AdaptiveVersion::Semantic(_) => 0,
            AdaptiveVersion::Normalized(_) => 1,
            AdaptiveVersion::Legacy(_) => 2,
        }
    }

    /// Epoch and release numbers, zero-padded to eight digits with trailing
    /// zeros dropped.
    fn release_prefix(&self) -> (u64, Vec<String>) {
        let (epoch, mut numbers): (u64, Vec<String>) = match self {
            AdaptiveVersion::Normalized(v) => (
                v.key().epoch(),
                v.key().release().iter().map(|n| format!("{n:0>8}")).collect(),
            ),
            AdaptiveVersion::Semantic(v) => (
                0,
                [v.major(), v.minor(), v.patch()]
                    .iter()
                    .map(|n| format!("{n:0>8}"))
                    .collect(),
            ),
            AdaptiveVersion::Legacy(v) => {
                (0, v.key().numeric_prefix().map(str::to_string).collect())
            }
        };
        while numbers.last().is_some_and(|n| n.bytes().all(|b| b == b'0')) {
            numbers.pop();
        }
        (epoch, numbers)
    }
}

fn compare_release(a: &(u64, Vec<String>), b: &(u64, Vec<String>)) -> Ordering {
    a.0.cmp(&b.0).then_with(|| {
        a.1.iter()
            .zip(&b.1)
            .map(|(x, y)| x.len().cmp(&y.len()).then_with(|| x.cmp(y)))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| a.1.len().cmp(&b.1.len()))
    })
}

/// Re-express an adaptive clause in terms of one underlying scheme.
fn narrow<V: SchemeVersion>(clause: &Constraint<AdaptiveVersion>, version: &V) -> Constraint<V> {
    Constraint::new(clause.operator(), version.clone(), clause.is_prefix())
}

impl SchemeVersion for AdaptiveVersion {
    const SCHEME: SchemeKind = SchemeKind::Adaptive;

    fn parse(text: &str) -> Result<Self, VersionError> {
        AdaptiveVersion::parse(text)
    }

    fn as_str(&self) -> &str {
        AdaptiveVersion::as_str(self)
    }

    fn is_prerelease(&self) -> bool {
        AdaptiveVersion::is_prerelease(self)
    }

    fn to_key(&self) -> VersionKey {
        match self {
            AdaptiveVersion::Normalized(v) => v.to_key(),
            AdaptiveVersion::Semantic(v) => v.to_key(),
            AdaptiveVersion::Legacy(v) => v.to_key(),
        }
    }

    fn matches_clause(&self, clause: &Constraint<Self>) -> bool {
        match (self, clause.version()) {
            (AdaptiveVersion::Normalized(v), AdaptiveVersion::Normalized(c)) => {
                v.matches_clause(&narrow(clause, c))
            }
            (AdaptiveVersion::Semantic(v), AdaptiveVersion::Semantic(c)) => {
                v.matches_clause(&narrow(clause, c))
            }
            (AdaptiveVersion::Legacy(v), AdaptiveVersion::Legacy(c)) => {
                v.matches_clause(&narrow(clause, c))
            }
            // mixed schemes share only the legacy reading for ~=
            _ if clause.operator() == Operator::Compatible => {
                let candidate = LegacyVersion::new(self.as_str());
                let target = LegacyVersion::new(clause.version().as_str());
                candidate.matches_clause(&Constraint::new(Operator::Compatible, target, false))
            }
            _ => constraint::evaluate(self, clause),
        }
    }
}

impl PartialEq for AdaptiveVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for AdaptiveVersion {}

impl PartialOrd for AdaptiveVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AdaptiveVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (AdaptiveVersion::Normalized(a), AdaptiveVersion::Normalized(b)) => a.cmp(b),
            (AdaptiveVersion::Semantic(a), AdaptiveVersion::Semantic(b)) => a.cmp(b),
            (AdaptiveVersion::Legacy(a), AdaptiveVersion::Legacy(b)) => a.cmp(b),
            _ => compare_release(&self.release_prefix(), &other.release_prefix())
                .then_with(|| self.rank().cmp(&other.rank())),
        }
    }
}

impl Hash for AdaptiveVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(self).hash(state);
        match self {
            AdaptiveVersion::Normalized(v) => v.hash(state),
            AdaptiveVersion::Semantic(v) => v.hash(state),
            AdaptiveVersion::Legacy(v) => v.hash(state),
        }
    }
}

impl fmt::Display for AdaptiveVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdaptiveVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AdaptiveVersion::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn av(s: &str) -> AdaptiveVersion {
        AdaptiveVersion::parse(s).unwrap()
    }

    #[test]
    fn test_dispatch_order() {
        assert_eq!(av("1.0.post1").resolved_scheme(), SchemeKind::Normalized);
        assert_eq!(av("1.0.0-alpha.1").resolved_scheme(), SchemeKind::Semantic);
        assert_eq!(av("0pre1").resolved_scheme(), SchemeKind::Legacy);
        // huge majors fall through the normalized guard
        assert_eq!(av("2013.1.0").resolved_scheme(), SchemeKind::Semantic);
        assert_eq!(av("2013b").resolved_scheme(), SchemeKind::Legacy);
    }

    #[test]
    fn test_same_scheme_comparison() {
        assert!(av("1.0.dev1") < av("1.0"));
        assert!(av("1.0") < av("1.0.post1"));
        assert_eq!(av("1.2.0"), av("1.2"));
        assert!(av("1.0.0-alpha") < av("1.0.0-beta"));
        assert!(av("0pre1") < av("0pl1"));
    }

    #[test]
    fn test_cross_scheme_comparison_is_defined() {
        let normalized = av("1.0");
        let semantic = av("1.0.1-alpha");
        let legacy = av("1.0pl1");
        assert!(normalized < semantic);
        assert!(normalized < legacy);
        assert_ne!(normalized, legacy);
        assert_eq!(normalized.cmp(&semantic), semantic.cmp(&normalized).reverse());
    }

    #[test]
    fn test_cross_scheme_order_is_transitive() {
        // epoch outranks every release number
        let (epoch, rc, plain) = (av("1!0.5"), av("2.0.0-rc.1"), av("3.0"));
        assert!(rc < plain);
        assert!(plain < epoch);
        assert!(rc < epoch);

        // semantic identifiers against a legacy word on the same release
        let (numeric, alpha, legacy) = (av("1.0.0-alpha.1"), av("1.0.0-alpha.beta"), av("1alpha.z"));
        assert_eq!(legacy.resolved_scheme(), SchemeKind::Legacy);
        assert!(numeric < alpha);
        assert!(alpha < legacy);
        assert!(numeric < legacy);
    }

    #[test]
    fn test_cross_scheme_ties_break_by_scheme() {
        assert!(av("1.0.0-rc.1") < av("1.0"));
        assert!(av("1.0") < av("1.0pl1"));
        assert!(av("1.0pl1") < av("1.0.1"));
        assert_ne!(av("1.0.0-rc.1"), av("1.0"));
    }

    #[test]
    fn test_cross_scheme_compatible_uses_numeric_prefix() {
        let clause = |v: &str| Constraint::new(Operator::Compatible, av(v), false);
        assert!(!av("7.0.0-beta").matches_clause(&clause("1.4")));
        assert!(!av("2.0.0-beta").matches_clause(&clause("1.4")));
        assert!(av("1.9.0-rc.1").matches_clause(&clause("1.4")));
        assert!(!av("1.3.0-rc.1").matches_clause(&clause("1.4")));
    }

    #[test]
    fn test_text_round_trip() {
        for s in ["1.0", "1.0.0-rc.1+build", "0pre1"] {
            let v = av(s);
            assert_eq!(av(&v.to_string()), v);
            assert_eq!(av(&v.to_string()).resolved_scheme(), v.resolved_scheme());
        }
    }
}
