//! Versions facade providing high-level operations over version strings

use std::cmp::Ordering;

use log::warn;

use crate::constraint::{Matcher, VersionMatcher};
use crate::error::VersionError;
use crate::scheme::{AdaptiveVersion, LegacyVersion, NormalizedVersion, SchemeKind, SemanticVersion};
use crate::version::{SchemeVersion, Version};

/// Parse `text` under `scheme`.
pub fn parse_version(scheme: SchemeKind, text: &str) -> Result<Version, VersionError> {
    Version::parse(scheme, text)
}

/// Canonical, re-parseable text of a version.
pub fn version_to_string(version: &Version) -> String {
    version.to_string()
}

/// Order two versions; versions of different schemes cannot be ordered.
pub fn compare(a: &Version, b: &Version) -> Result<Ordering, VersionError> {
    a.compare(b)
}

pub fn parse_matcher(scheme: SchemeKind, text: &str) -> Result<VersionMatcher, VersionError> {
    VersionMatcher::parse(scheme, text)
}

/// Test a candidate string; an unparseable candidate is an error.
pub fn matcher_match(matcher: &VersionMatcher, candidate: &str) -> Result<bool, VersionError> {
    matcher.matches(candidate)
}

/// Main facade for list-oriented version operations
pub struct Versions;

impl Versions {
    /// Check if a version satisfies a requirement.
    ///
    /// Lossy: an unparseable version or requirement is logged and never
    /// satisfies anything. Use [`parse_matcher`] and [`matcher_match`] to
    /// see the error.
    pub fn satisfies(scheme: SchemeKind, version: &str, requirement: &str) -> bool {
        match VersionMatcher::parse(scheme, requirement).and_then(|matcher| matcher.matches(version)) {
            Ok(matched) => matched,
            Err(e) => {
                warn!("Treating \"{}\" against \"{}\" as unsatisfied: {}", version, requirement, e);
                false
            }
        }
    }

    /// Return all versions that satisfy the requirement, in input order.
    ///
    /// Lossy: an unparseable requirement is logged and yields no versions,
    /// and unparseable candidates are skipped.
    pub fn satisfied_by(scheme: SchemeKind, versions: &[&str], requirement: &str) -> Vec<String> {
        let matcher = match VersionMatcher::parse(scheme, requirement) {
            Ok(m) => m,
            Err(e) => {
                warn!("Ignoring invalid requirement \"{}\": {}", requirement, e);
                return Vec::new();
            }
        };

        versions
            .iter()
            .filter(|v| matcher.matches(v).unwrap_or(false))
            .map(|v| v.to_string())
            .collect()
    }

    /// Sort versions in ascending order, dropping ones that do not parse
    pub fn sort(scheme: SchemeKind, versions: &[&str]) -> Vec<String> {
        Self::usort(scheme, versions, true)
    }

    /// Sort versions in descending order (reverse sort)
    pub fn rsort(scheme: SchemeKind, versions: &[&str]) -> Vec<String> {
        Self::usort(scheme, versions, false)
    }

    fn usort(scheme: SchemeKind, versions: &[&str], ascending: bool) -> Vec<String> {
        match scheme {
            SchemeKind::Normalized => sort_as::<NormalizedVersion>(versions, ascending),
            SchemeKind::Legacy => sort_as::<LegacyVersion>(versions, ascending),
            SchemeKind::Semantic => sort_as::<SemanticVersion>(versions, ascending),
            SchemeKind::Adaptive => sort_as::<AdaptiveVersion>(versions, ascending),
        }
    }
}

fn sort_as<V: SchemeVersion>(versions: &[&str], ascending: bool) -> Vec<String> {
    // Parsed versions paired with their original index
    let mut parsed: Vec<(V, usize)> = versions
        .iter()
        .enumerate()
        .filter_map(|(i, v)| Some((V::parse(v).ok()?, i)))
        .collect();

    parsed.sort_by(|(a, _), (b, _)| if ascending { a.cmp(b) } else { b.cmp(a) });

    parsed
        .into_iter()
        .map(|(_, i)| versions[i].to_string())
        .collect()
}

/// Best match among `candidates` for a requirement.
pub fn best_match<'a, V, I>(requirement: &str, candidates: I) -> Result<Option<V>, VersionError>
where
    V: SchemeVersion,
    I: IntoIterator<Item = &'a str>,
{
    Ok(Matcher::<V>::parse(requirement)?.best_match(candidates))
}
