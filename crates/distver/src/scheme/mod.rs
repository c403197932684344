//! Version schemes and the process-wide scheme registry

mod adaptive;
mod legacy;
mod normalized;
mod semantic;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{PoisonError, RwLock};

use lazy_static::lazy_static;
use log::debug;

use crate::constraint::{Matcher, VersionMatcher};
use crate::error::VersionError;
use crate::suggest::{suggest_normalized_version, suggest_semantic_version};
use crate::version::{SchemeVersion, Version, VersionKey};

pub use adaptive::AdaptiveVersion;
pub use legacy::{LegacyKey, LegacyVersion};
pub use normalized::{
    CandidateLabel, LocalSegment, NormalizedKey, NormalizedVersion, PreRelease, HUGE_MAJOR_VERSION,
};
pub use semantic::{is_semver, Identifier, SemanticKey, SemanticPre, SemanticVersion};

/// Identity of a built-in scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemeKind {
    Normalized,
    Legacy,
    Semantic,
    Adaptive,
}

impl SchemeKind {
    /// The scheme used when the caller does not pick one.
    pub const DEFAULT: SchemeKind = SchemeKind::Adaptive;

    pub const ALL: [SchemeKind; 4] = [
        SchemeKind::Normalized,
        SchemeKind::Legacy,
        SchemeKind::Semantic,
        SchemeKind::Adaptive,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SchemeKind::Normalized => "normalized",
            SchemeKind::Legacy => "legacy",
            SchemeKind::Semantic => "semantic",
            SchemeKind::Adaptive => "adaptive",
        }
    }

    pub fn scheme(self) -> &'static VersionScheme {
        match self {
            SchemeKind::Normalized => &NORMALIZED,
            SchemeKind::Legacy => &LEGACY,
            SchemeKind::Semantic => &SEMANTIC,
            SchemeKind::Adaptive => &ADAPTIVE,
        }
    }
}

impl Default for SchemeKind {
    fn default() -> Self {
        SchemeKind::DEFAULT
    }
}

impl fmt::Display for SchemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SchemeKind {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normalized" => Ok(SchemeKind::Normalized),
            "legacy" => Ok(SchemeKind::Legacy),
            "semantic" => Ok(SchemeKind::Semantic),
            "adaptive" => Ok(SchemeKind::Adaptive),
            "default" => Ok(SchemeKind::DEFAULT),
            _ => Err(VersionError::UnknownScheme(s.to_string())),
        }
    }
}

/// The bundle a scheme contributes: key function, version and matcher
/// constructors, and a suggester for loosely formatted input.
pub struct VersionScheme {
    kind: SchemeKind,
    key: fn(&str) -> Result<VersionKey, VersionError>,
    version: fn(&str) -> Result<Version, VersionError>,
    matcher: fn(&str) -> Result<VersionMatcher, VersionError>,
    suggester: fn(&str) -> Option<String>,
}

impl VersionScheme {
    pub const fn new(
        kind: SchemeKind,
        key: fn(&str) -> Result<VersionKey, VersionError>,
        version: fn(&str) -> Result<Version, VersionError>,
        matcher: fn(&str) -> Result<VersionMatcher, VersionError>,
        suggester: fn(&str) -> Option<String>,
    ) -> Self {
        VersionScheme {
            kind,
            key,
            version,
            matcher,
            suggester,
        }
    }

    pub fn kind(&self) -> SchemeKind {
        self.kind
    }

    pub fn key(&self, text: &str) -> Result<VersionKey, VersionError> {
        (self.key)(text)
    }

    pub fn parse_version(&self, text: &str) -> Result<Version, VersionError> {
        (self.version)(text)
    }

    pub fn parse_matcher(&self, text: &str) -> Result<VersionMatcher, VersionError> {
        (self.matcher)(text)
    }

    pub fn suggest(&self, text: &str) -> Option<String> {
        (self.suggester)(text)
    }

    pub fn is_valid_version(&self, text: &str) -> bool {
        self.parse_version(text).is_ok()
    }

    pub fn is_valid_matcher(&self, text: &str) -> bool {
        self.parse_matcher(text).is_ok()
    }

    /// Check a bare constraint list such as `>= 1.0, < 2.0`.
    /// One trailing comma is tolerated.
    pub fn is_valid_constraint_list(&self, text: &str) -> bool {
        let text = text.trim();
        let text = text.strip_suffix(',').unwrap_or(text);
        self.is_valid_matcher(&format!("dummy_name ({text})"))
    }
}

impl fmt::Debug for VersionScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VersionScheme").field("kind", &self.kind).finish_non_exhaustive()
    }
}

fn key_of<V: SchemeVersion>(text: &str) -> Result<VersionKey, VersionError> {
    V::parse(text).map(|v| v.to_key())
}

fn version_of<V>(text: &str) -> Result<Version, VersionError>
where
    V: SchemeVersion,
    Version: From<V>,
{
    V::parse(text).map(Version::from)
}

fn matcher_of<V>(text: &str) -> Result<VersionMatcher, VersionError>
where
    V: SchemeVersion,
    VersionMatcher: From<Matcher<V>>,
{
    Matcher::<V>::parse(text).map(VersionMatcher::from)
}

fn suggest_legacy_version(text: &str) -> Option<String> {
    Some(text.to_string())
}

fn suggest_adaptive_version(text: &str) -> Option<String> {
    suggest_normalized_version(text).or_else(|| suggest_semantic_version(text))
}

pub static NORMALIZED: VersionScheme = VersionScheme::new(
    SchemeKind::Normalized,
    key_of::<NormalizedVersion>,
    version_of::<NormalizedVersion>,
    matcher_of::<NormalizedVersion>,
    suggest_normalized_version,
);

pub static LEGACY: VersionScheme = VersionScheme::new(
    SchemeKind::Legacy,
    key_of::<LegacyVersion>,
    version_of::<LegacyVersion>,
    matcher_of::<LegacyVersion>,
    suggest_legacy_version,
);

pub static SEMANTIC: VersionScheme = VersionScheme::new(
    SchemeKind::Semantic,
    key_of::<SemanticVersion>,
    version_of::<SemanticVersion>,
    matcher_of::<SemanticVersion>,
    suggest_semantic_version,
);

pub static ADAPTIVE: VersionScheme = VersionScheme::new(
    SchemeKind::Adaptive,
    key_of::<AdaptiveVersion>,
    version_of::<AdaptiveVersion>,
    matcher_of::<AdaptiveVersion>,
    suggest_adaptive_version,
);

lazy_static! {
    static ref REGISTRY: RwLock<HashMap<String, &'static VersionScheme>> = {
        let mut schemes = HashMap::new();
        for kind in SchemeKind::ALL {
            schemes.insert(kind.name().to_string(), kind.scheme());
        }
        schemes.insert("default".to_string(), SchemeKind::DEFAULT.scheme());
        RwLock::new(schemes)
    };
}

/// Look up a scheme by its registered name.
pub fn get_scheme(name: &str) -> Result<&'static VersionScheme, VersionError> {
    REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(name)
        .copied()
        .ok_or_else(|| VersionError::UnknownScheme(name.to_string()))
}

/// Register a scheme under an additional name. Existing names are never
/// replaced.
pub fn register_scheme(name: &str, scheme: &'static VersionScheme) -> Result<(), VersionError> {
    let mut registry = REGISTRY.write().unwrap_or_else(PoisonError::into_inner);
    if registry.contains_key(name) {
        return Err(VersionError::SchemeAlreadyRegistered(name.to_string()));
    }
    debug!("Registering {} scheme as \"{}\"", scheme.kind(), name);
    registry.insert(name.to_string(), scheme);
    Ok(())
}

/// Every registered name, sorted.
pub fn scheme_names() -> Vec<String> {
    let mut names: Vec<String> = REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .keys()
        .cloned()
        .collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_adaptive() {
        let default = get_scheme("default").unwrap();
        let adaptive = get_scheme("adaptive").unwrap();
        assert!(std::ptr::eq(default, adaptive));
        assert_eq!(default.kind(), SchemeKind::Adaptive);
        assert_eq!(SchemeKind::default(), SchemeKind::Adaptive);
    }

    #[test]
    fn test_unknown_scheme() {
        assert_eq!(
            get_scheme("bogus").unwrap_err(),
            VersionError::UnknownScheme("bogus".to_string())
        );
        assert!("bogus".parse::<SchemeKind>().is_err());
    }

    #[test]
    fn test_kind_names_round_trip() {
        for kind in SchemeKind::ALL {
            assert_eq!(kind.name().parse::<SchemeKind>().unwrap(), kind);
            assert!(std::ptr::eq(get_scheme(kind.name()).unwrap(), kind.scheme()));
        }
        assert_eq!("default".parse::<SchemeKind>().unwrap(), SchemeKind::DEFAULT);
    }

    #[test]
    fn test_register_is_additive() {
        register_scheme("pep440", &NORMALIZED).unwrap();
        assert!(std::ptr::eq(get_scheme("pep440").unwrap(), &NORMALIZED));
        assert!(scheme_names().contains(&"pep440".to_string()));

        assert_eq!(
            register_scheme("legacy", &SEMANTIC),
            Err(VersionError::SchemeAlreadyRegistered("legacy".to_string()))
        );
        assert_eq!(get_scheme("legacy").unwrap().kind(), SchemeKind::Legacy);
    }

    #[test]
    fn test_scheme_helpers() {
        let normalized = SchemeKind::Normalized.scheme();
        assert!(normalized.is_valid_version("1.0.post1"));
        assert!(!normalized.is_valid_version("0pre1"));
        assert!(normalized.is_valid_matcher("foo (>= 1.0, < 2.0)"));
        assert!(!normalized.is_valid_matcher("foo (>= bar)"));
        assert!(normalized.is_valid_constraint_list(">= 1.0, < 2.0,"));
        assert!(!normalized.is_valid_constraint_list(">= 1.0,,"));
        assert!(normalized.is_valid_constraint_list(""));

        let legacy = SchemeKind::Legacy.scheme();
        assert!(legacy.is_valid_version("anything goes"));
        assert_eq!(legacy.suggest("1.0-foo").as_deref(), Some("1.0-foo"));

        assert_eq!(SchemeKind::Semantic.scheme().suggest("1.2").as_deref(), Some("1.2.0"));
        assert_eq!(SchemeKind::Adaptive.scheme().suggest("1.0-alpha1").as_deref(), Some("1.0a1"));
    }

    #[test]
    fn test_scheme_keys() {
        let normalized = SchemeKind::Normalized.scheme();
        assert_eq!(normalized.key("1.0").unwrap(), normalized.key("1.0.0").unwrap());
        assert!(normalized.key("1.0").unwrap() < normalized.key("1.1").unwrap());
        assert!(SchemeKind::Semantic.scheme().key("1.0").is_err());
    }
}
