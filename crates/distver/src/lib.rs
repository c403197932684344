//! Version parsing, comparison and constraint matching for Python-style
//! distributions
//!
//! Four schemes are provided: normalized (PEP 440 style), legacy
//! (setuptools style, accepts anything), semantic (SemVer) and adaptive,
//! which tries the others in turn. Schemes are available as typed versions
//! and matchers, as runtime-dispatched [`Version`]/[`VersionMatcher`]
//! values, and through the named scheme registry.

pub mod constraint;
pub mod marker;
pub mod scheme;
mod comparator;
mod error;
mod suggest;
mod version;
mod versions;

pub use comparator::Comparator;
pub use constraint::{
    parse_requirement, AdaptiveMatcher, Constraint, LegacyMatcher, Matcher, NormalizedMatcher,
    Operator, Requirement, SemanticMatcher, VersionMatcher,
};
pub use error::VersionError;
pub use scheme::{
    get_scheme, register_scheme, AdaptiveVersion, LegacyVersion, NormalizedVersion, SchemeKind,
    SemanticVersion, VersionScheme,
};
pub use suggest::{suggest_normalized_version, suggest_semantic_version};
pub use version::{SchemeVersion, Version, VersionKey};
pub use versions::{
    best_match, compare, matcher_match, parse_matcher, parse_version, version_to_string, Versions,
};
