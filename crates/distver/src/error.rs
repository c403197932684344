//! Error type shared by every scheme, matcher and registry operation

use thiserror::Error;

use crate::scheme::SchemeKind;

/// Errors raised while parsing, comparing or matching versions.
///
/// Nothing is retried or recovered inside the crate: callers decide whether
/// a bad version is a warning or a hard failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// The text does not follow the grammar of the active scheme.
    #[error("Unsupported {scheme} version \"{version}\"")]
    UnsupportedVersion { scheme: SchemeKind, version: String },

    /// The normalized scheme's major-version sanity guard tripped.
    #[error("Huge major version number {major} in \"{version}\", which might cause future problems")]
    HugeMajorVersion { major: u64, version: String },

    /// A requirement or constraint list is malformed.
    #[error("Invalid constraint \"{constraint}\": {reason}")]
    InvalidConstraint { constraint: String, reason: String },

    #[error("Unknown scheme name \"{0}\"")]
    UnknownScheme(String),

    #[error("Scheme name \"{0}\" is already registered")]
    SchemeAlreadyRegistered(String),

    /// Two versions from incompatible schemes were ordered against each other.
    #[error("Cannot compare {left} and {right} versions")]
    CrossSchemeComparison { left: SchemeKind, right: SchemeKind },
}

impl VersionError {
    pub(crate) fn unsupported(scheme: SchemeKind, version: &str) -> Self {
        VersionError::UnsupportedVersion {
            scheme,
            version: version.to_string(),
        }
    }

    pub(crate) fn invalid_constraint(constraint: &str, reason: impl Into<String>) -> Self {
        VersionError::InvalidConstraint {
            constraint: constraint.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = VersionError::unsupported(SchemeKind::Semantic, "1.2");
        assert_eq!(err.to_string(), "Unsupported semantic version \"1.2\"");

        let err = VersionError::invalid_constraint("foo (< 1.*)", "'.*' not allowed with '<'");
        assert_eq!(
            err.to_string(),
            "Invalid constraint \"foo (< 1.*)\": '.*' not allowed with '<'"
        );

        let err = VersionError::CrossSchemeComparison {
            left: SchemeKind::Normalized,
            right: SchemeKind::Legacy,
        };
        assert_eq!(err.to_string(), "Cannot compare normalized and legacy versions");
    }
}
