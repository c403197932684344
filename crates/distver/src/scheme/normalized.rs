//! Normalized (PEP 440 style) versions
//!
//! Accepts `v? (N!)? N(.N)* [{a|b|c|rc}N] [.postN] [.devN] [+local]`.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

use crate::constraint::{match_prefix, Constraint, Operator};
use crate::error::VersionError;
use crate::scheme::SchemeKind;
use crate::version::{SchemeVersion, VersionKey};

/// Leading release numbers above this are rejected unless parsing unlimited.
pub const HUGE_MAJOR_VERSION: u64 = 1980;

lazy_static! {
    static ref NORMALIZED_VERSION_RE: Regex = Regex::new(
        r"^v?(?:(\d+)!)?(\d+(?:\.\d+)*)(?:(a|b|c|rc)(\d+))?(?:\.post(\d+))?(?:\.dev(\d+))?(?:\+([a-zA-Z\d]+(?:\.[a-zA-Z\d]+)*))?$"
    ).unwrap();
}

/// Release candidate spelling; `c` and `rc` share a rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CandidateLabel {
    C,
    Rc,
}

/// Pre-release tier of a normalized version.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PreRelease {
    /// A dev release with neither pre nor post segment, e.g. `1.0.dev1`.
    DevOnly,
    Alpha(u64),
    Beta(u64),
    Candidate(u64, CandidateLabel),
    Final,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DevRelease {
    Dev(u64),
    Absent,
}

/// One dot-separated part of a local version label.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LocalSegment {
    Alphanumeric(String),
    Numeric(u64),
}

/// Comparable key of a normalized version.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NormalizedKey {
    epoch: u64,
    release: Vec<u64>,
    pre: PreRelease,
    post: Option<u64>,
    dev: DevRelease,
    local: Vec<LocalSegment>,
}

impl NormalizedKey {
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Release numbers with trailing zeros stripped.
    pub fn release(&self) -> &[u64] {
        &self.release
    }

    pub fn pre(&self) -> &PreRelease {
        &self.pre
    }

    pub fn post(&self) -> Option<u64> {
        self.post
    }

    pub fn dev(&self) -> Option<u64> {
        match self.dev {
            DevRelease::Dev(n) => Some(n),
            DevRelease::Absent => None,
        }
    }

    pub fn local(&self) -> &[LocalSegment] {
        &self.local
    }
}

/// A version parsed under the normalized scheme.
#[derive(Debug, Clone)]
pub struct NormalizedVersion {
    text: String,
    key: NormalizedKey,
    release_clause: Vec<u64>,
}

impl NormalizedVersion {
    /// Parse with the huge-major guard enabled.
    pub fn parse(text: &str) -> Result<Self, VersionError> {
        parse_normalized(text, true)
    }

    /// Parse without the huge-major guard; every other rule still applies.
    pub fn parse_unlimited(text: &str) -> Result<Self, VersionError> {
        parse_normalized(text, false)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn key(&self) -> &NormalizedKey {
        &self.key
    }

    /// Release numbers exactly as written, trailing zeros included.
    pub fn release_clause(&self) -> &[u64] {
        &self.release_clause
    }

    pub fn is_prerelease(&self) -> bool {
        self.key.pre != PreRelease::Final || self.key.dev != DevRelease::Absent
    }

    pub fn has_local(&self) -> bool {
        !self.key.local.is_empty()
    }

    /// The same version with its local label dropped.
    pub fn without_local(&self) -> Self {
        let public = self.text.split('+').next().unwrap_or_default();
        NormalizedVersion {
            text: public.to_string(),
            key: NormalizedKey {
                local: Vec::new(),
                ..self.key.clone()
            },
            release_clause: self.release_clause.clone(),
        }
    }

    /// Text used for segment-aware prefix comparisons.
    fn prefix_text(&self) -> &str {
        self.text.strip_prefix('v').unwrap_or(&self.text)
    }

    fn release_prefix(clause: &[u64]) -> String {
        clause
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(".")
    }
}

fn parse_number(value: &str, text: &str) -> Result<u64, VersionError> {
    value
        .parse::<u64>()
        .map_err(|_| VersionError::unsupported(SchemeKind::Normalized, text))
}

fn parse_normalized(text: &str, guard_major: bool) -> Result<NormalizedVersion, VersionError> {
    let text = text.trim();
    let caps = NORMALIZED_VERSION_RE
        .captures(text)
        .ok_or_else(|| VersionError::unsupported(SchemeKind::Normalized, text))?;

    let epoch = match caps.get(1) {
        Some(m) => parse_number(m.as_str(), text)?,
        None => 0,
    };

    let release_clause = caps[2]
        .split('.')
        .map(|part| parse_number(part, text))
        .collect::<Result<Vec<_>, _>>()?;

    if guard_major {
        if let Some(&major) = release_clause.first() {
            if major > HUGE_MAJOR_VERSION {
                return Err(VersionError::HugeMajorVersion {
                    major,
                    version: text.to_string(),
                });
            }
        }
    }

    let mut release = release_clause.clone();
    while release.len() > 1 && release.last() == Some(&0) {
        release.pop();
    }

    let post = match caps.get(5) {
        Some(m) => Some(parse_number(m.as_str(), text)?),
        None => None,
    };
    let dev = match caps.get(6) {
        Some(m) => DevRelease::Dev(parse_number(m.as_str(), text)?),
        None => DevRelease::Absent,
    };

    let pre = match (caps.get(3), caps.get(4)) {
        (Some(label), Some(number)) => {
            let n = parse_number(number.as_str(), text)?;
            match label.as_str() {
                "a" => PreRelease::Alpha(n),
                "b" => PreRelease::Beta(n),
                "c" => PreRelease::Candidate(n, CandidateLabel::C),
                _ => PreRelease::Candidate(n, CandidateLabel::Rc),
            }
        }
        _ if post.is_none() && dev != DevRelease::Absent => PreRelease::DevOnly,
        _ => PreRelease::Final,
    };

    let local = match caps.get(7) {
        Some(m) => m
            .as_str()
            .split('.')
            .map(|part| {
                if part.bytes().all(|b| b.is_ascii_digit()) {
                    parse_number(part, text).map(LocalSegment::Numeric)
                } else {
                    Ok(LocalSegment::Alphanumeric(part.to_string()))
                }
            })
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };

    Ok(NormalizedVersion {
        text: text.to_string(),
        key: NormalizedKey {
            epoch,
            release,
            pre,
            post,
            dev,
            local,
        },
        release_clause,
    })
}

impl SchemeVersion for NormalizedVersion {
    const SCHEME: SchemeKind = SchemeKind::Normalized;

    fn parse(text: &str) -> Result<Self, VersionError> {
        NormalizedVersion::parse(text)
    }

    fn as_str(&self) -> &str {
        &self.text
    }

    fn is_prerelease(&self) -> bool {
        NormalizedVersion::is_prerelease(self)
    }

    fn to_key(&self) -> VersionKey {
        VersionKey::Normalized(self.key.clone())
    }

    fn matches_clause(&self, clause: &Constraint<Self>) -> bool {
        let constraint = clause.version();

        // Local labels only count when the constraint names one.
        let stripped;
        let candidate = if self.has_local() && !constraint.has_local() {
            stripped = self.without_local();
            &stripped
        } else {
            self
        };

        match clause.operator() {
            Operator::LessThan => {
                if candidate >= constraint {
                    return false;
                }
                let prefix = Self::release_prefix(&constraint.release_clause);
                !match_prefix(candidate.prefix_text(), &prefix)
            }
            Operator::GreaterThan => {
                if candidate <= constraint {
                    return false;
                }
                let prefix = Self::release_prefix(&constraint.release_clause);
                !match_prefix(candidate.prefix_text(), &prefix)
            }
            Operator::LessThanOrEqual => candidate <= constraint,
            Operator::GreaterThanOrEqual => candidate >= constraint,
            Operator::Equal if clause.is_prefix() => {
                match_prefix(candidate.prefix_text(), constraint.prefix_text())
            }
            Operator::Equal => candidate == constraint,
            Operator::NotEqual if clause.is_prefix() => {
                !match_prefix(candidate.prefix_text(), constraint.prefix_text())
            }
            Operator::NotEqual => candidate != constraint,
            Operator::ArbitraryEqual => self.as_str() == constraint.as_str(),
            Operator::Compatible => {
                if candidate == constraint {
                    return true;
                }
                if candidate < constraint {
                    return false;
                }
                let clause = &constraint.release_clause;
                let clause = if clause.len() > 1 {
                    &clause[..clause.len() - 1]
                } else {
                    &clause[..]
                };
                match_prefix(candidate.prefix_text(), &Self::release_prefix(clause))
            }
        }
    }
}

impl PartialEq for NormalizedVersion {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for NormalizedVersion {}

impl PartialOrd for NormalizedVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NormalizedVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl Hash for NormalizedVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for NormalizedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for NormalizedVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NormalizedVersion::parse(s)
    }
}
