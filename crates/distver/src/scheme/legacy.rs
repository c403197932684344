//! Legacy (distutils/setuptools style) versions
//!
//! Any text is accepted. The key is built from alternating runs of digits and
//! letters so that pre-release words sort before the final release and
//! `pl`/numeric suffixes sort after it.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use lazy_static::lazy_static;
use log::warn;
use regex::Regex;

use crate::constraint::{match_prefix, Constraint, Operator};
use crate::error::VersionError;
use crate::scheme::SchemeKind;
use crate::version::{SchemeVersion, VersionKey};

const FINAL: &str = "*final";
const FINAL_DASH: &str = "*final-";
const ZERO: &str = "00000000";

lazy_static! {
    static ref VERSION_PART_RE: Regex = Regex::new(r"([a-z]+|\d+|[.-])").unwrap();
    static ref NUMERIC_PREFIX_RE: Regex = Regex::new(r"^\d+(?:\.\d+)*").unwrap();
}

/// Comparable key of a legacy version: a sequence of padded numbers and
/// `*`-prefixed words.
///
/// Words sort before numbers. Numbers compare by value, so runs wider than
/// the padding still order correctly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LegacyKey(Vec<String>);

impl LegacyKey {
    pub fn new(text: &str) -> Self {
        let mut result: Vec<String> = Vec::new();
        for part in raw_parts(text) {
            if part.starts_with('*') {
                if part.as_str() < FINAL {
                    while result.last().is_some_and(|last| last == FINAL_DASH) {
                        result.pop();
                    }
                }
                while result.last().is_some_and(|last| last == ZERO) {
                    result.pop();
                }
            }
            result.push(part);
        }
        LegacyKey(result)
    }

    pub fn parts(&self) -> &[String] {
        &self.0
    }

    /// Leading numeric parts, before the first word.
    pub fn numeric_prefix(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .map(String::as_str)
            .take_while(|part| !part.starts_with('*'))
    }

    /// Any word sorting before `*final` marks a pre-release.
    pub fn is_prerelease(&self) -> bool {
        self.0
            .iter()
            .any(|part| part.starts_with('*') && part.as_str() < FINAL)
    }
}

fn compare_parts(a: &str, b: &str) -> Ordering {
    if a.starts_with('*') || b.starts_with('*') {
        a.cmp(b)
    } else {
        a.len().cmp(&b.len()).then_with(|| a.cmp(b))
    }
}

impl PartialOrd for LegacyKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LegacyKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .iter()
            .zip(&other.0)
            .map(|(a, b)| compare_parts(a, b))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| self.0.len().cmp(&other.0.len()))
    }
}

fn substitute(part: &str) -> Option<&str> {
    match part {
        "pre" | "preview" | "rc" => Some("c"),
        "-" => Some("final-"),
        "dev" => Some("@"),
        "" | "." => None,
        other => Some(other),
    }
}

fn push_part(parts: &mut Vec<String>, piece: &str) {
    let Some(piece) = substitute(piece) else {
        return;
    };
    if piece.starts_with(|c: char| c.is_ascii_digit()) {
        let digits = piece.trim_start_matches('0');
        let digits = if digits.is_empty() { "0" } else { digits };
        parts.push(format!("{digits:0>8}"));
    } else {
        parts.push(format!("*{piece}"));
    }
}

/// Split into runs, keeping the text between runs as parts of its own.
fn raw_parts(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut parts = Vec::new();
    let mut last = 0;
    for m in VERSION_PART_RE.find_iter(&lowered) {
        push_part(&mut parts, &lowered[last..m.start()]);
        push_part(&mut parts, m.as_str());
        last = m.end();
    }
    push_part(&mut parts, &lowered[last..]);
    parts.push(FINAL.to_string());
    parts
}

/// A version parsed under the legacy scheme.
#[derive(Debug, Clone)]
pub struct LegacyVersion {
    text: String,
    key: LegacyKey,
}

impl LegacyVersion {
    /// Never fails; the `Result` keeps the signature uniform across schemes.
    pub fn parse(text: &str) -> Result<Self, VersionError> {
        Ok(Self::new(text))
    }

    pub fn new(text: &str) -> Self {
        let text = text.trim();
        LegacyVersion {
            text: text.to_string(),
            key: LegacyKey::new(text),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn key(&self) -> &LegacyKey {
        &self.key
    }

    pub fn is_prerelease(&self) -> bool {
        self.key.is_prerelease()
    }
}

impl SchemeVersion for LegacyVersion {
    const SCHEME: SchemeKind = SchemeKind::Legacy;

    fn parse(text: &str) -> Result<Self, VersionError> {
        LegacyVersion::parse(text)
    }

    fn as_str(&self) -> &str {
        &self.text
    }

    fn is_prerelease(&self) -> bool {
        self.key.is_prerelease()
    }

    fn to_key(&self) -> VersionKey {
        VersionKey::Legacy(self.key.clone())
    }

    fn matches_clause(&self, clause: &Constraint<Self>) -> bool {
        if clause.operator() != Operator::Compatible {
            return crate::constraint::evaluate(self, clause);
        }

        let constraint = clause.version();
        if self < constraint {
            return false;
        }
        let Some(numeric) = NUMERIC_PREFIX_RE.find(constraint.as_str()) else {
            warn!(
                "Cannot compute compatible match for version {} and constraint {}",
                self, constraint
            );
            return true;
        };
        let numeric = numeric.as_str();
        let prefix = numeric.rsplit_once('.').map_or(numeric, |(head, _)| head);
        match_prefix(self.as_str(), prefix)
    }
}

impl PartialEq for LegacyVersion {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for LegacyVersion {}

impl PartialOrd for LegacyVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LegacyVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl Hash for LegacyVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for LegacyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for LegacyVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LegacyVersion::parse(s)
    }
}
