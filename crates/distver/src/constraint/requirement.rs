//! Requirement text: `Name [extras] (op ver, ...) ; marker`

use lazy_static::lazy_static;
use regex::Regex;

use super::Operator;
use crate::error::VersionError;

lazy_static! {
    static ref NAME_RE: Regex = Regex::new(r"^([A-Za-z0-9._-]+)\s*").unwrap();
    static ref IDENTIFIER_RE: Regex = Regex::new(r"^[A-Za-z0-9._-]+$").unwrap();
    static ref OPERATOR_RE: Regex = Regex::new(r"^(===|==|<=|>=|!=|~=|<|>)\s*").unwrap();
    static ref VERSION_RE: Regex = Regex::new(r"^([A-Za-z0-9._*+!~-]+)\s*").unwrap();
}

/// One clause as written, before its version is parsed under a scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementClause {
    pub operator: Operator,
    /// The literal with any `.*` suffix removed.
    pub version: String,
    pub prefix: bool,
}

/// A parsed requirement line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub name: String,
    pub extras: Vec<String>,
    pub clauses: Vec<RequirementClause>,
    /// Environment marker text after `;`, uninterpreted.
    pub marker: Option<String>,
}

/// Parse a requirement such as `foo [bar] (>= 1.0, < 2.0) ; python_version > "3"`.
///
/// Inside parentheses a clause without an operator means `==`; in the bare
/// form (`foo >= 1.0, < 2.0`) every clause needs an operator.
pub fn parse_requirement(text: &str) -> Result<Requirement, VersionError> {
    let invalid = |reason: &str| VersionError::invalid_constraint(text, reason);

    let body = text.split('#').next().unwrap_or_default().trim();
    if body.is_empty() {
        return Err(invalid("empty requirement"));
    }

    let (body, marker) = match body.split_once(';') {
        Some((head, marker)) => {
            let marker = marker.trim();
            if marker.is_empty() {
                return Err(invalid("empty environment marker"));
            }
            (head.trim_end(), Some(marker.to_string()))
        }
        None => (body, None),
    };

    let caps = NAME_RE
        .captures(body)
        .ok_or_else(|| invalid("expected a distribution name"))?;
    let name = caps[1].to_string();
    let mut rest = &body[caps[0].len()..];

    let mut extras = Vec::new();
    if let Some(after) = rest.strip_prefix('[') {
        let (inner, tail) = after
            .split_once(']')
            .ok_or_else(|| invalid("unterminated extras"))?;
        for extra in inner.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            if !IDENTIFIER_RE.is_match(extra) {
                return Err(invalid("invalid extra name"));
            }
            extras.push(extra.to_string());
        }
        rest = tail.trim_start();
    }

    if rest.starts_with('@') {
        return Err(invalid("URL requirements are not supported"));
    }

    let clauses = if let Some(after) = rest.strip_prefix('(') {
        let (inner, tail) = after
            .split_once(')')
            .ok_or_else(|| invalid("unterminated constraint list"))?;
        if !tail.trim().is_empty() {
            return Err(invalid("unexpected text after constraint list"));
        }
        parse_clauses(inner, true).map_err(|reason| invalid(&reason))?
    } else if rest.is_empty() {
        Vec::new()
    } else {
        parse_clauses(rest, false).map_err(|reason| invalid(&reason))?
    };

    Ok(Requirement {
        name,
        extras,
        clauses,
        marker,
    })
}

fn parse_clauses(text: &str, implicit_equal: bool) -> Result<Vec<RequirementClause>, String> {
    let mut clauses = Vec::new();
    let mut rest = text.trim();
    if rest.is_empty() {
        return Ok(clauses);
    }

    loop {
        let operator = match OPERATOR_RE.captures(rest) {
            Some(caps) => {
                let operator: Operator = caps[1].parse().map_err(|e: VersionError| e.to_string())?;
                rest = &rest[caps[0].len()..];
                operator
            }
            None if implicit_equal => Operator::Equal,
            None => return Err(format!("expected a comparison operator at \"{rest}\"")),
        };

        let caps = VERSION_RE
            .captures(rest)
            .ok_or_else(|| format!("expected a version after '{operator}'"))?;
        let literal = &caps[1];
        rest = &rest[caps[0].len()..];

        let (version, prefix) = match literal.strip_suffix(".*") {
            Some(head) => (head, true),
            None => (literal, false),
        };
        if prefix && !operator.allows_prefix() {
            return Err(format!("'.*' not allowed with '{operator}'"));
        }
        clauses.push(RequirementClause {
            operator,
            version: version.to_string(),
            prefix,
        });

        if rest.is_empty() {
            return Ok(clauses);
        }
        rest = rest
            .strip_prefix(',')
            .ok_or_else(|| format!("expected ',' at \"{rest}\""))?
            .trim_start();
        if rest.is_empty() {
            return Err("dangling ',' in constraint list".to_string());
        }
    }
}
