//! Best-effort coercion of loosely formatted versions

use lazy_static::lazy_static;
use regex::Regex;

use crate::scheme::{is_semver, NormalizedVersion};

lazy_static! {
    /// Rewrites applied in order by [`suggest_normalized_version`].
    static ref NORMALIZED_RULES: Vec<(Regex, &'static str)> = [
        (r"pre$", "pre0"),
        (r"dev$", "dev0"),
        // "b-2", "a.2" at the end are pre-release numbers
        (r"([abc]|rc)[\-.](\d+)$", "${1}${2}"),
        (r"[\-.](dev)[\-.]?r?(\d+)$", ".${1}${2}"),
        (r"[.~]?([abc])\.?", "${1}"),
        (r"^v", ""),
        (r"\b0+(\d+)", "${1}"),
        (r"(\d+[abc])$", "${1}0"),
        (r"\.?(dev-r|dev\.r)\.?(\d+)$", ".dev${2}"),
        (r"-(a|b|c)(\d+)$", "${1}${2}"),
        (r"[.\-](dev|devel)$", ".dev0"),
        (r"dev$", ".dev0"),
        (r"(final|stable)$", ""),
        // r and - mark post releases
        (r"\.?(r|-|-r)\.?(\d+)$", ".post${2}"),
        (r"\.?(dev|git|bzr)\.?(\d+)$", ".dev${2}"),
        (r"\.?(pre|preview|-c)(\d+)$", "c${2}"),
        // Tcl/Tk post releases
        (r"p(\d+)$", ".post${1}"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), replacement))
    .collect();

    static ref SEMANTIC_RULES: Vec<(Regex, &'static str)> = [
        (r"[.+-]$", ""),
        (r"^[.](\d)", "0.${1}"),
        (r"^[.-]", ""),
        (r"^\((.*)\)$", "${1}"),
        (r"^v(ersion)?\s*(\d+)", "${2}"),
        (r"^r(ev)?\s*(\d+)", "${2}"),
        (r"[.]{2,}", "."),
        (r"\b(alfa|apha)\b", "alpha"),
        (r"\b(pre-alpha|prealpha)\b", "pre.alpha"),
        (r"\(beta\)$", "beta"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), replacement))
    .collect();

    static ref SEMANTIC_SUFFIX_RULES: Vec<(Regex, &'static str)> = [
        (r"^[:~._+-]+", ""),
        (r#"[,*")(\[\]]"#, ""),
        (r"[~:+_ -]", "."),
        (r"[.]{2,}", "."),
        (r"\.$", ""),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), replacement))
    .collect();

    static ref NUMERIC_PREFIX_RE: Regex = Regex::new(r"^\d+(?:\.\d+)*").unwrap();
}

/// Literal substitutions applied before the pattern rules.
const NORMALIZED_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("-alpha", "a"),
    ("-beta", "b"),
    ("alpha", "a"),
    ("beta", "b"),
    ("rc", "c"),
    ("-final", ""),
    ("-pre", "c"),
    ("-release", ""),
    (".release", ""),
    ("-stable", ""),
    ("+", "."),
    ("_", "."),
    (" ", ""),
    (".final", ""),
    ("final", ""),
];

fn apply(rules: &[(Regex, &'static str)], text: String) -> String {
    rules.iter().fold(text, |text, (pattern, replacement)| {
        pattern.replace_all(&text, *replacement).into_owned()
    })
}

/// Coerce `text` into the normalized grammar, or `None` when no plausible
/// rewrite parses. Text that already parses is returned unchanged.
pub fn suggest_normalized_version(text: &str) -> Option<String> {
    if NormalizedVersion::parse(text).is_ok() {
        return Some(text.to_string());
    }

    let lowered = text.to_lowercase();
    let substituted = NORMALIZED_SUBSTITUTIONS
        .iter()
        .fold(lowered, |s, (from, to)| s.replace(from, to));
    let suggestion = apply(&NORMALIZED_RULES, substituted);

    NormalizedVersion::parse(&suggestion).ok().map(|_| suggestion)
}

/// Coerce `text` into a semantic version: the numeric prefix is padded to
/// three components and the remainder becomes a pre-release (when it
/// mentions `dev`) or build suffix.
pub fn suggest_semantic_version(text: &str) -> Option<String> {
    let mut result = apply(&SEMANTIC_RULES, text.trim().to_lowercase());
    if result.is_empty() {
        result = "0.0.0".to_string();
    }

    let (prefix, suffix) = match NUMERIC_PREFIX_RE.find(&result) {
        Some(m) => {
            let mut numbers = m
                .as_str()
                .split('.')
                .map(|n| n.parse::<u64>().ok())
                .collect::<Option<Vec<_>>>()?;
            while numbers.len() < 3 {
                numbers.push(0);
            }
            let extra: Vec<String> = numbers.split_off(3).iter().map(u64::to_string).collect();
            let prefix: Vec<String> = numbers.iter().map(u64::to_string).collect();
            let suffix = format!("{}{}", extra.join("."), &result[m.end()..]);
            (prefix.join("."), suffix.trim().to_string())
        }
        None => ("0.0.0".to_string(), result.clone()),
    };

    let suffix = if suffix.is_empty() {
        suffix
    } else {
        apply(&SEMANTIC_SUFFIX_RULES, suffix)
    };

    let suggestion = if suffix.is_empty() {
        prefix
    } else {
        let separator = if suffix.contains("dev") { '-' } else { '+' };
        format!("{prefix}{separator}{suffix}")
    };

    is_semver(&suggestion).then_some(suggestion)
}
