//! Subcommands

pub mod compare;
pub mod matching;
pub mod parse;
pub mod sort;
pub mod suggest;

use anyhow::{Context, Result};
use distver::Version;

use crate::config::Settings;

/// Parse a version honouring the configured scheme and major-version guard.
pub(crate) fn parse_version(settings: &Settings, text: &str) -> Result<Version> {
    let parsed = if settings.unlimited_major {
        Version::parse_unlimited(settings.scheme, text)
    } else {
        Version::parse(settings.scheme, text)
    };
    parsed.with_context(|| format!("Failed to parse version \"{text}\""))
}
