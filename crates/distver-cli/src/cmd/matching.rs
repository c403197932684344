//! Match command - filter versions through a requirement.

use anyhow::{Context, Result};
use clap::Args;
use distver::VersionMatcher;
use log::warn;

use crate::config::Settings;

#[derive(Args, Debug)]
pub struct MatchArgs {
    /// Requirement, e.g. "foo (>= 1.0, < 2.0)"
    pub requirement: String,

    /// Candidate versions
    #[arg(required = true)]
    pub versions: Vec<String>,

    /// Print only the highest matching version
    #[arg(long)]
    pub best: bool,
}

/// Candidates that parse and satisfy the matcher, in input order.
pub fn matching_versions<'a>(matcher: &VersionMatcher, candidates: &'a [String]) -> Vec<&'a str> {
    candidates
        .iter()
        .filter(|candidate| match matcher.matches(candidate) {
            Ok(matched) => matched,
            Err(e) => {
                warn!("Skipping {}: {}", candidate, e);
                false
            }
        })
        .map(String::as_str)
        .collect()
}

pub fn execute(args: MatchArgs, settings: &Settings) -> Result<i32> {
    let matcher = VersionMatcher::parse(settings.scheme, &args.requirement)
        .with_context(|| format!("Invalid requirement \"{}\"", args.requirement))?;

    if args.best {
        return Ok(match matcher.best_match(args.versions.iter().map(String::as_str)) {
            Some(best) => {
                println!("{best}");
                0
            }
            None => 1,
        });
    }

    let matched = matching_versions(&matcher, &args.versions);
    for version in &matched {
        println!("{version}");
    }

    Ok(if matched.is_empty() { 1 } else { 0 })
}
