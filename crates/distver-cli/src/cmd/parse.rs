//! Parse command - show how a version is understood by a scheme.

use anyhow::Result;
use clap::Args;
use distver::Version;
use serde::Serialize;

use crate::config::Settings;

#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Version to parse
    pub version: String,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ParseReport {
    pub version: String,
    pub scheme: &'static str,
    pub resolved_scheme: &'static str,
    pub prerelease: bool,
}

impl ParseReport {
    pub fn new(version: &Version) -> Self {
        let resolved_scheme = match version {
            Version::Adaptive(v) => v.resolved_scheme(),
            other => other.scheme(),
        };
        ParseReport {
            version: version.to_string(),
            scheme: version.scheme().name(),
            resolved_scheme: resolved_scheme.name(),
            prerelease: version.is_prerelease(),
        }
    }
}

pub fn execute(args: ParseArgs, settings: &Settings) -> Result<i32> {
    let version = super::parse_version(settings, &args.version)?;
    let report = ParseReport::new(&version);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("version:    {}", report.version);
        println!("scheme:     {}", report.scheme);
        if report.resolved_scheme != report.scheme {
            println!("resolved:   {}", report.resolved_scheme);
        }
        println!("prerelease: {}", report.prerelease);
    }

    Ok(0)
}
