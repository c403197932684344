//! Sort command - order versions under a scheme.

use anyhow::Result;
use clap::Args;
use distver::Versions;
use log::warn;

use crate::config::Settings;

#[derive(Args, Debug)]
pub struct SortArgs {
    /// Versions to sort
    #[arg(required = true)]
    pub versions: Vec<String>,

    /// Sort in descending order
    #[arg(short, long)]
    pub reverse: bool,
}

pub fn execute(args: SortArgs, settings: &Settings) -> Result<i32> {
    let scheme = settings.scheme.scheme();
    for version in &args.versions {
        if !scheme.is_valid_version(version) {
            warn!("Dropping unsupported {} version \"{}\"", settings.scheme, version);
        }
    }

    let versions: Vec<&str> = args.versions.iter().map(String::as_str).collect();
    let sorted = if args.reverse {
        Versions::rsort(settings.scheme, &versions)
    } else {
        Versions::sort(settings.scheme, &versions)
    };

    for version in sorted {
        println!("{version}");
    }
    Ok(0)
}
