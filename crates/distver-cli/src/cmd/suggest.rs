//! Suggest command - coerce a loosely formatted version.

use anyhow::Result;
use clap::Args;
use distver::suggest_semantic_version;

use crate::config::Settings;

#[derive(Args, Debug)]
pub struct SuggestArgs {
    /// Loosely formatted version
    pub version: String,

    /// Suggest a semantic version regardless of the configured scheme
    #[arg(long)]
    pub semantic: bool,
}

pub fn suggestion(args: &SuggestArgs, settings: &Settings) -> Option<String> {
    if args.semantic {
        suggest_semantic_version(&args.version)
    } else {
        settings.scheme.scheme().suggest(&args.version)
    }
}

pub fn execute(args: SuggestArgs, settings: &Settings) -> Result<i32> {
    match suggestion(&args, settings) {
        Some(suggested) => {
            println!("{suggested}");
            Ok(0)
        }
        None => {
            eprintln!("No suggestion for \"{}\"", args.version);
            Ok(1)
        }
    }
}
