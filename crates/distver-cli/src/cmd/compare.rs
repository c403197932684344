//! Compare command - order two versions.

use std::cmp::Ordering;

use anyhow::Result;
use clap::Args;

use crate::config::Settings;

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Left-hand version
    pub left: String,

    /// Right-hand version
    pub right: String,
}

pub fn symbol(ordering: Ordering) -> &'static str {
    match ordering {
        Ordering::Less => "<",
        Ordering::Equal => "==",
        Ordering::Greater => ">",
    }
}

pub fn execute(args: CompareArgs, settings: &Settings) -> Result<i32> {
    let left = super::parse_version(settings, &args.left)?;
    let right = super::parse_version(settings, &args.right)?;
    let ordering = left.compare(&right)?;

    println!("{}", symbol(ordering));
    Ok(0)
}
