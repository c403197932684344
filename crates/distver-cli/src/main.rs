mod cmd;
mod config;

use config::{DistverConfig, Settings};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "distver")]
#[command(about = "Parse, compare and match distribution versions")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Version scheme: normalized, legacy, semantic, adaptive or default
    #[arg(long, global = true, value_name = "NAME")]
    scheme: Option<String>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a version and show how the scheme reads it
    Parse(cmd::parse::ParseArgs),

    /// Compare two versions
    #[command(alias = "cmp")]
    Compare(cmd::compare::CompareArgs),

    /// Print the versions that satisfy a requirement
    #[command(name = "match")]
    Match(cmd::matching::MatchArgs),

    /// Sort versions
    Sort(cmd::sort::SortArgs),

    /// Suggest a valid version for a loosely formatted one
    Suggest(cmd::suggest::SuggestArgs),
}

fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn init_logging(verbose: u8) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level(verbose)))
        .format_timestamp(None)
        .init();
}

fn run() -> Result<i32> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = DistverConfig::load_from_cwd().context("Failed to load distver.toml")?;
    let settings = Settings::resolve(args.scheme.as_deref(), config.as_ref())?;
    log::debug!("Using the {} scheme", settings.scheme);

    match args.command {
        Commands::Parse(parse_args) => cmd::parse::execute(parse_args, &settings),
        Commands::Compare(compare_args) => cmd::compare::execute(compare_args, &settings),
        Commands::Match(match_args) => cmd::matching::execute(match_args, &settings),
        Commands::Sort(sort_args) => cmd::sort::execute(sort_args, &settings),
        Commands::Suggest(suggest_args) => cmd::suggest::execute(suggest_args, &settings),
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("Error: {}", e);
            for cause in e.chain().skip(1) {
                eprintln!("  Caused by: {}", cause);
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from(["distver", "sort", "1.0", "0.9", "--scheme", "legacy", "-vv"]).unwrap();
        assert_eq!(args.scheme.as_deref(), Some("legacy"));
        assert_eq!(args.verbose, 2);
        match args.command {
            Commands::Sort(sort) => {
                assert_eq!(sort.versions, vec!["1.0", "0.9"]);
                assert!(!sort.reverse);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_match_requires_candidates() {
        assert!(Args::try_parse_from(["distver", "match", "foo (>= 1.0)"]).is_err());
        let args = Args::try_parse_from(["distver", "match", "foo (>= 1.0)", "1.2", "--best"]).unwrap();
        assert!(matches!(args.command, Commands::Match(ref m) if m.best && m.versions == ["1.2"]));
    }

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(0), "warn");
        assert_eq!(log_level(1), "info");
        assert_eq!(log_level(2), "debug");
        assert_eq!(log_level(9), "trace");
    }
}
