use clap::{Parser, Subcommand};
use depscope::application::dto::OutputFormat;
use std::path::PathBuf;

/// Analyze package dependencies and file references of Node/TypeScript projects
#[derive(Parser, Debug)]
#[command(name = "depscope")]
#[command(version)]
#[command(
    about = "Analyze package dependencies and file references of Node/TypeScript projects",
    long_about = None
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the package dependency tree of a project
    Deps(DepsArgs),
    /// List the files that import a given file
    Refs(RefsArgs),
}

#[derive(clap::Args, Debug)]
pub struct DepsArgs {
    /// Project directory (defaults to current directory)
    pub dir: Option<PathBuf>,

    /// Write the result as JSON to this file instead of printing it
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Maximum tree depth; 1 lists direct dependencies only [default: 1]
    #[arg(short, long, value_parser = parse_depth)]
    pub depth: Option<usize>,

    /// Console output format: tree or json [default: tree]
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Neither read nor update the dependency cache
    #[arg(long)]
    pub no_cache: bool,

    /// Leave the lockfile hash out of cache freshness checks
    #[arg(long)]
    pub no_hash: bool,

    /// Directory holding dependency-cache.json [default: ./.cache]
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Configuration file (defaults to depscope.config.yml in the project directory)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct RefsArgs {
    /// File to analyse; the extension may be omitted
    pub file: PathBuf,

    /// Project root to scan (defaults to current directory)
    #[arg(short, long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Write the result as JSON to this file instead of printing it
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Console output format: tree or json [default: tree]
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Configuration file (defaults to depscope.config.yml in the project root)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

fn parse_depth(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("depth must be at least 1".to_string()),
        Ok(depth) => Ok(depth),
        Err(_) => Err(format!("Invalid depth: {}. Please specify a positive integer", s)),
    }
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
