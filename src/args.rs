use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Flex-Layout migration CLI - Rewrites fx* directives in parsed template trees
/// into Tailwind classes
#[derive(Parser, Debug)]
#[command(name = "fxlayout-migrator")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rewrite template tree files matching the given patterns
    Rewrite(RewriteArgs),
    /// Rewrite a single template tree read from stdin and write it to stdout
    Pipe(PipeArgs),
}

/// Arguments for the rewrite command
#[derive(Parser, Debug, Clone)]
pub struct RewriteArgs {
    /// Input file patterns (glob patterns supported)
    #[arg(
        short = 'i',
        long = "input",
        value_name = "PATTERN",
        required = true,
        num_args = 1..,
        help = "Template tree JSON files to rewrite"
    )]
    pub input: Vec<String>,

    /// Output directory
    #[arg(
        short = 'o',
        long = "out-dir",
        value_name = "DIR",
        conflicts_with = "in_place",
        help = "Directory where rewritten trees are written"
    )]
    pub out_dir: Option<PathBuf>,

    /// Overwrite the input files
    #[arg(
        long = "in-place",
        default_value_t = false,
        help = "Rewrite the input files in place"
    )]
    pub in_place: bool,

    /// Output manifest file path (JSON)
    #[arg(
        short = 'm',
        long = "manifest",
        value_name = "PATH",
        help = "Path where the JSON manifest will be written"
    )]
    pub manifest: Option<PathBuf>,

    /// Configuration file path (YAML or JSON)
    #[arg(
        short = 'c',
        long = "config",
        value_name = "PATH",
        env = "FXLAYOUT_MIGRATOR_CONFIG",
        help = "Path to configuration file (YAML or JSON format)"
    )]
    pub config: Option<PathBuf>,

    /// Emit compact JSON
    #[arg(
        long = "compact",
        default_value_t = false,
        help = "Write rewritten trees and the manifest as compact JSON"
    )]
    pub compact: bool,

    /// Verbose output
    #[arg(
        short = 'v',
        long = "verbose",
        default_value_t = false,
        help = "Enable verbose output"
    )]
    pub verbose: bool,

    /// Number of parallel threads to use
    #[arg(
        short = 'j',
        long = "jobs",
        value_name = "NUM",
        help = "Number of parallel threads to use (defaults to number of CPU cores)"
    )]
    pub jobs: Option<usize>,

    /// Exclude patterns (glob patterns to exclude)
    #[arg(
        short = 'e',
        long = "exclude",
        value_name = "PATTERN",
        num_args = 0..,
        help = "Patterns to exclude from rewriting"
    )]
    pub exclude: Vec<String>,

    /// Dry run (don't write output files)
    #[arg(
        long = "dry-run",
        default_value_t = false,
        help = "Perform the rewrite but don't write output files"
    )]
    pub dry_run: bool,
}

/// Arguments for the pipe command
#[derive(Parser, Debug, Clone)]
pub struct PipeArgs {
    /// Emit compact JSON
    #[arg(
        long = "compact",
        default_value_t = false,
        help = "Write the rewritten tree as compact JSON"
    )]
    pub compact: bool,
}

impl RewriteArgs {
    /// Validate that the arguments are consistent
    pub fn validate(&self) -> Result<(), String> {
        if self.input.is_empty() {
            return Err("At least one input pattern must be provided".to_string());
        }

        match (&self.out_dir, self.in_place) {
            (None, false) => {
                return Err("Either --out-dir or --in-place must be provided".to_string());
            }
            (Some(_), true) => {
                return Err("--out-dir and --in-place cannot be combined".to_string());
            }
            _ => {}
        }

        if let Some(jobs) = self.jobs {
            if jobs == 0 {
                return Err("Number of jobs must be at least 1".to_string());
            }
        }

        Ok(())
    }
}
