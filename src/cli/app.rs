//! Main CLI application structure

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::checks::remote::{RemoteValidator, DEFAULT_VALIDATION_URL};

use super::output::{Output, OutputFormat};
use super::{fmt, lint, tree};

#[derive(Parser)]
#[command(name = "trackkit")]
#[command(author, version, about = "Validate and format exercise track repositories")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check that tracks are configured correctly
    Lint {
        /// Track root directories to check
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Skip checks that call the remote validation service
        #[arg(long)]
        no_http: bool,

        /// Base URL of the remote validation service
        #[arg(long, env = "TRACKKIT_VALIDATION_URL", default_value = DEFAULT_VALIDATION_URL)]
        validation_url: String,
    },

    /// Rewrite a track's configuration files into canonical form
    Fmt {
        /// Track root directory
        path: PathBuf,

        /// Report would-be changes without writing any file
        #[arg(long)]
        check: bool,
    },

    /// View a track's unlock structure as a tree
    Tree {
        /// Track root directory, or a path to a config.json file
        path: PathBuf,

        /// Display the difficulty of each exercise
        #[arg(long)]
        with_difficulty: bool,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    match cli.command {
        Commands::Lint {
            paths,
            no_http,
            validation_url,
        } => {
            let remote = (!no_http).then(|| RemoteValidator::new(validation_url));
            if remote.is_none() {
                output.verbose_ctx("lint", "Remote HTTP checks disabled");
            }

            let mut failed = false;
            for path in &paths {
                if lint::run(path, remote.as_ref(), &output) {
                    failed = true;
                }
            }

            Ok(exit_code(failed))
        }

        Commands::Fmt { path, check } => {
            let changed = fmt::run(&path, check, &output)?;
            // Only a check run turns "changes needed" into a failure.
            Ok(exit_code(check && changed))
        }

        Commands::Tree {
            path,
            with_difficulty,
        } => {
            // Tree output is advisory; problems are reported but never
            // change the exit status.
            if let Err(e) = tree::run(&path, with_difficulty, &output) {
                output.error(&format!("{:#}", e));
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn exit_code(failed: bool) -> ExitCode {
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
