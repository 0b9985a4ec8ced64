mod cmd;
mod config;
mod output;
mod prompts;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cmd::{cmd_clean, cmd_info, cmd_plan, cmd_run, cmd_verify};
use config::EnvArgs;
use output::{OutputFormat, print_error};

/// qiboot - rebuild the Qi-Link Python environment and launch the dashboard
#[derive(Parser)]
#[command(name = "qiboot")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Recreate the environment, install dependencies and launch the dashboard (default)
  Run {
    #[command(flatten)]
    env: EnvArgs,

    /// Stop after the environment is ready instead of launching the dashboard
    #[arg(long)]
    no_launch: bool,
  },

  /// Show what a run would do without touching anything
  Plan {
    #[command(flatten)]
    env: EnvArgs,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Check that every dependency imports inside the existing environment
  Verify {
    #[command(flatten)]
    env: EnvArgs,
  },

  /// Display platform and environment information
  Info {
    #[command(flatten)]
    env: EnvArgs,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Remove the environment directory
  Clean {
    #[command(flatten)]
    env: EnvArgs,

    /// Skip confirmation prompt
    #[arg(long)]
    force: bool,
  },
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let command = cli.command.unwrap_or(Commands::Run {
    env: EnvArgs::default(),
    no_launch: false,
  });

  let result = match command {
    Commands::Run { env, no_launch } => cmd_run(&env, no_launch),
    Commands::Plan { env, output } => cmd_plan(&env, output),
    Commands::Verify { env } => cmd_verify(&env),
    Commands::Info { env, output } => cmd_info(&env, output),
    Commands::Clean { env, force } => cmd_clean(&env, force),
  };

  match result {
    Ok(code) => code,
    Err(e) => {
      print_error(&format!("{:#}", e));
      ExitCode::FAILURE
    }
  }
}
