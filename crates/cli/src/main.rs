mod cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use terracycle_lib::TerraformOptions;
use terracycle_lib::consts::TERRAFORM_BIN_ENV;

use cmd::{cmd_apply, cmd_cycle, cmd_destroy, cmd_init, cmd_output};

/// terracycle - run terraform through init, apply and destroy with retries
#[derive(Parser)]
#[command(name = "terracycle")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Log output format
  #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
  log_format: LogFormat,

  #[command(flatten)]
  run: RunArgs,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Args)]
struct RunArgs {
  /// Directory holding the terraform definitions
  #[arg(short, long, global = true, default_value = ".")]
  dir: PathBuf,

  /// Set a variable (KEY=VALUE), may be repeated
  #[arg(long = "var", global = true, value_parser = parse_key_val)]
  vars: Vec<(String, String)>,

  /// Variable file to pass to terraform, may be repeated
  #[arg(long = "var-file", global = true)]
  var_files: Vec<PathBuf>,

  /// Terraform executable
  #[arg(long, global = true, env = TERRAFORM_BIN_ENV)]
  terraform_bin: Option<String>,

  /// Retries for errors matching a retryable pattern
  #[arg(long, global = true)]
  max_retries: Option<u32>,

  /// Pause between retries (e.g. "5s", "1m")
  #[arg(long, global = true)]
  retry_delay: Option<humantime::Duration>,

  /// Do not treat the default transient errors as retryable
  #[arg(long, global = true)]
  no_default_retries: bool,
}

#[derive(Subcommand)]
enum Commands {
  /// Run terraform init
  Init {
    /// Upgrade modules and providers
    #[arg(long)]
    upgrade: bool,
  },

  /// Run init and apply, leaving the infrastructure in place
  Apply,

  /// Destroy the infrastructure
  Destroy,

  /// Init and apply, then always destroy
  Cycle,

  /// Print outputs as JSON
  Output {
    /// Single output to print (prints all if not specified)
    key: Option<String>,
  },
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
  Text,
  Json,
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  init_logging(cli.verbose, cli.log_format);

  let options = build_options(&cli.run);

  match cli.command {
    Commands::Init { upgrade } => cmd_init(&options.with_upgrade(upgrade)),
    Commands::Apply => cmd_apply(&options),
    Commands::Destroy => cmd_destroy(&options),
    Commands::Cycle => cmd_cycle(&options),
    Commands::Output { key } => cmd_output(&options, key.as_deref()),
  }
}

fn init_logging(verbose: bool, format: LogFormat) {
  let filter = if verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
  };

  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time();

  match format {
    LogFormat::Text => builder.init(),
    LogFormat::Json => builder.json().init(),
  }
}

fn build_options(args: &RunArgs) -> TerraformOptions {
  let mut options = TerraformOptions::new(&args.dir);

  if let Some(bin) = &args.terraform_bin {
    options = options.with_binary(bin);
  }
  for (key, value) in &args.vars {
    options = options.with_var(key, value);
  }
  for file in &args.var_files {
    options = options.with_var_file(file);
  }
  if let Some(max_retries) = args.max_retries {
    options = options.with_max_retries(max_retries);
  }
  if let Some(delay) = args.retry_delay {
    options = options.with_time_between_retries(delay.into());
  }
  if !args.no_default_retries {
    options = options.with_default_retryable_errors();
  }

  options
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
  let (key, value) = s
    .split_once('=')
    .ok_or_else(|| format!("invalid KEY=VALUE: no '=' found in '{}'", s))?;
  if key.is_empty() {
    return Err(format!("invalid KEY=VALUE: empty key in '{}'", s));
  }
  Ok((key.to_string(), value.to_string()))
}
