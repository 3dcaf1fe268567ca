//! Implementation of the `terracycle cycle` command.
//!
//! This is the full provisioning check: init and apply, then destroy on every
//! exit path. The command succeeds only if apply finished without a fatal error
//! and destroy succeeded afterwards.

use std::time::Instant;

use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream};
use tracing::info;

use terracycle_lib::TerraformOptions;
use terracycle_lib::scope::init_and_apply_scoped;

/// Execute the cycle command.
///
/// Prints a summary including the directory, the retry budget in effect and
/// the elapsed time.
pub fn cmd_cycle(options: &TerraformOptions) -> Result<()> {
  let started = Instant::now();

  let rt = super::runtime()?;
  rt.block_on(init_and_apply_scoped(options)).context("Cycle failed")?;

  let elapsed = humantime::format_duration(std::time::Duration::from_secs(started.elapsed().as_secs()));
  info!(elapsed = %elapsed, "cycle complete");

  println!();
  println!(
    "{} Cycle complete!",
    "✓".if_supports_color(Stream::Stdout, |t| t.green())
  );
  println!("  Directory: {}", options.terraform_dir.display());
  println!("  Applied and destroyed");
  println!("  Max retries: {}", options.max_retries);
  println!("  Elapsed: {}", elapsed);

  Ok(())
}
