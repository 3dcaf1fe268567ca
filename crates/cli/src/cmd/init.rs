//! Implementation of the `terracycle init` command.

use anyhow::{Context, Result};

use terracycle_lib::TerraformOptions;
use terracycle_lib::terraform::init;

/// Execute the init command.
///
/// Runs `terraform init` in the configured directory, retrying transient
/// registry and plugin download failures.
pub fn cmd_init(options: &TerraformOptions) -> Result<()> {
  let rt = super::runtime()?;
  rt.block_on(init(options)).context("Init failed")?;

  println!("Initialized {}", options.terraform_dir.display());

  Ok(())
}
