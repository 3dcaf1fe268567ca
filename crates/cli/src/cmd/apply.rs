//! Implementation of the `terracycle apply` command.
//!
//! Provisions the infrastructure and leaves it running. Use `terracycle destroy`
//! to tear it down, or `terracycle cycle` to do both in one go.

use anyhow::{Context, Result};

use terracycle_lib::TerraformOptions;
use terracycle_lib::terraform::init_and_apply;

/// Execute the apply command.
///
/// Runs init followed by apply and prints terraform's apply output.
///
/// # Errors
///
/// Returns an error if init or apply fails with a non-retryable error, or keeps
/// failing after the retry budget is spent.
pub fn cmd_apply(options: &TerraformOptions) -> Result<()> {
  let rt = super::runtime()?;
  let out = rt.block_on(init_and_apply(options)).context("Apply failed")?;

  if !out.is_empty() {
    println!("{}", out);
  }

  Ok(())
}
