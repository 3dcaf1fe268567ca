//! Implementation of the `terracycle destroy` command.

use anyhow::{Context, Result};

use terracycle_lib::TerraformOptions;
use terracycle_lib::terraform::destroy;

/// Execute the destroy command.
pub fn cmd_destroy(options: &TerraformOptions) -> Result<()> {
  let rt = super::runtime()?;
  let out = rt.block_on(destroy(options)).context("Destroy failed")?;

  if !out.is_empty() {
    println!("{}", out);
  }

  Ok(())
}
