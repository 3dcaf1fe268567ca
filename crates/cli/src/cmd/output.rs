//! Implementation of the `terracycle output` command.

use anyhow::{Context, Result};
use serde_json::Value;

use terracycle_lib::TerraformOptions;
use terracycle_lib::terraform::{output, output_all};

/// Execute the output command.
///
/// Prints a single output value when `key` is given, otherwise every output as
/// a JSON object. Values are unwrapped from terraform's type/sensitivity envelope.
pub fn cmd_output(options: &TerraformOptions, key: Option<&str>) -> Result<()> {
  let rt = super::runtime()?;

  let value = match key {
    Some(key) => rt
      .block_on(output(options, key))
      .with_context(|| format!("Failed to read output '{}'", key))?,
    None => Value::Object(rt.block_on(output_all(options)).context("Failed to read outputs")?),
  };

  println!(
    "{}",
    serde_json::to_string_pretty(&value).context("Failed to serialize outputs")?
  );

  Ok(())
}
