//! Terraform operations.
//!
//! Each operation compiles the retry policy held in the options and runs its
//! command through it, so transient registry and provider failures are retried
//! while anything else is returned straight away.

use serde_json::{Map, Value};
use tracing::info;

use crate::args::{apply_args, destroy_args, init_args, output_args};
use crate::command::run_terraform;
use crate::error::{Error, Result};
use crate::options::TerraformOptions;
use crate::retry::RetryPolicy;

async fn run_with_retries(action: &str, options: &TerraformOptions, args: Vec<String>) -> Result<String> {
  let policy = RetryPolicy::from_options(options)?;
  policy.run(action, || run_terraform(options, &args)).await
}

/// Run `terraform init`.
pub async fn init(options: &TerraformOptions) -> Result<String> {
  run_with_retries("init", options, init_args(options)).await
}

/// Run `terraform apply -auto-approve`.
pub async fn apply(options: &TerraformOptions) -> Result<String> {
  run_with_retries("apply", options, apply_args(options)).await
}

/// Run `terraform init` followed by `terraform apply`.
///
/// # Returns
///
/// The stdout of apply.
pub async fn init_and_apply(options: &TerraformOptions) -> Result<String> {
  init(options).await?;
  let out = apply(options).await?;
  info!(dir = %options.terraform_dir.display(), "apply complete");
  Ok(out)
}

/// Run `terraform destroy -auto-approve`.
pub async fn destroy(options: &TerraformOptions) -> Result<String> {
  let out = run_with_retries("destroy", options, destroy_args(options)).await?;
  info!(dir = %options.terraform_dir.display(), "destroy complete");
  Ok(out)
}

/// Every output value, keyed by output name.
///
/// `terraform output -json` wraps each value with its type and sensitivity;
/// only the `value` field is kept.
pub async fn output_all(options: &TerraformOptions) -> Result<Map<String, Value>> {
  let raw = run_with_retries("output", options, output_args(options)).await?;
  let parsed: Map<String, Value> = if raw.is_empty() {
    Map::new()
  } else {
    serde_json::from_str(&raw)?
  };

  Ok(
    parsed
      .into_iter()
      .map(|(name, entry)| {
        let value = match entry {
          Value::Object(mut fields) => fields.remove("value").unwrap_or(Value::Null),
          other => other,
        };
        (name, value)
      })
      .collect(),
  )
}

/// A single output value.
///
/// # Errors
///
/// Returns [`Error::OutputNotFound`] if no output is named `key`.
pub async fn output(options: &TerraformOptions, key: &str) -> Result<Value> {
  output_all(options)
    .await?
    .remove(key)
    .ok_or_else(|| Error::OutputNotFound(key.to_string()))
}
