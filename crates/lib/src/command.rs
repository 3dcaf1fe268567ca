//! Terraform process execution.

use tokio::process::Command;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::options::TerraformOptions;

/// Run terraform with `args` inside the options' directory.
///
/// The child inherits the current environment with the options' `env_vars`
/// merged in, and `TF_IN_AUTOMATION` set so terraform drops its interactive hints.
///
/// # Returns
///
/// The trimmed stdout on success.
///
/// # Errors
///
/// - [`Error::MissingDir`] if the terraform directory does not exist
/// - [`Error::Io`] if the executable cannot be spawned
/// - [`Error::CmdFailed`] with stdout and stderr combined on a non-zero exit
pub async fn run_terraform(options: &TerraformOptions, args: &[String]) -> Result<String> {
  let dir = &options.terraform_dir;
  if !dir.is_dir() {
    return Err(Error::MissingDir(dir.clone()));
  }
  let working_dir = dunce::canonicalize(dir)?;
  let cmd = format!("{} {}", options.terraform_binary, args.join(" "));

  info!(cmd = %cmd, "running terraform");

  let mut command = Command::new(&options.terraform_binary);
  command
    .args(args)
    .current_dir(&working_dir)
    .env("TF_IN_AUTOMATION", "1")
    .envs(&options.env_vars)
    .kill_on_drop(true);

  debug!(cmd = %cmd, working_dir = ?working_dir, "spawning process");

  let output = command.output().await?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  let stderr = String::from_utf8_lossy(&output.stderr);

  if !output.status.success() {
    if !stderr.is_empty() {
      debug!(stderr = %stderr, "command stderr");
    }

    let mut combined = stdout.trim().to_string();
    if !stderr.trim().is_empty() {
      if !combined.is_empty() {
        combined.push('\n');
      }
      combined.push_str(stderr.trim());
    }

    return Err(Error::CmdFailed {
      cmd,
      code: output.status.code(),
      output: combined,
    });
  }

  let stdout = stdout.trim().to_string();
  if !stdout.is_empty() {
    debug!(stdout = %stdout, "command output");
  }

  Ok(stdout)
}
