//! Options for a terraform run.
//!
//! [`TerraformOptions`] is created once per run and handed by reference to every
//! operation in [`crate::terraform`]. It is never mutated after construction;
//! the builder methods consume and return `self`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{
  DEFAULT_MAX_RETRIES, DEFAULT_TERRAFORM_BIN, DEFAULT_TIME_BETWEEN_RETRIES, TERRAFORM_BIN_ENV,
};
use crate::retry::default_retryable_errors;

/// Configuration for running terraform against a directory of definitions.
///
/// # Example
///
/// ```
/// use terracycle_lib::TerraformOptions;
///
/// let options = TerraformOptions::new("../infra")
///   .with_var("region", "eu-west-1")
///   .with_default_retryable_errors();
///
/// assert_eq!(options.max_retries, 3);
/// assert!(!options.retryable_errors.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerraformOptions {
  /// Directory holding the terraform definitions.
  pub terraform_dir: PathBuf,
  /// Executable to invoke.
  pub terraform_binary: String,
  /// Values passed with `-var key=value`.
  pub vars: BTreeMap<String, String>,
  /// Files passed with `-var-file`.
  pub var_files: Vec<PathBuf>,
  /// Values passed to `init` with `-backend-config key=value`.
  pub backend_config: BTreeMap<String, String>,
  /// Extra environment variables for the terraform process.
  pub env_vars: BTreeMap<String, String>,
  /// Pass `-no-color`.
  pub no_color: bool,
  /// When false, pass `-lock=false` to apply and destroy.
  pub lock: bool,
  /// Pass `-upgrade` to init.
  pub upgrade: bool,
  /// Regex pattern -> description of errors that should be retried.
  pub retryable_errors: BTreeMap<String, String>,
  /// Retries after the first attempt. Zero disables retrying.
  pub max_retries: u32,
  /// Pause before each retry.
  pub time_between_retries: Duration,
}

impl TerraformOptions {
  /// Create options for `dir` with no retry policy.
  ///
  /// The terraform executable is taken from `TERRACYCLE_TERRAFORM_BIN` when set.
  pub fn new(dir: impl AsRef<Path>) -> Self {
    let terraform_binary = std::env::var(TERRAFORM_BIN_ENV)
      .ok()
      .filter(|bin| !bin.is_empty())
      .unwrap_or_else(|| DEFAULT_TERRAFORM_BIN.to_string());

    Self {
      terraform_dir: dir.as_ref().to_path_buf(),
      terraform_binary,
      vars: BTreeMap::new(),
      var_files: Vec::new(),
      backend_config: BTreeMap::new(),
      env_vars: BTreeMap::new(),
      no_color: true,
      lock: true,
      upgrade: false,
      retryable_errors: BTreeMap::new(),
      max_retries: 0,
      time_between_retries: Duration::ZERO,
    }
  }

  pub fn with_binary(mut self, binary: &str) -> Self {
    self.terraform_binary = binary.to_string();
    self
  }

  pub fn with_var(mut self, key: &str, value: &str) -> Self {
    self.vars.insert(key.to_string(), value.to_string());
    self
  }

  pub fn with_var_file(mut self, path: impl AsRef<Path>) -> Self {
    self.var_files.push(path.as_ref().to_path_buf());
    self
  }

  pub fn with_backend_config(mut self, key: &str, value: &str) -> Self {
    self.backend_config.insert(key.to_string(), value.to_string());
    self
  }

  pub fn with_env(mut self, key: &str, value: &str) -> Self {
    self.env_vars.insert(key.to_string(), value.to_string());
    self
  }

  pub fn with_no_color(mut self, no_color: bool) -> Self {
    self.no_color = no_color;
    self
  }

  pub fn with_lock(mut self, lock: bool) -> Self {
    self.lock = lock;
    self
  }

  pub fn with_upgrade(mut self, upgrade: bool) -> Self {
    self.upgrade = upgrade;
    self
  }

  /// Treat output matching `pattern` as transient.
  pub fn with_retryable_error(mut self, pattern: &str, description: &str) -> Self {
    self
      .retryable_errors
      .insert(pattern.to_string(), description.to_string());
    self
  }

  pub fn with_max_retries(mut self, max_retries: u32) -> Self {
    self.max_retries = max_retries;
    self
  }

  pub fn with_time_between_retries(mut self, delay: Duration) -> Self {
    self.time_between_retries = delay;
    self
  }

  /// Attach the default transient-error classifier.
  ///
  /// Patterns already present win over the defaults. A zero retry budget is
  /// raised to 3 retries, 5 seconds apart.
  pub fn with_default_retryable_errors(mut self) -> Self {
    for (pattern, description) in default_retryable_errors() {
      self.retryable_errors.entry(pattern).or_insert(description);
    }
    if self.max_retries == 0 {
      self.max_retries = DEFAULT_MAX_RETRIES;
    }
    if self.time_between_retries.is_zero() {
      self.time_between_retries = DEFAULT_TIME_BETWEEN_RETRIES;
    }
    self
  }
}
