//! Retry classifier for transient terraform failures.
//!
//! Terraform talks to registries and provider APIs that fail intermittently.
//! A [`RetryPolicy`] holds a set of compiled patterns; when a failed command's
//! output matches one of them the command is run again after a pause, up to the
//! configured number of retries. Anything that does not match fails at once.

use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;

use regex::Regex;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::options::TerraformOptions;

const PLUGIN_NETWORK_ERROR: &str = "Failed to retrieve plugin due to transient network error.";

/// Known transient error signatures, pattern -> description.
pub fn default_retryable_errors() -> BTreeMap<String, String> {
  [
    (".*read: connection reset by peer.*", "Failed to reach helm charts repository."),
    (".*transport is closing.*", "Failed to reach Kubernetes API."),
    (".*unable to verify signature.*", PLUGIN_NETWORK_ERROR),
    (".*unable to verify checksum.*", PLUGIN_NETWORK_ERROR),
    (".*no provider exists with the given name.*", PLUGIN_NETWORK_ERROR),
    (".*registry service is unreachable.*", PLUGIN_NETWORK_ERROR),
    (".*Error installing provider.*", PLUGIN_NETWORK_ERROR),
    (".*Failed to query available provider packages.*", PLUGIN_NETWORK_ERROR),
    (".*timeout while waiting for plugin to start.*", PLUGIN_NETWORK_ERROR),
    (".*timed out waiting for server handshake.*", PLUGIN_NETWORK_ERROR),
    ("could not query provider registry for", PLUGIN_NETWORK_ERROR),
    (
      ".*Provider produced inconsistent result after apply.*",
      "Provider eventual consistency error.",
    ),
    (
      ".*(Throttling|Rate exceeded|TooManyRequests|429 Too Many Requests).*",
      "Provider API rate limit exceeded.",
    ),
  ]
  .into_iter()
  .map(|(pattern, description)| (pattern.to_string(), description.to_string()))
  .collect()
}

#[derive(Debug, Clone)]
struct RetryableError {
  pattern: Regex,
  description: String,
}

/// Compiled retry classifier plus its budget.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
  errors: Vec<RetryableError>,
  max_retries: u32,
  time_between_retries: Duration,
}

impl RetryPolicy {
  /// A policy that never retries.
  pub fn none() -> Self {
    Self {
      errors: Vec::new(),
      max_retries: 0,
      time_between_retries: Duration::ZERO,
    }
  }

  /// Compile the patterns held in `options`.
  ///
  /// # Errors
  ///
  /// Returns [`Error::InvalidRetryPattern`] for the first pattern that fails to compile.
  pub fn from_options(options: &TerraformOptions) -> Result<Self> {
    let errors = options
      .retryable_errors
      .iter()
      .map(|(pattern, description)| {
        let compiled = Regex::new(pattern).map_err(|source| Error::InvalidRetryPattern {
          pattern: pattern.clone(),
          source,
        })?;
        Ok(RetryableError {
          pattern: compiled,
          description: description.clone(),
        })
      })
      .collect::<Result<Vec<_>>>()?;

    Ok(Self {
      errors,
      max_retries: options.max_retries,
      time_between_retries: options.time_between_retries,
    })
  }

  pub fn max_retries(&self) -> u32 {
    self.max_retries
  }

  /// Description of the first pattern matching `output`, if any.
  pub fn classify(&self, output: &str) -> Option<&str> {
    self.find(output).map(|e| e.description.as_str())
  }

  fn find(&self, output: &str) -> Option<&RetryableError> {
    self.errors.iter().find(|e| e.pattern.is_match(output))
  }

  /// Run `f`, retrying while it fails with a retryable error.
  ///
  /// Errors that carry no process output, or whose output matches no pattern,
  /// are returned unchanged on the first failure.
  ///
  /// # Errors
  ///
  /// Returns [`Error::RetriesExhausted`] wrapping the last error when every
  /// attempt failed with a retryable error.
  pub async fn run<T, F, Fut>(&self, action: &str, mut f: F) -> Result<T>
  where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
  {
    let attempts = self.max_retries.saturating_add(1);
    let mut attempt = 1;

    loop {
      debug!(action = %action, attempt, "running");

      let err = match f().await {
        Ok(value) => return Ok(value),
        Err(err) => err,
      };

      let Some(matched) = err.output().and_then(|output| self.find(output)) else {
        return Err(err);
      };

      if self.max_retries == 0 {
        return Err(err);
      }

      if attempt >= attempts {
        return Err(Error::RetriesExhausted {
          action: action.to_string(),
          attempts,
          source: Box::new(err),
        });
      }

      warn!(
        action = %action,
        attempt,
        pattern = %matched.pattern.as_str(),
        reason = %matched.description,
        delay = %humantime::format_duration(self.time_between_retries),
        "retryable error, trying again"
      );
      tokio::time::sleep(self.time_between_retries).await;
      attempt += 1;
    }
  }
}
