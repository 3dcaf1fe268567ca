//! Error types for terracycle-lib

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while driving terraform.
#[derive(Debug, Error)]
pub enum Error {
  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),

  #[error("Terraform directory does not exist: {}", .0.display())]
  MissingDir(PathBuf),

  #[error("Invalid retryable error pattern '{pattern}': {source}")]
  InvalidRetryPattern {
    pattern: String,
    #[source]
    source: regex::Error,
  },

  /// The terraform process exited unsuccessfully.
  ///
  /// `output` holds stdout followed by stderr so callers can match on either.
  #[error("'{cmd}' exited with {}: {output}", code_display(.code))]
  CmdFailed {
    cmd: String,
    code: Option<i32>,
    output: String,
  },

  #[error("'{action}' still failing after {attempts} attempts: {source}")]
  RetriesExhausted {
    action: String,
    attempts: u32,
    #[source]
    source: Box<Error>,
  },

  /// Destroy failed during teardown. `body` carries the error the scoped
  /// body returned, if any.
  #[error("Teardown failed: {source}{}", body_display(.body))]
  Teardown {
    #[source]
    source: Box<Error>,
    body: Option<Box<Error>>,
  },

  #[error("Output '{0}' not found")]
  OutputNotFound(String),

  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("Scoped task failed: {0}")]
  Join(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
  /// Combined process output carried by this error, looking through retry wrappers.
  pub fn output(&self) -> Option<&str> {
    match self {
      Error::CmdFailed { output, .. } => Some(output),
      Error::RetriesExhausted { source, .. } => source.output(),
      _ => None,
    }
  }
}

fn code_display(code: &Option<i32>) -> String {
  match code {
    Some(code) => format!("exit code {}", code),
    None => "no exit code (terminated by signal)".to_string(),
  }
}

fn body_display(body: &Option<Box<Error>>) -> String {
  match body {
    Some(err) => format!(" (after: {})", err),
    None => String::new(),
  }
}
