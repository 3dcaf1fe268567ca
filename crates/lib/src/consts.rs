use std::time::Duration;

pub const APP_NAME: &str = "terracycle";

/// Environment variable overriding the terraform executable.
pub const TERRAFORM_BIN_ENV: &str = "TERRACYCLE_TERRAFORM_BIN";

pub const DEFAULT_TERRAFORM_BIN: &str = "terraform";

/// Retry budget applied by `with_default_retryable_errors` when none is set.
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_TIME_BETWEEN_RETRIES: Duration = Duration::from_secs(5);
