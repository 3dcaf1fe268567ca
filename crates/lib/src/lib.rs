//! terracycle: drive terraform through an init/apply/destroy cycle.
//!
//! The library wraps the terraform CLI with a retry classifier for transient
//! provider errors and a scoped teardown that always destroys what it applied.
//!
//! ```ignore
//! use terracycle_lib::{TerraformOptions, scope};
//!
//! let options = TerraformOptions::new("../infra").with_default_retryable_errors();
//! scope::init_and_apply_scoped(&options).await?;
//! ```

pub mod args;
pub mod command;
pub mod consts;
pub mod error;
pub mod options;
pub mod retry;
pub mod scope;
pub mod terraform;
pub mod util;

pub use error::{Error, Result};
pub use options::TerraformOptions;
pub use retry::RetryPolicy;
