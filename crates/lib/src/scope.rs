//! Scoped provisioning with guaranteed teardown.
//!
//! [`with_provisioned`] runs a body against provisioned infrastructure and
//! destroys it afterwards, whether the body returned normally, returned an
//! error or panicked. Destroy runs exactly once per call.

use std::future::Future;

use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::error::{Error, Result};
use crate::options::TerraformOptions;
use crate::terraform;

/// Run `body`, then destroy whatever `options` describes.
///
/// The body is called and awaited on its own task so that a panic inside it (a
/// failed assertion, for instance) is caught, destroy still runs, and the panic
/// is then resumed on the caller. This covers panics raised by `body` itself
/// before it returns its future.
///
/// Dropping the returned future before it completes aborts the body task but
/// does not run destroy; teardown needs the future to be driven to completion.
///
/// # Errors
///
/// - The body's error, if the body failed and destroy succeeded
/// - [`Error::Teardown`] if destroy failed, carrying the body's error if there was one
/// - [`Error::Join`] if the body task was cancelled
pub async fn with_provisioned<T, F, Fut>(options: &TerraformOptions, body: F) -> Result<T>
where
  F: FnOnce(TerraformOptions) -> Fut + Send + 'static,
  Fut: Future<Output = Result<T>> + Send + 'static,
  T: Send + 'static,
{
  let body_options = options.clone();
  let mut task = AbortOnDrop(tokio::spawn(async move { body(body_options).await }));
  let outcome = (&mut task.0).await;

  info!(dir = %options.terraform_dir.display(), "tearing down");
  let teardown = terraform::destroy(options).await;

  let result = match outcome {
    Ok(result) => result,
    Err(join_err) if join_err.is_panic() => {
      if let Err(err) = &teardown {
        error!(error = %err, "destroy failed while unwinding");
      }
      std::panic::resume_unwind(join_err.into_panic());
    }
    Err(join_err) => Err(Error::Join(join_err.to_string())),
  };

  match (result, teardown) {
    (result, Ok(_)) => result,
    (Ok(_), Err(err)) => Err(Error::Teardown {
      source: Box::new(err),
      body: None,
    }),
    (Err(body_err), Err(err)) => Err(Error::Teardown {
      source: Box::new(err),
      body: Some(Box::new(body_err)),
    }),
  }
}

/// Aborts the body task if `with_provisioned` is dropped mid-flight.
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
  fn drop(&mut self) {
    self.0.abort();
  }
}

/// Init and apply `options`, then destroy.
///
/// This is the full provisioning cycle: success means apply finished without a
/// fatal error and the infrastructure was torn down again.
pub async fn init_and_apply_scoped(options: &TerraformOptions) -> Result<String> {
  with_provisioned(options, |options| async move { terraform::init_and_apply(&options).await }).await
}
