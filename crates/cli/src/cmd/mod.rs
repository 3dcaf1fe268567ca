mod apply;
mod cycle;
mod destroy;
mod init;
mod output;

pub use apply::cmd_apply;
pub use cycle::cmd_cycle;
pub use destroy::cmd_destroy;
pub use init::cmd_init;
pub use output::cmd_output;

use anyhow::{Context, Result};
use tokio::runtime::Runtime;

fn runtime() -> Result<Runtime> {
  Runtime::new().context("Failed to create async runtime")
}
