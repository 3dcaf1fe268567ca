//! Shared helpers for CLI integration tests.

use assert_cmd::Command;
use terracycle_lib::consts::TERRAFORM_BIN_ENV;
use terracycle_lib::util::testutil::FakeTerraform;

/// A fake terraform plus a way to invoke the CLI against it.
pub struct TestEnv {
  pub fake: FakeTerraform,
}

impl TestEnv {
  pub fn new() -> Self {
    Self {
      fake: FakeTerraform::new(),
    }
  }

  pub fn empty() -> Self {
    Self {
      fake: FakeTerraform::empty(),
    }
  }

  /// The `terracycle` binary pointed at the fake, with retries 1ms apart.
  pub fn cmd(&self) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("terracycle"));
    cmd
      .env(TERRAFORM_BIN_ENV, self.fake.bin_path())
      .env_remove("RUST_LOG")
      .arg("--dir")
      .arg(self.fake.work_dir())
      .arg("--retry-delay")
      .arg("1ms");
    cmd
  }
}
