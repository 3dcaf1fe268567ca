//! Test utilities for terracycle-lib.
//!
//! [`FakeTerraform`] stands in for the terraform executable so the harness can
//! be exercised without touching real infrastructure. It records every
//! invocation and can be told to fail a subcommand a number of times with a
//! chosen message.

#[cfg(unix)]
use std::path::PathBuf;

#[cfg(unix)]
use tempfile::TempDir;

#[cfg(unix)]
use crate::options::TerraformOptions;

/// Returns the shell command and args to execute a shell script.
#[cfg(unix)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("/bin/sh", vec!["-c".to_string(), script.to_string()])
}

#[cfg(windows)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("cmd.exe", vec!["/C".to_string(), script.to_string()])
}

#[cfg(unix)]
const FAKE_TERRAFORM: &str = r#"#!/bin/sh
state='@STATE@'
cmd="$1"
echo "$*" >> "$state/calls.log"

if [ -f "$state/fail-$cmd" ]; then
  remaining=$(cat "$state/fail-$cmd")
  if [ "$remaining" != "0" ]; then
    if [ "$remaining" != "always" ]; then
      echo $((remaining - 1)) > "$state/fail-$cmd"
    fi
    cat "$state/message-$cmd" >&2
    exit 1
  fi
fi

case "$cmd" in
  init)
    echo "Terraform has been successfully initialized!"
    ;;
  apply)
    if ! ls ./*.tf >/dev/null 2>&1; then
      echo "Error: No configuration files" >&2
      exit 1
    fi
    touch "$state/applied"
    echo "Apply complete! Resources: 1 added, 0 changed, 0 destroyed."
    ;;
  destroy)
    rm -f "$state/applied"
    echo "Destroy complete! Resources: 0 destroyed."
    ;;
  output)
    if [ -f "$state/outputs.json" ]; then
      cat "$state/outputs.json"
    else
      echo "{}"
    fi
    ;;
  *)
    echo "Error: unknown command $cmd" >&2
    exit 1
    ;;
esac
"#;

/// A scripted terraform executable living in a temporary directory.
///
/// Layout:
///
/// ```text
/// <tmp>/
/// ├── bin/terraform     # the fake executable
/// ├── state/            # calls.log, failure counters, outputs.json
/// └── work/             # terraform_dir, holds main.tf unless empty
/// ```
#[cfg(unix)]
pub struct FakeTerraform {
  root: TempDir,
}

#[cfg(unix)]
impl FakeTerraform {
  /// A fake whose working directory holds a `main.tf`.
  pub fn new() -> Self {
    let fake = Self::empty();
    std::fs::write(
      fake.work_dir().join("main.tf"),
      "resource \"terraform_data\" \"example\" {}\n",
    )
    .expect("failed to write main.tf");
    fake
  }

  /// A fake whose working directory holds no definitions.
  pub fn empty() -> Self {
    use std::os::unix::fs::PermissionsExt;

    let root = TempDir::new().expect("failed to create temp dir");
    for dir in ["bin", "state", "work"] {
      std::fs::create_dir_all(root.path().join(dir)).expect("failed to create fake layout");
    }

    let state = root.path().join("state");
    let script = FAKE_TERRAFORM.replace("@STATE@", &state.to_string_lossy());
    let bin = root.path().join("bin").join("terraform");
    std::fs::write(&bin, script).expect("failed to write fake terraform");
    std::fs::set_permissions(&bin, std::fs::Permissions::from_mode(0o755)).expect("failed to chmod fake terraform");

    Self { root }
  }

  pub fn bin_path(&self) -> PathBuf {
    self.root.path().join("bin").join("terraform")
  }

  pub fn work_dir(&self) -> PathBuf {
    self.root.path().join("work")
  }

  fn state_dir(&self) -> PathBuf {
    self.root.path().join("state")
  }

  /// Options pointing at this fake, with no retry policy.
  pub fn options(&self) -> TerraformOptions {
    TerraformOptions::new(self.work_dir()).with_binary(&self.bin_path().to_string_lossy())
  }

  /// Make the next `times` invocations of `subcommand` fail with `message`.
  pub fn fail(&self, subcommand: &str, times: u32, message: &str) {
    self.write_failure(subcommand, &times.to_string(), message);
  }

  /// Make every invocation of `subcommand` fail with `message`.
  pub fn fail_always(&self, subcommand: &str, message: &str) {
    self.write_failure(subcommand, "always", message);
  }

  fn write_failure(&self, subcommand: &str, remaining: &str, message: &str) {
    let state = self.state_dir();
    std::fs::write(state.join(format!("fail-{}", subcommand)), remaining).expect("failed to write counter");
    std::fs::write(state.join(format!("message-{}", subcommand)), message).expect("failed to write message");
  }

  /// JSON printed by `terraform output -json`.
  pub fn set_outputs(&self, json: &str) {
    std::fs::write(self.state_dir().join("outputs.json"), json).expect("failed to write outputs");
  }

  /// Every recorded invocation, one argument string per call.
  pub fn calls(&self) -> Vec<String> {
    std::fs::read_to_string(self.state_dir().join("calls.log"))
      .map(|log| log.lines().map(str::to_string).collect())
      .unwrap_or_default()
  }

  /// Number of invocations of `subcommand`.
  pub fn count(&self, subcommand: &str) -> usize {
    self
      .calls()
      .iter()
      .filter(|call| call.split_whitespace().next() == Some(subcommand))
      .count()
  }

  /// Whether an apply has happened since the last destroy.
  pub fn is_applied(&self) -> bool {
    self.state_dir().join("applied").exists()
  }
}

#[cfg(unix)]
impl Default for FakeTerraform {
  fn default() -> Self {
    Self::new()
  }
}
