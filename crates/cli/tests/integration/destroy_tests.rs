//! Destroy command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn destroy_removes_applied_state() {
  let env = TestEnv::new();

  env.cmd().arg("apply").assert().success();
  assert!(env.fake.is_applied());

  env
    .cmd()
    .arg("destroy")
    .assert()
    .success()
    .stdout(predicate::str::contains("Destroy complete!"));

  assert!(!env.fake.is_applied());
}

#[test]
fn destroy_without_previous_apply_succeeds() {
  let env = TestEnv::new();

  env.cmd().arg("destroy").assert().success();
}

#[test]
fn destroy_failure_exits_nonzero() {
  let env = TestEnv::new();
  env.fake.fail_always("destroy", "Error: state lock held by another process");

  env
    .cmd()
    .arg("destroy")
    .assert()
    .failure()
    .stderr(predicate::str::contains("Destroy failed"))
    .stderr(predicate::str::contains("state lock held"));
}
