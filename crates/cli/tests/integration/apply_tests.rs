//! Apply and init command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn apply_prints_terraform_output() {
  let env = TestEnv::new();

  env
    .cmd()
    .arg("apply")
    .assert()
    .success()
    .stdout(predicate::str::contains("Apply complete!"));

  assert_eq!(env.fake.count("init"), 1);
  assert_eq!(env.fake.count("destroy"), 0);
  assert!(env.fake.is_applied());
}

#[test]
fn apply_passes_vars() {
  let env = TestEnv::new();

  env
    .cmd()
    .args(["--var", "name=web", "--var", "env=ci", "apply"])
    .assert()
    .success();

  let calls = env.fake.calls();
  assert!(
    calls[1].contains("-var env=ci -var name=web"),
    "unexpected apply call: {}",
    calls[1]
  );
}

#[test]
fn apply_rejects_malformed_var() {
  let env = TestEnv::new();

  env
    .cmd()
    .args(["--var", "novalue", "apply"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("KEY=VALUE"));

  assert!(env.fake.calls().is_empty());
}

#[test]
fn apply_retries_transient_errors() {
  let env = TestEnv::new();
  env.fake.fail("apply", 2, "Error: Provider produced inconsistent result after apply");

  env.cmd().arg("apply").assert().success();

  assert_eq!(env.fake.count("apply"), 3);
}

#[test]
fn apply_without_default_retries_fails_fast() {
  let env = TestEnv::new();
  env.fake.fail("apply", 1, "Error: Provider produced inconsistent result after apply");

  env
    .cmd()
    .args(["--no-default-retries", "apply"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("inconsistent result"));

  assert_eq!(env.fake.count("apply"), 1);
}

#[test]
fn init_passes_upgrade() {
  let env = TestEnv::new();

  env
    .cmd()
    .args(["init", "--upgrade"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Initialized"));

  assert_eq!(env.fake.calls(), vec!["init -input=false -upgrade -no-color"]);
}
