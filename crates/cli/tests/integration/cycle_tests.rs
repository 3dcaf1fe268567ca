//! Cycle command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn cycle_applies_then_destroys() {
  let env = TestEnv::new();

  env
    .cmd()
    .arg("cycle")
    .assert()
    .success()
    .stdout(predicate::str::contains("Cycle complete!"));

  let subcommands: Vec<String> = env
    .fake
    .calls()
    .iter()
    .filter_map(|call| call.split_whitespace().next().map(str::to_string))
    .collect();
  assert_eq!(subcommands, vec!["init", "apply", "destroy"]);
}

#[test]
fn cycle_destroys_after_failed_apply() {
  let env = TestEnv::new();
  env.fake.fail_always("apply", "Error: Unsupported block type");

  env
    .cmd()
    .arg("cycle")
    .assert()
    .failure()
    .stderr(predicate::str::contains("Unsupported block type"));

  assert_eq!(env.fake.count("destroy"), 1);
}

#[test]
fn cycle_on_empty_directory_fails() {
  let env = TestEnv::empty();

  env
    .cmd()
    .arg("cycle")
    .assert()
    .failure()
    .stderr(predicate::str::contains("No configuration files"))
    .stderr(predicate::str::contains("Teardown failed").not());

  assert_eq!(env.fake.count("destroy"), 1);
}

#[test]
fn cycle_twice_is_idempotent() {
  let env = TestEnv::new();

  env.cmd().arg("cycle").assert().success();
  env.cmd().arg("cycle").assert().success();

  assert_eq!(env.fake.count("apply"), 2);
  assert_eq!(env.fake.count("destroy"), 2);
  assert!(!env.fake.is_applied());
}

#[test]
fn cycle_logs_json() {
  let env = TestEnv::new();
  env.fake.fail("apply", 1, "Error: TooManyRequests");

  env
    .cmd()
    .args(["--log-format", "json", "cycle"])
    .assert()
    .success()
    .stderr(predicate::str::contains("\"message\":\"retryable error, trying again\""));
}
