//! Output command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

const OUTPUTS: &str = r#"{
  "name": {"sensitive": false, "type": "string", "value": "terracycle-example"},
  "id": {"sensitive": false, "type": "string", "value": "0d6f5b0e"}
}"#;

#[test]
fn output_prints_all_values() {
  let env = TestEnv::new();
  env.fake.set_outputs(OUTPUTS);

  env
    .cmd()
    .arg("output")
    .assert()
    .success()
    .stdout(predicate::str::contains("\"name\": \"terracycle-example\""))
    .stdout(predicate::str::contains("\"id\": \"0d6f5b0e\""));
}

#[test]
fn output_prints_single_value() {
  let env = TestEnv::new();
  env.fake.set_outputs(OUTPUTS);

  env
    .cmd()
    .args(["output", "name"])
    .assert()
    .success()
    .stdout(predicate::str::diff("\"terracycle-example\"\n"));
}

#[test]
fn output_missing_key_fails() {
  let env = TestEnv::new();

  env
    .cmd()
    .args(["output", "nope"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Output 'nope' not found"));
}
