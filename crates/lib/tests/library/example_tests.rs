//! Full provisioning cycle against the definitions in `infra/`.

use terracycle_lib::TerraformOptions;
use terracycle_lib::scope::init_and_apply_scoped;

use super::common::infra_dir;

#[tokio::test]
#[ignore = "requires terraform on PATH"]
async fn terraform_example() {
  let options = TerraformOptions::new(infra_dir()).with_default_retryable_errors();

  init_and_apply_scoped(&options).await.unwrap();
}

#[cfg(unix)]
#[tokio::test]
#[serial_test::serial]
async fn terraform_example_with_binary_override() {
  use terracycle_lib::consts::TERRAFORM_BIN_ENV;
  use terracycle_lib::util::testutil::FakeTerraform;

  let fake = FakeTerraform::new();
  let bin = fake.bin_path();
  let options = temp_env::with_var(TERRAFORM_BIN_ENV, Some(&bin), || {
    TerraformOptions::new(infra_dir()).with_default_retryable_errors()
  });

  init_and_apply_scoped(&options).await.unwrap();

  assert_eq!(fake.count("init"), 1);
  assert_eq!(fake.count("apply"), 1);
  assert_eq!(fake.count("destroy"), 1);
}
