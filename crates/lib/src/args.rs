//! Terraform argument formatting.
//!
//! Every command runs non-interactively (`-input=false`), and apply/destroy
//! skip the approval prompt. Maps are ordered, so output is deterministic.

use crate::options::TerraformOptions;

pub fn init_args(options: &TerraformOptions) -> Vec<String> {
  let mut args = vec!["init".to_string(), "-input=false".to_string()];
  if options.upgrade {
    args.push("-upgrade".to_string());
  }
  for (key, value) in &options.backend_config {
    args.push(format!("-backend-config={}={}", key, value));
  }
  push_no_color(&mut args, options);
  args
}

pub fn apply_args(options: &TerraformOptions) -> Vec<String> {
  mutating_args("apply", options)
}

pub fn destroy_args(options: &TerraformOptions) -> Vec<String> {
  mutating_args("destroy", options)
}

pub fn output_args(options: &TerraformOptions) -> Vec<String> {
  let mut args = vec!["output".to_string(), "-json".to_string()];
  push_no_color(&mut args, options);
  args
}

fn mutating_args(subcommand: &str, options: &TerraformOptions) -> Vec<String> {
  let mut args = vec![
    subcommand.to_string(),
    "-input=false".to_string(),
    "-auto-approve".to_string(),
  ];
  if !options.lock {
    args.push("-lock=false".to_string());
  }
  for (key, value) in &options.vars {
    args.push("-var".to_string());
    args.push(format!("{}={}", key, value));
  }
  for file in &options.var_files {
    args.push("-var-file".to_string());
    args.push(file.to_string_lossy().into_owned());
  }
  push_no_color(&mut args, options);
  args
}

fn push_no_color(args: &mut Vec<String>, options: &TerraformOptions) {
  if options.no_color {
    args.push("-no-color".to_string());
  }
}
