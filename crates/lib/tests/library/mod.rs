pub mod common;
pub mod example_tests;
