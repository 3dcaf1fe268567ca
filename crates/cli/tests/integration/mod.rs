pub mod apply_tests;
pub mod common;
pub mod cycle_tests;
pub mod destroy_tests;
pub mod output_tests;
