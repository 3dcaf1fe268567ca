#[cfg(any(test, feature = "testutil"))]
pub mod testutil;
