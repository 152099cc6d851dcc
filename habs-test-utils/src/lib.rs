//! Test harness shared by HABS unit and integration tests.
//!
//! Tests are written in two phases: a [`TestBuilder`] declares the tables, fixtures, and mock
//! map-provider endpoints a test needs, and the resulting [`TestContext`] exposes the in-memory
//! database, the mock server URL, and fixture helpers for further setup during the test.

pub mod builder;
pub mod constant;
pub mod context;
pub mod error;
pub mod fixtures;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{constant::*, TestBuilder, TestContext, TestError};
}
