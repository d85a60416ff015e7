#![allow(
    clippy::missing_errors_doc // error conditions are documented on the Error enum
)]

pub mod classify;
pub mod dex;
pub mod error;
pub mod ir;
pub mod ssa;
pub mod translate;

/// Test harness module for building methods, CFGs and instructions in tests.
///
/// This module is only available when running tests or when the
/// `test-harness` feature is enabled.
#[cfg(any(test, feature = "test-harness"))]
pub mod test_harness;

pub use error::{Error, Result};
pub use ir::{BinaryKind, IrBuilder, Op, Type, Value};
pub use ssa::{BasicBlock, BlockId, LiftOptions, Method};
pub use translate::Lifter;
