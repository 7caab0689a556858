//! Access layer for the data being validated.
//!
//! - **Value**: Tagged cell value (missing, boolean, number, string)
//! - **DataType**: Type of a non-missing value
//! - **Dataset**: Read-only row/column access the evaluator works against
//! - **InMemoryDataset**: Row-major dataset for callers that already hold
//!   their data in memory

pub mod dataset;
pub mod value;

pub use dataset::{Dataset, InMemoryDataset};
pub use value::{DataType, Value};
