//! gradecalc-core — Grade scales, GPA/CGPA aggregation, and live display.
//!
//! This crate defines the data model, the marks-to-grade-point and
//! score-to-letter scales, the credit-weighted aggregators, and the sheet
//! controllers that the report and CLI crates build on.

pub mod aggregate;
pub mod config;
pub mod display;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod scale;
pub mod sheet;
pub mod traits;

pub use error::CalcError;
pub use model::{AggregationResult, Mode, SemesterEntry, SemesterMode, SubjectRow};
pub use traits::{Calculator, LiveReading};
