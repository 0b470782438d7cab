//! Core trait definitions.
//!
//! A [`Calculator`] is whatever owns the current form state for a page. The
//! live display is handed one explicitly instead of looking it up.

use serde::{Deserialize, Serialize};

use crate::error::CalcError;
use crate::model::{AggregationResult, Mode};

/// A page controller that can be recomputed at any time.
pub trait Calculator {
    /// Which calculator this is.
    fn mode(&self) -> Mode;

    /// Explicit "Calculate": fails when nothing is valid.
    fn calculate(&self) -> Result<AggregationResult, CalcError>;

    /// Best-effort reading for the live summary. Never fails.
    fn live_reading(&self) -> LiveReading;
}

/// What the live summary shows before formatting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiveReading {
    /// Current GPA or CGPA (0.0 when nothing is valid yet).
    pub value: f64,
    /// Valid credits for a GPA sheet, semester count for a CGPA sheet.
    pub auxiliary: f64,
}
