// This code is part of a quantum circuit synthesis toolkit.
//
// This code is licensed under the Apache License, Version 2.0. You may
// obtain a copy of this license in the LICENSE.txt file in the root directory
// of this source tree or at http://www.apache.org/licenses/LICENSE-2.0.

use thiserror::Error;

/// Every failure mode an entry point in this crate can report.
///
/// All variants are raised at the entry point before any synthesis work commits; there
/// are no partial results and no retries visible to the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecompError {
    #[error("expected a square matrix with side a power of two, got {rows}x{cols}")]
    Shape { rows: usize, cols: usize },

    #[error("input is not unitary: ||U U* - I|| = {residual} exceeds tolerance {tolerance}")]
    NotUnitary { residual: f64, tolerance: f64 },

    #[error("internal invariant failed at stage '{stage}': residual {residual} exceeds tolerance")]
    Numerical { stage: &'static str, residual: f64 },

    #[error("unsupported option: {reason}")]
    UnsupportedOption { reason: String },

    #[error("the external circuit backend is unavailable (crate built without the `cirq` feature, or the gate needs more controls than the backend supports)")]
    CircuitBackendUnavailable,
}
