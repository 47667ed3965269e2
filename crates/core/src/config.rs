// This code is part of a quantum circuit synthesis toolkit.
//
// This code is licensed under the Apache License, Version 2.0. You may
// obtain a copy of this license in the LICENSE.txt file in the root directory
// of this source tree or at http://www.apache.org/licenses/LICENSE-2.0.

/// Tolerance and feature toggles shared by every stage of the pipeline.
///
/// `tolerance` is used consistently for zero tests, unitarity checks, and round-trip
/// assertions so a single knob controls all of them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecompConfig {
    pub tolerance: f64,
    pub optimize: bool,
}

impl Default for DecompConfig {
    fn default() -> Self {
        DecompConfig {
            tolerance: 1e-9,
            optimize: false,
        }
    }
}

impl DecompConfig {
    pub fn with_optimize(optimize: bool) -> Self {
        DecompConfig {
            optimize,
            ..Default::default()
        }
    }
}
