// This code is part of a quantum circuit synthesis toolkit.
//
// This code is licensed under the Apache License, Version 2.0. You may
// obtain a copy of this license in the LICENSE.txt file in the root directory
// of this source tree or at http://www.apache.org/licenses/LICENSE-2.0.

//! Boundary emitters consuming `quantum_decomp_core`'s gate stream: a textual Q#
//! renderer (always available) and an in-memory circuit builder (behind the `cirq`
//! feature) targeting `roqoqo`, since no published Rust binding to Python's Cirq
//! exists — `roqoqo` is the real external circuit-construction crate this feature
//! builds against. Neither emitter carries decomposition logic of its own — both call
//! `quantum_decomp_core::decompose_to_gates` and translate its output.

pub mod qsharp;

#[cfg(feature = "cirq")]
pub mod cirq;

pub use qsharp::emit_qsharp;

#[cfg(feature = "cirq")]
pub use cirq::emit_cirq;

#[cfg(not(feature = "cirq"))]
use ndarray::Array2;
#[cfg(not(feature = "cirq"))]
use num_complex::Complex64;
#[cfg(not(feature = "cirq"))]
use quantum_decomp_core::DecompError;

/// Stub present when the crate is built without the `cirq` feature, so downstream
/// code can call `emit_cirq` unconditionally without `cfg`-gating its own call sites.
/// Always returns [`DecompError::CircuitBackendUnavailable`].
#[cfg(not(feature = "cirq"))]
pub fn emit_cirq(_u: &Array2<Complex64>, _optimize: bool) -> Result<(), DecompError> {
    Err(DecompError::CircuitBackendUnavailable)
}
