// This code is part of a quantum circuit synthesis toolkit.
//
// This code is licensed under the Apache License, Version 2.0. You may
// obtain a copy of this license in the LICENSE.txt file in the root directory
// of this source tree or at http://www.apache.org/licenses/LICENSE-2.0.

//! Unitary-to-gate-sequence synthesis: decompose an arbitrary `2^n x 2^n` unitary
//! into an ordered stream of single-qubit and fully-controlled single-qubit gates.
//!
//! The default pipeline factors `u` into two-level unitaries ([`two_level`]), routes
//! each along a Gray-code path to a single-bit-differing index pair ([`gray`]),
//! synthesizes the result as a fully-controlled rotation ([`controlled`], itself built
//! on the single-qubit ZYZ decomposition in [`zyz`]), and runs a peephole cleanup pass
//! ([`optimize`]). Two-qubit input can instead take the dedicated Magic-basis/
//! Weyl-chamber path in [`two_qubit`], which bounds the controlled-X count to 3
//! instead of whatever count the general pipeline produces.

pub mod config;
pub mod controlled;
pub mod error;
pub mod gray;
pub mod linalg;
pub mod optimize;
pub mod two_level;
pub mod two_qubit;
pub mod types;
pub mod zyz;

use ndarray::Array2;
use num_complex::Complex64;

pub use config::DecompConfig;
pub use error::DecompError;
pub use types::{Axis, Circuit, Gate, TwoLevel};

/// Decompose `u` into an ordered gate stream using the default configuration
/// (`tolerance = 1e-9`, `optimize` as given).
pub fn decompose_to_gates(u: &Array2<Complex64>, optimize: bool) -> Result<Vec<Gate>, DecompError> {
    decompose_to_gates_with_config(u, &DecompConfig::with_optimize(optimize))
}

/// Decompose `u` into an ordered gate stream under an explicit [`DecompConfig`].
///
/// Validates `u` first (square, power-of-two side, unitary within `config.tolerance`).
/// When `config.optimize` is set and `u` is exactly 4x4, dispatches to the dedicated
/// two-qubit path ([`two_qubit::synthesize_optimal_two_qubit`]); `optimize` on any
/// other size is rejected, since the general pipeline has no comparable optimal-count
/// guarantee to offer there. Otherwise runs two-level decomposition, Gray-code
/// routing, and fully-controlled synthesis per factor, followed by a peephole
/// optimization pass that is always applied regardless of `config.optimize` (it only
/// ever removes redundant gates, never changes which path was used to produce them).
pub fn decompose_to_gates_with_config(
    u: &Array2<Complex64>,
    config: &DecompConfig,
) -> Result<Vec<Gate>, DecompError> {
    let d = linalg::validate_unitary(u.view(), config.tolerance)?;
    let n = linalg::num_qubits(d);
    log::debug!("decompose_to_gates: {n}-qubit register, optimize={}", config.optimize);

    if config.optimize {
        if n != 2 {
            return Err(DecompError::UnsupportedOption {
                reason: format!(
                    "optimal synthesis is only implemented for 2-qubit (4x4) input, got {n} qubits"
                ),
            });
        }
        log::debug!("dispatching to optimal two-qubit (Magic-basis/Weyl) synthesis");
        let gates = two_qubit::synthesize_optimal_two_qubit(u, config.tolerance)?;
        let optimized = optimize::peephole_optimize(&gates, config.tolerance);
        log::debug!(
            "optimal two-qubit synthesis: {} gates before peephole, {} after",
            gates.len(),
            optimized.len()
        );
        return Ok(optimized);
    }

    let two_level_factors = two_level::two_level_decompose(u, config.tolerance);
    log::debug!("two-level decomposition: {} factors", two_level_factors.len());

    let mut gates = Vec::new();
    for factor in &two_level_factors {
        let expanded = gray::gray_code_expand(factor);
        for tl in &expanded {
            gates.extend(controlled::synthesize_fully_controlled(tl, n, config.tolerance));
        }
    }

    let before = gates.len();
    let optimized = optimize::peephole_optimize(&gates, config.tolerance);
    log::debug!(
        "fully-controlled synthesis: {before} gates before peephole, {} after",
        optimized.len()
    );
    Ok(optimized)
}

/// Decompose `u` into two-level unitary factors only, skipping Gray-code routing and
/// gate synthesis. Useful for inspecting the intermediate factorization, or for
/// callers that want to apply their own synthesis strategy to each factor.
pub fn decompose_to_two_level(u: &Array2<Complex64>) -> Result<Vec<TwoLevel>, DecompError> {
    decompose_to_two_level_with_config(u, &DecompConfig::default())
}

/// As [`decompose_to_two_level`], under an explicit [`DecompConfig`]. `config.optimize`
/// has no effect here: two-level factorization has only one implementation.
pub fn decompose_to_two_level_with_config(
    u: &Array2<Complex64>,
    config: &DecompConfig,
) -> Result<Vec<TwoLevel>, DecompError> {
    linalg::validate_unitary(u.view(), config.tolerance)?;
    let factors = two_level::two_level_decompose(u, config.tolerance);
    log::debug!("decompose_to_two_level: {} factors", factors.len());
    Ok(factors)
}

/// Reassemble a gate stream into its dense `2^n x 2^n` matrix, application order
/// first-to-last. Intended for tests and diagnostics, not the synthesis hot path.
pub fn reconstruct_matrix(gates: &[Gate], n: usize) -> Array2<Complex64> {
    let d = 1usize << n;
    let mut acc = Array2::<Complex64>::eye(d);
    for gate in gates {
        let m = gate_matrix(gate, n);
        acc = m.dot(&acc);
    }
    acc
}

fn gate_matrix(gate: &Gate, n: usize) -> Array2<Complex64> {
    match gate {
        Gate::Single { axis, angle, qubit } => {
            let local = axis_matrix(*axis, *angle);
            linalg::embed_single_qubit(&local, *qubit, n)
        }
        Gate::FullyControlled {
            inner,
            controls,
            target,
        } => {
            let local = match inner.as_ref() {
                Gate::Single { axis, angle, .. } => axis_matrix(*axis, *angle),
                Gate::FullyControlled { .. } => {
                    panic!("nested FullyControlled gates are not produced by this crate")
                }
            };
            linalg::embed_fully_controlled(&local, controls, *target, n)
        }
    }
}

fn axis_matrix(axis: Axis, angle: f64) -> [[Complex64; 2]; 2] {
    match axis {
        Axis::X => zyz::x_matrix(),
        Axis::Rx => zyz::rx_matrix(angle),
        Axis::Ry => zyz::ry_matrix(angle),
        Axis::Rz => zyz::rz_matrix(angle),
        Axis::R1 => zyz::r1_matrix(angle),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn swap_matrix() -> Array2<Complex64> {
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        Array2::from_shape_vec(
            (4, 4),
            vec![
                one, zero, zero, zero, //
                zero, zero, one, zero, //
                zero, one, zero, zero, //
                zero, zero, zero, one,
            ],
        )
        .unwrap()
    }

    #[test]
    fn identity_any_n_yields_no_gates() {
        for n in [1, 2, 3] {
            let d = 1usize << n;
            let u = Array2::<Complex64>::eye(d);
            let gates = decompose_to_gates(&u, false).unwrap();
            assert!(gates.is_empty(), "n={n} identity should need no gates");
        }
    }

    #[test]
    fn pauli_x_single_qubit_round_trips() {
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        let x = Array2::from_shape_vec((2, 2), vec![zero, one, one, zero]).unwrap();
        let gates = decompose_to_gates(&x, false).unwrap();
        let back = reconstruct_matrix(&gates, 1);
        assert_abs_diff_eq!(
            linalg::frobenius_distance(back.view(), x.view()),
            0.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn swap_round_trips_through_full_pipeline() {
        let u = swap_matrix();
        let gates = decompose_to_gates(&u, false).unwrap();
        let back = reconstruct_matrix(&gates, 2);
        assert_abs_diff_eq!(
            linalg::frobenius_distance(back.view(), u.view()),
            0.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn hadamard_round_trips_through_full_pipeline() {
        let s = std::f64::consts::FRAC_1_SQRT_2;
        let h = Array2::from_shape_vec(
            (2, 2),
            vec![
                Complex64::new(s, 0.0),
                Complex64::new(s, 0.0),
                Complex64::new(s, 0.0),
                Complex64::new(-s, 0.0),
            ],
        )
        .unwrap();
        let gates = decompose_to_gates(&h, false).unwrap();
        let back = reconstruct_matrix(&gates, 1);
        assert_abs_diff_eq!(
            linalg::frobenius_distance(back.view(), h.view()),
            0.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn swap_round_trips_with_optimize_on() {
        let u = swap_matrix();
        let gates = decompose_to_gates(&u, true).unwrap();
        let back = reconstruct_matrix(&gates, 2);
        assert_abs_diff_eq!(
            linalg::frobenius_distance(back.view(), u.view()),
            0.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn optimize_on_larger_register_is_rejected() {
        let u = Array2::<Complex64>::eye(8);
        let err = decompose_to_gates(&u, true).unwrap_err();
        assert!(matches!(err, DecompError::UnsupportedOption { .. }));
    }

    #[test]
    fn non_unitary_input_is_rejected_before_any_synthesis() {
        let mut m = Array2::<Complex64>::eye(2);
        m[[0, 1]] = Complex64::new(1.0, 0.0);
        let err = decompose_to_gates(&m, false).unwrap_err();
        assert!(matches!(err, DecompError::NotUnitary { .. }));
    }

    #[test]
    fn two_level_factorization_matches_default_tolerance() {
        let u = swap_matrix();
        let factors = decompose_to_two_level(&u).unwrap();
        assert!(!factors.is_empty());
    }
}
