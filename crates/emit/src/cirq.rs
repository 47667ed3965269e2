// This code is part of a quantum circuit synthesis toolkit.
//
// This code is licensed under the Apache License, Version 2.0. You may
// obtain a copy of this license in the LICENSE.txt file in the root directory
// of this source tree or at http://www.apache.org/licenses/LICENSE-2.0.

//! External circuit-library emitter (C8, feature `cirq`): build a `roqoqo::Circuit`
//! from a gate stream, using roqoqo's native single- and single-control two-qubit
//! gates where they exist and reusing the ZYZ angles already carried on a gate's
//! inner single-qubit value for the rest.
//!
//! `roqoqo` stands in for the "Cirq" circuit-construction library named upstream: see
//! the crate-level docs for why.

use ndarray::Array2;
use num_complex::Complex64;
use roqoqo::operations::{CNOT, PauliX, RotateX, RotateY, RotateZ, PhaseShiftState1};
use roqoqo::Circuit;

use quantum_decomp_core::{decompose_to_gates, Axis, DecompError, Gate};

fn push_single(circuit: &mut Circuit, axis: Axis, angle: f64, qubit: usize) {
    match axis {
        Axis::X => circuit.add_operation(PauliX::new(qubit)),
        Axis::Rx => circuit.add_operation(RotateX::new(qubit, angle.into())),
        Axis::Ry => circuit.add_operation(RotateY::new(qubit, angle.into())),
        Axis::Rz => circuit.add_operation(RotateZ::new(qubit, angle.into())),
        Axis::R1 => circuit.add_operation(PhaseShiftState1::new(qubit, angle.into())),
    }
}

/// Push a single-control `FullyControlled` gate. `inner` is X: native `CNOT`.
/// Otherwise, use the standard controlled-U-from-CNOT construction (Nielsen & Chuang,
/// Box 4.2): for `inner = e^{i phi} Rz(alpha) Ry(theta) Rz(beta)` (the ZYZ angles C5
/// already extracts), setting
///   `C = Rz((beta - alpha) / 2)`
///   `B = Ry(-theta / 2) . Rz(-(alpha + beta) / 2)`
///   `A = Rz(alpha) . Ry(theta / 2)`
/// gives `A . B . C = I` and `A . X . B . X . C = Rz(alpha) . Ry(theta) . Rz(beta)`, so
/// the sequence `C, CNOT, B, CNOT, A` reproduces `inner` up to the global phase, which
/// is restored with a single `R1(phi)` on the control qubit (diagonal in the control's
/// computational basis, so it commutes with everything else in the sequence and
/// contributes exactly the `e^{i phi}` factor precisely when the control reads |1>).
fn push_single_controlled(circuit: &mut Circuit, inner: &Gate, control: usize, target: usize, tol: f64) {
    if let Gate::Single { axis: Axis::X, .. } = inner {
        circuit.add_operation(CNOT::new(control, target));
        return;
    }
    let (axis, angle) = match inner {
        Gate::Single { axis, angle, .. } => (*axis, *angle),
        Gate::FullyControlled { .. } => {
            unreachable!("this crate's pipeline never nests FullyControlled gates")
        }
    };
    let local = match axis {
        Axis::X => quantum_decomp_core::zyz::x_matrix(),
        Axis::Rx => quantum_decomp_core::zyz::rx_matrix(angle),
        Axis::Ry => quantum_decomp_core::zyz::ry_matrix(angle),
        Axis::Rz => quantum_decomp_core::zyz::rz_matrix(angle),
        Axis::R1 => quantum_decomp_core::zyz::r1_matrix(angle),
    };
    let zyz = quantum_decomp_core::zyz::zyz_decompose(&local, tol);

    push_single(circuit, Axis::Rz, (zyz.beta - zyz.alpha) / 2.0, target);
    circuit.add_operation(CNOT::new(control, target));
    push_single(circuit, Axis::Rz, -(zyz.alpha + zyz.beta) / 2.0, target);
    push_single(circuit, Axis::Ry, -zyz.theta / 2.0, target);
    circuit.add_operation(CNOT::new(control, target));
    push_single(circuit, Axis::Ry, zyz.theta / 2.0, target);
    push_single(circuit, Axis::Rz, zyz.alpha, target);
    push_single(circuit, Axis::R1, zyz.phi, control);
}

/// Build a `roqoqo::Circuit` for `u`. Only gates with `controls.len() <= 1` are
/// representable: `decompose_to_gates` never produces more (see the crate-level
/// mapping notes), so this only rejects hand-built circuits from outside this crate.
pub fn emit_cirq(u: &Array2<Complex64>, optimize: bool) -> Result<Circuit, DecompError> {
    let tol = 1e-9;
    let gates = decompose_to_gates(u, optimize)?;
    let mut circuit = Circuit::new();
    for gate in &gates {
        match gate {
            Gate::Single { axis, angle, qubit } => push_single(&mut circuit, *axis, *angle, *qubit),
            Gate::FullyControlled {
                inner,
                controls,
                target,
            } => match controls.as_slice() {
                [] => {
                    if let Gate::Single { axis, angle, .. } = inner.as_ref() {
                        push_single(&mut circuit, *axis, *angle, *target);
                    }
                }
                [control] => push_single_controlled(&mut circuit, inner, *control, *target, tol),
                _ => return Err(DecompError::CircuitBackendUnavailable),
            },
        }
    }
    Ok(circuit)
}
