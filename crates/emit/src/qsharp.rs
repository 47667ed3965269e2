// This code is part of a quantum circuit synthesis toolkit.
//
// This code is licensed under the Apache License, Version 2.0. You may
// obtain a copy of this license in the LICENSE.txt file in the root directory
// of this source tree or at http://www.apache.org/licenses/LICENSE-2.0.

//! Q# textual emitter (C8): render a gate stream as a single Q# operation block.

use num_complex::Complex64;
use quantum_decomp_core::{decompose_to_gates, Axis, DecompError, Gate};

use ndarray::Array2;

/// Q# spells its rotations with the opposite sign convention from the gate stream this
/// crate's core produces, so every angle is negated on the way out. This is a
/// user-visible contract, not a bug: `Rz(-theta, qs[q])` in the emitted text and
/// `Rz(theta, q)` in the internal `Gate` value describe the same physical rotation
/// under Q#'s convention.
fn qsharp_angle(theta: f64) -> f64 {
    -theta
}

fn axis_name(axis: Axis) -> &'static str {
    match axis {
        Axis::X => "X",
        Axis::Rx => "Rx",
        Axis::Ry => "Ry",
        Axis::Rz => "Rz",
        Axis::R1 => "R1",
    }
}

fn emit_gate(gate: &Gate, out: &mut String) {
    match gate {
        Gate::Single { axis: Axis::X, qubit, .. } => {
            out.push_str(&format!("  X(qs[{qubit}]);\n"));
        }
        Gate::Single { axis, angle, qubit } => {
            out.push_str(&format!(
                "  {}({}, qs[{}]);\n",
                axis_name(*axis),
                qsharp_angle(*angle),
                qubit
            ));
        }
        Gate::FullyControlled {
            inner,
            controls,
            target,
        } => {
            // A single-controlled X is spelled CNOT, matching how Q#'s standard
            // library names this specific case rather than the generic `Controlled`
            // functor form.
            if controls.len() == 1 {
                if let Gate::Single { axis: Axis::X, .. } = inner.as_ref() {
                    out.push_str(&format!("  CNOT(qs[{}],qs[{}]);\n", controls[0], target));
                    return;
                }
            }
            let control_list = controls
                .iter()
                .map(|c| format!("qs[{c}]"))
                .collect::<Vec<_>>()
                .join(", ");
            match inner.as_ref() {
                Gate::Single { axis: Axis::X, .. } => {
                    out.push_str(&format!(
                        "  Controlled X([{control_list}], (qs[{target}]));\n"
                    ));
                }
                Gate::Single { axis, angle, .. } => {
                    out.push_str(&format!(
                        "  Controlled {}([{}], ({}, qs[{}]));\n",
                        axis_name(*axis),
                        control_list,
                        qsharp_angle(*angle),
                        target
                    ));
                }
                Gate::FullyControlled { .. } => {
                    unreachable!("this crate's pipeline never nests FullyControlled gates")
                }
            }
        }
    }
}

/// Render `u` as a single Q# operation named `op_name`, taking a `Qubit[]` register.
pub fn emit_qsharp(u: &Array2<Complex64>, op_name: &str, optimize: bool) -> Result<String, DecompError> {
    let gates = decompose_to_gates(u, optimize)?;
    let mut body = String::new();
    for gate in &gates {
        emit_gate(gate, &mut body);
    }
    Ok(format!(
        "operation {op_name} (qs : Qubit[]) : Unit {{\n{body}}}\n"
    ))
}
