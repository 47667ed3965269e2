// This code is part of a quantum circuit synthesis toolkit.
//
// This code is licensed under the Apache License, Version 2.0. You may
// obtain a copy of this license in the LICENSE.txt file in the root directory
// of this source tree or at http://www.apache.org/licenses/LICENSE-2.0.

//! Peephole optimiser (C6): cancel adjacent X gates on the same qubit, and drop
//! identity/zero-angle rotations, applied to a fixed point.

use std::f64::consts::PI;

use crate::types::{Axis, Gate};

fn touches(gate: &Gate, q: usize) -> bool {
    match gate {
        Gate::Single { qubit, .. } => *qubit == q,
        Gate::FullyControlled {
            controls, target, ..
        } => *target == q || controls.contains(&q),
    }
}

fn is_x_on(gate: &Gate, q: usize) -> bool {
    matches!(gate, Gate::Single { axis: Axis::X, qubit, .. } if *qubit == q)
}

/// Reduce an angle to the canonical interval `(-pi, pi]`.
fn reduce_angle(theta: f64) -> f64 {
    let mut t = theta % (2.0 * PI);
    if t <= -PI {
        t += 2.0 * PI;
    } else if t > PI {
        t -= 2.0 * PI;
    }
    t
}

fn is_zero_angle_identity(gate: &Gate, tol: f64) -> bool {
    match gate {
        Gate::Single { axis, angle, .. }
            if matches!(axis, Axis::Rx | Axis::Ry | Axis::Rz | Axis::R1) =>
        {
            reduce_angle(*angle).abs() < tol
        }
        _ => false,
    }
}

/// Cancel `Single(X, _, q) .. Single(X, _, q)` pairs where every gate strictly between
/// them is transparent on `q` (targets other qubits, and is not a `FullyControlled`
/// whose control set includes `q`).
fn cancel_x_pairs(gates: &[Gate]) -> Vec<Gate> {
    let mut remove = vec![false; gates.len()];
    let mut i = 0;
    while i < gates.len() {
        if remove[i] {
            i += 1;
            continue;
        }
        if let Gate::Single {
            axis: Axis::X,
            qubit,
            ..
        } = &gates[i]
        {
            let q = *qubit;
            let mut j = i + 1;
            while j < gates.len() {
                if remove[j] {
                    j += 1;
                    continue;
                }
                if touches(&gates[j], q) {
                    break;
                }
                j += 1;
            }
            if j < gates.len() && is_x_on(&gates[j], q) {
                remove[i] = true;
                remove[j] = true;
            }
        }
        i += 1;
    }
    gates
        .iter()
        .zip(remove.iter())
        .filter(|(_, &r)| !r)
        .map(|(g, _)| g.clone())
        .collect()
}

fn drop_identities(gates: &[Gate], tol: f64) -> Vec<Gate> {
    gates
        .iter()
        .filter(|g| !is_zero_angle_identity(g, tol))
        .cloned()
        .collect()
}

/// Run both rewrites to a fixed point. Both rewrites only ever remove gates, so the
/// stream shrinks monotonically; a pass that removes nothing is the fixed point,
/// which also makes the optimiser trivially idempotent (P5).
pub fn peephole_optimize(gates: &[Gate], tol: f64) -> Vec<Gate> {
    let mut current = gates.to_vec();
    loop {
        let before = current.len();
        current = cancel_x_pairs(&current);
        current = drop_identities(&current, tol);
        if current.len() == before {
            break;
        }
    }
    current
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn cancels_adjacent_x_same_qubit() {
        let gates = vec![Gate::x(0), Gate::x(0)];
        let out = peephole_optimize(&gates, 1e-9);
        assert!(out.is_empty());
    }

    #[test]
    fn does_not_cancel_across_intervening_control() {
        let inner = Gate::ry(0.3, 1);
        let gates = vec![
            Gate::x(0),
            Gate::fully_controlled(inner, vec![0], 1),
            Gate::x(0),
        ];
        let out = peephole_optimize(&gates, 1e-9);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn cancels_through_transparent_gate_on_other_qubit() {
        let gates = vec![Gate::x(0), Gate::ry(0.5, 1), Gate::x(0)];
        let out = peephole_optimize(&gates, 1e-9);
        assert_eq!(out.len(), 1);
        assert!(matches!(out[0], Gate::Single { qubit: 1, .. }));
    }

    #[test]
    fn drops_zero_angle_rotation() {
        let gates = vec![Gate::ry(1e-15, 0), Gate::rz(0.0, 0)];
        let out = peephole_optimize(&gates, 1e-9);
        assert!(out.is_empty());
    }

    #[test]
    fn is_idempotent() {
        let gates = vec![
            Gate::x(0),
            Gate::ry(1e-15, 2),
            Gate::x(0),
            Gate::rz(0.7, 1),
        ];
        let once = peephole_optimize(&gates, 1e-9);
        let twice = peephole_optimize(&once, 1e-9);
        assert_eq!(once.len(), twice.len());
    }
}
