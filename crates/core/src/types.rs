// This code is part of a quantum circuit synthesis toolkit.
//
// This code is licensed under the Apache License, Version 2.0. You may
// obtain a copy of this license in the LICENSE.txt file in the root directory
// of this source tree or at http://www.apache.org/licenses/LICENSE-2.0.

use approx::abs_diff_eq;
use ndarray::Array2;
use num_complex::Complex64;

/// Rotation axis for a single-qubit gate. `X` carries no angle; `R1` is the diagonal
/// global-phase-style gate `diag(1, e^{i theta})`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Rx,
    Ry,
    Rz,
    R1,
}

/// One gate in an application-ordered gate stream.
///
/// `Gate`s carry no identity of their own: two gates are equal iff all fields are equal
/// (angles compared up to tolerance, see [`Gate::approx_eq`]).
#[derive(Debug, Clone)]
pub enum Gate {
    Single {
        axis: Axis,
        angle: f64,
        qubit: usize,
    },
    FullyControlled {
        inner: Box<Gate>,
        controls: Vec<usize>,
        target: usize,
    },
}

impl Gate {
    pub fn x(qubit: usize) -> Gate {
        Gate::Single {
            axis: Axis::X,
            angle: 0.0,
            qubit,
        }
    }

    pub fn rx(angle: f64, qubit: usize) -> Gate {
        Gate::Single {
            axis: Axis::Rx,
            angle,
            qubit,
        }
    }

    pub fn ry(angle: f64, qubit: usize) -> Gate {
        Gate::Single {
            axis: Axis::Ry,
            angle,
            qubit,
        }
    }

    pub fn rz(angle: f64, qubit: usize) -> Gate {
        Gate::Single {
            axis: Axis::Rz,
            angle,
            qubit,
        }
    }

    pub fn r1(angle: f64, qubit: usize) -> Gate {
        Gate::Single {
            axis: Axis::R1,
            angle,
            qubit,
        }
    }

    pub fn fully_controlled(inner: Gate, controls: Vec<usize>, target: usize) -> Gate {
        Gate::FullyControlled {
            inner: Box::new(inner),
            controls,
            target,
        }
    }

    /// Equality up to the given angle tolerance, matching the distilled contract that
    /// two gates are equal iff all fields are equal up to angle tolerance.
    pub fn approx_eq(&self, other: &Gate, tol: f64) -> bool {
        match (self, other) {
            (
                Gate::Single {
                    axis: a1,
                    angle: t1,
                    qubit: q1,
                },
                Gate::Single {
                    axis: a2,
                    angle: t2,
                    qubit: q2,
                },
            ) => a1 == a2 && q1 == q2 && abs_diff_eq!(t1, t2, epsilon = tol),
            (
                Gate::FullyControlled {
                    inner: i1,
                    controls: c1,
                    target: t1,
                },
                Gate::FullyControlled {
                    inner: i2,
                    controls: c2,
                    target: t2,
                },
            ) => t1 == t2 && c1 == c2 && i1.approx_eq(i2, tol),
            _ => false,
        }
    }
}

/// A d x d unitary equal to the identity outside the 2x2 principal subblock on
/// rows/columns (i, j).
#[derive(Debug, Clone)]
pub struct TwoLevel {
    pub i: usize,
    pub j: usize,
    pub matrix: [[Complex64; 2]; 2],
}

impl TwoLevel {
    pub fn new(i: usize, j: usize, matrix: [[Complex64; 2]; 2]) -> Self {
        debug_assert!(i != j, "two-level unitary must act on two distinct indices");
        TwoLevel { i, j, matrix }
    }

    /// Expand to a dense d x d matrix, identity everywhere except the (i, j) subblock.
    pub fn to_dense(&self, d: usize) -> Array2<Complex64> {
        let mut out = Array2::<Complex64>::eye(d);
        out[[self.i, self.i]] = self.matrix[0][0];
        out[[self.i, self.j]] = self.matrix[0][1];
        out[[self.j, self.i]] = self.matrix[1][0];
        out[[self.j, self.j]] = self.matrix[1][1];
        out
    }
}

/// Ordered sequence of [`Gate`]s plus the register size they act on.
#[derive(Debug, Clone)]
pub struct Circuit {
    pub n_qubits: usize,
    pub gates: Vec<Gate>,
}

impl Circuit {
    pub fn new(n_qubits: usize) -> Self {
        Circuit {
            n_qubits,
            gates: Vec::new(),
        }
    }

    pub fn push(&mut self, gate: Gate) {
        self.gates.push(gate);
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }
}
