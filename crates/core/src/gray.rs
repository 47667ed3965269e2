// This code is part of a quantum circuit synthesis toolkit.
//
// This code is licensed under the Apache License, Version 2.0. You may
// obtain a copy of this license in the LICENSE.txt file in the root directory
// of this source tree or at http://www.apache.org/licenses/LICENSE-2.0.

//! Gray-code path selector (C3): reorder/permute a two-level unitary on indices
//! `(i, j)` so it is expressed as a sequence of two-level unitaries each acting on a
//! pair of indices differing in exactly one bit.

use num_complex::Complex64;

use crate::types::TwoLevel;

fn swap_matrix() -> [[Complex64; 2]; 2] {
    let zero = Complex64::new(0.0, 0.0);
    let one = Complex64::new(1.0, 0.0);
    [[zero, one], [one, zero]]
}

/// The Gray-code path from `i` to `j`: `g_0 = i, .., g_m = j`, consecutive entries
/// differing in one bit, `m = popcount(i xor j)`. Bits are flipped in increasing order
/// of bit position — this tie-break is observable and must stay deterministic.
fn gray_path(i: usize, j: usize) -> Vec<usize> {
    let diff = i ^ j;
    let mut path = Vec::with_capacity(diff.count_ones() as usize + 1);
    let mut cur = i;
    path.push(cur);
    for bit in 0..(usize::BITS as usize) {
        if diff & (1 << bit) != 0 {
            cur ^= 1 << bit;
            path.push(cur);
        }
    }
    path
}

/// Expand a single two-level unitary on `(i, j)` into a sequence whose factors each
/// act on a one-bit-differing index pair.
pub fn gray_code_expand(two_level: &TwoLevel) -> Vec<TwoLevel> {
    let path = gray_path(two_level.i, two_level.j);
    let m = path.len() - 1;
    if m == 1 {
        return vec![two_level.clone()];
    }

    let mut out = Vec::with_capacity(2 * (m - 1) + 1);
    let swap = swap_matrix();
    for t in 0..(m - 1) {
        out.push(TwoLevel::new(path[t], path[t + 1], swap));
    }
    out.push(TwoLevel::new(
        path[m - 1],
        path[m],
        two_level.matrix,
    ));
    for t in (0..(m - 1)).rev() {
        out.push(TwoLevel::new(path[t], path[t + 1], swap));
    }
    out
}
