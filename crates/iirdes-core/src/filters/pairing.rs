//! Conjugate root pairing
//!
//! Groups a conjugate-symmetric root set into at most two roots per group so
//! that every group expands to a real quadratic:
//!
//! ```text
//!   conjugate pair a ± bi   ->  z^2 - 2a z + (a^2 + b^2)
//!   real pair r1, r2        ->  z^2 - (r1 + r2) z + r1 r2
//!   lone real root r        ->  z   - r
//! ```
//!
//! Conjugate pairs come first, in the order their first member appears.
//! Real roots follow, paired in the order they appear; an odd leftover real
//! root is the last group. Nothing is sorted by magnitude.

use crate::types::{ComplexValue, DesignError, DesignResult};
use serde::{Deserialize, Serialize};

/// Relative tolerance for matching conjugates and for treating an unmatched
/// root as real.
pub const PAIR_TOLERANCE: f64 = 1e-6;

/// Rounding slack, in units of `ε·|r|`, allowed between conjugate members.
const CONJUGATE_ULPS: f64 = 16.0;

/// One group of roots that expands to a real polynomial of degree 1 or 2.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RootGroup {
    /// A complex-conjugate pair, stored as one member
    Conjugate(ComplexValue),
    /// Two real roots
    RealPair(f64, f64),
    /// A single real root (odd leftover)
    Single(f64),
}

impl RootGroup {
    /// Monic coefficients `[1, c1, c2]`, highest power first.
    ///
    /// A single root is returned as the degenerate quadratic `[1, -r, 0]`.
    pub fn polynomial(&self) -> [f64; 3] {
        match *self {
            RootGroup::Conjugate(r) => [1.0, -2.0 * r.re, r.norm_sqr()],
            RootGroup::RealPair(r1, r2) => [1.0, -(r1 + r2), r1 * r2],
            RootGroup::Single(r) => [1.0, -r, 0.0],
        }
    }

    /// Number of roots in this group
    pub fn root_count(&self) -> usize {
        match self {
            RootGroup::Single(_) => 1,
            _ => 2,
        }
    }
}

/// Partition `roots` into conjugate pairs and real groups.
///
/// Each complex root is first matched with the closest remaining root whose
/// imaginary part has the opposite sign. The match is accepted when it lies
/// within `tol * |im| + CONJUGATE_ULPS * ε * |r|` of the conjugate, so pairs
/// hugging the real axis (low-cutoff designs cluster near `z = 1`) still pair
/// up while a rounded real root never captures a member of another pair.
/// A root without a partner is real when `|im| <= tol * max(1, |r|)`.
///
/// # Errors
/// [`DesignError::UnpairedRoot`] when a complex root has no conjugate within
/// tolerance.
pub fn pair_roots(roots: &[ComplexValue], tol: f64) -> DesignResult<Vec<RootGroup>> {
    let mut used = vec![false; roots.len()];
    let mut groups = Vec::with_capacity(roots.len().div_ceil(2));
    let mut reals = Vec::new();

    for i in 0..roots.len() {
        if used[i] {
            continue;
        }
        used[i] = true;
        let r = roots[i];

        if r.im == 0.0 {
            reals.push(r.re);
            continue;
        }

        let target = r.conj();
        let reach = tol * r.im.abs() + CONJUGATE_ULPS * f64::EPSILON * r.norm();
        let partner = (i + 1..roots.len())
            .filter(|&j| !used[j] && roots[j].im * r.im < 0.0)
            .map(|j| (j, (roots[j] - target).norm()))
            .min_by(|x, y| x.1.total_cmp(&y.1))
            .filter(|&(_, dist)| dist <= reach);

        match partner {
            Some((j, _)) => {
                used[j] = true;
                // Average the two members so the group is exactly symmetric
                let p = roots[j];
                groups.push(RootGroup::Conjugate(ComplexValue::new(
                    0.5 * (r.re + p.re),
                    0.5 * (r.im - p.im),
                )));
            }
            None if r.im.abs() <= tol * r.norm().max(1.0) => reals.push(r.re),
            None => return Err(DesignError::UnpairedRoot { re: r.re, im: r.im }),
        }
    }

    groups.extend(reals.chunks(2).map(|chunk| match *chunk {
        [r1, r2] => RootGroup::RealPair(r1, r2),
        _ => RootGroup::Single(chunk[0]),
    }));

    Ok(groups)
}
