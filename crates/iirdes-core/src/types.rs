//! Core types for IIR filter design
//!
//! This module defines the value types passed between the design stages and
//! the error type every stage returns.
//!
//! ## Representations
//!
//! A filter moves through three representations:
//!
//! ```text
//!   ZPK:    H(z) = k * prod(z - z_i) / prod(z - p_i)
//!   Direct: H(z) = (b0 + b1 z^-1 + ... + bN z^-N) / (1 + a1 z^-1 + ... + aN z^-N)
//!   SOS:    H(z) = prod_l (b0_l + b1_l z^-1 + b2_l z^-2) / (1 + a1_l z^-1 + a2_l z^-2)
//! ```
//!
//! All of them are immutable once built. A stage borrows its input and hands
//! back a freshly owned result.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Complex value used for roots and gains
pub type ComplexValue = Complex64;

/// Result type for design operations
pub type DesignResult<T> = Result<T, DesignError>;

/// Errors that can occur while designing or converting a filter
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DesignError {
    #[error("Invalid filter order: {0}. Must be between 1 and {max}", max = crate::filters::MAX_ORDER)]
    InvalidOrder(usize),

    #[error("Invalid cutoff frequency: {0}. Must be strictly between 0 and 0.5 cycles/sample")]
    InvalidCutoff(f64),

    #[error("Root count mismatch: {zeros} zeros, {poles} poles (expected equal counts)")]
    RootCountMismatch { zeros: usize, poles: usize },

    #[error("Improper prototype: {zeros} zeros exceed {poles} poles")]
    ImproperPrototype { zeros: usize, poles: usize },

    #[error("Complex root {re} + {im}i has no conjugate partner")]
    UnpairedRoot { re: f64, im: f64 },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DesignError {
    /// Check if this error is a caller contract violation on design inputs
    pub fn is_configuration_error(&self) -> bool {
        !matches!(self, DesignError::Config(_))
    }
}

/// Zero-pole-gain filter representation.
///
/// Used for both the analog (s-plane) prototype and the digital (z-plane)
/// design. For a real-coefficient filter, every non-real root has its
/// conjugate somewhere in the same sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZpkSet {
    /// Zeros, in discovery order
    pub zeros: Vec<ComplexValue>,
    /// Poles, in discovery order
    pub poles: Vec<ComplexValue>,
    /// Scalar gain
    pub gain: ComplexValue,
}

impl ZpkSet {
    pub fn new(zeros: Vec<ComplexValue>, poles: Vec<ComplexValue>, gain: ComplexValue) -> Self {
        Self { zeros, poles, gain }
    }

    /// Number of zeros (`nz`)
    pub fn num_zeros(&self) -> usize {
        self.zeros.len()
    }

    /// Number of poles (`np`)
    pub fn num_poles(&self) -> usize {
        self.poles.len()
    }

    /// Check that zeros and poles are each closed under conjugation.
    pub fn is_conjugate_symmetric(&self, tol: f64) -> bool {
        is_conjugate_closed(&self.zeros, tol) && is_conjugate_closed(&self.poles, tol)
    }
}

fn is_conjugate_closed(roots: &[ComplexValue], tol: f64) -> bool {
    roots.iter().all(|r| {
        r.im.abs() <= tol || roots.iter().any(|other| (other - r.conj()).norm() <= tol)
    })
}

/// Direct-form transfer function.
///
/// Coefficients are in descending power order: `b[0]` multiplies `z^N`
/// (equivalently `z^0` after dividing through by `z^N`). `a[0]` is always 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferFunction {
    /// Numerator coefficients
    pub b: Vec<f64>,
    /// Denominator coefficients
    pub a: Vec<f64>,
}

impl TransferFunction {
    pub fn new(b: Vec<f64>, a: Vec<f64>) -> Self {
        Self { b, a }
    }

    /// Filter order (max of numerator and denominator degrees)
    pub fn order(&self) -> usize {
        self.b.len().max(self.a.len()).saturating_sub(1)
    }

    /// Evaluate `H(e^{j2πf})` at normalized frequency `f` (cycles/sample).
    pub fn frequency_response(&self, f: f64) -> ComplexValue {
        let z_inv = ComplexValue::from_polar(1.0, -2.0 * PI * f);
        eval_descending(&self.b, z_inv) / eval_descending(&self.a, z_inv)
    }

    /// Magnitude response in dB at normalized frequency `f`.
    pub fn magnitude_db(&self, f: f64) -> f64 {
        20.0 * self.frequency_response(f).norm().log10()
    }
}

/// Evaluate `c[0] + c[1] z^-1 + ... ` with Horner's rule in `z^-1`.
pub(crate) fn eval_descending(coeffs: &[f64], z_inv: ComplexValue) -> ComplexValue {
    coeffs
        .iter()
        .rev()
        .fold(ComplexValue::new(0.0, 0.0), |acc, &c| acc * z_inv + c)
}

/// A single biquad section.
///
/// `H(z) = (b0 + b1 z^-1 + b2 z^-2) / (a0 + a1 z^-1 + a2 z^-2)` with `a0 = 1`.
/// A first-order section is stored with `b2 = a2 = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Numerator coefficients [b0, b1, b2]
    pub b: [f64; 3],
    /// Denominator coefficients [a0, a1, a2]
    pub a: [f64; 3],
}

impl Section {
    pub fn new(b: [f64; 3], a: [f64; 3]) -> Self {
        Self { b, a }
    }

    /// Flattened `[b0, b1, b2, a0, a1, a2]`
    pub fn coefficients(&self) -> [f64; 6] {
        [self.b[0], self.b[1], self.b[2], self.a[0], self.a[1], self.a[2]]
    }

    /// Check if this section is stable (poles inside unit circle).
    pub fn is_stable(&self) -> bool {
        // For 1 + a1*z^-1 + a2*z^-2 the stability triangle is
        // |a2| < 1 and |a1| < 1 + a2
        let (a1, a2) = (self.a[1] / self.a[0], self.a[2] / self.a[0]);
        a2.abs() < 1.0 && a1.abs() < 1.0 + a2
    }

    /// Evaluate this section at `z^-1`.
    pub fn response_at(&self, z_inv: ComplexValue) -> ComplexValue {
        eval_descending(&self.b, z_inv) / eval_descending(&self.a, z_inv)
    }
}

/// Cascade of second-order sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondOrderSections {
    pub sections: Vec<Section>,
}

impl SecondOrderSections {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// Number of sections (`L`)
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Multiply the cascade out into a single direct-form transfer function.
    ///
    /// The result has `2L + 1` coefficients; a trailing zero appears when the
    /// last section is first-order.
    pub fn to_transfer_function(&self) -> TransferFunction {
        let (b, a) = self
            .sections
            .iter()
            .fold((vec![1.0], vec![1.0]), |(b, a), s| {
                (poly_mul(&b, &s.b), poly_mul(&a, &s.a))
            });
        TransferFunction::new(b, a)
    }

    /// Evaluate the cascade at normalized frequency `f` (cycles/sample).
    pub fn frequency_response(&self, f: f64) -> ComplexValue {
        let z_inv = ComplexValue::from_polar(1.0, -2.0 * PI * f);
        self.sections
            .iter()
            .fold(ComplexValue::new(1.0, 0.0), |acc, s| acc * s.response_at(z_inv))
    }

    /// Check if every section is stable.
    pub fn is_stable(&self) -> bool {
        self.sections.iter().all(Section::is_stable)
    }
}

/// Real polynomial product (coefficient convolution)
fn poly_mul(p: &[f64], q: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; p.len() + q.len() - 1];
    for (i, &pi) in p.iter().enumerate() {
        for (j, &qj) in q.iter().enumerate() {
            out[i + j] += pi * qj;
        }
    }
    out
}
