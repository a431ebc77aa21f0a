//! Bilinear transform with frequency pre-warping
//!
//! Maps an analog ZPK set onto the z-plane. The analog prototype is normalized
//! to a 1 rad/s cutoff, so the cutoff scaling and the transform fold into a
//! single constant `m = 1 / tan(π·fc)`:
//!
//! ```text
//!   z = (m + s) / (m - s)
//! ```
//!
//! The open left half s-plane lands inside the unit circle, the imaginary axis
//! on the unit circle, and `s = ∞` on `z = -1`.

use crate::types::{ComplexValue, DesignError, DesignResult, ZpkSet};
use std::f64::consts::PI;

/// Distance from Nyquist below which the pre-warp constant is considered
/// degenerate. Designs still proceed; a warning is logged.
pub const DEGENERATE_CUTOFF_MARGIN: f64 = 1e-3;

/// Compute the pre-warp constant `m = 1 / tan(π·fc)`.
///
/// # Errors
/// [`DesignError::InvalidCutoff`] unless `fc` is finite and in `(0, 0.5)`.
pub fn pre_warp(fc: f64) -> DesignResult<f64> {
    if !fc.is_finite() || fc <= 0.0 || fc >= 0.5 {
        return Err(DesignError::InvalidCutoff(fc));
    }
    Ok(1.0 / (PI * fc).tan())
}

/// Map an analog ZPK set to a digital one.
///
/// Analog zeros are mapped first; the remaining `np - nz` digital zeros are
/// placed at `z = -1` so that numerator and denominator have equal degree.
/// The digital gain is
///
/// ```text
///   kd = ka * Re[ prod(m - za_i) / prod(m - pa_i) ]
/// ```
///
/// which preserves the analog DC response: `H_d(1) = H_a(0)`.
///
/// # Errors
/// - [`DesignError::InvalidCutoff`] for `fc` outside `(0, 0.5)`
/// - [`DesignError::ImproperPrototype`] when the analog set has more zeros than poles
pub fn bilinear_map(analog: &ZpkSet, fc: f64) -> DesignResult<ZpkSet> {
    let m = pre_warp(fc)?;

    let nza = analog.num_zeros();
    let npa = analog.num_poles();
    if nza > npa {
        return Err(DesignError::ImproperPrototype {
            zeros: nza,
            poles: npa,
        });
    }

    if 0.5 - fc < DEGENERATE_CUTOFF_MARGIN {
        tracing::warn!(fc, m, "cutoff near Nyquist, pre-warp constant is degenerate");
    }

    let m_c = ComplexValue::new(m, 0.0);
    let map = |r: &ComplexValue| (m_c + r) / (m_c - r);

    let zeros: Vec<ComplexValue> = analog
        .zeros
        .iter()
        .map(map)
        .chain(std::iter::repeat(ComplexValue::new(-1.0, 0.0)).take(npa - nza))
        .collect();
    let poles: Vec<ComplexValue> = analog.poles.iter().map(map).collect();

    let one = ComplexValue::new(1.0, 0.0);
    let num = analog.zeros.iter().fold(one, |acc, z| acc * (m_c - z));
    let den = analog.poles.iter().fold(one, |acc, p| acc * (m_c - p));
    let gain = analog.gain * (num / den).re;

    tracing::debug!(fc, m, poles = npa, gain = gain.re, "bilinear mapped prototype");

    Ok(ZpkSet::new(zeros, poles, gain))
}
