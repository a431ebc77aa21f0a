//! ZPK to direct-form transfer function
//!
//! Expands `k * prod(z - z_i)` and `prod(z - p_i)` one root at a time. The
//! root sets are conjugate-symmetric, so the expanded coefficients are real up
//! to rounding; whatever imaginary residue is left gets dropped.

use crate::types::{ComplexValue, DesignError, DesignResult, TransferFunction, ZpkSet};

/// Largest imaginary residue (relative to the largest coefficient magnitude)
/// tolerated silently when discarding the imaginary part of an expansion.
///
/// Residues above this are still discarded, but reported with `tracing::warn!`.
pub const IMAG_TOLERANCE: f64 = 1e-6;

/// Convert a digital ZPK set into `(b, a)` transfer-function coefficients.
///
/// Both sequences have `order + 1` entries, highest power first, with
/// `a[0] = 1`.
///
/// # Errors
/// - [`DesignError::RootCountMismatch`] unless `nz == np`
/// - [`DesignError::InvalidOrder`] for an empty root set
pub fn zpk_to_transfer_function(zpk: &ZpkSet) -> DesignResult<TransferFunction> {
    if zpk.num_zeros() != zpk.num_poles() {
        return Err(DesignError::RootCountMismatch {
            zeros: zpk.num_zeros(),
            poles: zpk.num_poles(),
        });
    }
    if zpk.num_poles() == 0 {
        return Err(DesignError::InvalidOrder(0));
    }

    let a_monic = poly_from_roots(&zpk.poles);
    let a0 = a_monic[0];
    let b: Vec<ComplexValue> = poly_from_roots(&zpk.zeros)
        .into_iter()
        .map(|c| c * zpk.gain / a0)
        .collect();
    let a: Vec<ComplexValue> = a_monic.into_iter().map(|c| c / a0).collect();

    let b = discard_imaginary(&b, "numerator");
    let a = discard_imaginary(&a, "denominator");

    tracing::debug!(order = zpk.num_poles(), "expanded zpk into transfer function");

    Ok(TransferFunction::new(b, a))
}

/// Expand `prod(z - r_i)` into monic coefficients, highest power first.
pub(crate) fn poly_from_roots(roots: &[ComplexValue]) -> Vec<ComplexValue> {
    let mut poly = Vec::with_capacity(roots.len() + 1);
    poly.push(ComplexValue::new(1.0, 0.0));

    for r in roots {
        // Multiply by (z - r): c'[i] = c[i] - r * c[i-1]
        poly.push(ComplexValue::new(0.0, 0.0));
        for i in (1..poly.len()).rev() {
            poly[i] = poly[i] - r * poly[i - 1];
        }
    }
    poly
}

fn discard_imaginary(coeffs: &[ComplexValue], which: &str) -> Vec<f64> {
    let scale = coeffs.iter().map(|c| c.norm()).fold(0.0, f64::max).max(f64::MIN_POSITIVE);
    let residual = coeffs.iter().map(|c| c.im.abs()).fold(0.0, f64::max) / scale;

    if residual > IMAG_TOLERANCE {
        tracing::warn!(
            residual,
            tolerance = IMAG_TOLERANCE,
            which,
            "imaginary residue above tolerance discarded; roots are not conjugate-symmetric"
        );
    }

    coeffs.iter().map(|c| c.re).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{bilinear_map, design_prototype, zpk_to_sections};
    use approx::assert_abs_diff_eq;

    fn butter(order: usize, fc: f64) -> TransferFunction {
        let analog = design_prototype(order).unwrap();
        let digital = bilinear_map(&analog, fc).unwrap();
        zpk_to_transfer_function(&digital).unwrap()
    }

    #[test]
    fn test_butter_2_quarter_band() {
        let tf = butter(2, 0.25);

        let b_test = [0.292893218813452, 0.585786437626905, 0.292893218813452];
        let a_test = [1.0, 0.0, 0.171572875253810];

        assert_eq!(tf.b.len(), 3);
        assert_eq!(tf.a.len(), 3);
        for i in 0..3 {
            assert_abs_diff_eq!(tf.b[i], b_test[i], epsilon = 1e-6);
            assert_abs_diff_eq!(tf.a[i], a_test[i], epsilon = 1e-6);
        }
    }

    #[test]
    fn test_butter_4_half_band() {
        let tf = butter(4, 0.25);

        let b_test = [0.09398085, 0.37592341, 0.56388511, 0.37592341, 0.09398085];
        let a_test = [1.0, 0.0, 0.48602882, 0.0, 0.01766480];
        for i in 0..5 {
            assert_abs_diff_eq!(tf.b[i], b_test[i], epsilon = 1e-7);
            assert_abs_diff_eq!(tf.a[i], a_test[i], epsilon = 1e-7);
        }
    }

    #[test]
    fn test_first_order() {
        // m = 1/tan(pi/8), p = (m - 1)/(m + 1), b = (1 - p)/2 * [1, 1]
        let tf = butter(1, 0.125);
        let m = 1.0 / (std::f64::consts::PI / 8.0).tan();
        let p = (m - 1.0) / (m + 1.0);

        assert_abs_diff_eq!(tf.a[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(tf.a[1], -p, epsilon = 1e-12);
        assert_abs_diff_eq!(tf.b[0], (1.0 - p) / 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(tf.b[1], (1.0 - p) / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_leading_denominator_is_one() {
        for order in 1..=10 {
            for fc in [0.05, 0.2, 0.45] {
                let tf = butter(order, fc);
                assert_eq!(tf.a[0], 1.0);
                assert_eq!(tf.order(), order);
            }
        }
    }

    #[test]
    fn test_dc_gain_and_cutoff() {
        for order in 1..=6 {
            for fc in [0.1, 0.25, 0.4] {
                let tf = butter(order, fc);
                assert_abs_diff_eq!(tf.frequency_response(0.0).norm(), 1.0, epsilon = 1e-9);
                // -3.01 dB at the cutoff for every order
                assert_abs_diff_eq!(
                    tf.frequency_response(fc).norm(),
                    std::f64::consts::FRAC_1_SQRT_2,
                    epsilon = 1e-9
                );
            }
        }
    }

    #[test]
    fn test_poly_from_roots() {
        // (z - 1)(z + 2) = z^2 + z - 2
        let p = poly_from_roots(&[ComplexValue::new(1.0, 0.0), ComplexValue::new(-2.0, 0.0)]);
        let re: Vec<f64> = p.iter().map(|c| c.re).collect();
        assert_eq!(re, vec![1.0, 1.0, -2.0]);

        // (z - j)(z + j) = z^2 + 1
        let p = poly_from_roots(&[ComplexValue::new(0.0, 1.0), ComplexValue::new(0.0, -1.0)]);
        assert_abs_diff_eq!(p[1].norm(), 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(p[2].re, 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(p[2].im, 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_root_count_mismatch() {
        let analog = design_prototype(3).unwrap();
        assert_eq!(
            zpk_to_transfer_function(&analog),
            Err(DesignError::RootCountMismatch { zeros: 0, poles: 3 })
        );
    }

    #[test]
    fn test_asymmetric_roots_discard_imaginary() {
        // A lone complex pole is a contract violation; the real parts survive
        let zpk = ZpkSet::new(
            vec![ComplexValue::new(-1.0, 0.0)],
            vec![ComplexValue::new(0.5, 0.5)],
            ComplexValue::new(1.0, 0.0),
        );
        let tf = zpk_to_transfer_function(&zpk).unwrap();
        assert_eq!(tf.a, vec![1.0, -0.5]);
        assert_eq!(tf.b, vec![1.0, 1.0]);
    }

    #[test]
    fn test_empty_set_rejected() {
        // Same contract as the sections converter: a design has at least one pole
        let zpk = ZpkSet::new(vec![], vec![], ComplexValue::new(0.5, 0.0));
        assert_eq!(zpk_to_transfer_function(&zpk), Err(DesignError::InvalidOrder(0)));
        assert_eq!(zpk_to_sections(&zpk), Err(DesignError::InvalidOrder(0)));
    }
}
