//! Analog prototype design
//!
//! Produces the normalized (1 rad/s cutoff) s-plane zeros, poles and gain for
//! a Butterworth lowpass of the requested order.
//!
//! ```text
//!   p_k = exp(j * (π/2 + π(2k+1)/(2N))),   k = 0..N-1
//! ```
//!
//! All poles sit on the unit circle in the left half plane. Pole `k` and pole
//! `N-1-k` are conjugates; for odd `N` the middle pole is `-1`.

use super::MAX_ORDER;
use crate::types::{ComplexValue, DesignError, DesignResult, ZpkSet};
use std::f64::consts::PI;

/// Design a Butterworth analog prototype of the given order.
///
/// The prototype is all-pole (`nz = 0`, `np = order`). The gain is
/// `Re[prod(-p_k)]`, which makes `|H(0)| = 1`; for the unit-circle pole set
/// it evaluates to 1.
///
/// # Errors
/// [`DesignError::InvalidOrder`] when `order` is 0 or above [`MAX_ORDER`].
pub fn design_prototype(order: usize) -> DesignResult<ZpkSet> {
    check_order(order)?;

    let poles = butterworth_poles(order);
    let gain = poles
        .iter()
        .fold(ComplexValue::new(1.0, 0.0), |acc, p| acc * -p);

    tracing::debug!(order, gain = gain.re, "designed butterworth prototype");

    Ok(ZpkSet::new(Vec::new(), poles, ComplexValue::new(gain.re, 0.0)))
}

/// Check that `order` is in `1..=MAX_ORDER`.
pub fn check_order(order: usize) -> DesignResult<()> {
    if order == 0 || order > MAX_ORDER {
        return Err(DesignError::InvalidOrder(order));
    }
    Ok(())
}

/// Calculate Butterworth analog prototype poles.
fn butterworth_poles(order: usize) -> Vec<ComplexValue> {
    (0..order)
        .map(|k| {
            let theta = PI / 2.0 + PI * (2 * k + 1) as f64 / (2 * order) as f64;
            ComplexValue::new(theta.cos(), theta.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pole_count() {
        for order in 1..=10 {
            let proto = design_prototype(order).unwrap();
            assert_eq!(proto.num_poles(), order);
            assert_eq!(proto.num_zeros(), 0);
        }
    }

    #[test]
    fn test_poles_on_unit_circle_left_half_plane() {
        let proto = design_prototype(7).unwrap();
        for p in &proto.poles {
            assert_relative_eq!(p.norm(), 1.0, epsilon = 1e-12);
            assert!(p.re < 0.0, "pole {} not in left half plane", p);
        }
    }

    #[test]
    fn test_conjugate_closure() {
        for order in 1..=10 {
            let proto = design_prototype(order).unwrap();
            let n = proto.num_poles();
            for k in 0..n {
                let mirror = proto.poles[n - 1 - k];
                assert_relative_eq!(proto.poles[k].re, mirror.re, epsilon = 1e-12);
                assert_relative_eq!(proto.poles[k].im, -mirror.im, epsilon = 1e-12);
            }

            let real_poles = proto.poles.iter().filter(|p| p.im.abs() < 1e-12).count();
            assert_eq!(real_poles, order % 2, "order {}", order);
            assert!(proto.is_conjugate_symmetric(1e-12));
        }
    }

    #[test]
    fn test_odd_order_real_pole() {
        let proto = design_prototype(3).unwrap();
        assert_relative_eq!(proto.poles[1].re, -1.0, epsilon = 1e-12);
        assert_relative_eq!(proto.poles[1].im, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_unity_dc_gain() {
        for order in 1..=10 {
            let proto = design_prototype(order).unwrap();
            // H(0) = k / prod(0 - p)
            let denom = proto
                .poles
                .iter()
                .fold(ComplexValue::new(1.0, 0.0), |acc, p| acc * -p);
            let h0 = proto.gain / denom;
            assert_relative_eq!(h0.norm(), 1.0, epsilon = 1e-12);
            assert_relative_eq!(proto.gain.re, 1.0, epsilon = 1e-12);
            assert_eq!(proto.gain.im, 0.0);
        }
    }

    #[test]
    fn test_invalid_order() {
        assert_eq!(design_prototype(0), Err(DesignError::InvalidOrder(0)));
        assert_eq!(
            design_prototype(MAX_ORDER + 1),
            Err(DesignError::InvalidOrder(MAX_ORDER + 1))
        );
    }
}
