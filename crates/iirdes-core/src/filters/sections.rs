//! ZPK to cascaded second-order sections
//!
//! Zeros and poles are grouped independently with [`pair_roots`]; section `l`
//! takes zero group `l` over pole group `l`. Both root sets have `N` entries,
//! so both produce `ceil(N/2)` groups and an odd leftover lands last in each.
//!
//! The gain is folded into the numerator of the first section. Sections keep
//! the discovery order of their roots; they are not reordered for
//! conditioning.

use super::pairing::{pair_roots, PAIR_TOLERANCE};
use super::transfer_function::IMAG_TOLERANCE;
use crate::types::{DesignError, DesignResult, SecondOrderSections, Section, ZpkSet};

/// Convert a digital ZPK set into a cascade of biquads.
///
/// Returns `ceil(N/2)` sections, each with `a0 = 1`. A lone real root becomes
/// the degenerate section `(1, -r, 0)`.
///
/// # Errors
/// - [`DesignError::RootCountMismatch`] unless `nz == np`
/// - [`DesignError::InvalidOrder`] for an empty root set
/// - [`DesignError::UnpairedRoot`] when a complex root has no conjugate
pub fn zpk_to_sections(zpk: &ZpkSet) -> DesignResult<SecondOrderSections> {
    let order = zpk.num_poles();
    if zpk.num_zeros() != order {
        return Err(DesignError::RootCountMismatch {
            zeros: zpk.num_zeros(),
            poles: order,
        });
    }
    if order == 0 {
        return Err(DesignError::InvalidOrder(0));
    }

    let zero_groups = pair_roots(&zpk.zeros, PAIR_TOLERANCE)?;
    let pole_groups = pair_roots(&zpk.poles, PAIR_TOLERANCE)?;

    if zpk.gain.im.abs() > IMAG_TOLERANCE * zpk.gain.norm() {
        tracing::warn!(
            gain_re = zpk.gain.re,
            gain_im = zpk.gain.im,
            "complex gain, imaginary part discarded"
        );
    }
    let gain = zpk.gain.re;

    let sections: Vec<Section> = zero_groups
        .iter()
        .zip(pole_groups.iter())
        .enumerate()
        .map(|(l, (zg, pg))| {
            let mut b = zg.polynomial();
            if l == 0 {
                b.iter_mut().for_each(|c| *c *= gain);
            }
            Section::new(b, pg.polynomial())
        })
        .collect();

    tracing::debug!(order, sections = sections.len(), "expanded zpk into second-order sections");

    Ok(SecondOrderSections::new(sections))
}
