//! End-to-end Butterworth design
//!
//! Runs the prototype, bilinear map and both converters in sequence and keeps
//! every intermediate representation.

use super::{bilinear_map, design_prototype, pre_warp, zpk_to_sections, zpk_to_transfer_function};
use crate::types::{DesignResult, SecondOrderSections, TransferFunction, ZpkSet};
use serde::{Deserialize, Serialize};

/// All representations of one Butterworth lowpass design
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterDesign {
    /// Filter order
    pub order: usize,
    /// Normalized cutoff (cycles/sample)
    pub cutoff: f64,
    /// Analog prototype (s-plane)
    pub analog: ZpkSet,
    /// Digital design (z-plane)
    pub digital: ZpkSet,
    /// Direct-form coefficients
    pub transfer_function: TransferFunction,
    /// Cascaded biquads
    pub sections: SecondOrderSections,
}

/// Design a Butterworth lowpass and convert it to every representation.
///
/// Order and cutoff are both validated before any pole is computed.
pub fn design_butterworth(order: usize, cutoff: f64) -> DesignResult<FilterDesign> {
    pre_warp(cutoff)?;
    let analog = design_prototype(order)?;
    let digital = bilinear_map(&analog, cutoff)?;
    let transfer_function = zpk_to_transfer_function(&digital)?;
    let sections = zpk_to_sections(&digital)?;

    tracing::info!(order, cutoff, sections = sections.len(), "butterworth design complete");

    Ok(FilterDesign {
        order,
        cutoff,
        analog,
        digital,
        transfer_function,
        sections,
    })
}
