//! # Butterworth IIR Design
//!
//! Designs digital Butterworth lowpass filters and produces them in three
//! interchangeable forms: zero-pole-gain, direct-form transfer function and
//! cascaded second-order sections.
//!
//! ## Signal Flow
//!
//! ```text
//! order N ──> analog prototype ──> bilinear map (fc) ──┬─> (b, a)
//!             (poles on |s| = 1)   (pre-warped)         └─> biquads
//! ```
//!
//! ## Example
//!
//! ```rust
//! use iirdes_core::prelude::*;
//!
//! let design = design_butterworth(4, 0.1).unwrap();
//! assert_eq!(design.sections.len(), 2);
//!
//! // Unity gain at DC, -3 dB at the cutoff
//! let dc = design.sections.frequency_response(0.0).norm();
//! let edge = design.sections.frequency_response(0.1).norm();
//! assert!((dc - 1.0).abs() < 1e-9);
//! assert!((edge - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-9);
//! ```
//!
//! ## Features
//!
//! - `parallel`: batch designs on a Rayon thread pool ([`parallel`])

pub mod config;
pub mod filters;
pub mod observe;
pub mod types;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use config::{DesignConfig, FilterSpec};
pub use filters::{
    bilinear_map, design_butterworth, design_prototype, zpk_to_sections,
    zpk_to_transfer_function, FilterDesign, MAX_ORDER,
};
pub use types::{
    ComplexValue, DesignError, DesignResult, SecondOrderSections, Section, TransferFunction,
    ZpkSet,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{DesignConfig, FilterSpec};
    pub use crate::filters::{
        bilinear_map, design_butterworth, design_prototype, zpk_to_sections,
        zpk_to_transfer_function, FilterDesign,
    };
    pub use crate::types::{
        ComplexValue, DesignError, DesignResult, SecondOrderSections, TransferFunction, ZpkSet,
    };
}
