//! IIR Filter Design
//!
//! Butterworth lowpass design from an analog prototype, carried to the
//! z-plane with a pre-warped bilinear transform and then expanded into direct
//! form or cascaded biquads.
//!
//! ## Pipeline
//!
//! ```text
//!                                     ┌─> zpk_to_transfer_function ─> (b, a)
//! design_prototype ─> bilinear_map ──┤
//!   (s-plane ZPK)      (z-plane ZPK)  └─> zpk_to_sections ─────────> [biquad; ceil(N/2)]
//! ```
//!
//! Every stage is a pure function. Inputs are validated before any numeric
//! work and errors surface as [`DesignError`](crate::types::DesignError).
//!
//! ## Example
//!
//! ```rust
//! use iirdes_core::filters::{bilinear_map, design_prototype, zpk_to_sections, zpk_to_transfer_function};
//!
//! let analog = design_prototype(4).unwrap();
//! let digital = bilinear_map(&analog, 0.1).unwrap();
//!
//! let tf = zpk_to_transfer_function(&digital).unwrap();
//! let sos = zpk_to_sections(&digital).unwrap();
//! assert_eq!(tf.a[0], 1.0);
//! assert_eq!(sos.len(), 2);
//! ```

pub mod bilinear;
pub mod design;
pub mod pairing;
pub mod prototype;
pub mod sections;
pub mod transfer_function;

pub use bilinear::{bilinear_map, pre_warp, DEGENERATE_CUTOFF_MARGIN};
pub use design::{design_butterworth, FilterDesign};
pub use pairing::{pair_roots, RootGroup, PAIR_TOLERANCE};
pub use prototype::{check_order, design_prototype};
pub use sections::zpk_to_sections;
pub use transfer_function::{zpk_to_transfer_function, IMAG_TOLERANCE};

/// Maximum supported filter order.
pub const MAX_ORDER: usize = 20;
