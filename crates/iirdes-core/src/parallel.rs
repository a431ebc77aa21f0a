//! Parallel Batch Design
//!
//! Designs many filters at once using Rayon. Enable with the `parallel`
//! feature flag.
//!
//! ```toml
//! [dependencies]
//! iirdes-core = { version = "0.1", features = ["parallel"] }
//! ```
//!
//! A single design is a few microseconds of work, so batches only pay off
//! once they reach a few dozen specs.

use rayon::prelude::*;

use crate::config::FilterSpec;
use crate::filters::{bilinear_map, design_prototype, FilterDesign};
use crate::types::{DesignResult, ZpkSet};

/// Design every filter spec in parallel.
///
/// Results come back in input order; a failing filter spec does not affect the
/// others.
pub fn design_batch(specs: &[FilterSpec]) -> Vec<DesignResult<FilterDesign>> {
    specs.par_iter().map(FilterSpec::design).collect()
}

/// Map one analog prototype to many cutoffs in parallel.
///
/// The prototype is computed once and shared across threads.
pub fn map_cutoffs(order: usize, cutoffs: &[f64]) -> DesignResult<Vec<DesignResult<ZpkSet>>> {
    let analog = design_prototype(order)?;
    Ok(cutoffs
        .par_iter()
        .map(|&fc| bilinear_map(&analog, fc))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DesignError;

    #[test]
    fn test_design_batch_matches_sequential() {
        let specs: Vec<FilterSpec> = (1..=12)
            .flat_map(|order| [0.05, 0.2, 0.45].map(|fc| FilterSpec::new(order, fc)))
            .collect();

        let parallel = design_batch(&specs);
        let sequential: Vec<_> = specs.iter().map(FilterSpec::design).collect();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_design_batch_keeps_errors_in_place() {
        let specs = [
            FilterSpec::new(2, 0.1),
            FilterSpec::new(0, 0.1),
            FilterSpec::new(3, 0.6),
            FilterSpec::new(4, 0.3),
        ];

        let results = design_batch(&specs);
        assert_eq!(results.len(), 4);
        assert!(results[0].is_ok());
        assert_eq!(results[1], Err(DesignError::InvalidOrder(0)));
        assert_eq!(results[2], Err(DesignError::InvalidCutoff(0.6)));
        assert_eq!(results[3].as_ref().map(|d| d.order), Ok(4));
    }

    #[test]
    fn test_map_cutoffs() {
        let mapped = map_cutoffs(5, &[0.1, 0.0, 0.3]).unwrap();
        assert_eq!(mapped[0].as_ref().map(ZpkSet::num_poles), Ok(5));
        assert_eq!(mapped[1], Err(DesignError::InvalidCutoff(0.0)));
        assert!(mapped[2].is_ok());

        assert_eq!(map_cutoffs(0, &[0.1]), Err(DesignError::InvalidOrder(0)));
    }
}
