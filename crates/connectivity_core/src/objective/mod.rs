//! Coefficient-of-variation objective over the Dirichlet posterior.
//!
//! For origin `i`, the objective is
//!
//! ```text
//! obj_i = max { CV_ij : mean_ij >= delta  and  P(p_ij > delta) >= pi }
//! ```
//!
//! with `obj_i = 0` when no cell qualifies. The matrix-wide objective is the
//! maximum over origins. CV rather than variance is used so that estimates
//! close to 0 and close to 1 are compared on the same relative scale.

mod params;
mod posterior;

pub use params::{ObjectiveParams, DEFAULT_DELTA, DEFAULT_PI};
pub use posterior::{beta_cv, origin_cv, posterior_cells, row_total, PosteriorCell};
