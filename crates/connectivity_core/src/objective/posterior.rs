//! Beta marginals of the Dirichlet posterior over one origin's transitions.
//!
//! With a uniform Dirichlet prior (one pseudo-count per destination), the
//! marginal posterior of `p_ij` is `Beta(alpha, beta)` with
//! `alpha = counts[i][j] + 1` and `beta = alpha_sum - alpha`, where
//! `alpha_sum = sum_j counts[i][j] + D`.

use statrs::function::beta::beta_reg;

use super::params::ObjectiveParams;
use crate::types::Count;

/// Posterior summary of a single origin–destination cell.
///
/// # Examples
///
/// ```rust
/// use connectivity_core::objective::{ObjectiveParams, PosteriorCell};
///
/// // Origin with no observations and five destinations.
/// let cell = PosteriorCell::new(0, 0, 5, &ObjectiveParams::default());
/// assert_eq!(cell.alpha, 1.0);
/// assert_eq!(cell.beta, 4.0);
/// assert!((cell.mean - 0.2).abs() < 1e-12);
/// assert!(cell.qualifies);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PosteriorCell {
    /// First Beta shape parameter (`count + 1`).
    pub alpha: f64,
    /// Second Beta shape parameter (`alpha_sum - alpha`).
    pub beta: f64,
    /// Posterior mean `alpha / alpha_sum`.
    pub mean: f64,
    /// Posterior probability that the transition probability exceeds `delta`.
    pub exceedance: f64,
    /// Coefficient of variation of `Beta(alpha, beta)`.
    pub cv: f64,
    /// Whether the cell enters the objective.
    pub qualifies: bool,
}

impl PosteriorCell {
    /// Summarises the cell with `count` observations in an origin row whose
    /// counts add up to `row_total` over `n_destinations` destinations.
    pub fn new(
        count: Count,
        row_total: Count,
        n_destinations: usize,
        params: &ObjectiveParams,
    ) -> Self {
        let alpha_sum = row_total as f64 + n_destinations as f64;
        let alpha = count as f64 + 1.0;
        let beta = alpha_sum - alpha;
        let mean = alpha / alpha_sum;
        let exceedance = exceedance_probability(alpha, beta, params.delta());
        let cv = beta_cv(alpha, beta);
        let qualifies = mean >= params.delta() && exceedance >= params.pi();

        Self {
            alpha,
            beta,
            mean,
            exceedance,
            cv,
            qualifies,
        }
    }
}

/// `1 - BetaCDF(delta; alpha, beta)`.
///
/// `beta == 0` only occurs for single-destination origins, where the
/// posterior is a point mass at 1.
fn exceedance_probability(alpha: f64, beta: f64, delta: f64) -> f64 {
    if beta <= 0.0 {
        return if delta < 1.0 { 1.0 } else { 0.0 };
    }
    1.0 - beta_reg(alpha, beta, delta)
}

/// Coefficient of variation (standard deviation over mean) of `Beta(alpha, beta)`.
#[inline]
pub fn beta_cv(alpha: f64, beta: f64) -> f64 {
    let total = alpha + beta;
    let variance = alpha * beta / (total * total * (total + 1.0));
    variance.sqrt() / (alpha / total)
}

/// Sum of a count row, saturating at `Count::MAX` like the updates that
/// fill it.
#[inline]
pub fn row_total(row: &[Count]) -> Count {
    row.iter().fold(0, |acc, &count| acc.saturating_add(count))
}

/// Posterior summaries for every destination of one origin row.
pub fn posterior_cells(row: &[Count], params: &ObjectiveParams) -> Vec<PosteriorCell> {
    let total = row_total(row);
    row.iter()
        .map(|&count| PosteriorCell::new(count, total, row.len(), params))
        .collect()
}

/// Objective contribution of one origin row: the largest CV among
/// qualifying cells, or 0 when no cell qualifies.
pub fn origin_cv(row: &[Count], params: &ObjectiveParams) -> f64 {
    let total = row_total(row);
    row.iter()
        .map(|&count| PosteriorCell::new(count, total, row.len(), params))
        .filter(|cell| cell.qualifies)
        .fold(0.0, |acc, cell| acc.max(cell.cv))
}
