//! Per-origin cost record and the minimax release-site choice.

/// Cost bookkeeping for one origin during a single allocation.
///
/// `prior` is the best current estimate of the origin's objective given the
/// particles tentatively allocated so far; `expected` is the Monte Carlo
/// estimate after one more release (particle or block). Only the chosen
/// origin's record is refreshed after each step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OriginCost {
    /// Objective estimate with the current tentative allocation.
    pub prior: f64,
    /// Objective estimate after one more release.
    pub expected: f64,
}

impl OriginCost {
    /// Creates a cost record.
    #[inline]
    pub fn new(prior: f64, expected: f64) -> Self {
        Self { prior, expected }
    }

    /// Larger of the two estimates.
    ///
    /// The objective is not monotone in the sample size (a new arrival can
    /// move a cell across the `delta`/`pi` thresholds and raise the CV), so
    /// an origin that is not released from is charged the worse of the two.
    #[inline]
    pub fn max_cost(&self) -> f64 {
        self.prior.max(self.expected)
    }
}

/// Outcome of one minimax selection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReleaseChoice {
    /// Index of the chosen origin.
    pub origin: usize,
    /// Worst objective across origins if the release goes to `origin`.
    pub release_cost: f64,
}

/// Chooses the origin whose release minimises the worst-case objective.
///
/// The release cost of candidate `j` is the maximum over all origins of
/// `max_cost`, except that `j` contributes its `expected` cost. Ties on the
/// release cost go to the candidate with the larger `prior`; remaining ties
/// keep the earlier origin.
///
/// Returns `None` when `costs` is empty.
///
/// # Examples
///
/// ```rust
/// use connectivity_allocator::greedy::{select_release_site, OriginCost};
///
/// // Both candidates leave a worst case of 0.9; origin 1 is worse now.
/// let costs = [OriginCost::new(0.2, 0.9), OriginCost::new(0.4, 0.9)];
/// let choice = select_release_site(&costs).unwrap();
/// assert_eq!(choice.origin, 1);
/// assert_eq!(choice.release_cost, 0.9);
/// ```
pub fn select_release_site(costs: &[OriginCost]) -> Option<ReleaseChoice> {
    let max_costs: Vec<f64> = costs.iter().map(OriginCost::max_cost).collect();

    let mut best: Option<ReleaseChoice> = None;
    for (j, candidate) in costs.iter().enumerate() {
        let release_cost = max_costs
            .iter()
            .enumerate()
            .map(|(k, &cost)| if k == j { candidate.expected } else { cost })
            .fold(f64::NEG_INFINITY, f64::max);

        let better = match best {
            None => true,
            Some(current) if release_cost < current.release_cost => true,
            Some(current) if release_cost == current.release_cost => {
                candidate.prior > costs[current.origin].prior
            }
            Some(_) => false,
        };
        if better {
            best = Some(ReleaseChoice {
                origin: j,
                release_cost,
            });
        }
    }
    best
}
