//! Accumulated origin → destination transition counts.

use std::collections::HashSet;

use crate::objective::{origin_cv, posterior_cells, row_total, ObjectiveParams, PosteriorCell};
use crate::types::{ConnectivityError, Count, CountMatrix};

/// Connectivity matrix of observed particle transitions.
///
/// Holds the ordered origin and destination site lists, the cumulative
/// count matrix and the parameters of the CV objective. Counts only ever
/// grow: every update is additive and rejected as a whole when its shape
/// does not match.
///
/// Cloning produces an independent snapshot, which is how hypothetical
/// "what if these particles arrived" matrices are formed.
///
/// # Examples
///
/// ```rust
/// use connectivity_core::ConnectivityMatrix;
///
/// let mut matrix = ConnectivityMatrix::new(["1", "2"], ["North", "South", "Other"]).unwrap();
/// assert_eq!(matrix.get_counts(), vec![vec![0, 0, 0], vec![0, 0, 0]]);
///
/// matrix.update(&[vec![4, 1, 10], vec![0, 3, 7]]).unwrap();
/// matrix.update_origin("2", &[1, 0, 0]).unwrap();
/// assert_eq!(matrix.get_counts(), vec![vec![4, 1, 10], vec![1, 3, 7]]);
///
/// let objective = matrix.obj_fn_cv();
/// assert!(objective > 0.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectivityMatrix {
    origins: Vec<String>,
    destinations: Vec<String>,
    counts: CountMatrix,
    params: ObjectiveParams,
}

impl ConnectivityMatrix {
    /// Creates a zero matrix for the given sites with default objective
    /// parameters (`delta = 0.005`, `pi = 0.05`).
    ///
    /// # Errors
    ///
    /// - [`ConnectivityError::EmptySiteList`] if either list is empty
    /// - [`ConnectivityError::DuplicateSite`] if a list repeats an identifier
    pub fn new<O, D, S, T>(origins: O, destinations: D) -> Result<Self, ConnectivityError>
    where
        O: IntoIterator<Item = S>,
        D: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        let origins: Vec<String> = origins.into_iter().map(Into::into).collect();
        let destinations: Vec<String> = destinations.into_iter().map(Into::into).collect();
        check_sites("origin", &origins)?;
        check_sites("destination", &destinations)?;

        let counts = vec![vec![0; destinations.len()]; origins.len()];
        Ok(Self {
            origins,
            destinations,
            counts,
            params: ObjectiveParams::default(),
        })
    }

    /// Origin identifiers in index order.
    #[inline]
    pub fn origins(&self) -> &[String] {
        &self.origins
    }

    /// Destination identifiers in index order.
    #[inline]
    pub fn destinations(&self) -> &[String] {
        &self.destinations
    }

    /// Number of origins (O).
    #[inline]
    pub fn n_origins(&self) -> usize {
        self.origins.len()
    }

    /// Number of destinations (D).
    #[inline]
    pub fn n_destinations(&self) -> usize {
        self.destinations.len()
    }

    /// Index of the named origin.
    pub fn origin_index(&self, name: &str) -> Option<usize> {
        self.origins.iter().position(|o| o == name)
    }

    /// Index of the named destination.
    pub fn destination_index(&self, name: &str) -> Option<usize> {
        self.destinations.iter().position(|d| d == name)
    }

    /// Adds a full `O x D` matrix of newly observed counts.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectivityError::ShapeMismatch`] without modifying the
    /// matrix if `delta` is not exactly `O x D`.
    pub fn update(&mut self, delta: &[Vec<Count>]) -> Result<(), ConnectivityError> {
        let rows = delta.len();
        let bad_row = delta.iter().find(|row| row.len() != self.n_destinations());
        if rows != self.n_origins() || bad_row.is_some() {
            return Err(ConnectivityError::ShapeMismatch {
                expected_rows: self.n_origins(),
                expected_cols: self.n_destinations(),
                rows,
                cols: bad_row
                    .or_else(|| delta.first())
                    .map_or(0, |row| row.len()),
            });
        }

        for (row, increments) in self.counts.iter_mut().zip(delta) {
            add_row(row, increments);
        }
        Ok(())
    }

    /// Adds a `D`-length vector of newly observed counts to one origin.
    ///
    /// # Errors
    ///
    /// - [`ConnectivityError::UnknownOrigin`] if `origin >= O`
    /// - [`ConnectivityError::ShapeMismatch`] if `delta.len() != D`
    pub fn update_row(&mut self, origin: usize, delta: &[Count]) -> Result<(), ConnectivityError> {
        if delta.len() != self.n_destinations() {
            return Err(ConnectivityError::ShapeMismatch {
                expected_rows: 1,
                expected_cols: self.n_destinations(),
                rows: 1,
                cols: delta.len(),
            });
        }
        let row = self
            .counts
            .get_mut(origin)
            .ok_or_else(|| ConnectivityError::UnknownOrigin(origin.to_string()))?;
        add_row(row, delta);
        Ok(())
    }

    /// Adds a row of observations to the origin with the given name.
    pub fn update_origin(&mut self, name: &str, delta: &[Count]) -> Result<(), ConnectivityError> {
        let origin = self
            .origin_index(name)
            .ok_or_else(|| ConnectivityError::UnknownOrigin(name.to_string()))?;
        self.update_row(origin, delta)
    }

    /// Returns a snapshot of the accumulated counts.
    pub fn get_counts(&self) -> CountMatrix {
        self.counts.clone()
    }

    /// Borrowed view of one origin's counts.
    pub fn row(&self, origin: usize) -> Option<&[Count]> {
        self.counts.get(origin).map(Vec::as_slice)
    }

    /// Total particles observed from one origin.
    pub fn origin_total(&self, origin: usize) -> Option<Count> {
        self.row(origin).map(row_total)
    }

    /// Total particles observed across the whole matrix.
    pub fn total_count(&self) -> Count {
        self.counts
            .iter()
            .map(|row| row_total(row))
            .fold(0, Count::saturating_add)
    }

    /// Current objective parameters.
    #[inline]
    pub fn objective_params(&self) -> ObjectiveParams {
        self.params
    }

    /// Replaces the objective parameters.
    pub fn set_objective_params(&mut self, params: ObjectiveParams) {
        self.params = params;
    }

    /// Overrides the `delta` and `pi` thresholds of the CV objective.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectivityError::InvalidParameter`] if either value lies
    /// outside `[0, 1]`; the current parameters are kept in that case.
    pub fn set_obj_fn_cv_args(&mut self, delta: f64, pi: f64) -> Result<(), ConnectivityError> {
        self.params = ObjectiveParams::new(delta, pi)?;
        Ok(())
    }

    /// Matrix-wide objective: the largest per-origin objective.
    pub fn obj_fn_cv(&self) -> f64 {
        self.counts
            .iter()
            .map(|row| origin_cv(row, &self.params))
            .fold(0.0, f64::max)
    }

    /// Objective contribution of a single origin.
    ///
    /// # Panics
    ///
    /// Panics if `origin >= O`.
    pub fn obj_fn_cv_origin(&self, origin: usize) -> f64 {
        origin_cv(&self.counts[origin], &self.params)
    }

    /// Per-origin objective values in origin order.
    pub fn origin_costs(&self) -> Vec<f64> {
        self.counts
            .iter()
            .map(|row| origin_cv(row, &self.params))
            .collect()
    }

    /// Posterior summaries of every destination cell of one origin.
    pub fn posterior(&self, origin: usize) -> Option<Vec<PosteriorCell>> {
        self.row(origin).map(|row| posterior_cells(row, &self.params))
    }
}

fn check_sites(kind: &'static str, sites: &[String]) -> Result<(), ConnectivityError> {
    if sites.is_empty() {
        return Err(ConnectivityError::EmptySiteList(kind));
    }
    let mut seen = HashSet::with_capacity(sites.len());
    for site in sites {
        if !seen.insert(site.as_str()) {
            return Err(ConnectivityError::DuplicateSite {
                kind,
                name: site.clone(),
            });
        }
    }
    Ok(())
}

#[inline]
fn add_row(row: &mut [Count], delta: &[Count]) {
    for (count, &increment) in row.iter_mut().zip(delta) {
        *count = count.saturating_add(increment);
    }
}
