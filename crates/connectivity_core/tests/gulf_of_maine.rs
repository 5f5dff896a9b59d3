//! Integration tests against the first step of the Gulf of Maine simulation.

use approx::assert_relative_eq;
use connectivity_core::{ConnectivityError, ConnectivityMatrix, Count};

const ORIGINS: [&str; 3] = ["1", "2", "3"];
const DESTINATIONS: [&str; 5] = ["Mid-Maine", "Three States", "Mass Bay", "Nantucket", "Other"];

fn first_step_counts() -> Vec<Vec<Count>> {
    vec![
        vec![5, 3, 15, 2, 142],
        vec![0, 1, 30, 1, 135],
        vec![0, 0, 57, 2, 107],
    ]
}

fn fixture() -> ConnectivityMatrix {
    ConnectivityMatrix::new(ORIGINS, DESTINATIONS).unwrap()
}

/// The count matrix has one row per origin and one column per destination.
#[test]
fn test_dimensions() {
    let counts = fixture().get_counts();
    assert_eq!(counts.len(), ORIGINS.len());
    for row in &counts {
        assert_eq!(row.len(), DESTINATIONS.len());
    }
}

/// A fresh matrix holds only zeros.
#[test]
fn test_initial_counts() {
    let counts = fixture().get_counts();
    for row in &counts {
        assert!(row.iter().all(|&c| c == 0));
    }
}

/// `update` stores the observed counts exactly.
#[test]
fn test_update() {
    let mut matrix = fixture();
    matrix.update(&first_step_counts()).unwrap();
    assert_eq!(matrix.get_counts(), first_step_counts());
    assert_eq!(matrix.get_counts(), matrix.get_counts());
}

/// A 2x5 update against a 3x5 matrix is rejected.
#[test]
fn test_update_wrong_shape() {
    let mut matrix = fixture();
    let mut counts = first_step_counts();
    counts.pop();
    assert!(matches!(
        matrix.update(&counts),
        Err(ConnectivityError::ShapeMismatch {
            expected_rows: 3,
            expected_cols: 5,
            rows: 2,
            cols: 5,
        })
    ));
}

/// With no data every cell is Beta(1, 4), whose CV is sqrt(2/3).
#[test]
fn test_objective_on_empty_matrix() {
    let matrix = fixture();
    assert_relative_eq!(matrix.obj_fn_cv(), (2.0_f64 / 3.0).sqrt(), epsilon = 1e-12);
}

/// The objective after the first step is driven by the sparsest
/// qualifying transition.
#[test]
fn test_objective_after_first_step() {
    let mut matrix = fixture();
    matrix.update(&first_step_counts()).unwrap();

    let costs = matrix.origin_costs();
    assert_relative_eq!(
        matrix.obj_fn_cv(),
        costs.iter().cloned().fold(0.0, f64::max),
        epsilon = 1e-15
    );

    // Origin "1": row total 167, alpha_sum 172. The Nantucket cell has
    // alpha = 3, beta = 169 and is the largest qualifying CV.
    let expected = (169.0_f64 / (3.0 * 173.0)).sqrt();
    assert_relative_eq!(costs[0], expected, max_relative = 1e-9);

    // Origin "2": the empty Mid-Maine cell still has mean 1/172 >= delta and
    // P(p > delta) = 0.995^171 >= pi, so Beta(1, 171) sets the cost.
    let expected = (171.0_f64 / 173.0).sqrt();
    assert_relative_eq!(costs[1], expected, max_relative = 1e-9);

    // Origin "3": Beta(1, 170) for both empty cells.
    let expected = (170.0_f64 / 172.0).sqrt();
    assert_relative_eq!(costs[2], expected, max_relative = 1e-9);

    assert_relative_eq!(matrix.obj_fn_cv(), costs[1], epsilon = 1e-15);
}

/// Raising `delta` removes cells from the objective.
#[test]
fn test_objective_args() {
    let mut matrix = fixture();
    matrix.update(&first_step_counts()).unwrap();
    let default_value = matrix.obj_fn_cv();

    matrix.set_obj_fn_cv_args(0.05, 0.05).unwrap();
    assert!(matrix.obj_fn_cv() < default_value);

    assert!(matrix.set_obj_fn_cv_args(0.05, 1.5).is_err());
}
