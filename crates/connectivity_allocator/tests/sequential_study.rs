//! Integration tests for batch allocation over a sequential study.

use connectivity_allocator::{
    AllocateExt, AllocationMode, GreedyAllocator, ObjectiveScope, PosteriorEstimator,
    SamplingConfig, SamplingRng,
};
use connectivity_core::{ConnectivityMatrix, Count};

fn gulf_of_maine() -> ConnectivityMatrix {
    ConnectivityMatrix::new(
        ["1", "2", "3"],
        ["Mid-Maine", "Three States", "Mass Bay", "Nantucket", "Other"],
    )
    .unwrap()
}

fn first_step_counts() -> Vec<Vec<Count>> {
    vec![
        vec![5, 3, 15, 2, 142],
        vec![0, 1, 30, 1, 135],
        vec![0, 0, 57, 2, 107],
    ]
}

fn allocator(seed: u64) -> GreedyAllocator {
    GreedyAllocator::new(
        SamplingConfig::builder()
            .n_trials(60)
            .seed(seed)
            .build()
            .unwrap(),
    )
}

/// Before any observation the batch is split evenly.
#[test]
fn test_cold_start_split() {
    let matrix = gulf_of_maine();
    let allocation = allocator(1).allocate(&matrix, 10, 1).unwrap();
    assert_eq!(allocation.counts, vec![4, 3, 3]);
    assert_eq!(allocation.mode, AllocationMode::ColdStart);
}

/// After the first simulation step the batch is allocated greedily, sums to
/// `n`, and leaves the observed counts alone.
#[test]
fn test_warm_allocation() {
    let mut matrix = gulf_of_maine();
    matrix.update(&first_step_counts()).unwrap();

    let allocation = allocator(2).allocate(&matrix, 40, 1).unwrap();
    assert_eq!(allocation.mode, AllocationMode::Greedy);
    assert_eq!(allocation.counts.len(), 3);
    assert_eq!(allocation.total(), 40);
    assert_eq!(allocation.steps, 40);
    assert_eq!(matrix.get_counts(), first_step_counts());
}

/// Block releases take one greedy step per block.
#[test]
fn test_block_allocation() {
    let mut matrix = gulf_of_maine();
    matrix.update(&first_step_counts()).unwrap();

    let allocation = allocator(3).allocate(&matrix, 95, 10).unwrap();
    assert_eq!(allocation.total(), 95);
    assert_eq!(allocation.steps, 10);
}

/// An empty batch is all zeros, not an error.
#[test]
fn test_empty_batch() {
    let mut matrix = gulf_of_maine();
    matrix.update(&first_step_counts()).unwrap();
    assert_eq!(AllocateExt::allocate(&matrix, 0, 1).unwrap(), vec![0, 0, 0]);
}

/// The matrix-wide estimate can never fall below the origin estimate when
/// both see the same draws.
#[test]
fn test_matrix_scope_bounds_origin_scope() {
    let mut matrix = gulf_of_maine();
    matrix.update(&first_step_counts()).unwrap();
    let config = SamplingConfig::builder().n_trials(80).build().unwrap();
    let estimator = PosteriorEstimator::new(&config);

    for origin in 0..3 {
        let own = estimator
            .expected_cost(
                &matrix,
                origin,
                25,
                ObjectiveScope::Origin,
                &mut SamplingRng::from_seed(5),
            )
            .unwrap();
        let whole = estimator
            .expected_cost(
                &matrix,
                origin,
                25,
                ObjectiveScope::Matrix,
                &mut SamplingRng::from_seed(5),
            )
            .unwrap();
        assert!(whole >= own);
    }
}

/// Several rounds of allocate → observe → update drive the objective down
/// from its no-data value.
#[test]
fn test_study_loop_reduces_objective() {
    let truth = [[0.2, 0.3, 0.5], [0.6, 0.25, 0.15], [0.1, 0.45, 0.45]];
    let mut matrix = ConnectivityMatrix::new(["a", "b", "c"], ["x", "y", "z"]).unwrap();
    let initial = matrix.obj_fn_cv();

    let mut allocator = allocator(11);
    let mut nature = SamplingRng::from_seed(99);

    for _ in 0..5 {
        let batch = allocator.allocate(&matrix, 60, 5).unwrap();
        assert_eq!(batch.total(), 60);

        let observed: Vec<Vec<Count>> = batch
            .counts
            .iter()
            .zip(&truth)
            .map(|(&released, p)| nature.gen_multinomial(released, p).unwrap())
            .collect();
        matrix.update(&observed).unwrap();
    }

    assert_eq!(matrix.total_count(), 300);
    assert!(matrix.obj_fn_cv() < 0.6 * initial);
}
