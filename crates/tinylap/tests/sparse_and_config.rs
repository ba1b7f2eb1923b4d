use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use tinylap::{ErrorKind, JacobiConfig, JacobiSolver, LinalgConfig, NormKind, Sparse, SparseAccum};

// ---------------------------------------------------------------------------
// Sparse ingestion
// ---------------------------------------------------------------------------

#[test]
fn test_random_triplets_sum_like_dense_accumulation() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(23);
    let (rows, cols) = (5, 4);
    let mut expected = vec![0.0; rows * cols];
    let mut data = SparseAccum::default();
    for _ in 0..40 {
        let i = rng.gen_range(0..rows);
        let j = rng.gen_range(0..cols);
        let v = rng.gen_range(-3..=3) as f64;
        expected[i * cols + j] += v;
        data.push(i, j, v);
    }

    let mut s = Sparse::new(rows, cols);
    s.accumulate(&data)?;
    assert_eq!(s.to_dense().to_vec(), expected);

    assert!(s.count_nonzero() <= rows * cols);
    let coords: Vec<(usize, usize)> = s.nonzeros().map(|(i, j, _)| (i, j)).collect();
    let mut sorted = coords.clone();
    sorted.sort();
    assert_eq!(coords, sorted);
    Ok(())
}

#[test]
fn test_accumulate_into_offset_block() -> Result<()> {
    let data = SparseAccum::from_triplets(vec![0, 1], vec![1, 0], vec![2.0, 3.0])?;
    let mut s = Sparse::new(4, 4);
    s.accumulate_general(false, 2, 2, &data)?;
    s.accumulate_general(true, 0, 0, &data)?;
    assert_eq!(s.at(2, 3)?, 2.0);
    assert_eq!(s.at(3, 2)?, 3.0);
    assert_eq!(s.at(1, 0)?, 2.0);
    assert_eq!(s.at(0, 1)?, 3.0);
    assert_eq!(s.count_nonzero(), 4);

    s.clear();
    assert_eq!(s.count_nonzero(), 0);
    assert_eq!(s.dims(), (4, 4));
    Ok(())
}

#[test]
fn test_out_of_range_triplet_rejects_whole_batch() {
    let data = SparseAccum::from_triplets(vec![0, 0, 9], vec![0, 1, 0], vec![1.0, 1.0, 1.0])
        .expect("equal lengths");
    let mut s = Sparse::new(2, 2);
    let err = s.accumulate(&data).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RowAccess);
    assert_eq!(s.count_nonzero(), 0);
}

#[test]
fn test_accumulator_reset() -> Result<()> {
    let mut data = SparseAccum::with_len(2);
    data.set(0, 1, 1, 5.0)?;
    data.set(1, 0, 0, 0.0)?;
    assert_eq!(data.set(2, 0, 0, 1.0).unwrap_err().kind(), ErrorKind::RowAccess);

    let mut s = Sparse::new(2, 2);
    s.accumulate(&data)?;
    assert_eq!(s.count_nonzero(), 1);

    data.zero();
    assert_eq!(data.len(), 2);
    assert!(data.iter().all(|t| t == (0, 0, 0.0)));
    Ok(())
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn test_config_json_round_trip() -> Result<()> {
    let cfg = LinalgConfig::default();
    let json = serde_json::to_string(&cfg)?;
    let back: LinalgConfig = serde_json::from_str(&json)?;
    assert_eq!(back, cfg);
    Ok(())
}

#[test]
fn test_partial_config_uses_defaults() -> Result<()> {
    let cfg: LinalgConfig = serde_json::from_str(r#"{"jacobi": {"max_sweeps": 7}}"#)?;
    assert_eq!(cfg.jacobi.max_sweeps, 7);
    assert_eq!(cfg.jacobi.tolerance, JacobiConfig::default().tolerance);
    assert_eq!(cfg.inverse.singular_threshold, 1e-16);

    let solver = JacobiSolver::new(cfg.jacobi);
    assert_eq!(solver.config().max_sweeps, 7);
    Ok(())
}

#[test]
fn test_norm_kind_selection() {
    assert_eq!("frobenius".parse::<NormKind>(), Ok(NormKind::Frobenius));
    assert_eq!("Max".parse::<NormKind>(), Ok(NormKind::Inf));
    assert_eq!(
        serde_json::from_str::<NormKind>(r#""one""#).expect("valid json"),
        NormKind::One
    );
    assert_eq!(
        NormKind::from_order(0.5).unwrap_err().kind(),
        ErrorKind::Unsupported
    );
}
