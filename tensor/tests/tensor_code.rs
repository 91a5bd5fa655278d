use std::collections::HashSet;
use std::sync::Arc;

use itertools::Itertools;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tc_code::LinearCode;
use tc_field::{Fq, GaloisField};
use tc_matrix::echelon::rank;
use tc_matrix::{Dimensions, Matrix};
use tc_tensor::{
    CodeMatrix, DecodeFailure, DecodeStatus, DecoderConfig, TensorCodeError, TensorProductCode,
};
use tracing_forest::ForestLayer;
use tracing_forest::util::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

fn init_tracing() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    let _ = Registry::default()
        .with(env_filter)
        .with(ForestLayer::default())
        .try_init();
}

fn gf(q: u32) -> Arc<GaloisField> {
    Arc::new(GaloisField::new(q).unwrap())
}

fn spc_squared(q: u32, n: usize) -> TensorProductCode {
    let spc = LinearCode::single_parity_check(gf(q), n).unwrap();
    TensorProductCode::new(spc.clone(), spc).unwrap()
}

/// A few component pairs over different fields.
fn sample_codes() -> Vec<TensorProductCode> {
    let gf2 = gf(2);
    let gf4 = gf(4);
    let gf8 = gf(8);
    vec![
        TensorProductCode::new(
            LinearCode::single_parity_check(gf2.clone(), 3).unwrap(),
            LinearCode::hamming(gf2, 3).unwrap(),
        )
        .unwrap(),
        TensorProductCode::new(
            LinearCode::repetition(gf4.clone(), 3).unwrap(),
            LinearCode::single_parity_check(gf4, 4).unwrap(),
        )
        .unwrap(),
        TensorProductCode::new(
            LinearCode::reed_solomon(gf8.clone(), 7, 3).unwrap(),
            LinearCode::reed_solomon(gf8, 5, 2).unwrap(),
        )
        .unwrap(),
    ]
}

fn random_message(tpc: &TensorProductCode, rng: &mut SmallRng) -> CodeMatrix {
    let Dimensions { height, width } = tpc.message_shape();
    CodeMatrix::rand(tpc.field(), rng, height, width)
}

/// Membership checked directly against the component codes.
fn rows_and_columns_in_components(tpc: &TensorProductCode, m: &CodeMatrix) -> (bool, bool) {
    let rows = m.rows().all(|r| tpc.row_code().is_codeword(r).unwrap());
    let columns =
        (0..m.width()).all(|j| tpc.column_code().is_codeword(&m.column(j)).unwrap());
    (rows, columns)
}

#[test]
fn test_encode_then_check() {
    init_tracing();
    let mut rng = SmallRng::seed_from_u64(1);
    for tpc in sample_codes() {
        for _ in 0..10 {
            let message = random_message(&tpc, &mut rng);
            let codeword = tpc.encode(&message).unwrap();
            assert_eq!(codeword.dimensions(), tpc.shape());
            assert!(tpc.is_codeword(&codeword).unwrap());
        }
    }
}

#[test]
fn test_membership_is_separable() {
    let gf2 = gf(2);
    // Columns must be constant, rows must have even weight.
    let tpc = TensorProductCode::new(
        LinearCode::repetition(gf2.clone(), 3).unwrap(),
        LinearCode::single_parity_check(gf2, 3).unwrap(),
    )
    .unwrap();

    let rows_only = CodeMatrix::from_u32_rows(&[[1, 0, 0], [1, 0, 0], [1, 0, 0]]).unwrap();
    let columns_only = CodeMatrix::from_u32_rows(&[[1, 1, 0], [0, 0, 0], [0, 0, 0]]).unwrap();
    let both = CodeMatrix::from_u32_rows(&[[1, 0, 0], [0, 0, 0], [0, 0, 0]]).unwrap();
    let neither = CodeMatrix::from_u32_rows(&[[0, 1, 1], [0, 1, 1], [0, 1, 1]]).unwrap();

    for (m, expected) in [
        (&rows_only, (false, true)),
        (&columns_only, (true, false)),
        (&both, (false, false)),
        (&neither, (true, true)),
    ] {
        assert_eq!(rows_and_columns_in_components(&tpc, m), expected);
        assert_eq!(tpc.is_codeword(m).unwrap(), expected == (true, true));
    }

    let v = tpc.violations(&rows_only).unwrap();
    assert_eq!((v.rows, v.columns), (vec![0, 1, 2], vec![]));
    let v = tpc.violations(&columns_only).unwrap();
    assert_eq!((v.rows, v.columns), (vec![], vec![0, 1]));
}

#[test]
fn test_membership_matches_components_on_random_matrices() {
    let mut rng = SmallRng::seed_from_u64(2);
    for tpc in sample_codes() {
        let Dimensions { height, width } = tpc.shape();
        for _ in 0..20 {
            // Mostly non-codewords, plus a codeword with one entry moved.
            let random = CodeMatrix::rand(tpc.field(), &mut rng, height, width);
            let codeword = tpc.encode(&random_message(&tpc, &mut rng)).unwrap();
            let nudged = codeword.with_entry(0, 0, tpc.field().add(codeword.get(0, 0), Fq::ONE));
            for m in [random, codeword, nudged] {
                let (rows, columns) = rows_and_columns_in_components(&tpc, &m);
                assert_eq!(tpc.is_codeword(&m).unwrap(), rows && columns);
            }
        }
    }
}

#[test]
fn test_dimension_law() {
    for tpc in sample_codes() {
        let g = tpc.generator_matrix();
        assert_eq!(g.height(), tpc.dimension());
        assert_eq!(rank(tpc.field(), &g), tpc.dimension());
    }

    // Every message of SPC(3) ⊗ SPC(3) over GF(3) gives a distinct codeword.
    let tpc = spc_squared(3, 3);
    let codewords: HashSet<CodeMatrix> = (0..4)
        .map(|_| 0..3u32)
        .multi_cartesian_product()
        .map(|m| {
            let message = CodeMatrix::from_u32_rows(&[&m[..2], &m[2..]]).unwrap();
            tpc.encode(&message).unwrap()
        })
        .collect();
    assert_eq!(codewords.len(), 3usize.pow(4));
}

#[test]
fn test_decode_is_identity_on_codewords() {
    init_tracing();
    let mut rng = SmallRng::seed_from_u64(3);
    for tpc in sample_codes() {
        let codeword = tpc.encode(&random_message(&tpc, &mut rng)).unwrap();
        let decoded = tpc.decode(&codeword, 0).unwrap().unwrap();
        assert_eq!(decoded.matrix, codeword);
        assert_eq!((decoded.passes, decoded.residual_violations), (0, 0));
    }
}

#[test]
fn test_single_parity_product_corrects_any_single_error() {
    init_tracing();
    let mut rng = SmallRng::seed_from_u64(4);
    for (q, n) in [(2, 3), (2, 5), (3, 4), (4, 3)] {
        let tpc = spc_squared(q, n);
        let field = tpc.field().clone();
        let codeword = tpc.encode(&random_message(&tpc, &mut rng)).unwrap();
        for (i, j) in (0..n).cartesian_product(0..n) {
            let delta = field.random_nonzero(&mut rng);
            let corrupted = codeword.with_entry(i, j, field.add(codeword.get(i, j), delta));
            assert_eq!(tpc.violations(&corrupted).unwrap().count(), 2);

            let decoded = tpc.decode(&corrupted, 1).unwrap().unwrap();
            assert_eq!(decoded.matrix, codeword, "GF({q}), n = {n}, error at ({i}, {j})");
            assert_eq!(decoded.status, DecodeStatus::Converged);
        }
    }
}

#[test]
fn test_over_budget_corruption_fails() {
    init_tracing();
    let tpc = spc_squared(2, 4);
    let codeword = tpc
        .encode(&CodeMatrix::from_u32_rows(&[[1, 0, 1], [0, 1, 1], [1, 1, 1]]).unwrap())
        .unwrap();
    let flip = |m: CodeMatrix, i: usize, j: usize| {
        let v = tpc.field().add(m.get(i, j), Fq::ONE);
        m.with_entry(i, j, v)
    };
    // Two errors in distinct rows and columns: four violations, and no component can help.
    let corrupted = flip(flip(codeword, 0, 0), 2, 3);

    for max_violations in 0..4 {
        let result = tpc.decode(&corrupted, max_violations).unwrap();
        assert_eq!(
            result,
            Err(DecodeFailure {
                status: DecodeStatus::Stalled,
                violations: 4,
                max_violations,
                passes: 2,
            })
        );
    }
}

#[test]
fn test_reed_solomon_product_corrects_column_burst() {
    let field = gf(8);
    let rs = LinearCode::reed_solomon(field.clone(), 7, 3).unwrap();
    let tpc = TensorProductCode::new(rs.clone(), rs).unwrap();
    let mut rng = SmallRng::seed_from_u64(5);
    let codeword = tpc.encode(&random_message(&tpc, &mut rng)).unwrap();

    // Five errors down column 3 exceed the column code's radius, but every row holds at most
    // two errors.
    let positions = (0..5).map(|i| (i, 3)).chain([(6, 0), (6, 6)]);
    let corrupted = positions.fold(codeword.clone(), |m, (i, j)| {
        let v = field.add(m.get(i, j), field.random_nonzero(&mut rng));
        m.with_entry(i, j, v)
    });
    assert_eq!(corrupted.distance(&codeword), Some(7));

    let decoded = tpc.decode(&corrupted, 0).unwrap().unwrap();
    assert_eq!(decoded.matrix, codeword);
    assert_eq!(decoded.passes, 1);
}

#[test]
fn test_shape_errors() {
    let tpc = spc_squared(2, 3);
    assert_eq!(
        tpc.encode(&CodeMatrix::zeros(3, 3)),
        Err(TensorCodeError::ShapeMismatch {
            what: "message",
            expected: Dimensions::new(2, 2),
            actual: Dimensions::new(3, 3),
        })
    );
    assert!(matches!(
        tpc.is_codeword(&CodeMatrix::zeros(3, 2)),
        Err(TensorCodeError::ShapeMismatch { .. })
    ));
    assert!(matches!(
        tpc.decode(&CodeMatrix::zeros(2, 3), 10),
        Err(TensorCodeError::ShapeMismatch { .. })
    ));
    assert!(tpc.is_codeword(&CodeMatrix::zeros(3, 3)).unwrap());
}

#[test]
fn test_field_mismatch_only_for_different_fields() {
    let c2 = LinearCode::repetition(gf(2), 2).unwrap();
    let c4 = LinearCode::repetition(gf(4), 2).unwrap();
    assert!(matches!(
        TensorProductCode::new(c2.clone(), c4),
        Err(TensorCodeError::FieldMismatch { .. })
    ));
    assert!(TensorProductCode::new(c2.clone(), LinearCode::repetition(gf(2), 5).unwrap()).is_ok());
}

#[test]
fn test_nested_tensor_product() {
    let gf2 = gf(2);
    let inner = spc_squared(2, 3).as_linear_code().unwrap();
    let outer = TensorProductCode::new(LinearCode::repetition(gf2, 2).unwrap(), inner).unwrap();
    assert_eq!(outer.shape(), Dimensions::new(2, 9));
    assert_eq!(outer.dimension(), 4);
    assert_eq!(outer.minimum_distance(), 8);

    let message = CodeMatrix::from_u32_rows(&[[1, 0, 1, 1]]).unwrap();
    let codeword = outer.encode(&message).unwrap();
    assert!(outer.is_codeword(&codeword).unwrap());
}

#[test]
fn test_decoder_config_from_json() {
    let config: DecoderConfig = serde_json::from_str(r#"{ "max_passes": 3 }"#).unwrap();
    assert_eq!(config.max_passes, 3);
    let config: DecoderConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, DecoderConfig::default());
    assert_eq!(config.max_passes, DecoderConfig::DEFAULT_MAX_PASSES);
}
