// Runs in its own test binary so setting MATRIX_TRACE cannot leak into other tests.

use dense_matrix::Matrix;

#[test]
fn test_qr_with_trace_enabled() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Trace)
        .try_init();
    std::env::set_var("MATRIX_TRACE", "1");

    let a = Matrix::random_seeded(99, 6, 6).unwrap();
    let qr = a.decompose_qr().unwrap();
    assert!(qr.reconstruct().unwrap().equals_within_tolerance(&a, 1e-10));

    let dependent = Matrix::from_nested(&[[1.0, 2.0], [2.0, 4.0]]).unwrap();
    assert!(dependent.decompose_qr().is_ok());
}
