//! Property-based tests for kernels, factorization and GP inference.

use gpcore::acquisition::{expected_improvement, probability_of_improvement, ucb};
use gpcore::gp::DIAGONAL_JITTER;
use gpcore::linalg::{cholesky, solve_lower_triangular, solve_upper_triangular};
use gpcore::{compute_gp_posterior, DynMatrix, Kernel, MaternNu, Observation};
use proptest::prelude::*;

// ===== Strategies =====

fn arb_nu() -> impl Strategy<Value = MaternNu> {
    prop_oneof![
        Just(MaternNu::Half),
        Just(MaternNu::ThreeHalves),
        Just(MaternNu::FiveHalves),
    ]
}

fn arb_kernel() -> impl Strategy<Value = Kernel<f64>> {
    let ls = 0.05..5.0_f64;
    let var = 0.1..5.0_f64;
    prop_oneof![
        (ls.clone(), var.clone()).prop_map(|(l, v)| Kernel::rbf(l, v).unwrap()),
        (ls.clone(), var.clone(), arb_nu()).prop_map(|(l, v, nu)| Kernel::matern(l, v, nu).unwrap()),
        (ls, var, 0.1..5.0_f64).prop_map(|(l, v, p)| Kernel::periodic(l, v, p).unwrap()),
    ]
}

/// `B·Bᵀ + n·I` with entries of `B` in [-1, 1].
fn arb_spd() -> impl Strategy<Value = DynMatrix<f64>> {
    (2usize..=20).prop_flat_map(|n| {
        prop::collection::vec(-1.0..1.0_f64, n * n).prop_map(move |data| {
            let b = DynMatrix::from_row_slice(n, n, &data);
            let mut a = b.matmul(&b.transpose()).unwrap();
            a.add_to_diagonal(n as f64);
            a
        })
    })
}

fn arb_observations() -> impl Strategy<Value = Vec<Observation<f64>>> {
    prop::collection::vec((-3.0..3.0_f64, -3.0..3.0_f64), 1..15)
        .prop_map(|v| v.into_iter().map(Observation::from).collect())
}

// ===== Kernels =====

proptest! {
    #[test]
    fn prop_kernel_symmetric(k in arb_kernel(), x1 in -10.0..10.0_f64, x2 in -10.0..10.0_f64) {
        prop_assert_eq!(k.eval(x1, x2), k.eval(x2, x1));
    }

    #[test]
    fn prop_kernel_self_covariance(k in arb_kernel(), x in -10.0..10.0_f64) {
        prop_assert_eq!(k.eval(x, x), k.variance());
    }

    #[test]
    fn prop_kernel_bounded_by_variance(k in arb_kernel(), x1 in -10.0..10.0_f64, x2 in -10.0..10.0_f64) {
        let v = k.eval(x1, x2);
        prop_assert!(v >= 0.0);
        prop_assert!(v <= k.variance() * (1.0 + 1e-12));
    }
}

// ===== Linear algebra =====

proptest! {
    #[test]
    fn prop_cholesky_reconstructs(a in arb_spd()) {
        let l = cholesky(&a).unwrap();
        let llt = l.matmul(&l.transpose()).unwrap();
        prop_assert_eq!(llt.shape(), a.shape());
        for (x, y) in llt.as_slice().iter().zip(a.as_slice()) {
            prop_assert!((x - y).abs() < 1e-6);
        }
    }

    #[test]
    fn prop_triangular_round_trip(a in arb_spd(), seed in prop::collection::vec(-5.0..5.0_f64, 20)) {
        let n = a.nrows();
        let l = cholesky(&a).unwrap();
        let x_true = &seed[..n];

        let b = l.mul_vec(x_true).unwrap();
        let x = solve_lower_triangular(&l, &b).unwrap();
        for (xi, ti) in x.iter().zip(x_true) {
            prop_assert!((xi - ti).abs() < 1e-6);
        }

        let lt = l.transpose();
        let b = lt.mul_vec(x_true).unwrap();
        let x = solve_upper_triangular(&lt, &b).unwrap();
        for (xi, ti) in x.iter().zip(x_true) {
            prop_assert!((xi - ti).abs() < 1e-6);
        }
    }
}

// ===== GP inference =====

proptest! {
    #[test]
    fn prop_single_point_zero_noise_interpolates(
        x in -5.0..5.0_f64,
        y in -10.0..10.0_f64,
        ls in 0.1..3.0_f64,
        var in 0.1..5.0_f64,
    ) {
        let k = Kernel::rbf(ls, var).unwrap();
        let p = compute_gp_posterior(&[x], &[Observation::new(x, y)], &k, 0.0).unwrap();
        prop_assert!((p.mean[0] - y).abs() < 1e-2);
        prop_assert!(p.variance[0] >= 0.0);
        prop_assert!(p.variance[0] <= DIAGONAL_JITTER + 1e-12);
    }

    #[test]
    fn prop_variance_non_negative(
        k in arb_kernel(),
        obs in arb_observations(),
        noise in 0.0..1.0_f64,
    ) {
        let q = gpcore::linspace(-4.0, 4.0, 33);
        let p = compute_gp_posterior(&q, &obs, &k, noise).unwrap();
        prop_assert_eq!(p.len(), q.len());
        prop_assert!(p.variance.iter().all(|&v| v >= 0.0));
        prop_assert!(p.mean.iter().all(|m| m.is_finite()));
    }

    #[test]
    fn prop_no_data_is_prior(k in arb_kernel(), q in prop::collection::vec(-5.0..5.0_f64, 0..20)) {
        let p = compute_gp_posterior(&q, &[], &k, 0.1).unwrap();
        prop_assert!(p.mean.iter().all(|&m| m == 0.0));
        prop_assert!(p.variance.iter().all(|&v| v == k.variance()));
    }
}

// ===== Acquisition =====

proptest! {
    #[test]
    fn prop_ucb_strictly_increasing_in_beta(
        mean in -10.0..10.0_f64,
        std in 0.01..10.0_f64,
        beta in 0.0..10.0_f64,
        delta in 0.01..5.0_f64,
    ) {
        prop_assert!(ucb(mean, std, beta + delta) > ucb(mean, std, beta));
    }

    #[test]
    fn prop_ei_pi_vanish_below_threshold(mean in -10.0..10.0_f64, best in -10.0..10.0_f64) {
        prop_assert_eq!(expected_improvement(mean, 0.0005, best), 0.0);
        prop_assert_eq!(probability_of_improvement(mean, 0.0005, best, 0.01), 0.0);
    }

    #[test]
    fn prop_pi_is_probability(mean in -10.0..10.0_f64, std in 0.001..10.0_f64, best in -10.0..10.0_f64) {
        let p = probability_of_improvement(mean, std, best, 0.01);
        prop_assert!((0.0..=1.0).contains(&p));
    }
}
