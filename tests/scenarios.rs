//! End-to-end scenarios across kernels, GP inference, regression and the
//! session object.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use gpcore::acquisition::suggest_next;
use gpcore::sampling::seeded_rng;
use gpcore::{
    compute_gp_posterior, compute_kernel_matrix, linspace, posterior_covariance, sample_posterior,
    sample_prior, Acquisition, BayesianLinearRegression, DynMatrix, GpError, GpSession, Kernel,
    LinalgError, MaternNu, Observation,
};

fn two_points() -> Vec<Observation<f64>> {
    vec![Observation::new(-1.0, 1.0), Observation::new(1.0, -1.0)]
}

#[test]
fn rbf_two_point_scenario() {
    let kernel = Kernel::rbf(0.3, 1.0).unwrap();
    let post = compute_gp_posterior(&[-1.0, 0.0, 1.0], &two_points(), &kernel, 0.05).unwrap();

    assert_abs_diff_eq!(post.mean[0], 1.0, epsilon = 0.05);
    assert_abs_diff_eq!(post.mean[2], -1.0, epsilon = 0.05);
    assert_abs_diff_eq!(post.mean[1], 0.0, epsilon = 0.3);
    assert!(post.variance[1] > post.variance[0]);
    assert!(post.variance[1] > post.variance[2]);

    // Observations are far apart in length-scale units, so each point is
    // conditioned on its own observation alone: σ²_post = 1 − 1/(1 + noise + jitter).
    let s = 1.0 + 0.05 + 1e-6;
    assert_relative_eq!(post.variance[0], 1.0 - 1.0 / s, max_relative = 1e-6);
    assert_relative_eq!(post.mean[0], 1.0 / s, max_relative = 1e-6);
}

#[test]
fn antisymmetric_data_gives_antisymmetric_mean() {
    for kernel in [
        Kernel::rbf(0.7, 1.0).unwrap(),
        Kernel::matern(0.7, 1.0, MaternNu::FiveHalves).unwrap(),
    ] {
        let q = linspace(-2.0, 2.0, 21);
        let post = compute_gp_posterior(&q, &two_points(), &kernel, 0.05).unwrap();
        for i in 0..q.len() {
            let j = q.len() - 1 - i;
            assert_abs_diff_eq!(post.mean[i], -post.mean[j], epsilon = 1e-12);
            assert_abs_diff_eq!(post.variance[i], post.variance[j], epsilon = 1e-12);
        }
    }
}

#[test]
fn periodic_kernel_extrapolates_periodically() {
    let kernel = Kernel::periodic(0.5_f64, 1.0, 2.0).unwrap();
    let obs = [Observation::new(0.25, 1.0)];
    let post = compute_gp_posterior(&[0.25, 2.25, 4.25], &obs, &kernel, 0.01).unwrap();
    assert_relative_eq!(post.mean[0], post.mean[1], max_relative = 1e-9);
    assert_relative_eq!(post.mean[0], post.mean[2], max_relative = 1e-9);
}

#[test]
fn kernel_matrix_shape_and_errors() {
    let k = Kernel::matern(1.0_f64, 2.0, MaternNu::Half).unwrap();
    let m = compute_kernel_matrix(&[0.0, 1.0, 2.0], &k).unwrap();
    assert_eq!(m.shape(), (3, 3));
    assert_relative_eq!(m[(0, 1)], 2.0 * (-1.0_f64).exp(), max_relative = 1e-14);
    assert_eq!(m, m.transpose());

    assert!(MaternNu::try_from(1.0).is_err());
    assert!(Kernel::rbf(1.0, -1.0).is_err());
}

#[test]
fn matrix_dimension_errors() {
    let a = DynMatrix::<f64>::zeros(2, 3);
    let b = DynMatrix::<f64>::zeros(2, 2);
    assert_eq!(
        a.add_mat(&b).unwrap_err(),
        LinalgError::DimensionMismatch {
            expected: (2, 3),
            got: (2, 2)
        }
    );
    assert!(a.matmul(&a).is_err());
    assert!(a.mul_vec(&[1.0, 2.0]).is_err());
    assert!(gpcore::dot(&[1.0], &[1.0, 2.0]).is_err());
}

#[test]
fn posterior_covariance_is_positive_semidefinite_on_diagonal() {
    let kernel = Kernel::rbf(0.5, 1.0).unwrap();
    let q = linspace(-2.0, 2.0, 15);
    let cov = posterior_covariance(&q, &two_points(), &kernel, 0.05).unwrap();
    for i in 0..q.len() {
        assert!(cov[(i, i)] >= -1e-12);
        for j in 0..q.len() {
            assert!(cov[(i, j)].abs() <= (cov[(i, i)] * cov[(j, j)]).sqrt() + 1e-9);
        }
    }
}

#[test]
fn seeded_sampling_is_reproducible() {
    let kernel = Kernel::rbf(0.5, 1.0).unwrap();
    let q = linspace(-1.0, 1.0, 30);

    let a = sample_prior(&q, &kernel, 4, &mut seeded_rng(123)).unwrap();
    let b = sample_prior(&q, &kernel, 4, &mut seeded_rng(123)).unwrap();
    assert_eq!(a, b);

    let c = sample_posterior(&q, &two_points(), &kernel, 0.05, 4, &mut seeded_rng(123)).unwrap();
    let d = sample_posterior(&q, &two_points(), &kernel, 0.05, 4, &mut seeded_rng(123)).unwrap();
    assert_eq!(c, d);
    assert_ne!(a, c);
}

#[test]
fn prior_samples_have_kernel_variance() {
    let kernel = Kernel::rbf(0.5_f64, 2.0).unwrap();
    let samples = sample_prior(&[0.0], &kernel, 4000, &mut seeded_rng(1)).unwrap();
    let n = samples.len() as f64;
    let mean = samples.iter().map(|s| s[0]).sum::<f64>() / n;
    let var = samples.iter().map(|s| (s[0] - mean).powi(2)).sum::<f64>() / n;
    assert_abs_diff_eq!(mean, 0.0, epsilon = 0.1);
    assert_abs_diff_eq!(var, 2.0, epsilon = 0.2);
}

#[test]
fn argmax_over_posterior() {
    let kernel = Kernel::rbf(0.5, 1.0).unwrap();
    let obs = two_points();
    let q = linspace(-3.0, 3.0, 61);
    let post = compute_gp_posterior(&q, &obs, &kernel, 1e-4).unwrap();

    // Exploit-heavy UCB lands next to the best observation.
    let s = suggest_next(&q, &post, &Acquisition::Ucb { beta: 0.0 }, 1.0).unwrap();
    assert!((s.x + 1.0).abs() <= 0.3, "x = {}", s.x);
    assert_eq!(s.score, post.mean[s.index]);

    // EI never proposes re-sampling an observed point.
    let s = suggest_next(&q, &post, &Acquisition::ExpectedImprovement, 1.0).unwrap();
    assert!((s.x + 1.0).abs() > 1e-9 && (s.x - 1.0).abs() > 1e-9);
}

#[test]
fn regression_recovers_line() {
    let obs: Vec<_> = linspace(-2.0_f64, 2.0, 15)
        .into_iter()
        .map(|x| Observation::new(x, 0.25 - 0.75 * x))
        .collect();
    let post = BayesianLinearRegression::new(10.0, 1e-6).unwrap().fit(&obs).unwrap();
    let [w0, w1] = post.mean();
    assert_abs_diff_eq!(w0, 0.25, epsilon = 1e-4);
    assert_abs_diff_eq!(w1, -0.75, epsilon = 1e-4);
}

#[test]
fn session_workflow() {
    let mut s = GpSession::new(Kernel::rbf(0.3, 1.0).unwrap(), 0.05)
        .unwrap()
        .with_seed(9);
    for o in two_points() {
        s.add_observation(o).unwrap();
    }
    let q = [-1.0, 0.0, 1.0];
    let before = s.posterior(&q).unwrap();
    assert_abs_diff_eq!(before.mean[0], 1.0, epsilon = 0.05);

    s.remove_nearest(-0.95, 0.1).unwrap();
    let after = s.posterior(&q).unwrap();
    assert!(after.variance[0] > before.variance[0]);

    assert!(matches!(
        s.set_noise_variance(f64::INFINITY),
        Err(GpError::InvalidNoise { .. })
    ));
    s.set_noise_variance(0.0).unwrap();
    assert_eq!(s.noise_variance(), 0.0);
}

#[test]
fn f32_pipeline() {
    let kernel = Kernel::rbf(0.3_f32, 1.0).unwrap();
    let obs = [Observation::new(-1.0_f32, 1.0), Observation::new(1.0, -1.0)];
    let post = compute_gp_posterior(&[-1.0, 0.0, 1.0], &obs, &kernel, 0.05).unwrap();
    assert_abs_diff_eq!(post.mean[0], 1.0, epsilon = 0.05);
    assert_abs_diff_eq!(post.mean[2], -1.0, epsilon = 0.05);
    let samples = sample_prior(&[0.0_f32, 0.5], &kernel, 2, &mut seeded_rng(0)).unwrap();
    assert!(samples.iter().flatten().all(|v| v.is_finite()));
}
