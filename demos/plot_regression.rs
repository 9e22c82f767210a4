// Bayesian linear regression on noisy samples of y = 0.5 + 0.8x.
// Prints JSON with the predictive mean, a ±2σ band and five sampled lines:
//   {"ox":[...], "oy":[...], "x":[...], "mean":[...], "lower":[...],
//    "upper":[...], "lines":[[...],...], "weights":[w0, w1]}

use gpcore::sampling::seeded_rng;
use gpcore::{linspace, BayesianLinearRegression, Observation};

fn fmt_arr(v: &[f64]) -> String {
    let inner: Vec<String> = v.iter().map(|x| format!("{x:.6}")).collect();
    format!("[{}]", inner.join(","))
}

fn main() {
    let obs: Vec<Observation<f64>> = [(-1.5, -0.9), (-0.4, 0.3), (0.3, 0.6), (1.1, 1.5), (1.8, 1.8)]
        .into_iter()
        .map(Observation::from)
        .collect();

    let model = BayesianLinearRegression::new(2.0, 0.1).expect("valid hyperparameters");
    let post = model.fit(&obs).expect("fit");

    let grid = linspace(-2.0, 2.0, 100);
    let pred = post.predict(&grid);
    let (lower, upper) = pred.band(2.0);
    let lines = post
        .sample_lines(&grid, 5, &mut seeded_rng(7))
        .expect("samples");

    let ox: Vec<f64> = obs.iter().map(|o| o.x).collect();
    let oy: Vec<f64> = obs.iter().map(|o| o.y).collect();
    let lines: Vec<String> = lines.iter().map(|l| fmt_arr(l)).collect();

    println!(
        "{{\"ox\":{},\"oy\":{},\"x\":{},\"mean\":{},\"lower\":{},\"upper\":{},\"lines\":[{}],\"weights\":{}}}",
        fmt_arr(&ox),
        fmt_arr(&oy),
        fmt_arr(&grid),
        fmt_arr(&pred.mean),
        fmt_arr(&lower),
        fmt_arr(&upper),
        lines.join(","),
        fmt_arr(&post.mean())
    );
}
