// GP regression on five noisy samples of sin(2x).
// Prints JSON with the posterior over 200 grid points, a 95% band, three
// posterior sample paths and the model evidence:
//   {"ox":[...], "oy":[...], "x":[...], "mean":[...], "lower":[...],
//    "upper":[...], "samples":[[...],...], "lml":...}
// Pipe into any plotting tool.

use gpcore::session::GpSession;
use gpcore::{linspace, Kernel, MaternNu, Observation};

fn fmt_arr(v: &[f64]) -> String {
    let inner: Vec<String> = v.iter().map(|x| format!("{x:.6}")).collect();
    format!("[{}]", inner.join(","))
}

fn main() {
    let kernel = match std::env::args().nth(1).as_deref() {
        Some("matern") => Kernel::matern(0.5, 1.0, MaternNu::ThreeHalves),
        Some("periodic") => Kernel::periodic(0.8, 1.0, std::f64::consts::PI),
        _ => Kernel::rbf(0.5, 1.0),
    }
    .expect("valid kernel");

    let mut session = GpSession::new(kernel, 0.01).expect("valid noise").with_seed(42);
    for (x, noise) in [(-2.5_f64, 0.05), (-1.2, -0.08), (0.1, 0.02), (0.9, -0.03), (2.2, 0.07)] {
        let y: f64 = (2.0 * x).sin() + noise;
        session
            .add_observation(Observation::new(x, y))
            .expect("finite observation");
    }

    let grid = linspace(-3.0, 3.0, 200);
    let post = session.posterior(&grid).expect("posterior");
    let (lower, upper) = post.credible_interval(0.95).expect("valid level");
    let samples = session.sample_posterior(&grid, 3).expect("samples");
    let lml = session.log_marginal_likelihood().expect("evidence");

    let ox: Vec<f64> = session.observations().iter().map(|o| o.x).collect();
    let oy: Vec<f64> = session.observations().iter().map(|o| o.y).collect();
    let samples: Vec<String> = samples.iter().map(|s| fmt_arr(s)).collect();

    println!(
        "{{\"kernel\":\"{}\",\"ox\":{},\"oy\":{},\"x\":{},\"mean\":{},\"lower\":{},\"upper\":{},\"samples\":[{}],\"lml\":{:.6}}}",
        session.kernel().name(),
        fmt_arr(&ox),
        fmt_arr(&oy),
        fmt_arr(&grid),
        fmt_arr(&post.mean),
        fmt_arr(&lower),
        fmt_arr(&upper),
        samples.join(","),
        lml
    );
}
