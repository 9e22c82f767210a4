// Bayesian optimization of a 1-D test function on [0, 5].
// Each round fits the GP, maximizes the acquisition over a grid and
// evaluates the objective at the suggestion. Prints one line per round:
//   round  x_next  y_next  best_y
// Choose the acquisition with the first argument: ucb | ei | pi (default ei).

use gpcore::session::GpSession;
use gpcore::{linspace, Acquisition, Kernel, Observation};

fn objective(x: f64) -> f64 {
    (3.0 * x).sin() * (-0.3 * (x - 2.5).powi(2)).exp() + 0.1 * x
}

fn main() {
    let acquisition = match std::env::args().nth(1).as_deref() {
        Some("ucb") => Acquisition::Ucb { beta: 2.0 },
        Some("pi") => Acquisition::probability_of_improvement(),
        _ => Acquisition::ExpectedImprovement,
    };

    let kernel = Kernel::rbf(0.4, 1.0).expect("valid kernel");
    let mut session = GpSession::new(kernel, 1e-4).expect("valid noise");
    for x in [0.5, 4.5] {
        session
            .add_observation(Observation::new(x, objective(x)))
            .expect("finite observation");
    }

    let grid = linspace(0.0, 5.0, 501);
    println!("{:>5} {:>8} {:>9} {:>9}", "round", "x_next", "y_next", "best_y");
    for round in 1..=12 {
        let Some(next) = session.suggest_next(&grid, &acquisition).expect("posterior") else {
            break;
        };
        let y = objective(next.x);
        session
            .add_observation(Observation::new(next.x, y))
            .expect("finite observation");
        let best = session.best_observation().map_or(f64::NAN, |o| o.y);
        println!("{round:>5} {:>8.4} {:>9.5} {:>9.5}", next.x, y, best);
    }

    let best = grid
        .iter()
        .map(|&x| objective(x))
        .fold(f64::NEG_INFINITY, f64::max);
    println!("grid optimum: {best:.5}");
}
