//! Simulation of the reference configuration.
//!
//! A car with a gas pedal and a GPS, its position and velocity estimated by a Kalman filter.
//! Prints the output table as columns, or as JSON with `--json`. An optional numeric argument
//! seeds the noise.
//!
//! Log output is controlled with RUST_LOG, for example `RUST_LOG=trace`.

use kalman_sim::simulation::Simulation;
use kalman_sim::{Category, ModelParameters};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let json = args.iter().any(|a| a == "--json");
    let seed = args.iter().find_map(|a| a.parse::<u64>().ok());

    let params = ModelParameters::reference().unwrap();
    let simulation = match seed {
        Some(seed) => Simulation::seeded(params, seed),
        None => Simulation::from_entropy(params),
    }
    .unwrap();
    let table = simulation.run().unwrap();

    if json {
        println!("{}", serde_json::to_string_pretty(&table).unwrap());
        return;
    }

    println!(
        "{:>5} {:>10} {:>10} {:>10} {:>10} {:>14} {:>10}",
        "step", "x_real", "x_measured", "x_estimate", "v_real", "v_measured", "v_estimate"
    );
    for step in 0..table.len() {
        let r = table.flat_row(step).unwrap();
        println!(
            "{:>5} {:>10.3} {:>10.3} {:>10.3} {:>10.3} {:>14.1} {:>10.3}",
            step, r[0], r[1], r[2], r[3], r[4], r[5]
        );
    }

    // Compare the filter with using the GPS directly, after the initial guess has been corrected
    let settled = table.len() / 2;
    let real = table.series(0, Category::Real);
    let mse = |series: Vec<f64>| -> f64 {
        let n = (series.len() - settled) as f64;
        series.iter().zip(real.iter()).skip(settled).map(|(v, r)| (v - r).powi(2)).sum::<f64>() / n
    };
    println!("position mse measured {:.3}", mse(table.series(0, Category::Measured)));
    println!("position mse estimated {:.3}", mse(table.series(0, Category::Estimated)));
}
