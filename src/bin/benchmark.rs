//! Phasepath Benchmark Suite

use phasepath::{
    CurveMode, Domain, InterferenceParams, MechanicsParams, Point, RefractionParams,
    SimulationState,
};

use std::time::Instant;

fn benchmark_recompute(label: &str, domain: Domain, counts: &[usize]) {
    println!("\n{}", "=".repeat(60));
    println!("BENCHMARK: {}", label);
    println!("{}", "=".repeat(60));

    for &count in counts {
        let mut state = SimulationState::new(domain);
        state.target = Point::new(650.0, 100.0);
        state.sampling.count = count;
        state.sampling.seed = 42;

        // Warm up
        for _ in 0..5 {
            let _ = state.recompute();
        }

        let n_iters = 100;
        let start = Instant::now();
        for _ in 0..n_iters {
            let _ = state.recompute();
        }
        let elapsed = start.elapsed().as_secs_f64() / n_iters as f64;

        let snapshot = state.recompute();
        println!(
            "  count {:>4}: {:.3} ms  ({} candidates, |sum|/n = {:.3})",
            count,
            elapsed * 1000.0,
            snapshot.candidates.len(),
            snapshot.interference.normalized_magnitude
        );
    }
}

fn benchmark_curve_modes() {
    println!("\n{}", "=".repeat(60));
    println!("BENCHMARK: Curve Sampling Modes (mechanics, 200 candidates)");
    println!("{}", "=".repeat(60));

    for mode in [CurveMode::Spray, CurveMode::Neighborhood, CurveMode::Grid] {
        let mut state = SimulationState::new(Domain::Mechanics(MechanicsParams::default()));
        state.target = Point::new(650.0, 100.0);
        state.sampling.mode = mode;
        state.sampling.count = 200;

        let n_iters = 100;
        let start = Instant::now();
        for _ in 0..n_iters {
            let _ = state.recompute();
        }
        let elapsed = start.elapsed().as_secs_f64() / n_iters as f64;

        println!("  {:?}: {:.3} ms", mode, elapsed * 1000.0);
    }
}

fn benchmark_intensity_profile() {
    println!("\n{}", "=".repeat(60));
    println!("BENCHMARK: Two-Slit Intensity Profile (120 screen positions)");
    println!("{}", "=".repeat(60));

    let mut state = SimulationState::new(Domain::Interference(InterferenceParams::default()));
    state.source = Point::new(100.0, 300.0);
    state.target = Point::new(700.0, 300.0);

    let screen_ys: Vec<f64> = (0..120).map(|i| 60.0 + 4.0 * i as f64).collect();

    let n_iters = 50;
    let start = Instant::now();
    for _ in 0..n_iters {
        let _ = state.intensity_profile(&screen_ys);
    }
    let elapsed = start.elapsed().as_secs_f64() / n_iters as f64;

    println!("  full scan: {:.3} ms", elapsed * 1000.0);
}

fn main() {
    println!("\n{}", "#".repeat(60));
    println!("#  Phasepath Benchmark Suite");
    println!("{}", "#".repeat(60));

    let counts = [50, 100, 200];
    benchmark_recompute(
        "Refraction Recompute",
        Domain::Refraction(RefractionParams::default()),
        &counts,
    );
    benchmark_recompute(
        "Mechanics Recompute",
        Domain::Mechanics(MechanicsParams::default()),
        &counts,
    );
    benchmark_curve_modes();
    benchmark_intensity_profile();

    println!("\n{}", "=".repeat(60));
    println!("BENCHMARK COMPLETE");
    println!("{}", "=".repeat(60));
}
