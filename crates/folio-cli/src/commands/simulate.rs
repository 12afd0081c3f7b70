use std::time::Instant;

use anyhow::{bail, Context, Result};
use serde::Serialize;

use folio_core::particles::{
    FrameContext, ParticleSimulator, PointerState, RecordingSurface, MAX_OPACITY, MIN_OPACITY,
};
use folio_core::AppConfig;

pub struct SimulateOptions {
    pub width: f64,
    pub height: f64,
    pub ticks: u64,
    pub pointer: Option<(f64, f64)>,
    pub seed: Option<u64>,
    pub json: bool,
}

#[derive(Debug, Serialize)]
pub struct SimulationReport {
    pub width: f64,
    pub height: f64,
    pub particles: usize,
    pub ticks: u64,
    /// Particle positions found outside the field after a frame
    pub out_of_bounds: u64,
    pub non_finite: u64,
    pub opacity_violations: u64,
    pub min_connections: usize,
    pub max_connections: usize,
    pub mean_connections: f64,
    pub elapsed_ms: f64,
}

impl SimulationReport {
    pub fn violations(&self) -> u64 {
        self.out_of_bounds + self.non_finite + self.opacity_violations
    }
}

pub fn run(config: &AppConfig, options: &SimulateOptions) -> Result<()> {
    let report = simulate(config, options);

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "Simulated {} particles for {} ticks on {}x{}",
            report.particles, report.ticks, report.width, report.height
        );
        println!(
            "  Connections per frame: min {} / mean {:.1} / max {}",
            report.min_connections, report.mean_connections, report.max_connections
        );
        println!("  Out of bounds: {}", report.out_of_bounds);
        println!("  Non-finite positions: {}", report.non_finite);
        println!("  Opacity outside band: {}", report.opacity_violations);
        println!("  Elapsed: {:.1} ms", report.elapsed_ms);
    }

    if report.violations() > 0 {
        bail!("simulation broke {} particle invariants", report.violations());
    }
    Ok(())
}

/// Run the simulator headless at the reference frame rate
pub fn simulate(config: &AppConfig, options: &SimulateOptions) -> SimulationReport {
    let mut particle_config = config.particles.clone();
    if options.seed.is_some() {
        particle_config.seed = options.seed;
    }

    let mut simulator = ParticleSimulator::new(particle_config, options.width, options.height);
    simulator.start();
    let (width, height) = simulator.size();

    let pointer = match options.pointer {
        Some((x, y)) => PointerState::at(x, y),
        None => PointerState::default(),
    };
    let frame = FrameContext::fixed(pointer);
    let mut surface = RecordingSurface::new();

    let mut report = SimulationReport {
        width,
        height,
        particles: simulator.particles().len(),
        ticks: options.ticks,
        out_of_bounds: 0,
        non_finite: 0,
        opacity_violations: 0,
        min_connections: usize::MAX,
        max_connections: 0,
        mean_connections: 0.0,
        elapsed_ms: 0.0,
    };

    let started = Instant::now();
    let mut total_connections = 0usize;
    for _ in 0..options.ticks {
        simulator.tick(&frame, &mut surface);

        let connections = surface.lines().count();
        total_connections += connections;
        report.min_connections = report.min_connections.min(connections);
        report.max_connections = report.max_connections.max(connections);

        for particle in simulator.particles() {
            if !particle.x.is_finite() || !particle.y.is_finite() {
                report.non_finite += 1;
            } else if !particle.is_within(width, height) {
                report.out_of_bounds += 1;
            }
            if !(MIN_OPACITY..=MAX_OPACITY).contains(&particle.opacity) {
                report.opacity_violations += 1;
            }
        }
    }
    report.elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    if options.ticks == 0 {
        report.min_connections = 0;
    } else {
        report.mean_connections = total_connections as f64 / options.ticks as f64;
    }
    tracing::debug!("Simulation finished in {:.1} ms", report.elapsed_ms);
    report
}

/// Parse a pointer position written as `x,y`
pub fn parse_pointer(value: &str) -> Result<(f64, f64)> {
    let (x, y) = value
        .split_once(',')
        .with_context(|| format!("pointer '{}' should look like x,y", value))?;
    let x: f64 = x.trim().parse().with_context(|| format!("invalid pointer x '{}'", x))?;
    let y: f64 = y.trim().parse().with_context(|| format!("invalid pointer y '{}'", y))?;
    if !x.is_finite() || !y.is_finite() {
        bail!("pointer '{}' is not finite", value);
    }
    Ok((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(ticks: u64, pointer: Option<(f64, f64)>) -> SimulateOptions {
        SimulateOptions {
            width: 800.0,
            height: 600.0,
            ticks,
            pointer,
            seed: Some(11),
            json: false,
        }
    }

    #[test]
    fn test_parse_pointer() {
        assert_eq!(parse_pointer("400,300").unwrap(), (400.0, 300.0));
        assert_eq!(parse_pointer(" 1.5 , -2 ").unwrap(), (1.5, -2.0));
        assert!(parse_pointer("400").is_err());
        assert!(parse_pointer("a,b").is_err());
        assert!(parse_pointer("inf,0").is_err());
    }

    #[test]
    fn test_simulation_keeps_invariants() {
        let report = simulate(&AppConfig::default(), &options(500, Some((400.0, 300.0))));
        assert_eq!(report.particles, 50);
        assert_eq!(report.violations(), 0);
        assert!(report.min_connections <= report.max_connections);
    }

    #[test]
    fn test_same_seed_same_connections() {
        let a = simulate(&AppConfig::default(), &options(100, None));
        let b = simulate(&AppConfig::default(), &options(100, None));
        assert_eq!(a.max_connections, b.max_connections);
        assert_eq!(a.mean_connections, b.mean_connections);
    }

    #[test]
    fn test_zero_ticks() {
        let report = simulate(&AppConfig::default(), &options(0, None));
        assert_eq!(report.min_connections, 0);
        assert_eq!(report.mean_connections, 0.0);
    }
}
