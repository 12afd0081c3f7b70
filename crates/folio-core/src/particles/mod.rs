//! Continuous particle background
//!
//! A fixed-size field of drifting particles, gently pulled towards the
//! pointer and linked by faint lines when close. The host calls
//! [`ParticleSimulator::tick`] once per frame with a [`FrameContext`]
//! carrying the pointer and the time since the previous frame; the simulator
//! keeps no global state, so several can coexist.

pub mod connections;
pub mod particle;
pub mod surface;

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub use connections::{brute_force_pairs, grid_pairs, link_alpha, Connection};
pub use particle::{Particle, Rgba, LINK_COLOR, MAX_OPACITY, MIN_OPACITY, PALETTE};
pub use surface::{DrawCommand, RecordingSurface, Surface};

use crate::config::ParticleConfig;

/// Frame length the per-tick constants were tuned for (60 Hz)
pub const REFERENCE_FRAME: Duration = Duration::from_micros(16_667);

/// Longest gap, in reference frames, a single tick may integrate over
const MAX_FRAME_SCALE: f64 = 4.0;

/// Maximum opacity change per reference frame, in either direction
const OPACITY_JITTER: f64 = 0.02;

/// Last known pointer position, in surface pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    position: Option<(f64, f64)>,
}

impl PointerState {
    pub fn at(x: f64, y: f64) -> Self {
        let mut pointer = Self::default();
        pointer.move_to(x, y);
        pointer
    }

    /// Record a move; non-finite coordinates are ignored
    pub fn move_to(&mut self, x: f64, y: f64) {
        if x.is_finite() && y.is_finite() {
            self.position = Some((x, y));
        }
    }

    /// Forget the pointer (it left the surface)
    pub fn leave(&mut self) {
        self.position = None;
    }

    pub fn position(&self) -> Option<(f64, f64)> {
        self.position
    }
}

/// Per-frame input to the simulator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    pub pointer: PointerState,
    /// Time since the previous frame
    pub elapsed: Duration,
}

impl FrameContext {
    pub fn new(pointer: PointerState, elapsed: Duration) -> Self {
        Self { pointer, elapsed }
    }

    /// A frame of exactly the reference length
    pub fn fixed(pointer: PointerState) -> Self {
        Self::new(pointer, REFERENCE_FRAME)
    }

    /// How many reference frames this frame stands for
    ///
    /// Zero elapsed time (a first frame) counts as one frame; long stalls are
    /// capped so a resumed loop does not teleport particles.
    pub fn frame_scale(&self) -> f64 {
        if self.elapsed.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / REFERENCE_FRAME.as_secs_f64()).min(MAX_FRAME_SCALE)
    }
}

pub struct ParticleSimulator {
    config: ParticleConfig,
    width: f64,
    height: f64,
    particles: Vec<Particle>,
    rng: StdRng,
    running: bool,
    frames: u64,
}

impl ParticleSimulator {
    pub fn new(config: ParticleConfig, width: f64, height: f64) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut simulator = Self {
            config,
            width: sanitize_extent(width),
            height: sanitize_extent(height),
            particles: Vec::new(),
            rng,
            running: false,
            frames: 0,
        };
        simulator.reseed();
        simulator
    }

    /// Replace the whole particle set with a fresh batch
    pub fn reseed(&mut self) {
        let (width, height) = (self.width, self.height);
        let rng = &mut self.rng;
        self.particles = (0..self.config.count)
            .map(|_| Particle::random(rng, width, height))
            .collect();
        tracing::debug!(
            "Seeded {} particles on a {}x{} surface",
            self.particles.len(),
            width,
            height
        );
    }

    /// Begin ticking; calling it again while running changes nothing
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            tracing::debug!("Particle loop started");
        }
    }

    /// Stop ticking; safe to call any number of times
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            tracing::debug!("Particle loop stopped after {} frames", self.frames);
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Adopt new surface dimensions, keeping the particles
    ///
    /// Particles outside the new bounds wrap back in right away.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = sanitize_extent(width);
        self.height = sanitize_extent(height);
        for particle in &mut self.particles {
            particle.wrap(self.width, self.height);
        }
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Physics frames run so far, whether through [`tick`](Self::tick) or
    /// a direct [`update`](Self::update)
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    /// Run one frame: update then draw. Does nothing while stopped.
    pub fn tick<S: Surface + ?Sized>(&mut self, ctx: &FrameContext, surface: &mut S) -> bool {
        if !self.running {
            return false;
        }
        self.update(ctx);
        self.draw(surface);
        true
    }

    /// Advance the physics by one frame
    pub fn update(&mut self, ctx: &FrameContext) {
        self.frames += 1;
        let scale = ctx.frame_scale();
        let radius = self.config.attraction_radius;
        let pointer = ctx.pointer.position();
        let (width, height) = (self.width, self.height);

        for particle in &mut self.particles {
            particle.x += particle.speed_x * scale;
            particle.y += particle.speed_y * scale;

            if let Some((px, py)) = pointer {
                let dx = px - particle.x;
                let dy = py - particle.y;
                let distance = dx.hypot(dy);
                if distance < radius {
                    // Smoothing pull, deliberately not physically normalized
                    let force = ((radius - distance) / (radius * radius) * scale).min(1.0);
                    particle.x += dx * force;
                    particle.y += dy * force;
                }
            }

            particle.wrap(width, height);

            let jitter = (self.rng.random::<f64>() - 0.5) * OPACITY_JITTER * scale;
            particle.opacity = (particle.opacity + jitter).clamp(MIN_OPACITY, MAX_OPACITY);
        }
    }

    /// Links between particles closer than the connection radius
    pub fn connections(&self) -> Vec<Connection> {
        let points: Vec<(f64, f64)> = self.particles.iter().map(Particle::position).collect();
        let radius = self.config.connection_radius;
        let alpha = self.config.connection_alpha;
        if points.len() > self.config.grid_threshold {
            grid_pairs(&points, radius, alpha, self.width, self.height)
        } else {
            brute_force_pairs(&points, radius, alpha)
        }
    }

    /// Draw the current state: clear, particles, then links
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear();

        for particle in &self.particles {
            surface.fill_circle(
                particle.position(),
                particle.size,
                particle.color.with_alpha(particle.opacity),
                self.config.glow_radius,
                particle.color,
            );
        }

        for link in self.connections() {
            surface.stroke_line(
                self.particles[link.a].position(),
                self.particles[link.b].position(),
                LINK_COLOR.with_alpha(link.alpha),
                1.0,
            );
        }
    }
}

fn sanitize_extent(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(count: usize, seed: u64) -> ParticleConfig {
        ParticleConfig {
            count,
            seed: Some(seed),
            ..Default::default()
        }
    }

    #[test]
    fn test_thousand_ticks_with_fixed_pointer_stay_finite_and_in_bounds() {
        let mut sim = ParticleSimulator::new(config(50, 11), 800.0, 600.0);
        let ctx = FrameContext::fixed(PointerState::at(400.0, 300.0));
        let mut surface = RecordingSurface::new();
        sim.start();

        for _ in 0..1000 {
            assert!(sim.tick(&ctx, &mut surface));
            for p in sim.particles() {
                assert!(p.x.is_finite() && p.y.is_finite());
                assert!((0.0..=800.0).contains(&p.x), "x out of bounds: {}", p.x);
                assert!((0.0..=600.0).contains(&p.y), "y out of bounds: {}", p.y);
                assert!((MIN_OPACITY..=MAX_OPACITY).contains(&p.opacity));
            }
        }
        assert_eq!(sim.frames(), 1000);
        assert_eq!(surface.circles(), 50);
    }

    #[test]
    fn test_variable_frame_gaps_keep_invariants() {
        let mut sim = ParticleSimulator::new(config(80, 5), 640.0, 480.0);
        let mut surface = RecordingSurface::new();
        let mut pointer = PointerState::default();
        sim.start();
        for i in 0..500u64 {
            pointer.move_to((i * 7 % 640) as f64, (i * 3 % 480) as f64);
            let gap = Duration::from_millis([0, 5, 16, 33, 250, 2000][(i % 6) as usize]);
            sim.tick(&FrameContext::new(pointer, gap), &mut surface);
            assert!(sim.particles().iter().all(|p| p.is_within(640.0, 480.0)));
        }
    }

    #[test]
    fn test_start_is_idempotent_and_stop_prevents_ticks() {
        let mut sim = ParticleSimulator::new(config(5, 1), 100.0, 100.0);
        let ctx = FrameContext::fixed(PointerState::default());
        let mut surface = RecordingSurface::new();

        assert!(!sim.tick(&ctx, &mut surface));
        sim.start();
        sim.start();
        assert!(sim.tick(&ctx, &mut surface));
        sim.stop();
        sim.stop();
        let before = sim.particles().to_vec();
        assert!(!sim.tick(&ctx, &mut surface));
        assert_eq!(sim.particles(), &before[..]);
        assert_eq!(sim.frames(), 1);
    }

    #[test]
    fn test_direct_updates_count_frames() {
        let mut sim = ParticleSimulator::new(config(5, 1), 100.0, 100.0);
        let ctx = FrameContext::fixed(PointerState::default());
        let mut surface = RecordingSurface::new();
        sim.start();

        sim.update(&ctx);
        sim.update(&ctx);
        sim.draw(&mut surface);
        assert_eq!(sim.frames(), 2);

        // tick counts once
        sim.tick(&ctx, &mut surface);
        assert_eq!(sim.frames(), 3);
    }

    #[test]
    fn test_pointer_attracts_nearby_particle() {
        let mut sim = ParticleSimulator::new(config(1, 2), 800.0, 600.0);
        sim.particles[0] = Particle {
            x: 350.0,
            y: 300.0,
            speed_x: 0.0,
            speed_y: 0.0,
            size: 1.0,
            opacity: 0.3,
            color: PALETTE[0],
        };
        sim.update(&FrameContext::fixed(PointerState::at(400.0, 300.0)));
        // (100 - 50) / 10000 = 0.005 of the 50 px gap
        assert!((sim.particles()[0].x - 350.25).abs() < 1e-9);

        sim.particles[0].x = 200.0;
        sim.update(&FrameContext::fixed(PointerState::at(400.0, 300.0)));
        assert_eq!(sim.particles()[0].x, 200.0);
    }

    #[test]
    fn test_pointer_on_top_of_particle_is_stable() {
        let mut sim = ParticleSimulator::new(config(1, 2), 800.0, 600.0);
        let (x, y) = sim.particles()[0].position();
        sim.particles[0].speed_x = 0.0;
        sim.particles[0].speed_y = 0.0;
        sim.update(&FrameContext::fixed(PointerState::at(x, y)));
        assert_eq!(sim.particles()[0].position(), (x, y));
    }

    #[test]
    fn test_resize_keeps_particles_and_wraps_them() {
        let mut sim = ParticleSimulator::new(config(50, 9), 800.0, 600.0);
        let colors: Vec<Rgba> = sim.particles().iter().map(|p| p.color).collect();
        sim.resize(200.0, 100.0);
        assert_eq!(sim.particles().len(), 50);
        assert_eq!(sim.particles().iter().map(|p| p.color).collect::<Vec<_>>(), colors);
        assert!(sim.particles().iter().all(|p| p.is_within(200.0, 100.0)));
    }

    #[test]
    fn test_draw_emits_links_with_fading_alpha() {
        let mut sim = ParticleSimulator::new(config(3, 4), 800.0, 600.0);
        let positions = [(100.0, 100.0), (100.0, 100.0), (220.0, 100.0)];
        for (p, (x, y)) in sim.particles.iter_mut().zip(positions) {
            p.x = x;
            p.y = y;
        }

        let mut surface = RecordingSurface::new();
        sim.draw(&mut surface);
        assert_eq!(surface.commands[0], DrawCommand::Clear);
        let alphas: Vec<f64> = surface
            .lines()
            .map(|c| match c {
                DrawCommand::Line { color, .. } => color.a,
                _ => unreachable!(),
            })
            .collect();
        // Only the coincident pair links; 120 px apart does not
        assert_eq!(alphas, vec![0.1]);
    }

    #[test]
    fn test_grid_threshold_switches_strategy_without_changing_links() {
        let mut brute_config = config(300, 8);
        brute_config.grid_threshold = usize::MAX;
        let brute = ParticleSimulator::new(brute_config, 1600.0, 900.0);
        let mut gridded_config = config(300, 8);
        gridded_config.grid_threshold = 10;
        let gridded = ParticleSimulator::new(gridded_config, 1600.0, 900.0);
        assert_eq!(brute.particles(), gridded.particles());
        assert_eq!(brute.connections(), gridded.connections());
    }

    #[test]
    fn test_degenerate_surface() {
        let mut sim = ParticleSimulator::new(config(10, 1), f64::NAN, -5.0);
        assert_eq!(sim.size(), (0.0, 0.0));
        sim.start();
        sim.tick(&FrameContext::fixed(PointerState::default()), &mut RecordingSurface::new());
        assert!(sim.particles().iter().all(|p| p.position() == (0.0, 0.0)));
    }

    #[test]
    fn test_frame_scale() {
        let pointer = PointerState::default();
        assert_eq!(FrameContext::new(pointer, Duration::ZERO).frame_scale(), 1.0);
        assert!((FrameContext::fixed(pointer).frame_scale() - 1.0).abs() < 1e-9);
        assert_eq!(FrameContext::new(pointer, Duration::from_secs(3)).frame_scale(), 4.0);
    }

    #[test]
    fn test_pointer_ignores_non_finite() {
        let mut pointer = PointerState::at(1.0, 2.0);
        pointer.move_to(f64::NAN, 3.0);
        assert_eq!(pointer.position(), Some((1.0, 2.0)));
        pointer.leave();
        assert_eq!(pointer.position(), None);
    }
}
