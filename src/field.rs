//! The hero particle field: a fixed set of drifting points that link up
//! when close, get pushed away from the pointer and wrap around the edges.
//!
//! Nothing in here touches the DOM. The browser driver feeds pointer and
//! resize events in and calls [`ParticleField::step`] once per animation
//! frame; drawing goes through the [`Surface`] trait.

use crate::config::FieldConfig;
use crate::particle::Particle;
use crate::surface::Surface;
use rand::Rng;
use vecmath::{vec2_add, vec2_len, vec2_scale, vec2_sub, Vector2};

/// A line to draw between two particles, by index into [`ParticleField::particles`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Connection {
    pub a: usize,
    pub b: usize,
    pub opacity: f64,
}

pub struct ParticleField {
    width: f64,
    height: f64,
    pointer: Option<Vector2<f64>>,
    particles: Vec<Particle>,
    config: FieldConfig,
}

impl ParticleField {
    /// Rolls `config.particle_count(width)` particles. The count never changes
    /// afterwards, resizing included.
    pub fn new<R: Rng>(width: f64, height: f64, config: FieldConfig, rng: &mut R) -> Self {
        let count = config.particle_count(width);
        let particles = (0..count)
            .map(|_| Particle::random(rng, width, height, &config))
            .collect();
        ParticleField::with_particles(width, height, config, particles)
    }

    pub fn with_particles(
        width: f64,
        height: f64,
        config: FieldConfig,
        particles: Vec<Particle>,
    ) -> Self {
        ParticleField {
            width,
            height,
            pointer: None,
            particles,
            config,
        }
    }

    pub fn handle_pointer_move(&mut self, x: f64, y: f64) {
        self.pointer = Some([x, y]);
    }

    pub fn handle_pointer_leave(&mut self) {
        self.pointer = None;
    }

    pub fn handle_resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn pointer(&self) -> Option<Vector2<f64>> {
        self.pointer
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Every unordered pair closer than `connection_distance`, with its line opacity.
    pub fn connections(&self) -> Vec<Connection> {
        let mut connections = Vec::new();
        for i in 0..self.particles.len() {
            for j in (i + 1)..self.particles.len() {
                let dist = vec2_len(vec2_sub(self.particles[i].pos, self.particles[j].pos));
                if let Some(opacity) = connection_opacity(dist, &self.config) {
                    connections.push(Connection { a: i, b: j, opacity });
                }
            }
        }
        connections
    }

    /// Velocity change the pointer applies to a particle at `pos`.
    /// Zero outside the repulsion radius, when there is no pointer, and when
    /// the particle sits exactly on the pointer (no direction to push in).
    pub fn repulsion(&self, pos: Vector2<f64>) -> Vector2<f64> {
        let pointer = match self.pointer {
            Some(pointer) => pointer,
            None => return [0.0, 0.0],
        };
        let away = vec2_sub(pos, pointer);
        let dist = vec2_len(away);
        let radius = self.config.repulsion_radius;
        if dist >= radius || dist <= 0.0 {
            return [0.0, 0.0];
        }
        let force = (radius - dist) / radius;
        vec2_scale(away, force * self.config.repulsion_force / dist)
    }

    /// Advances every particle by one frame: repulsion, damping, an euler
    /// step of one time unit, then toroidal wraparound.
    pub fn step(&mut self) {
        let damping = self.config.damping;
        for i in 0..self.particles.len() {
            let impulse = self.repulsion(self.particles[i].pos);
            let (width, height) = (self.width, self.height);
            let particle = &mut self.particles[i];
            particle.vel = vec2_scale(vec2_add(particle.vel, impulse), damping);
            particle.pos = vec2_add(particle.pos, particle.vel);
            particle.pos[0] = wrap(particle.pos[0], width);
            particle.pos[1] = wrap(particle.pos[1], height);
        }
    }

    /// One full animation frame: clear, connections (drawn at the positions
    /// the frame started with), step, then glow and core for each particle.
    pub fn frame<S: Surface>(&mut self, surface: &mut S) -> Result<(), S::Error> {
        surface.clear(self.width, self.height)?;

        let accent = self.config.accent();
        for connection in self.connections() {
            surface.line(
                self.particles[connection.a].pos,
                self.particles[connection.b].pos,
                self.config.connection_width,
                accent,
                connection.opacity,
            )?;
        }

        self.step();

        for particle in &self.particles {
            let glow_radius = particle.radius() * self.config.glow_scale;
            surface.glow(particle.pos, glow_radius, particle.color())?;
            surface.disc(particle.pos, particle.radius(), particle.color(), particle.alpha())?;
        }
        Ok(())
    }
}

/// Linear falloff from `connection_opacity` at distance zero to nothing at
/// `connection_distance`. `None` means the pair is too far apart to link.
pub fn connection_opacity(dist: f64, config: &FieldConfig) -> Option<f64> {
    if dist < config.connection_distance {
        Some(config.connection_opacity * (1.0 - dist / config.connection_distance))
    } else {
        None
    }
}

// Leaving one edge re-enters at the opposite one, velocity untouched
fn wrap(coord: f64, size: f64) -> f64 {
    if coord < 0.0 {
        size
    } else if coord > size {
        0.0
    } else {
        coord
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::surface::tests::{Call, RecordingSurface};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EPS: f64 = 1e-9;

    fn particle(pos: [f64; 2], vel: [f64; 2]) -> Particle {
        Particle::new(pos, vel, 1.0, Color::from_u32(0x7c3aedff), 0.5)
    }

    fn field_of(particles: Vec<Particle>) -> ParticleField {
        ParticleField::with_particles(800.0, 600.0, FieldConfig::default(), particles)
    }

    #[test]
    fn particle_count_is_density_capped() {
        let mut rng = StdRng::seed_from_u64(42);
        let field = ParticleField::new(800.0, 600.0, FieldConfig::default(), &mut rng);
        assert_eq!(field.particles().len(), 80);
        let field = ParticleField::new(2000.0, 600.0, FieldConfig::default(), &mut rng);
        assert_eq!(field.particles().len(), 120);
    }

    #[test]
    fn seeded_fields_are_identical() {
        let seeded = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            ParticleField::new(800.0, 600.0, FieldConfig::default(), &mut rng)
        };
        let (a, b) = (seeded(9), seeded(9));
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn resize_keeps_particle_count() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut field = ParticleField::new(800.0, 600.0, FieldConfig::default(), &mut rng);
        field.handle_resize(200.0, 100.0);
        for _ in 0..50 {
            field.step();
        }
        assert_eq!(field.particles().len(), 80);
        assert_eq!(field.size(), (200.0, 100.0));
        for p in field.particles() {
            assert!(p.pos[0] >= 0.0 && p.pos[0] <= 200.0);
            assert!(p.pos[1] >= 0.0 && p.pos[1] <= 100.0);
        }
    }

    #[test]
    fn exiting_right_edge_wraps_to_zero() {
        let mut field = field_of(vec![particle([800.0 - 0.01, 300.0], [1.0, 0.0])]);
        field.step();
        let p = field.particles()[0];
        assert!(p.pos[0].abs() < EPS);
        assert_eq!(p.pos[1], 300.0);
        assert!((p.vel[0] - 0.99).abs() < EPS);
    }

    #[test]
    fn exiting_top_edge_wraps_to_bottom() {
        let mut field = field_of(vec![particle([10.0, 0.2], [0.0, -1.0])]);
        field.step();
        let p = field.particles()[0];
        assert_eq!(p.pos[1], 600.0);
        assert!((p.pos[0] - 10.0).abs() < EPS);
    }

    #[test]
    fn damping_is_geometric_without_pointer() {
        let v0 = [0.2, -0.15];
        let mut field = field_of(vec![particle([400.0, 300.0], v0)]);
        let mut last = vec2_len(v0);
        for k in 1..=200 {
            field.step();
            let v = field.particles()[0].vel;
            let speed = vec2_len(v);
            assert!(speed < last);
            last = speed;
            let expected = 0.99f64.powi(k);
            assert!((v[0] - v0[0] * expected).abs() < 1e-12);
            assert!((v[1] - v0[1] * expected).abs() < 1e-12);
        }
    }

    #[test]
    fn resting_particle_stays_at_rest() {
        let mut field = field_of(vec![particle([400.0, 300.0], [0.0, 0.0])]);
        field.step();
        assert_eq!(field.particles()[0].vel, [0.0, 0.0]);
        assert_eq!(field.particles()[0].pos, [400.0, 300.0]);
    }

    #[test]
    fn pointer_pushes_nearby_particles_away() {
        let mut field = field_of(vec![]);
        field.handle_pointer_move(100.0, 100.0);

        let near = field.repulsion([150.0, 100.0]);
        assert!(near[0] > 0.0);
        assert!(near[1].abs() < EPS);
        // (100 - 50) / 100 * 0.3
        assert!((near[0] - 0.15).abs() < EPS);

        let far = field.repulsion([250.0, 100.0]);
        assert_eq!(far, [0.0, 0.0]);

        let below_left = field.repulsion([70.0, 140.0]);
        assert!(below_left[0] < 0.0 && below_left[1] > 0.0);
    }

    #[test]
    fn pointer_leave_stops_repulsion() {
        let mut field = field_of(vec![]);
        field.handle_pointer_move(100.0, 100.0);
        field.handle_pointer_leave();
        assert_eq!(field.pointer(), None);
        assert_eq!(field.repulsion([101.0, 100.0]), [0.0, 0.0]);
    }

    #[test]
    fn step_applies_impulse_before_damping() {
        let mut field = field_of(vec![particle([150.0, 100.0], [0.0, 0.0])]);
        field.handle_pointer_move(100.0, 100.0);
        field.step();
        let p = field.particles()[0];
        assert!((p.vel[0] - 0.15 * 0.99).abs() < EPS);
        assert!((p.pos[0] - (150.0 + 0.15 * 0.99)).abs() < EPS);
    }

    #[test]
    fn connection_opacity_falls_off_linearly() {
        let config = FieldConfig::default();
        assert!((connection_opacity(0.0, &config).unwrap() - 0.15).abs() < EPS);
        assert!((connection_opacity(65.0, &config).unwrap() - 0.075).abs() < EPS);
        assert_eq!(connection_opacity(130.0, &config), None);
        assert_eq!(connection_opacity(500.0, &config), None);
    }

    #[test]
    fn connections_cover_close_pairs_once() {
        let field = field_of(vec![
            particle([0.0, 0.0], [0.0, 0.0]),
            particle([100.0, 0.0], [0.0, 0.0]),
            particle([400.0, 0.0], [0.0, 0.0]),
        ]);
        let connections = field.connections();
        assert_eq!(connections.len(), 1);
        assert_eq!((connections[0].a, connections[0].b), (0, 1));
    }

    #[test]
    fn coincident_particles_and_pointer_stay_finite() {
        let mut field = field_of(vec![
            particle([200.0, 200.0], [0.0, 0.0]),
            particle([200.0, 200.0], [0.0, 0.0]),
        ]);
        field.handle_pointer_move(200.0, 200.0);
        let connections = field.connections();
        assert!((connections[0].opacity - 0.15).abs() < EPS);
        for _ in 0..1_000 {
            field.step();
        }
        for p in field.particles() {
            assert!(p.pos[0].is_finite() && p.pos[1].is_finite());
            assert!(p.vel[0].is_finite() && p.vel[1].is_finite());
        }
    }

    #[test]
    fn positions_stay_on_surface_under_pointer_pressure() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut field = ParticleField::new(300.0, 200.0, FieldConfig::default(), &mut rng);
        for frame in 0..2_000 {
            let t = frame as f64;
            let x = 150.0 + 100.0 * (t / 40.0).sin();
            let y = 100.0 + 80.0 * (t / 25.0).cos();
            field.handle_pointer_move(x, y);
            field.step();
            for p in field.particles() {
                assert!(p.pos[0] >= 0.0 && p.pos[0] <= 300.0);
                assert!(p.pos[1] >= 0.0 && p.pos[1] <= 200.0);
            }
        }
    }

    #[test]
    fn frame_draws_lines_then_particles() {
        let mut field = field_of(vec![
            particle([10.0, 10.0], [0.0, 0.0]),
            particle([20.0, 10.0], [0.0, 0.0]),
        ]);
        let mut surface = RecordingSurface::default();
        field.frame(&mut surface).unwrap();

        assert_eq!(surface.calls[0], Call::Clear(800.0, 600.0));
        match surface.calls[1] {
            Call::Line { from, to, width, opacity, .. } => {
                assert_eq!((from, to), ([10.0, 10.0], [20.0, 10.0]));
                assert!((width - 0.6).abs() < EPS);
                assert!((opacity - 0.15 * (1.0 - 10.0 / 130.0)).abs() < EPS);
            }
            ref other => panic!("expected a line, got {:?}", other),
        }
        match surface.calls[2] {
            Call::Glow { radius, .. } => assert!((radius - 4.0).abs() < EPS),
            ref other => panic!("expected a glow, got {:?}", other),
        }
        match surface.calls[3] {
            Call::Disc { radius, alpha, .. } => {
                assert!((radius - 1.0).abs() < EPS);
                assert!((alpha - 0.5).abs() < EPS);
            }
            ref other => panic!("expected a disc, got {:?}", other),
        }
        assert_eq!(surface.calls.len(), 1 + 1 + 2 * 2);
    }
}
