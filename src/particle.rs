// Particle struct keeping track of position and velocity, plus the look
// (radius, color, alpha) that is rolled once at creation and never changes

use crate::color::Color;
use crate::config::FieldConfig;
use rand::Rng;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: [f64; 2],
    pub vel: [f64; 2],
    radius: f64,
    color: Color,
    alpha: f64,
}

impl Particle {
    pub fn new(pos: [f64; 2], vel: [f64; 2], radius: f64, color: Color, alpha: f64) -> Particle {
        Particle {
            pos,
            vel,
            radius,
            color,
            alpha,
        }
    }

    // Uniform position inside the surface, everything else from the config ranges
    pub fn random<R: Rng>(rng: &mut R, width: f64, height: f64, config: &FieldConfig) -> Particle {
        let pos_x = uniform(rng, 0.0, width);
        let pos_y = uniform(rng, 0.0, height);
        let speed = config.max_initial_speed;
        let vel_x = uniform(rng, -speed, speed);
        let vel_y = uniform(rng, -speed, speed);
        let radius = uniform(rng, config.min_radius, config.max_radius);
        let alpha = uniform(rng, config.min_alpha, config.max_alpha);
        let color = if config.palette.is_empty() {
            config.accent()
        } else {
            let idx: usize = rng.gen_range(0, config.palette.len());
            config.palette[idx]
        };

        Particle::new([pos_x, pos_y], [vel_x, vel_y], radius, color, alpha)
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

// gen_range panics on an empty range, a zero-sized surface is legal here
fn uniform<R: Rng>(rng: &mut R, low: f64, high: f64) -> f64 {
    if high > low {
        rng.gen_range(low, high)
    } else {
        low
    }
}
