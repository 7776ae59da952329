use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::FlickerConfig;

/// Light whose intensity jumps to a random level after a random short wait.
pub struct FlickeringLight {
    pub position: Vec3,
    pub intensity: f32,
    config: FlickerConfig,
    timer: f32,
    rng: SmallRng,
}

impl FlickeringLight {
    pub fn new(position: Vec3, config: FlickerConfig, seed: u64) -> Self {
        Self {
            position,
            intensity: config.max_intensity,
            config,
            timer: 0.0,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// At most one flicker per update, even when the wait rolls zero.
    pub fn update(&mut self, dt: f32) {
        self.timer -= dt;
        if self.timer > 0.0 {
            return;
        }

        let (min_intensity, max_intensity) = (self.config.min_intensity, self.config.max_intensity);
        let max_interval = self.config.max_interval;

        self.intensity = if max_intensity > min_intensity {
            self.rng.random_range(min_intensity..max_intensity)
        } else {
            min_intensity
        };
        self.timer = if max_interval > 0.0 {
            self.rng.random_range(0.0..max_interval)
        } else {
            0.0
        };
    }
}
