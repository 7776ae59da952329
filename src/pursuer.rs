use glam::Vec3;

use crate::config::PursuerConfig;

/// Enemy that always knows where the player is. Path planning is external;
/// this closes the distance in a straight line on the ground plane.
pub struct Pursuer {
    pub position: Vec3,
    pub speed: f32,
    pub stop_distance: f32,
    halted: bool,
}

impl Pursuer {
    pub fn new(spawn_position: Vec3, config: &PursuerConfig) -> Self {
        Self {
            position: spawn_position,
            speed: config.chase_speed,
            stop_distance: config.stop_distance,
            halted: false,
        }
    }

    /// Retargets toward `target` and moves for `dt` seconds.
    pub fn step(&mut self, dt: f32, target: Vec3) {
        if self.halted {
            return;
        }
        let to_target = Vec3::new(target.x - self.position.x, 0.0, target.z - self.position.z);
        let distance = to_target.length();
        if distance <= self.stop_distance {
            return;
        }
        let travel = (self.speed * dt).min(distance - self.stop_distance);
        self.position += to_target / distance * travel;
    }

    /// Stops for good.
    pub fn halt(&mut self) {
        if !self.halted {
            log::info!("Pursuer halted at {:?}", self.position);
        }
        self.halted = true;
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }
}
