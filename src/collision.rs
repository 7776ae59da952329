use glam::Vec3;
use parry3d::math::{Pose3, Vector};
use parry3d::query::{Ray, RayCast};
use parry3d::shape::TriMesh;

use crate::config::*;

/// Result of asking the environment to move a body.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct MoveOutcome {
    pub position: Vec3,
    /// Support found under the feet and the move was not upward.
    pub grounded: bool,
    /// Horizontal part of the move was cut short by geometry.
    pub blocked: bool,
}

/// Environment collision. The locomotion code only consumes the outcome and
/// never inspects geometry itself.
pub trait CollisionOracle {
    /// `position` is the feet position, `height` the current body height.
    fn move_body(&self, position: Vec3, height: f32, displacement: Vec3) -> MoveOutcome;
}

/// Infinite horizontal plane. Never blocks horizontally.
#[derive(Clone, Copy, Debug)]
pub struct FlatGround {
    pub height: f32,
}

impl FlatGround {
    pub fn new(height: f32) -> Self {
        Self { height }
    }
}

impl Default for FlatGround {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl CollisionOracle for FlatGround {
    fn move_body(&self, position: Vec3, _height: f32, displacement: Vec3) -> MoveOutcome {
        let mut final_pos = position + displacement;
        let support = final_pos.y <= self.height + GROUND_SNAP_MARGIN;
        let grounded = support && displacement.y <= 0.0;

        if final_pos.y < self.height || (grounded && displacement.y < 0.0) {
            final_pos.y = self.height;
        }

        MoveOutcome {
            position: final_pos,
            grounded,
            blocked: false,
        }
    }
}

/// Triangle-mesh world queried with rays.
pub struct PhysicsWorld {
    trimesh: TriMesh,
}

impl PhysicsWorld {
    pub fn new(collision_vertices: &[Vec3], collision_indices: &[[u32; 3]]) -> Option<Self> {
        if collision_vertices.is_empty() || collision_indices.is_empty() {
            return None;
        }

        let vertices: Vec<Vector> = collision_vertices
            .iter()
            .map(|v| Vector::new(v.x, v.y, v.z))
            .collect();

        let trimesh = TriMesh::new(vertices, collision_indices.to_vec()).ok()?;
        Some(Self { trimesh })
    }

    fn cast_ray(&self, origin: Vec3, dir: Vec3, max_dist: f32) -> Option<f32> {
        let ray = Ray::new(
            Vector::new(origin.x, origin.y, origin.z),
            Vector::new(dir.x, dir.y, dir.z),
        );
        self.trimesh.cast_ray(&Pose3::IDENTITY, &ray, max_dist, true)
    }

    /// Clamps a horizontal move to just before the first wall along the path,
    /// probing at step height and head height.
    pub fn clamp_desired_to_path(&self, prev_pos: Vec3, next_pos: Vec3, height: f32) -> Vec3 {
        let delta = next_pos - prev_pos;
        let len = delta.length();
        if len <= 1e-6 {
            return next_pos;
        }
        let dir = delta / len;
        let max_dist = len;

        // Hits right at the origin mean we are already touching the surface.
        const MIN_TOI: f32 = 0.01;

        let mut min_hit = max_dist + 1.0;
        for probe in [STEP_OVER_HEIGHT, height] {
            let origin = prev_pos + Vec3::new(0.0, probe, 0.0);
            if let Some(toi) = self.cast_ray(origin, dir, max_dist)
                && toi > MIN_TOI
                && toi < min_hit
            {
                min_hit = toi;
            }
        }

        if min_hit <= max_dist {
            let safe_dist = (min_hit - PATH_HIT_MARGIN).max(0.0);
            prev_pos + dir * safe_dist
        } else {
            next_pos
        }
    }

    /// Distance from the feet straight down to support within step range.
    pub fn ground_height(&self, position: Vec3, height: f32) -> Option<f32> {
        let origin = position + Vec3::new(0.0, STEP_OVER_HEIGHT, 0.0);
        self.cast_ray(origin, Vec3::NEG_Y, height)
            .filter(|&toi| toi < STEP_OVER_HEIGHT + GROUND_SNAP_MARGIN)
            .map(|toi| origin.y - toi)
    }
}

impl CollisionOracle for PhysicsWorld {
    fn move_body(&self, position: Vec3, height: f32, displacement: Vec3) -> MoveOutcome {
        let horizontal = Vec3::new(displacement.x, 0.0, displacement.z);
        let desired = self.clamp_desired_to_path(position, position + horizontal, height)
            + Vec3::new(0.0, displacement.y, 0.0);

        let mut final_pos = desired;
        let mut grounded = false;
        let half_width = PLAYER_WIDTH / 2.0;

        // Ground
        if let Some(ground_y) = self.ground_height(desired, height) {
            if final_pos.y < ground_y {
                final_pos.y = ground_y;
            }
            if displacement.y <= 0.0 {
                grounded = true;
                if displacement.y < 0.0 {
                    final_pos.y = ground_y;
                }
            }
        }

        // Walls, 4 directions at step and head height
        for probe in [STEP_OVER_HEIGHT, height] {
            let wall_origin = final_pos + Vec3::new(0.0, probe, 0.0);
            for (dx, dz) in [(1.0, 0.0), (-1.0, 0.0), (0.0, 1.0), (0.0, -1.0)] {
                let dir = Vec3::new(dx, 0.0, dz);
                if let Some(toi) = self.cast_ray(wall_origin, dir, half_width)
                    && toi < half_width
                {
                    final_pos.x -= dx * (half_width - toi);
                    final_pos.z -= dz * (half_width - toi);
                }
            }
        }

        // Ceiling, only when moving up
        if displacement.y > 0.0 {
            let half_height = height / 2.0;
            let center = desired + Vec3::new(0.0, half_height, 0.0);
            if let Some(toi) = self.cast_ray(center, Vec3::Y, half_height)
                && toi < half_height
            {
                final_pos.y -= half_height - toi;
            }
        }

        let target = position + horizontal;
        let blocked = Vec3::new(final_pos.x - target.x, 0.0, final_pos.z - target.z).length() > 1e-4;

        MoveOutcome {
            position: final_pos,
            grounded,
            blocked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_flat_ground_lands_and_clamps() {
        let ground = FlatGround::new(0.0);
        let outcome = ground.move_body(Vec3::new(0.0, 0.2, 0.0), 2.0, Vec3::new(0.0, -1.0, 0.0));
        assert!(outcome.grounded);
        assert_eq!(outcome.position.y, 0.0);
    }

    #[test]
    fn test_flat_ground_upward_move_is_airborne() {
        let ground = FlatGround::new(0.0);
        let outcome = ground.move_body(Vec3::ZERO, 2.0, Vec3::new(0.0, 0.1, 0.0));
        assert!(!outcome.grounded);
        assert_abs_diff_eq!(outcome.position.y, 0.1);
    }

    #[test]
    fn test_flat_ground_horizontal_keeps_support() {
        let ground = FlatGround::new(0.0);
        let outcome = ground.move_body(Vec3::ZERO, 2.0, Vec3::new(1.0, 0.0, 0.0));
        assert!(outcome.grounded);
        assert!(!outcome.blocked);
        assert_eq!(outcome.position, Vec3::new(1.0, 0.0, 0.0));

        let airborne = ground.move_body(Vec3::new(0.0, 1.0, 0.0), 2.0, Vec3::new(1.0, 0.0, 0.0));
        assert!(!airborne.grounded);
    }

    #[test]
    fn test_empty_mesh_has_no_world() {
        assert!(PhysicsWorld::new(&[], &[]).is_none());
    }

    #[test]
    fn test_mesh_ground_detection() {
        let level = Level::test_chamber();
        let world = PhysicsWorld::new(&level.collision_vertices, &level.collision_indices).unwrap();

        let outcome = world.move_body(Vec3::new(0.0, 0.1, 0.0), 2.0, Vec3::new(0.0, -0.2, 0.0));
        assert!(outcome.grounded);
        assert_abs_diff_eq!(outcome.position.y, 0.0, epsilon = 1e-4);

        let high = world.move_body(Vec3::new(0.0, 3.0, 0.0), 2.0, Vec3::new(0.0, -0.1, 0.0));
        assert!(!high.grounded);
    }

    #[test]
    fn test_mesh_wall_blocks() {
        let level = Level::test_chamber();
        let world = PhysicsWorld::new(&level.collision_vertices, &level.collision_indices).unwrap();

        let wall_x = level.half_extent;
        let start = Vec3::new(wall_x - 1.0, 0.0, 0.0);
        let outcome = world.move_body(start, 2.0, Vec3::new(3.0, 0.0, 0.0));
        assert!(outcome.blocked);
        assert!(outcome.position.x < wall_x - PLAYER_WIDTH / 2.0 + 1e-3);
    }
}
