use glam::Vec3;

const WALL_HEIGHT: f32 = 4.0;

/// Collision geometry and placements for a play space.
pub struct Level {
    pub collision_vertices: Vec<Vec3>,
    pub collision_indices: Vec<[u32; 3]>,
    pub half_extent: f32,
    pub player_spawn: Vec3,
    pub pursuer_spawn: Vec3,
    pub light_positions: Vec<Vec3>,
}

impl Level {
    /// Square room with a floor at y = 0 and four walls.
    pub fn test_chamber() -> Self {
        let e = 20.0;
        let mut level = Self {
            collision_vertices: Vec::new(),
            collision_indices: Vec::new(),
            half_extent: e,
            player_spawn: Vec3::new(0.0, 0.0, 15.0),
            pursuer_spawn: Vec3::new(0.0, 0.0, -15.0),
            light_positions: vec![
                Vec3::new(-10.0, 3.5, 0.0),
                Vec3::new(10.0, 3.5, 0.0),
                Vec3::new(0.0, 3.5, -10.0),
            ],
        };

        level.push_quad([
            Vec3::new(-e, 0.0, -e),
            Vec3::new(e, 0.0, -e),
            Vec3::new(e, 0.0, e),
            Vec3::new(-e, 0.0, e),
        ]);

        let h = WALL_HEIGHT;
        let corners = [
            Vec3::new(-e, 0.0, -e),
            Vec3::new(e, 0.0, -e),
            Vec3::new(e, 0.0, e),
            Vec3::new(-e, 0.0, e),
        ];
        for i in 0..corners.len() {
            let a = corners[i];
            let b = corners[(i + 1) % corners.len()];
            level.push_quad([a, b, b + Vec3::Y * h, a + Vec3::Y * h]);
        }

        level
    }

    fn push_quad(&mut self, corners: [Vec3; 4]) {
        let base = self.collision_vertices.len() as u32;
        self.collision_vertices.extend_from_slice(&corners);
        self.collision_indices.push([base, base + 1, base + 2]);
        self.collision_indices.push([base, base + 2, base + 3]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chamber_geometry() {
        let level = Level::test_chamber();
        // Floor plus four walls, two triangles each.
        assert_eq!(level.collision_vertices.len(), 20);
        assert_eq!(level.collision_indices.len(), 10);
        let max_index = level.collision_indices.iter().flatten().max().copied().unwrap();
        assert!((max_index as usize) < level.collision_vertices.len());
    }

    #[test]
    fn test_spawns_inside_walls() {
        let level = Level::test_chamber();
        for p in [level.player_spawn, level.pursuer_spawn] {
            assert!(p.x.abs() < level.half_extent && p.z.abs() < level.half_extent);
        }
    }
}
