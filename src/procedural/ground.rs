//! Gently undulating snow plane.

use super::RenderMesh;
use glamx::Vec3;

/// Height perturbation applied to the ground grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundWaves {
    pub amplitude: f32,
    pub freq_x: f32,
    pub freq_z: f32,
    /// Radial attenuation rate of the waves.
    pub falloff: f32,
}

impl Default for GroundWaves {
    fn default() -> Self {
        Self {
            amplitude: 0.03,
            freq_x: 0.35,
            freq_z: 0.28,
            falloff: 0.05,
        }
    }
}

impl GroundWaves {
    /// Height of the ground at world position `(x, z)`.
    #[inline]
    pub fn height(&self, x: f32, z: f32) -> f32 {
        let r = (x * x + z * z).sqrt();
        self.amplitude * ((self.freq_x * x).sin() + (self.freq_z * z).cos()) * (-self.falloff * r).exp()
    }
}

/// Side length of the ground square.
pub const GROUND_SIZE: f32 = 30.0;
/// Number of grid cells along each side of the ground.
pub const GROUND_SUBDIVISIONS: u32 = 64;

/// Generates a square grid on the XZ plane, centered at the origin, whose
/// heights follow `waves`.
///
/// Normals are computed from the displaced triangles and all point upward.
pub fn undulating_ground(size: f32, subdivisions: u32, waves: GroundWaves) -> RenderMesh {
    let subdivisions = subdivisions.max(1);
    let stride = subdivisions + 1;
    let step = size / subdivisions as f32;
    let half = size * 0.5;

    let mut coords = Vec::with_capacity((stride * stride) as usize);
    for j in 0..stride {
        let z = -half + j as f32 * step;
        for i in 0..stride {
            let x = -half + i as f32 * step;
            coords.push(Vec3::new(x, waves.height(x, z), z));
        }
    }

    let mut indices = Vec::with_capacity((subdivisions * subdivisions * 2) as usize);
    for j in 0..subdivisions {
        for i in 0..subdivisions {
            let a = j * stride + i;
            let b = a + 1;
            let c = a + stride;
            let d = c + 1;
            indices.push([a, c, b]);
            indices.push([b, c, d]);
        }
    }

    RenderMesh::new(coords, None, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_is_nearly_flat_and_faces_up() {
        let waves = GroundWaves::default();
        let mesh = undulating_ground(GROUND_SIZE, GROUND_SUBDIVISIONS, waves);

        assert_eq!(mesh.coords.len(), 65 * 65);
        assert_eq!(mesh.num_triangles(), 64 * 64 * 2);

        for (c, n) in mesh.coords.iter().zip(&mesh.normals) {
            assert!(c.y.abs() <= 2.0 * waves.amplitude + 1.0e-6);
            assert!(n.y > 0.9);
        }
    }

    #[test]
    fn test_waves_decay_away_from_center() {
        let waves = GroundWaves::default();
        assert!((waves.height(0.0, 0.0) - 0.03).abs() < 1.0e-6);
        assert!(waves.height(14.0, 14.0).abs() < waves.amplitude * 2.0 * (-0.05f32 * 19.0).exp());
    }
}
