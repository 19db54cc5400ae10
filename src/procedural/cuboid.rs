use super::RenderMesh;
use glamx::Vec3;

/// Generates a cuboid (box) mesh with the specified extents.
///
/// The box is centered at the origin. Each face owns its four vertices so that
/// its normal stays flat.
///
/// # Arguments
/// * `extents` - The full dimensions of the cuboid along each axis (width, height, depth)
///
/// # Example
/// ```
/// # use yule3d::procedural::cuboid;
/// # use glamx::Vec3;
/// // A gift box.
/// let gift = cuboid(Vec3::new(0.45, 0.35, 0.45));
/// assert_eq!(gift.num_triangles(), 12);
/// ```
pub fn cuboid(extents: Vec3) -> RenderMesh {
    let mut mesh = unit_cuboid();
    mesh.scale_by(extents);
    mesh
}

/// Generates a unit cuboid mesh, with half-extents of 0.5.
pub fn unit_cuboid() -> RenderMesh {
    const FACES: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::X, Vec3::Y, Vec3::Z),
        (Vec3::NEG_X, Vec3::Y, Vec3::NEG_Z),
        (Vec3::Y, Vec3::Z, Vec3::X),
        (Vec3::NEG_Y, Vec3::Z, Vec3::NEG_X),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::X, Vec3::NEG_Y),
    ];

    let mut coords = Vec::with_capacity(24);
    let mut normals = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(12);

    for (normal, u, v) in FACES {
        let base = coords.len() as u32;
        let center = normal * 0.5;

        for (su, sv) in [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)] {
            coords.push(center + u * su + v * sv);
            normals.push(normal);
        }

        indices.push([base, base + 1, base + 2]);
        indices.push([base, base + 2, base + 3]);
    }

    RenderMesh::new(coords, Some(normals), indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cuboid_bounds() {
        let mesh = cuboid(Vec3::new(0.46, 0.05, 0.12));
        let (lo, hi) = mesh.y_range().unwrap();
        assert!((lo + 0.025).abs() < 1.0e-6);
        assert!((hi - 0.025).abs() < 1.0e-6);
        for c in &mesh.coords {
            assert!(c.x.abs() <= 0.23 + 1.0e-6);
            assert!(c.z.abs() <= 0.06 + 1.0e-6);
        }
    }

    #[test]
    fn test_face_normals_point_outward() {
        let mesh = unit_cuboid();
        for (c, n) in mesh.coords.iter().zip(&mesh.normals) {
            assert!(c.dot(*n) > 0.0);
        }
    }
}
