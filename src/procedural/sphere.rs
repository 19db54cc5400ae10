use super::RenderMesh;
use glamx::Vec3;

/// Generates a UV sphere centered at the origin.
///
/// # Arguments
/// * `radius` - The sphere radius
/// * `ntheta_subdiv` - Number of subdivisions around the vertical axis
/// * `nphi_subdiv` - Number of subdivisions from pole to pole
pub fn sphere(radius: f32, ntheta_subdiv: u32, nphi_subdiv: u32) -> RenderMesh {
    assert!(ntheta_subdiv >= 3 && nphi_subdiv >= 2);

    let mut coords = Vec::with_capacity(((ntheta_subdiv + 1) * (nphi_subdiv + 1)) as usize);
    let mut normals = Vec::with_capacity(coords.capacity());
    let mut indices = Vec::new();

    for j in 0..=nphi_subdiv {
        let phi = std::f32::consts::PI * j as f32 / nphi_subdiv as f32;
        for i in 0..=ntheta_subdiv {
            let theta = std::f32::consts::TAU * i as f32 / ntheta_subdiv as f32;
            let n = Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
            coords.push(n * radius);
            normals.push(n);
        }
    }

    let stride = ntheta_subdiv + 1;
    for j in 0..nphi_subdiv {
        for i in 0..ntheta_subdiv {
            let a = j * stride + i;
            let b = a + stride;

            if j != 0 {
                indices.push([a, a + 1, b]);
            }
            if j != nphi_subdiv - 1 {
                indices.push([a + 1, b + 1, b]);
            }
        }
    }

    RenderMesh::new(coords, Some(normals), indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_vertex_is_on_the_surface() {
        let mesh = sphere(0.11, 16, 16);
        for c in &mesh.coords {
            assert!((c.length() - 0.11).abs() < 1.0e-5);
        }
    }

    #[test]
    fn test_poles_are_single_triangles() {
        // 2 triangles per quad, minus one per quad on the two polar rows.
        let mesh = sphere(1.0, 12, 12);
        assert_eq!(mesh.num_triangles(), 12 * 12 * 2 - 2 * 12);
    }
}
