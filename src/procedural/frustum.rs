use super::utils;
use super::RenderMesh;
use glamx::Vec3;

/// Generates a vertical frustum: a cylinder whose two radii may differ.
///
/// The frustum is centered at the origin and extends from `y = -height / 2` to
/// `y = +height / 2`. A `top_radius` of zero gives a cone. The bottom disk is
/// always closed; the top disk is closed only when it has a non-zero radius.
///
/// # Arguments
/// * `bottom_radius` - Radius of the base circle
/// * `top_radius` - Radius of the upper circle (0 for a cone)
/// * `height` - Distance between the two circles
/// * `nsubdiv` - Number of subdivisions around the circumference
///
/// # Returns
/// A `RenderMesh` with smooth side normals and flat cap normals
///
/// # Example
/// ```
/// # use yule3d::procedural::frustum;
/// // The trunk of the tree: slightly wider at its base.
/// let trunk = frustum(0.42, 0.35, 1.8, 24);
/// assert!(trunk.num_triangles() > 0);
/// ```
pub fn frustum(bottom_radius: f32, top_radius: f32, height: f32, nsubdiv: u32) -> RenderMesh {
    assert!(nsubdiv >= 3, "a frustum needs at least three subdivisions");

    let dtheta = std::f32::consts::TAU / nsubdiv as f32;
    let half = height * 0.5;
    let mut coords = Vec::new();
    let mut normals = Vec::new();
    let mut indices = Vec::new();

    /*
     * Side.
     */
    utils::push_circle(bottom_radius, nsubdiv, dtheta, -half, &mut coords);
    utils::push_circle(top_radius, nsubdiv, dtheta, half, &mut coords);

    let slope = (bottom_radius - top_radius) / height;
    for i in 0..2 * nsubdiv {
        let theta = (i % nsubdiv) as f32 * dtheta;
        normals.push(Vec3::new(theta.cos(), slope, theta.sin()).normalize());
    }

    utils::push_ring_indices(0, nsubdiv, nsubdiv, &mut indices);

    /*
     * Caps.
     */
    push_cap(bottom_radius, -half, -Vec3::Y, nsubdiv, dtheta, &mut coords, &mut normals, &mut indices);

    if top_radius > 0.0 {
        push_cap(top_radius, half, Vec3::Y, nsubdiv, dtheta, &mut coords, &mut normals, &mut indices);
    }

    RenderMesh::new(coords, Some(normals), indices)
}

/// Generates a cone with its base at `y = -height / 2` and apex at `y = +height / 2`.
pub fn cone(radius: f32, height: f32, nsubdiv: u32) -> RenderMesh {
    frustum(radius, 0.0, height, nsubdiv)
}

/// Generates a closed cylinder centered at the origin.
pub fn cylinder(radius: f32, height: f32, nsubdiv: u32) -> RenderMesh {
    frustum(radius, radius, height, nsubdiv)
}

fn push_cap(
    radius: f32,
    y: f32,
    normal: Vec3,
    nsubdiv: u32,
    dtheta: f32,
    coords: &mut Vec<Vec3>,
    normals: &mut Vec<Vec3>,
    indices: &mut Vec<[u32; 3]>,
) {
    let center = coords.len() as u32;
    coords.push(Vec3::new(0.0, y, 0.0));
    utils::push_circle(radius, nsubdiv, dtheta, y, coords);
    normals.extend(std::iter::repeat_n(normal, nsubdiv as usize + 1));
    utils::push_fan_indices(center, center + 1, nsubdiv, indices);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cone_apex_and_base() {
        let mesh = cone(1.8, 1.2, 48);
        let (lo, hi) = mesh.y_range().unwrap();
        assert!((lo + 0.6).abs() < 1.0e-6);
        assert!((hi - 0.6).abs() < 1.0e-6);
        assert!((mesh.max_axial_radius() - 1.8).abs() < 1.0e-5);
    }

    #[test]
    fn test_cone_has_no_top_cap() {
        // side (2n) + bottom cap (n)
        assert_eq!(cone(1.0, 1.0, 16).num_triangles(), 48);
        // side (2n) + both caps (2n)
        assert_eq!(cylinder(1.0, 1.0, 16).num_triangles(), 64);
    }

    #[test]
    fn test_side_normals_lean_upward_for_cones() {
        let mesh = cone(1.0, 1.0, 8);
        assert!(mesh.normals[0].y > 0.0);
        assert!((mesh.normals[0].length() - 1.0).abs() < 1.0e-6);
    }
}
