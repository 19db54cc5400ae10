//! Beveled, extruded star for the top of the tree.

use super::utils;
use super::RenderMesh;
use glamx::{Vec2, Vec3};

/// Shape and bevel parameters of the extruded star.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarSettings {
    /// Radius of the star tips.
    pub outer_radius: f32,
    /// Radius of the notches between tips.
    pub inner_radius: f32,
    /// Number of tips.
    pub points: u32,
    /// Thickness of the straight extruded wall.
    pub depth: f32,
    /// How far the bevel grows the outline outward.
    pub bevel_size: f32,
    /// How far each bevel extends beyond the wall along the extrusion axis.
    pub bevel_thickness: f32,
    /// Number of layers in each bevel.
    pub bevel_segments: u32,
}

impl Default for StarSettings {
    fn default() -> Self {
        Self {
            outer_radius: 0.45,
            inner_radius: 0.20,
            points: 5,
            depth: 0.18,
            bevel_size: 0.04,
            bevel_thickness: 0.04,
            bevel_segments: 2,
        }
    }
}

/// The closed star outline on the XY plane, counterclockwise.
///
/// Vertices alternate between `outer` and `inner` radii, starting with an outer
/// tip at angle `-π/2`.
pub fn star_outline(outer: f32, inner: f32, points: u32) -> Vec<Vec2> {
    let total = points * 2;

    (0..total)
        .map(|i| {
            let a = i as f32 / total as f32 * std::f32::consts::TAU - std::f32::consts::FRAC_PI_2;
            let r = if i % 2 == 0 { outer } else { inner };
            Vec2::new(a.cos() * r, a.sin() * r)
        })
        .collect()
}

/// Extrudes the star outline along Z, with a rounded bevel on both faces.
///
/// The result is centered on the origin along the extrusion axis. Side walls are
/// flat shaded; the two caps are triangle fans around the star center.
pub fn extruded_star(settings: &StarSettings) -> RenderMesh {
    let outline = star_outline(settings.outer_radius, settings.inner_radius, settings.points);
    let n = outline.len();
    let miters: Vec<Vec2> = (0..n)
        .map(|i| {
            let prev = outline[(i + n - 1) % n];
            let curr = outline[i];
            let next = outline[(i + 1) % n];
            miter(prev, curr, next)
        })
        .collect();

    let layers = bevel_layers(settings);
    let rings: Vec<Vec<Vec3>> = layers
        .iter()
        .map(|&(offset, z)| {
            outline
                .iter()
                .zip(&miters)
                .map(|(p, m)| (*p + *m * offset).extend(z))
                .collect()
        })
        .collect();

    let mut coords = Vec::new();
    let mut normals = Vec::new();
    let mut indices = Vec::new();

    /*
     * Walls: one flat quad per outline edge and per pair of layers.
     */
    for pair in rings.windows(2) {
        let (lower, upper) = (&pair[0], &pair[1]);

        for i in 0..n {
            let j = (i + 1) % n;
            let quad = [lower[i], lower[j], upper[j], upper[i]];
            let normal = (quad[1] - quad[0]).cross(quad[3] - quad[0]).normalize_or_zero();
            let base = coords.len() as u32;

            coords.extend_from_slice(&quad);
            normals.extend(std::iter::repeat_n(normal, 4));
            indices.push([base, base + 1, base + 2]);
            indices.push([base, base + 2, base + 3]);
        }
    }

    /*
     * Caps.
     */
    let front_z = layers[0].1;
    let back_z = layers[layers.len() - 1].1;

    for (z, normal) in [(front_z, Vec3::NEG_Z), (back_z, Vec3::Z)] {
        let center = coords.len() as u32;
        coords.push(Vec3::new(0.0, 0.0, z));
        coords.extend(outline.iter().map(|p| p.extend(z)));
        normals.extend(std::iter::repeat_n(normal, n + 1));
        utils::push_fan_indices(center, center + 1, n as u32, &mut indices);
    }

    RenderMesh::new(coords, Some(normals), indices)
}

// (outline offset, z) of each ring, from the front cap to the back cap.
fn bevel_layers(settings: &StarSettings) -> Vec<(f32, f32)> {
    let segments = settings.bevel_segments.max(1);
    let half_depth = settings.depth * 0.5;
    let mut front = Vec::with_capacity(segments as usize + 1);

    for b in 0..=segments {
        let t = b as f32 / segments as f32 * std::f32::consts::FRAC_PI_2;
        let z = settings.bevel_thickness * t.cos();
        let offset = settings.bevel_size * t.sin();
        front.push((offset, -half_depth - z));
    }

    let back = front.iter().rev().map(|&(offset, z)| (offset, -z));
    front.iter().copied().chain(back).collect()
}

// Direction that moves both adjacent edges outward by one unit.
fn miter(prev: Vec2, curr: Vec2, next: Vec2) -> Vec2 {
    let n1 = utils::outward_edge_normal(prev, curr);
    let n2 = utils::outward_edge_normal(curr, next);
    let denom = 1.0 + n1.dot(n2);

    if denom.abs() < 1.0e-4 {
        n1
    } else {
        (n1 + n2) / denom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_alternates_radii_and_points_up_first() {
        let outline = star_outline(0.45, 0.20, 5);
        assert_eq!(outline.len(), 10);
        assert!((outline[0] - Vec2::new(0.0, -0.45)).length() < 1.0e-6);

        for (i, p) in outline.iter().enumerate() {
            let expected = if i % 2 == 0 { 0.45 } else { 0.20 };
            assert!((p.length() - expected).abs() < 1.0e-6);
        }
    }

    #[test]
    fn test_extrusion_spans_depth_plus_bevels() {
        let settings = StarSettings::default();
        let mesh = extruded_star(&settings);
        let (zmin, zmax) = mesh
            .coords
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), c| (lo.min(c.z), hi.max(c.z)));
        let half = settings.depth * 0.5 + settings.bevel_thickness;

        assert!((zmin + half).abs() < 1.0e-5);
        assert!((zmax - half).abs() < 1.0e-5);
    }

    #[test]
    fn test_wall_normals_face_away_from_the_axis() {
        let mesh = extruded_star(&StarSettings::default());
        // The first ring of wall quads belongs to the front bevel; pick the
        // straight wall quads in the middle of the layer stack instead.
        let n = 10;
        let straight_band = 2 * n * 4;
        for k in 0..n {
            let base = straight_band + k * 4;
            let c = mesh.coords[base];
            let normal = mesh.normals[base];
            assert!(normal.z.abs() < 1.0e-5);
            assert!(Vec2::new(c.x, c.y).dot(Vec2::new(normal.x, normal.y)) > 0.0);
        }
    }
}
