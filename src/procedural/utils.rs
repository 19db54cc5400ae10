//! Utilities useful for various generations tasks.

use glamx::{Vec2, Vec3};

/// Pushes a discretized counterclockwise circle to a buffer.
///
/// The circle lies on the horizontal plane at height `y`.
#[inline]
pub fn push_circle(radius: f32, nsubdiv: u32, dtheta: f32, y: f32, out: &mut Vec<Vec3>) {
    let mut curr_theta = 0.0f32;

    for _ in 0..nsubdiv {
        out.push(Vec3::new(
            curr_theta.cos() * radius,
            y,
            curr_theta.sin() * radius,
        ));
        curr_theta += dtheta;
    }
}

/// Creates the faces joining two circles with the same discretization.
///
/// The last quad wraps around to close the ring.
#[inline]
pub fn push_ring_indices(
    base_lower_circle: u32,
    base_upper_circle: u32,
    nsubdiv: u32,
    out: &mut Vec<[u32; 3]>,
) {
    assert!(nsubdiv > 0);

    for i in 0..nsubdiv {
        let j = (i + 1) % nsubdiv;
        push_rectangle_indices(
            base_upper_circle + i,
            base_upper_circle + j,
            base_lower_circle + i,
            base_lower_circle + j,
            out,
        );
    }
}

/// Pushes the triangle fan joining `center` to every consecutive pair of `ring`.
#[inline]
pub fn push_fan_indices(center: u32, base_ring: u32, nsubdiv: u32, out: &mut Vec<[u32; 3]>) {
    for i in 0..nsubdiv {
        let j = (i + 1) % nsubdiv;
        out.push([center, base_ring + i, base_ring + j]);
    }
}

/// Given four corner points, pushes to two counterclockwise triangles to `out`.
///
/// # Arguments:
/// * `ul` - the up-left point.
/// * `ur` - the up-right point.
/// * `dl` - the down-left point.
/// * `dr` - the down-right point.
#[inline]
pub fn push_rectangle_indices(ul: u32, ur: u32, dl: u32, dr: u32, out: &mut Vec<[u32; 3]>) {
    out.push([ul, dl, dr]);
    out.push([dr, ur, ul]);
}

/// Outward normal of the edge `a -> b` of a counterclockwise polygon.
#[inline]
pub fn outward_edge_normal(a: Vec2, b: Vec2) -> Vec2 {
    let e = b - a;
    Vec2::new(e.y, -e.x).normalize_or_zero()
}

/// Computes the normals of a set of vertices.
#[inline]
pub fn compute_normals(coordinates: &[Vec3], faces: &[[u32; 3]], normals: &mut Vec<Vec3>) {
    let mut divisor: Vec<f32> = vec![0.0; coordinates.len()];

    // Reinit all normals to zero.
    normals.clear();
    normals.extend(std::iter::repeat_n(Vec3::ZERO, coordinates.len()));

    // Accumulate normals ...
    for f in faces.iter() {
        let edge1 = coordinates[f[1] as usize] - coordinates[f[0] as usize];
        let edge2 = coordinates[f[2] as usize] - coordinates[f[0] as usize];
        let normal = edge1.cross(edge2).normalize_or_zero();

        for &i in f.iter() {
            normals[i as usize] += normal;
            divisor[i as usize] += 1.0;
        }
    }

    // ... and compute the mean
    for (n, divisor) in normals.iter_mut().zip(divisor.iter()) {
        if *divisor > 0.0 {
            *n = (*n / *divisor).normalize_or_zero();
        }
    }
}
