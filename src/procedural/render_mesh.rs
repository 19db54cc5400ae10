use super::utils;
use glamx::{Mat3, Mat4, Vec3};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
/// Geometric description of a mesh, as generated on the CPU before upload.
///
/// Vertices, normals and indices always share the same indexing. A mesh with an
/// empty index buffer is a point cloud: only its coordinates are meaningful.
pub struct RenderMesh {
    /// Coordinates of the mesh vertices.
    pub coords: Vec<Vec3>,
    /// One normal per vertex.
    pub normals: Vec<Vec3>,
    /// Index buffer of the mesh, one entry per triangle.
    pub indices: Vec<[u32; 3]>,
}

impl RenderMesh {
    /// Creates a new `RenderMesh`.
    ///
    /// If no `normals` are provided, they are computed from the triangles.
    pub fn new(coords: Vec<Vec3>, normals: Option<Vec<Vec3>>, indices: Vec<[u32; 3]>) -> RenderMesh {
        let normals = normals.unwrap_or_else(|| {
            let mut out = Vec::new();
            utils::compute_normals(&coords, &indices, &mut out);
            out
        });

        RenderMesh {
            coords,
            normals,
            indices,
        }
    }

    /// Creates a point cloud: coordinates only, no triangles.
    pub fn points(coords: Vec<Vec3>) -> RenderMesh {
        let normals = vec![Vec3::Y; coords.len()];
        RenderMesh {
            coords,
            normals,
            indices: Vec::new(),
        }
    }

    /// Whether this mesh carries no triangles.
    #[inline]
    pub fn is_point_cloud(&self) -> bool {
        self.indices.is_empty()
    }

    /// Translates each vertex of this mesh.
    #[inline]
    pub fn translate_by(&mut self, t: Vec3) {
        for c in self.coords.iter_mut() {
            *c += t;
        }
    }

    /// Scales each vertex of this mesh.
    ///
    /// Normals are transformed by the inverse of the scale factors and then
    /// renormalized to remain perpendicular to the scaled surface.
    #[inline]
    pub fn scale_by(&mut self, s: Vec3) {
        for c in self.coords.iter_mut() {
            *c *= s;
        }

        let inv_scale = Vec3::new(1.0 / s.x, 1.0 / s.y, 1.0 / s.z);
        for n in self.normals.iter_mut() {
            *n = (*n * inv_scale).normalize_or_zero();
        }
    }

    /// Transforms each vertex by `m` and each normal by its inverse transpose.
    #[inline]
    pub fn transform_by(&mut self, m: Mat4) {
        for c in self.coords.iter_mut() {
            *c = m.transform_point3(*c);
        }

        let nm = Mat3::from_mat4(m).inverse().transpose();
        for n in self.normals.iter_mut() {
            *n = (nm * *n).normalize_or_zero();
        }
    }

    /// Appends the vertices and triangles of `other` to this mesh.
    pub fn append(&mut self, other: &RenderMesh) {
        let base = self.coords.len() as u32;
        self.coords.extend_from_slice(&other.coords);
        self.normals.extend_from_slice(&other.normals);
        self.indices.extend(
            other
                .indices
                .iter()
                .map(|t| [t[0] + base, t[1] + base, t[2] + base]),
        );
    }

    /// The number of triangles on this mesh.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.indices.len()
    }

    /// Returns the index buffer flattened to one `u32` per triangle corner.
    #[inline]
    pub fn flat_indices(&self) -> Vec<u32> {
        self.indices.iter().flat_map(|t| t.iter().copied()).collect()
    }

    /// Recomputes the mesh normals from its triangles.
    #[inline]
    pub fn recompute_normals(&mut self) {
        let mut new_normals = Vec::new();
        utils::compute_normals(&self.coords, &self.indices, &mut new_normals);
        self.normals = new_normals;
    }

    /// Largest distance of a vertex from the vertical (Y) axis.
    pub fn max_axial_radius(&self) -> f32 {
        self.coords
            .iter()
            .map(|c| (c.x * c.x + c.z * c.z).sqrt())
            .fold(0.0, f32::max)
    }

    /// Smallest and largest `y` among the vertices, or `None` for an empty mesh.
    pub fn y_range(&self) -> Option<(f32, f32)> {
        let mut it = self.coords.iter().map(|c| c.y);
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> RenderMesh {
        RenderMesh::new(
            vec![Vec3::ZERO, Vec3::Z, Vec3::X],
            None,
            vec![[0, 1, 2]],
        )
    }

    #[test]
    fn test_new_computes_normals_when_missing() {
        let mesh = triangle();
        for n in &mesh.normals {
            assert!((*n - Vec3::Y).length() < 1.0e-6);
        }
    }

    #[test]
    fn test_append_offsets_indices() {
        let mut a = triangle();
        a.append(&triangle());
        assert_eq!(a.coords.len(), 6);
        assert_eq!(a.indices[1], [3, 4, 5]);
    }

    #[test]
    fn test_transform_by_translation_keeps_normals() {
        let mut mesh = triangle();
        mesh.transform_by(Mat4::from_translation(Vec3::new(0.0, 2.0, 0.0)));
        assert_eq!(mesh.y_range(), Some((2.0, 2.0)));
        assert!((mesh.normals[0] - Vec3::Y).length() < 1.0e-6);
    }

    #[test]
    fn test_point_cloud_has_no_triangles() {
        let cloud = RenderMesh::points(vec![Vec3::X, Vec3::Y]);
        assert!(cloud.is_point_cloud());
        assert_eq!(cloud.num_triangles(), 0);
    }
}
