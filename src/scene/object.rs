//! Drawable content of a scene node.

use crate::color::{self, Color};
use crate::procedural::RenderMesh;
use crate::resource::ResourceId;
use std::rc::Rc;

/// Physically inspired surface parameters, following the usual
/// metallic/roughness model with an additive emissive term.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Material {
    pub color: Color,
    pub emissive: Color,
    /// Multiplier of `emissive`; this is what the twinkle animations drive.
    pub emissive_intensity: f32,
    pub roughness: f32,
    pub metalness: f32,
    pub opacity: f32,
}

impl Default for Material {
    fn default() -> Self {
        Material {
            color: color::WHITE,
            emissive: color::BLACK,
            emissive_intensity: 1.0,
            roughness: 1.0,
            metalness: 0.0,
            opacity: 1.0,
        }
    }
}

impl Material {
    /// A non-emissive surface.
    pub fn standard(color: Color, roughness: f32, metalness: f32) -> Self {
        Material {
            color,
            roughness,
            metalness,
            ..Default::default()
        }
    }

    pub fn with_emissive(mut self, emissive: Color, intensity: f32) -> Self {
        self.emissive = emissive;
        self.emissive_intensity = intensity;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }
}

/// How the geometry of an object is rasterized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectKind {
    /// Lit triangles.
    Surface,
    /// Unlit, blended points.
    Points,
}

/// A geometry registered in the resource ledger.
///
/// The CPU mesh is shared so the renderer can upload it lazily without copying.
#[derive(Clone, Debug)]
pub struct MeshHandle {
    id: ResourceId,
    mesh: Rc<RenderMesh>,
}

impl MeshHandle {
    pub(crate) fn new(id: ResourceId, mesh: RenderMesh) -> Self {
        MeshHandle {
            id,
            mesh: Rc::new(mesh),
        }
    }

    /// The ledger id of this geometry; also the key of its GPU buffers.
    #[inline]
    pub fn id(&self) -> ResourceId {
        self.id
    }

    #[inline]
    pub fn mesh(&self) -> &RenderMesh {
        &self.mesh
    }
}

/// A drawable object: one geometry and one material, each owned exclusively.
#[derive(Clone, Debug)]
pub struct Object {
    mesh: MeshHandle,
    material: Material,
    material_id: ResourceId,
    kind: ObjectKind,
    visible: bool,
}

impl Object {
    pub(crate) fn new(
        mesh: MeshHandle,
        material: Material,
        material_id: ResourceId,
        kind: ObjectKind,
    ) -> Self {
        Object {
            mesh,
            material,
            material_id,
            kind,
            visible: true,
        }
    }

    #[inline]
    pub fn mesh(&self) -> &MeshHandle {
        &self.mesh
    }

    #[inline]
    pub fn material(&self) -> &Material {
        &self.material
    }

    #[inline]
    pub fn material_mut(&mut self) -> &mut Material {
        &mut self.material
    }

    #[inline]
    pub fn material_id(&self) -> ResourceId {
        self.material_id
    }

    #[inline]
    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[inline]
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}
