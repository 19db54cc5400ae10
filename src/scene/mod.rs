//! The scene graph and the objects it owns.

pub use self::object::{Material, MeshHandle, Object, ObjectKind};
pub use self::scene_graph::{NodeContent, NodeId, SceneGraph, SceneNode, Transform};

mod object;
mod scene_graph;
