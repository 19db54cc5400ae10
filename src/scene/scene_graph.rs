//! Arena-backed scene graph with strict, single-owner disposal.
//!
//! Nodes are owned by the graph and referenced by generational [`NodeId`]s.
//! A `NodeId` is only a lookup key: once its node is disposed, lookups through
//! it fail instead of reaching a recycled slot.

use super::{MeshHandle, Material, Object, ObjectKind};
use crate::light::Light;
use crate::procedural::RenderMesh;
use crate::resource::{ResourceKind, ResourceLedger};
use glamx::{Mat4, Quat, Vec3};

/// A handle on a node of a [`SceneGraph`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

/// Local transform of a node relative to its parent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// What a node carries besides its transform.
#[derive(Clone, Debug)]
pub enum NodeContent {
    Group,
    Object(Object),
    Light(Light),
}

/// A node of the scene graph.
#[derive(Clone, Debug)]
pub struct SceneNode {
    pub name: &'static str,
    pub transform: Transform,
    pub content: NodeContent,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl SceneNode {
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn object(&self) -> Option<&Object> {
        match &self.content {
            NodeContent::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn light(&self) -> Option<&Light> {
        match &self.content {
            NodeContent::Light(l) => Some(l),
            _ => None,
        }
    }
}

struct Slot {
    generation: u32,
    node: Option<SceneNode>,
}

/// The owner of every node, geometry and material of a scene.
///
/// Each object registers its geometry and its material in the graph's
/// [`ResourceLedger`] when added, and [`dispose`](Self::dispose) releases them
/// in a single depth-first walk from the root.
pub struct SceneGraph {
    slots: Vec<Slot>,
    free_list: Vec<u32>,
    root: NodeId,
    ledger: ResourceLedger,
}

impl SceneGraph {
    /// Creates a graph containing only its root group.
    pub fn new(ledger: &ResourceLedger) -> Self {
        let mut graph = SceneGraph {
            slots: Vec::new(),
            free_list: Vec::new(),
            root: NodeId {
                index: 0,
                generation: 0,
            },
            ledger: ledger.clone(),
        };
        graph.root = graph.insert(None, "root", NodeContent::Group);
        graph
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn ledger(&self) -> &ResourceLedger {
        &self.ledger
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.node.is_some()).count()
    }

    /// Whether the graph holds nothing but its root.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    fn insert(&mut self, parent: Option<NodeId>, name: &'static str, content: NodeContent) -> NodeId {
        let node = SceneNode {
            name,
            transform: Transform::default(),
            content,
            parent,
            children: Vec::new(),
        };

        let id = match self.free_list.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.node = Some(node);
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId {
                    index: self.slots.len() as u32 - 1,
                    generation: 0,
                }
            }
        };

        if let Some(parent) = parent.and_then(|p| self.node_mut(p)) {
            parent.children.push(id);
        }

        id
    }

    // Attaches to `parent`, or to the root if `parent` is stale.
    fn attach(&mut self, parent: NodeId, name: &'static str, content: NodeContent) -> NodeId {
        let parent = if self.contains(parent) {
            parent
        } else {
            log::warn!("Stale parent handle for node `{}`; attaching to the root.", name);
            self.root
        };

        self.insert(Some(parent), name, content)
    }

    /// Adds an empty group under `parent`.
    pub fn add_group(&mut self, parent: NodeId, name: &'static str) -> NodeId {
        self.attach(parent, name, NodeContent::Group)
    }

    /// Adds an object under `parent`, registering its geometry and material.
    pub fn add_object(
        &mut self,
        parent: NodeId,
        name: &'static str,
        mesh: RenderMesh,
        material: Material,
        kind: ObjectKind,
    ) -> NodeId {
        let mesh = MeshHandle::new(self.ledger.allocate(ResourceKind::Geometry), mesh);
        let material_id = self.ledger.allocate(ResourceKind::Material);
        let object = Object::new(mesh, material, material_id, kind);
        self.attach(parent, name, NodeContent::Object(object))
    }

    /// Adds a light under `parent`.
    pub fn add_light(&mut self, parent: NodeId, name: &'static str, light: Light) -> NodeId {
        self.attach(parent, name, NodeContent::Light(light))
    }

    /// Whether `id` still refers to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.slots
            .get(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.node.as_ref())
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.node.as_mut())
    }

    pub fn object(&self, id: NodeId) -> Option<&Object> {
        self.node(id).and_then(SceneNode::object)
    }

    pub fn object_mut(&mut self, id: NodeId) -> Option<&mut Object> {
        match self.node_mut(id).map(|n| &mut n.content) {
            Some(NodeContent::Object(o)) => Some(o),
            _ => None,
        }
    }

    pub fn transform_mut(&mut self, id: NodeId) -> Option<&mut Transform> {
        self.node_mut(id).map(|n| &mut n.transform)
    }

    /// Sets the local translation of a node. Stale handles are ignored.
    pub fn set_position(&mut self, id: NodeId, translation: Vec3) {
        if let Some(t) = self.transform_mut(id) {
            t.translation = translation;
        }
    }

    /// Sets the local rotation of a node. Stale handles are ignored.
    pub fn set_rotation(&mut self, id: NodeId, rotation: Quat) {
        if let Some(t) = self.transform_mut(id) {
            t.rotation = rotation;
        }
    }

    /// Sets the local scale of a node. Stale handles are ignored.
    pub fn set_scale(&mut self, id: NodeId, scale: Vec3) {
        if let Some(t) = self.transform_mut(id) {
            t.scale = scale;
        }
    }

    /// World matrix of a node: the product of its ancestors' local transforms
    /// and its own.
    pub fn world_transform(&self, id: NodeId) -> Option<Mat4> {
        let mut node = self.node(id)?;
        let mut world = node.transform.to_matrix();

        while let Some(parent) = node.parent.and_then(|p| self.node(p)) {
            world = parent.transform.to_matrix() * world;
            node = parent;
        }

        Some(world)
    }

    /// Visits every node, parents before children, with its world matrix.
    pub fn walk_depth_first<F: FnMut(NodeId, &SceneNode, &Mat4)>(&self, mut f: F) {
        let mut stack = vec![(self.root, Mat4::IDENTITY)];

        while let Some((id, parent_world)) = stack.pop() {
            if let Some(node) = self.node(id) {
                let world = parent_world * node.transform.to_matrix();
                f(id, node, &world);

                // Reversed so that children are visited in insertion order.
                stack.extend(node.children.iter().rev().map(|c| (*c, world)));
            }
        }
    }

    /// Releases every geometry and material of the graph, exactly once, and
    /// removes every node but the root.
    ///
    /// Returns the number of released resources. Calling it again releases
    /// nothing and returns 0.
    pub fn dispose(&mut self) -> usize {
        let mut owned = Vec::new();

        self.walk_depth_first(|_, node, _| {
            if let Some(object) = node.object() {
                owned.push(object.mesh().id());
                owned.push(object.material_id());
            }
        });

        let released = owned
            .into_iter()
            .filter(|id| self.ledger.release(*id))
            .count();

        let root = self.root;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if index as u32 != root.index && slot.node.take().is_some() {
                slot.generation += 1;
                self.free_list.push(index as u32);
            }
        }
        if let Some(root) = self.node_mut(root) {
            root.children.clear();
        }

        if released > 0 {
            log::debug!("Scene graph disposed {} resources.", released);
        }
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::procedural;

    fn graph_with_two_objects() -> (ResourceLedger, SceneGraph, NodeId, NodeId) {
        let ledger = ResourceLedger::new();
        let mut graph = SceneGraph::new(&ledger);
        let group = graph.add_group(graph.root(), "group");
        let a = graph.add_object(
            group,
            "a",
            procedural::unit_cuboid(),
            Material::default(),
            ObjectKind::Surface,
        );
        let b = graph.add_object(
            a,
            "b",
            procedural::unit_cuboid(),
            Material::default(),
            ObjectKind::Surface,
        );
        (ledger, graph, group, b)
    }

    #[test]
    fn test_world_transform_composes_parents() {
        let (_ledger, mut graph, group, b) = graph_with_two_objects();
        graph.set_position(group, Vec3::new(1.0, 0.0, 0.0));
        graph.set_scale(group, Vec3::splat(2.0));
        graph.set_position(b, Vec3::new(0.0, 1.0, 0.0));

        let world = graph.world_transform(b).unwrap();
        let p = world.transform_point3(Vec3::ZERO);
        assert!((p - Vec3::new(1.0, 2.0, 0.0)).length() < 1.0e-6);
    }

    #[test]
    fn test_walk_visits_parents_first() {
        let (_ledger, graph, group, b) = graph_with_two_objects();
        let mut order = Vec::new();
        graph.walk_depth_first(|id, _, _| order.push(id));

        assert_eq!(order.len(), 4);
        assert_eq!(order[0], graph.root());
        assert_eq!(order[1], group);
        assert_eq!(order[3], b);
    }

    #[test]
    fn test_dispose_releases_each_resource_once() {
        let (ledger, mut graph, group, b) = graph_with_two_objects();
        assert_eq!(ledger.total_live(), 4);

        assert_eq!(graph.dispose(), 4);
        assert_eq!(ledger.total_live(), 0);
        assert!(!graph.contains(group));
        assert!(graph.object(b).is_none());
        assert_eq!(graph.len(), 1);

        assert_eq!(graph.dispose(), 0);
        assert_eq!(ledger.double_releases(), 0);
    }

    #[test]
    fn test_recycled_slots_reject_stale_handles() {
        let (_ledger, mut graph, group, _) = graph_with_two_objects();
        let _ = graph.dispose();
        let fresh = graph.add_group(graph.root(), "fresh");

        assert!(graph.contains(fresh));
        assert!(!graph.contains(group));
    }
}
