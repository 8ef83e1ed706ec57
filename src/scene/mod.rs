//! # Scene Graph
//!
//! Headless scene graph shared by every gallery component: a generational
//! node arena with parent/child attachment, tag queries, and world-space
//! transform composition.
//!
//! ## Architecture Overview
//!
//! - **Nodes** ([`Node`]) - local transform plus optional renderable
//!   attributes (plane/box geometry, material, text)
//! - **Identity** ([`NodeId`]) - generational handles; a despawned slot is
//!   reused with a bumped generation, so stale handles resolve to `None`
//!   instead of aliasing a new node
//! - **Transforms** - position/rotation/scale compose through parent chains
//!   (`world_position`, `world_rotation`, `world_transform`)
//! - **Ray tests** ([`raycast`]) - ordered ray intersection against node sets
//!
//! The canonical forward axis is local -Z; planes face local +Z.

pub mod node;
pub mod raycast;

pub use node::{FontStyle, Geometry, Material, Node, Text, TextAlign};
pub use raycast::{raycast, Aabb, Ray, RayHit};

use cgmath::{Matrix4, Quaternion, Vector3};
use log::warn;

/// Generational handle to a scene node.
///
/// Handles stay cheap to copy and compare; holding one does not keep the
/// node alive. Resolve with [`Scene::get`] / [`Scene::contains`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// The scene graph.
///
/// A single root node exists for the lifetime of the scene; freshly spawned
/// nodes become children of the root unless spawned under an explicit parent
/// or detached.
pub struct Scene {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: NodeId,
    active_camera: Option<NodeId>,
}

impl Scene {
    /// Creates an empty scene containing only the root node.
    pub fn new() -> Self {
        let root = NodeId {
            index: 0,
            generation: 0,
        };
        Self {
            slots: vec![Slot {
                generation: 0,
                node: Some(Node::new().with_name("root")),
            }],
            free: Vec::new(),
            root,
            active_camera: None,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The camera node the viewer currently sees through, if one is set.
    pub fn active_camera(&self) -> Option<NodeId> {
        self.active_camera.filter(|id| self.contains(*id))
    }

    pub fn set_active_camera(&mut self, camera: Option<NodeId>) {
        self.active_camera = camera;
    }

    /// Spawns a node as a child of the root.
    pub fn spawn(&mut self, node: Node) -> NodeId {
        let root = self.root;
        self.spawn_child(root, node)
    }

    /// Spawns a node with no parent.
    ///
    /// Detached nodes still resolve and raycast, but contribute no world
    /// transform to anyone and are skipped by whole-tree traversals.
    pub fn spawn_detached(&mut self, node: Node) -> NodeId {
        self.insert(node)
    }

    /// Spawns a node as a child of `parent`.
    ///
    /// If `parent` is stale the node is spawned detached instead.
    pub fn spawn_child(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = self.insert(node);
        if self.contains(parent) {
            self.node_mut(id).parent = Some(parent);
            self.node_mut(parent).children.push(id);
        } else {
            warn!("spawn_child: parent {:?} is gone, spawning detached", parent);
        }
        id
    }

    fn insert(&mut self, node: Node) -> NodeId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            NodeId {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            NodeId {
                index,
                generation: 0,
            }
        }
    }

    /// Removes a node and its entire subtree.
    ///
    /// Stale ids are ignored. The root cannot be despawned.
    pub fn despawn(&mut self, id: NodeId) {
        if id == self.root || !self.contains(id) {
            return;
        }

        // Detach from parent before tearing the subtree down
        if let Some(parent) = self.node(id).parent {
            if self.contains(parent) {
                self.node_mut(parent).children.retain(|c| *c != id);
            }
        }
        self.despawn_subtree(id);
    }

    fn despawn_subtree(&mut self, id: NodeId) {
        let children = std::mem::take(&mut self.node_mut(id).children);
        for child in children {
            if self.contains(child) {
                self.despawn_subtree(child);
            }
        }
        let slot = &mut self.slots[id.index as usize];
        slot.node = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
    }

    /// Whether `id` still refers to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.slots
            .get(id.index as usize)
            .map_or(false, |slot| slot.generation == id.generation && slot.node.is_some())
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if self.contains(id) {
            self.slots[id.index as usize].node.as_ref()
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if self.contains(id) {
            self.slots[id.index as usize].node.as_mut()
        } else {
            None
        }
    }

    // Internal accessors for ids already checked with contains()
    fn node(&self, id: NodeId) -> &Node {
        self.slots[id.index as usize].node.as_ref().unwrap()
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.slots[id.index as usize].node.as_mut().unwrap()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent.filter(|p| self.contains(*p))
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |node| node.children.as_slice())
    }

    /// Moves `id` under `new_parent`, detaching it from its current parent.
    pub fn reparent(&mut self, id: NodeId, new_parent: NodeId) {
        if !self.contains(id) || !self.contains(new_parent) || id == new_parent {
            return;
        }
        if let Some(old) = self.node(id).parent {
            if self.contains(old) {
                self.node_mut(old).children.retain(|c| *c != id);
            }
        }
        self.node_mut(id).parent = Some(new_parent);
        self.node_mut(new_parent).children.push(id);
    }

    /// Adds a tag to a live node. Stale ids are ignored.
    pub fn add_tag(&mut self, id: NodeId, tag: impl Into<String>) {
        if let Some(node) = self.get_mut(id) {
            let tag = tag.into();
            if !node.has_tag(&tag) {
                node.tags.push(tag);
            }
        }
    }

    /// All live nodes carrying `tag`, in arena order.
    pub fn nodes_with_tag(&self, tag: &str) -> Vec<NodeId> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                let node = slot.node.as_ref()?;
                node.has_tag(tag).then(|| NodeId {
                    index: index as u32,
                    generation: slot.generation,
                })
            })
            .collect()
    }

    /// Number of live nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.node.is_some()).count()
    }

    /// World transform composed through the parent chain (T * R * S per level).
    pub fn world_transform(&self, id: NodeId) -> Option<Matrix4<f32>> {
        let node = self.get(id)?;
        let local = node.local_transform();
        match node.parent.filter(|p| self.contains(*p)) {
            Some(parent) => Some(self.world_transform(parent)? * local),
            None => Some(local),
        }
    }

    /// World-space position of the node's origin.
    pub fn world_position(&self, id: NodeId) -> Option<Vector3<f32>> {
        let m = self.world_transform(id)?;
        Some(Vector3::new(m.w.x, m.w.y, m.w.z))
    }

    /// World-space orientation, composed through the parent chain.
    ///
    /// Scale is ignored; rotations multiply parent-first.
    pub fn world_rotation(&self, id: NodeId) -> Option<Quaternion<f32>> {
        let node = self.get(id)?;
        match node.parent.filter(|p| self.contains(*p)) {
            Some(parent) => Some(self.world_rotation(parent)? * node.rotation),
            None => Some(node.rotation),
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Deg, Rotation3};

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-5,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_spawn_and_despawn() {
        let mut scene = Scene::new();
        let a = scene.spawn(Node::new().with_name("a"));
        let b = scene.spawn_child(a, Node::new().with_name("b"));

        assert!(scene.contains(a));
        assert_eq!(scene.parent(b), Some(a));
        assert_eq!(scene.children(a), &[b]);

        scene.despawn(a);
        assert!(!scene.contains(a));
        assert!(!scene.contains(b), "subtree is removed with the parent");
    }

    #[test]
    fn test_stale_id_does_not_alias_reused_slot() {
        let mut scene = Scene::new();
        let a = scene.spawn(Node::new().with_name("a"));
        scene.despawn(a);

        let b = scene.spawn(Node::new().with_name("b"));
        // Slot is reused but the old handle must stay dead
        assert!(scene.contains(b));
        assert!(!scene.contains(a));
        assert!(scene.get(a).is_none());
    }

    #[test]
    fn test_tag_query() {
        let mut scene = Scene::new();
        let wall = scene.spawn(Node::new().with_tag("collidable"));
        let art = scene.spawn(Node::new().with_tag("collidable").with_tag("clickable"));
        scene.spawn(Node::new());

        let hits = scene.nodes_with_tag("collidable");
        assert_eq!(hits, vec![wall, art]);
        assert_eq!(scene.nodes_with_tag("clickable"), vec![art]);
    }

    #[test]
    fn test_world_position_composes_through_parents() {
        let mut scene = Scene::new();
        let parent = scene.spawn(
            Node::new().with_position(cgmath::Vector3::new(1.0, 2.0, 3.0)),
        );
        let child = scene.spawn_child(
            parent,
            Node::new().with_position(cgmath::Vector3::new(0.0, 0.5, 0.0)),
        );

        let pos = scene.world_position(child).unwrap();
        assert_close(pos.x, 1.0);
        assert_close(pos.y, 2.5);
        assert_close(pos.z, 3.0);
    }

    #[test]
    fn test_world_rotation_composes_through_parents() {
        let mut scene = Scene::new();
        let parent = scene.spawn(
            Node::new().with_rotation(Quaternion::from_angle_y(Deg(90.0))),
        );
        let child = scene.spawn_child(
            parent,
            Node::new()
                .with_position(cgmath::Vector3::new(0.0, 0.0, -1.0))
                .with_rotation(Quaternion::from_angle_y(Deg(90.0))),
        );

        // Child local -Z rotates to world -X under the parent's yaw
        let pos = scene.world_position(child).unwrap();
        assert_close(pos.x, -1.0);
        assert_close(pos.z, 0.0);

        // Rotations accumulate: 90 + 90 = 180 degrees of yaw
        let rot = scene.world_rotation(child).unwrap();
        let forward = rot * cgmath::Vector3::new(0.0, 0.0, -1.0);
        assert_close(forward.z, 1.0);
    }

    #[test]
    fn test_spawn_child_of_stale_parent_is_detached() {
        let mut scene = Scene::new();
        let parent = scene.spawn(Node::new());
        scene.despawn(parent);

        let orphan = scene.spawn_child(parent, Node::new());
        assert!(scene.contains(orphan));
        assert_eq!(scene.parent(orphan), None);
    }

    #[test]
    fn test_active_camera_goes_stale_with_node() {
        let mut scene = Scene::new();
        let cam = scene.spawn(Node::new().with_name("camera"));
        scene.set_active_camera(Some(cam));
        assert_eq!(scene.active_camera(), Some(cam));

        scene.despawn(cam);
        assert_eq!(scene.active_camera(), None);
    }
}
