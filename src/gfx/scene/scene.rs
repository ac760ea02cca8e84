use std::ops::{Index, IndexMut};

use cgmath::{Matrix4, Vector3};

use super::node::{Node, NodeId};

/// Scene hierarchy stored as an arena of nodes.
///
/// The root node is created with the scene. Every other node is created under
/// an existing parent, so the hierarchy cannot contain cycles. Dropping the
/// scene drops every node and invalidates all handles.
#[derive(Debug, Clone)]
pub struct Scene {
    nodes: Vec<Node>,
}

impl Scene {
    /// Creates a scene containing only the root node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(None)],
        }
    }

    /// Handle of the root node
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Creates a new node with identity transformation under `parent`
    pub fn add_node(&mut self, parent: NodeId) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(Some(parent)));
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A scene always holds its root, so this is never true
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Composes the local transformations from the root down to `id`.
    ///
    /// Computed on every call; the result always reflects the latest local
    /// transformation of every ancestor.
    pub fn absolute_transformation(&self, id: NodeId) -> Matrix4<f32> {
        let mut node = &self.nodes[id.0];
        let mut absolute = node.transformation();
        while let Some(parent) = node.parent {
            node = &self.nodes[parent.0];
            absolute = node.transformation() * absolute;
        }
        absolute
    }

    /// World-space position of a node's origin
    pub fn absolute_translation(&self, id: NodeId) -> Vector3<f32> {
        self.absolute_transformation(id).w.truncate()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<NodeId> for Scene {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        self.node(id)
    }
}

impl IndexMut<NodeId> for Scene {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        self.node_mut(id)
    }
}
