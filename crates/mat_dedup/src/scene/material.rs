//! Material and shader node tree definitions

use super::ImageKey;

/// A node in a material's shader graph
///
/// Only the image texture variant carries data the merge pass cares
/// about; the other kinds exist so node scans have realistic graphs to
/// walk past.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderNode {
    /// Samples pixel data from a texture image; the image reference may
    /// be unassigned
    ImageTexture {
        /// Referenced texture image, if one is assigned to the node
        image: Option<ImageKey>,
    },
    /// Principled BSDF shading node
    PrincipledBsdf,
    /// Mixes two shader inputs
    MixShader,
    /// Final surface output node
    MaterialOutput,
}

/// An ordered shader node graph attached to a material
///
/// Node order is the graph's stored order, and it is load-bearing: the
/// merge pass fingerprints a material by its *first* image texture node
/// with an assigned image.
#[derive(Debug, Clone, Default)]
pub struct NodeTree {
    nodes: Vec<ShaderNode>,
}

impl NodeTree {
    /// Create an empty node tree
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the typical image-backed shading setup: an image texture
    /// node feeding a BSDF and an output node
    #[must_use]
    pub fn with_image(image: ImageKey) -> Self {
        Self {
            nodes: vec![
                ShaderNode::ImageTexture { image: Some(image) },
                ShaderNode::PrincipledBsdf,
                ShaderNode::MaterialOutput,
            ],
        }
    }

    /// Append a node in stored order
    pub fn push(&mut self, node: ShaderNode) {
        self.nodes.push(node);
    }

    /// Nodes in stored order
    #[must_use]
    pub fn nodes(&self) -> &[ShaderNode] {
        &self.nodes
    }

    /// First image texture node with an assigned image, in stored order
    ///
    /// Explicit first-match rule: scanning stops at the first qualifying
    /// node; later image nodes never influence the result.
    #[must_use]
    pub fn first_image(&self) -> Option<ImageKey> {
        self.nodes.iter().find_map(|node| match node {
            ShaderNode::ImageTexture { image: Some(image) } => Some(*image),
            _ => None,
        })
    }
}

/// A named shading definition assignable to object surfaces
#[derive(Debug, Clone)]
pub struct Material {
    name: String,
    /// Whether the material claims to use a node-based shader graph
    use_nodes: bool,
    node_tree: Option<NodeTree>,
    /// Host-style pin: counts as one user even with no slot references
    fake_user: bool,
}

impl Material {
    /// Create a material without a node tree
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            use_nodes: false,
            node_tree: None,
            fake_user: false,
        }
    }

    /// Attach a node tree and mark the material as node-based
    #[must_use]
    pub fn with_node_tree(mut self, tree: NodeTree) -> Self {
        self.use_nodes = true;
        self.node_tree = Some(tree);
        self
    }

    /// Override the node-usage flag without touching the tree
    ///
    /// Hosts can leave a material claiming node usage while its tree is
    /// missing; tests use this to reproduce that inconsistency.
    #[must_use]
    pub const fn with_use_nodes(mut self, use_nodes: bool) -> Self {
        self.use_nodes = use_nodes;
        self
    }

    /// Pin the material with a fake user
    #[must_use]
    pub const fn with_fake_user(mut self) -> Self {
        self.fake_user = true;
        self
    }

    /// Material name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the material claims node-based shading
    #[must_use]
    pub const fn use_nodes(&self) -> bool {
        self.use_nodes
    }

    /// The material's node tree, if present
    #[must_use]
    pub const fn node_tree(&self) -> Option<&NodeTree> {
        self.node_tree.as_ref()
    }

    /// Whether the material is pinned by a fake user
    #[must_use]
    pub const fn fake_user(&self) -> bool {
        self.fake_user
    }
}
