//! Node data: transforms, renderable attributes, and tags.

use cgmath::{Matrix4, Quaternion, Vector3};

/// Renderable geometry attached to a node.
///
/// Dimensions are in scene units, centered on the node's local origin.
/// Planes face local +Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    Plane { width: f32, height: f32 },
    Box { width: f32, height: f32, depth: f32 },
}

impl Geometry {
    /// Width/height footprint of the geometry, for layout arithmetic.
    pub fn dimensions(&self) -> (f32, f32) {
        match *self {
            Geometry::Plane { width, height } => (width, height),
            Geometry::Box { width, height, .. } => (width, height),
        }
    }
}

/// Surface appearance attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub color: [f32; 3],
    pub opacity: f32,
    /// Texture handle resolved by the host renderer.
    pub texture: Option<String>,
    pub double_sided: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            opacity: 1.0,
            texture: None,
            double_sided: false,
        }
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
}

/// Text content rendered by the host at the node's origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub content: String,
    pub font_size: f32,
    pub align: TextAlign,
    /// Characters per line before the host wraps, if any.
    pub wrap_count: Option<u32>,
    pub color: [f32; 3],
    pub style: FontStyle,
}

impl Text {
    pub fn new(content: impl Into<String>, font_size: f32) -> Self {
        Self {
            content: content.into(),
            font_size,
            align: TextAlign::Center,
            wrap_count: None,
            color: [0.2, 0.2, 0.2],
            style: FontStyle::Regular,
        }
    }
}

/// A node in the scene graph.
///
/// Carries a local transform plus optional renderable attributes. Parent and
/// child links are managed by [`Scene`](super::Scene); mutate them through
/// scene operations rather than directly.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: Option<String>,
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
    pub scale: Vector3<f32>,
    pub geometry: Option<Geometry>,
    pub material: Option<Material>,
    pub text: Option<Text>,
    pub tags: Vec<String>,
    pub(super) parent: Option<super::NodeId>,
    pub(super) children: Vec<super::NodeId>,
}

impl Node {
    /// Create an empty node with an identity transform.
    pub fn new() -> Self {
        Self {
            name: None,
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
            geometry: None,
            material: None,
            text: None,
            tags: Vec::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_position(mut self, position: Vector3<f32>) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Quaternion<f32>) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }

    pub fn with_text(mut self, text: Text) -> Self {
        self.text = Some(text);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Local transform matrix (T * R * S, column-major as cgmath builds it).
    pub fn local_transform(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from(self.rotation)
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}
