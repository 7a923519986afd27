//! # Mat Dedup
//!
//! Duplicate-material detection and merging for in-memory 3D scenes.
//!
//! Content-creation scenes accumulate materials that differ only in name
//! while pointing at pixel-identical texture images. This crate models the
//! relevant slice of such a scene (texture images, materials with optional
//! shader node trees, objects with material slots) as an explicitly owned
//! [`Scene`] value and provides a single operation over it:
//! [`merge_duplicate_materials`] fingerprints the first image texture of
//! every node-based material, redirects object slots from duplicates to one
//! survivor per fingerprint, and removes the materials left without users.
//!
//! ## Quick Start
//!
//! ```rust
//! use mat_dedup::prelude::*;
//!
//! let mut scene = Scene::new();
//!
//! let pixels = vec![1.0; 2 * 2 * 4];
//! let img_a = scene.add_image(TextureImage::new("wall", 2, 2, pixels.clone()));
//! let img_b = scene.add_image(TextureImage::new("wall.001", 2, 2, pixels));
//!
//! let mat_a = scene.add_material(
//!     Material::new("Wall").with_node_tree(NodeTree::with_image(img_a)),
//! );
//! let mat_b = scene.add_material(
//!     Material::new("Wall.001").with_node_tree(NodeTree::with_image(img_b)),
//! );
//!
//! let mut cube = SceneObject::new("Cube");
//! cube.add_slot(Some(mat_a));
//! scene.add_object(cube);
//! let mut wall = SceneObject::new("Wall");
//! wall.add_slot(Some(mat_b));
//! scene.add_object(wall);
//!
//! let report = merge_duplicate_materials(&mut scene)?;
//! assert_eq!(report.slots_reassigned, 1);
//! assert_eq!(report.materials_removed, 1);
//! # Ok::<(), mat_dedup::MergeError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod fingerprint;
pub mod merge;
pub mod scene;

pub use fingerprint::{pixel_digest, PixelHashCache};
pub use merge::{merge_duplicate_materials, MergeError, MergeReport};
pub use scene::{
    ImageKey, Material, MaterialKey, MaterialSlot, NodeTree, ObjectKey, Scene, SceneError,
    SceneObject, ShaderNode, TextureImage,
};

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        fingerprint::{pixel_digest, PixelHashCache},
        merge::{merge_duplicate_materials, MergeError, MergeReport},
        scene::{
            ImageKey, Material, MaterialKey, MaterialSlot, NodeTree, ObjectKey, Scene,
            SceneError, SceneObject, ShaderNode, TextureImage,
        },
    };
}
