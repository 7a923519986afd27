//! Duplicate material merging
//!
//! One forward pass over the scene in three phases: fingerprint the
//! texture of every node-based material, redirect object slots from
//! duplicates to one survivor per fingerprint, then sweep materials left
//! without users. There is no retry and no rollback; the first error
//! aborts the run and leaves any already-applied reassignments in place.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use crate::fingerprint::PixelHashCache;
use crate::scene::{MaterialKey, Scene, SceneError};

/// Merge pass errors
#[derive(Debug, Error)]
pub enum MergeError {
    /// A material claims node-based shading but carries no node tree
    #[error("material '{material}' uses nodes but has no node tree")]
    MissingNodeTree {
        /// Name of the inconsistent material
        material: String,
    },

    /// A node references an image that is no longer in the scene
    #[error("material '{material}' references an image that is not in the scene")]
    DanglingImageRef {
        /// Name of the material holding the dangling reference
        material: String,
    },

    /// Scene-level failure, e.g. unavailable pixel data
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Counters reported after a merge run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Object slots redirected from a duplicate to its survivor
    pub slots_reassigned: usize,
    /// Materials removed by the zero-user sweep
    pub materials_removed: usize,
}

impl fmt::Display for MergeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Merged materials: {}, unused materials removed: {}",
            self.slots_reassigned, self.materials_removed
        )
    }
}

/// Group node-based materials by the digest of their first assigned
/// image texture node
///
/// Materials without node trees, without image texture nodes, or whose
/// image texture nodes have no assigned image are excluded. Groups come
/// back in first-encountered digest order, members in collection order.
fn duplicate_groups(scene: &Scene) -> Result<Vec<Vec<MaterialKey>>, MergeError> {
    let mut cache = PixelHashCache::new();
    let mut groups: HashMap<String, Vec<MaterialKey>> = HashMap::new();
    let mut digest_order: Vec<String> = Vec::new();

    for (key, material) in scene.materials() {
        if !material.use_nodes() {
            continue;
        }

        let tree = material
            .node_tree()
            .ok_or_else(|| MergeError::MissingNodeTree {
                material: material.name().to_string(),
            })?;

        let Some(image_key) = tree.first_image() else {
            continue;
        };

        let image = scene
            .image(image_key)
            .ok_or_else(|| MergeError::DanglingImageRef {
                material: material.name().to_string(),
            })?;

        let digest = cache.digest(image)?;
        if !groups.contains_key(&digest) {
            digest_order.push(digest.clone());
        }
        groups.entry(digest).or_default().push(key);
    }

    Ok(digest_order
        .iter()
        .filter_map(|digest| groups.remove(digest))
        .collect())
}

/// Merge materials that reference pixel-identical textures
///
/// For every group of materials whose first assigned image texture node
/// points at images with equal content digests, the first material in
/// collection order survives; every object slot referencing one of the
/// others is redirected to it. This is a reference swap, not a property
/// copy: whatever the duplicates carried beyond the detected texture is
/// discarded with them. Afterwards every material in the scene with zero
/// users is removed, including materials that were already orphaned
/// before the run.
///
/// # Errors
///
/// Fails on a material claiming node usage without a tree, on a dangling
/// image reference, or on an image whose pixel data is not loaded. No
/// partial-failure recovery: the run stops at the first error.
pub fn merge_duplicate_materials(scene: &mut Scene) -> Result<MergeReport, MergeError> {
    let groups = duplicate_groups(scene)?;

    let mut slots_reassigned = 0;
    for group in groups.iter().filter(|group| group.len() > 1) {
        let survivor = group[0];
        let survivor_name = scene
            .material(survivor)
            .map_or_else(String::new, |mat| mat.name().to_string());

        for &duplicate in &group[1..] {
            if let Some(mat) = scene.material(duplicate) {
                log::debug!(
                    "Redirecting slots from '{}' to '{}'",
                    mat.name(),
                    survivor_name
                );
            }

            for (_, object) in scene.objects_mut() {
                for slot in object.slots_mut() {
                    if slot.material() == Some(duplicate) {
                        slot.set_material(Some(survivor));
                        slots_reassigned += 1;
                    }
                }
            }
        }
    }

    let materials_removed = scene.remove_unused_materials();

    log::info!(
        "Merged {} slot reference(s), removed {} unused material(s)",
        slots_reassigned,
        materials_removed
    );

    Ok(MergeReport {
        slots_reassigned,
        materials_removed,
    })
}
