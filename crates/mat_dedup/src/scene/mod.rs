//! In-memory scene model
//!
//! Owns the three collections the merge pass operates on: texture images,
//! materials, and scene objects. The collections live in slotmap arenas so
//! that slots and node trees can hold stable keys while materials are
//! removed out from under them.
//!
//! Enumeration order: arenas that have only seen insertions iterate in
//! insertion order. The merge pass relies on this for its survivor choice,
//! and never inserts while running, so the order it observes is the order
//! in which the scene was built.

pub mod material;
pub mod object;
pub mod texture;

pub use material::{Material, NodeTree, ShaderNode};
pub use object::{MaterialSlot, SceneObject};
pub use texture::TextureImage;

use slotmap::{new_key_type, SlotMap};
use thiserror::Error;

new_key_type! {
    /// Stable handle to a [`TextureImage`] in a [`Scene`]
    pub struct ImageKey;
    /// Stable handle to a [`Material`] in a [`Scene`]
    pub struct MaterialKey;
    /// Stable handle to a [`SceneObject`] in a [`Scene`]
    pub struct ObjectKey;
}

/// Scene-level errors
#[derive(Debug, Error)]
pub enum SceneError {
    /// Image exists but its pixel data is not resident in memory
    #[error("pixel data for image '{image}' is not loaded")]
    PixelsUnavailable {
        /// Name of the image whose pixels were requested
        image: String,
    },

    /// Attempted to remove a material that still has users
    #[error("material '{material}' still has {users} user(s)")]
    MaterialInUse {
        /// Name of the material
        material: String,
        /// Remaining user count at the time of the call
        users: usize,
    },

    /// A material handle did not resolve to a live material
    #[error("stale material handle")]
    UnknownMaterial,
}

/// Owned scene context: images, materials, and objects
///
/// Stands in for the host application's global data collections. All
/// mutation goes through this value, so operations over the scene are
/// plain functions rather than hooks into ambient state.
#[derive(Debug, Default)]
pub struct Scene {
    images: SlotMap<ImageKey, TextureImage>,
    materials: SlotMap<MaterialKey, Material>,
    objects: SlotMap<ObjectKey, SceneObject>,
}

impl Scene {
    /// Create an empty scene
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a texture image, returning its handle
    pub fn add_image(&mut self, image: TextureImage) -> ImageKey {
        self.images.insert(image)
    }

    /// Add a material, returning its handle
    pub fn add_material(&mut self, material: Material) -> MaterialKey {
        self.materials.insert(material)
    }

    /// Add a scene object, returning its handle
    pub fn add_object(&mut self, object: SceneObject) -> ObjectKey {
        self.objects.insert(object)
    }

    /// Look up an image by handle
    #[must_use]
    pub fn image(&self, key: ImageKey) -> Option<&TextureImage> {
        self.images.get(key)
    }

    /// Look up a material by handle
    #[must_use]
    pub fn material(&self, key: MaterialKey) -> Option<&Material> {
        self.materials.get(key)
    }

    /// Look up an object by handle
    #[must_use]
    pub fn object(&self, key: ObjectKey) -> Option<&SceneObject> {
        self.objects.get(key)
    }

    /// Iterate materials in collection order
    pub fn materials(&self) -> impl Iterator<Item = (MaterialKey, &Material)> {
        self.materials.iter()
    }

    /// Iterate objects in collection order
    pub fn objects(&self) -> impl Iterator<Item = (ObjectKey, &SceneObject)> {
        self.objects.iter()
    }

    /// Iterate objects mutably in collection order
    pub fn objects_mut(&mut self) -> impl Iterator<Item = (ObjectKey, &mut SceneObject)> {
        self.objects.iter_mut()
    }

    /// Number of materials currently in the scene
    #[must_use]
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Number of images currently in the scene
    #[must_use]
    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Number of objects currently in the scene
    #[must_use]
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Count the users of a material
    ///
    /// A user is either an object slot referencing the material or the
    /// material's own fake-user flag, which pins it regardless of slots.
    #[must_use]
    pub fn material_users(&self, key: MaterialKey) -> usize {
        let slot_refs = self
            .objects
            .values()
            .flat_map(SceneObject::slots)
            .filter(|slot| slot.material() == Some(key))
            .count();

        let fake = self
            .materials
            .get(key)
            .is_some_and(|mat| mat.fake_user());

        slot_refs + usize::from(fake)
    }

    /// Remove a material from the scene
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::MaterialInUse`] if the material still has
    /// users. Removal of a referenced material would leave dangling slot
    /// references, so the caller must clear or redirect them first.
    pub fn remove_material(&mut self, key: MaterialKey) -> Result<Material, SceneError> {
        let name = self
            .materials
            .get(key)
            .ok_or(SceneError::UnknownMaterial)?
            .name()
            .to_string();

        let users = self.material_users(key);
        if users > 0 {
            return Err(SceneError::MaterialInUse {
                material: name,
                users,
            });
        }

        self.materials.remove(key).ok_or(SceneError::UnknownMaterial)
    }

    /// Remove every material with zero users, returning the removal count
    ///
    /// This is the cleanup half of the merge operation, exposed on its own
    /// because scenes accumulate orphaned materials through ordinary
    /// editing as well.
    pub fn remove_unused_materials(&mut self) -> usize {
        let unused: Vec<MaterialKey> = self
            .materials
            .keys()
            .filter(|&key| self.material_users(key) == 0)
            .collect();

        for key in &unused {
            log::debug!(
                "Removing unused material '{}'",
                self.materials[*key].name()
            );
            self.materials.remove(*key);
        }

        unused.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene_with_material(material: Material) -> (Scene, MaterialKey) {
        let mut scene = Scene::new();
        let key = scene.add_material(material);
        (scene, key)
    }

    #[test]
    fn test_material_users_counts_slots() {
        let (mut scene, mat) = scene_with_material(Material::new("Mat"));

        let mut obj = SceneObject::new("Cube");
        obj.add_slot(Some(mat));
        obj.add_slot(Some(mat));
        obj.add_slot(None);
        scene.add_object(obj);

        let mut other = SceneObject::new("Sphere");
        other.add_slot(Some(mat));
        scene.add_object(other);

        assert_eq!(scene.material_users(mat), 3);
    }

    #[test]
    fn test_fake_user_counts_as_user() {
        let (scene, mat) = scene_with_material(Material::new("Pinned").with_fake_user());
        assert_eq!(scene.material_users(mat), 1);
    }

    #[test]
    fn test_remove_material_in_use_fails() {
        let (mut scene, mat) = scene_with_material(Material::new("Mat"));
        let mut obj = SceneObject::new("Cube");
        obj.add_slot(Some(mat));
        scene.add_object(obj);

        let err = scene.remove_material(mat).unwrap_err();
        assert!(matches!(
            err,
            SceneError::MaterialInUse { users: 1, .. }
        ));
        assert_eq!(scene.material_count(), 1);
    }

    #[test]
    fn test_remove_material_without_users() {
        let (mut scene, mat) = scene_with_material(Material::new("Orphan"));
        let removed = scene.remove_material(mat).unwrap();
        assert_eq!(removed.name(), "Orphan");
        assert_eq!(scene.material_count(), 0);
    }

    #[test]
    fn test_remove_unused_materials_sweep() {
        let mut scene = Scene::new();
        let used = scene.add_material(Material::new("Used"));
        scene.add_material(Material::new("OrphanA"));
        scene.add_material(Material::new("OrphanB"));
        let pinned = scene.add_material(Material::new("Pinned").with_fake_user());

        let mut obj = SceneObject::new("Cube");
        obj.add_slot(Some(used));
        scene.add_object(obj);

        assert_eq!(scene.remove_unused_materials(), 2);
        assert_eq!(scene.material_count(), 2);
        assert!(scene.material(used).is_some());
        assert!(scene.material(pinned).is_some());
    }

    #[test]
    fn test_materials_iterate_in_insertion_order() {
        let mut scene = Scene::new();
        scene.add_material(Material::new("A"));
        scene.add_material(Material::new("B"));
        scene.add_material(Material::new("C"));

        let names: Vec<&str> = scene.materials().map(|(_, m)| m.name()).collect();
        assert_eq!(names, ["A", "B", "C"]);
    }
}
