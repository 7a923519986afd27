//! Scene objects and their material slots

use super::MaterialKey;

/// A per-object attachment point referencing at most one material
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialSlot {
    material: Option<MaterialKey>,
}

impl MaterialSlot {
    /// Create a slot referencing the given material, or an empty slot
    #[must_use]
    pub const fn new(material: Option<MaterialKey>) -> Self {
        Self { material }
    }

    /// The referenced material, if any
    #[must_use]
    pub const fn material(&self) -> Option<MaterialKey> {
        self.material
    }

    /// Point the slot at a different material (or clear it)
    pub fn set_material(&mut self, material: Option<MaterialKey>) {
        self.material = material;
    }
}

/// A scene object holding an ordered sequence of material slots
#[derive(Debug, Clone, Default)]
pub struct SceneObject {
    name: String,
    slots: Vec<MaterialSlot>,
}

impl SceneObject {
    /// Create an object with no slots
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slots: Vec::new(),
        }
    }

    /// Object name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a material slot
    pub fn add_slot(&mut self, material: Option<MaterialKey>) {
        self.slots.push(MaterialSlot::new(material));
    }

    /// Slots in stored order
    #[must_use]
    pub fn slots(&self) -> &[MaterialSlot] {
        &self.slots
    }

    /// Slots in stored order, mutable
    pub fn slots_mut(&mut self) -> &mut [MaterialSlot] {
        &mut self.slots
    }
}
