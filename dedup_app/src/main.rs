//! Duplicate-material merge demo
//!
//! Builds a small scene the way an import-heavy session tends to end up:
//! the same brick texture loaded three times under different names, a
//! handful of materials wired to those copies, and objects whose slots
//! spread across the duplicates. Running the merge collapses the
//! duplicates to one material and sweeps the leftovers.

use image::RgbaImage;
use mat_dedup::prelude::*;

/// Generate a two-tone checkerboard, the classic placeholder texture
fn checkerboard(size: u32, light: [u8; 4], dark: [u8; 4]) -> RgbaImage {
    RgbaImage::from_fn(size, size, |x, y| {
        if (x / 4 + y / 4) % 2 == 0 {
            image::Rgba(light)
        } else {
            image::Rgba(dark)
        }
    })
}

fn build_scene() -> Scene {
    let mut scene = Scene::new();

    let bricks = checkerboard(16, [180, 80, 60, 255], [90, 40, 30, 255]);
    let dark_bricks = checkerboard(16, [90, 40, 30, 255], [45, 20, 15, 255]);

    // The same texture imported three times under different names
    let bricks_a = scene.add_image(TextureImage::from_rgba("bricks", &bricks));
    let bricks_b = scene.add_image(TextureImage::from_rgba("bricks.001", &bricks));
    let bricks_c = scene.add_image(TextureImage::from_rgba("bricks.002", &bricks));
    let dark = scene.add_image(TextureImage::from_rgba("bricks_dark", &dark_bricks));

    let wall = scene.add_material(
        Material::new("Wall").with_node_tree(NodeTree::with_image(bricks_a)),
    );
    let wall_dup = scene.add_material(
        Material::new("Wall.001").with_node_tree(NodeTree::with_image(bricks_b)),
    );
    let wall_dark = scene.add_material(
        Material::new("WallDark").with_node_tree(NodeTree::with_image(dark)),
    );
    // Pinned by a fake user: its slots can move, but the sweep leaves it
    let archive = scene.add_material(
        Material::new("WallArchive")
            .with_node_tree(NodeTree::with_image(bricks_c))
            .with_fake_user(),
    );
    // Plain material with no node tree; the merge never touches it
    let trim = scene.add_material(Material::new("Trim"));

    let mut house = SceneObject::new("House");
    house.add_slot(Some(wall));
    house.add_slot(Some(trim));
    scene.add_object(house);

    let mut shed = SceneObject::new("Shed");
    shed.add_slot(Some(wall_dup));
    shed.add_slot(Some(wall_dark));
    scene.add_object(shed);

    let mut gate = SceneObject::new("Gate");
    gate.add_slot(Some(wall_dup));
    gate.add_slot(Some(archive));
    scene.add_object(gate);

    scene
}

fn main() -> Result<(), MergeError> {
    env_logger::init();

    let mut scene = build_scene();
    log::info!(
        "Scene built: {} image(s), {} material(s), {} object(s)",
        scene.image_count(),
        scene.material_count(),
        scene.object_count()
    );

    let report = merge_duplicate_materials(&mut scene)?;
    println!("Finished processing! {report}");

    Ok(())
}
