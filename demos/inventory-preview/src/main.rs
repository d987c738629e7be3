//! Inventory preview - walks the whole placement flow on a small layout
//!
//! Run with `RUST_LOG=info cargo run -p inventory-preview` to see the
//! lost-item policy fire.

use log::{info, warn};
use stow_inventory::prelude::*;
use stow_scene::{Canvas, Scene};

const LAYOUT: &str = r#"{
    "containers": [
        { "name": "belt", "slots": ["left", "right"] },
        { "name": "backpack", "slots": ["top", "middle", "bottom"] }
    ]
}"#;

fn main() {
    env_logger::init();

    let mut scene = Scene::new();
    let stage = scene.spawn("stage");

    let layout = LayoutDefinition::from_json(LAYOUT).expect("layout JSON is valid");
    let container_root = layout.spawn(&mut scene, stage).expect("stage is alive");
    let item_root = scene.spawn_child(stage, "items").expect("stage is alive");

    let mut manager = InventoryManager::new(
        &scene,
        Canvas::new(1280.0, 720.0),
        container_root,
        item_root,
    )
    .expect("layout is well-formed");

    info!(
        "inventory ready: {} containers on canvas {:?}",
        manager.containers().count(),
        manager.canvas().id()
    );

    // Straightforward placements
    place(&mut manager, &mut scene, "belt", "left", "dagger");
    place(&mut manager, &mut scene, "belt", "right", "torch");
    place(&mut manager, &mut scene, "backpack", "top", "rope");

    // The left belt slot is taken; the caller routes the loser to the
    // lost-item policy
    place(&mut manager, &mut scene, "belt", "left", "lockpick");

    // Unknown container, same story
    place(&mut manager, &mut scene, "saddlebag", "left", "apple");

    for container in ["belt", "backpack"] {
        let slots = manager
            .container_slots(container)
            .expect("container is registered");
        for (name, slot) in slots {
            match slot.occupant() {
                Some(item) => info!("{}/{}: {}", container, name, item.name()),
                None => info!("{}/{}: empty", container, name),
            }
        }
    }

    info!("{} nodes left in the scene", scene.len());
}

fn place(
    manager: &mut InventoryManager,
    scene: &mut Scene,
    container: &str,
    slot: &str,
    name: &str,
) {
    let item = Item::new(name, scene.spawn(name));
    match manager.add_item(scene, container, slot, item) {
        Ok(()) => info!("placed '{}' into {}/{}", name, container, slot),
        Err(lost) => {
            warn!("'{}' did not fit into {}/{}", lost.name(), container, slot);
            manager.handle_lost_item(scene, lost);
        }
    }
}
