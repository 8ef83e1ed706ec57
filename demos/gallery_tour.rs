//! Headless gallery walkthrough.
//!
//! Builds a one-room gallery, opens a couple of information cards, then
//! walks the viewer straight at a wall to show the collision guard stepping
//! in. Run with `RUST_LOG=debug` to watch the guard transitions.

use std::time::{Duration, Instant};

use anyhow::Result;
use vernissage::prelude::*;

const CATALOG_JSON: &str = r#"{
    "water-lilies": {
        "title": "Water Lilies",
        "artist": "Claude Monet",
        "year": "1906",
        "description": "Reflections of willows and clouds drifting across the lily pond at Giverny, painted in the last decades of Monet's life."
    },
    "the-scream": {
        "title": "The Scream",
        "artist": "Edvard Munch",
        "year": "1893",
        "description": "A figure on a bridge under a blood-red sky."
    }
}"#;

/// Minimal walking controller with pause/resume support.
struct WalkControls {
    paused: bool,
    speed: f32,
}

impl MovementControl for WalkControls {
    fn capabilities(&self) -> ControlCapabilities {
        ControlCapabilities {
            pause_resume: true,
            ..Default::default()
        }
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn resume(&mut self) {
        self.paused = false;
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut scene = Scene::new();
    let mut session = GallerySession::new();
    let catalog = ArtworkCatalog::from_json(CATALOG_JSON)?;

    // One room: a back wall the viewer will walk into, artworks hung on it
    let back_wall = scene.spawn(
        Node::new()
            .with_name("back-wall")
            .with_position(Vector3::new(0.0, 1.5, -6.0))
            .with_geometry(Geometry::Plane {
                width: 10.0,
                height: 3.0,
            })
            .with_tag(COLLIDABLE_TAG),
    );
    println!("built room (wall {:?})", back_wall);

    let lilies = scene.spawn(
        Node::new()
            .with_name("water-lilies")
            .with_position(Vector3::new(-2.0, 1.6, -5.9))
            .with_geometry(Geometry::Plane {
                width: 2.0,
                height: 1.5,
            })
            .with_tag(COLLIDABLE_TAG),
    );
    let scream = scene.spawn(
        Node::new()
            .with_name("the-scream")
            .with_position(Vector3::new(2.0, 1.6, -5.9))
            .with_geometry(Geometry::Plane {
                width: 1.0,
                height: 1.3,
            })
            .with_tag(COLLIDABLE_TAG),
    );

    let mut lilies_art = ArtworkInteraction::attach(&mut scene, lilies, ArtworkConfig::new("water-lilies"));
    let mut scream_art = ArtworkInteraction::attach(&mut scene, scream, ArtworkConfig::new("the-scream"));

    // Viewer rig: camera at eye height, walking controller, collision guard
    let camera = scene.spawn(
        Node::new()
            .with_name("camera")
            .with_position(Vector3::new(0.0, 1.6, 0.0)),
    );
    scene.set_active_camera(Some(camera));

    let mut controls = WalkControls {
        paused: false,
        speed: 1.5,
    };
    let mut guard = CollisionGuard::default();

    // Browse: select both artworks, then close the second card
    lilies_art.on_select(&mut scene, &mut session, &catalog);
    println!(
        "selected Water Lilies, card open: {}",
        session.active_card().is_some()
    );
    scream_art.on_select(&mut scene, &mut session, &catalog);
    println!("selected The Scream, previous card retired");
    scream_art.on_select(&mut scene, &mut session, &catalog);
    println!("selected The Scream again, card closed");

    // Walk at the back wall in 100 ms frames until the guard blocks
    let frame = Duration::from_millis(100);
    let mut now = Instant::now();
    for _ in 0..60 {
        guard.tick_at(now, &scene, Some(&mut controls));
        if controls.paused {
            break;
        }
        if let Some(node) = scene.get_mut(camera) {
            node.position.z -= controls.speed * frame.as_secs_f32();
        }
        now += frame;
    }

    let z = scene.get(camera).map(|n| n.position.z).unwrap_or_default();
    println!(
        "stopped at z = {z:.2} ({:?}, {} collidables cached)",
        guard.state(),
        guard.collidable_count()
    );

    // Walk back out: the guard releases the controls on the next tick
    if let Some(node) = scene.get_mut(camera) {
        node.position.z += 2.0;
    }
    now += frame;
    guard.tick_at(now, &scene, Some(&mut controls));
    println!("backed away ({:?})", guard.state());

    lilies_art.detach(&mut scene, &mut session);
    scream_art.detach(&mut scene, &mut session);
    Ok(())
}
