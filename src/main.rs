//! Strata2D main entry point.
//!
//! A 2D side-scrolling platformer engine written in Rust using:
//! - **bevy_ecs** for entity-component-system architecture
//! - **glam** for vector math
//! - a built-in impulse solver for the platforming physics
//!
//! This executable runs the engine headless: it loads the configured level,
//! drives a scripted input sequence through the avatar controller for a
//! fixed number of ticks and logs the resulting world state. Rendering and
//! windowing are external collaborators reading the same components.
//!
//! # Project Structure
//!
//! - [`components`] – ECS components (positions, visuals, avatar control)
//! - [`events`] – Event types (focus movement)
//! - [`game`] – Entity factories and the level load/clear lifecycle
//! - [`physics`] – Bodies, shapes, contacts and the fixed-step solver
//! - [`resources`] – ECS resources (scene graph, space, input, config)
//! - [`systems`] – ECS systems (input, avatar, physics, camera, visuals)
//!
//! # Running
//!
//! ```sh
//! cargo run --release
//! cargo run -- --check assets/levels/level.lvl
//! ```

mod components;
mod error;
mod events;
mod game;
mod physics;
mod resources;
mod systems;

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use clap::Parser;
use std::path::PathBuf;

use crate::components::avatar::AvatarController;
use crate::components::mapposition::MapPosition;
use crate::events::focus::observe_focus_changed;
use crate::physics::PHYSICS_DT;
use crate::resources::camera::Camera;
use crate::resources::entityregistry::EntityRegistry;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::{InputState, Intent};
use crate::resources::physicsspace::PhysicsSpace;
use crate::resources::scenegraph::SceneGraph;
use crate::resources::spritestore::SpriteStore;
use crate::resources::worldtime::WorldTime;
use crate::systems::avatar::avatar_controller;
use crate::systems::camera::camera_system;
use crate::systems::input::latch_jump_requests;
use crate::systems::physics::physics_step;
use crate::systems::time::update_world_time;
use crate::systems::visual::{screen_positions, sync_bodies};

/// Strata2D platformer engine
#[derive(Parser)]
#[command(version, about = "Strata2D, a 2D side-scrolling platformer engine")]
struct Cli {
    /// Number of logic ticks to simulate before exiting.
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Validate a map file and exit without running the simulation.
    #[arg(long, value_name = "PATH")]
    check: Option<PathBuf>,

    /// Path to the configuration file.
    #[arg(long, default_value = "./config.ini")]
    config: PathBuf,
}

/// Sprite extents the demo assets would decode to. A real host registers
/// these from the resource loader instead.
fn demo_sprites() -> SpriteStore {
    let mut sprites = SpriteStore::new();
    sprites.insert("levelstart", 40.0, 40.0);
    sprites.insert("star", 40.0, 40.0);
    sprites.insert("cloud", 128.0, 64.0);
    sprites.insert("avatar_stand_left", 80.0, 190.0);
    sprites.insert("avatar_stand_right", 80.0, 190.0);
    sprites.insert("avatar_walk_left", 480.0, 190.0);
    sprites.insert("avatar_walk_right", 480.0, 190.0);
    sprites
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Early-exit: structural map validation, no assets needed.
    if let Some(path) = cli.check {
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("Error reading {}: {e}", path.display());
                std::process::exit(1);
            }
        };
        // Every sprite lookup succeeds, so only the document structure is
        // checked.
        let sprites = SpriteStore::with_fallback(1.0, 1.0);
        match SceneGraph::parse(&text, (1280.0, 720.0), &sprites) {
            Ok(graph) => {
                println!(
                    "{}: ok ({}x{}, {} layers)",
                    path.display(),
                    graph.size().0,
                    graph.size().1,
                    graph.layers.len()
                );
            }
            Err(e) => {
                eprintln!("{}: {e}", path.display());
                std::process::exit(1);
            }
        }
        return;
    }

    let mut config = GameConfig::with_path(&cli.config);
    config.load_from_file().ok(); // ignore errors, use defaults
    let level_path = config.level.clone();

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(InputState::default());
    world.insert_resource(PhysicsSpace::default());
    world.insert_resource(Camera::default());
    world.insert_resource(demo_sprites());
    world.insert_resource(config);

    let mut registry = EntityRegistry::new();
    game::register_builtin_entities(&mut registry);
    world.insert_resource(registry);

    world.spawn(Observer::new(observe_focus_changed));
    world.flush();

    game::spawn_avatar(&mut world, glam::Vec2::new(100.0, 100.0));

    // --------------- Level load ---------------
    let map_text = match std::fs::read_to_string(&level_path) {
        Ok(text) => text,
        Err(e) => {
            log::error!("Failed to read level {}: {e}", level_path.display());
            std::process::exit(1);
        }
    };
    let modpaths_text = match std::fs::read_to_string("assets/entities/modpaths") {
        Ok(text) => text,
        Err(e) => {
            log::error!("Failed to read modpaths: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = game::load_level(&mut world, &map_text, &modpaths_text) {
        log::error!("Failed to load level {}: {e}", level_path.display());
        std::process::exit(1);
    }

    // --------------- Tick schedule ---------------
    let mut update = Schedule::default();
    update.add_systems(latch_jump_requests);
    update.add_systems(avatar_controller.after(latch_jump_requests));
    update.add_systems(physics_step.after(avatar_controller));
    update.add_systems(sync_bodies.after(physics_step));
    update.add_systems(camera_system.after(sync_bodies));
    update.add_systems(screen_positions.after(camera_system));

    // --------------- Main loop ---------------
    // Scripted input: walk right, double-jump along the way, stop near the
    // end. Stands in for the host's input polling.
    let debug = world.resource::<GameConfig>().debug;
    for tick in 0..cli.ticks {
        {
            let mut input = world.resource_mut::<InputState>();
            input.begin_frame();
            match tick {
                30 => input.press(Intent::Right),
                120 | 180 => input.press(Intent::Jump),
                121 | 181 => input.release(Intent::Jump),
                450 => input.release(Intent::Right),
                _ => {}
            }
        }
        update_world_time(&mut world, PHYSICS_DT);
        update.run(&mut world);
        if debug && tick % 60 == 0 {
            let mut query = world.query_filtered::<&MapPosition, With<AvatarController>>();
            if let Ok(position) = query.single(&world) {
                log::debug!(
                    "tick {}: avatar at ({:.1}, {:.1})",
                    tick,
                    position.pos.x,
                    position.pos.y
                );
            }
        }
        world.clear_trackers();
    }

    let mut query = world.query_filtered::<&MapPosition, With<AvatarController>>();
    if let Ok(position) = query.single(&world) {
        log::info!(
            "simulation done after {} ticks, avatar at ({:.1}, {:.1})",
            cli.ticks,
            position.pos.x,
            position.pos.y
        );
    }
}
