//! Game assembly: built-in entity factories and the level lifecycle.
//!
//! A level load parses the map, resolves every placed object against the
//! entity registry before mutating anything, builds the terrain collision,
//! positions the avatar at the level start marker and only then spawns the
//! placed entities. A failure anywhere leaves the world untouched.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::info;
use rustc_hash::FxHashMap;

use crate::components::avatar::AvatarController;
use crate::components::focusfollow::FocusFollow;
use crate::components::mapposition::MapPosition;
use crate::components::physicsbody::PhysicsBodyRef;
use crate::components::rotation::Rotation;
use crate::components::screenposition::ScreenPosition;
use crate::components::visualstates::{ActorState, StateVisual, VisualRef, VisualStates};
use crate::error::MapError;
use crate::physics::{Body, Shape};
use crate::resources::camera::{ORIENTED_X_THRESHOLD, ORIENTED_Y_THRESHOLD};
use crate::resources::entityregistry::{parse_modpaths, EntityFactory, EntityRegistry};
use crate::resources::gameconfig::GameConfig;
use crate::resources::physicsspace::PhysicsSpace;
use crate::resources::scenegraph::{SceneGraph, OBJECT_LAYER};
use crate::resources::spritestore::SpriteStore;

/// Object-layer item marking where the avatar enters the level. Not an
/// entity; consumed by [`load_level`].
pub const LEVEL_START: &str = "levelstart";

/// Avatar body mass.
const AVATAR_MASS: f32 = 5.0;
/// Radius of the three avatar collision circles.
const AVATAR_RADIUS: f32 = 20.0;
/// Local offsets of the feet, mid and head circles.
const AVATAR_CIRCLES: [Vec2; 3] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(0.0, 40.0),
    Vec2::new(0.0, 75.0),
];
/// Fallback sprite extents when the avatar asset is not registered.
const AVATAR_EXTENTS: (f32, f32) = (80.0, 190.0);

/// Extra state used by the sample star entity.
pub const STAR_SHINE: ActorState = ActorState(10);

/// Spawn the player avatar at `position`.
///
/// The body gets infinite moment so it never tips over; uprightness is an
/// invariant, not something the solver maintains. The feet circle carries
/// the walk conveyor and the collision type gameplay callbacks key on.
pub fn spawn_avatar(world: &mut World, position: Vec2) -> Entity {
    let (body_id, feet_id, mid_id, head_id) = {
        let mut space = world.resource_mut::<PhysicsSpace>();
        let space = &mut space.0;
        let mut body = Body::new(AVATAR_MASS, f32::INFINITY);
        body.position = position;
        let body_id = space.add_body(body);
        let mut feet = Shape::circle(body_id, AVATAR_RADIUS, AVATAR_CIRCLES[0]);
        feet.elasticity = 1.0;
        feet.collision_type = 1;
        let feet_id = space.add_shape(feet);
        let mid_id = space.add_shape(Shape::circle(body_id, AVATAR_RADIUS, AVATAR_CIRCLES[1]));
        let head_id = space.add_shape(Shape::circle(body_id, AVATAR_RADIUS, AVATAR_CIRCLES[2]));
        (body_id, feet_id, mid_id, head_id)
    };

    let mut states = FxHashMap::default();
    states.insert(
        ActorState::STAND,
        StateVisual::new(
            VisualRef::Image("avatar_stand_left".to_string()),
            Some(VisualRef::Image("avatar_stand_right".to_string())),
        ),
    );
    states.insert(
        ActorState::WALK,
        StateVisual::new(
            VisualRef::Animation {
                sheet: "avatar_walk_left".to_string(),
                rows: 1,
                columns: 6,
                frame_time: 0.1,
                looped: true,
            },
            Some(VisualRef::Animation {
                sheet: "avatar_walk_right".to_string(),
                rows: 1,
                columns: 6,
                frame_time: 0.1,
                looped: true,
            }),
        ),
    );

    let extents = world
        .resource::<SpriteStore>()
        .extents("avatar_stand_right")
        .unwrap_or(AVATAR_EXTENTS);

    world
        .spawn((
            MapPosition::new(position.x, position.y),
            Rotation::default(),
            ScreenPosition::default(),
            FocusFollow::for_sprite(extents.0, extents.1),
            PhysicsBodyRef::with_shapes(body_id, [feet_id, mid_id, head_id]),
            VisualStates::new(states, ActorState::STAND),
            AvatarController::new(feet_id, head_id),
        ))
        .id()
}

/// Spawn a collectible star. Purely visual; it follows the camera but owns
/// no physics body.
pub fn spawn_star(world: &mut World, position: Vec2) -> Entity {
    let mut states = FxHashMap::default();
    states.insert(
        STAR_SHINE,
        StateVisual::new(
            VisualRef::Animation {
                sheet: "star".to_string(),
                rows: 1,
                columns: 8,
                frame_time: 0.1,
                looped: true,
            },
            None,
        ),
    );

    let extents = world
        .resource::<SpriteStore>()
        .extents("star")
        .unwrap_or((40.0, 40.0));

    world
        .spawn((
            MapPosition::new(position.x, position.y),
            ScreenPosition::default(),
            FocusFollow::for_sprite(extents.0, extents.1),
            VisualStates::new(states, STAR_SHINE),
        ))
        .id()
}

/// Register the factories this crate ships with.
pub fn register_builtin_entities(registry: &mut EntityRegistry) {
    registry.register("game::entities::star", spawn_star);
}

/// Load a level into the world from map text and the modpaths mapping.
///
/// Order matters: every object item is resolved to a factory first, so an
/// unknown entity aborts the load before the space or the world has been
/// touched.
pub fn load_level(world: &mut World, map_text: &str, modpaths_text: &str) -> Result<(), MapError> {
    let modpaths = parse_modpaths(modpaths_text)?;
    let viewport = world.resource::<GameConfig>().viewport();
    let mut graph = {
        let sprites = world.resource::<SpriteStore>();
        SceneGraph::parse(map_text, viewport, sprites)?
    };

    let mut spawns: Vec<(EntityFactory, Vec2)> = Vec::new();
    let mut start = None;
    {
        let registry = world.resource::<EntityRegistry>();
        if let Some(objects) = graph.layers.get(OBJECT_LAYER) {
            for item in objects.items() {
                let position = Vec2::new(item.x, item.y);
                if item.name == LEVEL_START {
                    start = Some(position);
                    continue;
                }
                let key = modpaths
                    .get(&item.name)
                    .ok_or_else(|| MapError::UnknownEntity(item.name.clone()))?;
                let factory = registry
                    .resolve(key)
                    .ok_or_else(|| MapError::UnknownEntity(key.clone()))?;
                spawns.push((factory, position));
            }
        }
    }

    {
        let gravity = world.resource::<GameConfig>().gravity();
        let mut space = world.resource_mut::<PhysicsSpace>();
        space.0.set_gravity(gravity);
        graph.generate_physics(&mut space.0);
    }

    if let Some(start) = start {
        // Move any existing avatar to the start marker and snap the camera
        // so the first rendered frame is already framed on it.
        let mut bodies = Vec::new();
        let mut query = world
            .query_filtered::<(&PhysicsBodyRef, &mut MapPosition), With<AvatarController>>();
        for (body_ref, mut position) in query.iter_mut(world) {
            position.pos = start;
            bodies.push(body_ref.body);
        }
        let mut space = world.resource_mut::<PhysicsSpace>();
        for id in bodies {
            if let Some(body) = space.0.body_mut(id) {
                body.position = start;
                body.velocity = Vec2::ZERO;
            }
        }
        graph.set_focus(
            -(start.x - ORIENTED_X_THRESHOLD),
            -(start.y - ORIENTED_Y_THRESHOLD),
        );
    }

    info!(
        "loaded level {:?}: {} spawns, {} layers",
        graph.name,
        spawns.len(),
        graph.layers.len()
    );
    world.insert_resource(graph);
    for (factory, position) in spawns {
        factory(world, position);
    }
    Ok(())
}

/// Tear the current level down: despawn every actor, drop their bodies and
/// the terrain collision from the space, and remove the scene graph.
pub fn clear_level(world: &mut World) {
    let mut doomed = Vec::new();
    let mut bodies = Vec::new();
    let mut query = world.query_filtered::<(Entity, Option<&PhysicsBodyRef>), With<MapPosition>>();
    for (entity, body_ref) in query.iter(world) {
        doomed.push(entity);
        if let Some(body_ref) = body_ref {
            bodies.push(body_ref.body);
        }
    }

    {
        let mut space = world.resource_mut::<PhysicsSpace>();
        let space = &mut space.0;
        for id in bodies {
            space.remove_body(id);
        }
        let terrain: Vec<_> = space
            .iter_shapes()
            .filter(|(_, shape)| shape.body == space.static_body())
            .map(|(id, _)| id)
            .collect();
        for id in terrain {
            space.remove_shape(id);
        }
    }

    for entity in doomed {
        world.despawn(entity);
    }
    world.remove_resource::<SceneGraph>();
}
