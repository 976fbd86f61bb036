//! Scene graph integration tests: parsing, serialization round-trips, focus
//! clamping end to end and terrain physics generation.

use glam::Vec2;

use strata2d::error::MapError;
use strata2d::physics::{Space, ShapeKind};
use strata2d::resources::scenegraph::{SceneGraph, FOREGROUND_LAYER, OBJECT_LAYER, TERRAIN_LAYER};
use strata2d::resources::spritestore::SpriteStore;

const VIEWPORT: (f32, f32) = (1280.0, 720.0);

fn sprites() -> SpriteStore {
    let mut store = SpriteStore::new();
    store.insert("levelstart", 40.0, 40.0);
    store.insert("star", 40.0, 40.0);
    store.insert("cloud", 128.0, 64.0);
    store
}

const MAP: &str = r#"{
  "width": 5000,
  "height": 1200,
  "head": { "name": "meadow" },
  "layers": {
    "terrainlayer": [
      { "x1": 0, "y1": 50, "x2": 5000, "y2": 50 },
      { "x1": 600, "y1": 170, "x2": 900, "y2": 170 }
    ],
    "objectlayer": [
      { "name": "star", "x": 700, "y": 220 }
    ],
    "aestheticlayer": [
      {
        "name": "clouds",
        "opacity": 0.5,
        "items": [
          { "name": "cloud", "x": 400, "y": 900, "scale": 1.5, "rotation": 15 }
        ]
      }
    ]
  }
}"#;

#[test]
fn parse_builds_all_layers() {
    let graph = SceneGraph::parse(MAP, VIEWPORT, &sprites()).unwrap();
    assert_eq!(graph.name, "meadow");
    assert_eq!(graph.size(), (5000.0, 1200.0));
    // The three built-ins plus the map's clouds layer.
    assert_eq!(graph.layers.len(), 4);
    assert!(graph.layers.get(FOREGROUND_LAYER).is_some());

    let terrain = graph.layers.get(TERRAIN_LAYER).unwrap();
    assert_eq!(terrain.lines().len(), 2);
    assert_eq!(terrain.lines()[1].a(), Vec2::new(600.0, 170.0));

    let objects = graph.layers.get(OBJECT_LAYER).unwrap();
    assert_eq!(objects.items().len(), 1);
    assert_eq!(objects.items()[0].name, "star");

    let clouds = graph.layers.get("clouds").unwrap();
    assert_eq!(clouds.opacity, 0.5);
    let cloud = &clouds.items()[0];
    // Extents scale with the item, opacity cascades from the layer.
    assert_eq!(cloud.width, 192.0);
    assert_eq!(cloud.height, 96.0);
    assert_eq!(cloud.rotation, 15);
    assert_eq!(cloud.opacity, 0.5);
}

#[test]
fn round_trip_preserves_lines_and_items() {
    let graph = SceneGraph::parse(MAP, VIEWPORT, &sprites()).unwrap();
    let json = graph.to_json().unwrap();
    let reparsed = SceneGraph::parse(&json, VIEWPORT, &sprites()).unwrap();

    let lines = |g: &SceneGraph| g.layers.get(TERRAIN_LAYER).unwrap().lines().to_vec();
    assert_eq!(lines(&graph), lines(&reparsed));

    let objects = reparsed.layers.get(OBJECT_LAYER).unwrap();
    assert_eq!(objects.items()[0].x, 700.0);
    assert_eq!(objects.items()[0].y, 220.0);

    let clouds = reparsed.layers.get("clouds").unwrap();
    assert_eq!(clouds.opacity, 0.5);
    assert_eq!(clouds.items()[0].scale, 1.5);
    assert_eq!(clouds.items()[0].rotation, 15);

    // The empty foreground built-in stays out of the serialized form.
    assert_eq!(reparsed.layers.len(), 4);
    assert!(!json.contains("\"foreground\""));
}

#[test]
fn missing_layers_block_is_a_parse_error() {
    let result = SceneGraph::parse(
        r#"{"width": 100, "height": 100, "head": {"name": "x"}}"#,
        VIEWPORT,
        &sprites(),
    );
    assert!(matches!(result, Err(MapError::Parse(_))));
}

#[test]
fn unknown_sprite_is_a_missing_sprite_error() {
    let result = SceneGraph::parse(
        r#"{
          "width": 100, "height": 100, "head": {"name": "x"},
          "layers": { "objectlayer": [ { "name": "ghost", "x": 0, "y": 0 } ] }
        }"#,
        VIEWPORT,
        &sprites(),
    );
    match result {
        Err(MapError::MissingSprite(name)) => assert_eq!(name, "ghost"),
        other => panic!("expected MissingSprite, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn focus_request_clamps_end_to_end() {
    let mut graph = SceneGraph::parse(MAP, VIEWPORT, &sprites()).unwrap();
    // Far past the right edge and below the bottom of the world.
    graph.set_focus(-4500.0, 100.0);
    assert_eq!(graph.focus(), Vec2::new(-3720.0, 0.0));
}

#[test]
fn generate_physics_covers_terrain_and_boundaries() {
    let graph = SceneGraph::parse(MAP, VIEWPORT, &sprites()).unwrap();
    let mut space = Space::new();
    graph.generate_physics(&mut space);
    // Two terrain lines plus the two vertical boundary walls.
    assert_eq!(space.shape_count(), 4);
    let static_body = space.static_body();
    for (_, shape) in space.iter_shapes() {
        assert_eq!(shape.body, static_body);
        assert_eq!(shape.friction, 1.0);
        assert_eq!(shape.group, 1);
        assert!(matches!(shape.kind, ShapeKind::Segment { radius, .. } if radius == 5.0));
    }
}
