//! Layered scene graph with a focusable camera window.
//!
//! The graph owns the map's layers (one terrain, one object, any number of
//! aesthetic layers), the world extents, and the camera focus. Focus is
//! expressed in negated world coordinates: to look at world x = 3000 the
//! focus x is -3000, which is the translation the renderer applies. A focus
//! request is truncated to whole units, clamped so the viewport never shows
//! space outside the world, and only propagated to the per-layer render
//! groups when the clamped value actually differs from the current one.

use bevy_ecs::prelude::Resource;
use glam::Vec2;
use log::warn;

use crate::error::MapError;
use crate::physics::Space;
use crate::resources::mapdoc::{
    AestheticLayerDoc, HeadDoc, ItemDoc, LayersDoc, LineDoc, MapDoc,
};
use crate::resources::spritestore::SpriteStore;

/// Canonical z positions for the built-in layers. Higher draws in front.
pub struct DrawZPos;

impl DrawZPos {
    pub const TERRAIN_LINES: i32 = 7;
    pub const FRONT: i32 = 6;
    pub const SPRITES: i32 = 5;
    pub const FOREGROUND: i32 = 4;
    pub const BACKGROUND: i32 = 1;
}

/// Name of the single terrain layer.
pub const TERRAIN_LAYER: &str = "terrainlayer";
/// Name of the single object layer.
pub const OBJECT_LAYER: &str = "objectlayer";
/// Name of the built-in foreground aesthetic layer.
pub const FOREGROUND_LAYER: &str = "foreground";

/// Collision radius given to terrain line segments.
const TERRAIN_RADIUS: f32 = 5.0;
/// Friction of terrain and boundary segments.
const TERRAIN_FRICTION: f32 = 1.0;
/// Collision group shared by all terrain so adjoining segments never
/// collide with each other.
const TERRAIN_GROUP: u32 = 1;

/// Render-side handle of a layer: z position, scroll focus and visibility.
///
/// The renderer (an external collaborator) reads these when batching; the
/// notification counter lets it skip re-sorting untouched groups.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderGroup {
    pub z_order: i32,
    pub focus: Vec2,
    pub visible: bool,
    notifications: u64,
}

impl RenderGroup {
    pub fn new(z_order: i32) -> Self {
        Self {
            z_order,
            focus: Vec2::ZERO,
            visible: true,
            notifications: 0,
        }
    }

    pub fn set_focus(&mut self, focus: Vec2) {
        self.focus = focus;
        self.notifications += 1;
    }

    /// Number of focus updates pushed to this group.
    pub fn notifications(&self) -> u64 {
        self.notifications
    }
}

/// One terrain line in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainLine {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl TerrainLine {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn a(&self) -> Vec2 {
        Vec2::new(self.x1, self.y1)
    }

    pub fn b(&self) -> Vec2 {
        Vec2::new(self.x2, self.y2)
    }

    /// True when `point` lies within `threshold` of the segment. Distance is
    /// measured to the closest point on the segment, not the infinite line.
    pub fn hit_test(&self, point: Vec2, threshold: f32) -> bool {
        let a = self.a();
        let ab = self.b() - a;
        let len_sq = ab.length_squared();
        let closest = if len_sq > f32::EPSILON {
            a + ab * ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0)
        } else {
            a
        };
        point.distance(closest) <= threshold
    }
}

/// A placed sprite item on an object or aesthetic layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub name: String,
    pub x: f32,
    pub y: f32,
    /// Scaled extents.
    pub width: f32,
    pub height: f32,
    /// Top-right corner, kept in sync with position and extents.
    pub x2: f32,
    pub y2: f32,
    pub scale: f32,
    pub rotation: i32,
    /// The item's own opacity, independent of its layer.
    pub abs_opacity: f32,
    /// Effective opacity: `abs_opacity` times the layer opacity.
    pub opacity: f32,
}

impl Item {
    pub fn new(
        name: impl Into<String>,
        position: Vec2,
        scale: f32,
        rotation: i32,
        layer_opacity: f32,
        extents: (f32, f32),
    ) -> Self {
        let width = extents.0 * scale;
        let height = extents.1 * scale;
        Self {
            name: name.into(),
            x: position.x,
            y: position.y,
            width,
            height,
            x2: position.x + width,
            y2: position.y + height,
            scale,
            rotation,
            abs_opacity: 1.0,
            opacity: layer_opacity,
        }
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.x = position.x;
        self.y = position.y;
        self.x2 = position.x + self.width;
        self.y2 = position.y + self.height;
    }

    /// Recompute the effective opacity from a new layer opacity.
    pub fn apply_layer_opacity(&mut self, layer_opacity: f32) {
        self.opacity = self.abs_opacity * layer_opacity;
    }

    /// Strict bounding-box test: points on the box edge do not hit.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x > self.x && point.x < self.x2 && point.y > self.y && point.y < self.y2
    }
}

/// What a layer holds.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerContent {
    Terrain { lines: Vec<TerrainLine> },
    Objects { items: Vec<Item> },
    Aesthetic { items: Vec<Item> },
}

/// One scene layer: identity, draw order, opacity and content.
#[derive(Debug, Clone)]
pub struct Layer {
    pub name: String,
    pub z_order: i32,
    pub visible: bool,
    pub opacity: f32,
    pub group: RenderGroup,
    pub content: LayerContent,
}

impl Layer {
    pub fn terrain(z_order: i32) -> Self {
        Self::with_content(TERRAIN_LAYER, z_order, LayerContent::Terrain { lines: Vec::new() })
    }

    pub fn objects(z_order: i32) -> Self {
        Self::with_content(OBJECT_LAYER, z_order, LayerContent::Objects { items: Vec::new() })
    }

    pub fn aesthetic(name: impl Into<String>, z_order: i32) -> Self {
        Self::with_content(name, z_order, LayerContent::Aesthetic { items: Vec::new() })
    }

    fn with_content(name: impl Into<String>, z_order: i32, content: LayerContent) -> Self {
        Self {
            name: name.into(),
            z_order,
            visible: true,
            opacity: 1.0,
            group: RenderGroup::new(z_order),
            content,
        }
    }

    pub fn lines(&self) -> &[TerrainLine] {
        match &self.content {
            LayerContent::Terrain { lines } => lines,
            _ => &[],
        }
    }

    pub fn items(&self) -> &[Item] {
        match &self.content {
            LayerContent::Objects { items } | LayerContent::Aesthetic { items } => items,
            _ => &[],
        }
    }

    pub fn items_mut(&mut self) -> &mut [Item] {
        match &mut self.content {
            LayerContent::Objects { items } | LayerContent::Aesthetic { items } => items,
            _ => &mut [],
        }
    }

    /// Append a terrain line. Ignored with a warning on non-terrain layers.
    pub fn add_line(&mut self, line: TerrainLine) {
        match &mut self.content {
            LayerContent::Terrain { lines } => lines.push(line),
            _ => warn!("add_line on non-terrain layer {:?}", self.name),
        }
    }

    /// Place an item. Its effective opacity inherits the layer opacity.
    /// Ignored with a warning on terrain layers.
    pub fn add_item(
        &mut self,
        name: impl Into<String>,
        position: Vec2,
        scale: f32,
        rotation: i32,
        extents: (f32, f32),
    ) {
        let item = Item::new(name, position, scale, rotation, self.opacity, extents);
        match &mut self.content {
            LayerContent::Objects { items } | LayerContent::Aesthetic { items } => {
                items.push(item);
            }
            LayerContent::Terrain { .. } => {
                warn!("add_item on terrain layer {:?}", self.name);
            }
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.group.visible = visible;
    }

    pub fn set_z_order(&mut self, z_order: i32) {
        self.z_order = z_order;
        self.group.z_order = z_order;
    }

    /// Change the layer opacity and refresh every item's effective opacity.
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
        for item in self.items_mut() {
            item.apply_layer_opacity(opacity);
        }
    }

    /// Topmost item whose bounding box strictly contains `point`. Later
    /// placed items are considered on top.
    pub fn item_at(&self, point: Vec2) -> Option<&Item> {
        self.items().iter().rev().find(|item| item.contains(point))
    }

    /// Most recently added line within `threshold` of `point`.
    pub fn line_at(&self, point: Vec2, threshold: f32) -> Option<&TerrainLine> {
        self.lines().iter().rev().find(|line| line.hit_test(point, threshold))
    }
}

/// Ordered, name-addressable layer collection.
#[derive(Debug, Clone, Default)]
pub struct Layers {
    layers: Vec<Layer>,
}

impl Layers {
    /// Append a layer. A layer with the same name is replaced in place.
    pub fn add(&mut self, layer: Layer) {
        if let Some(existing) = self.layers.iter_mut().find(|l| l.name == layer.name) {
            warn!("layer {:?} already present, replacing", layer.name);
            *existing = layer;
        } else {
            self.layers.push(layer);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.name == name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Layer> {
        let index = self.layers.iter().position(|l| l.name == name)?;
        Some(self.layers.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Layer> {
        self.layers.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

/// The scene graph resource. See the module docs for the focus model.
#[derive(Resource, Debug, Clone)]
pub struct SceneGraph {
    pub name: String,
    width: f32,
    height: f32,
    viewport_width: f32,
    viewport_height: f32,
    focus: Vec2,
    /// When set, focus requests bypass clamping (free camera for editors).
    force_focus: bool,
    pub background_color: [f32; 3],
    background_group: RenderGroup,
    pub layers: Layers,
}

impl SceneGraph {
    /// Extension used by map files on disk.
    pub const FILE_EXT: &'static str = ".lvl";

    /// An empty graph with the built-in terrain, object and foreground
    /// layers. The foreground layer serializes only once it holds items.
    pub fn new(name: impl Into<String>, width: f32, height: f32, viewport: (f32, f32)) -> Self {
        let mut layers = Layers::default();
        layers.add(Layer::aesthetic(FOREGROUND_LAYER, DrawZPos::FOREGROUND));
        layers.add(Layer::terrain(DrawZPos::TERRAIN_LINES));
        layers.add(Layer::objects(DrawZPos::SPRITES));
        Self {
            name: name.into(),
            width,
            height,
            viewport_width: viewport.0,
            viewport_height: viewport.1,
            focus: Vec2::ZERO,
            force_focus: false,
            background_color: [0.0, 0.0, 0.0],
            background_group: RenderGroup::new(DrawZPos::BACKGROUND),
            layers,
        }
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn viewport(&self) -> (f32, f32) {
        (self.viewport_width, self.viewport_height)
    }

    pub fn focus(&self) -> Vec2 {
        self.focus
    }

    pub fn force_focus(&self) -> bool {
        self.force_focus
    }

    pub fn set_force_focus(&mut self, force: bool) {
        self.force_focus = force;
    }

    pub fn background_group(&self) -> &RenderGroup {
        &self.background_group
    }

    /// Request the camera focus. The request is truncated to whole units,
    /// then clamped to keep the viewport inside the world (unless free
    /// camera is on). Returns whether the focus actually changed; an
    /// out-of-range request that clamps back to the current focus is a
    /// no-op and does not notify the render groups.
    pub fn set_focus(&mut self, x: f32, y: f32) -> bool {
        let mut x = x.trunc();
        let mut y = y.trunc();
        if !self.force_focus {
            // Focus is negated world position, so -x is the left edge of
            // the visible window. A world narrower than the viewport pins
            // the window to the origin.
            let span_x = (self.width - self.viewport_width).max(0.0);
            let span_y = (self.height - self.viewport_height).max(0.0);
            if -x >= span_x {
                x = -span_x;
            } else if -x < 0.0 {
                x = 0.0;
            }
            if -y >= span_y {
                y = -span_y;
            } else if -y < 0.0 {
                y = 0.0;
            }
        }
        if x == self.focus.x && y == self.focus.y {
            return false;
        }
        self.focus = Vec2::new(x, y);
        self.background_group.set_focus(self.focus);
        for layer in self.layers.iter_mut() {
            layer.group.set_focus(self.focus);
        }
        true
    }

    /// Shift the focus by a delta, with the same clamping as [`set_focus`].
    ///
    /// [`set_focus`]: SceneGraph::set_focus
    pub fn move_focus(&mut self, dx: f32, dy: f32) -> bool {
        self.set_focus(self.focus.x + dx, self.focus.y + dy)
    }

    /// Add an empty aesthetic layer. An existing layer of that name is
    /// replaced.
    pub fn add_aesthetic_layer(&mut self, name: impl Into<String>, z_order: i32) {
        let mut layer = Layer::aesthetic(name, z_order);
        layer.group.set_focus(self.focus);
        self.layers.add(layer);
    }

    /// Remove an aesthetic layer by name. The built-in terrain and object
    /// layers cannot be deleted.
    pub fn delete_aesthetic_layer(&mut self, name: &str) -> bool {
        match self.layers.get(name) {
            Some(layer) if matches!(layer.content, LayerContent::Aesthetic { .. }) => {
                self.layers.remove(name).is_some()
            }
            Some(_) => {
                warn!("refusing to delete built-in layer {:?}", name);
                false
            }
            None => false,
        }
    }

    /// Build a graph from map file text. Every item name must be known to
    /// the sprite store, and the document must carry a `layers` block.
    pub fn parse(
        text: &str,
        viewport: (f32, f32),
        sprites: &SpriteStore,
    ) -> Result<SceneGraph, MapError> {
        let doc: MapDoc =
            serde_json::from_str(text).map_err(|e| MapError::Parse(e.to_string()))?;
        let mut graph = SceneGraph::new(
            doc.head.name.clone(),
            doc.width as f32,
            doc.height as f32,
            viewport,
        );

        if let Some(terrain) = graph.layers.get_mut(TERRAIN_LAYER) {
            for line in &doc.layers.terrainlayer {
                terrain.add_line(TerrainLine::new(
                    line.x1 as f32,
                    line.y1 as f32,
                    line.x2 as f32,
                    line.y2 as f32,
                ));
            }
        }

        for item in &doc.layers.objectlayer {
            let extents = sprites
                .extents(&item.name)
                .ok_or_else(|| MapError::MissingSprite(item.name.clone()))?;
            if let Some(objects) = graph.layers.get_mut(OBJECT_LAYER) {
                objects.add_item(
                    item.name.clone(),
                    Vec2::new(item.x as f32, item.y as f32),
                    item.scale.unwrap_or(1.0),
                    item.rotation.unwrap_or(0),
                    extents,
                );
            }
        }

        for layer_doc in &doc.layers.aestheticlayer {
            // A document block for the built-in foreground layer fills it
            // instead of replacing it.
            if graph.layers.get(&layer_doc.name).is_none() {
                graph.add_aesthetic_layer(layer_doc.name.clone(), DrawZPos::FOREGROUND);
            }
            let Some(layer) = graph.layers.get_mut(&layer_doc.name) else {
                continue;
            };
            layer.set_visible(layer_doc.visible);
            layer.set_opacity(layer_doc.opacity);
            for item in &layer_doc.items {
                let extents = sprites
                    .extents(&item.name)
                    .ok_or_else(|| MapError::MissingSprite(item.name.clone()))?;
                layer.add_item(
                    item.name.clone(),
                    Vec2::new(item.x as f32, item.y as f32),
                    item.scale.unwrap_or(1.0),
                    item.rotation.unwrap_or(0),
                    extents,
                );
            }
        }

        Ok(graph)
    }

    /// Snapshot the graph into its document form. Coordinates truncate to
    /// integers; default scale and rotation are omitted; empty layer blocks
    /// are dropped entirely.
    pub fn to_document(&self) -> MapDoc {
        fn item_doc(item: &Item) -> ItemDoc {
            ItemDoc {
                name: item.name.clone(),
                x: item.x as i32,
                y: item.y as i32,
                scale: (item.scale != 1.0).then_some(item.scale),
                rotation: (item.rotation != 0).then_some(item.rotation),
            }
        }

        let mut layers = LayersDoc::default();
        for layer in self.layers.iter() {
            match &layer.content {
                LayerContent::Terrain { lines } => {
                    layers.terrainlayer = lines
                        .iter()
                        .map(|l| LineDoc {
                            x1: l.x1 as i32,
                            y1: l.y1 as i32,
                            x2: l.x2 as i32,
                            y2: l.y2 as i32,
                        })
                        .collect();
                }
                LayerContent::Objects { items } => {
                    layers.objectlayer = items.iter().map(item_doc).collect();
                }
                LayerContent::Aesthetic { items } => {
                    if items.is_empty() {
                        continue;
                    }
                    layers.aestheticlayer.push(AestheticLayerDoc {
                        name: layer.name.clone(),
                        visible: layer.visible,
                        opacity: layer.opacity,
                        items: items.iter().map(item_doc).collect(),
                    });
                }
            }
        }

        MapDoc {
            width: self.width as i32,
            height: self.height as i32,
            head: HeadDoc {
                name: self.name.clone(),
            },
            layers,
        }
    }

    /// Serialize the graph to map file text.
    pub fn to_json(&self) -> Result<String, MapError> {
        serde_json::to_string_pretty(&self.to_document())
            .map_err(|e| MapError::Parse(e.to_string()))
    }

    /// Populate `space` with static collision for the terrain: one segment
    /// per terrain line plus vertical boundary walls at both world edges.
    /// All segments share a collision group so they ignore each other.
    pub fn generate_physics(&self, space: &mut Space) {
        let ground = space.static_body();
        let mut add_segment = |space: &mut Space, a: Vec2, b: Vec2| {
            let mut shape = crate::physics::Shape::segment(ground, a, b, TERRAIN_RADIUS);
            shape.friction = TERRAIN_FRICTION;
            shape.group = TERRAIN_GROUP;
            space.add_shape(shape);
        };
        if let Some(terrain) = self.layers.get(TERRAIN_LAYER) {
            for line in terrain.lines() {
                add_segment(space, line.a(), line.b());
            }
        }
        add_segment(space, Vec2::ZERO, Vec2::new(0.0, self.height));
        add_segment(
            space,
            Vec2::new(self.width, 0.0),
            Vec2::new(self.width, self.height),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_5000() -> SceneGraph {
        SceneGraph::new("test", 5000.0, 1200.0, (1280.0, 720.0))
    }

    #[test]
    fn test_focus_clamps_to_world_edges() {
        let mut graph = graph_5000();
        // Far past the right edge: clamp to -(width - viewport_w).
        graph.set_focus(-4500.0, 100.0);
        assert_eq!(graph.focus(), Vec2::new(-3720.0, 0.0));
        // Past the left edge.
        graph.set_focus(250.0, -100.0);
        assert_eq!(graph.focus(), Vec2::new(0.0, -100.0));
    }

    #[test]
    fn test_focus_truncates_fractions() {
        let mut graph = graph_5000();
        graph.set_focus(-100.9, -50.2);
        assert_eq!(graph.focus(), Vec2::new(-100.0, -50.0));
    }

    #[test]
    fn test_redundant_focus_does_not_notify() {
        let mut graph = graph_5000();
        assert!(graph.set_focus(-100.0, 0.0));
        let before = graph.background_group().notifications();
        // Same value, and an out-of-range request clamping to the same value.
        assert!(!graph.set_focus(-100.0, 0.0));
        assert_eq!(graph.background_group().notifications(), before);
    }

    #[test]
    fn test_clamp_collision_is_a_noop() {
        let mut graph = graph_5000();
        graph.set_focus(-3720.0, 0.0);
        let before = graph.background_group().notifications();
        // A different raw request that clamps to the stored focus.
        assert!(!graph.set_focus(-9999.0, 300.0));
        assert_eq!(graph.background_group().notifications(), before);
    }

    #[test]
    fn test_world_smaller_than_viewport_pins_to_origin() {
        let mut graph = SceneGraph::new("tiny", 800.0, 400.0, (1280.0, 720.0));
        graph.set_focus(-100.0, -100.0);
        assert_eq!(graph.focus(), Vec2::ZERO);
    }

    #[test]
    fn test_force_focus_bypasses_clamping() {
        let mut graph = graph_5000();
        graph.set_force_focus(true);
        graph.set_focus(500.0, -9000.0);
        assert_eq!(graph.focus(), Vec2::new(500.0, -9000.0));
    }

    #[test]
    fn test_move_focus_is_relative() {
        let mut graph = graph_5000();
        graph.set_focus(-100.0, 0.0);
        graph.move_focus(-50.0, 0.0);
        assert_eq!(graph.focus(), Vec2::new(-150.0, 0.0));
    }

    #[test]
    fn test_focus_propagates_to_all_groups() {
        let mut graph = graph_5000();
        graph.add_aesthetic_layer("clouds", DrawZPos::FOREGROUND);
        graph.set_focus(-200.0, 0.0);
        for layer in graph.layers.iter() {
            assert_eq!(layer.group.focus, Vec2::new(-200.0, 0.0));
        }
        assert_eq!(graph.background_group().focus, Vec2::new(-200.0, 0.0));
    }

    #[test]
    fn test_item_contains_is_strict() {
        let item = Item::new("star", Vec2::new(10.0, 10.0), 1.0, 0, 1.0, (40.0, 40.0));
        assert!(item.contains(Vec2::new(30.0, 30.0)));
        // Edges do not hit.
        assert!(!item.contains(Vec2::new(10.0, 30.0)));
        assert!(!item.contains(Vec2::new(50.0, 30.0)));
    }

    #[test]
    fn test_line_hit_test_uses_segment_distance() {
        let line = TerrainLine::new(0.0, 0.0, 100.0, 0.0);
        assert!(line.hit_test(Vec2::new(50.0, 4.0), 5.0));
        assert!(!line.hit_test(Vec2::new(50.0, 6.0), 5.0));
        // Beyond the endpoint the distance is measured to the endpoint.
        assert!(!line.hit_test(Vec2::new(110.0, 0.0), 5.0));
        assert!(line.hit_test(Vec2::new(104.0, 0.0), 5.0));
    }

    #[test]
    fn test_item_at_prefers_the_topmost_item() {
        let mut layer = Layer::objects(DrawZPos::SPRITES);
        layer.add_item("back", Vec2::new(0.0, 0.0), 1.0, 0, (100.0, 100.0));
        layer.add_item("front", Vec2::new(50.0, 50.0), 1.0, 0, (100.0, 100.0));
        // Overlap region: the later item wins.
        let hit = layer.item_at(Vec2::new(60.0, 60.0)).unwrap();
        assert_eq!(hit.name, "front");
        let hit = layer.item_at(Vec2::new(10.0, 10.0)).unwrap();
        assert_eq!(hit.name, "back");
        assert!(layer.item_at(Vec2::new(500.0, 500.0)).is_none());
    }

    #[test]
    fn test_line_at_finds_nearby_lines() {
        let mut layer = Layer::terrain(DrawZPos::TERRAIN_LINES);
        layer.add_line(TerrainLine::new(0.0, 0.0, 100.0, 0.0));
        layer.add_line(TerrainLine::new(0.0, 50.0, 100.0, 50.0));
        let hit = layer.line_at(Vec2::new(50.0, 48.0), 5.0).unwrap();
        assert_eq!(hit.y1, 50.0);
        assert!(layer.line_at(Vec2::new(50.0, 25.0), 5.0).is_none());
    }

    #[test]
    fn test_layer_opacity_cascades_to_items() {
        let mut layer = Layer::aesthetic("clouds", DrawZPos::FOREGROUND);
        layer.add_item("cloud", Vec2::ZERO, 1.0, 0, (64.0, 32.0));
        layer.set_opacity(0.5);
        assert_eq!(layer.items()[0].opacity, 0.5);
        assert_eq!(layer.items()[0].abs_opacity, 1.0);
    }

    #[test]
    fn test_new_graph_carries_the_foreground_layer() {
        let graph = graph_5000();
        let foreground = graph.layers.get(FOREGROUND_LAYER).unwrap();
        assert!(matches!(foreground.content, LayerContent::Aesthetic { .. }));
        assert_eq!(foreground.z_order, DrawZPos::FOREGROUND);
        // Empty, so it does not serialize.
        assert!(graph.to_document().layers.aestheticlayer.is_empty());
    }

    #[test]
    fn test_parse_fills_the_foreground_layer_in_place() {
        let text = r#"{
            "width": 5000, "height": 1200,
            "head": {"name": "fg"},
            "layers": {
                "aestheticlayer": [
                    {"name": "foreground", "items": [{"name": "cloud", "x": 10, "y": 20}]}
                ]
            }
        }"#;
        let mut sprites = SpriteStore::new();
        sprites.insert("cloud", 64.0, 32.0);
        let graph = SceneGraph::parse(text, (1280.0, 720.0), &sprites).unwrap();
        // Still the three built-ins, with the item landing in the existing
        // foreground layer.
        assert_eq!(graph.layers.len(), 3);
        let foreground = graph.layers.get(FOREGROUND_LAYER).unwrap();
        assert_eq!(foreground.items().len(), 1);
        assert_eq!(foreground.items()[0].name, "cloud");
    }

    #[test]
    fn test_delete_refuses_builtin_layers() {
        let mut graph = graph_5000();
        assert!(!graph.delete_aesthetic_layer(TERRAIN_LAYER));
        graph.add_aesthetic_layer("clouds", DrawZPos::FOREGROUND);
        assert!(graph.delete_aesthetic_layer("clouds"));
        assert!(graph.layers.get("clouds").is_none());
    }

    #[test]
    fn test_generate_physics_adds_lines_and_boundaries() {
        let mut graph = graph_5000();
        if let Some(terrain) = graph.layers.get_mut(TERRAIN_LAYER) {
            terrain.add_line(TerrainLine::new(0.0, 0.0, 5000.0, 0.0));
            terrain.add_line(TerrainLine::new(600.0, 120.0, 900.0, 120.0));
        }
        let mut space = Space::new();
        graph.generate_physics(&mut space);
        // Two terrain lines plus two boundary walls.
        assert_eq!(space.shape_count(), 4);
        for (_, shape) in space.iter_shapes() {
            assert_eq!(shape.friction, 1.0);
            assert_eq!(shape.group, 1);
        }
    }
}
