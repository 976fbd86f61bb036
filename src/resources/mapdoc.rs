//! Serde mirror of the map file format.
//!
//! A map is a tree-structured JSON document: root `width`/`height`, a `head`
//! block carrying the map name, and a `layers` block with one terrain layer
//! (4-integer line records), one object layer (name + integer position) and
//! any number of named aesthetic layers (items with optional float scale and
//! integer rotation, plus layer-level visibility/opacity).
//!
//! Positions and line coordinates are integers on disk; the in-memory graph
//! keeps floats and truncates on save. That lossy round-trip is part of the
//! format and must not be "fixed".

use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

fn default_opacity() -> f32 {
    1.0
}

/// Root of a map document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapDoc {
    pub width: i32,
    pub height: i32,
    pub head: HeadDoc,
    pub layers: LayersDoc,
}

/// Map metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadDoc {
    pub name: String,
}

/// The three layer kinds. Absent blocks mean empty layers; a document with
/// no `layers` object at all is structurally invalid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayersDoc {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub terrainlayer: Vec<LineDoc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub objectlayer: Vec<ItemDoc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aestheticlayer: Vec<AestheticLayerDoc>,
}

/// One terrain line record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LineDoc {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

/// One placed item. Scale and rotation are omitted at their defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDoc {
    pub name: String,
    pub x: i32,
    pub y: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<i32>,
}

/// A named aesthetic layer block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AestheticLayerDoc {
    pub name: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    #[serde(default)]
    pub items: Vec<ItemDoc>,
}
