#![warn(missing_docs)]

//! Tiled JSON map loader and flip/rotate-aware tile renderer.
//!
//! [`Map::load`] reads a Tiled map (embedded tilesets, CSV/plain tile data),
//! binds one graphic handle per global tile id through a [`TileGraphics`]
//! backend and [`Map::draw`] blits the visible part of every layer.

mod config;
mod error;
pub mod gid;
mod graphics;
mod ir_map;
mod layer;
mod loader {
    pub mod json_loader;
    pub mod layer_tree;
}
mod macroquad_backend;
mod map;
mod render {
    pub mod cull;
    pub mod draw;
}
mod tileset;

pub use config::{LoadOptions, Viewport, DEFAULT_MAX_GROUP_DEPTH};
pub use error::{MapError, MapErrorKind, SheetFailure};
pub use gid::{classify, decode, encode, BlitTransform, Orientation, TileFlags, TileId};
pub use graphics::{SheetRequest, TileGraphics};
pub use ir_map::{IrMap, LayerRef};
pub use layer::Layer;
pub use loader::json_loader::{decode_map_file, decode_map_str};
pub use loader::layer_tree::flatten_layers;
pub use macroquad_backend::{MacroquadGraphics, TileSprite};
pub use map::Map;
pub use render::draw::{draw_map, DrawStats};
pub use tileset::Tileset;
