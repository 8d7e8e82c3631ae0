// src/ir_map.rs
use crate::layer::{name_hash, Layer};
use crate::tileset::Tileset;
use std::fmt;

/// Decoded map without any graphic resources bound.
#[derive(Debug, Clone, PartialEq)]
pub struct IrMap {
    /// Columns.
    pub width: u32,
    /// Rows.
    pub height: u32,
    /// Tile width in pixels.
    pub tile_w: u32,
    /// Tile height in pixels.
    pub tile_h: u32,
    /// Flattened tile layers, bottom first.
    pub layers: Vec<Layer>,
    /// Embedded tilesets in file order.
    pub tilesets: Vec<Tileset>,
    /// Bytes of storage held by layers, tilesets and cells. Diagnostic only.
    pub byte_size: usize,
}

/// Selects a layer either by position in draw order or by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerRef<'a> {
    /// Position in draw order, 0 at the bottom.
    Index(usize),
    /// First layer with this exact name.
    Name(&'a str),
}

impl From<usize> for LayerRef<'_> {
    fn from(i: usize) -> Self {
        LayerRef::Index(i)
    }
}

impl<'a> From<&'a str> for LayerRef<'a> {
    fn from(name: &'a str) -> Self {
        LayerRef::Name(name)
    }
}

impl IrMap {
    /// Index of the first layer called `name`.
    pub fn find_layer(&self, name: &str) -> Option<usize> {
        let hash = name_hash(name);
        self.layers.iter().position(|l| l.matches_name(name, hash))
    }

    /// Layer by index or name.
    pub fn layer<'a>(&self, layer: impl Into<LayerRef<'a>>) -> Option<&Layer> {
        match layer.into() {
            LayerRef::Index(i) => self.layers.get(i),
            LayerRef::Name(name) => self.find_layer(name).map(|i| &self.layers[i]),
        }
    }

    /// Global tile id at `(tx, ty)` with orientation flags stripped.
    ///
    /// Returns 0 for an unknown layer, a coordinate outside the layer, or an
    /// empty cell.
    pub fn tile_id<'a>(&self, layer: impl Into<LayerRef<'a>>, tx: i64, ty: i64) -> u32 {
        self.layer(layer)
            .and_then(|l| l.cell(tx, ty))
            .map_or(0, |id| id.clean())
    }

    /// Number of slots needed to index every tileset's gids directly.
    ///
    /// Tilesets reaching past the 29-bit gid space are left out; no cell can
    /// reference them.
    pub fn handle_table_len(&self) -> usize {
        self.tilesets
            .iter()
            .filter(|t| t.fits_gid_space())
            .map(|t| t.gid_end() as usize)
            .max()
            .unwrap_or(0)
    }
}

impl fmt::Display for IrMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "map")?;
        writeln!(f, "\tsize: {} bytes", self.byte_size)?;
        writeln!(f, "\twidth: {}\theight: {}", self.width, self.height)?;
        writeln!(f, "\ttilewidth: {}\ttileheight: {}", self.tile_w, self.tile_h)?;
        for (i, l) in self.layers.iter().enumerate() {
            writeln!(f, "\tlayer {i} \"{}\"", l.name)?;
            writeln!(f, "\t\twidth: {}\theight: {}", l.width, l.height)?;
        }
        for (i, t) in self.tilesets.iter().enumerate() {
            writeln!(f, "\ttileset {i} \"{}\"", t.name)?;
            writeln!(
                f,
                "\t\tfile: \"{}\"\twidth: {}\theight: {}",
                t.image.display(),
                t.image_w,
                t.image_h
            )?;
            writeln!(f, "\t\ttilewidth: {}\ttileheight: {}", t.tile_w, t.tile_h)?;
            writeln!(f, "\t\tfirstgid: {}\ttilecount: {}", t.first_gid, t.tilecount)?;
        }
        Ok(())
    }
}
