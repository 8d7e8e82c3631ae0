use crate::gid::TileId;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// One renderable grid of tile cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Name from the map file; may be empty.
    pub name: String,
    /// Hash of `name`, used as a pre-filter for lookups by name.
    pub name_hash: u64,
    /// Columns.
    pub width: u32,
    /// Rows.
    pub height: u32,
    /// Pixel offset along x, applied when drawing.
    pub offset_x: i32,
    /// Pixel offset along y.
    pub offset_y: i32,
    /// Kept from the map file; not applied to pixels.
    pub opacity: f32,
    /// Hidden layers are skipped by the renderer.
    pub visible: bool,
    /// Raw cells, row-major, `width * height` long.
    pub data: Vec<u32>,
}

pub(crate) fn name_hash(name: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    name.hash(&mut hasher);
    hasher.finish()
}

impl Layer {
    /// Raw cell at `(tx, ty)`, or `None` outside the layer.
    #[inline]
    pub fn cell(&self, tx: i64, ty: i64) -> Option<TileId> {
        if tx < 0 || ty < 0 || tx >= self.width as i64 || ty >= self.height as i64 {
            return None;
        }
        self.data
            .get(ty as usize * self.width as usize + tx as usize)
            .copied()
            .map(TileId)
    }

    pub(crate) fn matches_name(&self, name: &str, hash: u64) -> bool {
        self.name_hash == hash && self.name == name
    }
}
