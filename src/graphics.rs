//! The graphics port the map binds tile sheets through and draws with.

use std::path::Path;

/// What the loader asks a backend to slice out of one tileset image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetRequest<'a> {
    /// Resolved image path.
    pub path: &'a Path,
    /// Number of tiles to produce, in row-major order.
    pub tile_count: u32,
    /// Tiles per row of the image.
    pub columns: u32,
    /// Tile rows in the image.
    pub rows: u32,
    /// Tile width in pixels.
    pub tile_w: u32,
    /// Tile height in pixels.
    pub tile_h: u32,
}

/// A rendering backend: loads tile sheets into per-tile handles and blits
/// them to the screen.
///
/// Handles are owned by the [`Map`](crate::Map) that requested them and come
/// back through [`release_handle`](Self::release_handle) exactly once when the
/// map is freed, rebound, or a load is abandoned.
pub trait TileGraphics {
    /// One drawable tile.
    type Handle;

    /// Slices the image at `sheet.path` into `sheet.tile_count` handles.
    fn load_tile_sheet(&mut self, sheet: &SheetRequest<'_>) -> anyhow::Result<Vec<Self::Handle>>;

    /// Frees a handle produced by [`load_tile_sheet`](Self::load_tile_sheet).
    fn release_handle(&mut self, handle: Self::Handle);

    /// Draws a tile untransformed with its top-left corner at `(x, y)`.
    fn blit(&mut self, x: f32, y: f32, handle: &Self::Handle);

    /// Draws a tile centered on `(x, y)`, scaled by `flip_x`/`flip_y` (each
    /// `1.0` or `-1.0`) and rotated clockwise by `rotation` radians around its
    /// center. `half_w`/`half_h` are half the tile's pixel size.
    #[allow(clippy::too_many_arguments)]
    fn blit_transformed(
        &mut self,
        x: f32,
        y: f32,
        half_w: f32,
        half_h: f32,
        flip_x: f32,
        flip_y: f32,
        rotation: f32,
        handle: &Self::Handle,
    );
}
