use crate::config::{LoadOptions, Viewport};
use crate::error::{MapError, SheetFailure};
use crate::gid::lookup;
use crate::graphics::{SheetRequest, TileGraphics};
use crate::ir_map::{IrMap, LayerRef};
use crate::layer::Layer;
use crate::loader::json_loader::decode_map_file;
use crate::render::draw::{draw_map, DrawStats};
use crate::tileset::Tileset;
use log::{info, warn};
use std::fmt;
use std::mem::size_of;
use std::path::Path;

/// A loaded map with one graphic handle bound per global tile id.
///
/// A `Map` is read-only once loaded. Give its handles back to the backend with
/// [`Map::free`]; a map that is simply dropped drops its handles without
/// calling [`TileGraphics::release_handle`].
pub struct Map<H> {
    ir: IrMap,
    handles: Vec<Option<H>>,
}

fn release_all<G: TileGraphics>(gfx: &mut G, handles: &mut Vec<Option<G::Handle>>) {
    for h in handles.drain(..).flatten() {
        gfx.release_handle(h);
    }
}

/// Loads every tile sheet of `ir` into a table indexed by gid.
///
/// A failing sheet does not stop the others from being tried, so the error
/// lists every sheet that failed. On failure nothing stays bound.
fn bind_handles<G: TileGraphics>(
    ir: &IrMap,
    gfx: &mut G,
) -> Result<Vec<Option<G::Handle>>, MapError> {
    let mut table = Vec::new();
    table.resize_with(ir.handle_table_len(), || None);
    let mut failures = Vec::new();

    for ts in &ir.tilesets {
        if ts.tilecount == 0 {
            continue;
        }
        if !ts.fits_gid_space() {
            failures.push(SheetFailure {
                image: ts.image.clone(),
                reason: format!(
                    "gid range {}..{} exceeds 29 bits",
                    ts.first_gid,
                    ts.gid_end()
                ),
            });
            continue;
        }
        let sheet = SheetRequest {
            path: &ts.image,
            tile_count: ts.tilecount,
            columns: ts.columns(),
            rows: ts.rows(),
            tile_w: ts.tile_w,
            tile_h: ts.tile_h,
        };
        if sheet.columns == 0 || sheet.rows == 0 {
            failures.push(SheetFailure {
                image: ts.image.clone(),
                reason: format!(
                    "{}x{} tiles do not fit a {}x{} image",
                    ts.tile_w, ts.tile_h, ts.image_w, ts.image_h
                ),
            });
            continue;
        }

        match gfx.load_tile_sheet(&sheet) {
            Ok(handles) if handles.len() == ts.tilecount as usize => {
                let start = ts.first_gid as usize;
                for (slot, h) in table[start..].iter_mut().zip(handles) {
                    if let Some(old) = slot.replace(h) {
                        gfx.release_handle(old);
                    }
                }
            }
            Ok(handles) => {
                let got = handles.len();
                for h in handles {
                    gfx.release_handle(h);
                }
                failures.push(SheetFailure {
                    image: ts.image.clone(),
                    reason: format!("backend returned {got} tiles, expected {}", ts.tilecount),
                });
            }
            Err(e) => failures.push(SheetFailure {
                image: ts.image.clone(),
                reason: format!("{e:#}"),
            }),
        }
    }

    if !failures.is_empty() {
        for f in &failures {
            warn!("{f}");
        }
        release_all(gfx, &mut table);
        return Err(MapError::GraphicsLoad { failures });
    }
    Ok(table)
}

impl<H> Map<H> {
    /// Loads a Tiled JSON map and binds its tile sheets through `gfx`.
    pub fn load<G>(path: impl AsRef<Path>, gfx: &mut G) -> Result<Self, MapError>
    where
        G: TileGraphics<Handle = H>,
    {
        Self::load_with(path, gfx, &LoadOptions::default())
    }

    /// [`Map::load`] with explicit decoding options.
    pub fn load_with<G>(
        path: impl AsRef<Path>,
        gfx: &mut G,
        opts: &LoadOptions,
    ) -> Result<Self, MapError>
    where
        G: TileGraphics<Handle = H>,
    {
        let path = path.as_ref();
        let map = decode_map_file(path, opts).and_then(|ir| Self::from_ir(ir, gfx));
        match &map {
            Ok(m) => info!(
                "loaded {}: {}x{} tiles of {}x{}px, {} layers, {} tilesets, {} bytes",
                path.display(),
                m.ir.width,
                m.ir.height,
                m.ir.tile_w,
                m.ir.tile_h,
                m.ir.layers.len(),
                m.ir.tilesets.len(),
                m.byte_size()
            ),
            Err(e) => warn!("failed to load {}: {e}", path.display()),
        }
        map
    }

    /// Binds graphics for an already decoded map.
    pub fn from_ir<G>(ir: IrMap, gfx: &mut G) -> Result<Self, MapError>
    where
        G: TileGraphics<Handle = H>,
    {
        let handles = bind_handles(&ir, gfx)?;
        Ok(Self { ir, handles })
    }

    /// Releases every bound handle and loads all tile sheets again, e.g. after
    /// the backend lost its textures on a video mode change.
    ///
    /// On failure the map is left with no handles and draws nothing.
    pub fn rebind_graphics<G>(&mut self, gfx: &mut G) -> Result<(), MapError>
    where
        G: TileGraphics<Handle = H>,
    {
        release_all(gfx, &mut self.handles);
        self.handles = bind_handles(&self.ir, gfx)?;
        Ok(())
    }

    /// Tears the map down: layers, then tilesets, then one
    /// [`release_handle`](TileGraphics::release_handle) per bound handle.
    pub fn free<G>(self, gfx: &mut G)
    where
        G: TileGraphics<Handle = H>,
    {
        let Map { ir, mut handles } = self;
        let IrMap {
            layers, tilesets, ..
        } = ir;
        drop(layers);
        drop(tilesets);
        release_all(gfx, &mut handles);
    }

    /// Draws the map with the camera at `(camera_x, camera_y)` in tiles.
    pub fn draw<G>(&self, gfx: &mut G, camera_x: f32, camera_y: f32, viewport: Viewport) -> DrawStats
    where
        G: TileGraphics<Handle = H>,
    {
        draw_map(&self.ir, &self.handles, gfx, camera_x, camera_y, viewport)
    }
}

impl<H> Map<H> {
    /// Map width in tiles.
    pub fn width(&self) -> u32 {
        self.ir.width
    }

    /// Map height in tiles.
    pub fn height(&self) -> u32 {
        self.ir.height
    }

    /// Tile width and height in pixels.
    pub fn tile_size(&self) -> (u32, u32) {
        (self.ir.tile_w, self.ir.tile_h)
    }

    /// Tile layers, bottom first.
    pub fn layers(&self) -> &[Layer] {
        &self.ir.layers
    }

    /// Tilesets in file order.
    pub fn tilesets(&self) -> &[Tileset] {
        &self.ir.tilesets
    }

    /// The decoded grid behind this map.
    pub fn ir(&self) -> &IrMap {
        &self.ir
    }

    /// Index of the first layer called `name`.
    pub fn find_layer(&self, name: &str) -> Option<usize> {
        self.ir.find_layer(name)
    }

    /// Masked gid at `(tx, ty)` of a layer given by index or name; 0 when the
    /// layer or coordinate does not exist.
    pub fn tile_id<'a>(&self, layer: impl Into<LayerRef<'a>>, tx: i64, ty: i64) -> u32 {
        self.ir.tile_id(layer, tx, ty)
    }

    /// Handle bound for `gid`, if any.
    pub fn handle(&self, gid: u32) -> Option<&H> {
        lookup(&self.handles, gid)
    }

    /// Handle table slots, bound or empty.
    pub fn handle_slots(&self) -> usize {
        self.handles.len()
    }

    /// Storage held by the map, for diagnostics.
    pub fn byte_size(&self) -> usize {
        self.ir.byte_size + self.handles.len() * size_of::<Option<H>>()
    }

    /// Multi-line dump of geometry, layers and tilesets.
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl<H> fmt::Display for Map<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "total {} bytes, {} handle slots",
            self.byte_size(),
            self.handles.len()
        )?;
        fmt::Display::fmt(&self.ir, f)
    }
}

impl<H> fmt::Debug for Map<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Map")
            .field("ir", &self.ir)
            .field("handle_slots", &self.handles.len())
            .finish()
    }
}
