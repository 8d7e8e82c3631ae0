use crate::config::Viewport;
use crate::gid::{classify, decode, lookup, Orientation};
use crate::graphics::TileGraphics;
use crate::ir_map::IrMap;
use crate::render::cull::{camera_origin, visible_span};

/// Counters from one [`draw_map`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    /// Map cells that survived the viewport cull.
    pub cells_visited: usize,
    /// Blits issued, plain and transformed.
    pub draw_calls: usize,
}

/// Draws every visible cell of `ir` with the camera at `(camera_x, camera_y)`
/// tiles.
///
/// Cells are walked row by row; within a cell, layers are drawn bottom to
/// top before moving to the next cell. Hidden layers, cells outside a
/// layer's own extent and gids without a handle are skipped silently.
pub fn draw_map<G: TileGraphics>(
    ir: &IrMap,
    handles: &[Option<G::Handle>],
    gfx: &mut G,
    camera_x: f32,
    camera_y: f32,
    viewport: Viewport,
) -> DrawStats {
    let mut stats = DrawStats::default();

    let tw = ir.tile_w as i64;
    let th = ir.tile_h as i64;
    let (tw2, th2) = (tw / 2, th / 2);

    let ox = camera_origin(camera_x, ir.tile_w);
    let oy = camera_origin(camera_y, ir.tile_h);
    let rows = visible_span(oy, ir.tile_h, viewport.height, ir.height);
    let cols = visible_span(ox, ir.tile_w, viewport.width, ir.width);

    for row in rows {
        let py = oy + row as i64 * th;
        for col in cols.clone() {
            let px = ox + col as i64 * tw;
            stats.cells_visited += 1;

            for layer in ir.layers.iter().filter(|l| l.visible) {
                let Some(cell) = layer.cell(col as i64, row as i64) else {
                    continue;
                };
                let (gid, flags) = decode(cell.raw());
                let Some(handle) = lookup(handles, gid) else {
                    continue;
                };

                let x = px + layer.offset_x as i64;
                let y = py + layer.offset_y as i64;
                match classify(flags) {
                    Orientation::Identity => gfx.blit(x as f32, y as f32, handle),
                    orientation => {
                        let t = orientation.transform();
                        gfx.blit_transformed(
                            (x + tw2) as f32,
                            (y + th2) as f32,
                            tw2 as f32,
                            th2 as f32,
                            t.flip_x,
                            t.flip_y,
                            t.rotation,
                            handle,
                        );
                    }
                }
                stats.draw_calls += 1;
            }
        }
    }

    stats
}
