use crate::graphics::{SheetRequest, TileGraphics};
use anyhow::Context;
use macroquad::prelude::*;

/// One tile: a shared sheet texture plus the tile's source rectangle.
#[derive(Clone, Debug)]
pub struct TileSprite {
    /// Whole sheet texture, shared by all its tiles.
    pub texture: Texture2D,
    /// Tile rectangle inside the texture, in pixels.
    pub source: Rect,
}

/// [`TileGraphics`] on top of macroquad textures.
///
/// Needs a live macroquad context: only use it inside a `#[macroquad::main]`
/// program.
pub struct MacroquadGraphics {
    /// Tint passed to every draw call.
    pub color: Color,
}

impl MacroquadGraphics {
    /// Backend drawing with a white tint.
    pub fn new() -> Self {
        Self { color: WHITE }
    }
}

impl Default for MacroquadGraphics {
    fn default() -> Self {
        Self::new()
    }
}

impl TileGraphics for MacroquadGraphics {
    type Handle = TileSprite;

    fn load_tile_sheet(&mut self, sheet: &SheetRequest<'_>) -> anyhow::Result<Vec<TileSprite>> {
        let bytes = std::fs::read(sheet.path)
            .with_context(|| format!("Reading tile sheet {}", sheet.path.display()))?;
        let image = Image::from_file_with_format(&bytes, None)
            .map_err(|e| anyhow::anyhow!("{e:?}"))
            .with_context(|| format!("Decoding tile sheet {}", sheet.path.display()))?;

        let texture = Texture2D::from_image(&image);
        texture.set_filter(FilterMode::Nearest);

        let (tw, th) = (sheet.tile_w as f32, sheet.tile_h as f32);
        Ok((0..sheet.tile_count)
            .map(|i| TileSprite {
                texture: texture.clone(),
                source: Rect::new(
                    (i % sheet.columns) as f32 * tw,
                    (i / sheet.columns) as f32 * th,
                    tw,
                    th,
                ),
            })
            .collect())
    }

    fn release_handle(&mut self, handle: TileSprite) {
        // The texture is freed with its last sprite.
        drop(handle);
    }

    fn blit(&mut self, x: f32, y: f32, handle: &TileSprite) {
        draw_texture_ex(
            &handle.texture,
            x,
            y,
            self.color,
            DrawTextureParams {
                source: Some(handle.source),
                ..Default::default()
            },
        );
    }

    fn blit_transformed(
        &mut self,
        x: f32,
        y: f32,
        half_w: f32,
        half_h: f32,
        flip_x: f32,
        flip_y: f32,
        rotation: f32,
        handle: &TileSprite,
    ) {
        draw_texture_ex(
            &handle.texture,
            x - half_w,
            y - half_h,
            self.color,
            DrawTextureParams {
                source: Some(handle.source),
                dest_size: Some(vec2(handle.source.w, handle.source.h)),
                rotation,
                flip_x: flip_x < 0.0,
                flip_y: flip_y < 0.0,
                pivot: None,
            },
        );
    }
}
