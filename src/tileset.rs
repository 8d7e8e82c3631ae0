use crate::gid::GID_MASK;
use std::path::PathBuf;

/// One image sheet sliced into tiles of a uniform size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tileset {
    /// Name from the map file.
    pub name: String,
    /// Image path, already joined with the map file's directory.
    pub image: PathBuf,
    /// Tile width in pixels.
    pub tile_w: u32,
    /// Tile height in pixels.
    pub tile_h: u32,
    /// Image width in pixels.
    pub image_w: u32,
    /// Image height in pixels.
    pub image_h: u32,
    /// Global id of the sheet's first tile.
    pub first_gid: u32,
    /// Number of tiles in the sheet.
    pub tilecount: u32,
}

impl Tileset {
    /// Tiles per sheet row; 0 for a degenerate tile width.
    pub fn columns(&self) -> u32 {
        self.image_w.checked_div(self.tile_w).unwrap_or(0)
    }

    /// Tile rows in the sheet; 0 for a degenerate tile height.
    pub fn rows(&self) -> u32 {
        self.image_h.checked_div(self.tile_h).unwrap_or(0)
    }

    /// One past the last global id this sheet covers.
    pub fn gid_end(&self) -> u32 {
        self.first_gid.saturating_add(self.tilecount)
    }

    /// Whether every gid of the sheet can be written in a cell's low 29 bits.
    pub fn fits_gid_space(&self) -> bool {
        self.gid_end() <= GID_MASK + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_geometry() {
        let ts = Tileset {
            name: "terrain".into(),
            image: PathBuf::from("maps/terrain.png"),
            tile_w: 16,
            tile_h: 16,
            image_w: 128,
            image_h: 48,
            first_gid: 5,
            tilecount: 24,
        };
        assert_eq!(ts.columns(), 8);
        assert_eq!(ts.rows(), 3);
        assert_eq!(ts.gid_end(), 29);
        assert!(ts.fits_gid_space());
    }

    #[test]
    fn gid_space_ends_at_29_bits() {
        let mut ts = Tileset {
            name: String::new(),
            image: PathBuf::new(),
            tile_w: 16,
            tile_h: 16,
            image_w: 16,
            image_h: 16,
            first_gid: GID_MASK,
            tilecount: 1,
        };
        assert!(ts.fits_gid_space());
        ts.tilecount = 2;
        assert!(!ts.fits_gid_space());
        ts.first_gid = 4_000_000_000;
        assert!(!ts.fits_gid_space());
    }

    #[test]
    fn zero_tile_size_has_no_grid() {
        let ts = Tileset {
            name: String::new(),
            image: PathBuf::new(),
            tile_w: 0,
            tile_h: 0,
            image_w: 64,
            image_h: 64,
            first_gid: 1,
            tilecount: 0,
        };
        assert_eq!(ts.columns(), 0);
        assert_eq!(ts.rows(), 0);
    }
}
