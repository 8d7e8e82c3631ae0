// tests/common/mod.rs
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tiled_gamemap::{SheetRequest, TileGraphics};

pub fn temp_dir(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("tiled_gamemap_{tag}_{nanos}"));
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}

pub fn write_map(dir: &Path, json: &str) -> PathBuf {
    let path = dir.join("map.json");
    fs::write(&path, json).expect("failed to write map");
    path
}

/// Handle handed out by [`Recorder`]: which sheet and which tile in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeHandle {
    pub sheet: usize,
    pub tile: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Blit {
        x: f32,
        y: f32,
        handle: FakeHandle,
    },
    Transformed {
        x: f32,
        y: f32,
        half_w: f32,
        half_h: f32,
        flip_x: f32,
        flip_y: f32,
        rotation: f32,
        handle: FakeHandle,
    },
}

impl Call {
    pub fn handle(&self) -> FakeHandle {
        match self {
            Call::Blit { handle, .. } | Call::Transformed { handle, .. } => *handle,
        }
    }
}

/// Test double that records every request instead of touching a GPU.
#[derive(Default)]
pub struct Recorder {
    pub sheets: Vec<PathBuf>,
    /// Tiles handed out per loaded sheet.
    pub loaded_tiles: Vec<usize>,
    pub released: Vec<FakeHandle>,
    pub calls: Vec<Call>,
    /// Sheets whose file name contains one of these fail to load.
    pub failing: Vec<String>,
    /// Sheets whose file name contains one of these come back one tile short.
    pub short: Vec<String>,
}

impl Recorder {
    pub fn live_handles(&self) -> usize {
        let loaded: usize = self.loaded_tiles.iter().sum();
        loaded - self.released.len()
    }
}

impl TileGraphics for Recorder {
    type Handle = FakeHandle;

    fn load_tile_sheet(&mut self, sheet: &SheetRequest<'_>) -> anyhow::Result<Vec<FakeHandle>> {
        let name = sheet
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if self.failing.iter().any(|f| name.contains(f.as_str())) {
            anyhow::bail!("no such image {name}");
        }
        let index = self.sheets.len();
        self.sheets.push(sheet.path.to_path_buf());

        let mut count = sheet.tile_count;
        if self.short.iter().any(|f| name.contains(f.as_str())) {
            count -= 1;
        }
        self.loaded_tiles.push(count as usize);
        Ok((0..count).map(|tile| FakeHandle { sheet: index, tile }).collect())
    }

    fn release_handle(&mut self, handle: FakeHandle) {
        self.released.push(handle);
    }

    fn blit(&mut self, x: f32, y: f32, handle: &FakeHandle) {
        self.calls.push(Call::Blit {
            x,
            y,
            handle: *handle,
        });
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
        handle: &FakeHandle,
    ) {
        self.calls.push(Call::Transformed {
            x,
            y,
            half_w,
            half_h,
            flip_x,
            flip_y,
            rotation,
            handle: *handle,
        });
    }
}
