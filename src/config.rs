//! Loader and renderer configuration.

/// Default cap on layer-group nesting.
pub const DEFAULT_MAX_GROUP_DEPTH: usize = 10;

/// Options for [`Map::load`](crate::Map::load) and the decoding functions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadOptions {
    /// Groups at this depth or deeper are not expanded; their children are
    /// dropped without an error. The map root is depth 0.
    pub max_group_depth: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            max_group_depth: DEFAULT_MAX_GROUP_DEPTH,
        }
    }
}

/// Screen rectangle the renderer culls against, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    /// Visible width in pixels.
    pub width: i32,
    /// Visible height in pixels.
    pub height: i32,
}

impl Viewport {
    /// Viewport of the given pixel size.
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(640, 480)
    }
}
