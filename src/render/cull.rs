use std::ops::Range;

/// Pixel position of grid index 0 for a camera at `camera` tiles.
///
/// Truncates toward zero, so fractional camera positions scroll smoothly in
/// whole pixels.
#[inline]
pub fn camera_origin(camera: f32, tile: u32) -> i64 {
    (-(camera as f64) * tile as f64) as i64
}

#[inline]
fn ceil_div(a: i128, b: i128) -> i128 {
    -(-a).div_euclid(b)
}

/// Grid indices along one axis that are drawn.
///
/// Index `i` sits at `origin + i * tile`; it is kept when that position is
/// inside `[-tile, extent]`, i.e. the tile overlaps the screen or touches its
/// far edge. Indices are clamped to `0..count`.
///
/// Works in `i128` so a saturated origin (camera at `±inf` or far off the
/// map) yields an empty span instead of overflowing.
pub fn visible_span(origin: i64, tile: u32, extent: i32, count: u32) -> Range<u32> {
    if tile == 0 || count == 0 {
        return 0..0;
    }
    let t = tile as i128;
    let origin = origin as i128;
    let lo = ceil_div(-t - origin, t).max(0);
    let hi = ((extent as i128 - origin).div_euclid(t) + 1).min(count as i128);
    if lo >= hi {
        return 0..0;
    }
    lo as u32..hi as u32
}
