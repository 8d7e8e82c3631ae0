//! Bit-level tile cell codec.
//!
//! A cell is a `u32`: the low 29 bits are the global tile id (0 = empty) and
//! the top three bits are orientation flags.

use std::f32::consts::FRAC_PI_2;

/// Horizontal flip, bit 31.
pub const FLIP_H: u32 = 0x8000_0000;
/// Vertical flip, bit 30.
pub const FLIP_V: u32 = 0x4000_0000;
/// Diagonal flip (x/y swap), bit 29.
pub const FLIP_D: u32 = 0x2000_0000;
/// All three orientation bits.
pub const FLAGS_MASK: u32 = FLIP_H | FLIP_V | FLIP_D;
/// The 29 gid bits.
pub const GID_MASK: u32 = !FLAGS_MASK;

const ROTATE_LEFT: u32 = FLIP_D | FLIP_V;
const ROTATE_RIGHT: u32 = FLIP_D | FLIP_H;

/// A raw tile cell as stored in a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TileId(pub u32);

impl TileId {
    /// Cell value with flags.
    #[inline] pub fn raw(self) -> u32 { self.0 }
    /// Global id with flags stripped.
    #[inline] pub fn clean(self) -> u32 { self.0 & GID_MASK }
    /// Horizontal flip bit.
    #[inline] pub fn flip_h(self) -> bool { (self.0 & FLIP_H) != 0 }
    /// Vertical flip bit.
    #[inline] pub fn flip_v(self) -> bool { (self.0 & FLIP_V) != 0 }
    /// Diagonal flip bit.
    #[inline] pub fn flip_d(self) -> bool { (self.0 & FLIP_D) != 0 }
    /// Gid 0, whatever the flags.
    #[inline] pub fn is_empty(self) -> bool { self.clean() == 0 }

    /// The three flag bits as booleans.
    #[inline]
    pub fn flags(self) -> TileFlags {
        TileFlags {
            h: self.flip_h(),
            v: self.flip_v(),
            d: self.flip_d(),
        }
    }
}

/// The three orientation bits of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TileFlags {
    /// [`FLIP_H`]
    pub h: bool,
    /// [`FLIP_V`]
    pub v: bool,
    /// [`FLIP_D`]
    pub d: bool,
}

impl TileFlags {
    /// Flags back in their bit positions.
    #[inline]
    pub fn bits(self) -> u32 {
        let mut bits = 0;
        if self.h {
            bits |= FLIP_H;
        }
        if self.v {
            bits |= FLIP_V;
        }
        if self.d {
            bits |= FLIP_D;
        }
        bits
    }

    /// All eight flag combinations, in bit order.
    pub fn all() -> impl Iterator<Item = TileFlags> {
        (0u32..8).map(|n| TileFlags {
            h: n & 0b100 != 0,
            v: n & 0b010 != 0,
            d: n & 0b001 != 0,
        })
    }
}

/// Splits a cell into `(gid, flags)`.
#[inline]
pub fn decode(cell: u32) -> (u32, TileFlags) {
    let id = TileId(cell);
    (id.clean(), id.flags())
}

/// Packs a gid and flags into a cell. Bits of `gid` above 29 are discarded.
#[inline]
pub fn encode(gid: u32, flags: TileFlags) -> u32 {
    (gid & GID_MASK) | flags.bits()
}

/// Handle slot for `gid` in a table indexed by global id.
///
/// Gid 0, ids past the table and unused slots all come back as `None`.
#[inline]
pub fn lookup<H>(table: &[Option<H>], gid: u32) -> Option<&H> {
    if gid == 0 {
        return None;
    }
    table.get(gid as usize).and_then(Option::as_ref)
}

/// How a tile has to be transformed when drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// No flags: plain blit.
    Identity,
    /// All three flags: horizontal flip, then a right rotation.
    RotateRightFlipX,
    /// Diagonal + horizontal.
    RotateRight,
    /// Diagonal + vertical.
    RotateLeft,
    /// Diagonal alone: right rotation with a vertical flip.
    AntiDiagonal,
    /// Horizontal and/or vertical flip, no rotation.
    Flip {
        /// Mirror along x.
        h: bool,
        /// Mirror along y.
        v: bool,
    },
}

/// Maps the three flag bits onto one of the six drawing cases.
pub fn classify(flags: TileFlags) -> Orientation {
    match flags.bits() {
        0 => Orientation::Identity,
        FLAGS_MASK => Orientation::RotateRightFlipX,
        ROTATE_RIGHT => Orientation::RotateRight,
        ROTATE_LEFT => Orientation::RotateLeft,
        FLIP_D => Orientation::AntiDiagonal,
        _ => Orientation::Flip {
            h: flags.h,
            v: flags.v,
        },
    }
}

/// Scale signs and rotation handed to a transformed blit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlitTransform {
    /// `-1.0` mirrors along x.
    pub flip_x: f32,
    /// `-1.0` mirrors along y.
    pub flip_y: f32,
    /// Clockwise rotation in radians.
    pub rotation: f32,
}

impl Orientation {
    /// Scale signs and clockwise rotation for this case.
    pub fn transform(self) -> BlitTransform {
        let (flip_x, flip_y, rotation) = match self {
            Orientation::Identity => (1.0, 1.0, 0.0),
            Orientation::RotateRightFlipX => (-1.0, 1.0, FRAC_PI_2),
            Orientation::RotateRight => (1.0, 1.0, FRAC_PI_2),
            Orientation::RotateLeft => (1.0, 1.0, -FRAC_PI_2),
            Orientation::AntiDiagonal => (1.0, -1.0, FRAC_PI_2),
            Orientation::Flip { h, v } => (
                if h { -1.0 } else { 1.0 },
                if v { -1.0 } else { 1.0 },
                0.0,
            ),
        };
        BlitTransform {
            flip_x,
            flip_y,
            rotation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_inverts_encode_for_every_flag_combination() {
        for gid in [0, 1, 42, 0x0FFF_FFFF, GID_MASK] {
            for flags in TileFlags::all() {
                assert_eq!(decode(encode(gid, flags)), (gid, flags));
            }
        }
    }

    #[test]
    fn classify_matches_flag_table() {
        let f = |h, v, d| classify(TileFlags { h, v, d });

        assert_eq!(f(false, false, false), Orientation::Identity);
        assert_eq!(f(true, false, false), Orientation::Flip { h: true, v: false });
        assert_eq!(f(false, true, false), Orientation::Flip { h: false, v: true });
        assert_eq!(f(true, true, false), Orientation::Flip { h: true, v: true });
        assert_eq!(f(false, false, true), Orientation::AntiDiagonal);
        assert_eq!(f(true, false, true), Orientation::RotateRight);
        assert_eq!(f(false, true, true), Orientation::RotateLeft);
        assert_eq!(f(true, true, true), Orientation::RotateRightFlipX);
    }

    #[test]
    fn rotations_point_the_right_way() {
        assert_eq!(Orientation::RotateRight.transform().rotation, FRAC_PI_2);
        assert_eq!(Orientation::RotateLeft.transform().rotation, -FRAC_PI_2);

        let all = Orientation::RotateRightFlipX.transform();
        assert_eq!((all.flip_x, all.flip_y), (-1.0, 1.0));

        let anti = Orientation::AntiDiagonal.transform();
        assert_eq!((anti.flip_x, anti.flip_y), (1.0, -1.0));
        assert_eq!(anti.rotation, FRAC_PI_2);
    }

    #[test]
    fn double_flip_is_not_a_rotation() {
        let cell = 1 | FLIP_H | FLIP_V;
        let (gid, flags) = decode(cell);
        assert_eq!(gid, 1);

        let t = classify(flags).transform();
        assert_eq!(t.rotation, 0.0);
        assert_eq!((t.flip_x, t.flip_y), (-1.0, -1.0));
    }

    #[test]
    fn lookup_never_fails() {
        let table = [Some("zero"), Some("one"), None, Some("three")];
        assert_eq!(lookup(&table, 0), None);
        assert_eq!(lookup(&table, 1), Some(&"one"));
        assert_eq!(lookup(&table, 2), None);
        assert_eq!(lookup(&table, 3), Some(&"three"));
        assert_eq!(lookup(&table, 4), None);
        assert_eq!(lookup::<u8>(&[], 1), None);
    }

    #[test]
    fn tile_id_accessors() {
        let id = TileId(7 | FLIP_D);
        assert_eq!(id.clean(), 7);
        assert!(id.flip_d());
        assert!(!id.flip_h());
        assert!(TileId(FLIP_H).is_empty());
    }
}
