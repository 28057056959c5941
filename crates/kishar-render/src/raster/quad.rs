use crate::assets::AtlasRegion;
use crate::batch::{uv, Uv};
use crate::coords::Vec2;

/// UV mirroring flags for textured quads.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct QuadFlip {
    pub horizontal: bool,
    pub vertical: bool,
}

impl QuadFlip {
    pub const NONE: QuadFlip = QuadFlip { horizontal: false, vertical: false };

    #[inline]
    pub const fn new(horizontal: bool, vertical: bool) -> Self {
        Self { horizontal, vertical }
    }
}

/// Local-space corners of a `w` x `h` quad, in ring order
/// top-left, top-right, bottom-right, bottom-left.
#[inline]
pub fn quad_corners(w: f32, h: f32) -> [Vec2; 4] {
    [
        Vec2::new(0.0, 0.0),
        Vec2::new(w, 0.0),
        Vec2::new(w, h),
        Vec2::new(0.0, h),
    ]
}

/// The UV ring for a sheet region, after flips and quarter turns.
///
/// `sheet` is the bound texture's pixel size. Flips swap the two U (or V)
/// edge values; `turns` rotates the ring assignment so the source appears
/// rotated 90° clockwise per turn without moving any vertices.
pub fn quad_uvs(region: AtlasRegion, sheet: (u32, u32), flip: QuadFlip, turns: u8) -> [Uv; 4] {
    let sw = sheet.0.max(1) as f32;
    let sh = sheet.1.max(1) as f32;

    let mut u0 = region.x / sw;
    let mut u1 = (region.x + region.w) / sw;
    let mut v0 = region.y / sh;
    let mut v1 = (region.y + region.h) / sh;

    if flip.horizontal {
        std::mem::swap(&mut u0, &mut u1);
    }
    if flip.vertical {
        std::mem::swap(&mut v0, &mut v1);
    }

    let mut ring = [uv(u0, v0), uv(u1, v0), uv(u1, v1), uv(u0, v1)];
    ring.rotate_right((turns % 4) as usize);
    ring
}
