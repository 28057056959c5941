//! The public primitive API.
//!
//! Every operation follows the same discipline: build geometry in world
//! space, subtract the camera, reject against the clip region (rotated
//! shapes test their rotated corners), make room in the batch (flushing if
//! full), then append. Invalid geometric input is a silent no-op throughout.

use crate::assets::{AtlasRegion, SpriteId, SpriteSheet};
use crate::batch::{uv, Uv, UV_ZERO};
use crate::color::Rgba8;
use crate::coords::{Rect, Rotation, Vec2};
use crate::device::TextureId;
use crate::flush::FlushReason;
use crate::raster::{
    self, ellipse_points, fill_spans, layout_tiles, line_quad, outline_edges, outline_runs,
    pixel_triangle, quad_corners, quad_uvs, rect_corners, LineGeometry, NineSliceSource,
    OutlineRun, QuadFlip, MAX_RADIUS,
};

use super::Renderer;

impl Renderer {
    // ── textured quads ────────────────────────────────────────────────────

    /// Draws `src` at its native size.
    pub fn quad(&mut self, x: f32, y: f32, src: AtlasRegion, color: Rgba8) {
        self.quad_ext(x, y, src.w, src.h, src, color, QuadFlip::NONE, 0);
    }

    /// Draws `src` stretched to `w` x `h`, with optional UV flips and
    /// quarter turns.
    pub fn quad_ext(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        src: AtlasRegion,
        color: Rgba8,
        flip: QuadFlip,
        turns: u8,
    ) {
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        let uvs = quad_uvs(src, self.state.sheet_size(), flip, turns);
        let mut corners = quad_corners(w, h);
        for c in &mut corners {
            *c = *c + Vec2::new(x, y);
        }
        self.push_quad_world(corners, uvs, color);
    }

    /// Like [`quad_ext`](Self::quad_ext) with an arbitrary rotation about
    /// `pivot` (in the quad's local space) applied before placement.
    pub fn quad_angled(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        src: AtlasRegion,
        color: Rgba8,
        flip: QuadFlip,
        turns: u8,
        angle: f32,
        pivot: Vec2,
    ) {
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        let uvs = quad_uvs(src, self.state.sheet_size(), flip, turns);
        let rot = Rotation::around(angle, pivot);
        let mut corners = quad_corners(w, h);
        rot.apply_corners(&mut corners, Vec2::new(x, y));
        self.push_quad_world(corners, uvs, color);
    }

    /// Draws a raw texture stretched over `(x, y, w, h)` with the full
    /// `0..1` UV range. Used by effect passes and the presentation path;
    /// rebinding flushes under the SetTexture reason.
    pub fn texture_quad(&mut self, texture: TextureId, x: f32, y: f32, w: f32, h: f32) {
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        self.rebind_texture(Some(texture), (1, 1), FlushReason::SetTexture);
        let uvs = [uv(0.0, 0.0), uv(1.0, 0.0), uv(1.0, 1.0), uv(0.0, 1.0)];
        let mut corners = quad_corners(w, h);
        for c in &mut corners {
            *c = *c + Vec2::new(x, y);
        }
        self.push_quad_world(corners, uvs, Rgba8::WHITE);
    }

    // ── pixels and lines ──────────────────────────────────────────────────

    /// Draws one pixel.
    pub fn pixel(&mut self, x: f32, y: f32, color: Rgba8) {
        self.push_pixel_world(x, y, color);
    }

    /// Draws a 1-px line between pixels, both end caps on.
    pub fn line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgba8) {
        self.line_capped(x0, y0, x1, y1, true, true, color);
    }

    /// Draws a 1-px line with per-end cap control.
    ///
    /// Exactly horizontal or vertical fully-capped lines take the ortho
    /// single-triangle fast path; everything else goes through the heading
    /// quad.
    pub fn line_capped(
        &mut self,
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        start_cap: bool,
        end_cap: bool,
        color: Rgba8,
    ) {
        if start_cap && end_cap {
            if y0 == y1 {
                self.push_span_h(x0.min(x1), x0.max(x1), y0, color);
                return;
            }
            if x0 == x1 {
                self.push_span_v(x0, y0.min(y1), y0.max(y1), color);
                return;
            }
        }

        match line_quad(x0, y0, x1, y1, start_cap, end_cap) {
            LineGeometry::Quad(corners) => {
                self.push_quad_world(corners, [UV_ZERO; 4], color);
            }
            LineGeometry::Pixel(_) => self.push_pixel_world(x0, y0, color),
            LineGeometry::Empty => {}
        }
    }

    // ── triangles ─────────────────────────────────────────────────────────

    /// Draws a triangle outline as three capped segments. Trailing caps are
    /// suppressed so shared vertices draw exactly once.
    pub fn triangle_outline(
        &mut self,
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Rgba8,
    ) {
        self.line_capped(x0, y0, x1, y1, true, false, color);
        self.line_capped(x1, y1, x2, y2, true, false, color);
        self.line_capped(x2, y2, x0, y0, true, false, color);
    }

    /// Draws a filled triangle.
    ///
    /// Emitted in both windings (4-vertex advance, 6 indices); see
    /// `BatchBuffer::push_tri_double_winding` for the rationale.
    pub fn triangle_fill(
        &mut self,
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Rgba8,
    ) {
        let cam = self.state.camera;
        let corners = [
            Vec2::new(x0, y0) - cam,
            Vec2::new(x1, y1) - cam,
            Vec2::new(x2, y2) - cam,
        ];
        let (min, max) = raster::aabb(&corners);
        if self.state.clip().rejects_aabb(min, max) {
            return;
        }
        self.ensure_room(4, 6);
        let z = self.state.depth;
        let color = self.vertex_color(color);
        self.batch.push_tri_double_winding(corners, z, color);
    }

    // ── rectangles ────────────────────────────────────────────────────────

    /// Draws a filled axis-aligned rectangle. 1-px-thick rectangles take the
    /// ortho-line fast path (3 vertices, one triangle).
    pub fn rect_fill(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba8) {
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        if h == 1.0 {
            self.push_span_h(x, x + w - 1.0, y, color);
            return;
        }
        if w == 1.0 {
            self.push_span_v(x, y, y + h - 1.0, color);
            return;
        }

        let mut corners = rect_corners(w, h);
        for c in &mut corners {
            *c = *c + Vec2::new(x, y);
        }
        self.push_quad_world(corners, [UV_ZERO; 4], color);
    }

    /// Draws a filled rectangle rotated by `angle` about `pivot` (local
    /// space). `angle == 0.0` falls through to the axis-aligned path and its
    /// fast cases.
    pub fn rect_fill_rotated(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Rgba8,
        angle: f32,
        pivot: Vec2,
    ) {
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        let rot = Rotation::around(angle, pivot);
        if rot.is_identity() {
            self.rect_fill(x, y, w, h, color);
            return;
        }
        let mut corners = rect_corners(w, h);
        rot.apply_corners(&mut corners, Vec2::new(x, y));
        self.push_quad_world(corners, [UV_ZERO; 4], color);
    }

    /// Draws a rectangle outline. Degenerates to a fill when either side is
    /// 2 px or thinner; otherwise draws four non-overlapping 1-px edge bars.
    pub fn rect_outline(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba8) {
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        if w <= 2.0 || h <= 2.0 {
            self.rect_fill(x, y, w, h, color);
            return;
        }
        for (ex, ey, ew, eh) in outline_edges(w, h) {
            self.rect_fill(x + ex, y + ey, ew, eh, color);
        }
    }

    /// Rotated rectangle outline: the same four edge bars, each rotated by
    /// the shared transform.
    pub fn rect_outline_rotated(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Rgba8,
        angle: f32,
        pivot: Vec2,
    ) {
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        let rot = Rotation::around(angle, pivot);
        if rot.is_identity() {
            self.rect_outline(x, y, w, h, color);
            return;
        }
        if w <= 2.0 || h <= 2.0 {
            self.rect_fill_rotated(x, y, w, h, color, angle, pivot);
            return;
        }
        for (ex, ey, ew, eh) in outline_edges(w, h) {
            let mut corners = rect_corners(ew, eh);
            for c in corners.iter_mut() {
                *c = *c + Vec2::new(ex, ey);
            }
            rot.apply_corners(&mut corners, Vec2::new(x, y));
            self.push_quad_world(corners, [UV_ZERO; 4], color);
        }
    }

    // ── ellipses ──────────────────────────────────────────────────────────

    /// Draws an ellipse outline centered on pixel `(cx, cy)` with semi-axes
    /// `rx`/`ry`.
    pub fn ellipse_outline(&mut self, cx: i32, cy: i32, rx: i32, ry: i32, color: Rgba8) {
        if !self.ellipse_accepted(cx, cy, rx, ry, color) {
            return;
        }

        let pts = ellipse_points(rx, ry);
        for run in outline_runs(&pts) {
            // Rotated generation swapped the axes; transpose runs back into
            // screen space.
            let run = if pts.rotated {
                OutlineRun {
                    x: run.y,
                    y: run.x,
                    len: run.len,
                    horizontal: !run.horizontal,
                }
            } else {
                run
            };
            self.mirror_outline_run(cx, cy, run, color);
        }
    }

    /// Draws a filled ellipse as mirrored 1-px scanline (or column) runs.
    pub fn ellipse_fill(&mut self, cx: i32, cy: i32, rx: i32, ry: i32, color: Rgba8) {
        if !self.ellipse_accepted(cx, cy, rx, ry, color) {
            return;
        }

        let pts = ellipse_points(rx, ry);
        let rotated = pts.rotated;
        for span in fill_spans(&pts) {
            if rotated {
                let (y0, y1) = ((cy - span.half) as f32, (cy + span.half) as f32);
                self.push_span_v((cx - span.dy) as f32, y0, y1, color);
                if span.dy > 0 {
                    self.push_span_v((cx + span.dy) as f32, y0, y1, color);
                }
            } else {
                let (x0, x1) = ((cx - span.half) as f32, (cx + span.half) as f32);
                self.push_span_h(x0, x1, (cy - span.dy) as f32, color);
                if span.dy > 0 {
                    self.push_span_h(x0, x1, (cy + span.dy) as f32, color);
                }
            }
        }
    }

    /// Fills the ellipse's bounding rectangle minus the ellipse: the runs
    /// left/right of each scanline span (above/below each column span for
    /// the rotated orientation).
    pub fn ellipse_inverse(&mut self, cx: i32, cy: i32, rx: i32, ry: i32, color: Rgba8) {
        if !self.ellipse_accepted(cx, cy, rx, ry, color) {
            return;
        }

        let pts = ellipse_points(rx, ry);
        let rotated = pts.rotated;
        for span in fill_spans(&pts) {
            if rotated {
                // Column spans; the uncovered remainder sits above/below.
                if span.half < ry {
                    let top = ((cy - ry) as f32, (cy - span.half - 1) as f32);
                    let bottom = ((cy + span.half + 1) as f32, (cy + ry) as f32);
                    let x0 = (cx - span.dy) as f32;
                    self.push_span_v(x0, top.0, top.1, color);
                    self.push_span_v(x0, bottom.0, bottom.1, color);
                    if span.dy > 0 {
                        let x1 = (cx + span.dy) as f32;
                        self.push_span_v(x1, top.0, top.1, color);
                        self.push_span_v(x1, bottom.0, bottom.1, color);
                    }
                }
            } else if span.half < rx {
                let left = ((cx - rx) as f32, (cx - span.half - 1) as f32);
                let right = ((cx + span.half + 1) as f32, (cx + rx) as f32);
                let y0 = (cy - span.dy) as f32;
                self.push_span_h(left.0, left.1, y0, color);
                self.push_span_h(right.0, right.1, y0, color);
                if span.dy > 0 {
                    let y1 = (cy + span.dy) as f32;
                    self.push_span_h(left.0, left.1, y1, color);
                    self.push_span_h(right.0, right.1, y1, color);
                }
            }
        }
    }

    /// Shared ellipse validation: rejects non-positive radii, falls back to
    /// a bounding-box fill past [`MAX_RADIUS`], and clip-rejects the whole
    /// shape. Returns whether the per-point consumers should run.
    fn ellipse_accepted(&mut self, cx: i32, cy: i32, rx: i32, ry: i32, color: Rgba8) -> bool {
        if rx <= 0 || ry <= 0 {
            return false;
        }
        if rx > MAX_RADIUS || ry > MAX_RADIUS {
            self.rect_fill(
                (cx - rx) as f32,
                (cy - ry) as f32,
                (2 * rx + 1) as f32,
                (2 * ry + 1) as f32,
                color,
            );
            return false;
        }
        let min = Vec2::new((cx - rx) as f32, (cy - ry) as f32);
        let max = Vec2::new((cx + rx + 1) as f32, (cy + ry + 1) as f32);
        !self.clip_rejects_world(min, max)
    }

    /// Draws one boundary run mirrored across both symmetry axes,
    /// special-casing runs on an axis so no pixel rasterizes twice.
    fn mirror_outline_run(&mut self, cx: i32, cy: i32, run: OutlineRun, color: Rgba8) {
        if run.horizontal {
            let (x0, x1, y) = (run.x, run.x + run.len - 1, run.y);
            for sy in [1i32, -1] {
                if y == 0 && sy < 0 {
                    continue;
                }
                let row = (cy + sy * y) as f32;
                self.push_span_h((cx + x0) as f32, (cx + x1) as f32, row, color);
                // Mirror across the vertical axis, dropping a shared x == 0
                // pixel.
                let mx0 = x0.max(1);
                if mx0 <= x1 {
                    self.push_span_h((cx - x1) as f32, (cx - mx0) as f32, row, color);
                }
            }
        } else {
            let (y0, y1, x) = (run.y, run.y + run.len - 1, run.x);
            for sx in [1i32, -1] {
                if x == 0 && sx < 0 {
                    continue;
                }
                let col = (cx + sx * x) as f32;
                self.push_span_v(col, (cy - y1) as f32, (cy - y0) as f32, color);
                // Mirror across the horizontal axis, dropping a shared
                // y == 0 pixel.
                let my0 = y0.max(1);
                if my0 <= y1 {
                    self.push_span_v(col, (cy + my0) as f32, (cy + y1) as f32, color);
                }
            }
        }
    }

    // ── nine-slice ────────────────────────────────────────────────────────

    /// Draws a nine-slice composite into `dst` using the currently bound
    /// sheet for UV resolution. A destination that cannot hold the corners
    /// is a silent no-op with zero draw calls.
    pub fn nine_slice(&mut self, dst: Rect, src: &NineSliceSource, color: Rgba8) {
        if dst.is_empty() {
            return;
        }
        let Some(tiles) = layout_tiles(src, dst) else {
            return;
        };
        if self.clip_rejects_world(dst.min(), dst.max()) {
            return;
        }
        for tile in tiles {
            self.quad_ext(
                tile.x,
                tile.y,
                tile.region.w,
                tile.region.h,
                tile.region,
                color,
                QuadFlip::NONE,
                0,
            );
        }
    }

    /// Nine-slice variant resolving each region from a sprite id on `sheet`.
    /// Binds the sheet; an unknown id makes the whole call a no-op.
    pub fn nine_slice_sprites(
        &mut self,
        sheet: &SpriteSheet,
        sprites: [SpriteId; 9],
        dst: Rect,
        color: Rgba8,
    ) {
        let mut regions = [AtlasRegion::new(0.0, 0.0, 0.0, 0.0); 9];
        for (slot, id) in regions.iter_mut().zip(sprites.iter()) {
            match sheet.lookup(*id) {
                Some(region) => *slot = region,
                None => return,
            }
        }
        self.set_sheet(sheet);
        self.nine_slice(dst, &NineSliceSource::new(regions), color);
    }

    // ── world-space push helpers ──────────────────────────────────────────

    /// True when a world-space box is entirely outside the clip region after
    /// the camera offset.
    pub(crate) fn clip_rejects_world(&self, min: Vec2, max: Vec2) -> bool {
        let cam = self.state.camera;
        self.state.clip().rejects_aabb(min - cam, max - cam)
    }

    pub(crate) fn push_quad_world(&mut self, corners: [Vec2; 4], uvs: [Uv; 4], color: Rgba8) {
        let cam = self.state.camera;
        let mut c = corners;
        for p in c.iter_mut() {
            *p = *p - cam;
        }
        let (min, max) = raster::aabb(&c);
        if self.state.clip().rejects_aabb(min, max) {
            return;
        }
        self.ensure_room(4, 6);
        let z = self.state.depth;
        let color = self.vertex_color(color);
        self.batch.push_quad(c, z, color, uvs);
    }

    /// Horizontal 1-px run over inclusive pixel columns `x0..=x1` on row
    /// `y`, via the ortho triangle.
    pub(crate) fn push_span_h(&mut self, x0: f32, x1: f32, y: f32, color: Rgba8) {
        if x1 < x0 {
            return;
        }
        let cam = self.state.camera;
        let (x0, x1, y) = (x0 - cam.x, x1 - cam.x, y - cam.y);
        // Reject on the covered pixels; the triangle's overshoot is
        // scissored by the GPU.
        if self
            .state
            .clip()
            .rejects_aabb(Vec2::new(x0, y), Vec2::new(x1 + 1.0, y + 1.0))
        {
            return;
        }
        self.ensure_room(3, 3);
        let z = self.state.depth;
        let color = self.vertex_color(color);
        self.batch.push_tri(raster::ortho_run_h(x0, x1, y), z, color);
    }

    /// Vertical 1-px run over inclusive pixel rows `y0..=y1` on column `x`.
    pub(crate) fn push_span_v(&mut self, x: f32, y0: f32, y1: f32, color: Rgba8) {
        if y1 < y0 {
            return;
        }
        let cam = self.state.camera;
        let (x, y0, y1) = (x - cam.x, y0 - cam.y, y1 - cam.y);
        if self
            .state
            .clip()
            .rejects_aabb(Vec2::new(x, y0), Vec2::new(x + 1.0, y1 + 1.0))
        {
            return;
        }
        self.ensure_room(3, 3);
        let z = self.state.depth;
        let color = self.vertex_color(color);
        self.batch.push_tri(raster::ortho_run_v(x, y0, y1), z, color);
    }

    pub(crate) fn push_pixel_world(&mut self, x: f32, y: f32, color: Rgba8) {
        let cam = self.state.camera;
        let (x, y) = (x - cam.x, y - cam.y);
        if self
            .state
            .clip()
            .rejects_aabb(Vec2::new(x, y), Vec2::new(x + 1.0, y + 1.0))
        {
            return;
        }
        self.ensure_room(3, 3);
        let z = self.state.depth;
        let color = self.vertex_color(color);
        self.batch.push_tri(pixel_triangle(x, y), z, color);
    }
}
