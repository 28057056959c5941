use crate::batch::{BatchBuffer, TierTable};
use crate::device::{BatchDraw, GpuBackend, TextureId};
use crate::state::DrawState;

use super::{FlushReason, FlushStats};

/// Executes flushes: upload the accumulated batch, draw it, reset the
/// cursors.
///
/// The engine also owns the "last known sprite sheet" marker: the texture the
/// geometry currently in the buffer was batched under. Every flush (empty
/// ones included) resynchronizes it to the draw state, so sheet-change
/// detection never reacts to a binding the buffer no longer holds.
#[derive(Debug)]
pub struct FlushEngine {
    stats: FlushStats,
    last_sheet: Option<TextureId>,
}

impl FlushEngine {
    pub fn new() -> Self {
        Self {
            stats: FlushStats::new(),
            last_sheet: None,
        }
    }

    #[inline]
    pub fn stats(&self) -> &FlushStats {
        &self.stats
    }

    #[inline]
    pub fn stats_mut(&mut self) -> &mut FlushStats {
        &mut self.stats
    }

    /// The texture the buffered geometry belongs to.
    #[inline]
    pub fn last_sheet(&self) -> Option<TextureId> {
        self.last_sheet
    }

    /// Uploads and draws the batch, then resets it.
    ///
    /// Ordering guarantee: the upload and draw complete before the buffer is
    /// reused, so geometry submitted before this call can never appear above
    /// geometry submitted after it.
    pub fn flush(
        &mut self,
        reason: FlushReason,
        batch: &mut BatchBuffer,
        tiers: &TierTable,
        state: &DrawState,
        backend: &mut dyn GpuBackend,
    ) {
        // Disabled rendering discards geometry without touching the GPU.
        if !state.render_enabled {
            batch.reset();
            self.last_sheet = state.texture();
            return;
        }

        // An empty flush only resynchronizes the sheet marker; it never
        // issues an empty draw call.
        if batch.is_empty() {
            self.last_sheet = state.texture();
            return;
        }

        let (vertices, indices) = batch.data();

        let Some(tier) = tiers.select(vertices.len(), indices.len()) else {
            log::error!(
                "no buffer tier fits {} vertices / {} indices; dropping batch",
                vertices.len(),
                indices.len()
            );
            batch.reset();
            self.last_sheet = state.texture();
            return;
        };

        backend.upload_batch(tier, vertices, indices);
        backend.bind_target(state.target());

        let draw = BatchDraw {
            tier,
            index_count: indices.len() as u32,
            texture: state.texture(),
            target: state.target(),
            clip: state.clip(),
            tint: state.tint,
        };

        // Filter overrides hold for the duration of the draw only.
        for &(target, filter) in state.filter_overrides() {
            backend.set_filter_override(target, filter);
        }

        let passes = state.material().passes.max(1);
        for _ in 0..passes {
            backend.draw_batch(&draw);
            self.stats.record(reason);
        }

        for &(target, _) in state.filter_overrides() {
            backend.reset_filter_override(target);
        }

        log::trace!(
            "flush [{}]: {} indices, {} passes, tier {}",
            reason.label(),
            draw.index_count,
            passes,
            tier
        );

        batch.reset();
        self.last_sheet = state.texture();
    }
}

impl Default for FlushEngine {
    fn default() -> Self {
        Self::new()
    }
}
