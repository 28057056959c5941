//! Front buffer chain.
//!
//! An ordered list of equally-sized offscreen targets used to sequence
//! post-render effects: each effect pass samples the buffer it leaves and
//! draws into the next, so no pass ever reads the target it writes
//! (feedback corruption is structurally impossible).
//!
//! Buffers are created lazily the first time a frame needs them and kept
//! until a resize. Alongside each buffer lives the snapshot of effect
//! parameters captured when it was vacated; the external presentation pass
//! replays the chain using those snapshots.

use crate::assets::{EffectSnapshot, FrameEffects};
use crate::device::{GpuBackend, RenderTarget, TargetId};

/// One chain slot: a render target plus the effect state captured when the
/// renderer moved past it.
#[derive(Debug)]
pub struct FrontBufferEntry {
    pub target: TargetId,
    pub snapshot: EffectSnapshot,
}

/// The chain itself. See the module docs for the protocol.
#[derive(Debug)]
pub struct FrontBufferChain {
    entries: Vec<FrontBufferEntry>,
    current: usize,
    in_use: usize,
    size: (u32, u32),
}

impl FrontBufferChain {
    pub fn new(size: (u32, u32)) -> Self {
        Self {
            entries: Vec::new(),
            current: 0,
            in_use: 0,
            size,
        }
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    #[inline]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The active buffer's target, if buffer 0 was ever created.
    #[inline]
    pub fn current_target(&self) -> Option<TargetId> {
        self.entries.get(self.current).map(|e| e.target)
    }

    /// All buffers created so far (history survives `reset`).
    #[inline]
    pub fn entries(&self) -> &[FrontBufferEntry] {
        &self.entries
    }

    /// How many buffers this frame has drawn into.
    #[inline]
    pub fn in_use(&self) -> usize {
        self.in_use
    }

    /// Lazily creates buffer 0 and returns its target.
    ///
    /// Creation failure is a recoverable warning; the caller skips chain
    /// binding for the frame.
    pub fn ensure_first(&mut self, backend: &mut dyn GpuBackend) -> Option<TargetId> {
        if self.entries.is_empty() {
            match backend.create_offscreen(self.size.0, self.size.1) {
                Ok(target) => self.entries.push(FrontBufferEntry {
                    target,
                    snapshot: EffectSnapshot::default(),
                }),
                Err(err) => {
                    log::warn!("front buffer allocation failed: {err:#}");
                    return None;
                }
            }
        }
        self.in_use = self.in_use.max(1);
        Some(self.entries[0].target)
    }

    /// Rewinds to buffer 0 without discarding history. Called once per frame
    /// start.
    pub fn reset(&mut self) {
        self.current = 0;
        self.in_use = if self.entries.is_empty() { 0 } else { 1 };
    }

    /// Advances to the next buffer, lazily appending one when the chain is
    /// exhausted.
    ///
    /// Before advancing, the outgoing buffer's effect parameters are
    /// captured from `effects`; the presentation pass replays them later.
    /// Returns the incoming buffer's target, or `None` when allocation
    /// failed (the caller keeps drawing into the current buffer).
    pub fn next_buffer(
        &mut self,
        backend: &mut dyn GpuBackend,
        effects: &mut dyn FrameEffects,
    ) -> Option<TargetId> {
        let outgoing = self.entries.get_mut(self.current)?;
        effects.copy_state(&mut outgoing.snapshot);

        if self.current + 1 == self.entries.len() {
            match backend.create_offscreen(self.size.0, self.size.1) {
                Ok(target) => self.entries.push(FrontBufferEntry {
                    target,
                    snapshot: EffectSnapshot::default(),
                }),
                Err(err) => {
                    log::warn!("front buffer allocation failed: {err:#}");
                    return None;
                }
            }
        }

        self.current += 1;
        self.in_use = self.in_use.max(self.current + 1);
        Some(self.entries[self.current].target)
    }

    /// Captures the current buffer's effect parameters without advancing.
    /// Called at frame end so the presentation pass sees final state.
    pub fn frame_end(&mut self, effects: &mut dyn FrameEffects) {
        if let Some(entry) = self.entries.get_mut(self.current) {
            effects.copy_state(&mut entry.snapshot);
        }
    }

    /// Recreates every buffer at `new_size`.
    ///
    /// If one of the chain's buffers is bound as the active render target,
    /// its replacement is bound in its place, so callers keep drawing into
    /// "the same" buffer across a resize. A buffer that fails to recreate is
    /// dropped from the chain with a warning.
    pub fn resize(&mut self, backend: &mut dyn GpuBackend, new_size: (u32, u32)) {
        self.size = new_size;

        let bound = backend.bound_target();
        let mut rebind = None;

        let mut replaced = Vec::with_capacity(self.entries.len());
        for entry in self.entries.drain(..) {
            let was_bound = bound == RenderTarget::Offscreen(entry.target);
            backend.destroy_offscreen(entry.target);
            match backend.create_offscreen(new_size.0, new_size.1) {
                Ok(target) => {
                    if was_bound {
                        rebind = Some(target);
                    }
                    replaced.push(FrontBufferEntry { target, snapshot: entry.snapshot });
                }
                Err(err) => {
                    log::warn!("front buffer recreation failed: {err:#}");
                }
            }
        }
        self.entries = replaced;
        self.current = self.current.min(self.entries.len().saturating_sub(1));
        self.in_use = self.in_use.min(self.entries.len());

        if let Some(target) = rebind {
            backend.bind_target(RenderTarget::Offscreen(target));
        }
    }
}
