//! Test-only backend that records every call instead of touching a GPU.
//!
//! The flush-counting and geometry properties in the renderer tests assert
//! against these records. The log lives behind an `Rc` so tests keep a
//! handle after the backend is boxed into a renderer.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use anyhow::{bail, Result};

use crate::batch::Vertex;

use super::{BatchDraw, GpuBackend, RenderTarget, ScratchInfo, TargetId, TextureFilter, TextureId};

#[derive(Debug, Clone)]
pub struct UploadRecord {
    pub tier: usize,
    pub vertices: Vec<Vertex>,
    pub index_count: usize,
}

/// Everything the backend was asked to do, in order.
#[derive(Debug, Default)]
pub struct RecordLog {
    pub uploads: Vec<UploadRecord>,
    pub draws: Vec<BatchDraw>,
    pub filter_sets: Vec<(TargetId, TextureFilter)>,
    pub filter_resets: Vec<TargetId>,
    pub scratch_uploads: Vec<(u32, u32)>,
}

#[derive(Debug, Default)]
pub struct RecordingBackend {
    log: Rc<RefCell<RecordLog>>,

    /// When set, offscreen creation fails (allocation-failure paths).
    pub fail_offscreen: bool,

    bound: Option<RenderTarget>,
    screen_size: (u32, u32),
    offscreens: HashMap<TargetId, ((u32, u32), TextureId)>,
    created_offscreens: u32,
    next_texture: u32,
    scratch: Option<ScratchInfo>,
}

impl RecordingBackend {
    pub fn new(screen_size: (u32, u32)) -> Self {
        Self {
            screen_size,
            next_texture: 1,
            ..Self::default()
        }
    }

    /// Shared handle to the call log; clone before boxing the backend.
    pub fn log(&self) -> Rc<RefCell<RecordLog>> {
        Rc::clone(&self.log)
    }

    /// Creates an offscreen target outside the trait, for test setup.
    pub fn push_offscreen(&mut self, size: (u32, u32)) -> TargetId {
        let keep = self.fail_offscreen;
        self.fail_offscreen = false;
        let id = self.create_offscreen(size.0, size.1).expect("recording create_offscreen");
        self.fail_offscreen = keep;
        id
    }

    /// How many offscreen targets were ever created.
    pub fn offscreen_count(&self) -> u32 {
        self.created_offscreens
    }

    fn alloc_texture(&mut self) -> TextureId {
        let id = TextureId(self.next_texture);
        self.next_texture += 1;
        id
    }
}

impl GpuBackend for RecordingBackend {
    fn upload_batch(&mut self, tier: usize, vertices: &[Vertex], indices: &[u16]) {
        self.log.borrow_mut().uploads.push(UploadRecord {
            tier,
            vertices: vertices.to_vec(),
            index_count: indices.len(),
        });
    }

    fn draw_batch(&mut self, draw: &BatchDraw) {
        self.log.borrow_mut().draws.push(*draw);
    }

    fn bind_target(&mut self, target: RenderTarget) {
        self.bound = Some(target);
    }

    fn bound_target(&self) -> RenderTarget {
        self.bound.unwrap_or(RenderTarget::Screen)
    }

    fn target_size(&self, target: RenderTarget) -> (u32, u32) {
        match target {
            RenderTarget::Screen => self.screen_size,
            RenderTarget::Offscreen(id) => {
                self.offscreens.get(&id).map(|(size, _)| *size).unwrap_or((0, 0))
            }
        }
    }

    fn set_screen_size(&mut self, width: u32, height: u32) {
        self.screen_size = (width, height);
    }

    fn create_offscreen(&mut self, width: u32, height: u32) -> Result<TargetId> {
        if self.fail_offscreen {
            bail!("offscreen allocation disabled");
        }
        let id = TargetId(self.created_offscreens);
        self.created_offscreens += 1;
        let texture = self.alloc_texture();
        self.offscreens.insert(id, ((width, height), texture));
        Ok(id)
    }

    fn destroy_offscreen(&mut self, id: TargetId) {
        self.offscreens.remove(&id);
    }

    fn offscreen_texture(&self, id: TargetId) -> Option<TextureId> {
        self.offscreens.get(&id).map(|(_, tex)| *tex)
    }

    fn create_texture(&mut self, _pixels: &[u8], _width: u32, _height: u32) -> Result<TextureId> {
        Ok(self.alloc_texture())
    }

    fn upload_scratch(&mut self, _pixels: &[u8], width: u32, height: u32) -> Result<ScratchInfo> {
        self.log.borrow_mut().scratch_uploads.push((width, height));
        let texture = match self.scratch {
            Some(info) => info.texture,
            None => self.alloc_texture(),
        };
        let old = self.scratch.map(|s| s.alloc).unwrap_or((0, 0));
        let info = ScratchInfo {
            texture,
            alloc: (old.0.max(width), old.1.max(height)),
            used: (width, height),
        };
        self.scratch = Some(info);
        Ok(info)
    }

    fn scratch_info(&self) -> Option<ScratchInfo> {
        self.scratch
    }

    fn set_filter_override(&mut self, target: TargetId, filter: TextureFilter) {
        self.log.borrow_mut().filter_sets.push((target, filter));
    }

    fn reset_filter_override(&mut self, target: TargetId) {
        self.log.borrow_mut().filter_resets.push(target);
    }
}
