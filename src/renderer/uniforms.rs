//! GPU-facing data for universe compositing
//!
//! Each universe is drawn into an offscreen buffer and composited onto the
//! display; these blocks are what a backend uploads for that (must match shader).

use bytemuck::{Pod, Zeroable};

use super::frame::{RenderFrame, RenderSink, UniverseView};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct CompositeUniforms {
    pub min_val: f32, // offset 0
    pub max_val: f32, // offset 4
    pub hue: f32,     // offset 8
    pub time: f32,    // offset 12
}

/// One object sprite inside a universe
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ObjectInstance {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

/// Colors for object sprites
pub mod colors {
    pub const ON: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const OFF: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
}

/// Draw call for one universe: its uniforms and a range into the instance buffer
#[derive(Debug, Clone, PartialEq)]
pub struct UniverseDraw {
    pub uniforms: CompositeUniforms,
    pub first_instance: u32,
    pub instance_count: u32,
}

/// Sink that packs a frame into buffers ready for upload
#[derive(Debug, Default)]
pub struct UniformBatch {
    pub draws: Vec<UniverseDraw>,
    pub instances: Vec<ObjectInstance>,
}

impl UniformBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uniform blocks, one per universe, in draw order
    pub fn uniforms(&self) -> Vec<CompositeUniforms> {
        self.draws.iter().map(|d| d.uniforms).collect()
    }

    /// Raw bytes of the instance buffer
    pub fn instance_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl RenderSink for UniformBatch {
    fn begin_frame(&mut self, frame: &RenderFrame<'_>) {
        self.draws.clear();
        self.instances.clear();
        self.draws.reserve(frame.len());
    }

    fn draw_universe(&mut self, view: &UniverseView<'_>) {
        let first_instance = self.instances.len() as u32;
        self.instances.extend(view.objects().iter().map(|s| ObjectInstance {
            position: [s.position.x as f32, s.position.y as f32],
            color: if s.on_off { colors::ON } else { colors::OFF },
        }));
        self.draws.push(UniverseDraw {
            uniforms: view.uniforms(),
            first_instance,
            instance_count: self.instances.len() as u32 - first_instance,
        });
    }
}
