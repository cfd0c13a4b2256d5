//! Per-frame render hand-off
//!
//! A [`RenderFrame`] borrows the controller for the duration of one draw, so
//! no reference into the universe list can outlive the frame that produced it.

use std::iter::Enumerate;
use std::slice;

use crate::sim::{Complex, ObjectState, Universe};

use super::uniforms::CompositeUniforms;

/// Receives every surviving universe of a frame, in order
pub trait RenderSink {
    fn begin_frame(&mut self, _frame: &RenderFrame<'_>) {}

    fn draw_universe(&mut self, view: &UniverseView<'_>);

    fn end_frame(&mut self) {}
}

/// Read-only snapshot of the multiverse after the simplify pass
#[derive(Debug, Clone, Copy)]
pub struct RenderFrame<'a> {
    universes: &'a [Universe],
    /// Simulated seconds since the level started
    pub time: f64,
    /// Frame number
    pub frame: u64,
}

impl<'a> RenderFrame<'a> {
    pub fn new(universes: &'a [Universe], time: f64, frame: u64) -> Self {
        Self {
            universes,
            time,
            frame,
        }
    }

    pub fn len(&self) -> usize {
        self.universes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.universes.is_empty()
    }

    /// Views in universe order with cumulative probability intervals
    pub fn iter(&self) -> UniverseViews<'a> {
        UniverseViews {
            inner: self.universes.iter().enumerate(),
            cumulative: 0.0,
            time: self.time,
        }
    }

    /// Drive a sink through the whole frame
    pub fn submit<S: RenderSink + ?Sized>(&self, sink: &mut S) {
        sink.begin_frame(self);
        for view in self.iter() {
            sink.draw_universe(&view);
        }
        sink.end_frame();
    }
}

impl<'a> IntoIterator for &RenderFrame<'a> {
    type Item = UniverseView<'a>;
    type IntoIter = UniverseViews<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One universe as the compositor sees it
#[derive(Debug, Clone, Copy)]
pub struct UniverseView<'a> {
    pub index: usize,
    universe: &'a Universe,
    /// Start of this universe's probability interval
    pub min_val: f64,
    /// End (exclusive) of the interval
    pub max_val: f64,
    /// Amplitude phase as a fraction of a turn
    pub hue: f64,
    /// Frame time, forwarded to the shader
    pub time: f64,
}

impl<'a> UniverseView<'a> {
    pub fn objects(&self) -> &'a [ObjectState] {
        &self.universe.objects
    }

    pub fn amplitude(&self) -> Complex {
        self.universe.amplitude
    }

    pub fn probability(&self) -> f64 {
        self.max_val - self.min_val
    }

    /// Packed shader inputs for compositing this universe
    pub fn uniforms(&self) -> CompositeUniforms {
        CompositeUniforms {
            min_val: self.min_val as f32,
            max_val: self.max_val as f32,
            hue: self.hue as f32,
            time: self.time as f32,
        }
    }
}

/// Iterator over [`UniverseView`]s
#[derive(Debug, Clone)]
pub struct UniverseViews<'a> {
    inner: Enumerate<slice::Iter<'a, Universe>>,
    cumulative: f64,
    time: f64,
}

impl<'a> Iterator for UniverseViews<'a> {
    type Item = UniverseView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (index, universe) = self.inner.next()?;
        let min_val = self.cumulative;
        let max_val = min_val + universe.probability();
        self.cumulative = max_val;
        Some(UniverseView {
            index,
            universe,
            min_val,
            max_val,
            hue: universe.amplitude.hue(),
            time: self.time,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for UniverseViews<'_> {}
