//! In-memory render surface used by the unit tests.

use crate::selection::SelectionHighlight;
use crate::shapes::Geometry;
use crate::surface::{RenderSurface, SurfaceError};
use serde::Serialize;

/// Handle produced by [`RecordingSurface`]: the geometry it was generated
/// from plus a serial number unique to each generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestHandle {
    pub serial: u64,
    pub geometry: Geometry,
}

/// Counts every call made by the editor.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    attached: bool,
    fail_generation: bool,
    next_serial: u64,
    pub clears: usize,
    pub draws: Vec<u64>,
    pub highlights: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            attached: true,
            ..Default::default()
        }
    }

    pub fn detached() -> Self {
        Self::default()
    }

    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Make every `generate` call fail while set.
    pub fn fail_generation(&mut self, fail: bool) {
        self.fail_generation = fail;
    }

    /// Number of handles generated so far.
    pub fn generated(&self) -> u64 {
        self.next_serial
    }

    /// Serials painted since the last clear.
    pub fn last_frame(&self) -> &[u64] {
        &self.draws
    }
}

impl RenderSurface for RecordingSurface {
    type Handle = TestHandle;

    fn is_ready(&self) -> bool {
        self.attached
    }

    fn generate(&mut self, geometry: &Geometry) -> Result<TestHandle, SurfaceError> {
        if !self.attached {
            return Err(SurfaceError::NotAttached);
        }
        if self.fail_generation {
            return Err(SurfaceError::RenderFailed("generation disabled".to_string()));
        }
        self.next_serial += 1;
        Ok(TestHandle {
            serial: self.next_serial,
            geometry: *geometry,
        })
    }

    fn clear(&mut self) -> Result<(), SurfaceError> {
        self.clears += 1;
        self.draws.clear();
        self.highlights = 0;
        Ok(())
    }

    fn draw(&mut self, handle: &TestHandle) -> Result<(), SurfaceError> {
        self.draws.push(handle.serial);
        Ok(())
    }

    fn draw_highlight(&mut self, _highlight: &SelectionHighlight) -> Result<(), SurfaceError> {
        self.highlights += 1;
        Ok(())
    }
}
