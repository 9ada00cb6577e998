use crate::foundation::error::{FoldmarkError, FoldmarkResult};
use crate::foundation::math::wrap_period;
use crate::host::scheduler::{FrameHandle, Scheduler};
use crate::mark::engine::{MarkConfig, ShapeMorphEngine};
use crate::render::surface::ShapeCanvas;

/// Drives a [`ShapeMorphEngine`] from display-refresh callbacks.
///
/// The first delivered frame fixes the time origin. Each frame maps its
/// timestamp to loop progress, clears the canvas, and paints all shapes back
/// to front. The next frame is requested before painting, so a failed paint
/// is reported without ending the loop; only [`stop`](Self::stop) ends it.
#[derive(Debug)]
pub struct LoopAnimator<C> {
    engine: ShapeMorphEngine,
    period_ms: f64,
    canvas: C,
    origin_ms: Option<f64>,
    pending: Option<FrameHandle>,
    frames_drawn: u64,
}

impl<C: ShapeCanvas> LoopAnimator<C> {
    /// Animator looping every `period_ms`.
    pub fn new(engine: ShapeMorphEngine, period_ms: f64, canvas: C) -> FoldmarkResult<Self> {
        if !period_ms.is_finite() || period_ms <= 0.0 {
            return Err(FoldmarkError::validation(format!(
                "loop period must be finite and > 0, got {period_ms}"
            )));
        }
        Ok(Self {
            engine,
            period_ms,
            canvas,
            origin_ms: None,
            pending: None,
            frames_drawn: 0,
        })
    }

    /// Animator for `config` painting onto `canvas`.
    pub fn from_config(config: &MarkConfig, canvas: C) -> FoldmarkResult<Self> {
        Self::new(ShapeMorphEngine::new(config)?, config.period_ms, canvas)
    }

    /// The engine computing shape geometry.
    pub fn engine(&self) -> &ShapeMorphEngine {
        &self.engine
    }

    /// The target canvas.
    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    /// Mutable access to the target canvas, e.g. to snapshot it.
    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    /// Give back the canvas.
    pub fn into_canvas(self) -> C {
        self.canvas
    }

    /// Whether a frame request is outstanding.
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Frames painted so far.
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Request the first frame. No-op while already running.
    pub fn start(&mut self, scheduler: &mut dyn Scheduler) {
        if self.pending.is_some() {
            return;
        }
        let handle = scheduler.request_frame();
        tracing::debug!(frame = handle.0, "mark animation started");
        self.pending = Some(handle);
    }

    /// A frame arrived. Returns whether it was ours and painted.
    pub fn on_frame(
        &mut self,
        handle: FrameHandle,
        timestamp_ms: f64,
        scheduler: &mut dyn Scheduler,
    ) -> FoldmarkResult<bool> {
        if self.pending != Some(handle) {
            return Ok(false);
        }
        self.pending = Some(scheduler.request_frame());
        self.origin_ms.get_or_insert(timestamp_ms);
        let p = self.progress(timestamp_ms);
        tracing::trace!(timestamp_ms, p, "mark frame");
        self.draw(p)?;
        Ok(true)
    }

    /// Cancel the outstanding request. Nothing is painted afterwards until
    /// [`start`](Self::start) is called again, which restarts at progress 0.
    pub fn stop(&mut self, scheduler: &mut dyn Scheduler) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_frame(handle);
            tracing::debug!(frames = self.frames_drawn, "mark animation stopped");
        }
        self.origin_ms = None;
    }

    /// Loop progress in `[0, 1)` at `timestamp_ms`; 0 before the first frame.
    pub fn progress(&self, timestamp_ms: f64) -> f64 {
        match self.origin_ms {
            Some(origin) => wrap_period(timestamp_ms - origin, self.period_ms) / self.period_ms,
            None => 0.0,
        }
    }

    /// Clear and paint the mark at progress `p`.
    pub fn draw(&mut self, p: f64) -> FoldmarkResult<()> {
        self.canvas.clear()?;
        for shape in self.engine.frame(p) {
            self.canvas.draw_shape(&shape)?;
        }
        self.frames_drawn += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mark/animator.rs"]
mod tests;
