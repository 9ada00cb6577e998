use crate::ascii::fit::FitSolver;
use crate::foundation::error::FoldmarkResult;
use crate::host::scheduler::{Scheduler, TimerHandle};
use crate::host::text::{ResizeSubscription, TextHost};
use crate::render::surface::GlyphSurface;

/// Text rendered when none is given.
pub const DEFAULT_TEXT: &str = "FOLD DB";

/// Why a render cycle produced no output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The container reported a width of zero or less.
    ZeroWidth,
    /// The character probe measured zero, negative, or non-finite.
    CharProbe,
}

/// Result of one render cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RenderOutcome {
    /// New art was written to the host.
    Rendered {
        /// Solved font size.
        font_size: f64,
        /// Rows of the written art.
        rows: usize,
        /// Columns of the written art.
        cols: usize,
    },
    /// The host was left untouched.
    Skipped(SkipReason),
}

/// Keeps a [`TextHost`] filled with ASCII art sized to its width.
///
/// Renders once on [`attach`](Self::attach), then again after each burst of
/// resize notifications has been quiet for the configured debounce period.
/// Timer callbacks are routed back through [`on_timer`](Self::on_timer);
/// anything that is not the current debounce timer is ignored.
#[derive(Debug)]
pub struct ResponsiveTextRenderer<S> {
    text: String,
    solver: FitSolver,
    surface: S,
    subscription: Option<ResizeSubscription>,
    pending: Option<TimerHandle>,
}

impl<S: GlyphSurface> ResponsiveTextRenderer<S> {
    /// Renderer for [`DEFAULT_TEXT`] with the default solver.
    pub fn new(surface: S) -> Self {
        Self::with_solver(surface, DEFAULT_TEXT, FitSolver::default())
    }

    /// Renderer for `text`; an empty string falls back to [`DEFAULT_TEXT`].
    pub fn with_solver(surface: S, text: impl Into<String>, solver: FitSolver) -> Self {
        let mut text = text.into();
        if text.is_empty() {
            text = DEFAULT_TEXT.to_string();
        }
        Self {
            text,
            solver,
            surface,
            subscription: None,
            pending: None,
        }
    }

    /// Text being rendered.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The measuring surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Whether the renderer is subscribed to a host.
    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    /// The debounce timer currently armed, if any.
    pub fn pending_timer(&self) -> Option<TimerHandle> {
        self.pending
    }

    /// Subscribe to resizes and render once. Attaching twice keeps the
    /// existing subscription and just renders again.
    pub fn attach(&mut self, host: &mut dyn TextHost) -> FoldmarkResult<RenderOutcome> {
        if self.subscription.is_none() {
            self.subscription = Some(host.subscribe_resize());
        }
        self.render_now(host)
    }

    /// A resize notification arrived: restart the debounce timer.
    pub fn on_resize(&mut self, scheduler: &mut dyn Scheduler) {
        if self.subscription.is_none() {
            return;
        }
        if let Some(prev) = self.pending.take() {
            scheduler.clear_timeout(prev);
        }
        let delay = self.solver.config().debounce_ms;
        let handle = scheduler.set_timeout(delay);
        tracing::debug!(timer = handle.0, delay_ms = delay, "debounce restarted");
        self.pending = Some(handle);
    }

    /// A timer fired. Returns `None` unless it was the live debounce timer.
    pub fn on_timer(
        &mut self,
        handle: TimerHandle,
        host: &mut dyn TextHost,
    ) -> FoldmarkResult<Option<RenderOutcome>> {
        if self.pending != Some(handle) {
            tracing::trace!(timer = handle.0, "ignoring stale timer");
            return Ok(None);
        }
        self.pending = None;
        self.render_now(host).map(Some)
    }

    /// Cancel the debounce timer and unsubscribe. Safe to call repeatedly.
    pub fn teardown(&mut self, host: &mut dyn TextHost, scheduler: &mut dyn Scheduler) {
        if let Some(handle) = self.pending.take() {
            scheduler.clear_timeout(handle);
        }
        if let Some(sub) = self.subscription.take() {
            host.unsubscribe_resize(sub);
            tracing::debug!(subscription = sub.0, "responsive renderer detached");
        }
    }

    /// Fit, rasterize, and write to `host` immediately.
    #[tracing::instrument(skip(self, host), fields(text = %self.text))]
    pub fn render_now(&mut self, host: &mut dyn TextHost) -> FoldmarkResult<RenderOutcome> {
        let width = host.container_width();
        if !(width.is_finite() && width > 0.0) {
            tracing::debug!(width, "skipping render: container has no width");
            return Ok(RenderOutcome::Skipped(SkipReason::ZeroWidth));
        }
        let char_width = host.char_width(&self.solver.config().char_probe);
        if !(char_width.is_finite() && char_width > 0.0) {
            tracing::debug!(char_width, "skipping render: bad character probe");
            return Ok(RenderOutcome::Skipped(SkipReason::CharProbe));
        }

        let font_size = self
            .solver
            .solve_font_size(&mut self.surface, width, char_width)?;
        let art = self
            .solver
            .rasterizer()
            .rasterize(&mut self.surface, &self.text, font_size)?;
        host.set_text(&art.to_string());
        Ok(RenderOutcome::Rendered {
            font_size,
            rows: art.height(),
            cols: art.width(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ascii/responsive.rs"]
mod tests;
