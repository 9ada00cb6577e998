use super::*;
use crate::ascii::raster::Rasterizer;
use crate::host::scheduler::{ManualScheduler, Wakeup};
use crate::host::text::StaticTextHost;
use crate::render::memory::BlockGlyphSurface;

fn renderer() -> ResponsiveTextRenderer<BlockGlyphSurface> {
    ResponsiveTextRenderer::new(BlockGlyphSurface::new(0.125, 0.1, 0.9))
}

fn fire_timers(
    r: &mut ResponsiveTextRenderer<BlockGlyphSurface>,
    sched: &mut ManualScheduler,
    host: &mut StaticTextHost,
    until_ms: f64,
) -> Vec<Option<RenderOutcome>> {
    let mut out = Vec::new();
    while let Some(w) = sched.next_due(until_ms) {
        if let Wakeup::Timer { handle } = w {
            out.push(r.on_timer(handle, host).unwrap());
        }
    }
    out
}

#[test]
fn attach_subscribes_and_renders_once() {
    let mut host = StaticTextHost::new(300.0, 10.0);
    let mut r = renderer();
    let outcome = r.attach(&mut host).unwrap();

    let RenderOutcome::Rendered { font_size, rows, .. } = outcome else {
        panic!("expected a render, got {outcome:?}");
    };
    assert_eq!(font_size, 32.0);
    assert!(rows > 0);
    assert!(r.is_attached());
    assert_eq!(host.subscriber_count(), 1);
    assert_eq!(host.write_count(), 1);

    let expected = Rasterizer::default()
        .rasterize(&mut BlockGlyphSurface::new(0.125, 0.1, 0.9), "FOLD DB", 32.0)
        .unwrap();
    assert_eq!(host.text(), Some(expected.to_string().as_str()));
}

#[test]
fn resize_burst_renders_once_after_quiet_period() {
    let mut host = StaticTextHost::new(300.0, 10.0);
    let mut sched = ManualScheduler::new();
    let mut r = renderer();
    r.attach(&mut host).unwrap();

    host.width_px = 800.0;
    r.on_resize(&mut sched);
    assert!(fire_timers(&mut r, &mut sched, &mut host, 100.0).is_empty());
    r.on_resize(&mut sched);
    assert!(fire_timers(&mut r, &mut sched, &mut host, 200.0).is_empty());
    assert_eq!(host.write_count(), 1);

    let fired = fire_timers(&mut r, &mut sched, &mut host, 260.0);
    assert_eq!(fired.len(), 1);
    assert!(matches!(
        fired[0],
        Some(RenderOutcome::Rendered { font_size, .. }) if font_size == 64.0
    ));
    assert_eq!(host.write_count(), 2);
    assert_eq!(r.pending_timer(), None);
}

#[test]
fn superseded_timer_is_ignored() {
    let mut host = StaticTextHost::new(300.0, 10.0);
    let mut sched = ManualScheduler::new();
    let mut r = renderer();
    r.attach(&mut host).unwrap();

    r.on_resize(&mut sched);
    let first = r.pending_timer().unwrap();
    r.on_resize(&mut sched);
    assert_ne!(r.pending_timer(), Some(first));
    assert_eq!(r.on_timer(first, &mut host).unwrap(), None);
    assert_eq!(host.write_count(), 1);
}

#[test]
fn teardown_is_idempotent_and_silences_callbacks() {
    let mut host = StaticTextHost::new(300.0, 10.0);
    let mut sched = ManualScheduler::new();
    let mut r = renderer();
    r.attach(&mut host).unwrap();
    r.on_resize(&mut sched);
    let armed = r.pending_timer().unwrap();

    r.teardown(&mut host, &mut sched);
    r.teardown(&mut host, &mut sched);
    assert!(!r.is_attached());
    assert_eq!(host.subscriber_count(), 0);
    assert_eq!(sched.pending_len(), 0);

    // late delivery of the cancelled timer, and resizes after detach
    assert_eq!(r.on_timer(armed, &mut host).unwrap(), None);
    r.on_resize(&mut sched);
    assert_eq!(sched.pending_len(), 0);
    assert_eq!(host.write_count(), 1);
}

#[test]
fn degenerate_hosts_skip_without_writing() {
    let mut r = renderer();

    let mut hidden = StaticTextHost::new(0.0, 10.0);
    assert_eq!(
        r.attach(&mut hidden).unwrap(),
        RenderOutcome::Skipped(SkipReason::ZeroWidth)
    );
    assert_eq!(hidden.write_count(), 0);

    for cw in [0.0, -3.0, f64::NAN, f64::INFINITY] {
        let mut host = StaticTextHost::new(300.0, cw);
        assert_eq!(
            r.render_now(&mut host).unwrap(),
            RenderOutcome::Skipped(SkipReason::CharProbe)
        );
        assert_eq!(host.text(), None);
    }
}

#[test]
fn next_resize_retries_after_skip() {
    let mut host = StaticTextHost::new(0.0, 10.0);
    let mut sched = ManualScheduler::new();
    let mut r = renderer();
    r.attach(&mut host).unwrap();
    assert_eq!(host.write_count(), 0);

    host.width_px = 300.0;
    r.on_resize(&mut sched);
    let fired = fire_timers(&mut r, &mut sched, &mut host, 1_000.0);
    assert_eq!(fired.len(), 1);
    assert_eq!(host.write_count(), 1);
}

#[test]
fn empty_text_falls_back_to_default() {
    let r = ResponsiveTextRenderer::with_solver(
        BlockGlyphSurface::default(),
        "",
        FitSolver::default(),
    );
    assert_eq!(r.text(), DEFAULT_TEXT);
}
