use super::*;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::Canvas;
use crate::outline::command::{GlyphOutline, OutlineCommand};
use crate::render::surface::{RecordingSurface, SurfaceOp};
use kurbo::Point;

fn context() -> AnimationContext {
    let glyph = |x: f64| {
        GlyphOutline::new(vec![
            OutlineCommand::MoveTo(Point::new(x, 4.0)),
            OutlineCommand::LineTo(Point::new(x + 8.0, 4.0)),
            OutlineCommand::LineTo(Point::new(x + 8.0, 12.0)),
        ])
    };
    let cfg = TitleConfig {
        text: "AB".to_owned(),
        draw_duration: 0.5,
        stagger_delay: 0.1,
        startup_delay: 0.25,
        ..TitleConfig::default()
    };
    AnimationContext::from_outlines(
        vec![glyph(2.0), glyph(14.0)],
        Some(Canvas {
            width: 24,
            height: 16,
        }),
        &cfg,
    )
    .unwrap()
}

#[test]
fn frame_clock_yields_fixed_rate_timestamps() {
    let fps = Fps::new(4, 1).unwrap();
    let ticks: Vec<_> = FrameClock::for_duration(fps, 1.0).collect();
    assert_eq!(ticks.len(), 4);
    assert_eq!(ticks[0], (FrameIndex(0), 0.0));
    assert_eq!(ticks[3], (FrameIndex(3), 0.75));
    assert_eq!(FrameClock::new(fps, 3).size_hint(), (3, Some(3)));
}

#[test]
fn startup_delay_keeps_surface_blank() {
    let mut driver = AnimationDriver::new(context());
    let mut surface = RecordingSurface::new();
    let report = driver.tick(0.1, &mut surface).unwrap();
    assert_eq!(report, FrameReport::default());
    assert_eq!(surface.ops(), &[SurfaceOp::Clear]);
    assert_eq!(driver.state(), DriverState::Idle);
    assert_eq!(driver.elapsed_at(0.1), None);
}

#[test]
fn clock_starts_on_first_animated_frame() {
    let mut driver = AnimationDriver::new(context());
    let mut surface = RecordingSurface::new();

    driver.tick(0.3, &mut surface).unwrap();
    assert_eq!(driver.state(), DriverState::Running { start: 0.3 });
    // Elapsed is 0 on the first animated frame, so nothing is revealed yet.
    assert_eq!(surface.take(), vec![SurfaceOp::Clear]);

    let report = driver.tick(0.5, &mut surface).unwrap();
    assert_eq!(driver.elapsed_at(0.5), Some(0.5 - 0.3));
    assert_eq!(report.drawn, 2);
    assert_eq!(surface.ops()[0], SurfaceOp::Clear);
}

#[test]
fn driver_reaches_complete_and_keeps_drawing() {
    let mut driver = AnimationDriver::new(context());
    let mut surface = RecordingSurface::new();
    driver.tick(0.25, &mut surface).unwrap();
    driver.tick(0.25 + 0.6 + 0.01, &mut surface).unwrap();
    assert_eq!(driver.state(), DriverState::Complete { start: 0.25 });

    surface.take();
    driver.tick(5.0, &mut surface).unwrap();
    let first = surface.take();
    driver.tick(50.0, &mut surface).unwrap();
    assert_eq!(first, surface.take());
    assert_eq!(driver.state(), DriverState::Complete { start: 0.25 });

    driver.reset();
    assert_eq!(driver.state(), DriverState::Idle);
}

#[test]
fn non_finite_timestamp_is_rejected() {
    let mut driver = AnimationDriver::new(context());
    let mut surface = RecordingSurface::new();
    assert!(driver.tick(f64::NAN, &mut surface).is_err());
}

#[test]
fn render_range_reuses_completed_frames() {
    let ctx = context();
    let mut surface = CpuSurface::new(ctx.canvas(), ctx.background()).unwrap();
    let mut driver = AnimationDriver::new(ctx);
    let fps = Fps::new(20, 1).unwrap();
    let mut sink = InMemorySink::new();

    let stats = driver
        .render_range(FrameClock::for_duration(fps, 2.0), &mut surface, &mut sink)
        .unwrap();
    assert_eq!(stats.frames, 40);
    assert_eq!(stats.rendered + stats.reused, 40);
    assert!(stats.reused > 0);
    assert!(sink.is_finished());

    let frames = sink.frames();
    assert_eq!(frames.len(), 40);
    assert!(frames[0].1.is_blank());
    let last = &frames[39].1;
    assert!(!last.is_blank());

    // Re-rendering the final timestamp from scratch gives the same pixels.
    let fresh = driver.render_at(39.0 / 20.0, &mut surface).unwrap();
    assert_eq!(&fresh, last);
}

#[test]
fn render_at_is_blank_before_startup() {
    let ctx = context();
    let mut surface = CpuSurface::new(ctx.canvas(), ctx.background()).unwrap();
    let driver = AnimationDriver::new(ctx);
    assert!(driver.render_at(0.1, &mut surface).unwrap().is_blank());
    assert!(!driver.render_at(2.0, &mut surface).unwrap().is_blank());
}
