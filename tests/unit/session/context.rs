use super::*;
use crate::outline::command::OutlineCommand;
use crate::render::surface::RecordingSurface;
use kurbo::Point;

fn glyph(x: f64) -> GlyphOutline {
    GlyphOutline::new(vec![
        OutlineCommand::MoveTo(Point::new(x, 2.0)),
        OutlineCommand::LineTo(Point::new(x + 10.0, 2.0)),
        OutlineCommand::LineTo(Point::new(x + 10.0, 20.5)),
        OutlineCommand::ClosePath,
    ])
}

fn cfg() -> TitleConfig {
    TitleConfig {
        text: "AB C".to_owned(),
        ..TitleConfig::default()
    }
}

#[test]
fn canvas_is_derived_from_outline_bounds() {
    let outlines = vec![glyph(2.0), GlyphOutline::default(), glyph(20.0)];
    let ctx = AnimationContext::from_outlines(outlines, None, &cfg()).unwrap();
    assert_eq!(
        ctx.canvas(),
        Canvas {
            width: 32,
            height: 23
        }
    );
    assert_eq!(ctx.glyph_count(), 3);
    assert!(ctx.step_tables()[1].is_empty());
}

#[test]
fn explicit_canvas_wins() {
    let canvas = Canvas {
        width: 100,
        height: 40,
    };
    let ctx = AnimationContext::from_outlines(vec![glyph(0.0)], Some(canvas), &cfg()).unwrap();
    assert_eq!(ctx.canvas(), canvas);
}

#[test]
fn pointless_outlines_need_a_canvas() {
    let err = AnimationContext::from_outlines(vec![GlyphOutline::default()], None, &cfg())
        .unwrap_err();
    assert!(matches!(err, TitleError::Validation(_)));
}

#[test]
fn invalid_config_is_rejected() {
    let bad = TitleConfig {
        draw_duration: -1.0,
        ..cfg()
    };
    assert!(AnimationContext::from_outlines(vec![glyph(0.0)], None, &bad).is_err());
}

#[test]
fn durations_follow_timing() {
    let ctx =
        AnimationContext::from_outlines(vec![glyph(0.0), glyph(20.0)], None, &cfg()).unwrap();
    assert!((ctx.completion_time() - 2.075).abs() < 1e-12);
    assert!((ctx.total_duration(1.0) - (0.5 + 2.075 + 1.0)).abs() < 1e-12);
    assert!((ctx.total_duration(-4.0) - (0.5 + 2.075)).abs() < 1e-12);
}

#[test]
fn pad_to_even_rounds_up_odd_sizes() {
    let mut ctx = AnimationContext::from_outlines(
        vec![glyph(0.0)],
        Some(Canvas {
            width: 33,
            height: 20,
        }),
        &cfg(),
    )
    .unwrap();
    ctx.pad_to_even();
    assert_eq!(
        ctx.canvas(),
        Canvas {
            width: 34,
            height: 20
        }
    );
}

#[test]
fn draw_at_is_stateless() {
    let ctx =
        AnimationContext::from_outlines(vec![glyph(0.0), glyph(20.0)], None, &cfg()).unwrap();
    let mut a = RecordingSurface::new();
    let mut b = RecordingSurface::new();
    ctx.draw_at(&mut a, 0.7).unwrap();
    ctx.draw_at(&mut b, 3.0).unwrap();
    ctx.draw_at(&mut b, 0.7).unwrap();
    let mut c = RecordingSurface::new();
    ctx.draw_at(&mut c, 0.7).unwrap();
    assert_eq!(a.ops(), c.ops());
    assert_eq!(a.stroke_count(), 2);
}

#[test]
fn font_context_sizes_canvas_around_measured_text() {
    let font = FontData::from_bytes(include_bytes!("../../fixtures/stroke-gpos.ttf").to_vec())
        .unwrap();
    let cfg = TitleConfig {
        text: "AV".to_owned(),
        font_size: 500.0,
        padding: 2.0,
        ..TitleConfig::default()
    };
    let ctx = build_animation_context(&font, &cfg).unwrap();
    // ceil(550) + 2·2 by 500 + 2·2
    assert_eq!(
        ctx.canvas(),
        Canvas {
            width: 554,
            height: 504
        }
    );
    assert_eq!(ctx.glyph_count(), 2);
    // Text origin is (padding, baseline + padding).
    assert_eq!(
        ctx.outlines()[0].commands[0],
        OutlineCommand::MoveTo(Point::new(2.0, 402.0))
    );
    // Three sides of the 'A' triangle: 2·ceil(√(150² + 350²)) + 300.
    assert_eq!(ctx.step_tables()[0].total_length, 2 * 381 + 300);
}
