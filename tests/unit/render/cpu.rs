use super::*;

fn canvas() -> Canvas {
    Canvas {
        width: 32,
        height: 16,
    }
}

#[test]
fn rejects_empty_or_oversized_canvas() {
    assert!(
        CpuSurface::new(
            Canvas {
                width: 0,
                height: 4
            },
            Rgba8::TRANSPARENT
        )
        .is_err()
    );
    assert!(
        CpuSurface::new(
            Canvas {
                width: 70_000,
                height: 4
            },
            Rgba8::TRANSPARENT
        )
        .is_err()
    );
}

#[test]
fn cleared_surface_is_blank() {
    let mut s = CpuSurface::new(canvas(), Rgba8::TRANSPARENT).unwrap();
    s.clear().unwrap();
    let frame = s.read_frame();
    assert_eq!(frame.width, 32);
    assert_eq!(frame.height, 16);
    assert_eq!(frame.data.len(), 32 * 16 * 4);
    assert!(frame.premultiplied);
    assert!(frame.is_blank());
}

#[test]
fn stroked_line_covers_its_pixels() {
    let mut s = CpuSurface::new(canvas(), Rgba8::TRANSPARENT).unwrap();
    s.clear().unwrap();
    s.begin_path();
    s.move_to(Point::new(2.0, 8.0));
    s.line_to(Point::new(30.0, 8.0));
    s.stroke(&StrokeStyle {
        color: Rgba8::WHITE,
        width: 4.0,
    })
    .unwrap();
    let frame = s.read_frame();
    let on = frame.pixel(16, 8).unwrap();
    assert!(on[3] > 200, "expected stroke coverage, got {on:?}");
    assert_eq!(frame.pixel(16, 1).unwrap()[3], 0);
}

#[test]
fn clear_discards_previous_frame() {
    let mut s = CpuSurface::new(canvas(), Rgba8::TRANSPARENT).unwrap();
    s.clear().unwrap();
    s.begin_path();
    s.move_to(Point::new(0.0, 0.0));
    s.line_to(Point::new(32.0, 16.0));
    s.stroke(&StrokeStyle::default()).unwrap();
    assert!(!s.read_frame().is_blank());

    s.clear().unwrap();
    assert!(s.read_frame().is_blank());
}

#[test]
fn opaque_background_fills_surface() {
    let mut s = CpuSurface::new(canvas(), Rgba8::opaque(10, 20, 30)).unwrap();
    s.clear().unwrap();
    let frame = s.read_frame();
    assert_eq!(frame.pixel(0, 0), Some([10, 20, 30, 255]));
    assert_eq!(frame.pixel(31, 15), Some([10, 20, 30, 255]));
}

#[test]
fn invalid_stroke_width_is_rejected() {
    let mut s = CpuSurface::new(canvas(), Rgba8::TRANSPARENT).unwrap();
    s.clear().unwrap();
    s.begin_path();
    s.line_to(Point::new(5.0, 5.0));
    let err = s
        .stroke(&StrokeStyle {
            color: Rgba8::WHITE,
            width: 0.0,
        })
        .unwrap_err();
    assert!(matches!(err, TitleError::Render(_)));
}

#[test]
fn segment_on_empty_path_starts_at_its_first_point() {
    let style = StrokeStyle {
        color: Rgba8::WHITE,
        width: 2.0,
    };
    let mut s = CpuSurface::new(canvas(), Rgba8::TRANSPARENT).unwrap();
    s.clear().unwrap();
    s.begin_path();
    s.line_to(Point::new(20.0, 8.0));
    s.line_to(Point::new(30.0, 8.0));
    s.stroke(&style).unwrap();
    let frame = s.read_frame();
    assert!(frame.pixel(25, 8).unwrap()[3] > 200);
    // A segment from the origin to (20, 8) would cross this pixel.
    assert_eq!(frame.pixel(10, 4).unwrap()[3], 0);

    s.clear().unwrap();
    s.begin_path();
    s.quad_to(Point::new(20.0, 4.0), Point::new(30.0, 4.0));
    s.stroke(&style).unwrap();
    let frame = s.read_frame();
    assert!(frame.pixel(25, 4).unwrap()[3] > 200);
    assert_eq!(frame.pixel(10, 2).unwrap()[3], 0);
}
