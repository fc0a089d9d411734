use super::*;

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn fps_frame_timestamps() {
    let fps = Fps::new(60, 1).unwrap();
    assert_eq!(fps.frames_to_secs(0), 0.0);
    assert!((fps.frames_to_secs(30) - 0.5).abs() < 1e-12);
    assert_eq!(fps.secs_to_frames_ceil(1.0), 60);
    assert_eq!(fps.secs_to_frames_ceil(1.01), 61);
    assert_eq!(fps.secs_to_frames_ceil(0.0), 1);
}

#[test]
fn rgba_hex_parsing() {
    assert_eq!(Rgba8::from_hex("#FFFFFF").unwrap(), Rgba8::WHITE);
    assert_eq!(
        Rgba8::from_hex("10203040").unwrap(),
        Rgba8 {
            r: 0x10,
            g: 0x20,
            b: 0x30,
            a: 0x40
        }
    );
    assert!(Rgba8::from_hex("#FFF").is_err());
    assert!(Rgba8::from_hex("#GG0000").is_err());
}

#[test]
fn rgba_serde_uses_hex_strings() {
    let json = serde_json::to_string(&Rgba8::opaque(1, 2, 255)).unwrap();
    assert_eq!(json, "\"#0102FF\"");
    let back: Rgba8 = serde_json::from_str("\"#00000080\"").unwrap();
    assert_eq!(back.a, 0x80);
    assert!(serde_json::from_str::<Rgba8>("\"nope\"").is_err());
}

#[test]
fn premultiplied_scales_channels() {
    assert_eq!(Rgba8::WHITE.premultiplied(), [255, 255, 255, 255]);
    assert_eq!(Rgba8::TRANSPARENT.premultiplied(), [0, 0, 0, 0]);
}

#[test]
fn first_frame_at_or_after_matches_frame_timestamps() {
    let fps = Fps::new(25, 1).unwrap();
    assert_eq!(fps.first_frame_at_or_after(0.0), 0);
    assert_eq!(fps.first_frame_at_or_after(-1.0), 0);
    assert_eq!(fps.first_frame_at_or_after(0.5), 13);
    assert_eq!(fps.first_frame_at_or_after(0.52), 13);

    let fps = Fps::new(30000, 1001).unwrap();
    for secs in [0.1, 0.5, 1.0, 2.345] {
        let k = fps.first_frame_at_or_after(secs);
        assert!(fps.frames_to_secs(k) >= secs);
        assert!(fps.frames_to_secs(k - 1) < secs);
    }
}
