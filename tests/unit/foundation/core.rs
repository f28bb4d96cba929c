use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange {
        start: FrameIndex(2),
        end: FrameIndex(5),
    };
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
    assert_eq!(r.local(FrameIndex(4)), 2);
    assert_eq!(r.local(FrameIndex(0)), 0);
}

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn secs_to_frames_rounds_half_away_from_zero() {
    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(fps.secs_to_frames_round(2.0), 60);
    // 0.05s * 30 = 1.5 frames
    assert_eq!(fps.secs_to_frames_round(0.05), 2);
    assert_eq!(fps.secs_to_frames_round(0.049), 1);
    assert_eq!(fps.secs_to_frames_round(-1.0), 0);
    assert_eq!(fps.secs_to_frames_round(f64::NAN), 0);
}

#[test]
fn ntsc_rate_is_rational() {
    let fps = Fps::new(30000, 1001).unwrap();
    assert!((fps.as_f64() - 29.97).abs() < 0.01);
    assert!((fps.frames_to_secs(30000) - 1001.0).abs() < 1e-9);
}
