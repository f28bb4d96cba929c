use super::*;
use crate::foundation::core::Vec2;

fn params(kind: TransitionType, direction: TransitionDirection) -> TransitionParams {
    TransitionParams {
        kind,
        direction,
        window_frames: 15,
    }
}

fn fade() -> TransitionParams {
    params(TransitionType::Fade, TransitionDirection::FromRight)
}

#[test]
fn fade_is_exactly_opaque_between_ramps() {
    for f in 16..(90 - 15) {
        assert_eq!(scene_transition_style(f, 90, &fade(), false).opacity, 1.0);
    }
    assert_eq!(scene_transition_style(15, 90, &fade(), false).opacity, 1.0);
    assert_eq!(scene_transition_style(75, 90, &fade(), false).opacity, 1.0);
}

#[test]
fn fade_entry_ramp_starts_transparent() {
    assert_eq!(scene_transition_style(0, 90, &fade(), false).opacity, 0.0);
    let mid = scene_transition_style(7, 90, &fade(), true).opacity;
    assert!((mid - 7.0 / 15.0).abs() < 1e-12);
}

#[test]
fn last_scene_does_not_exit_fade() {
    let last = scene_transition_style(89, 90, &fade(), true);
    assert_eq!(last.opacity, 1.0);
    let inner = scene_transition_style(89, 90, &fade(), false);
    assert!(inner.opacity < 1.0);
    assert!((inner.opacity - 1.0 / 15.0).abs() < 1e-12);
}

#[test]
fn exit_ramp_wins_on_short_scenes() {
    // 20 frames: frame 10 sits in both the entry and the exit window.
    let s = scene_transition_style(10, 20, &fade(), false);
    let exit = interpolate(10.0, (5.0, 20.0), (1.0, 0.0));
    assert_eq!(s.opacity, exit);
    // The last scene keeps the entry value.
    let last = scene_transition_style(10, 20, &fade(), true);
    assert!((last.opacity - 10.0 / 15.0).abs() < 1e-12);
}

#[test]
fn slide_offsets_follow_direction() {
    let cases = [
        (TransitionDirection::FromLeft, Vec2::new(-100.0, 0.0)),
        (TransitionDirection::FromRight, Vec2::new(100.0, 0.0)),
        (TransitionDirection::FromTop, Vec2::new(0.0, -100.0)),
        (TransitionDirection::FromBottom, Vec2::new(0.0, 100.0)),
    ];
    for (dir, expected) in cases {
        let s = scene_transition_style(0, 90, &params(TransitionType::Slide, dir), false);
        assert_eq!(s.opacity, 1.0);
        assert_eq!(s.transform.unwrap().translate, expected);
        assert_eq!(
            scene_transition_style(15, 90, &params(TransitionType::Slide, dir), false),
            VisualStyle::IDENTITY
        );
    }
}

#[test]
fn slide_has_no_exit_motion() {
    let p = params(TransitionType::Slide, TransitionDirection::FromLeft);
    assert_eq!(scene_transition_style(89, 90, &p, false), VisualStyle::IDENTITY);
}

#[test]
fn masking_kinds_do_not_fall_back() {
    for kind in [
        TransitionType::Wipe,
        TransitionType::Flip,
        TransitionType::ClockWipe,
        TransitionType::Iris,
        TransitionType::None,
        TransitionType::Unknown,
    ] {
        for f in [0, 5, 89] {
            assert_eq!(
                scene_transition_style(f, 90, &params(kind, TransitionDirection::FromLeft), false),
                VisualStyle::IDENTITY
            );
        }
    }
}

#[test]
fn absolute_frame_is_made_local() {
    let entry = TimelineEntry {
        scene_id: "s1".to_string(),
        start_frame: FrameIndex(60),
        duration_in_frames: 90,
    };
    assert_eq!(scene_style_at(FrameIndex(60), &entry, &fade(), false).opacity, 0.0);
    assert_eq!(scene_style_at(FrameIndex(100), &entry, &fade(), false).opacity, 1.0);
}
