use super::*;
use crate::{
    animation::style::LengthUnit,
    foundation::core::Vec2,
    scene::model::{Easing, LayoutContent},
};

fn fps30() -> Fps {
    Fps::new(30, 1).unwrap()
}

fn anim(kind: AnimationKind, delay: f64) -> ElementAnimation {
    ElementAnimation::new(kind, 0.5, delay, Easing::EaseOut)
}

#[test]
fn none_and_unknown_apply_no_styling() {
    for kind in [AnimationKind::None, AnimationKind::Unknown] {
        for f in [0, 5, 500] {
            assert!(element_style(&anim(kind, 0.0), f, fps30()).is_none());
        }
    }
}

#[test]
fn delay_holds_pre_animation_state() {
    let a = anim(AnimationKind::SlideInLeft, 1.0);
    for f in [0, 10, 29] {
        let s = element_style(&a, f, fps30()).unwrap();
        assert_eq!(s.opacity, 0.0);
        let tr = s.transform.unwrap();
        assert_eq!(tr.translate, Vec2::new(-100.0, 0.0));
        assert_eq!(tr.unit, LengthUnit::Px);
    }
    let started = element_style(&a, 30, fps30()).unwrap();
    assert_eq!(started.opacity, 0.0);
}

#[test]
fn fade_ends_at_identity() {
    let a = anim(AnimationKind::Fade, 0.0);
    let first = element_style(&a, 0, fps30()).unwrap();
    assert_eq!(first, VisualStyle::hidden(None));
    let done = element_style(&a, 15, fps30()).unwrap();
    assert_eq!(done, VisualStyle::IDENTITY);
    let mid = element_style(&a, 7, fps30()).unwrap();
    assert!(mid.opacity > 0.0 && mid.opacity < 1.0);
    assert!(mid.transform.is_none());
}

#[test]
fn every_kind_converges_to_identity() {
    for kind in [
        AnimationKind::Fade,
        AnimationKind::SlideInLeft,
        AnimationKind::SlideInRight,
        AnimationKind::SlideInUp,
        AnimationKind::SlideInDown,
        AnimationKind::ScaleIn,
        AnimationKind::RotateIn,
    ] {
        for easing in [Easing::Linear, Easing::BackOut, Easing::Anticipate] {
            let a = ElementAnimation::new(kind, 0.8, 0.2, easing);
            assert_eq!(
                element_style(&a, 6 + 24, fps30()),
                Some(VisualStyle::IDENTITY),
                "{kind:?}/{easing:?}"
            );
        }
    }
}

#[test]
fn slide_directions_have_expected_signs() {
    let x = |k| initial_style(k).unwrap().transform.unwrap().translate;
    assert!(x(AnimationKind::SlideInLeft).x < 0.0);
    assert!(x(AnimationKind::SlideInRight).x > 0.0);
    assert!(x(AnimationKind::SlideInUp).y > 0.0);
    assert!(x(AnimationKind::SlideInDown).y < 0.0);
}

#[test]
fn zero_duration_snaps_after_delay() {
    let a = ElementAnimation::new(AnimationKind::ScaleIn, 0.0, 0.0, Easing::EaseOut);
    assert_eq!(element_style(&a, 0, fps30()), Some(VisualStyle::IDENTITY));
}

#[test]
fn scene_styles_skip_unstyled_elements() {
    let mut scene = Scene::new("s", "", 3.0, LayoutContent::Blank);
    scene.set_animation(ElementName::Title, anim(AnimationKind::Fade, 0.0));
    scene.set_animation(ElementName::Body, anim(AnimationKind::None, 0.0));
    let styles = element_styles(&scene, 0, fps30());
    assert_eq!(styles.len(), 1);
    assert!(styles.contains_key(&ElementName::Title));
}
