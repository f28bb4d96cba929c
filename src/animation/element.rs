use std::collections::BTreeMap;

use crate::{
    animation::{
        spring::{SpringConfig, spring_progress},
        style::{Transform, VisualStyle},
    },
    foundation::core::Fps,
    scene::model::{AnimationKind, ElementAnimation, ElementName, Scene},
};

/// Entrance offset used by the slide-in kinds, in pixels.
pub const SLIDE_DISTANCE_PX: f64 = 100.0;

/// Pre-animation state for `kind`. `None` for kinds that apply no styling.
pub fn initial_style(kind: AnimationKind) -> Option<VisualStyle> {
    let transform = match kind {
        AnimationKind::None | AnimationKind::Unknown => return None,
        AnimationKind::Fade => None,
        AnimationKind::SlideInLeft => Some(Transform::translate_px(-SLIDE_DISTANCE_PX, 0.0)),
        AnimationKind::SlideInRight => Some(Transform::translate_px(SLIDE_DISTANCE_PX, 0.0)),
        AnimationKind::SlideInUp => Some(Transform::translate_px(0.0, SLIDE_DISTANCE_PX)),
        AnimationKind::SlideInDown => Some(Transform::translate_px(0.0, -SLIDE_DISTANCE_PX)),
        AnimationKind::ScaleIn => Some(Transform::scale(0.5)),
        AnimationKind::RotateIn => Some(Transform::rotate(-180.0)),
    };
    Some(VisualStyle::hidden(transform))
}

/// Style of one element `local_frame` frames into its scene.
///
/// Returns `None` when the element must keep its natural default styling.
pub fn element_style(
    animation: &ElementAnimation,
    local_frame: u64,
    fps: Fps,
) -> Option<VisualStyle> {
    let initial = initial_style(animation.kind)?;
    let delay_frames = fps.secs_to_frames_round(animation.delay_seconds.max(0.0));
    if local_frame < delay_frames {
        return Some(initial);
    }
    let duration_frames = fps.secs_to_frames_round(animation.duration_seconds.max(0.0));
    let progress = spring_progress(
        local_frame - delay_frames,
        fps,
        SpringConfig::for_easing(animation.easing),
        Some(duration_frames),
    );
    Some(initial.toward_identity(progress))
}

/// Styles for every element of `scene` that has an animation which applies styling.
pub fn element_styles(
    scene: &Scene,
    local_frame: u64,
    fps: Fps,
) -> BTreeMap<ElementName, VisualStyle> {
    scene
        .animation_config
        .iter()
        .filter_map(|(name, anim)| element_style(anim, local_frame, fps).map(|s| (*name, s)))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/animation/element.rs"]
mod tests;
