use crate::{
    animation::{
        spring::interpolate,
        style::{Transform, VisualStyle},
    },
    foundation::core::FrameIndex,
    scene::settings::{TransitionDirection, TransitionType, VideoSettings},
    timeline::compile::TimelineEntry,
};

/// Default transition window: 0.5s at 30fps.
pub const DEFAULT_TRANSITION_FRAMES: u64 = 15;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Session-wide scene transition parameters. Scenes cannot override them.
pub struct TransitionParams {
    pub kind: TransitionType,
    pub direction: TransitionDirection,
    pub window_frames: u64,
}

impl TransitionParams {
    pub fn from_settings(settings: &VideoSettings, window_frames: u64) -> Self {
        Self {
            kind: settings.transition_type,
            direction: settings.transition_direction,
            window_frames,
        }
    }
}

impl Default for TransitionParams {
    fn default() -> Self {
        Self {
            kind: TransitionType::Fade,
            direction: TransitionDirection::FromRight,
            window_frames: DEFAULT_TRANSITION_FRAMES,
        }
    }
}

/// Container style for the scene at `entry` when the playhead is at absolute `frame`.
pub fn scene_style_at(
    frame: FrameIndex,
    entry: &TimelineEntry,
    params: &TransitionParams,
    is_last: bool,
) -> VisualStyle {
    let local = entry.range().local(frame);
    scene_transition_style(local, entry.duration_in_frames, params, is_last)
}

/// Container style `local_frame` frames into a scene of `duration_in_frames`.
///
/// Only fade and slide are drawn here. Wipe, flip, clock-wipe, iris, none and unknown
/// kinds return identity: they need masking and must not borrow another kind's motion.
pub fn scene_transition_style(
    local_frame: u64,
    duration_in_frames: u64,
    params: &TransitionParams,
    is_last: bool,
) -> VisualStyle {
    let local = local_frame as f64;
    let window = params.window_frames as f64;
    match params.kind {
        TransitionType::Fade => {
            let mut opacity = 1.0;
            if local < window {
                opacity = interpolate(local, (0.0, window), (0.0, 1.0));
            }
            // Evaluated second so that on scenes shorter than two windows the exit ramp wins.
            let exit_start = duration_in_frames as f64 - window;
            if !is_last && local > exit_start {
                opacity = interpolate(local, (exit_start, duration_in_frames as f64), (1.0, 0.0));
            }
            VisualStyle {
                opacity,
                transform: None,
            }
        }
        TransitionType::Slide => {
            if local >= window {
                return VisualStyle::IDENTITY;
            }
            let offset = interpolate(local, (0.0, window), (1.0, 0.0)) * 100.0;
            let transform = match params.direction {
                TransitionDirection::FromLeft => Transform::translate_percent(-offset, 0.0),
                TransitionDirection::FromRight => Transform::translate_percent(offset, 0.0),
                TransitionDirection::FromTop => Transform::translate_percent(0.0, -offset),
                TransitionDirection::FromBottom => Transform::translate_percent(0.0, offset),
            };
            VisualStyle {
                opacity: 1.0,
                transform: Some(transform),
            }
        }
        TransitionType::Wipe
        | TransitionType::Flip
        | TransitionType::ClockWipe
        | TransitionType::Iris
        | TransitionType::None
        | TransitionType::Unknown => VisualStyle::IDENTITY,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/transition.rs"]
mod tests;
