use std::collections::BTreeMap;

use crate::{
    animation::{element::element_styles, style::VisualStyle, transition::scene_style_at},
    captions::sync::{CaptionDisplayState, render_caption_state},
    config::PlaybackConfig,
    foundation::{
        core::FrameIndex,
        error::{SlideReelError, SlideReelResult},
    },
    render::layout::{RenderTree, render_layout},
    scene::model::{ElementName, Project, Scene, Theme},
    timeline::compile::{Timeline, TimelineEntry},
};

#[derive(Clone, Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
/// Everything the player needs to draw one absolute frame.
pub struct EvaluatedFrame {
    pub frame: FrameIndex,
    pub entry_index: usize,
    pub entry: TimelineEntry,
    pub local_frame: u64,
    pub is_last: bool,
    pub container: VisualStyle,
    pub elements: BTreeMap<ElementName, VisualStyle>,
    pub tree: RenderTree,
    pub captions: CaptionDisplayState,
    pub theme: Theme,
    /// `recordedAudioRef` when set, otherwise `audioRef`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_source: Option<String>,
}

pub struct FrameEvaluator;

impl FrameEvaluator {
    /// Evaluates `frame` against a timeline compiled from `project.scenes`.
    ///
    /// `Ok(None)` past the end of the timeline. Errors only when the timeline names a scene
    /// the project does not contain.
    #[tracing::instrument(skip(project, timeline, config))]
    pub fn eval_frame(
        project: &Project,
        timeline: &Timeline,
        frame: FrameIndex,
        config: &PlaybackConfig,
    ) -> SlideReelResult<Option<EvaluatedFrame>> {
        let Some((idx, entry)) = timeline.entry_at(frame) else {
            return Ok(None);
        };
        let scene = resolve_scene(project, idx, entry)?;
        let is_last = timeline.is_last(idx);
        let local_frame = entry.range().local(frame);

        let params = config.transition_params(&project.video_settings);
        let container = scene_style_at(frame, entry, &params, is_last);
        let elements = element_styles(scene, local_frame, timeline.fps);
        let theme = project.theme.merged(scene.theme_override.as_ref());
        let tree = render_layout(&scene.layout_content, &elements, &theme);
        let captions = render_caption_state(
            &scene.narration,
            &project.video_settings.captions,
            local_frame,
            entry.duration_in_frames,
        );

        Ok(Some(EvaluatedFrame {
            frame,
            entry_index: idx,
            entry: entry.clone(),
            local_frame,
            is_last,
            container,
            elements,
            tree,
            captions,
            theme,
            audio_source: scene.playback_audio().map(str::to_string),
        }))
    }
}

fn resolve_scene<'a>(
    project: &'a Project,
    idx: usize,
    entry: &TimelineEntry,
) -> SlideReelResult<&'a Scene> {
    match project.scenes.get(idx) {
        Some(scene) if scene.id == entry.scene_id => Ok(scene),
        _ => project.scene(&entry.scene_id).ok_or_else(|| {
            SlideReelError::evaluation(format!(
                "timeline references unknown scene '{}'",
                entry.scene_id
            ))
        }),
    }
}
