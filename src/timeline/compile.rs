use crate::{
    foundation::core::{Fps, FrameIndex, FrameRange},
    scene::model::Scene,
};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Placement of one scene on the composition timeline.
pub struct TimelineEntry {
    pub scene_id: String,
    pub start_frame: FrameIndex,
    pub duration_in_frames: u64,
}

impl TimelineEntry {
    pub fn end_frame(&self) -> FrameIndex {
        FrameIndex(self.start_frame.0.saturating_add(self.duration_in_frames))
    }

    pub fn range(&self) -> FrameRange {
        FrameRange {
            start: self.start_frame,
            end: self.end_frame(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
/// Audio element the player mounts for the length of one entry.
pub struct AudioCue {
    pub scene_id: String,
    pub source: String,
    pub start_frame: FrameIndex,
    pub duration_in_frames: u64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
/// Contiguous, non-overlapping schedule of scenes. Recomputed on every compile, never persisted.
pub struct Timeline {
    pub fps: Fps,
    pub entries: Vec<TimelineEntry>,
}

/// Frame length of a scene. Non-positive or non-finite durations clamp to one frame.
///
/// Positive durations are rounded as-is, so a scene shorter than half a frame gets zero
/// frames and owns no playhead position.
pub fn scene_frames(duration_seconds: f64, fps: Fps) -> u64 {
    if is_playable(duration_seconds) {
        fps.secs_to_frames_round(duration_seconds)
    } else {
        1
    }
}

fn is_playable(duration_seconds: f64) -> bool {
    duration_seconds.is_finite() && duration_seconds > 0.0
}

impl Timeline {
    /// Left fold over `scenes` in array order: each start is the sum of all previous lengths.
    #[tracing::instrument(skip(scenes), fields(scenes = scenes.len()))]
    pub fn compile(scenes: &[Scene], fps: Fps) -> Self {
        let mut cursor = 0u64;
        let mut entries = Vec::with_capacity(scenes.len());
        for scene in scenes {
            if !is_playable(scene.duration_seconds) {
                tracing::warn!(
                    scene = %scene.id,
                    duration = scene.duration_seconds,
                    "invalid scene duration, clamping to one frame"
                );
            }
            let duration_in_frames = scene_frames(scene.duration_seconds, fps);
            entries.push(TimelineEntry {
                scene_id: scene.id.clone(),
                start_frame: FrameIndex(cursor),
                duration_in_frames,
            });
            cursor = cursor.saturating_add(duration_in_frames);
        }
        tracing::debug!(total_frames = cursor, "timeline compiled");
        Self { fps, entries }
    }

    pub fn total_frames(&self) -> u64 {
        self.entries.last().map(|e| e.end_frame().0).unwrap_or(0)
    }

    pub fn duration_secs(&self) -> f64 {
        self.fps.frames_to_secs(self.total_frames())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_last(&self, index: usize) -> bool {
        index + 1 == self.entries.len()
    }

    /// Entry active at `frame`, with its index. `None` past the end.
    pub fn entry_at(&self, frame: FrameIndex) -> Option<(usize, &TimelineEntry)> {
        let idx = self
            .entries
            .partition_point(|e| e.start_frame.0 <= frame.0)
            .checked_sub(1)?;
        let entry = &self.entries[idx];
        entry.range().contains(frame).then_some((idx, entry))
    }

    /// One cue per entry whose scene has playback audio. `scenes` must be the compiled array.
    pub fn audio_cues(&self, scenes: &[Scene]) -> Vec<AudioCue> {
        self.entries
            .iter()
            .zip(scenes)
            .filter_map(|(entry, scene)| {
                if entry.scene_id != scene.id {
                    tracing::warn!(
                        entry = %entry.scene_id,
                        scene = %scene.id,
                        "scene order differs from compiled timeline"
                    );
                    return None;
                }
                scene.playback_audio().map(|src| AudioCue {
                    scene_id: scene.id.clone(),
                    source: src.to_string(),
                    start_frame: entry.start_frame,
                    duration_in_frames: entry.duration_in_frames,
                })
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/compile.rs"]
mod tests;
