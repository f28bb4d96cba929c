//! Collaborators the asset pipeline talks to: persistence, generation and media storage.

use async_trait::async_trait;

use crate::{
    assets::media::{InlineMedia, MediaKind},
    foundation::error::{SlideReelError, SlideReelResult},
    scene::model::{Project, Scene},
};

pub mod fs;
pub mod http;
pub mod memory;

pub use fs::{FsMediaStore, JsonProjectStore};
pub use http::HttpNarrationClient;
pub use memory::MemoryProjectStore;

/// Partial scene update. Unset fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_audio_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
    /// New reference for the layout's primary image slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_image_url: Option<String>,
}

impl ScenePatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn apply(&self, scene: &mut Scene) {
        if let Some(audio) = &self.audio_ref {
            scene.audio_ref = Some(audio.clone());
        }
        if let Some(recorded) = &self.recorded_audio_ref {
            scene.recorded_audio_ref = Some(recorded.clone());
        }
        if let Some(secs) = self.duration_seconds {
            scene.duration_seconds = secs;
        }
        if let Some(url) = &self.primary_image_url
            && let Some(slot) = scene.layout_content.primary_image_mut()
        {
            slot.url = Some(url.clone());
        }
    }
}

/// Project/scene persistence. The pipeline only ever calls `update_scene`.
#[async_trait]
pub trait SceneRepository: Send + Sync {
    async fn create_scene(&self, project_id: &str, scene: Scene) -> SlideReelResult<()>;
    async fn update_scene(&self, scene_id: &str, patch: &ScenePatch) -> SlideReelResult<()>;
    async fn delete_scene(&self, scene_id: &str) -> SlideReelResult<()>;
    async fn get_project(&self, project_id: &str) -> SlideReelResult<Project>;
}

/// Text-to-speech. Fallible and non-idempotent: two calls yield different media.
#[async_trait]
pub trait NarrationSynthesizer: Send + Sync {
    async fn synthesize_narration(&self, text: &str, voice: &str) -> SlideReelResult<InlineMedia>;
}

#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate_image(&self, prompt: &str) -> SlideReelResult<InlineMedia>;
}

/// Durable media storage.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Writes `media` as `filename` and returns the reference the renderer resolves it by.
    async fn persist_inline_media(
        &self,
        media: &InlineMedia,
        filename: &str,
        kind: MediaKind,
    ) -> SlideReelResult<String>;
}

/// Synthesizer used when no narration service is configured. Every call fails.
pub struct NoNarration;

#[async_trait]
impl NarrationSynthesizer for NoNarration {
    async fn synthesize_narration(&self, _text: &str, _voice: &str) -> SlideReelResult<InlineMedia> {
        Err(SlideReelError::synthesis(
            "no narration service configured (set SLIDEREEL_TTS_URL)",
        ))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/services/patch.rs"]
mod tests;
