use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::{
    assets::{
        media::{InlineMedia, MediaKind, is_inline, measure_duration, validate_data_url},
        progress::{PrepareProgress, ProgressSink},
    },
    foundation::error::{SlideReelError, SlideReelResult},
    scene::model::{Scene, validate_scene_ids},
    services::{ImageGenerator, MediaStore, NarrationSynthesizer, SceneRepository, ScenePatch},
};

/// Best-effort cancellation, observed between pipeline steps.
///
/// In-flight service calls are not interrupted; their results are dropped instead of
/// being written back.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkItem {
    /// Narration present, no audio of any kind.
    SynthesizeAudio,
    /// `audioRef` is inline.
    PersistAudio,
    /// `recordedAudioRef` is inline.
    PersistRecording,
    /// The layout's primary image is inline.
    PersistImage,
}

impl WorkItem {
    fn describe(self) -> &'static str {
        match self {
            Self::SynthesizeAudio => "generating narration",
            Self::PersistAudio => "saving narration audio",
            Self::PersistRecording => "saving recorded audio",
            Self::PersistImage => "saving image",
        }
    }
}

/// Work items for one scene, in execution order.
pub fn classify_scene(scene: &Scene) -> Vec<WorkItem> {
    let mut items = Vec::new();
    let has_audio = scene.audio_ref.as_deref().is_some_and(|r| !r.trim().is_empty())
        || scene
            .recorded_audio_ref
            .as_deref()
            .is_some_and(|r| !r.trim().is_empty());
    if scene.has_narration() && !has_audio {
        items.push(WorkItem::SynthesizeAudio);
    }
    if scene.audio_ref.as_deref().is_some_and(is_inline) {
        items.push(WorkItem::PersistAudio);
    }
    if scene.recorded_audio_ref.as_deref().is_some_and(is_inline) {
        items.push(WorkItem::PersistRecording);
    }
    if inline_image(scene).is_some() {
        items.push(WorkItem::PersistImage);
    }
    items
}

fn inline_image(scene: &Scene) -> Option<&str> {
    scene
        .layout_content
        .primary_image()
        .and_then(|slot| slot.url.as_deref())
        .filter(|url| is_inline(url))
}

/// Work plan for a scene list. Fails on malformed input; nothing has been called yet.
pub fn scan(scenes: &[Scene]) -> SlideReelResult<Vec<Vec<WorkItem>>> {
    validate_scene_ids(scenes).map_err(|e| SlideReelError::scan(e.to_string()))?;
    for scene in scenes {
        let inline_refs = [
            scene.audio_ref.as_deref(),
            scene.recorded_audio_ref.as_deref(),
            inline_image(scene),
        ];
        for reference in inline_refs.into_iter().flatten().filter(|r| is_inline(r)) {
            validate_data_url(reference).map_err(|e| {
                SlideReelError::scan(format!("scene '{}': {e}", scene.id))
            })?;
        }
    }
    Ok(scenes.iter().map(classify_scene).collect())
}

/// Renderer-relative form of a durable image path.
fn image_reference(durable: &str) -> String {
    durable.trim_start_matches('/').to_string()
}

/// Turns every inline or missing media reference in a scene list into a durable one.
pub struct AssetPipeline {
    repository: Arc<dyn SceneRepository>,
    narrator: Arc<dyn NarrationSynthesizer>,
    media: Arc<dyn MediaStore>,
    images: Option<Arc<dyn ImageGenerator>>,
}

struct Run<'a> {
    total: usize,
    completed: usize,
    sink: &'a dyn ProgressSink,
    cancel: &'a CancelFlag,
}

impl Run<'_> {
    fn report(&self, task: String) {
        self.sink
            .report(&PrepareProgress::preparing(self.total, self.completed, task));
    }

    fn check_cancel(&self) -> SlideReelResult<()> {
        if self.cancel.is_cancelled() {
            return Err(self.abort(SlideReelError::Cancelled));
        }
        Ok(())
    }

    /// Reports the run as failed and hands the error back.
    fn abort(&self, err: SlideReelError) -> SlideReelError {
        let task = match &err {
            SlideReelError::Cancelled => "cancelled".to_string(),
            other => other.to_string(),
        };
        self.sink
            .report(&PrepareProgress::failed(self.total, self.completed, task));
        err
    }
}

impl AssetPipeline {
    pub fn new(
        repository: Arc<dyn SceneRepository>,
        narrator: Arc<dyn NarrationSynthesizer>,
        media: Arc<dyn MediaStore>,
    ) -> Self {
        Self {
            repository,
            narrator,
            media,
            images: None,
        }
    }

    pub fn with_image_generator(mut self, images: Arc<dyn ImageGenerator>) -> Self {
        self.images = Some(images);
        self
    }

    /// Prepares `scenes` for playback, in array order, one unit of work at a time.
    ///
    /// Per-unit failures are logged and skipped; the scene keeps its previous state and
    /// `completed` does not advance for it. Scan failures and cancellation abort the run.
    #[tracing::instrument(skip(self, scenes, sink, cancel), fields(scenes = scenes.len()))]
    pub async fn prepare(
        &self,
        project_id: &str,
        mut scenes: Vec<Scene>,
        voice: &str,
        sink: &dyn ProgressSink,
        cancel: &CancelFlag,
    ) -> SlideReelResult<Vec<Scene>> {
        let plan = match scan(&scenes) {
            Ok(plan) => plan,
            Err(e) => {
                tracing::error!(error = %e, "asset scan failed");
                sink.report(&PrepareProgress::failed(0, 0, e.to_string()));
                return Err(e);
            }
        };
        let total: usize = plan.iter().map(Vec::len).sum();
        if total == 0 {
            tracing::debug!("all media already durable");
            sink.report(&PrepareProgress::ready(0, 0));
            return Ok(scenes);
        }

        tracing::info!(total, "preparing assets");
        let mut run = Run {
            total,
            completed: 0,
            sink,
            cancel,
        };
        run.report("scanning scenes".to_string());
        let scene_count = scenes.len();

        for (idx, (scene, items)) in scenes.iter_mut().zip(plan).enumerate() {
            for item in items {
                run.check_cancel()?;
                run.report(format!(
                    "{} for scene {}/{}",
                    item.describe(),
                    idx + 1,
                    scene_count
                ));
                let outcome = self.run_item(scene, item, voice, cancel).await;
                match outcome {
                    Ok(patch) => {
                        patch.apply(scene);
                        run.completed += 1;
                        tracing::debug!(scene = %scene.id, ?item, "asset unit done");
                    }
                    Err(e) if e.is_fatal() => return Err(run.abort(e)),
                    Err(e) => {
                        tracing::warn!(scene = %scene.id, ?item, error = %e, "asset unit failed, skipping");
                    }
                }
                run.report(format!(
                    "finished {} for scene {}/{}",
                    item.describe(),
                    idx + 1,
                    scene_count
                ));
            }
        }
        run.check_cancel()?;

        if run.completed < total {
            tracing::warn!(completed = run.completed, total, "assets partially prepared");
        } else {
            tracing::info!(total, "assets prepared");
        }
        sink.report(&PrepareProgress::ready(total, run.completed));
        Ok(scenes)
    }

    /// One unit: produce durable media, push the patch to the repository, return it.
    async fn run_item(
        &self,
        scene: &Scene,
        item: WorkItem,
        voice: &str,
        cancel: &CancelFlag,
    ) -> SlideReelResult<ScenePatch> {
        let patch = match item {
            WorkItem::SynthesizeAudio => {
                let audio = self
                    .narrator
                    .synthesize_narration(&scene.narration, voice)
                    .await?;
                let duration = measure_duration(&audio).await;
                tracing::debug!(scene = %scene.id, secs = duration.secs, method = ?duration.method, "narration measured");
                if cancel.is_cancelled() {
                    return Err(SlideReelError::Cancelled);
                }
                let reference = self.persist(scene, &audio, MediaKind::Audio).await?;
                ScenePatch {
                    audio_ref: Some(reference),
                    duration_seconds: Some(duration.secs),
                    ..ScenePatch::default()
                }
            }
            WorkItem::PersistAudio | WorkItem::PersistRecording => {
                let source = if item == WorkItem::PersistAudio {
                    scene.audio_ref.as_deref()
                } else {
                    scene.recorded_audio_ref.as_deref()
                };
                let audio = InlineMedia::parse_data_url(source.unwrap_or_default())?;
                let reference = self.persist(scene, &audio, MediaKind::Audio).await?;
                if item == WorkItem::PersistAudio {
                    ScenePatch {
                        audio_ref: Some(reference),
                        ..ScenePatch::default()
                    }
                } else {
                    ScenePatch {
                        recorded_audio_ref: Some(reference),
                        ..ScenePatch::default()
                    }
                }
            }
            WorkItem::PersistImage => {
                let image = InlineMedia::parse_data_url(inline_image(scene).unwrap_or_default())?;
                let reference = self.persist(scene, &image, MediaKind::Images).await?;
                ScenePatch {
                    primary_image_url: Some(image_reference(&reference)),
                    ..ScenePatch::default()
                }
            }
        };
        if cancel.is_cancelled() {
            return Err(SlideReelError::Cancelled);
        }
        self.repository.update_scene(&scene.id, &patch).await?;
        Ok(patch)
    }

    async fn persist(
        &self,
        scene: &Scene,
        media: &InlineMedia,
        kind: MediaKind,
    ) -> SlideReelResult<String> {
        let filename = media.durable_filename(&scene.id);
        self.media.persist_inline_media(media, &filename, kind).await
    }

    /// Generates images for primary slots that have a prompt but no reference yet.
    ///
    /// Same isolation as [`AssetPipeline::prepare`]: one failed generation leaves that
    /// scene's slot empty and the rest proceed.
    #[tracing::instrument(skip(self, scenes, sink, cancel), fields(scenes = scenes.len()))]
    pub async fn fill_image_prompts(
        &self,
        mut scenes: Vec<Scene>,
        sink: &dyn ProgressSink,
        cancel: &CancelFlag,
    ) -> SlideReelResult<Vec<Scene>> {
        let pending: Vec<usize> = scenes
            .iter()
            .enumerate()
            .filter(|(_, s)| pending_prompt(s).is_some())
            .map(|(i, _)| i)
            .collect();
        if pending.is_empty() {
            sink.report(&PrepareProgress::ready(0, 0));
            return Ok(scenes);
        }
        let Some(generator) = self.images.as_ref() else {
            let msg = "no image generator configured";
            sink.report(&PrepareProgress::failed(pending.len(), 0, msg));
            return Err(SlideReelError::validation(msg));
        };

        let mut run = Run {
            total: pending.len(),
            completed: 0,
            sink,
            cancel,
        };
        for idx in pending {
            run.check_cancel()?;
            let scene = &mut scenes[idx];
            run.report(format!("generating image for scene {}", idx + 1));
            match self.generate_into(generator.as_ref(), scene, cancel).await {
                Ok(patch) => {
                    patch.apply(scene);
                    run.completed += 1;
                }
                Err(e) if e.is_fatal() => return Err(run.abort(e)),
                Err(e) => {
                    tracing::warn!(scene = %scene.id, error = %e, "image generation failed, skipping");
                }
            }
        }
        run.check_cancel()?;
        sink.report(&PrepareProgress::ready(run.total, run.completed));
        Ok(scenes)
    }

    async fn generate_into(
        &self,
        generator: &dyn ImageGenerator,
        scene: &Scene,
        cancel: &CancelFlag,
    ) -> SlideReelResult<ScenePatch> {
        let prompt = pending_prompt(scene).unwrap_or_default();
        let image = generator.generate_image(prompt).await?;
        if cancel.is_cancelled() {
            return Err(SlideReelError::Cancelled);
        }
        let reference = self.persist(scene, &image, MediaKind::Images).await?;
        let patch = ScenePatch {
            primary_image_url: Some(image_reference(&reference)),
            ..ScenePatch::default()
        };
        self.repository.update_scene(&scene.id, &patch).await?;
        Ok(patch)
    }
}

fn pending_prompt(scene: &Scene) -> Option<&str> {
    let slot = scene.layout_content.primary_image()?;
    let has_url = slot.url.as_deref().is_some_and(|u| !u.trim().is_empty());
    if has_url {
        return None;
    }
    slot.prompt.as_deref().filter(|p| !p.trim().is_empty())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/pipeline.rs"]
mod tests;
