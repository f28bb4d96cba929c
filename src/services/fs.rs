use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::{
    assets::media::{InlineMedia, MediaKind},
    foundation::error::{SlideReelError, SlideReelResult},
    scene::model::{Project, Scene},
    services::{MediaStore, SceneRepository, ScenePatch, memory::find_scene_mut},
};

/// Writes media under `{root}/{kind}/` and hands back `/{kind}/{filename}` references.
#[derive(Clone, Debug)]
pub struct FsMediaStore {
    root: PathBuf,
}

impl FsMediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem path a durable reference returned by this store resolves to.
    pub fn resolve(&self, reference: &str) -> PathBuf {
        self.root.join(reference.trim_start_matches('/'))
    }
}

fn check_filename(filename: &str) -> SlideReelResult<()> {
    let bad = filename.is_empty()
        || filename.contains(['/', '\\'])
        || filename == "."
        || filename == "..";
    if bad {
        return Err(SlideReelError::storage(format!(
            "invalid media filename '{filename}'"
        )));
    }
    Ok(())
}

#[async_trait]
impl MediaStore for FsMediaStore {
    async fn persist_inline_media(
        &self,
        media: &InlineMedia,
        filename: &str,
        kind: MediaKind,
    ) -> SlideReelResult<String> {
        check_filename(filename)?;
        let dir = self.root.join(kind.dir_name());
        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            SlideReelError::storage(format!("create '{}': {e}", dir.display()))
        })?;
        let path = dir.join(filename);
        tokio::fs::write(&path, &media.bytes)
            .await
            .map_err(|e| SlideReelError::storage(format!("write '{}': {e}", path.display())))?;
        tracing::debug!(path = %path.display(), bytes = media.bytes.len(), "media persisted");
        Ok(format!("/{}/{filename}", kind.dir_name()))
    }
}

/// A single project stored as a JSON file, rewritten after every change.
#[derive(Debug)]
pub struct JsonProjectStore {
    path: PathBuf,
    write_lock: tokio::sync::Mutex<()>,
}

impl JsonProjectStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> SlideReelResult<Project> {
        let raw = tokio::fs::read(&self.path).await.map_err(|e| {
            SlideReelError::persistence(format!("read '{}': {e}", self.path.display()))
        })?;
        Ok(serde_json::from_slice(&raw)?)
    }

    pub async fn save(&self, project: &Project) -> SlideReelResult<()> {
        let json = serde_json::to_vec_pretty(project)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &json).await.map_err(|e| {
            SlideReelError::persistence(format!("write '{}': {e}", tmp.display()))
        })?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| {
            SlideReelError::persistence(format!("replace '{}': {e}", self.path.display()))
        })
    }

    async fn modify(
        &self,
        f: impl FnOnce(&mut Project) -> SlideReelResult<()> + Send,
    ) -> SlideReelResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut project = self.load().await?;
        f(&mut project)?;
        self.save(&project).await
    }
}

#[async_trait]
impl SceneRepository for JsonProjectStore {
    async fn create_scene(&self, project_id: &str, scene: Scene) -> SlideReelResult<()> {
        self.modify(|project| {
            if project.id != project_id {
                return Err(SlideReelError::persistence(format!(
                    "unknown project '{project_id}'"
                )));
            }
            if project.scene(&scene.id).is_some() {
                return Err(SlideReelError::persistence(format!(
                    "scene '{}' already exists",
                    scene.id
                )));
            }
            project.scenes.push(scene);
            Ok(())
        })
        .await
    }

    async fn update_scene(&self, scene_id: &str, patch: &ScenePatch) -> SlideReelResult<()> {
        self.modify(|project| {
            let scene = find_scene_mut(std::iter::once(project), scene_id).ok_or_else(|| {
                SlideReelError::persistence(format!("unknown scene '{scene_id}'"))
            })?;
            patch.apply(scene);
            Ok(())
        })
        .await
    }

    async fn delete_scene(&self, scene_id: &str) -> SlideReelResult<()> {
        self.modify(|project| {
            let pos = project
                .scenes
                .iter()
                .position(|s| s.id == scene_id)
                .ok_or_else(|| {
                    SlideReelError::persistence(format!("unknown scene '{scene_id}'"))
                })?;
            project.scenes.remove(pos);
            Ok(())
        })
        .await
    }

    async fn get_project(&self, project_id: &str) -> SlideReelResult<Project> {
        let project = self.load().await?;
        if project.id != project_id {
            return Err(SlideReelError::persistence(format!(
                "unknown project '{project_id}'"
            )));
        }
        Ok(project)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/services/fs.rs"]
mod tests;
