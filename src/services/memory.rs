use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use async_trait::async_trait;

use crate::{
    foundation::error::{SlideReelError, SlideReelResult},
    scene::model::{Project, Scene},
    services::{SceneRepository, ScenePatch},
};

/// Projects held in process memory.
#[derive(Debug, Default)]
pub struct MemoryProjectStore {
    projects: Mutex<HashMap<String, Project>>,
}

impl MemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project(project: Project) -> Self {
        let store = Self::new();
        store.insert_project(project);
        store
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Project>> {
        self.projects
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn insert_project(&self, project: Project) {
        self.lock().insert(project.id.clone(), project);
    }

    pub fn project(&self, project_id: &str) -> Option<Project> {
        self.lock().get(project_id).cloned()
    }
}

pub(crate) fn find_scene_mut<'a>(
    projects: impl Iterator<Item = &'a mut Project>,
    scene_id: &str,
) -> Option<&'a mut Scene> {
    projects
        .flat_map(|p| p.scenes.iter_mut())
        .find(|s| s.id == scene_id)
}

#[async_trait]
impl SceneRepository for MemoryProjectStore {
    async fn create_scene(&self, project_id: &str, scene: Scene) -> SlideReelResult<()> {
        let mut projects = self.lock();
        let project = projects.get_mut(project_id).ok_or_else(|| {
            SlideReelError::persistence(format!("unknown project '{project_id}'"))
        })?;
        if project.scene(&scene.id).is_some() {
            return Err(SlideReelError::persistence(format!(
                "scene '{}' already exists",
                scene.id
            )));
        }
        project.scenes.push(scene);
        Ok(())
    }

    async fn update_scene(&self, scene_id: &str, patch: &ScenePatch) -> SlideReelResult<()> {
        let mut projects = self.lock();
        let scene = find_scene_mut(projects.values_mut(), scene_id)
            .ok_or_else(|| SlideReelError::persistence(format!("unknown scene '{scene_id}'")))?;
        patch.apply(scene);
        Ok(())
    }

    async fn delete_scene(&self, scene_id: &str) -> SlideReelResult<()> {
        let mut projects = self.lock();
        for project in projects.values_mut() {
            if let Some(pos) = project.scenes.iter().position(|s| s.id == scene_id) {
                project.scenes.remove(pos);
                return Ok(());
            }
        }
        Err(SlideReelError::persistence(format!(
            "unknown scene '{scene_id}'"
        )))
    }

    async fn get_project(&self, project_id: &str) -> SlideReelResult<Project> {
        self.project(project_id)
            .ok_or_else(|| SlideReelError::persistence(format!("unknown project '{project_id}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/services/memory.rs"]
mod tests;
