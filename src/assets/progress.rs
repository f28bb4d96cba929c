use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrepareStatus {
    Preparing,
    Ready,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Advisory progress of one preparation run.
pub struct PrepareProgress {
    pub total: usize,
    pub completed: usize,
    pub current_task: String,
    pub status: PrepareStatus,
}

impl PrepareProgress {
    pub fn preparing(total: usize, completed: usize, current_task: impl Into<String>) -> Self {
        Self {
            total,
            completed,
            current_task: current_task.into(),
            status: PrepareStatus::Preparing,
        }
    }

    pub fn ready(total: usize, completed: usize) -> Self {
        Self {
            total,
            completed,
            current_task: "ready".to_string(),
            status: PrepareStatus::Ready,
        }
    }

    pub fn failed(total: usize, completed: usize, message: impl Into<String>) -> Self {
        Self {
            total,
            completed,
            current_task: message.into(),
            status: PrepareStatus::Error,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status != PrepareStatus::Preparing
    }
}

/// Receives every progress report of a run, in order.
pub trait ProgressSink: Send + Sync {
    fn report(&self, progress: &PrepareProgress);
}

impl<F> ProgressSink for F
where
    F: Fn(&PrepareProgress) + Send + Sync,
{
    fn report(&self, progress: &PrepareProgress) {
        self(progress)
    }
}

/// Discards every report.
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _progress: &PrepareProgress) {}
}

#[derive(Debug)]
struct Slot {
    generation: u64,
    progress: PrepareProgress,
}

/// Progress records keyed by project id.
///
/// Owned by whoever drives preparation (a session, a request handler) and passed by
/// reference; cloning shares the same records.
#[derive(Clone, Debug, Default)]
pub struct ProgressStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    next_generation: u64,
    slots: HashMap<String, Slot>,
}

impl ProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Begins (or restarts) a run for `project_id`. The only way `completed` goes back down.
    pub fn start(&self, project_id: &str, total: usize) -> PrepareProgress {
        let progress = PrepareProgress::preparing(total, 0, "scanning scenes");
        let mut inner = self.lock();
        inner.next_generation += 1;
        let generation = inner.next_generation;
        inner.slots.insert(
            project_id.to_string(),
            Slot {
                generation,
                progress: progress.clone(),
            },
        );
        progress
    }

    /// Records `progress`. `completed` never decreases within a run; `total` only grows.
    pub fn update(&self, project_id: &str, progress: &PrepareProgress) -> PrepareProgress {
        let mut guard = self.lock();
        let inner = &mut *guard;
        match inner.slots.get_mut(project_id) {
            Some(slot) => {
                let prev = &slot.progress;
                let merged = PrepareProgress {
                    total: progress.total.max(prev.total),
                    completed: progress.completed.max(prev.completed),
                    current_task: progress.current_task.clone(),
                    status: progress.status,
                };
                slot.progress = merged.clone();
                merged
            }
            None => {
                inner.next_generation += 1;
                let generation = inner.next_generation;
                inner.slots.insert(
                    project_id.to_string(),
                    Slot {
                        generation,
                        progress: progress.clone(),
                    },
                );
                progress.clone()
            }
        }
    }

    pub fn get(&self, project_id: &str) -> Option<PrepareProgress> {
        self.lock()
            .slots
            .get(project_id)
            .map(|s| s.progress.clone())
    }

    pub fn clear(&self, project_id: &str) -> Option<PrepareProgress> {
        self.lock().slots.remove(project_id).map(|s| s.progress)
    }

    pub fn len(&self) -> usize {
        self.lock().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears the record after `delay` unless a new run has started for the project since.
    pub fn clear_after(&self, project_id: &str, delay: Duration) -> tokio::task::JoinHandle<()> {
        let generation = self.lock().slots.get(project_id).map(|s| s.generation);
        let store = self.clone();
        let project_id = project_id.to_string();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut inner = store.lock();
            let current = inner.slots.get(&project_id).map(|s| s.generation);
            if current.is_some() && current == generation {
                inner.slots.remove(&project_id);
                tracing::debug!(project = %project_id, "progress record expired");
            }
        })
    }

    /// A sink that records every report under `project_id`.
    pub fn sink(&self, project_id: impl Into<String>) -> StoreSink {
        StoreSink {
            store: self.clone(),
            project_id: project_id.into(),
        }
    }
}

pub struct StoreSink {
    store: ProgressStore,
    project_id: String,
}

impl ProgressSink for StoreSink {
    fn report(&self, progress: &PrepareProgress) {
        // The first report of a run has nothing completed yet; no-op and scan-failure runs
        // consist of that single finished report.
        let restarting = progress.completed == 0
            && self
                .store
                .get(&self.project_id)
                .is_none_or(|p| p.is_finished());
        if restarting {
            self.store.start(&self.project_id, progress.total);
        }
        self.store.update(&self.project_id, progress);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/progress.rs"]
mod tests;
