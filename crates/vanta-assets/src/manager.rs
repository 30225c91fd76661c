// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The queue owner: registration, fan-out launch, and aggregation.

use std::sync::Arc;

use thiserror::Error;
use vanta_core::runtime::{CubeTextureOptions, HdrCubeTextureOptions, MeshFilter, TextureOptions};
use vanta_core::{ResourceRuntime, Signal};

use crate::task::{AssetTask, TaskSpec, TaskState};

/// An error from the queue itself, as opposed to a per-task failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// `load()` was called while a previous batch was still in flight.
    #[error("a load is already in progress")]
    AlreadyLoading,
}

/// A progress notification: one task just reached a terminal state.
pub struct ProgressEvent<R: ResourceRuntime> {
    /// Tasks of the current batch still in flight.
    pub remaining: usize,
    /// Size of the current batch.
    pub total: usize,
    /// The task that just completed (successfully or not).
    pub task: Arc<AssetTask<R>>,
}

impl<R: ResourceRuntime> Clone for ProgressEvent<R> {
    fn clone(&self) -> Self {
        Self {
            remaining: self.remaining,
            total: self.total,
            task: Arc::clone(&self.task),
        }
    }
}

/// Owns an ordered batch of [`AssetTask`]s bound to one shared back-end,
/// launches them all at once, and aggregates their completions.
///
/// Tasks are registered through the `add_*_task` factory methods, which
/// return the created task so listeners can be attached before [`load`]:
///
/// - tasks are *launched* in registration order, without throttling;
/// - they may *complete* in any order;
/// - a failed task never aborts its siblings: the batch always runs to the
///   end, and "all finished" carries every task, failed ones included.
///
/// Four notification channels are exposed: per-task success, per-task
/// failure, progress, and all-finished. Each is a multi-subscriber
/// [`Signal`]; the `on_*` convenience methods subscribe a single listener to
/// the same channel.
///
/// [`load`]: AssetsManager::load
pub struct AssetsManager<R: ResourceRuntime> {
    runtime: Arc<R>,
    tasks: Vec<Arc<AssetTask<R>>>,
    is_loading: bool,
    task_success: Signal<Arc<AssetTask<R>>>,
    task_error: Signal<Arc<AssetTask<R>>>,
    progress: Signal<ProgressEvent<R>>,
    finished: Signal<[Arc<AssetTask<R>>]>,
}

impl<R: ResourceRuntime> AssetsManager<R> {
    /// Creates a manager bound to one back-end for its lifetime.
    pub fn new(runtime: Arc<R>) -> Self {
        Self {
            runtime,
            tasks: Vec::new(),
            is_loading: false,
            task_success: Signal::new(),
            task_error: Signal::new(),
            progress: Signal::new(),
            finished: Signal::new(),
        }
    }

    /// The registered tasks, in registration order.
    pub fn tasks(&self) -> &[Arc<AssetTask<R>>] {
        &self.tasks
    }

    /// `true` while a batch is in flight.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub(crate) fn add_task(
        &mut self,
        name: impl Into<String>,
        spec: TaskSpec,
    ) -> Arc<AssetTask<R>> {
        let task = Arc::new(AssetTask::new(name, spec));
        log::debug!(
            "registered task '{}' ({})",
            task.name(),
            task.spec().kind()
        );
        self.tasks.push(Arc::clone(&task));
        task
    }

    /// Registers a scene-graph loading task.
    pub fn add_mesh_task(
        &mut self,
        name: impl Into<String>,
        filter: MeshFilter,
        root_url: impl Into<String>,
        filename: impl Into<String>,
    ) -> Arc<AssetTask<R>> {
        self.add_task(
            name,
            TaskSpec::Mesh {
                filter,
                root_url: root_url.into(),
                filename: filename.into(),
            },
        )
    }

    /// Registers a text file fetch task.
    pub fn add_text_file_task(
        &mut self,
        name: impl Into<String>,
        url: impl Into<String>,
    ) -> Arc<AssetTask<R>> {
        self.add_task(name, TaskSpec::TextFile { url: url.into() })
    }

    /// Registers a binary file fetch task.
    pub fn add_binary_file_task(
        &mut self,
        name: impl Into<String>,
        url: impl Into<String>,
    ) -> Arc<AssetTask<R>> {
        self.add_task(name, TaskSpec::BinaryFile { url: url.into() })
    }

    /// Registers an image decode task.
    pub fn add_image_task(
        &mut self,
        name: impl Into<String>,
        url: impl Into<String>,
    ) -> Arc<AssetTask<R>> {
        self.add_task(name, TaskSpec::Image { url: url.into() })
    }

    /// Registers a 2D texture loading task.
    pub fn add_texture_task(
        &mut self,
        name: impl Into<String>,
        url: impl Into<String>,
        options: TextureOptions,
    ) -> Arc<AssetTask<R>> {
        self.add_task(
            name,
            TaskSpec::Texture {
                url: url.into(),
                options,
            },
        )
    }

    /// Registers a cube texture loading task.
    pub fn add_cube_texture_task(
        &mut self,
        name: impl Into<String>,
        url: impl Into<String>,
        options: CubeTextureOptions,
    ) -> Arc<AssetTask<R>> {
        self.add_task(
            name,
            TaskSpec::CubeTexture {
                url: url.into(),
                options,
            },
        )
    }

    /// Registers an HDR cube texture loading task.
    pub fn add_hdr_cube_texture_task(
        &mut self,
        name: impl Into<String>,
        url: impl Into<String>,
        options: HdrCubeTextureOptions,
    ) -> Arc<AssetTask<R>> {
        self.add_task(
            name,
            TaskSpec::HdrCubeTexture {
                url: url.into(),
                options,
            },
        )
    }

    /// Clears the task list and lowers the loading flag. Returns `self` for
    /// chaining.
    ///
    /// In-flight back-end calls are not cancelled: a batch that was already
    /// launched finishes against its own snapshot of the task list, and
    /// completions belonging to an abandoned batch are dropped harmlessly.
    pub fn reset(&mut self) -> &mut Self {
        log::debug!("resetting queue ({} task(s) discarded)", self.tasks.len());
        self.tasks.clear();
        self.is_loading = false;
        self
    }

    /// Launches every registered task and resolves once all of them have
    /// reached a terminal state.
    ///
    /// Returns [`QueueError::AlreadyLoading`] if a batch is still marked in
    /// flight (which can only happen when a previous `load` future was
    /// dropped mid-batch; [`reset`](AssetsManager::reset) recovers from
    /// that). An empty queue fires "all finished" immediately with an empty
    /// list.
    ///
    /// Completions are funnelled through a single channel and handled one at
    /// a time on this future, so the remaining count and the notification
    /// order stay consistent no matter which worker thread a task finishes
    /// on. No timeout is imposed: a back-end call that never resolves holds
    /// its slot forever.
    ///
    /// "All finished" fires only once every task of the batch has reached a
    /// terminal state. A task that aborts without reporting (a panicking
    /// listener, for instance) therefore suppresses it; the batch stays
    /// marked in flight and [`reset`](AssetsManager::reset) recovers.
    pub async fn load(&mut self) -> Result<(), QueueError> {
        if self.is_loading {
            return Err(QueueError::AlreadyLoading);
        }
        self.is_loading = true;

        let batch = self.tasks.clone();
        let total = batch.len();
        if total == 0 {
            log::info!("no tasks registered; finishing immediately");
            self.is_loading = false;
            self.finished.emit(&batch);
            return Ok(());
        }

        log::info!("loading batch of {total} task(s)");
        let (done_tx, done_rx) = flume::unbounded();
        for task in &batch {
            let task = Arc::clone(task);
            let runtime = Arc::clone(&self.runtime);
            let done_tx = done_tx.clone();
            tokio::spawn(async move {
                let state = task.run(runtime.as_ref()).await;
                let _ = done_tx.send_async((task, state)).await;
            });
        }
        drop(done_tx);

        let mut remaining = total;
        while remaining > 0 {
            let Ok((task, state)) = done_rx.recv_async().await else {
                // Every sender is gone; a task aborted without reporting
                // (e.g. a panicking listener). Those tasks will never reach
                // a terminal state, so "all finished" must not fire. The
                // batch stays marked in flight until reset().
                log::error!("completion channel closed with {remaining} task(s) unaccounted for");
                return Ok(());
            };
            remaining = remaining.saturating_sub(1);
            if state == TaskState::Done {
                self.task_success.emit(&task);
            } else {
                self.task_error.emit(&task);
            }
            self.progress.emit(&ProgressEvent {
                remaining,
                total,
                task,
            });
        }

        self.is_loading = false;
        log::info!("batch of {total} task(s) finished");
        self.finished.emit(&batch);
        Ok(())
    }

    /// The channel fired when any task succeeds.
    pub fn task_success_signal(&self) -> &Signal<Arc<AssetTask<R>>> {
        &self.task_success
    }

    /// The channel fired when any task fails.
    pub fn task_error_signal(&self) -> &Signal<Arc<AssetTask<R>>> {
        &self.task_error
    }

    /// The channel fired after each terminal completion, with the live
    /// remaining/total counts.
    pub fn progress_signal(&self) -> &Signal<ProgressEvent<R>> {
        &self.progress
    }

    /// The channel fired once per batch, when every task has completed.
    /// The payload is the full batch, failed tasks included.
    pub fn finished_signal(&self) -> &Signal<[Arc<AssetTask<R>>]> {
        &self.finished
    }

    /// Subscribes one listener to the task-success channel.
    pub fn on_task_success(&self, listener: impl Fn(&Arc<AssetTask<R>>) + Send + Sync + 'static) {
        self.task_success.subscribe(listener);
    }

    /// Subscribes one listener to the task-failure channel.
    pub fn on_task_error(&self, listener: impl Fn(&Arc<AssetTask<R>>) + Send + Sync + 'static) {
        self.task_error.subscribe(listener);
    }

    /// Subscribes one listener to the progress channel.
    pub fn on_progress(&self, listener: impl Fn(&ProgressEvent<R>) + Send + Sync + 'static) {
        self.progress.subscribe(listener);
    }

    /// Subscribes one listener to the all-finished channel.
    pub fn on_finish(&self, listener: impl Fn(&[Arc<AssetTask<R>>]) + Send + Sync + 'static) {
        self.finished.subscribe(listener);
    }
}

impl<R: ResourceRuntime> std::fmt::Debug for AssetsManager<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetsManager")
            .field("tasks", &self.tasks.len())
            .field("is_loading", &self.is_loading)
            .finish()
    }
}
