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

//! A single unit of asynchronous loading work and its lifecycle.

mod spec;

pub use spec::TaskSpec;

pub(crate) use spec::TaskPayload;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::oneshot;
use vanta_core::runtime::{ErrorCallback, HdrCubeTextureOptions, LoadedGraph, ReadyCallback};
use vanta_core::{ResourceError, ResourceRuntime, Signal};

/// The lifecycle of a task. Transitions are monotonic: once a terminal
/// state (`Done` or `Error`) is reached, the task never leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// Registered, not yet run.
    Init,
    /// `run` has started; the back-end call is in flight.
    Running,
    /// The back-end succeeded and the payload is populated.
    Done,
    /// The back-end failed; the error is recorded.
    Error,
}

struct TaskStatus<R: ResourceRuntime> {
    state: TaskState,
    error: Option<ResourceError>,
    payload: Option<TaskPayload<R>>,
}

/// One unit of loading work: a name for diagnostics, an immutable
/// [`TaskSpec`], a state machine, and the success payload or error.
///
/// Tasks are created by an [`AssetsManager`](crate::manager::AssetsManager)
/// factory method and handed back as `Arc` so callers can attach listeners
/// before `load()` and read results after the batch finishes. A task belongs
/// to exactly one manager for its whole lifetime.
pub struct AssetTask<R: ResourceRuntime> {
    name: String,
    spec: TaskSpec,
    status: Mutex<TaskStatus<R>>,
    // Set only when a terminal transition has actually been taken; guards
    // against a back-end signalling completion twice.
    completed: AtomicBool,
    success: Signal<AssetTask<R>>,
    failure: Signal<AssetTask<R>>,
}

/// Takes the payload out of `$task` if it holds the `$variant` kind.
macro_rules! take_payload {
    ($task:ident, $variant:ident) => {
        match $task
            .lock_status()
            .payload
            .take_if(|payload| matches!(payload, TaskPayload::$variant(_)))
        {
            Some(TaskPayload::$variant(value)) => Some(value),
            _ => None,
        }
    };
}

impl<R: ResourceRuntime> AssetTask<R> {
    /// Creates a task in the `Init` state.
    pub fn new(name: impl Into<String>, spec: TaskSpec) -> Self {
        Self {
            name: name.into(),
            spec,
            status: Mutex::new(TaskStatus {
                state: TaskState::Init,
                error: None,
                payload: None,
            }),
            completed: AtomicBool::new(false),
            success: Signal::new(),
            failure: Signal::new(),
        }
    }

    /// The diagnostic name given at registration. Not required to be unique.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parameters this task was registered with.
    pub fn spec(&self) -> &TaskSpec {
        &self.spec
    }

    /// The current lifecycle state.
    pub fn state(&self) -> TaskState {
        self.lock_status().state
    }

    /// `true` once a terminal transition has been taken.
    pub fn is_completed(&self) -> bool {
        self.completed.load(Ordering::Acquire)
    }

    /// The recorded failure, if the task ended in `Error`.
    pub fn error(&self) -> Option<ResourceError> {
        self.lock_status().error.clone()
    }

    /// Subscribes a listener fired when this task succeeds. Fires at most
    /// once, before the manager-level success notification.
    pub fn on_success(&self, listener: impl Fn(&AssetTask<R>) + Send + Sync + 'static) {
        self.success.subscribe(listener);
    }

    /// Subscribes a listener fired when this task fails. Fires at most
    /// once, before the manager-level failure notification.
    pub fn on_error(&self, listener: impl Fn(&AssetTask<R>) + Send + Sync + 'static) {
        self.failure.subscribe(listener);
    }

    /// The fetched text, for a `TextFile` task that succeeded.
    pub fn text(&self) -> Option<String> {
        match self.lock_status().payload {
            Some(TaskPayload::Text(ref text)) => Some(text.clone()),
            _ => None,
        }
    }

    /// The fetched bytes, for a `BinaryFile` task that succeeded.
    pub fn data(&self) -> Option<Vec<u8>> {
        match self.lock_status().payload {
            Some(TaskPayload::Binary(ref bytes)) => Some(bytes.clone()),
            _ => None,
        }
    }

    /// Takes the loaded scene graph out of a successful `Mesh` task.
    /// Subsequent calls return `None`.
    pub fn take_graph(&self) -> Option<LoadedGraph<R>> {
        take_payload!(self, Graph)
    }

    /// Takes the decoded image out of a successful `Image` task.
    pub fn take_image(&self) -> Option<R::Image> {
        take_payload!(self, Image)
    }

    /// Takes the texture out of a successful `Texture` task.
    pub fn take_texture(&self) -> Option<R::Texture2D> {
        take_payload!(self, Texture)
    }

    /// Takes the cube texture out of a successful `CubeTexture` task.
    pub fn take_cube_texture(&self) -> Option<R::CubeTexture> {
        take_payload!(self, CubeTexture)
    }

    /// Takes the HDR cube texture out of a successful `HdrCubeTexture` task.
    pub fn take_hdr_cube_texture(&self) -> Option<R::HdrCubeTexture> {
        take_payload!(self, HdrCubeTexture)
    }

    /// Runs this task against `runtime` and returns the terminal state.
    ///
    /// Idempotent: a task that already completed is not run again and keeps
    /// its recorded outcome. The state moves to `Running` when the call
    /// begins, not at construction. Every back-end failure, whether returned
    /// directly or signalled through a readiness callback, lands in the
    /// `Error` state exactly once.
    pub async fn run(&self, runtime: &R) -> TaskState {
        if self.is_completed() {
            log::warn!("task '{}' ran after completing; ignoring", self.name);
            return self.state();
        }
        self.lock_status().state = TaskState::Running;
        log::debug!("task '{}' ({}) running", self.name, self.spec.kind());

        let result = match &self.spec {
            TaskSpec::Mesh {
                filter,
                root_url,
                filename,
            } => runtime
                .load_graph_asset(filter, root_url, filename)
                .await
                .map(TaskPayload::Graph),
            TaskSpec::TextFile { url } => runtime.fetch_text(url).await.map(TaskPayload::Text),
            TaskSpec::BinaryFile { url } => {
                runtime.fetch_binary(url).await.map(TaskPayload::Binary)
            }
            TaskSpec::Image { url } => runtime.decode_image(url).await.map(TaskPayload::Image),
            TaskSpec::Texture { url, options } => runtime
                .load_texture_2d(url, options)
                .await
                .map(TaskPayload::Texture),
            TaskSpec::CubeTexture { url, options } => runtime
                .load_cube_texture(url, options)
                .await
                .map(TaskPayload::CubeTexture),
            // Divergent path: readiness arrives through the handle's own
            // callbacks, not through the call that created it.
            TaskSpec::HdrCubeTexture { url, options } => {
                Self::run_hdr(runtime, url, options).await
            }
        };

        match result {
            Ok(payload) => {
                self.complete_ok(payload);
                TaskState::Done
            }
            Err(error) => {
                self.complete_err(error);
                TaskState::Error
            }
        }
    }

    /// Bridges the HDR back-end's callback pair to a oneshot and awaits it.
    /// The sender is consumed on first use, so duplicate or contradictory
    /// callback invocations are absorbed here.
    async fn run_hdr(
        runtime: &R,
        url: &str,
        options: &HdrCubeTextureOptions,
    ) -> Result<TaskPayload<R>, ResourceError> {
        let (ready_tx, ready_rx) = oneshot::channel::<Result<(), ResourceError>>();
        let ready_tx = Arc::new(Mutex::new(Some(ready_tx)));
        let error_tx = Arc::clone(&ready_tx);

        let on_ready: ReadyCallback = Box::new(move || {
            let sender = ready_tx.lock().unwrap_or_else(PoisonError::into_inner).take();
            if let Some(sender) = sender {
                let _ = sender.send(Ok(()));
            }
        });
        let on_error: ErrorCallback = Box::new(move |error| {
            let sender = error_tx.lock().unwrap_or_else(PoisonError::into_inner).take();
            if let Some(sender) = sender {
                let _ = sender.send(Err(error));
            }
        });

        let texture = runtime.load_hdr_cube_texture(url, options, on_ready, on_error);

        match ready_rx.await {
            Ok(Ok(())) => Ok(TaskPayload::HdrCubeTexture(texture)),
            Ok(Err(error)) => Err(error),
            // Both callbacks dropped without firing: the back-end broke its
            // contract, which is a failure rather than an eternal stall.
            Err(_) => Err(ResourceError::new(
                "HDR readiness callbacks were dropped before firing",
            )),
        }
    }

    fn complete_ok(&self, payload: TaskPayload<R>) {
        {
            let mut status = self.lock_status();
            status.state = TaskState::Done;
            status.payload = Some(payload);
        }
        self.completed.store(true, Ordering::Release);
        log::debug!("task '{}' done", self.name);
        self.success.emit(self);
    }

    fn complete_err(&self, error: ResourceError) {
        log::warn!("task '{}' failed: {}", self.name, error);
        {
            let mut status = self.lock_status();
            status.state = TaskState::Error;
            status.error = Some(error);
        }
        self.completed.store(true, Ordering::Release);
        self.failure.emit(self);
    }

    fn lock_status(&self) -> MutexGuard<'_, TaskStatus<R>> {
        self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<R: ResourceRuntime> std::fmt::Debug for AssetTask<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetTask")
            .field("name", &self.name)
            .field("kind", &self.spec.kind())
            .field("state", &self.state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;
    use vanta_core::runtime::{CubeTextureOptions, MeshFilter, TextureOptions};

    /// Minimal back-end: text URLs containing "missing" fail, everything
    /// else echoes its URL.
    struct EchoRuntime;

    #[async_trait]
    impl ResourceRuntime for EchoRuntime {
        type Mesh = String;
        type ParticleSystem = String;
        type Skeleton = String;
        type Image = String;
        type Texture2D = String;
        type CubeTexture = String;
        type HdrCubeTexture = String;

        async fn load_graph_asset(
            &self,
            _filter: &MeshFilter,
            root_url: &str,
            filename: &str,
        ) -> Result<LoadedGraph<Self>, ResourceError> {
            Ok(LoadedGraph {
                meshes: vec![format!("{root_url}{filename}")],
                particle_systems: vec![],
                skeletons: vec![],
            })
        }

        async fn fetch_text(&self, url: &str) -> Result<String, ResourceError> {
            if url.contains("missing") {
                return Err(ResourceError::new(format!("not found: {url}")));
            }
            Ok(format!("text of {url}"))
        }

        async fn fetch_binary(&self, url: &str) -> Result<Vec<u8>, ResourceError> {
            Ok(url.as_bytes().to_vec())
        }

        async fn decode_image(&self, url: &str) -> Result<String, ResourceError> {
            Ok(format!("image:{url}"))
        }

        async fn load_texture_2d(
            &self,
            url: &str,
            _options: &TextureOptions,
        ) -> Result<String, ResourceError> {
            Ok(format!("texture:{url}"))
        }

        async fn load_cube_texture(
            &self,
            url: &str,
            _options: &CubeTextureOptions,
        ) -> Result<String, ResourceError> {
            Ok(format!("cube:{url}"))
        }

        fn load_hdr_cube_texture(
            &self,
            url: &str,
            _options: &HdrCubeTextureOptions,
            on_ready: ReadyCallback,
            _on_error: ErrorCallback,
        ) -> String {
            // Fire twice on purpose; the bridge must absorb the second call.
            on_ready();
            on_ready();
            format!("hdr:{url}")
        }
    }

    fn text_task(url: &str) -> AssetTask<EchoRuntime> {
        AssetTask::new("t", TaskSpec::TextFile { url: url.into() })
    }

    #[test]
    fn new_task_starts_in_init() {
        let task = text_task("a.txt");
        assert_eq!(task.state(), TaskState::Init);
        assert!(!task.is_completed());
        assert!(task.error().is_none());
        assert!(task.text().is_none());
    }

    #[tokio::test]
    async fn success_populates_payload_and_fires_listener() {
        let task = text_task("a.txt");
        let fired = Arc::new(AtomicUsize::new(0));
        let fired_clone = Arc::clone(&fired);
        task.on_success(move |task| {
            assert_eq!(task.state(), TaskState::Done);
            fired_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(task.run(&EchoRuntime).await, TaskState::Done);
        assert!(task.is_completed());
        assert_eq!(task.text().as_deref(), Some("text of a.txt"));
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failure_records_error_and_fires_listener() {
        let task = text_task("missing.txt");
        let fired = Arc::new(AtomicUsize::new(0));
        let fired_clone = Arc::clone(&fired);
        task.on_error(move |_| {
            fired_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(task.run(&EchoRuntime).await, TaskState::Error);
        assert!(task.is_completed());
        assert_eq!(
            task.error().map(|e| e.message),
            Some("not found: missing.txt".to_string())
        );
        assert!(task.text().is_none());
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn a_completed_task_does_not_run_again() {
        let task = text_task("a.txt");
        let fired = Arc::new(AtomicUsize::new(0));
        let fired_clone = Arc::clone(&fired);
        task.on_success(move |_| {
            fired_clone.fetch_add(1, Ordering::SeqCst);
        });

        task.run(&EchoRuntime).await;
        assert_eq!(task.run(&EchoRuntime).await, TaskState::Done);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn hdr_double_ready_is_absorbed() {
        let task = AssetTask::new(
            "env",
            TaskSpec::HdrCubeTexture {
                url: "env.hdr".into(),
                options: HdrCubeTextureOptions::default(),
            },
        );

        assert_eq!(task.run(&EchoRuntime).await, TaskState::Done);
        assert_eq!(task.take_hdr_cube_texture().as_deref(), Some("hdr:env.hdr"));
        // The payload is moved out on the first take.
        assert!(task.take_hdr_cube_texture().is_none());
    }

    #[tokio::test]
    async fn payload_accessors_are_variant_checked() {
        let task = text_task("a.txt");
        task.run(&EchoRuntime).await;
        assert!(task.take_image().is_none());
        assert!(task.data().is_none());
        assert_eq!(task.text().as_deref(), Some("text of a.txt"));
    }
}
