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

//! # Vanta Assets
//!
//! An asynchronous, heterogeneous loading queue. An [`AssetsManager`] owns a
//! batch of declaratively described tasks (meshes, textures, text files,
//! binary blobs, images, cubemaps, HDR cubemaps), fans them all out against
//! one shared [`ResourceRuntime`](vanta_core::ResourceRuntime), tracks each
//! task's lifecycle, and folds completions into a single "all finished"
//! notification.
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use vanta_assets::AssetsManager;
//! # async fn demo<R: vanta_core::ResourceRuntime>(runtime: Arc<R>) {
//! let mut manager = AssetsManager::new(runtime);
//! let settings = manager.add_text_file_task("settings", "config/settings.txt");
//! manager.on_finish(|tasks| log::info!("{} task(s) finished", tasks.len()));
//! manager.load().await.expect("no load was in progress");
//! assert!(settings.text().is_some());
//! # }
//! ```

pub mod manager;
pub mod manifest;
pub mod task;

pub use manager::{AssetsManager, ProgressEvent, QueueError};
pub use manifest::{ManifestError, TaskEntry, TaskManifest};
pub use task::{AssetTask, TaskSpec, TaskState};
