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

//! Declarative task descriptions, loadable from RON.
//!
//! A [`TaskManifest`] is the data-file form of a batch: one entry per task,
//! registered in file order via
//! [`AssetsManager::add_manifest_tasks`]. Example:
//!
//! ```ron
//! (
//!     tasks: [
//!         TextFile(name: "settings", url: "config/settings.txt"),
//!         Texture(name: "albedo", url: "textures/albedo.png",
//!                 options: (no_mipmap: true)),
//!         Mesh(name: "hero", filter: Names(["hero"]),
//!              root_url: "models/", filename: "hero.gltf"),
//!     ],
//! )
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use vanta_core::runtime::{CubeTextureOptions, HdrCubeTextureOptions, MeshFilter, TextureOptions};
use vanta_core::ResourceRuntime;

use crate::manager::AssetsManager;
use crate::task::{AssetTask, TaskSpec};

/// An error raised while reading a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest text is not valid RON, or does not match the schema.
    #[error("failed to parse task manifest: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// A batch of task descriptions, in registration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskManifest {
    /// The tasks to register, first to last.
    pub tasks: Vec<TaskEntry>,
}

impl TaskManifest {
    /// Parses a manifest from RON text.
    pub fn from_ron(text: &str) -> Result<Self, ManifestError> {
        Ok(ron::de::from_str(text)?)
    }
}

/// One declaratively described task. Mirrors [`TaskSpec`] plus the task name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TaskEntry {
    /// A scene-graph loading task.
    Mesh {
        /// Diagnostic name.
        name: String,
        /// Which meshes to keep; defaults to all of them.
        #[serde(default)]
        filter: MeshFilter,
        /// Base URL the file is resolved against.
        root_url: String,
        /// File name, relative to `root_url`.
        filename: String,
    },
    /// A text file fetch task.
    TextFile {
        /// Diagnostic name.
        name: String,
        /// Location of the file.
        url: String,
    },
    /// A binary file fetch task.
    BinaryFile {
        /// Diagnostic name.
        name: String,
        /// Location of the file.
        url: String,
    },
    /// An image decode task.
    Image {
        /// Diagnostic name.
        name: String,
        /// Location of the image.
        url: String,
    },
    /// A 2D texture loading task.
    Texture {
        /// Diagnostic name.
        name: String,
        /// Location of the texture.
        url: String,
        /// Loading options; all default to off.
        #[serde(default)]
        options: TextureOptions,
    },
    /// A cube texture loading task.
    CubeTexture {
        /// Diagnostic name.
        name: String,
        /// Base URL of the cubemap.
        url: String,
        /// Face list and mipmap options.
        #[serde(default)]
        options: CubeTextureOptions,
    },
    /// An HDR cube texture loading task.
    HdrCubeTexture {
        /// Diagnostic name.
        name: String,
        /// Location of the HDR source.
        url: String,
        /// Size, harmonics, and filtering options.
        #[serde(default)]
        options: HdrCubeTextureOptions,
    },
}

impl TaskEntry {
    fn into_parts(self) -> (String, TaskSpec) {
        match self {
            TaskEntry::Mesh {
                name,
                filter,
                root_url,
                filename,
            } => (
                name,
                TaskSpec::Mesh {
                    filter,
                    root_url,
                    filename,
                },
            ),
            TaskEntry::TextFile { name, url } => (name, TaskSpec::TextFile { url }),
            TaskEntry::BinaryFile { name, url } => (name, TaskSpec::BinaryFile { url }),
            TaskEntry::Image { name, url } => (name, TaskSpec::Image { url }),
            TaskEntry::Texture { name, url, options } => {
                (name, TaskSpec::Texture { url, options })
            }
            TaskEntry::CubeTexture { name, url, options } => {
                (name, TaskSpec::CubeTexture { url, options })
            }
            TaskEntry::HdrCubeTexture { name, url, options } => {
                (name, TaskSpec::HdrCubeTexture { url, options })
            }
        }
    }
}

impl<R: ResourceRuntime> AssetsManager<R> {
    /// Registers every entry of `manifest`, in order, and returns the
    /// created tasks (same order).
    pub fn add_manifest_tasks(&mut self, manifest: &TaskManifest) -> Vec<Arc<AssetTask<R>>> {
        manifest
            .tasks
            .iter()
            .cloned()
            .map(|entry| {
                let (name, spec) = entry.into_parts();
                self.add_task(name, spec)
            })
            .collect()
    }

    /// Parses RON manifest text and registers every entry.
    pub fn add_manifest_ron(&mut self, text: &str) -> Result<Vec<Arc<AssetTask<R>>>, ManifestError> {
        Ok(self.add_manifest_tasks(&TaskManifest::from_ron(text)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vanta_core::runtime::SamplingMode;

    #[test]
    fn parses_a_full_manifest() {
        let manifest = TaskManifest::from_ron(
            r#"(
                tasks: [
                    TextFile(name: "settings", url: "config/settings.txt"),
                    Texture(name: "albedo", url: "textures/albedo.png",
                            options: (no_mipmap: true, sampling_mode: nearest)),
                    Mesh(name: "hero", filter: Names(["hero"]),
                         root_url: "models/", filename: "hero.gltf"),
                    HdrCubeTexture(name: "env", url: "env/sky.hdr"),
                ],
            )"#,
        )
        .expect("manifest should parse");

        assert_eq!(manifest.tasks.len(), 4);
        assert_eq!(
            manifest.tasks[0],
            TaskEntry::TextFile {
                name: "settings".into(),
                url: "config/settings.txt".into(),
            }
        );
        match &manifest.tasks[1] {
            TaskEntry::Texture { options, .. } => {
                assert!(options.no_mipmap);
                assert!(!options.invert_y);
                assert_eq!(options.sampling_mode, SamplingMode::Nearest);
            }
            other => panic!("expected a texture entry, got {other:?}"),
        }
        match &manifest.tasks[3] {
            TaskEntry::HdrCubeTexture { options, .. } => {
                // Harmonics generation is on unless the manifest disables it.
                assert!(options.generate_harmonics);
            }
            other => panic!("expected an HDR entry, got {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_text() {
        let err = TaskManifest::from_ron("(tasks: [Nonsense(name: \"x\")])");
        assert!(matches!(err, Err(ManifestError::Parse(_))));
    }

    #[test]
    fn round_trips_through_ron() {
        let manifest = TaskManifest {
            tasks: vec![TaskEntry::BinaryFile {
                name: "terrain".into(),
                url: "terrain.bin".into(),
            }],
        };
        let text = ron::ser::to_string(&manifest).expect("serialize");
        let back = TaskManifest::from_ron(&text).expect("reparse");
        assert_eq!(back, manifest);
    }
}
