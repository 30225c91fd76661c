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

//! The closed set of task variants, split into parameters and results.
//!
//! Every task kind is described by a [`TaskSpec`] (immutable, plain data,
//! fixed at registration) and produces a [`TaskPayload`] on success (holding
//! the back-end's handle types). Keeping the two apart means the parameters
//! can be read during the asynchronous back-end call without touching the
//! task's mutable state.

use vanta_core::runtime::{
    CubeTextureOptions, HdrCubeTextureOptions, LoadedGraph, MeshFilter, TextureOptions,
};
use vanta_core::ResourceRuntime;

/// What a task loads and with which parameters. One variant per resource
/// kind; the set is closed by design.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskSpec {
    /// Load a scene graph (meshes, particle systems, skeletons).
    Mesh {
        /// Which meshes of the file to keep.
        filter: MeshFilter,
        /// Base URL the file is resolved against.
        root_url: String,
        /// File name, relative to `root_url`.
        filename: String,
    },
    /// Fetch a file as UTF-8 text.
    TextFile {
        /// Location of the file.
        url: String,
    },
    /// Fetch a file as raw bytes.
    BinaryFile {
        /// Location of the file.
        url: String,
    },
    /// Fetch and decode an image.
    Image {
        /// Location of the image.
        url: String,
    },
    /// Load a 2D texture.
    Texture {
        /// Location of the texture.
        url: String,
        /// Mipmap/orientation/sampling options.
        options: TextureOptions,
    },
    /// Load a cube texture.
    CubeTexture {
        /// Base URL of the cubemap.
        url: String,
        /// Face list and mipmap options.
        options: CubeTextureOptions,
    },
    /// Load an HDR cube texture. Completion is signalled through the
    /// texture's own readiness callbacks rather than the loading call.
    HdrCubeTexture {
        /// Location of the HDR panorama or cubemap.
        url: String,
        /// Size, harmonics, and filtering options.
        options: HdrCubeTextureOptions,
    },
}

impl TaskSpec {
    /// A short label for the variant, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            TaskSpec::Mesh { .. } => "mesh",
            TaskSpec::TextFile { .. } => "text_file",
            TaskSpec::BinaryFile { .. } => "binary_file",
            TaskSpec::Image { .. } => "image",
            TaskSpec::Texture { .. } => "texture",
            TaskSpec::CubeTexture { .. } => "cube_texture",
            TaskSpec::HdrCubeTexture { .. } => "hdr_cube_texture",
        }
    }
}

/// What a successful task produced. Populated exactly once, on the success
/// transition; absent for failed or unfinished tasks.
pub(crate) enum TaskPayload<R: ResourceRuntime> {
    Graph(LoadedGraph<R>),
    Text(String),
    Binary(Vec<u8>),
    Image(R::Image),
    Texture(R::Texture2D),
    CubeTexture(R::CubeTexture),
    HdrCubeTexture(R::HdrCubeTexture),
}
