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

//! Plain-data parameter types passed through to the resource back-end.

use serde::{Deserialize, Serialize};

/// Selects which meshes of a scene graph to load.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MeshFilter {
    /// Load every mesh in the file.
    #[default]
    All,
    /// Load only the meshes with the given names.
    Names(Vec<String>),
}

/// How a sampled texture is filtered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingMode {
    /// Nearest-neighbour sampling.
    Nearest,
    /// Bilinear filtering.
    Bilinear,
    /// Trilinear filtering across mip levels.
    #[default]
    Trilinear,
}

/// Options for loading a 2D texture.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureOptions {
    /// Skip mipmap generation.
    pub no_mipmap: bool,
    /// Flip the image vertically on load.
    pub invert_y: bool,
    /// Sampling mode for the created texture.
    pub sampling_mode: SamplingMode,
}

/// Options for loading a cube texture.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CubeTextureOptions {
    /// File extensions to try for each face, when faces are derived from
    /// the base URL.
    pub extensions: Option<Vec<String>>,
    /// Skip mipmap generation.
    pub no_mipmap: bool,
    /// Explicit per-face file list, overriding extension-based derivation.
    pub files: Option<Vec<String>>,
}

/// Options for loading an HDR cube texture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HdrCubeTextureOptions {
    /// Target cube face size; the back-end picks one when absent.
    pub size: Option<u32>,
    /// Skip mipmap generation.
    pub no_mipmap: bool,
    /// Generate spherical harmonics for image-based lighting.
    pub generate_harmonics: bool,
    /// Treat the source data as gamma-space.
    pub use_gamma_space: bool,
    /// Pre-filter the mip chain for physically based rendering.
    pub use_pmrem_generator: bool,
}

impl Default for HdrCubeTextureOptions {
    fn default() -> Self {
        Self {
            size: None,
            no_mipmap: false,
            generate_harmonics: true,
            use_gamma_space: false,
            use_pmrem_generator: false,
        }
    }
}
