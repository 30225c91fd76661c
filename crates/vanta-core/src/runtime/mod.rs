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

//! The contract between the loading queue and the resource back-end.
//!
//! The queue never fetches or decodes anything itself. Each operation it
//! coordinates is delegated to a [`ResourceRuntime`] implementation, one
//! method per resource kind. Handle types are associated types so this crate
//! stays decoupled from any concrete renderer or network layer: a back-end
//! decides what a "texture" or a "skeleton" actually is.

mod options;

pub use options::*;

use async_trait::async_trait;

use crate::error::ResourceError;

/// Callback a back-end invokes once an HDR cube texture becomes usable.
pub type ReadyCallback = Box<dyn Fn() + Send + Sync>;

/// Callback a back-end invokes when an HDR cube texture fails to load.
pub type ErrorCallback = Box<dyn Fn(ResourceError) + Send + Sync>;

/// The narrow interface every resource back-end exposes to the loading queue.
///
/// All operations except [`load_hdr_cube_texture`] are plain async calls that
/// resolve exactly once with the loaded resource or a [`ResourceError`].
///
/// [`load_hdr_cube_texture`] diverges: the handle is returned synchronously
/// and readiness is signalled later through the supplied callback pair,
/// mirroring back-ends whose HDR pipeline reports completion through the
/// texture object itself rather than through the call that created it.
///
/// [`load_hdr_cube_texture`]: ResourceRuntime::load_hdr_cube_texture
#[async_trait]
pub trait ResourceRuntime: Send + Sync + 'static {
    /// A loaded scene-graph mesh.
    type Mesh: Send + Sync + 'static;
    /// A particle system attached to a loaded scene graph.
    type ParticleSystem: Send + Sync + 'static;
    /// A skeleton attached to a loaded scene graph.
    type Skeleton: Send + Sync + 'static;
    /// A decoded image, not yet uploaded anywhere.
    type Image: Send + Sync + 'static;
    /// A loaded 2D texture.
    type Texture2D: Send + Sync + 'static;
    /// A loaded cube texture.
    type CubeTexture: Send + Sync + 'static;
    /// A loaded HDR cube texture.
    type HdrCubeTexture: Send + Sync + 'static;

    /// Loads a scene graph (meshes plus attached particle systems and
    /// skeletons) from `root_url`/`filename`, keeping only the nodes
    /// selected by `filter`.
    async fn load_graph_asset(
        &self,
        filter: &MeshFilter,
        root_url: &str,
        filename: &str,
    ) -> Result<LoadedGraph<Self>, ResourceError>;

    /// Fetches a file as UTF-8 text.
    async fn fetch_text(&self, url: &str) -> Result<String, ResourceError>;

    /// Fetches a file as raw bytes.
    async fn fetch_binary(&self, url: &str) -> Result<Vec<u8>, ResourceError>;

    /// Fetches and decodes an image.
    async fn decode_image(&self, url: &str) -> Result<Self::Image, ResourceError>;

    /// Loads a 2D texture.
    async fn load_texture_2d(
        &self,
        url: &str,
        options: &TextureOptions,
    ) -> Result<Self::Texture2D, ResourceError>;

    /// Loads a cube texture from a base URL, optionally from an explicit
    /// list of face files.
    async fn load_cube_texture(
        &self,
        url: &str,
        options: &CubeTextureOptions,
    ) -> Result<Self::CubeTexture, ResourceError>;

    /// Starts loading an HDR cube texture and returns its handle immediately.
    ///
    /// The back-end must invoke `on_ready` once the texture is usable, or
    /// `on_error` if loading fails. Invoking either more than once, or both,
    /// is tolerated by the queue; only the first invocation counts.
    fn load_hdr_cube_texture(
        &self,
        url: &str,
        options: &HdrCubeTextureOptions,
        on_ready: ReadyCallback,
        on_error: ErrorCallback,
    ) -> Self::HdrCubeTexture;
}

/// The result of loading a scene graph: everything the back-end pulled out
/// of the source file.
pub struct LoadedGraph<R: ResourceRuntime + ?Sized> {
    /// Meshes selected by the filter, in file order.
    pub meshes: Vec<R::Mesh>,
    /// Particle systems attached to the selected meshes.
    pub particle_systems: Vec<R::ParticleSystem>,
    /// Skeletons attached to the selected meshes.
    pub skeletons: Vec<R::Skeleton>,
}
