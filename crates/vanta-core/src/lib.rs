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

//! # Vanta Core
//!
//! Foundational crate containing the contracts and primitive types shared by
//! the loading pipeline: the [`runtime::ResourceRuntime`] trait every
//! rendering/fetching back-end implements, the common error type, and the
//! generic notification primitive used to observe loading progress.
//!
//! This crate performs no I/O of its own. Everything that actually fetches,
//! decodes, or uploads lives behind the [`runtime::ResourceRuntime`] seam.

#![warn(missing_docs)]

pub mod error;
pub mod event;
pub mod runtime;

pub use error::ResourceError;
pub use event::Signal;
pub use runtime::ResourceRuntime;
