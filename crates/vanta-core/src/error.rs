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

//! The error type reported by resource back-ends and recorded on failed tasks.

use std::error::Error;
use std::sync::Arc;

use thiserror::Error;

/// A failure reported by a resource back-end: a human-readable message plus
/// the underlying cause, when one exists.
///
/// The cause is reference-counted so the same error can be held by the failed
/// task and handed to every notification listener without copying it.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ResourceError {
    /// A human-readable description of what went wrong.
    pub message: String,
    /// The lower-level error this failure originated from, if any.
    #[source]
    pub cause: Option<Arc<dyn Error + Send + Sync + 'static>>,
}

impl ResourceError {
    /// Creates an error carrying only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
        }
    }

    /// Creates an error wrapping a lower-level cause.
    pub fn with_cause(
        message: impl Into<String>,
        cause: impl Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            cause: Some(Arc::new(cause)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_displayed() {
        let err = ResourceError::new("resource not found: 404");
        assert_eq!(err.to_string(), "resource not found: 404");
        assert!(err.cause.is_none());
    }

    #[test]
    fn cause_is_exposed_as_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
        let err = ResourceError::with_cause("fetch failed", io);

        let source = std::error::Error::source(&err).expect("source should be set");
        assert_eq!(source.to_string(), "reset");
    }

    #[test]
    fn clone_shares_the_cause() {
        let io = std::io::Error::other("boom");
        let err = ResourceError::with_cause("decode failed", io);
        let clone = err.clone();
        assert_eq!(clone.message, err.message);
        assert!(clone.cause.is_some());
    }
}
