// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Guest error values.

use std::fmt;

/// A guest-level error. Raised by panics and carried on the strand while a
/// foreign call is suspended.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorValue {
    pub message: String,
    pub detail: Option<String>,
}

impl ErrorValue {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error(\"{}\"", self.message)?;
        if let Some(detail) = &self.detail {
            write!(f, ", {}", detail)?;
        }
        write!(f, ")")
    }
}

impl std::error::Error for ErrorValue {}
