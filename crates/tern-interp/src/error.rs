// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Execution errors.
//!
//! These are faults in the thunk or its linkage, not guest panics. A guest
//! panic is a normal outcome: [`crate::Completion::Raised`].

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ExecError {
    #[error("no native procedure linked as `{owner}.{name}{descriptor}`")]
    UnlinkedTarget {
        owner: String,
        name: String,
        descriptor: String,
    },

    #[error("expected a value of type `{expected}`, found {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("index {index} out of bounds (length is {len})")]
    IndexOutOfBounds { index: u32, len: usize },

    #[error("expected {expected} closure map{}, got {got}", if *.expected == 1 { "" } else { "s" })]
    ArityMismatch { expected: usize, got: usize },

    #[error("local _{0} read before it was written")]
    UninitializedLocal(u32),

    #[error("reached unreachable terminator in bb{0}")]
    Unreachable(u32),
}
