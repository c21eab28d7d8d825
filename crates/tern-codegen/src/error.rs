// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Lowering errors.
//!
//! Every error here is fatal to the compilation unit. Nothing is retried
//! and no partial thunk is emitted.

use tern_ir::InstructionKind;
use tern_types::Type;
use thiserror::Error;

/// A lowering error, tagged with the callee and the instruction kind that
/// was being lowered.
#[derive(Debug, Clone, Error)]
#[error("{kind} (lowering {instruction} of `{callee}`)")]
pub struct LoweringError {
    pub kind: LoweringErrorKind,
    pub instruction: InstructionKind,
    /// Qualified callee name, or `<none>` for instructions without one.
    pub callee: String,
}

impl LoweringError {
    pub fn new(kind: LoweringErrorKind, instruction: InstructionKind, callee: impl Into<String>) -> Self {
        Self {
            kind,
            instruction,
            callee: callee.into(),
        }
    }

    /// Internal compiler errors, as opposed to resolution failures.
    pub fn is_internal(&self) -> bool {
        !matches!(
            self.kind,
            LoweringErrorKind::UnknownPackage { .. }
                | LoweringErrorKind::UndefinedCallee { .. }
                | LoweringErrorKind::NotInvokable { .. }
        )
    }
}

#[derive(Debug, Clone, Error)]
pub enum LoweringErrorKind {
    #[error("internal error: thunk generation is not supported for `{0}` instructions")]
    UnsupportedInstruction(InstructionKind),

    #[error("internal error: async call result must be a future, found `{0}`")]
    NonFutureAsyncResult(Type),

    #[error("internal error: virtual call has no receiver argument")]
    MissingReceiver,

    #[error("internal error: static dispatch reached the emitter without a resolved callee")]
    MissingResolution,

    #[error("callee could not be resolved: package `{package}` is not in the package cache")]
    UnknownPackage { package: String },

    #[error("callee could not be resolved: `{name}` is not defined in package `{package}`")]
    UndefinedCallee { package: String, name: String },

    #[error("callee could not be resolved: `{name}` in package `{package}` is not a function")]
    NotInvokable { package: String, name: String },
}

pub type CodegenResult<T> = Result<T, LoweringError>;
