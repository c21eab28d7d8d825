// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Reference executor for thunk MIR.
//!
//! Runs a generated thunk against a linkage of native static procedures
//! and the runtime's strand and object model. Used to check that lowered
//! thunks actually honor the calling convention.

mod error;
mod interp;
mod linkage;

pub use error::ExecError;
pub use interp::{conforms, Completion, Interpreter};
pub use linkage::{Linkage, NativeFn};
