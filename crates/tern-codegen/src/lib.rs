// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Tern code generator: closure and async-call lowering.
//!
//! Every closure load and call site that escapes into the scheduler gets
//! its own thunk: a small procedure taking `(closure maps..., args[])`,
//! where `args[0]` is the strand and the remaining slots hold boxed
//! arguments interleaved with their supplied flags. The thunk adapts that
//! uniform convention to the callee's real one.
//!
//! Pipeline per instruction: build descriptor → resolve callee → lay out
//! argument slots → emit thunk. See [`lambda::generate_lambda`].

pub mod abi;
pub mod config;
mod context;
mod entry;
mod error;
pub mod lambda;
pub mod naming;
pub mod thunk;

pub use config::{ConfigError, LoweringConfig};
pub use context::LoweringContext;
pub use entry::{EntryPoint, EntryPointTable};
pub use error::{CodegenResult, LoweringError, LoweringErrorKind};
pub use lambda::{generate_lambda, generate_unit};
pub use naming::{ModuleNamingPolicy, SourceFileNaming};
pub use thunk::ThunkFunction;
