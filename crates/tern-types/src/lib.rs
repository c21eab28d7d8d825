// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Semantic model consumed by the Tern backend.
//!
//! Types as produced by semantic analysis, plus the package cache the
//! backend falls back to when a callee has no compiled entry point yet.

mod package;
mod symbol;
mod types;

pub use package::{PackageCache, PackageError, PackageId, PackageSymbol, Scope};
pub use symbol::{FunctionSymbol, Symbol, SymbolKind};
pub use types::Type;
