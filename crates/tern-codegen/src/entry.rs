// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Table of functions already compiled in the current unit.

use std::collections::HashMap;

use tern_ir::Function;
use tern_types::PackageId;

use crate::naming::{encode_identifier, package_name};
use crate::LoweringConfig;

/// A compiled function and the owner it was emitted into.
#[derive(Debug, Clone)]
pub struct EntryPoint {
    /// Fully qualified owner: `org/module/major/file`.
    pub owner: String,
    pub function: Function,
}

/// Compiled entry points keyed by qualified name (package path followed
/// by the encoded function name). Filled incrementally by the code
/// generator as functions are emitted.
#[derive(Debug, Default)]
pub struct EntryPointTable {
    entries: HashMap<String, EntryPoint>,
}

impl EntryPointTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Qualified lookup key for `name` in `pkg`.
    pub fn key(config: &LoweringConfig, pkg: &PackageId, name: &str) -> String {
        format!(
            "{}{}",
            package_name(config, &pkg.org, &pkg.name, &pkg.version),
            encode_identifier(name)
        )
    }

    /// Register a compiled function of `pkg`. Replaces any previous entry
    /// under the same key.
    pub fn register(&mut self, config: &LoweringConfig, pkg: &PackageId, entry: EntryPoint) {
        let key = Self::key(config, pkg, &entry.function.name);
        self.entries.insert(key, entry);
    }

    pub fn lookup(&self, key: &str) -> Option<&EntryPoint> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
