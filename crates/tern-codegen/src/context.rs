// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Compilation-unit state borrowed by the lowering.

use tern_types::PackageCache;

use crate::{EntryPointTable, LoweringConfig, ModuleNamingPolicy};

/// Everything one lowering call reads. All of it is owned by the
/// compilation driver and borrowed read-only here.
#[derive(Clone, Copy)]
pub struct LoweringContext<'a> {
    pub entry_points: &'a EntryPointTable,
    pub packages: &'a PackageCache,
    pub config: &'a LoweringConfig,
    pub naming: &'a dyn ModuleNamingPolicy,
}

impl<'a> LoweringContext<'a> {
    pub fn new(
        entry_points: &'a EntryPointTable,
        packages: &'a PackageCache,
        config: &'a LoweringConfig,
        naming: &'a dyn ModuleNamingPolicy,
    ) -> Self {
        Self {
            entry_points,
            packages,
            config,
            naming,
        }
    }
}
