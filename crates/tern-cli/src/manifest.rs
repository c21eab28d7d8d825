// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Compilation-unit manifest read by `ternc lower`.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tern_codegen::{ConfigError, EntryPoint, EntryPointTable, LoweringConfig};
use tern_ir::{Function, Instruction};
use tern_types::{PackageCache, PackageError, PackageId, PackageSymbol, Symbol};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid unit manifest: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Package(#[from] PackageError),
}

/// Package as left in the cache by semantic analysis.
#[derive(Debug, Deserialize)]
pub struct PackageEntry {
    #[serde(flatten)]
    pub id: PackageId,
    #[serde(default)]
    pub symbols: Vec<Symbol>,
}

/// Function already compiled in this unit.
#[derive(Debug, Deserialize)]
pub struct CompiledEntry {
    pub package: PackageId,
    pub owner: String,
    pub function: Function,
}

#[derive(Debug, Deserialize)]
pub struct ThunkRequest {
    pub thunk: String,
    pub instruction: Instruction,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitManifest {
    /// Falls back to `TERN_LOWERING_CONFIG`, then defaults.
    #[serde(default)]
    pub config: Option<LoweringConfig>,
    #[serde(default)]
    pub packages: Vec<PackageEntry>,
    #[serde(default)]
    pub compiled: Vec<CompiledEntry>,
    #[serde(default)]
    pub instructions: Vec<ThunkRequest>,
}

/// Tables ready to borrow into a lowering context.
pub struct Unit {
    pub config: LoweringConfig,
    pub entry_points: EntryPointTable,
    pub packages: PackageCache,
    pub instructions: Vec<(String, Instruction)>,
}

impl UnitManifest {
    pub fn from_json(text: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ManifestError> {
        let text = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn into_unit(self) -> Result<Unit, ManifestError> {
        let config = match self.config {
            Some(config) => config,
            None => LoweringConfig::from_env()?,
        };

        let mut packages = PackageCache::new();
        for entry in self.packages {
            let mut package = PackageSymbol::new(entry.id);
            for symbol in entry.symbols {
                package.define(symbol)?;
            }
            packages.insert(package)?;
        }

        let mut entry_points = EntryPointTable::new();
        for compiled in self.compiled {
            let entry = EntryPoint {
                owner: compiled.owner,
                function: compiled.function,
            };
            entry_points.register(&config, &compiled.package, entry);
        }

        let instructions = self
            .instructions
            .into_iter()
            .map(|req| (req.thunk, req.instruction))
            .collect();

        Ok(Unit {
            config,
            entry_points,
            packages,
            instructions,
        })
    }
}
