// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Callee references.

use tern_types::PackageId;

/// Identifies a callable independently of how it is reached.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalleeRef {
    pub org: String,
    pub module: String,
    pub version: String,
    pub name: String,
}

impl CalleeRef {
    pub fn new(pkg: &PackageId, name: impl Into<String>) -> Self {
        Self {
            org: pkg.org.clone(),
            module: pkg.name.clone(),
            version: pkg.version.clone(),
            name: name.into(),
        }
    }

    pub fn package_id(&self) -> PackageId {
        PackageId::new(self.org.clone(), self.module.clone(), self.version.clone())
    }
}
