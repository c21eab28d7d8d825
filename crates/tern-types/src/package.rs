// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Package symbols and the package cache.
//!
//! Semantic analysis leaves one `PackageSymbol` per module in the cache,
//! keyed by `org/module`. The backend only ever reads it.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use crate::Symbol;

/// Identity of a module: organization, module name, version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PackageId {
    pub org: String,
    pub name: String,
    pub version: String,
}

impl PackageId {
    pub fn new(org: impl Into<String>, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            org: org.into(),
            name: name.into(),
            version: version.into(),
        }
    }

    /// Cache key: `org/module`.
    pub fn cache_key(&self) -> String {
        format!("{}/{}", self.org, self.name)
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.version.is_empty() {
            write!(f, "{}/{}", self.org, self.name)
        } else {
            write!(f, "{}/{}:{}", self.org, self.name, self.version)
        }
    }
}

/// Errors from building scopes and the cache.
#[derive(Debug, Clone, Error)]
pub enum PackageError {
    #[error("duplicate definition of `{name}` in package {package}")]
    DuplicateSymbol { package: String, name: String },

    #[error("package {0} is already in the cache")]
    DuplicatePackage(String),
}

/// Top-level bindings of a package.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    bindings: HashMap<String, Symbol>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.bindings.get(name)
    }

    /// Returns the rejected name if it is already bound.
    fn define(&mut self, symbol: Symbol) -> Result<(), String> {
        if self.bindings.contains_key(&symbol.name) {
            return Err(symbol.name);
        }
        self.bindings.insert(symbol.name.clone(), symbol);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// A compiled or analyzed module and its exported scope.
#[derive(Debug, Clone)]
pub struct PackageSymbol {
    pub id: PackageId,
    pub scope: Scope,
}

impl PackageSymbol {
    pub fn new(id: PackageId) -> Self {
        Self {
            id,
            scope: Scope::new(),
        }
    }

    pub fn define(&mut self, symbol: Symbol) -> Result<(), PackageError> {
        self.scope
            .define(symbol)
            .map_err(|name| PackageError::DuplicateSymbol {
                package: self.id.to_string(),
                name,
            })
    }
}

/// Package symbols keyed by `org/module`.
#[derive(Debug, Default)]
pub struct PackageCache {
    packages: HashMap<String, PackageSymbol>,
}

impl PackageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, package: PackageSymbol) -> Result<(), PackageError> {
        let key = package.id.cache_key();
        if self.packages.contains_key(&key) {
            return Err(PackageError::DuplicatePackage(key));
        }
        self.packages.insert(key, package);
        Ok(())
    }

    /// Look up by `org/module`.
    pub fn get_symbol(&self, key: &str) -> Option<&PackageSymbol> {
        self.packages.get(key)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FunctionSymbol, Type};

    fn math() -> PackageSymbol {
        let mut pkg = PackageSymbol::new(PackageId::new("acme", "math", "1.0.0"));
        pkg.define(Symbol::function(FunctionSymbol::new(
            "add",
            Type::invokable(vec![Type::Int, Type::Int], Type::Int),
        )))
        .unwrap();
        pkg
    }

    #[test]
    fn cache_lookup_by_org_and_module() {
        let mut cache = PackageCache::new();
        cache.insert(math()).unwrap();

        let pkg = cache.get_symbol("acme/math").expect("package present");
        let sym = pkg.scope.lookup("add").expect("symbol present");
        assert_eq!(sym.as_function().unwrap().param_types().len(), 2);
        assert!(cache.get_symbol("acme/strings").is_none());
    }

    #[test]
    fn duplicate_symbol_rejected() {
        let mut pkg = math();
        let err = pkg
            .define(Symbol::function(FunctionSymbol::new("add", Type::invokable(vec![], Type::Nil))))
            .unwrap_err();
        assert!(matches!(err, PackageError::DuplicateSymbol { ref name, .. } if name == "add"));
    }

    #[test]
    fn duplicate_package_rejected() {
        let mut cache = PackageCache::new();
        cache.insert(math()).unwrap();
        assert!(matches!(cache.insert(math()), Err(PackageError::DuplicatePackage(_))));
    }

    #[test]
    fn package_id_display() {
        assert_eq!(PackageId::new("acme", "math", "1.0.0").to_string(), "acme/math:1.0.0");
        assert_eq!(PackageId::new("acme", "math", "").to_string(), "acme/math");
    }
}
