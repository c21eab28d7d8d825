// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Symbols exported by a package scope.

use crate::Type;

/// A function as seen by semantic analysis.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionSymbol {
    pub name: String,
    /// Always a `Type::Invokable`.
    pub ty: Type,
    /// Source file the function was declared in, if known.
    #[cfg_attr(feature = "serde", serde(default))]
    pub source: Option<String>,
}

impl FunctionSymbol {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn param_types(&self) -> &[Type] {
        self.ty.invokable_params().unwrap_or(&[])
    }
}

/// The kind of symbol.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum SymbolKind {
    Function(FunctionSymbol),
    /// A module-level variable or constant.
    Variable { ty: Type },
    /// A type definition.
    TypeDef { ty: Type },
}

/// A declared symbol.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
}

impl Symbol {
    pub fn function(func: FunctionSymbol) -> Self {
        Self {
            name: func.name.clone(),
            kind: SymbolKind::Function(func),
        }
    }

    pub fn as_function(&self) -> Option<&FunctionSymbol> {
        match &self.kind {
            SymbolKind::Function(f) => Some(f),
            _ => None,
        }
    }
}
