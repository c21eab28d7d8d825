// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Compiled IR function headers.

use tern_types::Type;

/// Header of an IR function that has been compiled in the current unit.
///
/// Bodies are not needed by the lowering; only the name, the declared type
/// and whether the body is supplied natively.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Function {
    pub name: String,
    /// Always a `Type::Invokable`.
    pub ty: Type,
    /// Body is implemented outside Tern source (native interop).
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_foreign: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub source: Option<String>,
}

impl Function {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            is_foreign: false,
            source: None,
        }
    }

    /// Mark the function as natively implemented.
    pub fn foreign(mut self) -> Self {
        self.is_foreign = true;
        self
    }

    pub fn param_types(&self) -> &[Type] {
        self.ty.invokable_params().unwrap_or(&[])
    }

    pub fn return_type(&self) -> Option<&Type> {
        self.ty.invokable_return()
    }
}
