// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! IR operands.

use tern_types::Type;

/// A declared variable (local, parameter, or temporary).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariableDecl {
    pub name: String,
    pub ty: Type,
}

impl VariableDecl {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Operand - a use of a variable.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Operand {
    pub var: VariableDecl,
}

impl Operand {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            var: VariableDecl::new(name, ty),
        }
    }

    pub fn ty(&self) -> &Type {
        &self.var.ty
    }
}

/// Constant value
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Constant {
    Nil,
    Int(i64),
    Float(f64),
    Boolean(bool),
    String(String),
}

/// Source position of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub line: u32,
    pub col: u32,
}
