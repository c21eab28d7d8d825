// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! IR instructions.

use tern_types::Type;

use crate::{CalleeRef, Constant, Operand, Position, VariableDecl};

/// Load of a function value, optionally capturing closure environments.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClosureLoad {
    pub lhs: VariableDecl,
    pub callee: CalleeRef,
    /// Declared parameters of the loaded function, excluding captures.
    pub params: Vec<VariableDecl>,
    /// Captured environment maps, in capture order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub closure_maps: Vec<Operand>,
    /// Declared type of the loaded function.
    pub fn_ty: Type,
    #[cfg_attr(feature = "serde", serde(default))]
    pub pos: Option<Position>,
}

/// A call site. Shared by async and direct invocation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Call {
    #[cfg_attr(feature = "serde", serde(default))]
    pub lhs: Option<VariableDecl>,
    pub callee: CalleeRef,
    /// Call arguments. For virtual calls, `args[0]` is the receiver.
    pub args: Vec<Operand>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_virtual: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub pos: Option<Position>,
}

/// IR instruction
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Instruction {
    ClosureLoad(ClosureLoad),
    AsyncInvoke(Call),
    DirectInvoke(Call),
    Move {
        lhs: VariableDecl,
        rhs: Operand,
    },
    ConstantLoad {
        lhs: VariableDecl,
        value: Constant,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstructionKind {
    ClosureLoad,
    AsyncInvoke,
    DirectInvoke,
    Move,
    ConstantLoad,
}

impl Instruction {
    pub fn kind(&self) -> InstructionKind {
        match self {
            Instruction::ClosureLoad(_) => InstructionKind::ClosureLoad,
            Instruction::AsyncInvoke(_) => InstructionKind::AsyncInvoke,
            Instruction::DirectInvoke(_) => InstructionKind::DirectInvoke,
            Instruction::Move { .. } => InstructionKind::Move,
            Instruction::ConstantLoad { .. } => InstructionKind::ConstantLoad,
        }
    }

    /// The statically named callee, for instructions that have one.
    pub fn callee(&self) -> Option<&CalleeRef> {
        match self {
            Instruction::ClosureLoad(load) => Some(&load.callee),
            Instruction::AsyncInvoke(call) | Instruction::DirectInvoke(call) => Some(&call.callee),
            Instruction::Move { .. } | Instruction::ConstantLoad { .. } => None,
        }
    }

    pub fn pos(&self) -> Option<Position> {
        match self {
            Instruction::ClosureLoad(load) => load.pos,
            Instruction::AsyncInvoke(call) | Instruction::DirectInvoke(call) => call.pos,
            Instruction::Move { .. } | Instruction::ConstantLoad { .. } => None,
        }
    }
}
