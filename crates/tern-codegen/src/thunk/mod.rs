// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Thunk MIR - control-flow graph of a generated thunk.
//!
//! A thunk only moves values between the generic argument array, the
//! strand and exactly one call.

mod builder;
mod display;

pub use builder::ThunkBuilder;

use tern_types::Type;

use crate::abi;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalId(pub u32);

/// Storage class of a thunk local.
#[derive(Debug, Clone, PartialEq)]
pub enum LocalTy {
    Strand,
    /// Generic argument array (`object[]`).
    ArgArray,
    /// Captured environment map.
    ClosureMap,
    /// Boxed value of static type `object`.
    Boxed,
    /// Unboxed value of a known semantic type.
    Native(Type),
}

/// Local variable or temporary
#[derive(Debug, Clone)]
pub struct ThunkLocal {
    pub id: LocalId,
    pub name: Option<String>,
    pub ty: LocalTy,
    pub is_param: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ThunkConst {
    Nil,
    Bool(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ThunkOperand {
    Local(LocalId),
    Const(ThunkConst),
}

/// The strand fields generated code may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrandField {
    BlockedOnExtern,
    Panic,
    ReturnValue,
}

impl StrandField {
    pub fn field_name(self) -> &'static str {
        match self {
            StrandField::BlockedOnExtern => abi::BLOCKED_ON_EXTERN_FIELD,
            StrandField::Panic => abi::PANIC_FIELD,
            StrandField::ReturnValue => abi::RETURN_VALUE_FIELD,
        }
    }
}

/// Statically addressed procedure.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StaticTarget {
    pub owner: String,
    pub name: String,
    pub descriptor: String,
}

/// Thunk statement - no control flow
#[derive(Debug, Clone, PartialEq)]
pub enum ThunkStmt {
    SourceLocation {
        line: u32,
        col: u32,
    },
    /// `dst = (Strand) args[0]`
    LoadStrand {
        dst: LocalId,
        args: LocalId,
    },
    /// `dst = args[index]`
    LoadArg {
        dst: LocalId,
        args: LocalId,
        index: u32,
    },
    /// Checked conversion from a boxed value to its native form.
    Unbox {
        dst: LocalId,
        src: LocalId,
        ty: Type,
    },
    /// Conversion from a native value of type `ty` to a boxed value.
    Box {
        dst: LocalId,
        src: LocalId,
        ty: Type,
    },
    GetStrandField {
        dst: LocalId,
        strand: LocalId,
        field: StrandField,
    },
    SetStrandField {
        strand: LocalId,
        field: StrandField,
        value: ThunkOperand,
    },
    /// `dst = value != nil`
    IsPresent {
        dst: LocalId,
        value: LocalId,
    },
    /// Fresh `object[len]`, every slot nil.
    NewArray {
        dst: LocalId,
        len: u32,
    },
    ArrayStore {
        array: LocalId,
        index: u32,
        value: ThunkOperand,
    },
    CallStatic {
        dst: LocalId,
        target: StaticTarget,
        args: Vec<ThunkOperand>,
    },
    /// `dst = receiver.call(strand, method, args)` through the object's
    /// uniform dispatch entry point.
    CallDynamic {
        dst: LocalId,
        receiver: LocalId,
        strand: LocalId,
        method: String,
        args: LocalId,
    },
}

/// Thunk terminator - ends a basic block
#[derive(Debug, Clone, PartialEq)]
pub enum ThunkTerminator {
    Return {
        value: ThunkOperand,
    },
    Goto {
        target: BlockId,
    },
    Branch {
        cond: ThunkOperand,
        then_block: BlockId,
        else_block: BlockId,
    },
    /// Complete the thunk with `error` as its panic outcome.
    Raise {
        error: LocalId,
    },
    Unreachable,
}

/// Basic block in CFG
#[derive(Debug, Clone)]
pub struct ThunkBlock {
    pub id: BlockId,
    pub statements: Vec<ThunkStmt>,
    pub terminator: ThunkTerminator,
}

/// A generated thunk.
#[derive(Debug, Clone)]
pub struct ThunkFunction {
    pub name: String,
    /// Exposed signature: closure maps then the argument array.
    pub descriptor: String,
    pub params: Vec<ThunkLocal>,
    pub locals: Vec<ThunkLocal>,
    pub blocks: Vec<ThunkBlock>,
    pub entry_block: BlockId,
}

impl ThunkFunction {
    pub fn block(&self, id: BlockId) -> &ThunkBlock {
        &self.blocks[id.0 as usize]
    }

    pub fn local(&self, id: LocalId) -> Option<&ThunkLocal> {
        self.locals.iter().find(|l| l.id == id)
    }

    /// The argument-array parameter (always last).
    pub fn args_param(&self) -> Option<LocalId> {
        self.params
            .iter()
            .rev()
            .find(|p| p.ty == LocalTy::ArgArray)
            .map(|p| p.id)
    }

    pub fn closure_params(&self) -> impl Iterator<Item = &ThunkLocal> {
        self.params.iter().filter(|p| p.ty == LocalTy::ClosureMap)
    }

    pub fn statements(&self) -> impl Iterator<Item = &ThunkStmt> {
        self.blocks.iter().flat_map(|b| b.statements.iter())
    }

    /// The single outgoing call, static or dynamic.
    pub fn call(&self) -> Option<&ThunkStmt> {
        self.statements()
            .find(|s| matches!(s, ThunkStmt::CallStatic { .. } | ThunkStmt::CallDynamic { .. }))
    }
}
