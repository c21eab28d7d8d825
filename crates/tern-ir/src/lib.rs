// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Tern IR as handed to the backend.
//!
//! Built upstream and immutable here. The backend lowers closure loads and
//! call sites into thunks; everything else in a function body is emitted
//! elsewhere.

mod callee;
mod display;
mod function;
mod instr;
mod operand;

pub use callee::CalleeRef;
pub use function::Function;
pub use instr::{Call, ClosureLoad, Instruction, InstructionKind};
pub use operand::{Constant, Operand, Position, VariableDecl};
